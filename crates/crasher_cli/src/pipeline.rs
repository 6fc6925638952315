use crate::config::GeneratorConfig;
use crate::report::{ClassReport, FunctionReport, GenerationReport};
use anyhow::{Context, Result, anyhow};
use crasher_codegen_junit::{TestSourceFile, avoid_taken_names, render_suite, split_into_units};
use crasher_plan::{Block, ClassUnderTest, select_indices, selected_count};
use crasher_types::{ClassName, TypeCatalog};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, info};

/// Classes named on the command line, or every catalogued type when none
/// are named.
pub fn resolve_classes(catalog: &TypeCatalog, names: &[String]) -> Result<Vec<ClassName>> {
    if names.is_empty() {
        return Ok(catalog.types().map(|entry| entry.name.clone()).collect());
    }
    names
        .iter()
        .map(|name| -> Result<ClassName> {
            let class = ClassName::parse(name)?;
            catalog.require(&class)?;
            Ok(class)
        })
        .collect()
}

pub fn build_class(
    catalog: &TypeCatalog,
    class: &ClassName,
    config: &GeneratorConfig,
) -> Result<ClassUnderTest> {
    ClassUnderTest::new(
        catalog,
        class.clone(),
        config.max_depth,
        config.visibility_tested,
        config.visibility_used,
    )
    .with_context(|| format!("failed to build plan space for {class}"))
}

/// Per-operation plan counts, without selecting any index.
pub fn count_plans(class: &ClassUnderTest, limit: u64) -> Vec<FunctionReport> {
    class
        .function_ranges()
        .into_iter()
        .map(|(operation, range)| {
            let plans = range.end - range.start;
            FunctionReport {
                operation: operation.to_string(),
                plans,
                selected: selected_count(plans, limit),
            }
        })
        .collect()
}

/// Selected plan indices of every tested operation, in index order, with a
/// per-operation summary.
pub fn select_plans(
    class: &ClassUnderTest,
    limit: u64,
) -> Result<(Vec<u64>, Vec<FunctionReport>)> {
    let mut indices = Vec::new();
    let mut functions = Vec::new();
    for (operation, range) in class.function_ranges() {
        let plans = range.end - range.start;
        let selected = select_indices(plans, limit)
            .with_context(|| format!("failed to select plans of {operation}"))?;
        functions.push(FunctionReport {
            operation: operation.to_string(),
            plans,
            selected: selected.len() as u64,
        });
        indices.extend(selected.into_iter().map(|local| range.start + local));
    }
    Ok((indices, functions))
}

/// Blocks for `indices`, built on up to `workers` threads over disjoint
/// slices. The result is in index order whatever the worker count.
pub fn build_blocks(class: &ClassUnderTest, indices: &[u64], workers: usize) -> Result<Vec<Block>> {
    let build_slice = |slice: &[u64]| -> Result<Vec<Block>> {
        slice
            .iter()
            .map(|index| {
                class
                    .block_at(*index)
                    .with_context(|| format!("failed to build block {index} of {}", class.class()))
            })
            .collect()
    };

    if workers <= 1 || indices.len() < 2 {
        return build_slice(indices);
    }

    let chunk_size = indices.len().div_ceil(workers);
    thread::scope(|scope| -> Result<Vec<Block>> {
        let handles: Vec<_> = indices
            .chunks(chunk_size)
            .map(|slice| scope.spawn(move || build_slice(slice)))
            .collect();

        let mut blocks = Vec::with_capacity(indices.len());
        for handle in handles {
            let slice = handle
                .join()
                .map_err(|_| anyhow!("block worker for {} panicked", class.class()))??;
            blocks.extend(slice);
        }
        Ok(blocks)
    })
}

pub fn inspect(
    catalog: &TypeCatalog,
    classes: &[ClassName],
    config: &GeneratorConfig,
) -> Result<Vec<ClassReport>> {
    classes
        .iter()
        .map(|class| -> Result<ClassReport> {
            let under_test = build_class(catalog, class, config)?;
            let functions = count_plans(&under_test, config.max_plans_per_function);
            Ok(ClassReport {
                class: class.qualified_name(),
                depth: under_test.depth(),
                plans: under_test.size(),
                functions,
                test_classes: Vec::new(),
            })
        })
        .collect()
}

/// Generate, render and write the tests of every class below `output`, plus
/// one `JUnitAll` suite per package.
pub fn generate(
    catalog: &TypeCatalog,
    classes: &[ClassName],
    config: &GeneratorConfig,
    output: &Path,
) -> Result<GenerationReport> {
    let mut report = GenerationReport::default();
    let mut suites: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for class in classes {
        let under_test = build_class(catalog, class, config)?;
        let (indices, functions) = select_plans(&under_test, config.max_plans_per_function)?;
        let blocks = build_blocks(&under_test, &indices, config.workers)?;
        debug!(class = %class, blocks = blocks.len(), "built blocks");

        let units = split_into_units(
            class,
            &blocks,
            config.max_tests_per_unit,
            config.filtering,
        )?;
        let taken = suites.get(class.package()).map(Vec::as_slice).unwrap_or_default();
        let units = avoid_taken_names(units, taken);
        let mut test_classes = Vec::with_capacity(units.len());
        for unit in units {
            let unit = unit
                .with_name_context(under_test.name_context().clone())
                .with_comment(config.comment.clone())
                .with_config(config.writer.clone());
            let file = unit.source_file();
            let path = write_source(output, &file, &unit.to_source())?;
            test_classes.push(file.class_name.clone());
            report.files.push(path);
        }

        if !test_classes.is_empty() {
            suites
                .entry(class.package().to_string())
                .or_default()
                .extend(test_classes.iter().cloned());
        }
        report.classes.push(ClassReport {
            class: class.qualified_name(),
            depth: under_test.depth(),
            plans: under_test.size(),
            functions,
            test_classes,
        });
    }

    for (package, test_classes) in &suites {
        let suite = render_suite(package, test_classes, &config.comment, &config.writer);
        let path = write_source(output, &suite, &suite.to_source(&config.writer))?;
        report.files.push(path);
    }

    info!(
        classes = report.classes.len(),
        files = report.files.len(),
        tests = report.test_count(),
        "generation finished"
    );
    Ok(report)
}

fn write_source(output: &Path, file: &TestSourceFile, source: &str) -> Result<PathBuf> {
    let path = output.join(file.relative_path());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(&path, source).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "wrote test source");
    Ok(path)
}
