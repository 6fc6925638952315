use crate::builder::{JavaSourceBuilder, TestSourceFile};
use crate::config::JUnitWriterConfig;
use crate::error::CodeGenError;
use crate::unit::TestCaseUnit;
use crasher_plan::Block;
use crasher_types::ClassName;

/// Class name of the per-package suite aggregating all generated tests.
pub const SUITE_NAME: &str = "JUnitAll";

/// Split `blocks` into test classes of at most `max_tests_per_unit` methods.
///
/// A single class keeps the plain name; several are numbered from 1.
pub fn split_into_units<'a>(
    class: &ClassName,
    blocks: &'a [Block],
    max_tests_per_unit: usize,
    filtering: bool,
) -> Result<Vec<TestCaseUnit<'a>>, CodeGenError> {
    if max_tests_per_unit == 0 {
        return Err(CodeGenError::InvalidArgument {
            message: "a test class must hold at least one test".to_string(),
        });
    }
    if blocks.len() <= max_tests_per_unit {
        if blocks.is_empty() {
            return Ok(Vec::new());
        }
        return Ok(vec![TestCaseUnit::new(class.clone(), blocks, filtering)]);
    }

    Ok(blocks
        .chunks(max_tests_per_unit)
        .zip(1i64..)
        .map(|(chunk, suffix)| TestCaseUnit::new(class.clone(), chunk, filtering).with_suffix(suffix))
        .collect())
}

/// Renumber `units` when one of their names is already `taken` in the
/// package, e.g. by a member type of another class with the same simple
/// name. Suffixes then count up from 1, skipping every taken name.
pub fn avoid_taken_names<'a>(
    units: Vec<TestCaseUnit<'a>>,
    taken: &[String],
) -> Vec<TestCaseUnit<'a>> {
    if units
        .iter()
        .all(|unit| !taken.contains(&unit.simple_test_name()))
    {
        return units;
    }

    let mut next = 1i64;
    units
        .into_iter()
        .map(|mut unit| loop {
            unit = unit.with_suffix(next);
            next += 1;
            if !taken.contains(&unit.simple_test_name()) {
                break unit;
            }
        })
        .collect()
}

/// `JUnitAll` for `package`, running every class in `test_classes`.
pub fn render_suite(
    package: &str,
    test_classes: &[String],
    comment: &str,
    config: &JUnitWriterConfig,
) -> TestSourceFile {
    let mut builder = JavaSourceBuilder::from_config(config);
    builder.push_line(&format!("public class {SUITE_NAME} {{"));
    builder.indent();
    builder.push_line("");
    builder.push_line("public static junit.framework.Test suite() {");
    builder.indent();
    builder.push_line(&format!(
        "junit.framework.TestSuite suite = new junit.framework.TestSuite(\"{SUITE_NAME}\");"
    ));
    for test_class in test_classes {
        builder.push_line(&format!("suite.addTestSuite({test_class}.class);"));
    }
    builder.push_line("return suite;");
    builder.dedent();
    builder.push_line("}");
    builder.push_line("");
    builder.push_line("public static void main(String[] args) {");
    builder.indent();
    builder.push_line(&format!("junit.textui.TestRunner.run({SUITE_NAME}.suite());"));
    builder.dedent();
    builder.push_line("}");
    builder.dedent();
    builder.push_line("}");

    TestSourceFile {
        class_name: SUITE_NAME.to_string(),
        package: package.to_string(),
        comment: comment.to_string(),
        class_body: builder.build(),
    }
}
