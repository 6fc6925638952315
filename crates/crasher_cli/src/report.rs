use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionReport {
    pub operation: String,
    /// Plans in the operation's subspace, clamped to `u64::MAX`.
    pub plans: u64,
    pub selected: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassReport {
    pub class: String,
    pub depth: usize,
    pub plans: u64,
    pub functions: Vec<FunctionReport>,
    /// Test classes written for this class.
    pub test_classes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationReport {
    pub classes: Vec<ClassReport>,
    pub files: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn test_count(&self) -> u64 {
        self.classes
            .iter()
            .flat_map(|class| &class.functions)
            .map(|function| function.selected)
            .sum()
    }
}

pub fn render_json(report: &impl Serialize) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report")
}

pub fn render_classes(classes: &[ClassReport]) -> String {
    let mut lines = Vec::new();
    for class in classes {
        lines.push(format!(
            "{} (depth {}): {} plans",
            class.class, class.depth, class.plans
        ));
        for function in &class.functions {
            lines.push(format!(
                "  {:<48} {:>20} plans, {} selected",
                function.operation, function.plans, function.selected
            ));
        }
        if !class.test_classes.is_empty() {
            lines.push(format!("  -> {}", class.test_classes.join(", ")));
        }
    }
    lines.join("\n")
}

pub fn render_summary(report: &GenerationReport) -> String {
    format!(
        "{}\nWrote {} tests in {} files",
        render_classes(&report.classes),
        report.test_count(),
        report.files.len()
    )
}
