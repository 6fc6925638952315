use anyhow::{Context, Result, bail};
use crasher_codegen_junit::JUnitWriterConfig;
use crasher_plan::MAX_SELECTED_PLANS;
use crasher_types::Visibility;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings of one generation run, read from `crasher.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Deepest nesting of operation calls in one plan.
    pub max_depth: usize,
    /// Operations of a class that get tests.
    pub visibility_tested: Visibility,
    /// Operations that may produce argument values.
    pub visibility_used: Visibility,
    /// Wrap test bodies so raised failures are classified.
    pub filtering: bool,
    /// Plans kept per tested operation; 0 keeps all.
    pub max_plans_per_function: u64,
    pub max_tests_per_unit: usize,
    pub workers: usize,
    /// Text placed in the leading comment of every generated file.
    pub comment: String,
    pub writer: JUnitWriterConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            visibility_tested: Visibility::Global,
            visibility_used: Visibility::Global,
            filtering: true,
            max_plans_per_function: 500,
            max_tests_per_unit: 500,
            workers: 1,
            comment: "This file was automatically generated by crasher.".to_string(),
            writer: JUnitWriterConfig::default(),
        }
    }
}

/// Command line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub max_depth: Option<usize>,
    pub filtering: Option<bool>,
    pub max_plans_per_function: Option<u64>,
    pub workers: Option<usize>,
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// `path` when given, the defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply(&mut self, overrides: &CliOverrides) -> Result<()> {
        if let Some(depth) = overrides.max_depth {
            self.max_depth = depth;
        }
        if let Some(filtering) = overrides.filtering {
            self.filtering = filtering;
        }
        if let Some(limit) = overrides.max_plans_per_function {
            self.max_plans_per_function = limit;
        }
        if let Some(workers) = overrides.workers {
            self.workers = workers;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            bail!("max_depth must be at least 1");
        }
        if self.max_tests_per_unit == 0 {
            bail!("max_tests_per_unit must be at least 1");
        }
        if self.workers == 0 {
            bail!("workers must be at least 1");
        }
        if self.max_plans_per_function > MAX_SELECTED_PLANS {
            bail!("max_plans_per_function must be at most {MAX_SELECTED_PLANS}");
        }
        self.writer.validate()?;
        Ok(())
    }
}
