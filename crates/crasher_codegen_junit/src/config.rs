use crate::error::CodeGenError;
use serde::{Deserialize, Serialize};

/// Configuration options that drive test source rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JUnitWriterConfig {
    /// Indentation string used for one nesting level.
    pub indent: String,
    /// Line terminator written after every line.
    pub newline: String,
    /// Superclass of test cases rendered without failure classification.
    pub base_class: String,
    /// Superclass of test cases whose methods forward failures to
    /// `dispatchException`.
    pub filtering_base_class: String,
    /// Statement run at the start of `setUp()` in filtering test cases to
    /// reset static state of loaded classes.
    pub reset_hook: Option<String>,
}

impl Default for JUnitWriterConfig {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            newline: "\n".to_string(),
            base_class: "junit.framework.TestCase".to_string(),
            filtering_base_class: "edu.gatech.cc.junit.FilteringTestCase".to_string(),
            reset_hook: Some("edu.gatech.cc.junit.reinit.ClassRegistry.resetClasses();".to_string()),
        }
    }
}

impl JUnitWriterConfig {
    pub fn validate(&self) -> Result<(), CodeGenError> {
        if !self.indent.chars().all(|ch| ch == ' ' || ch == '\t') {
            return Err(CodeGenError::InvalidConfig {
                message: format!("indent {:?} must be spaces or tabs", self.indent),
            });
        }
        if self.newline != "\n" && self.newline != "\r\n" {
            return Err(CodeGenError::InvalidConfig {
                message: format!("newline {:?} must be \\n or \\r\\n", self.newline),
            });
        }
        for (field, value) in [
            ("base_class", &self.base_class),
            ("filtering_base_class", &self.filtering_base_class),
        ] {
            if value.trim().is_empty() {
                return Err(CodeGenError::InvalidConfig {
                    message: format!("{field} must not be empty"),
                });
            }
        }
        Ok(())
    }
}
