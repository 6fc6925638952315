// crasher_codegen_junit - JUnit 3 test case generation from call-plan blocks
mod builder;
mod config;
mod error;
mod suite;
mod unit;

pub use builder::{JavaSourceBuilder, TestSourceFile};
pub use config::JUnitWriterConfig;
pub use error::CodeGenError;
pub use suite::{SUITE_NAME, avoid_taken_names, render_suite, split_into_units};
pub use unit::{TestCaseUnit, block_text, render_test_unit};
