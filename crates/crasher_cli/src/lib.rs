// crasher_cli - CLI functionality (library interface for testing)
use anyhow::{Context, Result};
use clap::Parser;
use crasher_types::TypeCatalog;
use std::path::{Path, PathBuf};

pub mod config;
pub mod pipeline;
pub mod report;

use config::{CliOverrides, GeneratorConfig};

#[derive(Parser)]
#[command(name = "crasher")]
#[command(about = "Generate JUnit crash tests from a catalogue of Java types")]
pub struct Cli {
    /// Log progress (repeat for more detail); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate test sources for classes of a catalogue
    Generate {
        /// TOML type catalogue
        catalog: PathBuf,
        /// Binary names of the classes to test (default: every catalogued type)
        classes: Vec<String>,
        /// Output directory for generated .java files
        #[arg(short, long, default_value = "./crasher-out")]
        output: PathBuf,
        /// Generator configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Maximum nesting of operation calls per plan
        #[arg(short, long)]
        depth: Option<usize>,
        /// Emit plain test cases without failure classification
        #[arg(long)]
        no_filtering: bool,
        /// Plans kept per tested operation (0 keeps all)
        #[arg(long)]
        max_plans: Option<u64>,
        /// Threads used to build blocks
        #[arg(short, long)]
        workers: Option<usize>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report plan-space sizes without writing anything
    Inspect {
        /// TOML type catalogue
        catalog: PathBuf,
        /// Binary names of the classes to inspect (default: every catalogued type)
        classes: Vec<String>,
        /// Generator configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Maximum nesting of operation calls per plan
        #[arg(short, long)]
        depth: Option<usize>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show version information
    Version,
}

pub fn load_catalog(path: &Path) -> Result<TypeCatalog> {
    TypeCatalog::load(path).with_context(|| format!("failed to load catalogue {}", path.display()))
}

/// Configuration file values with command line overrides applied.
pub fn resolve_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<GeneratorConfig> {
    let mut config = GeneratorConfig::load_or_default(path)?;
    config.apply(overrides)?;
    Ok(config)
}

/// Default log filter for a `-v` count.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn get_version() -> String {
    format!(
        "crasher {} - JUnit crash test generator",
        env!("CARGO_PKG_VERSION")
    )
}
