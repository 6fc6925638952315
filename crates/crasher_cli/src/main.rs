// crasher CLI entry point
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crasher_cli::config::CliOverrides;
use crasher_cli::{Cli, Commands, get_version, load_catalog, log_filter, pipeline, report, resolve_config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(cli.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Generate {
            catalog,
            classes,
            output,
            config,
            depth,
            no_filtering,
            max_plans,
            workers,
            json,
        }) => {
            let overrides = CliOverrides {
                max_depth: depth,
                filtering: no_filtering.then_some(false),
                max_plans_per_function: max_plans,
                workers,
            };
            let config = resolve_config(config.as_deref(), &overrides)?;
            let catalog = load_catalog(&catalog)?;
            let classes = pipeline::resolve_classes(&catalog, &classes)?;
            let generated = pipeline::generate(&catalog, &classes, &config, &output)?;

            if json {
                println!("{}", report::render_json(&generated)?);
            } else {
                println!("{}", report::render_summary(&generated));
            }
        }
        Some(Commands::Inspect {
            catalog,
            classes,
            config,
            depth,
            json,
        }) => {
            let overrides = CliOverrides {
                max_depth: depth,
                ..CliOverrides::default()
            };
            let config = resolve_config(config.as_deref(), &overrides)?;
            let catalog = load_catalog(&catalog)?;
            let classes = pipeline::resolve_classes(&catalog, &classes)?;
            let inspected = pipeline::inspect(&catalog, &classes, &config)?;

            if json {
                println!("{}", report::render_json(&inspected)?);
            } else {
                println!("{}", report::render_classes(&inspected));
            }
        }
        Some(Commands::Version) => {
            println!("{}", get_version());
        }
        None => {
            println!("{}", get_version());
            println!("Run 'crasher --help' for usage.");
        }
    }

    Ok(())
}
