//! Tenor CLI - Command-line interface for bond duration analytics.
//!
//! # Usage
//!
//! ```bash
//! # Duration and convexity of a 10-year 5% par bond
//! tenor analyze --coupon 5.0 --years 10 --yield 5.0
//!
//! # Re-price after a 100bp rise in yield
//! tenor shock --coupon 5.0 --years 10 --bps 100
//!
//! # Price-yield curve as CSV
//! tenor curve --coupon 5.0 --years 10 --steps 20 --format csv
//!
//! # Durations along a treasury curve
//! tenor treasury curve.csv
//! ```

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use tenor_analytics::engine::DurationEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};
use commands::Context;
use settings::{config_path, Settings};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::Notice::Error.print(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config_path = config_path(cli.config.as_deref())?;
    let (settings, engine) = match &cli.command {
        // `tenor config` must still work on a file it can repair
        Commands::Config(args) => {
            let settings = if args.command.reads_settings() {
                Settings::load_unchecked(&config_path)
                    .with_context(|| format!("failed to load {}", config_path.display()))?
            } else {
                Settings::default()
            };
            if let Err(e) = settings.validate() {
                output::Notice::Warning.print(&format!(
                    "{e}; fix it with `tenor config set` or `reset`"
                ));
            }
            (settings, DurationEngine::default())
        }
        _ => {
            let settings = Settings::load(&config_path)
                .with_context(|| format!("failed to load {}", config_path.display()))?;
            let engine = DurationEngine::new(settings.engine.clone())
                .context("invalid engine settings")?;
            (settings, engine)
        }
    };

    if !settings.output.colors {
        colored::control::set_override(false);
    }

    let ctx = Context {
        format: cli.format.unwrap_or(settings.output.format),
        quiet: cli.quiet,
        settings,
        config_path,
        engine,
    };

    tracing::debug!(format = %ctx.format, config = %ctx.config_path.display(), "starting");

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &ctx),
        Commands::Shock(args) => commands::shock::execute(args, &ctx),
        Commands::Curve(args) => commands::curve::execute(args, &ctx),
        Commands::Sensitivity(args) => commands::sensitivity::execute(args, &ctx),
        Commands::Compare(args) => commands::compare::execute(args, &ctx),
        Commands::Portfolio(args) => commands::portfolio::execute(args, &ctx),
        Commands::Gap(args) => commands::gap::execute(args, &ctx),
        Commands::Immunize(args) => commands::immunize::execute(args, &ctx),
        Commands::Treasury(args) => commands::treasury::execute(args, &ctx),
        Commands::Config(args) => commands::config::execute(args, &ctx),
    }
}
