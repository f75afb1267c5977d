// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugforge - plugin descriptor extraction, builder synthesis and registry
//! assembly.
//!
//! This is the binary entry point.

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use plugforge_config::PlugforgeConfig;

/// Plugforge - turn plugin descriptors into builders and a validated registry.
#[derive(Parser, Debug)]
#[command(name = "plugforge", version, about, long_about = None)]
struct Cli {
    /// Configuration file, used instead of the XDG lookup.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level, overriding `log.level`.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a builder artifact for every descriptor.
    Generate {
        /// Base identifier to leave alone (repeatable).
        #[arg(long, value_name = "NAME")]
        skip: Vec<String>,
        /// Synthesize every callback instead of extracting bodies.
        #[arg(long)]
        simple: bool,
    },
    /// Assemble the aggregate registry from the builders on disk.
    Assemble,
    /// Generate every builder, then assemble the registry.
    Run {
        /// Base identifier to leave alone (repeatable).
        #[arg(long, value_name = "NAME")]
        skip: Vec<String>,
        /// Synthesize every callback instead of extracting bodies.
        #[arg(long)]
        simple: bool,
    },
    /// Load and validate the registry, reporting excluded plugins.
    Check {
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Search the validated registry.
    Search {
        /// Case-insensitive text matched against name, display name,
        /// description and category.
        query: String,
    },
    /// Thread the context `fsAdapter` through filesystem helper calls in every source file.
    MigrateFsAdapter,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => plugforge_config::load_and_validate_path(path),
        None => plugforge_config::load_and_validate(),
    };
    let config: PlugforgeConfig = match loaded {
        Ok(config) => config,
        Err(errors) => {
            plugforge_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    let log_level = cli.log_level.as_deref().unwrap_or(&config.log.level);
    init_tracing(log_level);
    tracing::debug!(plugins_dir = %config.pipeline.plugins_dir.display(), "config loaded");

    let printer = output::Printer::new(cli.plain);
    let result = match cli.command {
        Commands::Generate { skip, simple } => commands::generate(&config, &printer, skip, simple),
        Commands::Assemble => commands::assemble(&config, &printer),
        Commands::Run { skip, simple } => commands::run(&config, &printer, skip, simple),
        Commands::Check { json } => commands::check(&config, &printer, json),
        Commands::Search { query } => commands::search(&config, &printer, &query),
        Commands::MigrateFsAdapter => commands::migrate_fs_adapter(&config, &printer),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("plugforge: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("plugforge={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
