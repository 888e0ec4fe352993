// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TermDash - a terminal dashboard built from widget and page plugins.
//!
//! This is the binary entry point. It loads configuration, initialises
//! tracing, and dispatches plugin inspection subcommands.

mod plugins;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// TermDash - a terminal dashboard built from widget and page plugins.
#[derive(Parser, Debug)]
#[command(name = "termdash", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect discovered plugins.
    Plugins {
        #[command(subcommand)]
        action: PluginsAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum PluginsAction {
    /// List discovered plugins and their configured state.
    List,
    /// Load every enabled plugin and report failures.
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => termdash_config::load_and_validate_path(path),
        None => termdash_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            termdash_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.app.normalized_log_level());
    tracing::debug!(app = %config.app.name, "configuration loaded");

    match cli.command {
        Some(Commands::Plugins { action }) => {
            let use_color = plugins::use_color(cli.plain);
            match action {
                PluginsAction::List => plugins::run_list(&config.tree, use_color),
                PluginsAction::Check => plugins::run_check(&config.tree, use_color),
            }
        }
        None => {
            println!("termdash: use --help for available commands");
            ExitCode::SUCCESS
        }
    }
}

/// Initialize the tracing subscriber with an env filter.
///
/// `RUST_LOG` wins; otherwise `app.log_level` applies to TermDash crates.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Filter used when `RUST_LOG` is unset.
fn default_directives(log_level: &str) -> String {
    format!("termdash={log_level},warn")
}
