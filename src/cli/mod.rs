//! cli
//!
//! Command-line interface layer for Slideway.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and install logging
//! - Delegate to command handlers
//!
//! The CLI layer is thin. Navigation itself always runs through
//! [`crate::engine::NavigationMachine`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::core::config::{Config, ConfigLoadResult};
use crate::ui::output::{self, Verbosity};

/// Execution context for commands, derived from global flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Site directory for site-scoped config.
    pub site: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Load config for this invocation, printing any warnings.
    pub fn load_config(&self) -> Result<Config> {
        let ConfigLoadResult { config, warnings } =
            Config::load(self.site.as_deref()).context("Failed to load config")?;

        for w in &warnings {
            output::warn(
                format!("{} ({})", w.message, w.path.display()),
                self.verbosity(),
            );
        }
        if let Some(path) = config.global_config_loaded_from() {
            output::debug(format!("global config: {}", path.display()), self.verbosity());
        }
        if let Some(path) = config.site_config_loaded_from() {
            output::debug(format!("site config: {}", path.display()), self.verbosity());
        }

        Ok(config)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        site: cli.site.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };
    crate::logging::init(ctx.verbosity());

    commands::dispatch(cli.command, &ctx)
}
