//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration through the [`Context`]
//! 2. Builds whatever engine pieces it needs
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! `simulate` drives the async engine. Its handler builds a Tokio runtime
//! and blocks on the async implementation, keeping dispatch synchronous.

mod completion;
mod config_cmd;
mod plan;
mod routes;
mod simulate;

pub use completion::completion;
pub use config_cmd::{init as config_init, path as config_path, show as config_show};
pub use plan::plan;
pub use routes::routes;
pub use simulate::{simulate, SimulateArgs};

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Routes { json } => routes::routes(ctx, json),
        Command::Plan {
            from,
            to,
            scroll,
            json,
        } => plan::plan(ctx, &from, &to, scroll, json),
        Command::Simulate {
            paths,
            from,
            scroll,
            gap_ms,
            transition_ms,
            strict,
            json,
        } => simulate::simulate(
            ctx,
            SimulateArgs {
                paths,
                from,
                scroll,
                gap_ms,
                transition_ms,
                strict,
                json,
            },
        ),
        Command::Config { action } => match action {
            ConfigAction::Path => config_cmd::path(ctx),
            ConfigAction::Show { json } => config_cmd::show(ctx, json),
            ConfigAction::Init { global, force } => config_cmd::init(ctx, global, force),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
