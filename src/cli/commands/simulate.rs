//! cli::commands::simulate
//!
//! Run a sequence of navigations through the engine against a
//! [`ConsoleHost`] and print the session journal.
//!
//! # Example
//!
//! ```bash
//! # Walk through two pages with time to settle in between
//! slideway simulate /saudade /amped-up --gap-ms 800
//!
//! # Rapid double request: the second one is ignored
//! slideway simulate /saudade /amped-up
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::cli::Context;
use crate::core::config::Config;
use crate::core::types::RoutePath;
use crate::engine::{
    CommitOutcome, CompletionReport, IgnoreReason, JournalEntry, JournalEvent, MachineConfig,
    NavigateOutcome, NavigationMachine, NavigationState,
};
use crate::host::ConsoleHost;
use crate::present::{spawn_presenter, Composition, MotionMode};
use crate::ui::output;
use anyhow::{Context as _, Result};
use serde::Serialize;

/// Options for a simulation run.
#[derive(Debug, Clone)]
pub struct SimulateArgs {
    pub paths: Vec<String>,
    pub from: Option<String>,
    pub scroll: f64,
    pub gap_ms: u64,
    pub transition_ms: Option<u64>,
    pub strict: bool,
    pub json: bool,
}

/// Result of one requested navigation.
#[derive(Debug, Serialize)]
pub struct RequestResult {
    pub to: RoutePath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<IgnoreReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<CompletionReport>,
}

/// Everything a simulation produced.
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub requests: Vec<RequestResult>,
    pub journal: Vec<JournalEntry>,
    pub final_state: NavigationState,
    pub composition: Composition,
}

/// Run the simulate command.
///
/// This is a synchronous wrapper that uses tokio to run the async implementation.
pub fn simulate(ctx: &Context, args: SimulateArgs) -> Result<()> {
    let config = ctx.load_config()?;
    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(simulate_async(&config, &args))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let v = ctx.verbosity();
    for entry in &report.journal {
        output::print(
            format!("{:>6}  {}", output::format_millis(entry.at), describe(&entry.event)),
            v,
        );
    }

    let ignored = report.requests.iter().filter(|r| r.ignored.is_some()).count();
    let failed = report
        .requests
        .iter()
        .filter(|r| matches!(r.report.as_ref().map(|r| &r.outcome), Some(CommitOutcome::Failed { .. })))
        .count();
    output::success(
        format!(
            "final route: {} ({} requested, {} ignored, {} failed)",
            report.final_state.current_path,
            report.requests.len(),
            ignored,
            failed
        ),
        v,
    );

    Ok(())
}

/// Drive the engine through `args.paths` and collect the results.
pub async fn simulate_async(config: &Config, args: &SimulateArgs) -> Result<SimulationReport> {
    let paths = args
        .paths
        .iter()
        .map(|p| RoutePath::new(p.as_str()).with_context(|| format!("Invalid route '{}'", p)))
        .collect::<Result<Vec<_>>>()?;

    let mut machine_config = MachineConfig::from(config);
    // Room for every event of every request so the printed journal is whole.
    machine_config.journal_capacity = machine_config
        .journal_capacity
        .max(paths.len().saturating_mul(8) + 1);
    if let Some(ms) = args.transition_ms {
        machine_config.timing.transition_ms = ms;
    }
    if let Some(from) = &args.from {
        machine_config.initial_path =
            Some(RoutePath::new(from.as_str()).context("Invalid '--from' route")?);
    }

    let host = Arc::new(ConsoleHost::new(machine_config.routes.clone(), args.strict));
    let machine = NavigationMachine::new(machine_config, host.clone(), host.clone());

    let mode = if config.reduced_motion() {
        MotionMode::Reduced
    } else {
        MotionMode::Animated
    };
    let presenter = spawn_presenter(machine.reader(), mode, machine.timing().transition_duration());

    let mut requests = Vec::with_capacity(paths.len());
    let mut tickets = Vec::new();
    for (i, path) in paths.into_iter().enumerate() {
        if i > 0 && args.gap_ms > 0 {
            tokio::time::sleep(Duration::from_millis(args.gap_ms)).await;
        }
        host.set_scroll_offset(args.scroll);

        let ignored = match machine.navigate_to(path.clone()) {
            NavigateOutcome::Started(ticket) => {
                tickets.push((i, ticket));
                None
            }
            NavigateOutcome::Ignored(reason) => Some(reason),
        };
        requests.push(RequestResult {
            to: path,
            ignored,
            report: None,
        });
    }

    for (i, ticket) in tickets {
        requests[i].report = Some(ticket.finished().await);
    }

    let final_state = machine.snapshot();
    let journal = machine.journal().entries();
    drop(machine);
    let composition = presenter.join().await;

    Ok(SimulationReport {
        requests,
        journal,
        final_state,
        composition,
    })
}

fn describe(event: &JournalEvent) -> String {
    match event {
        JournalEvent::Accepted {
            from,
            to,
            direction,
        } => format!(
            "accepted {} -> {} ({})",
            from,
            to,
            output::format_direction(*direction)
        ),
        JournalEvent::Ignored { to, reason } => format!("ignored {} ({})", to, reason),
        JournalEvent::PhaseEntered { phase } => format!("phase {}", phase),
        JournalEvent::ScrollRequested { offset, wait_ms } => {
            format!("scroll to top from {} (wait {}ms)", offset, wait_ms)
        }
        JournalEvent::Committed { path } => format!("committed {}", path),
        JournalEvent::CommitFailed { path, error } => format!("commit failed {}: {}", path, error),
        JournalEvent::RouteNotified { path, direction } => {
            format!("route changed to {} ({})", path, direction)
        }
    }
}
