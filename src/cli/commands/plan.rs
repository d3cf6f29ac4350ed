//! plan command - Show direction and timing for one navigation

use crate::cli::Context;
use crate::core::types::{Direction, RoutePath};
use crate::engine::timing::needs_scroll;
use crate::ui::output;
use anyhow::{Context as _, Result};
use serde::Serialize;

/// What a navigation would do, without running it.
#[derive(Debug, Serialize)]
pub struct NavigationPlan {
    pub from: RoutePath,
    pub to: RoutePath,
    pub direction: Direction,
    /// False when `from == to`; the engine would ignore the call.
    pub accepted: bool,
    pub from_known: bool,
    pub to_known: bool,
    pub scrolls: bool,
    pub scroll_wait_ms: u64,
    pub settle_ms: u64,
    pub total_ms: u64,
}

/// Print the plan for navigating `from` -> `to`.
pub fn plan(ctx: &Context, from: &str, to: &str, scroll: f64, json: bool) -> Result<()> {
    let config = ctx.load_config()?;
    let from = RoutePath::new(from).context("Invalid 'from' route")?;
    let to = RoutePath::new(to).context("Invalid 'to' route")?;

    let table = config.route_table();
    let timing = config.timing();
    let accepted = from != to;

    let scroll_wait = timing.scroll_settle_delay(scroll).as_millis() as u64;
    let settle = timing.settle_delay().as_millis() as u64;
    let plan = NavigationPlan {
        direction: table.direction(&from, &to, config.unknown_route_policy()),
        from_known: table.contains(&from),
        to_known: table.contains(&to),
        accepted,
        scrolls: needs_scroll(scroll),
        scroll_wait_ms: scroll_wait,
        settle_ms: settle,
        total_ms: if accepted { scroll_wait + settle } else { 0 },
        from,
        to,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let v = ctx.verbosity();
    if !plan.accepted {
        output::print(
            format!("{} -> {}: already on this route, nothing to do", plan.from, plan.to),
            v,
        );
        return Ok(());
    }

    output::print(format!("from:      {}{}", plan.from, unknown_marker(plan.from_known)), v);
    output::print(format!("to:        {}{}", plan.to, unknown_marker(plan.to_known)), v);
    output::print(format!("direction: {}", output::format_direction(plan.direction)), v);
    if plan.scrolls {
        output::print(format!("scroll:    to top, wait {}ms", plan.scroll_wait_ms), v);
    } else {
        output::print(format!("scroll:    none, wait {}ms", plan.scroll_wait_ms), v);
    }
    output::print(format!("settle:    {}ms", plan.settle_ms), v);
    output::print(format!("locked:    {}ms", plan.total_ms), v);

    Ok(())
}

fn unknown_marker(known: bool) -> &'static str {
    if known {
        ""
    } else {
        " (not in route table)"
    }
}
