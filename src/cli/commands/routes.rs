//! routes command - List the route table

use crate::cli::Context;
use crate::ui::output;
use anyhow::Result;

/// Print the route table, one route per line with its position.
pub fn routes(ctx: &Context, json: bool) -> Result<()> {
    let config = ctx.load_config()?;
    let table = config.route_table();

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    let lines: Vec<String> = table
        .iter()
        .enumerate()
        .map(|(i, route)| format!("{:>3}  {}", i, route))
        .collect();
    output::print(output::format_list(&lines, ""), ctx.verbosity());
    output::debug(
        format!("unknown routes: {}", config.unknown_route_policy()),
        ctx.verbosity(),
    );

    Ok(())
}
