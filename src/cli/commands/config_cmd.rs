//! config command - Show config locations, effective settings, or write a starter file

use std::path::PathBuf;

use crate::cli::Context;
use crate::core::config::schema::{GlobalConfig, MotionConfig, SiteConfig, TimingConfig};
use crate::core::config::Config;
use crate::core::routes::{RouteTable, UnknownRoutePolicy, DEFAULT_ROUTES};
use crate::engine::TimingPolicy;
use crate::ui::output;
use anyhow::{bail, Context as _, Result};
use serde::Serialize;

/// Settings after merging site, global, and defaults.
#[derive(Debug, Serialize)]
struct EffectiveConfig {
    routes: RouteTable,
    unknown_route_policy: UnknownRoutePolicy,
    timing: TimingPolicy,
    reduced_motion: bool,
    global_config: Option<PathBuf>,
    site_config: Option<PathBuf>,
}

/// Print where config is read from and written to.
pub fn path(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let v = ctx.verbosity();

    match config.global_config_loaded_from() {
        Some(p) => output::print(format!("global: {} (loaded)", p.display()), v),
        None => {
            let p = Config::global_config_path().context("Failed to locate global config")?;
            output::print(format!("global: {} (not found)", p.display()), v);
        }
    }

    if let Some(site) = &ctx.site {
        match config.site_config_loaded_from() {
            Some(p) => output::print(format!("site:   {} (loaded)", p.display()), v),
            None => output::print(
                format!("site:   {} (not found)", Config::site_config_path(site).display()),
                v,
            ),
        }
    }

    Ok(())
}

/// Print the effective configuration.
pub fn show(ctx: &Context, json: bool) -> Result<()> {
    let config = ctx.load_config()?;
    let effective = EffectiveConfig {
        routes: config.route_table(),
        unknown_route_policy: config.unknown_route_policy(),
        timing: config.timing(),
        reduced_motion: config.reduced_motion(),
        global_config: config.global_config_loaded_from().map(PathBuf::from),
        site_config: config.site_config_loaded_from().map(PathBuf::from),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&effective)?);
        return Ok(());
    }

    let v = ctx.verbosity();
    output::print("routes:", v);
    let routes: Vec<_> = effective.routes.iter().collect();
    output::print(output::format_list(&routes, "  "), v);
    output::print(
        format!("unknown_route_policy: {}", effective.unknown_route_policy),
        v,
    );
    let t = &effective.timing;
    output::print(format!("transition_ms:     {}", t.transition_ms), v);
    output::print(format!("settle_padding_ms: {}", t.settle_padding_ms), v);
    output::print(format!("scroll_factor:     {}", t.scroll_factor), v);
    output::print(format!("scroll_cap_ms:     {}", t.scroll_cap_ms), v);
    output::print(format!("min_delay_ms:      {}", t.min_delay_ms), v);
    output::print(format!("reduced_motion:    {}", effective.reduced_motion), v);

    Ok(())
}

/// Write a starter config file.
///
/// Writes the site config when `--site` is given, otherwise the global
/// config. Refuses to overwrite an existing file unless `force` is set.
pub fn init(ctx: &Context, global: bool, force: bool) -> Result<()> {
    let timing = TimingConfig {
        transition_ms: Some(TimingPolicy::DEFAULT_TRANSITION_MS),
        settle_padding_ms: Some(TimingPolicy::DEFAULT_SETTLE_PADDING_MS),
        scroll_factor: Some(TimingPolicy::DEFAULT_SCROLL_FACTOR),
        scroll_cap_ms: Some(TimingPolicy::DEFAULT_SCROLL_CAP_MS),
        min_delay_ms: Some(TimingPolicy::DEFAULT_MIN_DELAY_MS),
    };
    let motion = MotionConfig {
        reduced_motion: Some(false),
    };

    let written = match (&ctx.site, global) {
        (Some(site), false) => {
            let target = Config::site_config_path(site);
            refuse_overwrite(&target, force)?;
            let config = SiteConfig {
                routes: Some(DEFAULT_ROUTES.iter().map(|r| r.to_string()).collect()),
                unknown_route_policy: Some(UnknownRoutePolicy::default().to_string()),
                timing: Some(timing),
                motion: Some(motion),
            };
            Config::write_site(site, &config).context("Failed to write site config")?
        }
        _ => {
            let target = Config::global_config_path().context("Failed to locate global config")?;
            refuse_overwrite(&target, force)?;
            let config = GlobalConfig {
                unknown_route_policy: Some(UnknownRoutePolicy::default().to_string()),
                timing: Some(timing),
                motion: Some(motion),
            };
            Config::write_global(&config).context("Failed to write global config")?
        }
    };

    output::success(format!("Wrote {}", written.display()), ctx.verbosity());
    Ok(())
}

fn refuse_overwrite(target: &std::path::Path, force: bool) -> Result<()> {
    if target.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            target.display()
        );
    }
    Ok(())
}
