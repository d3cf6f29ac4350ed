//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$SLIDEWAY_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/slideway/config.toml`
//! 3. `~/.slideway/config.toml` (canonical write location)
//!
//! # Site Config
//!
//! Located at `<site>/slideway.toml` (canonical).
//!
//! # Validation
//!
//! Config values are validated after parsing: routes must form a valid
//! route table, the unknown route policy must be a known name, and the
//! scroll factor must be a finite non-negative number.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::routes::{RouteTable, UnknownRoutePolicy};

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// unknown_route_policy = "forward"
///
/// [timing]
/// transition_ms = 600
/// settle_padding_ms = 100
///
/// [motion]
/// reduced_motion = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Direction policy for routes missing from the table
    pub unknown_route_policy: Option<String>,

    /// Timing overrides
    pub timing: Option<TimingConfig>,

    /// Motion preferences
    pub motion: Option<MotionConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_policy(self.unknown_route_policy.as_deref())?;
        if let Some(timing) = &self.timing {
            timing.validate()?;
        }
        Ok(())
    }
}

/// Site configuration.
///
/// # Example
///
/// ```toml
/// routes = ["/", "/saudade", "/amped-up", "/about", "/contact"]
/// unknown_route_policy = "after-known"
///
/// [timing]
/// scroll_cap_ms = 300
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Ordered route table
    pub routes: Option<Vec<String>>,

    /// Direction policy for routes missing from the table
    pub unknown_route_policy: Option<String>,

    /// Timing overrides
    pub timing: Option<TimingConfig>,

    /// Motion preferences
    pub motion: Option<MotionConfig>,
}

impl SiteConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(routes) = &self.routes {
            RouteTable::from_strs(routes).map_err(|e| {
                ConfigError::InvalidValue(format!("invalid route table: {}", e))
            })?;
        }
        validate_policy(self.unknown_route_policy.as_deref())?;
        if let Some(timing) = &self.timing {
            timing.validate()?;
        }
        Ok(())
    }
}

/// Timing overrides, all in milliseconds except the scroll factor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Slide animation duration
    pub transition_ms: Option<u64>,

    /// Extra wait after the animation before the lock is released
    pub settle_padding_ms: Option<u64>,

    /// Milliseconds of wait per pixel of scroll offset
    pub scroll_factor: Option<f64>,

    /// Upper bound on the scroll-settle wait
    pub scroll_cap_ms: Option<u64>,

    /// Wait used when the page is already at the top
    pub min_delay_ms: Option<u64>,
}

impl TimingConfig {
    /// Validate the timing values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(factor) = self.scroll_factor {
            if !factor.is_finite() || factor < 0.0 {
                return Err(ConfigError::InvalidValue(format!(
                    "scroll_factor must be a finite non-negative number, got {}",
                    factor
                )));
            }
        }
        Ok(())
    }
}

/// Motion preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Skip slide animations and swap views immediately
    pub reduced_motion: Option<bool>,
}

fn validate_policy(policy: Option<&str>) -> Result<(), ConfigError> {
    if let Some(policy) = policy {
        policy
            .parse::<UnknownRoutePolicy>()
            .map_err(ConfigError::InvalidValue)?;
    }
    Ok(())
}
