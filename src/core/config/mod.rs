//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Slideway has two configuration scopes:
//! - **Global**: User-level settings (timing, motion, unknown route policy)
//! - **Site**: Per-site settings, including the route table
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Site config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$SLIDEWAY_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/slideway/config.toml`
//! 3. `~/.slideway/config.toml` (canonical write location)
//!
//! # Site Config Locations
//!
//! Searched in order:
//! 1. `<site>/slideway.toml` (canonical)
//! 2. `<site>/.slideway/site.toml` (compatibility, warns)
//!
//! # Example
//!
//! ```no_run
//! use slideway::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/site"))).unwrap();
//! let config = result.config;
//!
//! println!("Routes: {}", config.route_table().len());
//! println!("Settle: {:?}", config.timing().settle_delay());
//! println!("Reduced motion: {}", config.reduced_motion());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, MotionConfig, SiteConfig, TimingConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::routes::{RouteTable, UnknownRoutePolicy};
use crate::engine::timing::TimingPolicy;

/// File name of the canonical site config.
pub const SITE_CONFIG_FILE: &str = "slideway.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: site config overrides global
/// config, which overrides built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Site configuration (if a site directory was given)
    pub site: Option<SiteConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the site config file (if loaded)
    site_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `site_dir` is provided, also loads the site config from it.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(site_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = Self::load_global()?;

        let (site, site_path) = if let Some(dir) = site_dir {
            Self::load_site(dir, &mut warnings)?
        } else {
            (None, None)
        };

        global.validate()?;
        if let Some(ref s) = site {
            s.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                site,
                global_path,
                site_path,
            },
            warnings,
        })
    }

    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        if let Ok(path) = std::env::var("SLIDEWAY_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("slideway/config.toml");
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".slideway/config.toml");
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    fn load_site(
        site_dir: &Path,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<SiteConfig>, Option<PathBuf>), ConfigError> {
        let canonical = Self::site_config_path(site_dir);
        if canonical.exists() {
            let config = Self::read_toml(&canonical)?;
            return Ok((Some(config), Some(canonical)));
        }

        let compat = site_dir.join(".slideway/site.toml");
        if compat.exists() {
            warnings.push(ConfigWarning {
                message: format!(
                    "Using deprecated config location. Please move to '{}'",
                    canonical.display()
                ),
                path: compat.clone(),
            });
            let config = Self::read_toml(&compat)?;
            return Ok((Some(config), Some(compat)));
        }

        Ok((None, None))
    }

    fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path global config is written to.
    ///
    /// Returns `$SLIDEWAY_CONFIG` if set, otherwise `~/.slideway/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var("SLIDEWAY_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".slideway/config.toml"))
    }

    /// Get the canonical path for site config.
    pub fn site_config_path(site_dir: &Path) -> PathBuf {
        site_dir.join(SITE_CONFIG_FILE)
    }

    /// Write global config atomically.
    pub fn write_global(config: &GlobalConfig) -> Result<PathBuf, ConfigError> {
        let path = Self::global_config_path()?;
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write site config atomically.
    ///
    /// Creates parent directories if needed.
    pub fn write_site(site_dir: &Path, config: &SiteConfig) -> Result<PathBuf, ConfigError> {
        let path = Self::site_config_path(site_dir);
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write a config file atomically (temp file, then rename).
    fn write_config_atomic<T: serde::Serialize>(
        path: &Path,
        config: &T,
    ) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the route table.
    ///
    /// Defaults to [`crate::core::routes::DEFAULT_ROUTES`] if the site does
    /// not configure one.
    pub fn route_table(&self) -> RouteTable {
        self.site
            .as_ref()
            .and_then(|s| s.routes.as_ref())
            .and_then(|routes| RouteTable::from_strs(routes).ok())
            .unwrap_or_default()
    }

    /// Get the unknown route policy.
    ///
    /// Defaults to `forward` if not configured.
    pub fn unknown_route_policy(&self) -> UnknownRoutePolicy {
        self.site
            .as_ref()
            .and_then(|s| s.unknown_route_policy.as_deref())
            .or(self.global.unknown_route_policy.as_deref())
            .and_then(|p| p.parse().ok())
            .unwrap_or_default()
    }

    /// Get the timing policy, merging site over global over defaults
    /// field by field.
    pub fn timing(&self) -> TimingPolicy {
        let site = self.site.as_ref().and_then(|s| s.timing.as_ref());
        let global = self.global.timing.as_ref();
        let pick = |f: fn(&TimingConfig) -> Option<u64>, default: u64| {
            site.and_then(f).or(global.and_then(f)).unwrap_or(default)
        };

        TimingPolicy {
            transition_ms: pick(|t| t.transition_ms, TimingPolicy::DEFAULT_TRANSITION_MS),
            settle_padding_ms: pick(
                |t| t.settle_padding_ms,
                TimingPolicy::DEFAULT_SETTLE_PADDING_MS,
            ),
            scroll_factor: site
                .and_then(|t| t.scroll_factor)
                .or(global.and_then(|t| t.scroll_factor))
                .unwrap_or(TimingPolicy::DEFAULT_SCROLL_FACTOR),
            scroll_cap_ms: pick(|t| t.scroll_cap_ms, TimingPolicy::DEFAULT_SCROLL_CAP_MS),
            min_delay_ms: pick(|t| t.min_delay_ms, TimingPolicy::DEFAULT_MIN_DELAY_MS),
        }
    }

    /// Check if reduced motion is requested.
    ///
    /// Defaults to `false` if not configured.
    pub fn reduced_motion(&self) -> bool {
        self.site
            .as_ref()
            .and_then(|s| s.motion.as_ref())
            .and_then(|m| m.reduced_motion)
            .or(self
                .global
                .motion
                .as_ref()
                .and_then(|m| m.reduced_motion))
            .unwrap_or(false)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded site config file.
    pub fn site_config_loaded_from(&self) -> Option<&Path> {
        self.site_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RoutePath;
    use tempfile::TempDir;

    #[test]
    fn load_without_site_uses_default_routes() {
        let result = Config::load(None).unwrap();
        let config = result.config;

        assert!(config.site.is_none());
        assert_eq!(config.route_table(), RouteTable::default());
    }

    #[test]
    fn load_global_from_env() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");

        fs::write(
            &config_path,
            r#"
            unknown_route_policy = "after-known"
            "#,
        )
        .unwrap();

        std::env::set_var("SLIDEWAY_CONFIG", config_path.to_str().unwrap());

        let result = Config::load(None).unwrap();
        let config = result.config;

        assert_eq!(config.unknown_route_policy(), UnknownRoutePolicy::AfterKnown);
        assert_eq!(config.global_config_loaded_from(), Some(config_path.as_path()));

        std::env::remove_var("SLIDEWAY_CONFIG");
    }

    #[test]
    fn load_site_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(SITE_CONFIG_FILE),
            r#"
            routes = ["/", "/work", "/about"]

            [timing]
            transition_ms = 300
            "#,
        )
        .unwrap();

        let result = Config::load(Some(temp.path())).unwrap();
        let config = result.config;

        let table = config.route_table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.index_of(&RoutePath::new("/about").unwrap()), Some(2));
        assert_eq!(config.timing().transition_ms, 300);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn load_site_compat_warns() {
        let temp = TempDir::new().unwrap();
        let compat_dir = temp.path().join(".slideway");
        fs::create_dir_all(&compat_dir).unwrap();
        fs::write(compat_dir.join("site.toml"), "routes = [\"/\", \"/cv\"]").unwrap();

        let result = Config::load(Some(temp.path())).unwrap();

        assert_eq!(result.config.route_table().len(), 2);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("deprecated"));
    }

    #[test]
    fn write_site_config_atomic() {
        let temp = TempDir::new().unwrap();

        let config = SiteConfig {
            routes: Some(vec!["/".to_string(), "/contact".to_string()]),
            ..Default::default()
        };

        let path = Config::write_site(temp.path(), &config).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());
        let loaded = Config::load(Some(temp.path())).unwrap();
        assert_eq!(loaded.config.route_table().len(), 2);
    }

    #[test]
    fn duplicate_routes_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(SITE_CONFIG_FILE),
            "routes = [\"/\", \"/about\", \"/\"]",
        )
        .unwrap();

        let result = Config::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(SITE_CONFIG_FILE),
            r#"
            routes = ["/"]
            page_transition = "fade"
            "#,
        )
        .unwrap();

        let result = Config::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn precedence_site_overrides_global() {
        let config = Config {
            global: GlobalConfig {
                unknown_route_policy: Some("after-known".to_string()),
                timing: Some(TimingConfig {
                    transition_ms: Some(800),
                    scroll_cap_ms: Some(250),
                    ..Default::default()
                }),
                motion: Some(MotionConfig {
                    reduced_motion: Some(true),
                }),
            },
            site: Some(SiteConfig {
                unknown_route_policy: Some("forward".to_string()),
                timing: Some(TimingConfig {
                    transition_ms: Some(500),
                    ..Default::default()
                }),
                motion: Some(MotionConfig {
                    reduced_motion: Some(false),
                }),
                ..Default::default()
            }),
            global_path: None,
            site_path: None,
        };

        assert_eq!(config.unknown_route_policy(), UnknownRoutePolicy::Forward);
        let timing = config.timing();
        assert_eq!(timing.transition_ms, 500);
        assert_eq!(timing.scroll_cap_ms, 250);
        assert_eq!(timing.min_delay_ms, TimingPolicy::DEFAULT_MIN_DELAY_MS);
        assert!(!config.reduced_motion());
    }

    #[test]
    fn defaults_when_nothing_configured() {
        let config = Config::default();
        assert_eq!(config.timing(), TimingPolicy::default());
        assert_eq!(config.unknown_route_policy(), UnknownRoutePolicy::Forward);
        assert!(!config.reduced_motion());
    }
}
