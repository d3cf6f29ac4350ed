//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`RoutePath`] - Validated route identifier (URL path)
//! - [`Direction`] - Signed slide direction between two routes
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so the navigation engine never compares
//! malformed paths.
//!
//! # Examples
//!
//! ```
//! use slideway::core::types::{Direction, RoutePath};
//!
//! let about = RoutePath::new("/about").unwrap();
//! assert_eq!(about.as_str(), "/about");
//!
//! assert!(RoutePath::new("about").is_err());
//! assert_eq!(Direction::from_delta(3), Direction::Forward);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid route path: {0}")]
    InvalidRoutePath(String),

    #[error("invalid direction: {0} (expected -1, 0 or 1)")]
    InvalidDirection(i64),
}

/// A validated route path.
///
/// Route paths must:
/// - Start with `/`
/// - Not end with `/` (except the root path `/` itself)
/// - Not contain `//`
/// - Not contain whitespace, control characters, `?` or `#`
///
/// Query strings and fragments are not part of a route; the router
/// collaborator is responsible for stripping them before notifying.
///
/// # Example
///
/// ```
/// use slideway::core::types::RoutePath;
///
/// assert!(RoutePath::new("/").is_ok());
/// assert!(RoutePath::new("/projects/saudade").is_ok());
///
/// assert!(RoutePath::new("").is_err());
/// assert!(RoutePath::new("/about/").is_err());
/// assert!(RoutePath::new("/a//b").is_err());
/// assert!(RoutePath::new("/about?tab=cv").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoutePath(String);

impl RoutePath {
    /// Create a new validated route path.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRoutePath` if the path violates the rules above.
    pub fn new(path: impl Into<String>) -> Result<Self, TypeError> {
        let path = path.into();
        Self::validate(&path)?;
        Ok(Self(path))
    }

    /// The root route, `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    fn validate(path: &str) -> Result<(), TypeError> {
        if path.is_empty() {
            return Err(TypeError::InvalidRoutePath(
                "route path cannot be empty".into(),
            ));
        }

        if !path.starts_with('/') {
            return Err(TypeError::InvalidRoutePath(format!(
                "route path must start with '/': '{path}'"
            )));
        }

        if path.len() > 1 && path.ends_with('/') {
            return Err(TypeError::InvalidRoutePath(format!(
                "route path cannot end with '/': '{path}'"
            )));
        }

        if path.contains("//") {
            return Err(TypeError::InvalidRoutePath(format!(
                "route path cannot contain '//': '{path}'"
            )));
        }

        for c in path.chars() {
            if c.is_whitespace() || c.is_control() {
                return Err(TypeError::InvalidRoutePath(
                    "route path cannot contain whitespace or control characters".into(),
                ));
            }
            if c == '?' || c == '#' {
                return Err(TypeError::InvalidRoutePath(format!(
                    "route path cannot contain '{c}' (strip query and fragment first)"
                )));
            }
        }

        Ok(())
    }

    /// Get the route path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoutePath {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for RoutePath {
    type Error = TypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl std::str::FromStr for RoutePath {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<RoutePath> for String {
    fn from(path: RoutePath) -> Self {
        path.0
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slide direction between two routes.
///
/// `Forward` means the destination comes after the source in the route
/// table, `Backward` that it comes before. `Neutral` carries no bias and is
/// used for the initial load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i64")]
pub enum Direction {
    Backward,
    #[default]
    Neutral,
    Forward,
}

impl Direction {
    /// Direction from the sign of an index delta.
    pub fn from_delta(delta: i64) -> Self {
        match delta.signum() {
            1 => Direction::Forward,
            -1 => Direction::Backward,
            _ => Direction::Neutral,
        }
    }

    /// The signed value: -1, 0 or +1.
    pub fn signum(self) -> i8 {
        match self {
            Direction::Backward => -1,
            Direction::Neutral => 0,
            Direction::Forward => 1,
        }
    }

    /// The opposite direction. `Neutral` stays `Neutral`.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Backward => Direction::Forward,
            Direction::Neutral => Direction::Neutral,
            Direction::Forward => Direction::Backward,
        }
    }
}

impl From<Direction> for i8 {
    fn from(direction: Direction) -> Self {
        direction.signum()
    }
}

impl TryFrom<i64> for Direction {
    type Error = TypeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Direction::Backward),
            0 => Ok(Direction::Neutral),
            1 => Ok(Direction::Forward),
            other => Err(TypeError::InvalidDirection(other)),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Backward => write!(f, "backward"),
            Direction::Neutral => write!(f, "neutral"),
            Direction::Forward => write!(f, "forward"),
        }
    }
}
