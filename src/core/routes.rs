//! core::routes
//!
//! The ordered route table and direction resolution.
//!
//! # Overview
//!
//! A [`RouteTable`] is the fixed, ordered list of routes a site knows about.
//! Order is meaningful: moving to a later route slides forward, moving to an
//! earlier one slides backward. The table is built once at startup and never
//! mutated afterwards.
//!
//! # Unknown Routes
//!
//! [`RouteTable::index_of`] returns `None` for a path that is not in the
//! table. How an unknown endpoint affects direction is decided by an explicit
//! [`UnknownRoutePolicy`] rather than by comparing sentinel values.
//!
//! # Example
//!
//! ```
//! use slideway::core::routes::{RouteTable, UnknownRoutePolicy};
//! use slideway::core::types::{Direction, RoutePath};
//!
//! let table = RouteTable::from_strs(&["/", "/saudade", "/about"]).unwrap();
//! let root = RoutePath::root();
//! let about = RoutePath::new("/about").unwrap();
//!
//! assert_eq!(table.index_of(&about), Some(2));
//! assert_eq!(table.position(&RoutePath::new("/nope").unwrap()), -1);
//! assert_eq!(
//!     table.direction(&root, &about, UnknownRoutePolicy::Forward),
//!     Direction::Forward
//! );
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{Direction, RoutePath, TypeError};

/// Signed position reported for a route missing from the table.
pub const UNKNOWN_POSITION: i64 = -1;

/// Routes used when no site configuration provides a table.
pub const DEFAULT_ROUTES: &[&str] = &[
    "/",
    "/saudade",
    "/amped-up",
    "/lumen",
    "/driftwood",
    "/paper-planes",
    "/nightjar",
    "/tidal",
    "/wayfinder",
    "/about",
    "/contact",
];

/// Errors from route table construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("route table cannot be empty")]
    Empty,

    #[error("duplicate route '{path}' at positions {first} and {second}")]
    Duplicate {
        path: RoutePath,
        first: usize,
        second: usize,
    },

    #[error(transparent)]
    InvalidPath(#[from] TypeError),
}

/// How to derive a direction when an endpoint is not in the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownRoutePolicy {
    /// Any unknown endpoint yields [`Direction::Forward`].
    #[default]
    Forward,
    /// Unknown routes order after every known route.
    AfterKnown,
}

impl UnknownRoutePolicy {
    /// Valid config spellings.
    pub const VALID_NAMES: &'static [&'static str] = &["forward", "after-known"];

    /// Config spelling of this policy.
    pub fn as_str(self) -> &'static str {
        match self {
            UnknownRoutePolicy::Forward => "forward",
            UnknownRoutePolicy::AfterKnown => "after-known",
        }
    }
}

impl std::fmt::Display for UnknownRoutePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UnknownRoutePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(UnknownRoutePolicy::Forward),
            "after-known" => Ok(UnknownRoutePolicy::AfterKnown),
            other => Err(format!(
                "invalid unknown route policy '{}', must be one of: {}",
                other,
                Self::VALID_NAMES.join(", ")
            )),
        }
    }
}

/// Ordered, immutable sequence of known routes.
///
/// # Invariants
///
/// - Non-empty
/// - No duplicate entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<RoutePath>,
}

impl RouteTable {
    /// Build a table from already-validated paths.
    ///
    /// # Errors
    ///
    /// - [`RouteTableError::Empty`] if `routes` is empty
    /// - [`RouteTableError::Duplicate`] if a path appears twice
    pub fn new(routes: Vec<RoutePath>) -> Result<Self, RouteTableError> {
        if routes.is_empty() {
            return Err(RouteTableError::Empty);
        }

        let mut seen = HashSet::with_capacity(routes.len());
        for (second, path) in routes.iter().enumerate() {
            if !seen.insert(path) {
                let first = routes
                    .iter()
                    .position(|p| p == path)
                    .unwrap_or(second);
                return Err(RouteTableError::Duplicate {
                    path: path.clone(),
                    first,
                    second,
                });
            }
        }

        Ok(Self { routes })
    }

    /// Build a table from raw strings, validating each path.
    pub fn from_strs<S: AsRef<str>>(routes: &[S]) -> Result<Self, RouteTableError> {
        let routes = routes
            .iter()
            .map(|r| RoutePath::new(r.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(routes)
    }

    /// Zero-based position of `path`, or `None` if it is not a known route.
    pub fn index_of(&self, path: &RoutePath) -> Option<usize> {
        self.routes.iter().position(|r| r == path)
    }

    /// Signed position of `path`: its index, or [`UNKNOWN_POSITION`].
    pub fn position(&self, path: &RoutePath) -> i64 {
        self.index_of(path)
            .map(|i| i as i64)
            .unwrap_or(UNKNOWN_POSITION)
    }

    /// Check whether `path` is a known route.
    pub fn contains(&self, path: &RoutePath) -> bool {
        self.index_of(path).is_some()
    }

    /// Slide direction for moving from `from` to `to`.
    ///
    /// Known endpoints give `sign(index(to) - index(from))`. Unknown
    /// endpoints are resolved by `policy`.
    pub fn direction(
        &self,
        from: &RoutePath,
        to: &RoutePath,
        policy: UnknownRoutePolicy,
    ) -> Direction {
        match (self.index_of(from), self.index_of(to), policy) {
            (Some(f), Some(t), _) => Direction::from_delta(t as i64 - f as i64),
            (_, _, UnknownRoutePolicy::Forward) => Direction::Forward,
            (f, t, UnknownRoutePolicy::AfterKnown) => {
                let last = self.routes.len();
                Direction::from_delta(t.unwrap_or(last) as i64 - f.unwrap_or(last) as i64)
            }
        }
    }

    /// Route at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&RoutePath> {
        self.routes.get(index)
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always false for a constructed table; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate over routes in table order.
    pub fn iter(&self) -> impl Iterator<Item = &RoutePath> {
        self.routes.iter()
    }

    /// The first route in the table (the landing page).
    pub fn first(&self) -> &RoutePath {
        &self.routes[0]
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        let routes = DEFAULT_ROUTES
            .iter()
            .filter_map(|r| RoutePath::new(*r).ok())
            .collect();
        Self { routes }
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RoutePath;
    type IntoIter = std::slice::Iter<'a, RoutePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> RoutePath {
        RoutePath::new(p).unwrap()
    }

    fn table() -> RouteTable {
        RouteTable::default()
    }

    #[test]
    fn default_table_is_valid() {
        let routes: Vec<_> = DEFAULT_ROUTES.iter().map(|r| path(r)).collect();
        assert_eq!(RouteTable::new(routes).unwrap(), table());
    }

    #[test]
    fn index_of_known_routes() {
        let t = table();
        for (i, route) in DEFAULT_ROUTES.iter().enumerate() {
            assert_eq!(t.index_of(&path(route)), Some(i));
        }
    }

    #[test]
    fn root_and_about_positions() {
        let t = table();
        assert_eq!(t.position(&path("/")), 0);
        assert_eq!(t.position(&path("/about")), 9);
    }

    #[test]
    fn unknown_route_is_sentinel() {
        let t = table();
        assert_eq!(t.index_of(&path("/blog")), None);
        assert_eq!(t.position(&path("/blog")), UNKNOWN_POSITION);
        assert!(!t.contains(&path("/blog")));
    }

    #[test]
    fn empty_table_rejected() {
        assert_eq!(RouteTable::new(vec![]), Err(RouteTableError::Empty));
    }

    #[test]
    fn duplicate_rejected() {
        let err = RouteTable::from_strs(&["/", "/about", "/contact", "/about"]).unwrap_err();
        assert_eq!(
            err,
            RouteTableError::Duplicate {
                path: path("/about"),
                first: 1,
                second: 3,
            }
        );
    }

    #[test]
    fn invalid_path_rejected() {
        let err = RouteTable::from_strs(&["/", "about"]).unwrap_err();
        assert!(matches!(err, RouteTableError::InvalidPath(_)));
    }

    #[test]
    fn direction_follows_table_order() {
        let t = table();
        let p2 = t.get(2).unwrap().clone();
        let p5 = t.get(5).unwrap().clone();
        let policy = UnknownRoutePolicy::Forward;

        assert_eq!(t.direction(&p2, &p5, policy), Direction::Forward);
        assert_eq!(t.direction(&p5, &p2, policy), Direction::Backward);
        assert_eq!(t.direction(&p5, &p5, policy), Direction::Neutral);
    }

    #[test]
    fn forward_policy_for_unknown() {
        let t = table();
        let policy = UnknownRoutePolicy::Forward;
        assert_eq!(
            t.direction(&path("/contact"), &path("/blog"), policy),
            Direction::Forward
        );
        assert_eq!(
            t.direction(&path("/blog"), &path("/"), policy),
            Direction::Forward
        );
    }

    #[test]
    fn after_known_policy_orders_unknown_last() {
        let t = table();
        let policy = UnknownRoutePolicy::AfterKnown;
        assert_eq!(
            t.direction(&path("/contact"), &path("/blog"), policy),
            Direction::Forward
        );
        assert_eq!(
            t.direction(&path("/blog"), &path("/"), policy),
            Direction::Backward
        );
        assert_eq!(
            t.direction(&path("/blog"), &path("/press"), policy),
            Direction::Neutral
        );
    }

    #[test]
    fn policy_parse_and_display() {
        assert_eq!(
            "after-known".parse::<UnknownRoutePolicy>(),
            Ok(UnknownRoutePolicy::AfterKnown)
        );
        assert!("sideways".parse::<UnknownRoutePolicy>().is_err());
        assert_eq!(UnknownRoutePolicy::Forward.to_string(), "forward");
    }
}
