//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! User-facing output is formatted consistently and respects the quiet flag.
//! Diagnostics go through `tracing` instead; see [`crate::logging`].

use std::fmt::Display;
use std::time::Duration;

use crate::core::types::Direction;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags. Quiet wins over debug.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Format a direction with an arrow for terminals.
pub fn format_direction(direction: Direction) -> String {
    let arrow = match direction {
        Direction::Forward => "↓",
        Direction::Backward => "↑",
        Direction::Neutral => "·",
    };
    format!("{} {}", arrow, direction)
}

/// Format a duration as whole milliseconds.
pub fn format_millis(duration: Duration) -> String {
    format!("{}ms", duration.as_millis())
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_debug() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn directions_have_arrows() {
        assert_eq!(format_direction(Direction::Forward), "↓ forward");
        assert_eq!(format_direction(Direction::Backward), "↑ backward");
    }

    #[test]
    fn millis() {
        assert_eq!(format_millis(Duration::from_millis(150)), "150ms");
        assert_eq!(format_millis(Duration::from_micros(999)), "0ms");
    }

    #[test]
    fn list_is_prefixed() {
        assert_eq!(format_list(&["/", "/about"], "- "), "- /\n- /about");
    }
}
