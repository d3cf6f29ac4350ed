//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--site <dir>`: Load site config from that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Slideway - directional page transitions with a navigation lock
#[derive(Parser, Debug)]
#[command(name = "slideway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Site directory holding slideway.toml
    #[arg(long, global = true, value_name = "DIR")]
    pub site: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the route table in order
    #[command(
        name = "routes",
        long_about = "List the route table in navigation order.\n\n\
            The order decides transition direction: moving to a later route \
            slides forward, moving to an earlier one slides backward.",
        after_help = "\
EXAMPLES:
    slideway routes
    slideway routes --site ./my-site
    slideway routes --json"
    )]
    Routes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a single navigation would run
    #[command(
        name = "plan",
        long_about = "Show direction and timing for one navigation without running it.\n\n\
            Reports the transition direction, how long the engine waits for the \
            scroll-to-top, and how long the lock is held after the route commits.",
        after_help = "\
EXAMPLES:
    # From the home page to the about page
    slideway plan / /about

    # Starting scrolled 600px down
    slideway plan /contact / --scroll 600"
    )]
    Plan {
        /// Route navigated from
        from: String,

        /// Route navigated to
        to: String,

        /// Vertical scroll offset in pixels at the time of the call
        #[arg(long, default_value_t = 0.0)]
        scroll: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a sequence of navigations against a simulated page
    #[command(
        name = "simulate",
        long_about = "Run navigations through the real engine against a simulated page.\n\n\
            Each path is requested in turn, `--gap-ms` apart. Requests that arrive \
            while a navigation is in flight are ignored, exactly as in a browser. \
            The session journal is printed when every navigation has settled.",
        after_help = "\
EXAMPLES:
    # Walk forward through three pages
    slideway simulate /saudade /amped-up /lumen --gap-ms 800

    # Double-click: the second request is dropped
    slideway simulate /saudade /amped-up --gap-ms 0

    # Machine-readable journal, fast timings
    slideway simulate /about --transition-ms 0 --json"
    )]
    Simulate {
        /// Routes to request, in order
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,

        /// Route the session starts on (defaults to the first route)
        #[arg(long)]
        from: Option<String>,

        /// Scroll offset before each request, in pixels
        #[arg(long, default_value_t = 0.0)]
        scroll: f64,

        /// Delay between requests in milliseconds
        #[arg(long, default_value_t = 0)]
        gap_ms: u64,

        /// Override the transition duration in milliseconds
        #[arg(long)]
        transition_ms: Option<u64>,

        /// Fail commits for routes not in the table
        #[arg(long)]
        strict: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or create configuration
    #[command(
        name = "config",
        after_help = "\
EXAMPLES:
    # Where config is read from
    slideway config path

    # Effective settings after merging
    slideway config show --site ./my-site

    # Write a starter site config
    slideway config init --site ./my-site"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion.",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    slideway completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    slideway completion zsh >> ~/.zshrc

    # Fish
    slideway completion fish > ~/.config/fish/completions/slideway.fish

    # PowerShell
    slideway completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print config file locations
    Path,
    /// Print the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a starter config file
    Init {
        /// Write the global config even when --site is given
        #[arg(long)]
        global: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
