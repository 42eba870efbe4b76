// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `deckgraph`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "deckgraph",
    version,
    about = "Lock spaced-repetition items behind their prerequisites.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Deckgraph.toml` in the current working directory. A missing
    /// default file means "use built-in defaults".
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DECKGRAPH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Print command output as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Rebuild the graph from the layout, sync every item and recompute
    /// blocking state.
    Rebuild,

    /// Re-sync a single item (e.g. after a review) and recompute blocking
    /// state.
    SyncItem {
        /// Item id as used in the layout.
        id: String,
    },

    /// Show counts and listings of blocking / blocked items.
    Report,

    /// List unblocked items that are due, in priority order.
    Due,

    /// List the actionable frontier (blocking and not blocked).
    Blocking,

    /// Show one item's live scheduling state and due date.
    Inspect {
        /// Item id as used in the layout.
        id: String,
    },

    /// Check that the scheduler and the collection epoch are reachable.
    Status,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
