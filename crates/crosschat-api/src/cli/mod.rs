//! CLI command definitions for the `xchat` binary.
//!
//! Uses clap derive macros for argument parsing. `check` validates the
//! environment configuration; the moderation commands drive the moderation
//! log against the configured database.

pub mod check;
pub mod moderation;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Operate a self-hosted cross-server chat bot.
#[derive(Parser)]
#[command(name = "xchat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the environment configuration and print a report.
    Check,

    /// Record a warning against a user.
    Warn {
        /// Subject user id.
        user_id: String,

        /// Reason for the warning.
        reason: String,

        /// Acting moderator's user id.
        #[arg(long = "by")]
        moderator_id: String,
    },

    /// Ban a user.
    Ban {
        /// Subject user id.
        user_id: String,

        /// Reason for the ban.
        reason: String,

        /// Acting moderator's user id.
        #[arg(long = "by")]
        moderator_id: String,
    },

    /// Check whether a user is currently banned.
    Banned {
        /// Subject user id.
        user_id: String,
    },

    /// List warnings recorded for a user.
    Warnings {
        /// Subject user id.
        user_id: String,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}
