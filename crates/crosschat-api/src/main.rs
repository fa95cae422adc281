//! Crosschat operations CLI entry point.
//!
//! Binary name: `xchat`
//!
//! Parses CLI arguments, sets up tracing, then dispatches to the
//! configuration preflight or a moderation command.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,crosschat=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "xchat", &mut std::io::stdout());
        return Ok(());
    }

    // The preflight reads only the environment; no database needed.
    if matches!(cli.command, Commands::Check) {
        let valid = cli::check::check(cli.json)?;
        if !valid {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Moderation commands need settings plus the moderation database.
    let state = AppState::init().await?;

    match cli.command {
        Commands::Check | Commands::Completions { .. } => unreachable!("handled above"),

        Commands::Warn {
            user_id,
            reason,
            moderator_id,
        } => {
            let ok =
                cli::moderation::warn(&state, &user_id, &moderator_id, &reason, cli.json).await?;
            if !ok {
                std::process::exit(1);
            }
        }

        Commands::Ban {
            user_id,
            reason,
            moderator_id,
        } => {
            let ok =
                cli::moderation::ban(&state, &user_id, &moderator_id, &reason, cli.json).await?;
            if !ok {
                std::process::exit(1);
            }
        }

        Commands::Banned { user_id } => {
            cli::moderation::banned(&state, &user_id, cli.json).await?;
        }

        Commands::Warnings { user_id } => {
            cli::moderation::warnings(&state, &user_id, cli.json).await?;
        }
    }

    Ok(())
}
