//! Moderation subcommands: record warnings and bans, query ban status and
//! warning history.
//!
//! Writes go through the moderation log, so a storage failure degrades to
//! a `false` outcome here exactly as it does inside the bot. The command
//! surfaces that outcome in its exit code.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

/// Record a warning. Returns whether the write reached storage.
pub async fn warn(
    state: &AppState,
    user_id: &str,
    moderator_id: &str,
    reason: &str,
    json: bool,
) -> Result<bool> {
    let ok = state
        .moderation
        .add_warning(user_id, moderator_id, reason)
        .await;

    print_outcome("warn", user_id, ok, json)?;
    Ok(ok)
}

/// Record a ban. Returns whether the write reached storage.
pub async fn ban(
    state: &AppState,
    user_id: &str,
    moderator_id: &str,
    reason: &str,
    json: bool,
) -> Result<bool> {
    let ok = state.moderation.ban_user(user_id, moderator_id, reason).await;

    print_outcome("ban", user_id, ok, json)?;
    Ok(ok)
}

/// Report whether a user is currently banned.
pub async fn banned(state: &AppState, user_id: &str, json: bool) -> Result<()> {
    let banned = state.moderation.is_user_banned(user_id).await;

    if json {
        let result = serde_json::json!({
            "user_id": user_id,
            "banned": banned,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    if banned {
        println!(
            "  user {} is {}",
            style(user_id).cyan(),
            style("banned").red().bold()
        );
    } else {
        println!(
            "  user {} is {}",
            style(user_id).cyan(),
            style("not banned").green()
        );
    }
    println!();

    Ok(())
}

/// List warnings recorded for a user, newest first.
pub async fn warnings(state: &AppState, user_id: &str, json: bool) -> Result<()> {
    let warnings = state.moderation.get_user_warnings(user_id).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&warnings)?);
        return Ok(());
    }

    println!();
    if warnings.is_empty() {
        println!(
            "  no warnings recorded for user {}",
            style(user_id).cyan()
        );
        println!();
        return Ok(());
    }

    println!(
        "  Warnings for user {} ({} entries)",
        style(user_id).cyan(),
        warnings.len(),
    );
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("When").fg(Color::White),
        Cell::new("Moderator").fg(Color::White),
        Cell::new("Reason").fg(Color::White),
    ]);

    for warning in &warnings {
        table.add_row(vec![
            Cell::new(warning.warned_at.format("%Y-%m-%d %H:%M").to_string())
                .fg(Color::DarkGrey),
            Cell::new(&warning.warned_by).fg(Color::Cyan),
            Cell::new(&warning.reason),
        ]);
    }

    println!("{table}");
    println!();

    Ok(())
}

/// Shared outcome rendering for write commands.
fn print_outcome(action: &str, user_id: &str, ok: bool, json: bool) -> Result<()> {
    if json {
        let result = serde_json::json!({
            "action": action,
            "user_id": user_id,
            "ok": ok,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    if ok {
        println!(
            "  {} recorded {} for user {}",
            style("ok").green(),
            action,
            style(user_id).cyan()
        );
    } else {
        println!(
            "  {} {} was not recorded (storage failure, see log output)",
            style("failed").red(),
            action
        );
    }
    println!();

    Ok(())
}
