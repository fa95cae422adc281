//! Configuration preflight command.
//!
//! Loads settings from the environment, runs the self-check, and prints
//! the report. Exits nonzero when a required setting is missing so launch
//! scripts can refuse to start the bot.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crosschat_core::settings::{Settings, keys};
use crosschat_types::settings::SettingValue;

/// Keys whose values are never echoed back.
const SENSITIVE: &[&str] = &[keys::BOT_TOKEN];

/// Run the preflight. Returns whether the configuration is valid.
pub fn check(json: bool) -> Result<bool> {
    let settings = Settings::from_env().context("configuration failed to load")?;
    let report = settings.validate();

    if json {
        let mut value = serde_json::to_value(&report)?;
        // Token material stays out of panel logs.
        if let Some(map) = value.get_mut("settings").and_then(|s| s.as_object_mut()) {
            for key in SENSITIVE {
                let configured = map
                    .get(*key)
                    .and_then(|v| v.as_str())
                    .is_some_and(|s| !s.is_empty());
                if configured {
                    map.insert((*key).to_string(), "(redacted)".into());
                }
            }
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(report.valid);
    }

    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Setting").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);

    for (key, value) in &report.settings {
        let rendered = render(key, value);
        let cell = if value.is_unset() {
            Cell::new(&rendered).fg(Color::DarkGrey)
        } else {
            Cell::new(&rendered)
        };
        table.add_row(vec![Cell::new(key).fg(Color::Cyan), cell]);
    }

    println!("{table}");
    println!();

    for issue in &report.issues {
        println!("  {} {issue}", style("✗").red().bold());
    }
    for warning in &report.warnings {
        println!("  {} {warning}", style("!").yellow().bold());
    }

    if report.valid {
        println!("  {} configuration is valid", style("ok").green());
    } else {
        println!("  {} configuration is incomplete", style("failed").red());
    }
    println!();

    Ok(report.valid)
}

/// Human rendering of one value. Unset entries read as such instead of as
/// empty strings; secrets are only reported as present or absent.
fn render(key: &str, value: &SettingValue) -> String {
    if SENSITIVE.contains(&key) {
        return if value.is_unset() {
            "(not set)".to_string()
        } else {
            "(redacted)".to_string()
        };
    }

    match value {
        SettingValue::Text(s) if s.is_empty() => "(not set)".to_string(),
        SettingValue::Text(s) => s.clone(),
        SettingValue::Integer(n) => n.to_string(),
        SettingValue::Flag(b) => b.to_string(),
        SettingValue::Id(Some(id)) => id.to_string(),
        SettingValue::Id(None) => "(not set)".to_string(),
    }
}
