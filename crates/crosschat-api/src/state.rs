//! Application state wiring settings and storage together.
//!
//! `AppState` pins the generic moderation log to the concrete SQLite
//! store. Built once per invocation; commands borrow it.

use std::sync::Arc;

use anyhow::{Context, Result};

use crosschat_core::moderation::log::ModerationLog;
use crosschat_core::settings::{Settings, keys};
use crosschat_infra::sqlite::moderation::SqliteModerationStore;
use crosschat_infra::sqlite::pool::{DatabasePool, default_database_url};

/// Shared application state for moderation commands.
pub struct AppState {
    pub moderation: ModerationLog<SqliteModerationStore>,
}

impl AppState {
    /// Initialize from the environment: load settings, open the
    /// moderation database, wire the log.
    pub async fn init() -> Result<Self> {
        let settings = Settings::from_env().context("configuration failed to load")?;

        let database_url = match settings.text(keys::DATABASE_URL) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => default_database_url(),
        };

        let pool = DatabasePool::new(&database_url)
            .await
            .with_context(|| format!("failed to open moderation database at {database_url}"))?;
        let store = Arc::new(SqliteModerationStore::new(pool));

        Ok(Self {
            moderation: ModerationLog::new(store),
        })
    }
}
