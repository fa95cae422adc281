//! SQLite moderation store.
//!
//! Implements the `ModerationStore` port from `crosschat-core` using sqlx
//! with the split read/write pool. Warnings are append-only rows; bans are
//! one row per user, reactivated on conflict.

use chrono::{DateTime, Utc};
use sqlx::Row;

use crosschat_core::moderation::store::ModerationStore;
use crosschat_types::error::StoreError;
use crosschat_types::moderation::{BanRecord, WarningRecord};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ModerationStore`.
pub struct SqliteModerationStore {
    pool: DatabasePool,
}

impl SqliteModerationStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row types
// ---------------------------------------------------------------------------

struct WarningRow {
    user_id: String,
    username: String,
    reason: String,
    warned_by: String,
    warned_at: String,
}

impl WarningRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            reason: row.try_get("reason")?,
            warned_by: row.try_get("warned_by")?,
            warned_at: row.try_get("warned_at")?,
        })
    }

    fn into_record(self) -> Result<WarningRecord, StoreError> {
        Ok(WarningRecord {
            user_id: self.user_id,
            username: self.username,
            reason: self.reason,
            warned_by: self.warned_by,
            warned_at: parse_datetime(&self.warned_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn store_err(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Connection(e.to_string())
        }
        other => StoreError::Query(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// ModerationStore impl
// ---------------------------------------------------------------------------

impl ModerationStore for SqliteModerationStore {
    async fn add_warning(&self, warning: &WarningRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO warned_users (user_id, username, reason, warned_by, warned_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&warning.user_id)
        .bind(&warning.username)
        .bind(&warning.reason)
        .bind(&warning.warned_by)
        .bind(format_datetime(&warning.warned_at))
        .execute(&self.pool.writer)
        .await
        .map_err(store_err)?;

        Ok(())
    }

    async fn add_ban(&self, ban: &BanRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO banned_users (user_id, username, reason, banned_by, banned_at, is_active)
               VALUES (?, ?, ?, ?, ?, ?)
               ON CONFLICT (user_id) DO UPDATE SET
                   username = excluded.username,
                   reason = excluded.reason,
                   banned_by = excluded.banned_by,
                   banned_at = excluded.banned_at,
                   is_active = excluded.is_active"#,
        )
        .bind(&ban.user_id)
        .bind(&ban.username)
        .bind(&ban.reason)
        .bind(&ban.banned_by)
        .bind(format_datetime(&ban.banned_at))
        .bind(i64::from(ban.is_active))
        .execute(&self.pool.writer)
        .await
        .map_err(store_err)?;

        Ok(())
    }

    async fn is_user_banned(&self, user_id: &str) -> Result<bool, StoreError> {
        let row = sqlx::query(
            "SELECT 1 FROM banned_users WHERE user_id = ? AND is_active = 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(store_err)?;

        Ok(row.is_some())
    }

    async fn get_user_warnings(&self, user_id: &str) -> Result<Vec<WarningRecord>, StoreError> {
        let rows = sqlx::query(
            r#"SELECT user_id, username, reason, warned_by, warned_at
               FROM warned_users
               WHERE user_id = ?
               ORDER BY warned_at DESC, id DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(store_err)?;

        rows.iter()
            .map(|row| {
                WarningRow::from_row(row)
                    .map_err(store_err)
                    .and_then(WarningRow::into_record)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    async fn test_store() -> (tempfile::TempDir, SqliteModerationStore) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, SqliteModerationStore::new(pool))
    }

    fn warning(user_id: &str, reason: &str, at: DateTime<Utc>) -> WarningRecord {
        WarningRecord {
            user_id: user_id.to_string(),
            username: format!("User {user_id}"),
            reason: reason.to_string(),
            warned_by: "7".to_string(),
            warned_at: at,
        }
    }

    fn ban(user_id: &str, reason: &str, at: DateTime<Utc>) -> BanRecord {
        BanRecord {
            user_id: user_id.to_string(),
            username: format!("User {user_id}"),
            reason: reason.to_string(),
            banned_by: "7".to_string(),
            banned_at: at,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_warnings_roundtrip_newest_first() {
        let (_dir, store) = test_store().await;
        let t1 = Utc.with_ymd_and_hms(2026, 1, 2, 10, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2026, 1, 2, 11, 0, 0).unwrap();

        store.add_warning(&warning("42", "first", t1)).await.unwrap();
        store.add_warning(&warning("42", "second", t2)).await.unwrap();
        store.add_warning(&warning("99", "other", t1)).await.unwrap();

        let warnings = store.get_user_warnings("42").await.unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].reason, "second");
        assert_eq!(warnings[1].reason, "first");
        assert_eq!(warnings[1].warned_at, t1);
    }

    #[tokio::test]
    async fn test_unknown_user_has_no_warnings() {
        let (_dir, store) = test_store().await;
        assert!(store.get_user_warnings("404").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ban_and_status_query() {
        let (_dir, store) = test_store().await;
        let t = Utc.with_ymd_and_hms(2026, 1, 2, 10, 0, 0).unwrap();

        store.add_ban(&ban("42", "harassment", t)).await.unwrap();

        assert!(store.is_user_banned("42").await.unwrap());
        assert!(!store.is_user_banned("43").await.unwrap());
    }

    #[tokio::test]
    async fn test_reban_updates_existing_row() {
        let (_dir, store) = test_store().await;
        let t1 = Utc.with_ymd_and_hms(2026, 1, 2, 10, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2026, 1, 3, 10, 0, 0).unwrap();

        store.add_ban(&ban("42", "first offense", t1)).await.unwrap();

        // A lifted ban is modeled as an inactive row.
        let mut lifted = ban("42", "first offense", t1);
        lifted.is_active = false;
        store.add_ban(&lifted).await.unwrap();
        assert!(!store.is_user_banned("42").await.unwrap());

        // Re-banning reactivates the same row with the new reason.
        store.add_ban(&ban("42", "second offense", t2)).await.unwrap();
        assert!(store.is_user_banned("42").await.unwrap());

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM banned_users WHERE user_id = '42'")
            .fetch_one(&store.pool.reader)
            .await
            .unwrap();
        assert_eq!(count.0, 1);

        let reason: (String,) = sqlx::query_as("SELECT reason FROM banned_users WHERE user_id = '42'")
            .fetch_one(&store.pool.reader)
            .await
            .unwrap();
        assert_eq!(reason.0, "second offense");
    }

    #[tokio::test]
    async fn test_timestamps_stored_as_rfc3339() {
        let (_dir, store) = test_store().await;
        let t = Utc.with_ymd_and_hms(2026, 1, 2, 10, 30, 0).unwrap();

        store.add_warning(&warning("42", "spam", t)).await.unwrap();

        let raw: (String,) = sqlx::query_as("SELECT warned_at FROM warned_users WHERE user_id = '42'")
            .fetch_one(&store.pool.reader)
            .await
            .unwrap();
        assert_eq!(parse_datetime(&raw.0).unwrap(), t);
    }
}
