//! Moderation log facade over a storage backend.
//!
//! Presents the four operations moderation handlers call, and pins down
//! the failure policy: a backend error is logged and degraded to `false`
//! or an empty list, never propagated. A failed log write must not take
//! down the event handler that triggered it.

use std::sync::Arc;

use chrono::Utc;
use crosschat_types::moderation::{BanRecord, WarningRecord};

use crate::moderation::store::ModerationStore;

/// Display name used until the member is resolved and the row reconciled.
fn placeholder_username(user_id: &str) -> String {
    format!("User {user_id}")
}

/// Translation layer between moderation handlers and the storage backend.
///
/// Stateless beyond the shared backend handle. Clones are cheap and safe
/// to hand to concurrent callers, provided the backend itself tolerates
/// concurrent calls.
pub struct ModerationLog<S> {
    store: Arc<S>,
}

impl<S> Clone for ModerationLog<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ModerationStore> ModerationLog<S> {
    /// Wrap an existing backend handle. The log does not manage the
    /// backend's lifecycle, only translates calls to it.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Record a warning against `user_id`. Returns `false` when the
    /// backend rejects the write.
    pub async fn add_warning(&self, user_id: &str, moderator_id: &str, reason: &str) -> bool {
        let warning = WarningRecord {
            user_id: user_id.to_string(),
            username: placeholder_username(user_id),
            reason: reason.to_string(),
            warned_by: moderator_id.to_string(),
            warned_at: Utc::now(),
        };

        match self.store.add_warning(&warning).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(user_id, %err, "failed to record warning");
                false
            }
        }
    }

    /// Record an active ban for `user_id`. Returns `false` when the
    /// backend rejects the write.
    pub async fn ban_user(&self, user_id: &str, moderator_id: &str, reason: &str) -> bool {
        let ban = BanRecord {
            user_id: user_id.to_string(),
            username: placeholder_username(user_id),
            reason: reason.to_string(),
            banned_by: moderator_id.to_string(),
            banned_at: Utc::now(),
            is_active: true,
        };

        match self.store.add_ban(&ban).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(user_id, %err, "failed to record ban");
                false
            }
        }
    }

    /// Whether `user_id` is currently banned. A failed query reads as not
    /// banned: a storage outage must never lock out a legitimate user.
    pub async fn is_user_banned(&self, user_id: &str) -> bool {
        match self.store.is_user_banned(user_id).await {
            Ok(banned) => banned,
            Err(err) => {
                tracing::warn!(user_id, %err, "ban status query failed, treating as not banned");
                false
            }
        }
    }

    /// Warnings recorded for `user_id`, newest first. A failed query
    /// reads as no warnings.
    pub async fn get_user_warnings(&self, user_id: &str) -> Vec<WarningRecord> {
        match self.store.get_user_warnings(user_id).await {
            Ok(warnings) => warnings,
            Err(err) => {
                tracing::warn!(user_id, %err, "warning list query failed");
                Vec::new()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crosschat_types::error::StoreError;

    /// In-memory backend that accepts every write.
    #[derive(Default)]
    struct MemStore {
        warnings: Mutex<Vec<WarningRecord>>,
        bans: Mutex<Vec<BanRecord>>,
    }

    impl ModerationStore for MemStore {
        async fn add_warning(&self, warning: &WarningRecord) -> Result<(), StoreError> {
            self.warnings.lock().unwrap().push(warning.clone());
            Ok(())
        }

        async fn add_ban(&self, ban: &BanRecord) -> Result<(), StoreError> {
            self.bans.lock().unwrap().push(ban.clone());
            Ok(())
        }

        async fn is_user_banned(&self, user_id: &str) -> Result<bool, StoreError> {
            Ok(self
                .bans
                .lock()
                .unwrap()
                .iter()
                .any(|b| b.user_id == user_id && b.is_active))
        }

        async fn get_user_warnings(&self, user_id: &str) -> Result<Vec<WarningRecord>, StoreError> {
            Ok(self
                .warnings
                .lock()
                .unwrap()
                .iter()
                .filter(|w| w.user_id == user_id)
                .cloned()
                .collect())
        }
    }

    /// Backend where every call fails.
    struct FailStore;

    impl ModerationStore for FailStore {
        async fn add_warning(&self, _warning: &WarningRecord) -> Result<(), StoreError> {
            Err(StoreError::Connection("connection refused".to_string()))
        }

        async fn add_ban(&self, _ban: &BanRecord) -> Result<(), StoreError> {
            Err(StoreError::Query("constraint violation".to_string()))
        }

        async fn is_user_banned(&self, _user_id: &str) -> Result<bool, StoreError> {
            Err(StoreError::Connection("connection refused".to_string()))
        }

        async fn get_user_warnings(&self, _user_id: &str) -> Result<Vec<WarningRecord>, StoreError> {
            Err(StoreError::Query("no such table".to_string()))
        }
    }

    #[tokio::test]
    async fn test_add_warning_builds_record_with_placeholder_name() {
        let store = Arc::new(MemStore::default());
        let log = ModerationLog::new(Arc::clone(&store));

        assert!(log.add_warning("42", "7", "spamming invite links").await);

        let warnings = store.warnings.lock().unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].user_id, "42");
        assert_eq!(warnings[0].username, "User 42");
        assert_eq!(warnings[0].warned_by, "7");
        assert_eq!(warnings[0].reason, "spamming invite links");
    }

    #[tokio::test]
    async fn test_ban_user_records_active_ban() {
        let store = Arc::new(MemStore::default());
        let log = ModerationLog::new(Arc::clone(&store));

        assert!(log.ban_user("42", "7", "repeated harassment").await);
        assert!(store.bans.lock().unwrap()[0].is_active);

        assert!(log.is_user_banned("42").await);
        assert!(!log.is_user_banned("43").await);
    }

    #[tokio::test]
    async fn test_get_user_warnings_filters_by_user() {
        let store = Arc::new(MemStore::default());
        let log = ModerationLog::new(Arc::clone(&store));

        log.add_warning("42", "7", "first").await;
        log.add_warning("42", "8", "second").await;
        log.add_warning("99", "7", "other user").await;

        let warnings = log.get_user_warnings("42").await;
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.user_id == "42"));
    }

    #[tokio::test]
    async fn test_warning_write_failure_degrades_to_false() {
        let log = ModerationLog::new(Arc::new(FailStore));
        assert!(!log.add_warning("42", "7", "spam").await);
    }

    #[tokio::test]
    async fn test_ban_write_failure_degrades_to_false() {
        let log = ModerationLog::new(Arc::new(FailStore));
        assert!(!log.ban_user("42", "7", "spam").await);
    }

    #[tokio::test]
    async fn test_ban_query_failure_reads_as_not_banned() {
        let log = ModerationLog::new(Arc::new(FailStore));
        assert!(!log.is_user_banned("42").await);
    }

    #[tokio::test]
    async fn test_warning_query_failure_reads_as_empty() {
        let log = ModerationLog::new(Arc::new(FailStore));
        assert!(log.get_user_warnings("42").await.is_empty());
    }
}
