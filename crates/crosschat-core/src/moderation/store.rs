//! Moderation storage port.
//!
//! Defines the capability surface the moderation log requires from a
//! storage backend. Implementations live in crosschat-infra; swapping the
//! backend never requires touching the log.

use crosschat_types::error::StoreError;
use crosschat_types::moderation::{BanRecord, WarningRecord};

/// Storage backend for moderation records.
///
/// Exactly four operations: two writes, two queries. Uses native async fn
/// in traits (RPITIT, Rust 2024 edition). Blocking, cancellation, and
/// timeouts are the implementation's contract, not this trait's.
pub trait ModerationStore: Send + Sync {
    /// Persist a warning.
    fn add_warning(
        &self,
        warning: &WarningRecord,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Persist a ban, replacing any existing entry for the same user.
    fn add_ban(
        &self,
        ban: &BanRecord,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Whether `user_id` currently has an active ban.
    fn is_user_banned(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, StoreError>> + Send;

    /// All warnings recorded for `user_id`, newest first.
    fn get_user_warnings(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<WarningRecord>, StoreError>> + Send;
}
