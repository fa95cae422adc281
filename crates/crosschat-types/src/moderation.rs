//! Moderation domain types for Crosschat.
//!
//! One record per disciplinary event. Records are built by the moderation
//! log immediately before the storage write and are never mutated after
//! creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A warning issued against a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningRecord {
    /// Subject user id (snowflake as text).
    pub user_id: String,
    /// Display name at the time of the warning. May start as a placeholder
    /// until the member is resolved.
    pub username: String,
    /// Free-text reason given by the moderator.
    pub reason: String,
    /// Id of the acting moderator.
    pub warned_by: String,
    /// When the warning was issued.
    pub warned_at: DateTime<Utc>,
}

/// A ban entry for a user.
///
/// Bans are keyed by user: re-banning an already banned user refreshes the
/// entry rather than adding a second one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanRecord {
    /// Subject user id (snowflake as text).
    pub user_id: String,
    /// Display name at the time of the ban. May start as a placeholder.
    pub username: String,
    /// Free-text reason given by the moderator.
    pub reason: String,
    /// Id of the acting moderator.
    pub banned_by: String,
    /// When the ban was issued.
    pub banned_at: DateTime<Utc>,
    /// False once the ban has been lifted.
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
