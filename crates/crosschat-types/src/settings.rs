//! Configuration domain types for Crosschat.
//!
//! [`SettingValue`] is the typed value held by the settings store. The `Id`
//! variant keeps "not configured" (`None`) distinct from a configured zero,
//! so role and owner checks can tell the two apart. [`ValidationReport`] is
//! the computed self-check result the launcher consults before starting the
//! bot.

use std::collections::BTreeMap;

use serde::Serialize;

/// A typed configuration value.
///
/// Serializes untagged: text as a JSON string, integers and set ids as
/// numbers, flags as booleans, and an unset id as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Free-form text (token, database URL, log level).
    Text(String),
    /// Numeric tunable (message length, cooldown, retry count).
    Integer(i64),
    /// On/off switch.
    Flag(bool),
    /// Snowflake identifier; `None` means not configured.
    Id(Option<u64>),
}

impl SettingValue {
    /// Borrow the inner text, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The inner integer, if this is an `Integer` value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The inner flag, if this is a `Flag` value.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            SettingValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// The inner identifier. `None` for non-id values and for the unset
    /// sentinel alike; use [`SettingValue::is_unset`] to distinguish.
    pub fn as_id(&self) -> Option<u64> {
        match self {
            SettingValue::Id(id) => *id,
            _ => None,
        }
    }

    /// True when no usable value is configured: empty text or an unset id.
    /// A configured zero (`Id(Some(0))`, `Integer(0)`) is not unset.
    pub fn is_unset(&self) -> bool {
        match self {
            SettingValue::Text(s) => s.is_empty(),
            SettingValue::Id(id) => id.is_none(),
            SettingValue::Integer(_) | SettingValue::Flag(_) => false,
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::Text(s)
    }
}

impl From<i64> for SettingValue {
    fn from(n: i64) -> Self {
        SettingValue::Integer(n)
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Flag(b)
    }
}

/// Result of the settings self-check.
///
/// Computed on demand by the settings store; never cached. `issues` block
/// startup, `warnings` do not.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// True when no blocking issue was found. Warnings never affect this.
    pub valid: bool,
    /// Missing required settings, in declaration order.
    pub issues: Vec<String>,
    /// Missing recommended settings, in declaration order.
    pub warnings: Vec<String>,
    /// Full settings snapshot at the time of the check.
    pub settings: BTreeMap<String, SettingValue>,
}

/// The VIP-related identifier group: home guild plus the two role ids
/// checked by VIP and staff gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VipSettings {
    pub guild_id: Option<u64>,
    pub vip_role_id: Option<u64>,
    pub staff_role_id: Option<u64>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
