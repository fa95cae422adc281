//! Process-local settings store.
//!
//! Loads every recognized key from an environment-shaped source at startup,
//! applies typed coercion and defaults, and answers typed reads thereafter.
//! The store is an explicitly constructed value: the launcher builds one in
//! `main` and passes it down, so tests can hold any number of independent
//! instances.

use std::collections::{BTreeMap, HashMap};

use crosschat_types::error::ConfigParseError;
use crosschat_types::settings::{SettingValue, ValidationReport, VipSettings};

/// Recognized setting keys, matching the environment variable names.
pub mod keys {
    /// Discord gateway token. Required.
    pub const BOT_TOKEN: &str = "BOT_TOKEN";
    /// User allowed to run owner-only admin commands.
    pub const BOT_OWNER_ID: &str = "BOT_OWNER_ID";
    /// Moderation database connection string. Required.
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Guild whose roles drive VIP and staff checks.
    pub const HOME_GUILD_ID: &str = "HOME_GUILD_ID";
    /// Role granting VIP cosmetics in cross-server chat.
    pub const VIP_ROLE_ID: &str = "VIP_ROLE_ID";
    /// Role granting access to staff commands.
    pub const STAFF_ROLE_ID: &str = "STAFF_ROLE_ID";
    /// Production/development switch.
    pub const PRODUCTION_MODE: &str = "PRODUCTION_MODE";
    /// Default tracing filter directive.
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// Longest message relayed across servers.
    pub const MAX_MESSAGE_LENGTH: &str = "MAX_MESSAGE_LENGTH";
    /// Per-user cooldown between cross-posted messages.
    pub const CROSSCHAT_COOLDOWN_SECS: &str = "CROSSCHAT_COOLDOWN_SECS";
    /// Reconnect to the gateway after a dropped connection.
    pub const AUTO_RECONNECT: &str = "AUTO_RECONNECT";
    /// Reconnect attempts before giving up.
    pub const MAX_RETRIES: &str = "MAX_RETRIES";
    /// Mirror moderation state to the web panel.
    pub const WEB_PANEL_SYNC: &str = "WEB_PANEL_SYNC";
    /// Enable the automatic moderation pipeline.
    pub const AUTO_MODERATION: &str = "AUTO_MODERATION";
}

/// Where raw setting values come from.
///
/// [`EnvSource`] is the production implementation; tests substitute a map
/// so they never touch the process environment.
pub trait SettingsSource {
    /// The raw value for `key`, or `None` when the source has no value.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads raw values from process environment variables.
pub struct EnvSource;

impl SettingsSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(val) => Some(val),
            Err(std::env::VarError::NotPresent) => None,
            // A non-Unicode value cannot be a usable token, URL, or number.
            Err(std::env::VarError::NotUnicode(_)) => None,
        }
    }
}

/// Declared value shape and default for a recognized key.
enum Kind {
    Text(&'static str),
    Integer(i64),
    Flag(bool),
    Id,
}

/// Recognized keys in declaration order. Validation reports list keys in
/// this order, not discovery order.
const DECLARED: &[(&str, Kind)] = &[
    (keys::BOT_TOKEN, Kind::Text("")),
    (keys::BOT_OWNER_ID, Kind::Id),
    (keys::DATABASE_URL, Kind::Text("")),
    (keys::HOME_GUILD_ID, Kind::Id),
    (keys::VIP_ROLE_ID, Kind::Id),
    (keys::STAFF_ROLE_ID, Kind::Id),
    (keys::PRODUCTION_MODE, Kind::Flag(true)),
    (keys::LOG_LEVEL, Kind::Text("info")),
    (keys::MAX_MESSAGE_LENGTH, Kind::Integer(2000)),
    (keys::CROSSCHAT_COOLDOWN_SECS, Kind::Integer(1)),
    (keys::AUTO_RECONNECT, Kind::Flag(true)),
    (keys::MAX_RETRIES, Kind::Integer(3)),
    (keys::WEB_PANEL_SYNC, Kind::Flag(true)),
    (keys::AUTO_MODERATION, Kind::Flag(true)),
];

/// Settings that must be configured before the bot can start.
const REQUIRED: &[&str] = &[keys::BOT_TOKEN, keys::DATABASE_URL];

/// Settings that should be configured, with the consequence of leaving
/// them unset.
const RECOMMENDED: &[(&str, &str)] = &[
    (keys::BOT_OWNER_ID, "owner-only admin commands are disabled"),
    (keys::HOME_GUILD_ID, "VIP and staff role checks are disabled"),
];

/// Process-local typed settings store.
///
/// Populated once by [`Settings::load`]; mutated afterwards only through
/// explicit [`Settings::set`] calls. Never persisted.
#[derive(Debug, Clone)]
pub struct Settings {
    values: HashMap<String, SettingValue>,
}

impl Settings {
    /// Load every recognized key from `source`.
    ///
    /// Absent values take their declared default; present values must
    /// coerce to the declared type or the whole load fails and no store is
    /// constructed.
    pub fn load(source: &impl SettingsSource) -> Result<Self, ConfigParseError> {
        let mut values = HashMap::with_capacity(DECLARED.len());
        for (key, kind) in DECLARED {
            let value = coerce(key, kind, source.get(key))?;
            values.insert((*key).to_string(), value);
        }
        Ok(Self { values })
    }

    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigParseError> {
        Self::load(&EnvSource)
    }

    /// The current value for `key`, if any. Callers supply their own
    /// fallback with `unwrap_or`.
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    /// Set `key` unconditionally. Keys outside the recognized set are
    /// stored as-is, so runtime components can attach their own entries.
    pub fn set(&mut self, key: impl Into<String>, value: SettingValue) {
        self.values.insert(key.into(), value);
    }

    /// Text value for `key`, or `None` if absent or differently typed.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SettingValue::as_text)
    }

    /// Integer value for `key`, or `None` if absent or differently typed.
    pub fn integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(SettingValue::as_integer)
    }

    /// Flag value for `key`, or `None` if absent or differently typed.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(SettingValue::as_flag)
    }

    /// Configured identifier for `key`. `None` for unset ids as well as
    /// absent or differently typed entries.
    pub fn id(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(SettingValue::as_id)
    }

    /// The VIP identifier group. Any of the three may be unset.
    pub fn vip(&self) -> VipSettings {
        VipSettings {
            guild_id: self.id(keys::HOME_GUILD_ID),
            vip_role_id: self.id(keys::VIP_ROLE_ID),
            staff_role_id: self.id(keys::STAFF_ROLE_ID),
        }
    }

    /// An ordered copy of every current entry.
    pub fn snapshot(&self) -> BTreeMap<String, SettingValue> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Check completeness: unset required settings produce blocking
    /// issues, unset recommended ones produce warnings. The report is
    /// computed fresh on every call and lists keys in declaration order.
    pub fn validate(&self) -> ValidationReport {
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        for key in REQUIRED {
            if self.is_unset(key) {
                issues.push(format!("{key} is required"));
            }
        }
        for (key, consequence) in RECOMMENDED {
            if self.is_unset(key) {
                warnings.push(format!("{key} is not set; {consequence}"));
            }
        }

        ValidationReport {
            valid: issues.is_empty(),
            issues,
            warnings,
            settings: self.snapshot(),
        }
    }

    fn is_unset(&self, key: &str) -> bool {
        self.get(key).is_none_or(SettingValue::is_unset)
    }
}

/// Coerce a raw source value to the declared kind.
fn coerce(
    key: &str,
    kind: &Kind,
    raw: Option<String>,
) -> Result<SettingValue, ConfigParseError> {
    let value = match (kind, raw) {
        (Kind::Text(default), raw) => {
            SettingValue::Text(raw.unwrap_or_else(|| (*default).to_string()))
        }
        (Kind::Flag(default), None) => SettingValue::Flag(*default),
        // The literal "true" (any casing) is the only truthy form.
        (Kind::Flag(_), Some(raw)) => SettingValue::Flag(raw.eq_ignore_ascii_case("true")),
        (Kind::Integer(default), None) => SettingValue::Integer(*default),
        (Kind::Integer(_), Some(raw)) => match raw.parse::<i64>() {
            Ok(n) => SettingValue::Integer(n),
            Err(_) => {
                return Err(ConfigParseError {
                    key: key.to_string(),
                    expected: "integer",
                    value: raw,
                });
            }
        },
        // Ids parse only when non-empty; empty and absent both mean unset,
        // keeping a configured zero distinguishable from "not configured".
        (Kind::Id, None) => SettingValue::Id(None),
        (Kind::Id, Some(raw)) if raw.is_empty() => SettingValue::Id(None),
        (Kind::Id, Some(raw)) => match raw.parse::<u64>() {
            Ok(id) => SettingValue::Id(Some(id)),
            Err(_) => {
                return Err(ConfigParseError {
                    key: key.to_string(),
                    expected: "id",
                    value: raw,
                });
            }
        },
    };
    Ok(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
