use thiserror::Error;

/// A settings value that could not be coerced to its declared type.
///
/// Raised only for present-but-malformed values; an absent value takes the
/// declared default instead of erroring.
#[derive(Debug, Error)]
#[error("invalid value for {key}: expected {expected}, got '{value}'")]
pub struct ConfigParseError {
    /// The offending setting key.
    pub key: String,
    /// Human-readable name of the expected type ("integer", "id").
    pub expected: &'static str,
    /// The raw source value that failed to parse.
    pub value: String,
}

/// Errors surfaced by a moderation storage backend.
///
/// The moderation log downgrades these to boolean/empty results at its
/// boundary; they only propagate inside the storage layer itself.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_error_names_key() {
        let err = ConfigParseError {
            key: "MAX_RETRIES".to_string(),
            expected: "integer",
            value: "lots".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for MAX_RETRIES: expected integer, got 'lots'"
        );
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Query("no such table: warned_users".to_string());
        assert_eq!(err.to_string(), "query error: no such table: warned_users");
    }
}
