//! Severity levels and the per-call log record

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Severity of a log call, in rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Numeric rank used for threshold filtering (debug < info < warn < error).
    pub fn rank(self) -> u8 {
        match self {
            Level::Debug => 0,
            Level::Info => 1,
            Level::Warn => 2,
            Level::Error => 3,
        }
    }

    /// Uppercase display name, as it appears in rendered lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    /// Parse a level name case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" => Some(Level::Warn),
            "error" => Some(Level::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str().to_ascii_lowercase())
    }
}

// Threshold values in config files are lenient: an unrecognized name falls
// back to the default threshold instead of failing the whole config load.
impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Level::from_name(&name).unwrap_or(Level::Info))
    }
}

/// Structured metadata attached to a log call.
///
/// A `BTreeMap` keeps serialization order deterministic, so a rendered line
/// with the same metadata always reads the same.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// One log call, captured at the moment it was made.
///
/// Records are immutable once constructed and are consumed synchronously by
/// the formatter and writer; only the rendered line is persisted.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Identity label prefixing the rendered line
    pub identity: String,
    /// UTC timestamp taken when the record was constructed
    pub timestamp: DateTime<Utc>,
    /// Severity of the call
    pub level: Level,
    /// Log message
    pub message: String,
    /// Structured metadata, possibly empty
    pub metadata: Metadata,
}

impl LogRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        identity: impl Into<String>,
        level: Level,
        message: impl Into<String>,
        metadata: Metadata,
    ) -> Self {
        Self {
            identity: identity.into(),
            timestamp: Utc::now(),
            level,
            message: message.into(),
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_total_order() {
        assert!(Level::Debug.rank() < Level::Info.rank());
        assert!(Level::Info.rank() < Level::Warn.rank());
        assert!(Level::Warn.rank() < Level::Error.rank());
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(Level::from_name("warn"), Some(Level::Warn));
        assert_eq!(Level::from_name("ERROR"), Some(Level::Error));
        assert_eq!(Level::from_name("Info"), Some(Level::Info));
    }

    #[test]
    fn test_from_name_unknown() {
        assert_eq!(Level::from_name("verbose"), None);
        assert_eq!(Level::from_name(""), None);
    }

    #[test]
    fn test_record_carries_metadata() {
        let mut meta = Metadata::new();
        meta.insert("user".to_string(), serde_json::json!("alice"));

        let record = LogRecord::new("app", Level::Info, "login", meta);
        assert_eq!(record.identity, "app");
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.metadata.len(), 1);
    }
}
