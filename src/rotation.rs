//! Rotation policy and archive rename
//!
//! Decides whether a managed file must be rotated before the next append, and
//! performs the rotation by renaming the file to a timestamped `.bak` archive.
//! Archives are never read back; ownership passes to the operator.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// When a managed file is archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationStrategy {
    /// Rotate once the file reaches the configured size
    #[default]
    Size,
    /// Rotate when the day-of-month changes
    Daily,
    /// Rotate after seven days of wall-clock time
    Weekly,
    /// Rotate when the calendar month changes
    Monthly,
}

impl RotationStrategy {
    /// Parse a strategy keyword; anything other than the three time-based
    /// keywords selects size-based rotation.
    pub fn from_name(name: &str) -> Self {
        match name {
            "daily" => RotationStrategy::Daily,
            "weekly" => RotationStrategy::Weekly,
            "monthly" => RotationStrategy::Monthly,
            _ => RotationStrategy::Size,
        }
    }

    /// Configuration keyword for this strategy.
    pub fn as_str(self) -> &'static str {
        match self {
            RotationStrategy::Size => "size",
            RotationStrategy::Daily => "daily",
            RotationStrategy::Weekly => "weekly",
            RotationStrategy::Monthly => "monthly",
        }
    }
}

impl Serialize for RotationStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RotationStrategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(RotationStrategy::from_name(&name))
    }
}

/// Pure rotation decision over observed file state.
///
/// Daily and monthly compare only the calendar component, not the full date:
/// a file last touched on the same day-of-month of an earlier month is not
/// considered stale by the daily strategy. Keep the component-only comparison
/// when changing this; callers depend on it.
fn rotation_due(
    strategy: RotationStrategy,
    max_size: u64,
    size: u64,
    modified: DateTime<Utc>,
    now: DateTime<Utc>,
) -> bool {
    match strategy {
        RotationStrategy::Size => size >= max_size,
        RotationStrategy::Daily => now.day() != modified.day(),
        RotationStrategy::Weekly => now.signed_duration_since(modified) >= Duration::weeks(1),
        RotationStrategy::Monthly => now.month() != modified.month(),
    }
}

/// Check whether the file at `path` must be rotated before the next append.
///
/// A missing file never rotates. An unreadable mtime is treated as "modified
/// now", which suppresses the time-based strategies for that check.
pub fn should_rotate(
    path: &Path,
    strategy: RotationStrategy,
    max_size: u64,
    now: DateTime<Utc>,
) -> bool {
    let Ok(meta) = fs::metadata(path) else {
        return false;
    };
    let modified = meta
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or(now);
    rotation_due(strategy, max_size, meta.len(), modified, now)
}

/// Archive name for a rotation happening at `now`.
fn archive_path(path: &Path, now: DateTime<Utc>) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{}.bak", now.timestamp_millis()));
    PathBuf::from(name)
}

/// Archive the file at `path` by renaming it to `{path}.{unix_millis}.bak`.
///
/// Calling this when no file exists at `path` is a no-op. A failed rename
/// surfaces as an `io::Error`; it is not retried here.
pub fn rotate(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        return Ok(());
    }
    fs::rename(path, archive_path(path, Utc::now()))
}
