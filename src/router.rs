//! Routing of records to managed files
//!
//! The router is a pure function of the severity and the routing mode; it
//! never touches the filesystem.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::record::Level;

/// Policy selecting which managed file a given severity is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingMode {
    /// Everything goes to the combined file
    #[default]
    All,
    /// Warn/error go to one file, info/debug to another
    ErrorWarn,
}

impl RoutingMode {
    /// Parse a mode name; anything unrecognized is the default, not an error.
    pub fn from_name(name: &str) -> Self {
        match name {
            "error_warn" => RoutingMode::ErrorWarn,
            _ => RoutingMode::All,
        }
    }

    /// Configuration keyword for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            RoutingMode::All => "all",
            RoutingMode::ErrorWarn => "error_warn",
        }
    }
}

impl Serialize for RoutingMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RoutingMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(RoutingMode::from_name(&name))
    }
}

/// Resolved paths of the three managed files.
///
/// Only the paths implied by the active [`RoutingMode`] are ever written, but
/// all three are resolved up front so the writer can key its locks by path.
#[derive(Debug, Clone)]
pub struct ManagedPaths {
    /// Target of every record in `All` mode
    pub combined: PathBuf,
    /// Target of warn/error records in `ErrorWarn` mode
    pub error_warn: PathBuf,
    /// Target of info/debug records in `ErrorWarn` mode
    pub info_debug: PathBuf,
}

/// Pick the managed file for a record of the given severity.
pub fn route(level: Level, mode: RoutingMode, paths: &ManagedPaths) -> &Path {
    match mode {
        RoutingMode::All => &paths.combined,
        RoutingMode::ErrorWarn => {
            if matches!(level, Level::Warn | Level::Error) {
                &paths.error_warn
            } else {
                &paths.info_debug
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> ManagedPaths {
        ManagedPaths {
            combined: PathBuf::from("logs/combined.log"),
            error_warn: PathBuf::from("logs/errors.log"),
            info_debug: PathBuf::from("logs/info_debug.log"),
        }
    }

    #[test]
    fn test_all_mode_always_combined() {
        let paths = paths();
        for level in [Level::Debug, Level::Info, Level::Warn, Level::Error] {
            assert_eq!(route(level, RoutingMode::All, &paths), paths.combined);
        }
    }

    #[test]
    fn test_error_warn_mode_splits_by_severity() {
        let paths = paths();
        assert_eq!(
            route(Level::Error, RoutingMode::ErrorWarn, &paths),
            paths.error_warn
        );
        assert_eq!(
            route(Level::Warn, RoutingMode::ErrorWarn, &paths),
            paths.error_warn
        );
        assert_eq!(
            route(Level::Info, RoutingMode::ErrorWarn, &paths),
            paths.info_debug
        );
        assert_eq!(
            route(Level::Debug, RoutingMode::ErrorWarn, &paths),
            paths.info_debug
        );
    }

    #[test]
    fn test_unrecognized_mode_falls_back_to_all() {
        assert_eq!(RoutingMode::from_name("per_level"), RoutingMode::All);
        assert_eq!(RoutingMode::from_name(""), RoutingMode::All);
        assert_eq!(RoutingMode::from_name("error_warn"), RoutingMode::ErrorWarn);
    }
}
