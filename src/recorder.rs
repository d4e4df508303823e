//! Level-named entry points

use crate::config::Config;
use crate::error::Result;
use crate::record::{Level, LogRecord, Metadata};
use crate::writer::Writer;

/// The logging facade.
///
/// Each level method stamps a record with the current UTC time and the
/// configured identity, then runs it through the write pipeline. The `_with`
/// variants attach structured metadata; the plain variants attach none.
pub struct Recorder {
    writer: Writer,
}

impl Recorder {
    /// Create a recorder from an explicit configuration.
    ///
    /// Fails only when the log directory cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            writer: Writer::new(config)?,
        })
    }

    /// Create a recorder configured from `LOG_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env())
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        self.writer.config()
    }

    fn log(&self, level: Level, message: &str, metadata: Metadata) -> Result<()> {
        let record = LogRecord::new(self.config().identity.clone(), level, message, metadata);
        self.writer.write(&record)
    }

    /// Log at debug severity.
    pub fn debug(&self, message: &str) -> Result<()> {
        self.log(Level::Debug, message, Metadata::new())
    }

    /// Log at debug severity with metadata.
    pub fn debug_with(&self, message: &str, metadata: Metadata) -> Result<()> {
        self.log(Level::Debug, message, metadata)
    }

    /// Log at info severity.
    pub fn info(&self, message: &str) -> Result<()> {
        self.log(Level::Info, message, Metadata::new())
    }

    /// Log at info severity with metadata.
    pub fn info_with(&self, message: &str, metadata: Metadata) -> Result<()> {
        self.log(Level::Info, message, metadata)
    }

    /// Log at warn severity.
    pub fn warn(&self, message: &str) -> Result<()> {
        self.log(Level::Warn, message, Metadata::new())
    }

    /// Log at warn severity with metadata.
    pub fn warn_with(&self, message: &str, metadata: Metadata) -> Result<()> {
        self.log(Level::Warn, message, metadata)
    }

    /// Log at error severity.
    pub fn error(&self, message: &str) -> Result<()> {
        self.log(Level::Error, message, Metadata::new())
    }

    /// Log at error severity with metadata.
    pub fn error_with(&self, message: &str, metadata: Metadata) -> Result<()> {
        self.log(Level::Error, message, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format;
    use crate::router::RoutingMode;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn recorder(log_dir: &Path) -> Recorder {
        let mut config = Config::default();
        config.log_dir = log_dir.to_path_buf();
        config.identity = "facade-test".to_string();
        config.level = Level::Debug;
        config.console = false;
        Recorder::new(config).unwrap()
    }

    #[test]
    fn test_each_level_appends_once() {
        let temp_dir = TempDir::new().unwrap();
        let recorder = recorder(temp_dir.path());

        recorder.debug("d").unwrap();
        recorder.info("i").unwrap();
        recorder.warn("w").unwrap();
        recorder.error("e").unwrap();

        let content = fs::read_to_string(temp_dir.path().join("combined.log")).unwrap();
        let levels: Vec<_> = content
            .lines()
            .map(|l| format::parse(l).unwrap().level)
            .collect();
        assert_eq!(
            levels,
            vec![Level::Debug, Level::Info, Level::Warn, Level::Error]
        );
    }

    #[test]
    fn test_metadata_round_trips_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let recorder = recorder(temp_dir.path());

        let mut meta = Metadata::new();
        meta.insert("request_id".to_string(), json!("abc-123"));
        meta.insert("status".to_string(), json!(502));
        recorder.error_with("upstream failed", meta.clone()).unwrap();

        let content = fs::read_to_string(temp_dir.path().join("combined.log")).unwrap();
        let parsed = format::parse(content.lines().next().unwrap()).unwrap();
        assert_eq!(parsed.identity, "facade-test");
        assert_eq!(parsed.message, "upstream failed");
        assert_eq!(parsed.metadata, meta);
    }

    #[test]
    fn test_error_never_reaches_info_debug_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.log_dir = temp_dir.path().to_path_buf();
        config.identity = "facade-test".to_string();
        config.level = Level::Debug;
        config.console = false;
        config.routing = RoutingMode::ErrorWarn;
        let recorder = Recorder::new(config).unwrap();

        recorder.error("bad").unwrap();
        recorder.debug("fine").unwrap();

        assert!(!fs::read_to_string(temp_dir.path().join("info_debug.log"))
            .unwrap()
            .contains("bad"));
        assert!(!fs::read_to_string(temp_dir.path().join("errors.log"))
            .unwrap()
            .contains("fine"));
    }

    #[test]
    fn test_independent_recorders_do_not_share_state() {
        let temp_a = TempDir::new().unwrap();
        let temp_b = TempDir::new().unwrap();

        let a = recorder(temp_a.path());
        let mut config = Config::default();
        config.log_dir = temp_b.path().to_path_buf();
        config.identity = "other".to_string();
        config.level = Level::Error;
        config.console = false;
        let b = Recorder::new(config).unwrap();

        a.info("to a").unwrap();
        b.info("suppressed").unwrap();

        assert!(temp_a.path().join("combined.log").exists());
        assert!(!temp_b.path().join("combined.log").exists());
    }
}
