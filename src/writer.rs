//! Write pipeline
//!
//! Orchestrates one log call: threshold gate, console echo, routing, the
//! rotation check, and the file append. The rotation check and the append run
//! under a per-path lock so concurrent callers cannot both observe "rotation
//! due" or append to a file that is mid-rename.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;

use crate::config::Config;
use crate::error::{RecorderError, Result};
use crate::format;
use crate::record::LogRecord;
use crate::rotation;
use crate::router::{self, ManagedPaths};

/// Appends rendered records to the managed files.
///
/// Holds the immutable configuration and one lock per distinct managed path;
/// no other state survives between calls.
pub struct Writer {
    config: Config,
    paths: ManagedPaths,
    locks: HashMap<PathBuf, Mutex<()>>,
}

impl Writer {
    /// Create a writer, creating the log directory if needed.
    ///
    /// A log directory that cannot be created is the one fatal configuration
    /// outcome.
    pub fn new(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.log_dir).map_err(|source| RecorderError::DirectoryCreate {
            dir: config.log_dir.clone(),
            source,
        })?;

        let paths = config.managed_paths();
        let mut locks = HashMap::new();
        for path in [&paths.combined, &paths.error_warn, &paths.info_debug] {
            locks.entry(path.clone()).or_insert_with(|| Mutex::new(()));
        }

        Ok(Self {
            config,
            paths,
            locks,
        })
    }

    /// The configuration this writer was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline for one record.
    ///
    /// Records below the threshold are dropped before any side effect,
    /// console echo included. A failed rotation does not lose the message:
    /// the append still runs against the original file and the rotation error
    /// is returned only when the append itself succeeded.
    pub fn write(&self, record: &LogRecord) -> Result<()> {
        if record.level.rank() < self.config.level.rank() {
            return Ok(());
        }

        let line = format::render(record);
        if self.config.console {
            println!("{line}");
        }

        let path = router::route(record.level, self.config.routing, &self.paths);
        let _guard = self
            .locks
            .get(path)
            .map(|lock| lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner()));

        // Rotation is checked immediately before the append, never after.
        let mut rotation_error = None;
        if rotation::should_rotate(path, self.config.rotation, self.config.max_size, Utc::now()) {
            if let Err(source) = rotation::rotate(path) {
                rotation_error = Some(RecorderError::Rotation {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        let append = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| writeln!(file, "{line}"));
        if let Err(source) = append {
            return Err(RecorderError::Append {
                path: path.to_path_buf(),
                source,
            });
        }

        match rotation_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
