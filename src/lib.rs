//! avlogs - leveled, file-backed logging with rotation
//!
//! Log calls tagged with a severity are rendered with a UTC timestamp and an
//! identity label, optionally echoed to the console, and appended to one of
//! up to three managed files. Files rotate by size or by a daily, weekly, or
//! monthly schedule; rotation renames the current file to a timestamped
//! `.bak` archive and the next append starts a fresh file.
//!
//! ```no_run
//! use avlogs::{Config, Recorder};
//!
//! # fn main() -> avlogs::Result<()> {
//! let recorder = Recorder::new(Config::default())?;
//! recorder.info("application started")?;
//! recorder.warn("low memory")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod record;
pub mod recorder;
pub mod rotation;
pub mod router;
mod writer;

pub use config::Config;
pub use error::{RecorderError, Result};
pub use record::{Level, LogRecord, Metadata};
pub use recorder::Recorder;
pub use rotation::RotationStrategy;
pub use router::RoutingMode;
