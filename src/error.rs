//! Error types for log calls and recorder construction

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the recorder.
///
/// Configuration problems never appear here: a missing or invalid option is
/// silently replaced by its default. Filesystem failures, by contrast, always
/// propagate to the caller of the level method; there is no internal retry.
#[derive(Debug, Error)]
pub enum RecorderError {
    /// The log directory could not be created at initialization.
    #[error("failed to create log directory {}", dir.display())]
    DirectoryCreate {
        /// Directory that could not be created
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Archiving the current managed file failed.
    ///
    /// The triggering log call still attempts its append against the original
    /// (possibly oversized) file, so the message is not lost when only the
    /// rename failed.
    #[error("failed to rotate log file {}", path.display())]
    Rotation {
        /// Managed file that could not be renamed
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Appending the rendered line failed.
    ///
    /// The message is not retried or buffered; it may already have reached
    /// the console.
    #[error("failed to append to log file {}", path.display())]
    Append {
        /// Managed file that could not be written
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, RecorderError>;
