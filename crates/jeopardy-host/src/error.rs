//! Error types for the console host binary.
//!
//! [`HostError`] wraps every failure that can stop the host before or
//! during the session. Command errors are not here: they are reported to
//! the player and the session continues.

/// Top-level error for the console host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: jeopardy_core::config::ConfigError,
    },

    /// The data directory could not be opened.
    #[error("storage error: {source}")]
    Storage {
        /// The underlying storage error.
        #[from]
        source: jeopardy_core::StorageError,
    },

    /// Reading commands or writing replies failed.
    #[error("console I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
