//! Game-state store for Pixel Jeopardy.
//!
//! Owns the authoritative board, scores, and opened cells; validates every
//! edit; saves a snapshot after each change; and tells listeners what
//! happened so the view can redraw and the audio layer can beep.
//!
//! # Modules
//!
//! - [`store`] -- [`GameStore`], the single owner of game state
//! - [`config`] -- Configuration loading from `jeopardy-config.yaml`
//! - [`storage`] -- [`KeyValueStore`] trait with in-memory and file backends
//! - [`persist`] -- Snapshot envelope and tolerant field-by-field restore
//! - [`readiness`] -- Board completeness checks
//! - [`listener`] -- [`GameListener`] hook for views and audio
//! - [`sample`] -- Built-in demo board
//! - [`error`] -- [`GameError`] and its [`ErrorKind`]
//!
//! [`GameStore`]: store::GameStore
//! [`KeyValueStore`]: storage::KeyValueStore
//! [`GameListener`]: listener::GameListener
//! [`GameError`]: error::GameError
//! [`ErrorKind`]: error::ErrorKind

pub mod config;
pub mod error;
pub mod listener;
pub mod persist;
pub mod readiness;
pub mod sample;
pub mod storage;
pub mod store;

// Re-export primary types for convenience.
pub use config::JeopardyConfig;
pub use error::{ErrorKind, GameError};
pub use listener::{CueLogger, GameListener, NoOpListener};
pub use persist::Snapshot;
pub use readiness::{MissingQuestion, Readiness};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};
pub use store::{GameStore, RevealedCell, StoreOptions};
