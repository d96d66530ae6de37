//! Shared type definitions for Pixel Jeopardy.
//!
//! This crate is the single source of truth for the game-state model used
//! by the store (`jeopardy-core`) and by the view layer. Types flow to
//! `TypeScript` via `ts-rs` so the browser board renders from the same
//! shapes that are persisted.
//!
//! # Modules
//!
//! - [`ids`] -- Player, point-value, and cell identifiers
//! - [`board`] -- Rounds, categories, and question entries
//! - [`game`] -- The root [`Game`] state, scores, and settings
//! - [`events`] -- Events and sound cues emitted on mutations
//! - [`error`] -- Identifier parse errors

pub mod board;
pub mod error;
pub mod events;
pub mod game;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use board::{CATEGORY_COUNT, Category, QuestionEntry, Round, VALUE_COUNT};
pub use error::ParseError;
pub use events::{GameEvent, SoundCue, Tone};
pub use game::{Game, Scores, Settings};
pub use ids::{CellId, PlayerId, PointValue};
