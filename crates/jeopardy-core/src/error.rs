//! Error types for the `jeopardy-core` crate.
//!
//! Every fallible store operation returns [`GameError`]. A failed operation
//! leaves the game state exactly as it was. Persistence problems are not
//! represented here: the store logs and swallows them.

use jeopardy_types::{ParseError, PointValue};

use crate::readiness::Readiness;

/// Broad classification of a [`GameError`], for callers that only need to
/// pick a message style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input was rejected (empty text, bad count, unparseable id).
    Validation,
    /// A referenced round, category, or cell does not exist.
    NotFound,
    /// A round index is outside the schedule.
    OutOfRange,
}

/// Errors from game-state operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The clue or the response is blank.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Which field was blank: `question` or `answer`.
        field: &'static str,
    },

    /// A game needs at least one round.
    #[error("round count must be at least 1")]
    NoRounds,

    /// The requested round count exceeds the configured cap.
    #[error("round count {requested} exceeds the configured maximum of {max}")]
    InvalidRoundCount {
        /// Count asked for.
        requested: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Play cannot start while clues are missing.
    #[error("{} question(s) still missing", .0.missing.len())]
    NotReady(Readiness),

    /// No category at that position (or no such round).
    #[error("no category {category} in round {round}")]
    CategoryNotFound {
        /// Round index.
        round: usize,
        /// Category index.
        category: usize,
    },

    /// The referenced cell does not exist.
    #[error("no cell at round {round}, category {category}, {value}")]
    CellNotFound {
        /// Round index.
        round: usize,
        /// Category index.
        category: usize,
        /// Point value.
        value: PointValue,
    },

    /// A round index is outside the schedule.
    #[error("round {index} is out of range ({len} round(s))")]
    RoundOutOfRange {
        /// Index asked for.
        index: usize,
        /// Number of rounds.
        len: usize,
    },

    /// An identifier failed to parse.
    #[error("invalid input: {0}")]
    Parse(#[from] ParseError),
}

impl GameError {
    /// The broad category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyField { .. }
            | Self::NoRounds
            | Self::InvalidRoundCount { .. }
            | Self::NotReady(_)
            | Self::Parse(_) => ErrorKind::Validation,
            Self::CategoryNotFound { .. } | Self::CellNotFound { .. } => ErrorKind::NotFound,
            Self::RoundOutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }
}
