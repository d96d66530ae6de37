//! Strongly-typed identifiers for players, point values, and board cells.
//!
//! A board is addressed by `(round, category, value)`. Round and category
//! are positional indices; the value is one of the five fixed point values.
//! Keeping these as distinct types prevents a raw `u16` dollar amount from
//! being passed where a slot index is expected.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// One of the two players at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum PlayerId {
    /// The first player (left podium).
    Player1,
    /// The second player (right podium).
    Player2,
}

impl PlayerId {
    /// Both players in podium order.
    pub const ALL: [Self; 2] = [Self::Player1, Self::Player2];

    /// Stable key used for persistence and the view layer.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Player1 => "player1",
            Self::Player2 => "player2",
        }
    }

    /// Display name shown until the host sets one.
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::Player1 => "Player 1",
            Self::Player2 => "Player 2",
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PlayerId {
    type Err = ParseError;

    /// Accepts `player1` / `player2` (any case) or the bare podium number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "player1" | "1" => Ok(Self::Player1),
            "player2" | "2" => Ok(Self::Player2),
            _ => Err(ParseError::Player(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Point values
// ---------------------------------------------------------------------------

/// A cell's dollar value: one of 100, 200, 300, 400, or 500.
///
/// Serialized as the plain number. Deserializing any other number fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "u16", into = "u16")]
#[ts(export, export_to = "bindings/")]
pub struct PointValue(u16);

impl PointValue {
    /// The five values in ascending order (top row first).
    pub const ALL: [Self; 5] = [Self(100), Self(200), Self(300), Self(400), Self(500)];

    /// Build a point value, rejecting anything outside the fixed set.
    pub const fn new(amount: u16) -> Result<Self, ParseError> {
        match amount {
            100 | 200 | 300 | 400 | 500 => Ok(Self(amount)),
            other => Err(ParseError::PointValue(other)),
        }
    }

    /// The dollar amount.
    pub const fn amount(self) -> u16 {
        self.0
    }

    /// Row position on the board, `0..5`.
    pub const fn slot(self) -> usize {
        match self.0 {
            100 => 0,
            200 => 1,
            300 => 2,
            400 => 3,
            _ => 4,
        }
    }

    /// The amount as a signed score delta.
    pub fn as_delta(self) -> i64 {
        i64::from(self.0)
    }
}

impl TryFrom<u16> for PointValue {
    type Error = ParseError;

    fn try_from(amount: u16) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<PointValue> for u16 {
    fn from(value: PointValue) -> Self {
        value.0
    }
}

impl fmt::Display for PointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl FromStr for PointValue {
    type Err = ParseError;

    /// Accepts `300` or `$300`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('$');
        let amount = digits
            .parse::<u16>()
            .ok()
            .ok_or_else(|| ParseError::PointValueText(s.to_owned()))?;
        Self::new(amount)
    }
}

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

/// One question slot on the board: `(round, category, value)`.
///
/// The unit of "used" tracking during play. Ordering is by round, then
/// category, then value, so a sorted set reads top-left to bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CellId {
    /// Index into the game's rounds.
    pub round: usize,
    /// Index into the round's five categories.
    pub category: usize,
    /// Point value of the row.
    pub value: PointValue,
}

impl CellId {
    /// Create a cell identifier.
    pub const fn new(round: usize, category: usize, value: PointValue) -> Self {
        Self {
            round,
            category,
            value,
        }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.round, self.category, self.value.amount())
    }
}

impl FromStr for CellId {
    type Err = ParseError;

    /// Parses the compact `round-category-value` form, e.g. `0-2-300`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseError::CellId(s.to_owned());
        let mut parts = s.trim().splitn(3, '-');
        let round = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        let category = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        let amount: u16 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        let value = PointValue::new(amount).ok().ok_or_else(bad)?;
        Ok(Self::new(round, category, value))
    }
}
