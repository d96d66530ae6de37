//! Setup completeness check.
//!
//! Play may only start once every clue on every board has both question and
//! answer text. [`Readiness`] reports the verdict along with each missing
//! slot so the host can be told what to fill in.

use core::fmt;

use jeopardy_types::{Game, PointValue};

/// A slot with no clue or no response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingQuestion {
    /// Round label.
    pub round_name: String,
    /// Category header.
    pub category_name: String,
    /// Row value.
    pub value: PointValue,
}

impl fmt::Display for MissingQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.round_name, self.category_name, self.value)
    }
}

/// Result of checking every slot on every board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    /// All slots are filled.
    pub ready: bool,
    /// Unfilled slots, in board order (round, column, row).
    pub missing: Vec<MissingQuestion>,
}

impl Readiness {
    /// Scan `game` for unfilled slots.
    pub fn check(game: &Game) -> Self {
        let missing: Vec<MissingQuestion> = game
            .rounds
            .iter()
            .flat_map(|round| {
                round.categories.iter().flat_map(move |category| {
                    category
                        .entries()
                        .filter(|(_, entry)| !entry.is_filled())
                        .map(move |(value, _)| MissingQuestion {
                            round_name: round.name.clone(),
                            category_name: category.name.clone(),
                            value,
                        })
                })
            })
            .collect();
        Self {
            ready: missing.is_empty(),
            missing,
        }
    }

    /// Human-readable list of the first `limit` gaps, plus a count of the rest.
    pub fn summary(&self, limit: usize) -> String {
        let mut lines: Vec<String> = self
            .missing
            .iter()
            .take(limit)
            .map(ToString::to_string)
            .collect();
        let rest = self.missing.len().saturating_sub(limit);
        if rest > 0 {
            lines.push(format!("... and {rest} more"));
        }
        lines.join("\n")
    }
}
