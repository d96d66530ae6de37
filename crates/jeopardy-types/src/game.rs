//! The root game state: rounds, play position, scores, used cells, settings.
//!
//! [`Game`] is the canonical in-memory state owned by the store in
//! `jeopardy-core`. Field names serialize in camelCase because the same
//! JSON is consumed by the browser view.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::board::Round;
use crate::ids::{CellId, PlayerId};

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Running totals for both players. Scores may go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Scores {
    /// First player's total.
    #[serde(default)]
    #[ts(type = "number")]
    pub player1: i64,
    /// Second player's total.
    #[serde(default)]
    #[ts(type = "number")]
    pub player2: i64,
}

impl Scores {
    /// The total for `player`.
    pub const fn get(&self, player: PlayerId) -> i64 {
        match player {
            PlayerId::Player1 => self.player1,
            PlayerId::Player2 => self.player2,
        }
    }

    /// Mutable access to the total for `player`.
    pub const fn get_mut(&mut self, player: PlayerId) -> &mut i64 {
        match player {
            PlayerId::Player1 => &mut self.player1,
            PlayerId::Player2 => &mut self.player2,
        }
    }

    /// The player ahead, or `None` on a tie.
    pub fn leader(&self) -> Option<PlayerId> {
        match self.player1.cmp(&self.player2) {
            core::cmp::Ordering::Greater => Some(PlayerId::Player1),
            core::cmp::Ordering::Less => Some(PlayerId::Player2),
            core::cmp::Ordering::Equal => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// User audio preferences. Survive a game reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Settings {
    /// Play a tone on game events.
    #[serde(alias = "sfx")]
    pub sfx_enabled: bool,
    /// Play background music.
    #[serde(alias = "music")]
    pub music_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx_enabled: true,
            music_enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// Complete game state.
///
/// Invariants maintained by the store: `rounds` is never empty and
/// `current_round_index < rounds.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Game {
    /// Boards in play order.
    pub rounds: Vec<Round>,
    /// Round currently shown on the play screen.
    #[serde(alias = "currentRound")]
    pub current_round_index: usize,
    /// Player totals.
    pub scores: Scores,
    /// Cells already opened during play.
    pub used_cells: BTreeSet<CellId>,
    /// Audio preferences.
    pub settings: Settings,
}

impl Game {
    /// A fresh game: one blank round, zero scores, default settings.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// A fresh game that keeps the given preferences.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            rounds: vec![Round::new(1)],
            current_round_index: 0,
            scores: Scores::default(),
            used_cells: BTreeSet::new(),
            settings,
        }
    }

    /// The round at `index`.
    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    /// The round currently in play.
    pub fn active_round(&self) -> Option<&Round> {
        self.rounds.get(self.current_round_index)
    }

    /// Number of rounds on the schedule.
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Whether `cell` has been opened.
    pub fn is_cell_used(&self, cell: &CellId) -> bool {
        self.used_cells.contains(cell)
    }

    /// Number of unopened cells left in round `index`.
    pub fn cells_remaining(&self, index: usize) -> usize {
        let total = crate::board::CATEGORY_COUNT.saturating_mul(crate::board::VALUE_COUNT);
        let used = self.used_cells.iter().filter(|c| c.round == index).count();
        total.saturating_sub(used)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use crate::ids::PointValue;

    #[test]
    fn new_game_has_one_blank_round() {
        let game = Game::new();
        assert_eq!(game.round_count(), 1);
        assert_eq!(game.current_round_index, 0);
        assert_eq!(game.scores, Scores::default());
        assert!(game.used_cells.is_empty());
        assert!(game.settings.sfx_enabled);
        assert!(game.settings.music_enabled);
        assert_eq!(game.active_round().map(|r| r.name.as_str()), Some("Round 1"));
    }

    #[test]
    fn scores_address_each_player() {
        let mut scores = Scores::default();
        *scores.get_mut(PlayerId::Player2) -= 300;
        *scores.get_mut(PlayerId::Player1) += 100;
        assert_eq!(scores.get(PlayerId::Player1), 100);
        assert_eq!(scores.get(PlayerId::Player2), -300);
        assert_eq!(scores.leader(), Some(PlayerId::Player1));
        assert_eq!(Scores::default().leader(), None);
    }

    #[test]
    fn cells_remaining_counts_only_that_round() {
        let mut game = Game::new();
        let value = PointValue::new(200).unwrap();
        game.used_cells.insert(CellId::new(0, 1, value));
        game.used_cells.insert(CellId::new(1, 1, value));
        assert_eq!(game.cells_remaining(0), 24);
    }

    #[test]
    fn game_json_uses_camel_case() {
        let json = serde_json::to_value(Game::new()).unwrap();
        assert!(json.get("currentRoundIndex").is_some());
        assert!(json.get("usedCells").is_some());
        assert_eq!(json["settings"]["sfxEnabled"], serde_json::json!(true));
    }

    #[test]
    fn settings_accept_short_aliases() {
        let settings: Settings =
            serde_json::from_str(r#"{"sfx": false, "music": true}"#).unwrap();
        assert!(!settings.sfx_enabled);
        assert!(settings.music_enabled);
    }
}
