//! Events emitted by the store for the view and audio collaborators.
//!
//! Every state change the players can see produces one [`GameEvent`]. The
//! subset that has an audible cue maps to a [`SoundCue`]; the audio layer
//! turns that into a [`Tone`] and stays silent when sound effects are off.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{CellId, PlayerId};

/// Semantic sound tag. One is emitted per cue-bearing mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum SoundCue {
    /// A clue was opened.
    Question,
    /// The response was shown.
    Reveal,
    /// A score changed.
    Score,
    /// A clue was saved during setup.
    Save,
    /// Play started.
    Start,
    /// The game was reset.
    Reset,
}

/// A single beep: pitch and length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Tone {
    /// Oscillator frequency in hertz.
    pub frequency_hz: f32,
    /// How long the tone sounds, in milliseconds.
    pub duration_ms: u32,
}

impl SoundCue {
    /// The stock tone for this cue.
    pub const fn tone(self) -> Tone {
        let (frequency_hz, duration_ms) = match self {
            Self::Question => (659.25, 300), // E5
            Self::Reveal => (523.25, 200),   // C5
            Self::Score => (783.99, 150),    // G5
            Self::Save => (880.0, 100),      // A5
            Self::Start => (1046.5, 400),    // C6
            Self::Reset => (220.0, 300),     // A3
        };
        Tone {
            frequency_hz,
            duration_ms,
        }
    }
}

/// Something changed in the game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GameEvent {
    /// A clue was opened during play.
    QuestionShown {
        /// The opened cell.
        cell: CellId,
    },
    /// The host revealed the response of the open clue.
    AnswerRevealed,
    /// A player's total changed.
    ScoreChanged {
        /// Whose score.
        player: PlayerId,
        /// Signed amount applied.
        #[ts(type = "number")]
        delta: i64,
        /// New total.
        #[ts(type = "number")]
        total: i64,
    },
    /// A clue was written during setup.
    QuestionSaved {
        /// The edited cell.
        cell: CellId,
    },
    /// Setup finished and play began.
    PlayStarted,
    /// Everything except settings was wiped.
    GameReset,
    /// Board layout or text changed during setup (rounds, categories, clears).
    BoardChanged,
    /// The play screen switched rounds.
    ActiveRoundChanged {
        /// New round index.
        index: usize,
    },
    /// Audio preferences changed.
    SettingsChanged {
        /// Sound effects on.
        sfx_enabled: bool,
        /// Music on.
        music_enabled: bool,
    },
    /// State was replaced from persisted data.
    Restored,
}

impl GameEvent {
    /// The sound this event should make, if any.
    pub const fn cue(&self) -> Option<SoundCue> {
        match self {
            Self::QuestionShown { .. } => Some(SoundCue::Question),
            Self::AnswerRevealed => Some(SoundCue::Reveal),
            Self::ScoreChanged { .. } => Some(SoundCue::Score),
            Self::QuestionSaved { .. } => Some(SoundCue::Save),
            Self::PlayStarted => Some(SoundCue::Start),
            Self::GameReset => Some(SoundCue::Reset),
            Self::BoardChanged
            | Self::ActiveRoundChanged { .. }
            | Self::SettingsChanged { .. }
            | Self::Restored => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn every_cue_has_a_distinct_pitch() {
        let cues = [
            SoundCue::Question,
            SoundCue::Reveal,
            SoundCue::Score,
            SoundCue::Save,
            SoundCue::Start,
            SoundCue::Reset,
        ];
        let mut pitches: Vec<u32> = cues
            .iter()
            .map(|c| c.tone().frequency_hz.to_bits())
            .collect();
        pitches.sort_unstable();
        pitches.dedup();
        assert_eq!(pitches.len(), cues.len());
    }

    #[test]
    fn setup_only_events_are_silent() {
        assert_eq!(GameEvent::BoardChanged.cue(), None);
        assert_eq!(GameEvent::Restored.cue(), None);
        assert_eq!(GameEvent::GameReset.cue(), Some(SoundCue::Reset));
    }

    #[test]
    fn event_json_is_tagged() {
        let json = serde_json::to_value(GameEvent::ActiveRoundChanged { index: 2 }).unwrap();
        assert_eq!(json["type"], "active_round_changed");
        assert_eq!(json["index"], 2);
    }
}
