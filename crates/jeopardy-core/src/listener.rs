//! Hooks for the collaborators that render and play sounds.
//!
//! The store never draws anything. After each successful mutation it hands
//! a [`GameEvent`] and the new state to every registered [`GameListener`];
//! the view re-renders and the audio layer beeps (or stays quiet when
//! `settings.sfx_enabled` is off).

use jeopardy_types::{Game, GameEvent};

/// Callback invoked after each state change.
pub trait GameListener {
    /// Called once per event, after the state has been updated.
    fn on_event(&mut self, event: &GameEvent, game: &Game);
}

/// A listener that ignores everything.
pub struct NoOpListener;

impl GameListener for NoOpListener {
    fn on_event(&mut self, _event: &GameEvent, _game: &Game) {}
}

/// Logs each event's sound cue at debug level, honouring the sfx toggle.
///
/// Stands in for a real audio backend in headless hosts.
pub struct CueLogger;

impl GameListener for CueLogger {
    fn on_event(&mut self, event: &GameEvent, game: &Game) {
        let Some(cue) = event.cue() else {
            return;
        };
        if !game.settings.sfx_enabled {
            return;
        }
        let tone = cue.tone();
        tracing::debug!(
            ?cue,
            frequency_hz = f64::from(tone.frequency_hz),
            duration_ms = tone.duration_ms,
            "Sound cue"
        );
    }
}
