//! The game-state store.
//!
//! [`GameStore`] owns the canonical [`Game`] plus the setup editor's round
//! index, validates every mutation, notifies listeners, and writes a
//! snapshot to its [`KeyValueStore`] after each change.
//!
//! # Atomicity
//!
//! Every mutating method performs all lookups and validation before
//! writing a single field. On error the state is untouched and no event
//! fires.
//!
//! # Persistence
//!
//! Saving is fire-and-forget: a storage failure is logged at `warn` and the
//! in-memory change stands. Loading never fails the caller either; a bad
//! blob is logged and the current state kept.

use jeopardy_types::{
    Category, CellId, Game, GameEvent, PlayerId, PointValue, QuestionEntry, Round, Scores,
    Settings,
};

use crate::config::JeopardyConfig;
use crate::error::GameError;
use crate::listener::GameListener;
use crate::persist::{self, Snapshot};
use crate::readiness::Readiness;
use crate::sample;
use crate::storage::KeyValueStore;

/// Construction parameters for a [`GameStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Storage key for the game snapshot.
    pub game_key: String,
    /// Upper bound for [`GameStore::set_round_count`], if any.
    pub max_rounds: Option<usize>,
    /// Preferences for a game with nothing saved.
    pub default_settings: Settings,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from(&JeopardyConfig::default())
    }
}

impl From<&JeopardyConfig> for StoreOptions {
    fn from(config: &JeopardyConfig) -> Self {
        Self {
            game_key: config.storage.game_key.clone(),
            max_rounds: config.game.max_rounds,
            default_settings: Settings {
                sfx_enabled: config.game.default_sfx,
                music_enabled: config.game.default_music,
            },
        }
    }
}

/// The clue handed back when a cell is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealedCell {
    /// Which cell was opened.
    pub cell: CellId,
    /// Clue and response.
    pub entry: QuestionEntry,
    /// Points at stake.
    pub value: PointValue,
    /// The cell had not been opened before.
    pub first_time: bool,
}

/// Owner of the game state.
pub struct GameStore<S: KeyValueStore> {
    game: Game,
    setup_round_index: usize,
    storage: S,
    options: StoreOptions,
    listeners: Vec<Box<dyn GameListener>>,
}

impl<S: KeyValueStore> GameStore<S> {
    /// A store with a fresh game. Nothing is read from `storage`.
    pub fn new(storage: S, options: StoreOptions) -> Self {
        Self {
            game: Game::with_settings(options.default_settings),
            setup_round_index: 0,
            storage,
            options,
            listeners: Vec::new(),
        }
    }

    /// A store resumed from whatever `storage` holds.
    pub fn open(storage: S, options: StoreOptions) -> Self {
        let mut store = Self::new(storage, options);
        store.load();
        store
    }

    /// Register a listener for subsequent events.
    pub fn add_listener(&mut self, listener: Box<dyn GameListener>) {
        self.listeners.push(listener);
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// The full game state.
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// All rounds in order.
    pub fn rounds(&self) -> &[Round] {
        &self.game.rounds
    }

    /// The round on the play screen.
    pub fn active_round(&self) -> Option<&Round> {
        self.game.active_round()
    }

    /// Index of the round on the play screen.
    pub const fn active_round_index(&self) -> usize {
        self.game.current_round_index
    }

    /// The round open in the setup editor.
    pub fn setup_round(&self) -> Option<&Round> {
        self.game.round(self.setup_round_index)
    }

    /// Index of the round open in the setup editor.
    pub const fn setup_round_index(&self) -> usize {
        self.setup_round_index
    }

    /// Current totals.
    pub const fn scores(&self) -> Scores {
        self.game.scores
    }

    /// Audio preferences.
    pub const fn settings(&self) -> Settings {
        self.game.settings
    }

    /// Construction parameters.
    pub const fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// The backing storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Whether a cell has been opened. Unknown cells are simply unused.
    pub fn is_cell_used(&self, round: usize, category: usize, value: PointValue) -> bool {
        self.game.is_cell_used(&CellId::new(round, category, value))
    }

    /// Check every slot on every board.
    pub fn all_questions_filled(&self) -> Readiness {
        Readiness::check(&self.game)
    }

    // -----------------------------------------------------------------------
    // Setup
    // -----------------------------------------------------------------------

    /// Grow or shrink the schedule to exactly `count` rounds.
    ///
    /// New rounds are blank and labelled `Round {k}`; surplus rounds are
    /// dropped from the end. Both round indices are clamped afterwards.
    /// Calling twice with the same count changes nothing the second time.
    pub fn set_round_count(&mut self, count: usize) -> Result<(), GameError> {
        if count == 0 {
            return Err(GameError::NoRounds);
        }
        if let Some(max) = self.options.max_rounds
            && count > max
        {
            return Err(GameError::InvalidRoundCount {
                requested: count,
                max,
            });
        }

        let rounds = &mut self.game.rounds;
        while rounds.len() < count {
            let number = rounds.len().saturating_add(1);
            rounds.push(Round::new(number));
        }
        rounds.truncate(count);
        self.clamp_indices();

        tracing::debug!(count, "Round count set");
        self.commit(&GameEvent::BoardChanged);
        Ok(())
    }

    /// Open round `index` in the setup editor.
    pub fn set_setup_round(&mut self, index: usize) -> Result<(), GameError> {
        self.check_round(index)?;
        self.setup_round_index = index;
        self.commit(&GameEvent::BoardChanged);
        Ok(())
    }

    /// Rename a column. An empty name restores the positional placeholder.
    ///
    /// The column's five clues stay with it.
    pub fn rename_category(
        &mut self,
        round: usize,
        category: usize,
        new_name: &str,
    ) -> Result<(), GameError> {
        let name = if new_name.is_empty() {
            Category::default_name(category)
        } else {
            new_name.to_owned()
        };

        let column = self.category_mut(round, category)?;
        tracing::debug!(
            round,
            category,
            from = column.name.as_str(),
            to = name.as_str(),
            "Category renamed"
        );
        column.name = name;
        self.commit(&GameEvent::BoardChanged);
        Ok(())
    }

    /// Write a clue. Both texts are trimmed and must be non-empty.
    pub fn set_question(
        &mut self,
        round: usize,
        category: usize,
        value: PointValue,
        question: &str,
        answer: &str,
    ) -> Result<(), GameError> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() {
            return Err(GameError::EmptyField { field: "question" });
        }
        if answer.is_empty() {
            return Err(GameError::EmptyField { field: "answer" });
        }

        let column = self.category_mut(round, category)?;
        *column.entry_mut(value) = QuestionEntry::new(question, answer);

        tracing::debug!(round, category, value = value.amount(), "Question saved");
        self.commit(&GameEvent::QuestionSaved {
            cell: CellId::new(round, category, value),
        });
        Ok(())
    }

    /// Blank a clue. The slot itself remains.
    pub fn clear_question(
        &mut self,
        round: usize,
        category: usize,
        value: PointValue,
    ) -> Result<(), GameError> {
        let column = self.category_mut(round, category)?;
        *column.entry_mut(value) = QuestionEntry::default();

        tracing::debug!(round, category, value = value.amount(), "Question cleared");
        self.commit(&GameEvent::BoardChanged);
        Ok(())
    }

    /// Replace a round's columns with the built-in demo board.
    pub fn load_sample_board(&mut self, round: usize) -> Result<(), GameError> {
        let Some(target) = self.game.rounds.get_mut(round) else {
            return Err(GameError::RoundOutOfRange {
                index: round,
                len: self.game.rounds.len(),
            });
        };
        target.categories = sample::sample_categories();

        tracing::info!(round, "Sample board loaded");
        self.commit(&GameEvent::BoardChanged);
        Ok(())
    }

    /// Leave setup and begin play.
    ///
    /// Refused while any slot is unfilled. Clears opened cells and scores.
    pub fn start_play(&mut self) -> Result<(), GameError> {
        let readiness = self.all_questions_filled();
        if !readiness.ready {
            return Err(GameError::NotReady(readiness));
        }

        self.game.used_cells.clear();
        self.game.scores = Scores::default();

        tracing::info!(rounds = self.game.rounds.len(), "Play started");
        self.commit(&GameEvent::PlayStarted);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Play
    // -----------------------------------------------------------------------

    /// Open a cell and mark it used.
    ///
    /// Opening an already-used cell is allowed and returns the same clue.
    pub fn reveal_cell(
        &mut self,
        round: usize,
        category: usize,
        value: PointValue,
    ) -> Result<RevealedCell, GameError> {
        let entry = self
            .game
            .round(round)
            .and_then(|r| r.category(category))
            .map(|c| c.entry(value).clone())
            .ok_or(GameError::CellNotFound {
                round,
                category,
                value,
            })?;

        let cell = CellId::new(round, category, value);
        let first_time = self.game.used_cells.insert(cell);

        tracing::debug!(%cell, first_time, "Cell revealed");
        self.commit(&GameEvent::QuestionShown { cell });
        Ok(RevealedCell {
            cell,
            entry,
            value,
            first_time,
        })
    }

    /// Show the response of the open clue. Changes no state.
    pub fn reveal_answer(&mut self) {
        self.emit(&GameEvent::AnswerRevealed);
    }

    /// Add `delta` (which may be negative) to a player's total.
    ///
    /// Returns the new total. There is no floor; totals saturate only at
    /// the limits of `i64`.
    pub fn adjust_score(&mut self, player: PlayerId, delta: i64) -> i64 {
        let score = self.game.scores.get_mut(player);
        *score = score.saturating_add(delta);
        let total = *score;

        tracing::debug!(%player, delta, total, "Score adjusted");
        self.commit(&GameEvent::ScoreChanged {
            player,
            delta,
            total,
        });
        total
    }

    /// Switch the play screen to round `index`.
    pub fn set_active_round(&mut self, index: usize) -> Result<(), GameError> {
        self.check_round(index)?;
        self.game.current_round_index = index;
        self.commit(&GameEvent::ActiveRoundChanged { index });
        Ok(())
    }

    /// Start over with one blank round, keeping audio preferences.
    pub fn reset(&mut self) {
        self.game = Game::with_settings(self.game.settings);
        self.setup_round_index = 0;

        tracing::info!("Game reset");
        self.commit(&GameEvent::GameReset);
    }

    // -----------------------------------------------------------------------
    // Settings and player names
    // -----------------------------------------------------------------------

    /// Flip sound effects. Returns the new value.
    pub fn toggle_sfx(&mut self) -> bool {
        self.game.settings.sfx_enabled = !self.game.settings.sfx_enabled;
        self.commit_settings();
        self.game.settings.sfx_enabled
    }

    /// Flip music. Returns the new value.
    pub fn toggle_music(&mut self) -> bool {
        self.game.settings.music_enabled = !self.game.settings.music_enabled;
        self.commit_settings();
        self.game.settings.music_enabled
    }

    /// The display name for `player`, or its default when none is stored.
    pub fn player_name(&self, player: PlayerId) -> String {
        match self.storage.get(&name_key(player)) {
            Ok(Some(name)) if !name.trim().is_empty() => name,
            Ok(_) => player.default_name().to_owned(),
            Err(e) => {
                tracing::warn!(%player, error = %e, "Failed to read player name");
                player.default_name().to_owned()
            }
        }
    }

    /// Store a display name. A blank name reverts to the default.
    pub fn set_player_name(&mut self, player: PlayerId, name: &str) {
        let key = name_key(player);
        let name = name.trim();
        let result = if name.is_empty() {
            self.storage.remove(&key)
        } else {
            self.storage.set(&key, name)
        };
        if let Err(e) = result {
            tracing::warn!(%player, error = %e, "Failed to save player name");
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// The state as a persistable snapshot.
    pub fn serialize(&self) -> Snapshot {
        Snapshot {
            game_state: self.game.clone(),
            current_setup_round: self.setup_round_index,
        }
    }

    /// Replace the state from a JSON blob.
    ///
    /// Fields are reconciled one by one over a fresh default game. Returns
    /// `false`, leaving state untouched, if the blob is unusable as a whole.
    pub fn deserialize(&mut self, blob: &str) -> bool {
        match persist::restore(blob, self.options.default_settings) {
            Ok(restored) => {
                self.game = restored.snapshot.game_state;
                self.setup_round_index = restored.snapshot.current_setup_round;
                self.enforce_round_cap();
                tracing::info!(
                    rounds = self.game.rounds.len(),
                    repaired = restored.repaired.len(),
                    "Game state restored"
                );
                self.emit(&GameEvent::Restored);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable saved game");
                false
            }
        }
    }

    /// Read the saved snapshot from storage, if any.
    pub fn load(&mut self) -> bool {
        match self.storage.get(&self.options.game_key) {
            Ok(Some(blob)) => self.deserialize(&blob),
            Ok(None) => {
                tracing::info!(key = self.options.game_key.as_str(), "No saved game");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read saved game");
                false
            }
        }
    }

    /// Write the current snapshot to storage. Failures are logged only.
    pub fn save(&mut self) {
        let json = match self.serialize().to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize game state");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.options.game_key, &json) {
            tracing::warn!(error = %e, "Failed to save game state");
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn clamp_indices(&mut self) {
        let last = self.game.rounds.len().saturating_sub(1);
        self.game.current_round_index = self.game.current_round_index.min(last);
        self.setup_round_index = self.setup_round_index.min(last);
    }

    /// Drop restored rounds beyond the configured cap.
    fn enforce_round_cap(&mut self) {
        let Some(max) = self.options.max_rounds else {
            return;
        };
        let found = self.game.rounds.len();
        if found > max {
            tracing::warn!(found, max, "Saved game exceeds round cap, truncating");
            self.game.rounds.truncate(max.max(1));
            self.clamp_indices();
        }
    }

    fn check_round(&self, index: usize) -> Result<(), GameError> {
        if index < self.game.rounds.len() {
            Ok(())
        } else {
            Err(GameError::RoundOutOfRange {
                index,
                len: self.game.rounds.len(),
            })
        }
    }

    fn category_mut(
        &mut self,
        round: usize,
        category: usize,
    ) -> Result<&mut Category, GameError> {
        self.game
            .rounds
            .get_mut(round)
            .and_then(|r| r.category_mut(category))
            .ok_or(GameError::CategoryNotFound { round, category })
    }

    fn commit_settings(&mut self) {
        let Settings {
            sfx_enabled,
            music_enabled,
        } = self.game.settings;
        tracing::debug!(sfx_enabled, music_enabled, "Settings changed");
        self.commit(&GameEvent::SettingsChanged {
            sfx_enabled,
            music_enabled,
        });
    }

    /// Persist, then notify.
    fn commit(&mut self, event: &GameEvent) {
        self.save();
        self.emit(event);
    }

    fn emit(&mut self, event: &GameEvent) {
        for listener in &mut self.listeners {
            listener.on_event(event, &self.game);
        }
    }
}

fn name_key(player: PlayerId) -> String {
    format!("{}Name", player.key())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use jeopardy_types::SoundCue;

    use super::*;
    use crate::error::ErrorKind;
    use crate::listener::NoOpListener;
    use crate::storage::{MemoryStorage, StorageError};

    fn value(amount: u16) -> PointValue {
        PointValue::new(amount).unwrap()
    }

    fn store() -> GameStore<MemoryStorage> {
        GameStore::new(MemoryStorage::new(), StoreOptions::default())
    }

    fn fill_all(store: &mut GameStore<MemoryStorage>) {
        for round in 0..store.rounds().len() {
            for category in 0..5 {
                for v in PointValue::ALL {
                    store.set_question(round, category, v, "Q", "A").unwrap();
                }
            }
        }
    }

    /// Records every event it sees.
    struct Recorder(Rc<RefCell<Vec<GameEvent>>>);

    impl GameListener for Recorder {
        fn on_event(&mut self, event: &GameEvent, _game: &Game) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    fn recorded(store: &mut GameStore<MemoryStorage>) -> Rc<RefCell<Vec<GameEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        store.add_listener(Box::new(Recorder(Rc::clone(&log))));
        log
    }

    /// Storage that refuses every write.
    struct BrokenStorage;

    impl KeyValueStore for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::InvalidKey("broken".to_owned()))
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_owned()))
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_owned()))
        }
    }

    // --- round count --------------------------------------------------------

    #[test]
    fn round_count_is_idempotent() {
        let mut store = store();
        for n in [1, 3, 6, 10, 2] {
            store.set_round_count(n).unwrap();
            let once = store.serialize();
            store.set_round_count(n).unwrap();
            assert_eq!(store.serialize(), once);
            assert_eq!(store.rounds().len(), n);
        }
    }

    #[test]
    fn new_rounds_are_blank_and_numbered() {
        let mut store = store();
        store.set_round_count(3).unwrap();
        let names: Vec<&str> = store.rounds().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Round 1", "Round 2", "Round 3"]);
        assert_eq!(store.rounds()[2], Round::new(3));
    }

    #[test]
    fn shrinking_clamps_indices() {
        let mut store = store();
        store.set_round_count(4).unwrap();
        store.set_active_round(3).unwrap();
        store.set_setup_round(2).unwrap();

        store.set_round_count(2).unwrap();
        assert_eq!(store.active_round_index(), 1);
        assert_eq!(store.setup_round_index(), 1);
    }

    #[test]
    fn round_count_has_no_default_cap() {
        let mut store = store();
        for n in 1..=10 {
            store.set_round_count(n).unwrap();
            assert_eq!(store.rounds().len(), n);
        }
        assert_eq!(store.rounds()[9].name, "Round 10");
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let mut store = store();
        let err = store.set_round_count(0).unwrap_err();
        assert_eq!(err, GameError::NoRounds);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(store.rounds().len(), 1);
    }

    #[test]
    fn configured_cap_is_enforced() {
        let options = StoreOptions {
            max_rounds: Some(3),
            ..StoreOptions::default()
        };
        let mut store = GameStore::new(MemoryStorage::new(), options);
        store.set_round_count(3).unwrap();
        let err = store.set_round_count(4).unwrap_err();
        assert_eq!(err, GameError::InvalidRoundCount { requested: 4, max: 3 });
        assert_eq!(store.rounds().len(), 3);
    }

    #[test]
    fn restored_rounds_respect_configured_cap() {
        let mut wide = store();
        wide.set_round_count(8).unwrap();
        wide.set_active_round(7).unwrap();
        wide.set_setup_round(6).unwrap();
        let blob = wide.serialize().to_json().unwrap();

        let options = StoreOptions {
            max_rounds: Some(6),
            ..StoreOptions::default()
        };
        let mut capped = GameStore::new(MemoryStorage::new(), options);
        assert!(capped.deserialize(&blob));
        assert_eq!(capped.rounds().len(), 6);
        assert_eq!(capped.active_round_index(), 5);
        assert_eq!(capped.setup_round_index(), 5);

        let once = capped.serialize();
        capped.set_round_count(6).unwrap();
        assert_eq!(capped.serialize(), once);
    }

    #[test]
    fn used_marks_of_dropped_rounds_return_on_regrow() {
        let mut store = store();
        store.set_round_count(3).unwrap();
        store.reveal_cell(2, 1, value(400)).unwrap();

        store.set_round_count(1).unwrap();
        assert!(store.is_cell_used(2, 1, value(400)));
        assert!(store.reveal_cell(2, 1, value(400)).is_err());

        store.set_round_count(3).unwrap();
        assert_eq!(store.rounds()[2], Round::new(3));
        assert!(store.is_cell_used(2, 1, value(400)));
        assert!(!store.reveal_cell(2, 1, value(400)).unwrap().first_time);
    }

    // --- categories -----------------------------------------------------------

    #[test]
    fn rename_keeps_questions_with_the_column() {
        let mut store = store();
        store.set_question(0, 0, value(100), "Q1", "A1").unwrap();
        store.set_question(0, 0, value(500), "Q5", "A5").unwrap();
        let before = store.rounds()[0].categories[0].questions.clone();

        store.rename_category(0, 0, "SCIENCE").unwrap();

        let round = &store.rounds()[0];
        assert_eq!(round.categories[0].name, "SCIENCE");
        assert_eq!(round.questions_for("SCIENCE"), Some(&before));
        assert!(round.category_by_name("Category 1").is_none());
    }

    #[test]
    fn empty_rename_restores_placeholder() {
        let mut store = store();
        store.rename_category(0, 3, "MOVIES").unwrap();
        store.rename_category(0, 3, "").unwrap();
        assert_eq!(store.rounds()[0].categories[3].name, "Category 4");
    }

    #[test]
    fn rename_unknown_category_is_not_found() {
        let mut store = store();
        let err = store.rename_category(0, 5, "X").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = store.rename_category(2, 0, "X").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    // --- questions ------------------------------------------------------------

    #[test]
    fn set_then_reveal() {
        let mut store = store();
        store.set_question(0, 0, value(100), "Q", "A").unwrap();

        let shown = store.reveal_cell(0, 0, value(100)).unwrap();
        assert_eq!(shown.entry, QuestionEntry::new("Q", "A"));
        assert_eq!(shown.value, value(100));
        assert!(shown.first_time);
        assert!(store.is_cell_used(0, 0, value(100)));

        let again = store.reveal_cell(0, 0, value(100)).unwrap();
        assert_eq!(again.entry, shown.entry);
        assert!(!again.first_time);
        assert_eq!(store.game().used_cells.len(), 1);
    }

    #[test]
    fn empty_answer_leaves_previous_entry() {
        let mut store = store();
        store.set_question(0, 1, value(200), "Old Q", "Old A").unwrap();

        let err = store
            .set_question(0, 1, value(200), "New Q", "   ")
            .unwrap_err();
        assert_eq!(err, GameError::EmptyField { field: "answer" });
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            store.rounds()[0].categories[1].entry(value(200)),
            &QuestionEntry::new("Old Q", "Old A")
        );
    }

    #[test]
    fn question_text_is_trimmed() {
        let mut store = store();
        store.set_question(0, 2, value(300), "  Q  ", "\tA\n").unwrap();
        assert_eq!(
            store.rounds()[0].categories[2].entry(value(300)),
            &QuestionEntry::new("Q", "A")
        );
    }

    #[test]
    fn clear_resets_entry_in_place() {
        let mut store = store();
        store.set_question(0, 4, value(400), "Q", "A").unwrap();
        store.clear_question(0, 4, value(400)).unwrap();
        assert_eq!(
            store.rounds()[0].categories[4].entry(value(400)),
            &QuestionEntry::default()
        );
    }

    #[test]
    fn reveal_unknown_cell_is_not_found() {
        let mut store = store();
        let err = store.reveal_cell(1, 0, value(100)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = store.reveal_cell(0, 5, value(100)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(store.game().used_cells.is_empty());
    }

    // --- readiness and play -----------------------------------------------------

    #[test]
    fn readiness_tracks_every_round() {
        let mut store = store();
        assert!(!store.all_questions_filled().ready);

        fill_all(&mut store);
        assert!(store.all_questions_filled().ready);

        store.set_round_count(2).unwrap();
        let readiness = store.all_questions_filled();
        assert!(!readiness.ready);
        assert_eq!(readiness.missing.len(), 25);
        assert!(readiness.missing.iter().all(|m| m.round_name == "Round 2"));
    }

    #[test]
    fn start_play_requires_full_board() {
        let mut store = store();
        let err = store.start_play().unwrap_err();
        assert!(matches!(err, GameError::NotReady(ref r) if r.missing.len() == 25));

        fill_all(&mut store);
        store.adjust_score(PlayerId::Player1, 500);
        store.reveal_cell(0, 0, value(100)).unwrap();

        store.start_play().unwrap();
        assert_eq!(store.scores(), Scores::default());
        assert!(store.game().used_cells.is_empty());
    }

    #[test]
    fn sample_board_makes_round_ready() {
        let mut store = store();
        store.load_sample_board(0).unwrap();
        assert!(store.all_questions_filled().ready);
        assert_eq!(store.rounds()[0].categories[0].name, "SCIENCE");
        assert!(store.load_sample_board(1).is_err());
    }

    #[test]
    fn scores_go_up_and_down() {
        let mut store = store();
        store.adjust_score(PlayerId::Player1, 200);
        let total = store.adjust_score(PlayerId::Player1, -100);
        assert_eq!(total, 100);
        assert_eq!(store.scores().player1, 100);

        assert_eq!(store.adjust_score(PlayerId::Player2, -300), -300);
    }

    #[test]
    fn scores_saturate_instead_of_wrapping() {
        let mut store = store();
        store.adjust_score(PlayerId::Player1, i64::MAX);
        assert_eq!(store.adjust_score(PlayerId::Player1, 1), i64::MAX);
    }

    #[test]
    fn active_round_must_exist() {
        let mut store = store();
        let err = store.set_active_round(1).unwrap_err();
        assert_eq!(err, GameError::RoundOutOfRange { index: 1, len: 1 });
        assert_eq!(err.kind(), ErrorKind::OutOfRange);

        store.set_round_count(2).unwrap();
        store.set_active_round(1).unwrap();
        assert_eq!(store.active_round().map(|r| r.name.as_str()), Some("Round 2"));
    }

    // --- reset and settings -----------------------------------------------------

    #[test]
    fn reset_keeps_settings_only() {
        let mut store = store();
        store.set_round_count(3).unwrap();
        store.set_setup_round(2).unwrap();
        store.set_question(0, 0, value(100), "Q", "A").unwrap();
        store.reveal_cell(0, 0, value(100)).unwrap();
        store.adjust_score(PlayerId::Player2, 400);
        assert!(!store.toggle_sfx());
        assert!(!store.toggle_music());

        store.reset();

        assert_eq!(store.rounds(), &[Round::new(1)]);
        assert_eq!(store.scores(), Scores::default());
        assert!(store.game().used_cells.is_empty());
        assert_eq!(store.active_round_index(), 0);
        assert_eq!(store.setup_round_index(), 0);
        assert!(!store.settings().sfx_enabled);
        assert!(!store.settings().music_enabled);
    }

    #[test]
    fn toggles_flip_back() {
        let mut store = store();
        assert!(!store.toggle_sfx());
        assert!(store.toggle_sfx());
        assert!(store.settings().music_enabled);
    }

    #[test]
    fn player_names_default_and_persist() {
        let mut store = store();
        assert_eq!(store.player_name(PlayerId::Player1), "Player 1");

        store.set_player_name(PlayerId::Player1, "  Ada ");
        assert_eq!(store.player_name(PlayerId::Player1), "Ada");
        assert_eq!(
            store.storage().get("player1Name").unwrap().as_deref(),
            Some("Ada")
        );
        assert_eq!(store.player_name(PlayerId::Player2), "Player 2");

        store.set_player_name(PlayerId::Player1, "");
        assert_eq!(store.player_name(PlayerId::Player1), "Player 1");
    }

    // --- persistence --------------------------------------------------------------

    #[test]
    fn mutations_are_saved() {
        let mut store = store();
        store.adjust_score(PlayerId::Player1, 300);

        let blob = store.storage().get("pixelJeopardyGame").unwrap().unwrap();
        let mut fresh = GameStore::new(MemoryStorage::new(), StoreOptions::default());
        assert!(fresh.deserialize(&blob));
        assert_eq!(fresh.scores().player1, 300);
    }

    #[test]
    fn open_resumes_saved_game() {
        let mut store = store();
        store.set_round_count(2).unwrap();
        store.set_setup_round(1).unwrap();
        store.rename_category(1, 2, "SPORTS").unwrap();
        let expected = store.serialize();

        let resumed = GameStore::open(store.storage().clone(), StoreOptions::default());
        assert_eq!(resumed.serialize(), expected);
        assert_eq!(resumed.setup_round_index(), 1);
    }

    #[test]
    fn full_game_round_trips() {
        let mut store = store();
        store.set_round_count(2).unwrap();
        fill_all(&mut store);
        store.rename_category(1, 4, "GEOGRAPHY").unwrap();
        store.set_active_round(1).unwrap();
        store.reveal_cell(1, 4, value(300)).unwrap();
        store.adjust_score(PlayerId::Player2, -300);
        store.toggle_music();

        let json = store.serialize().to_json().unwrap();
        let mut other = GameStore::new(MemoryStorage::new(), StoreOptions::default());
        assert!(other.deserialize(&json));
        assert_eq!(other.game(), store.game());
        assert_eq!(other.setup_round_index(), store.setup_round_index());
    }

    #[test]
    fn malformed_blob_leaves_state_alone() {
        let mut store = store();
        store.adjust_score(PlayerId::Player1, 100);
        let before = store.serialize();

        assert!(!store.deserialize("{ not json"));
        assert!(!store.deserialize("42"));
        assert_eq!(store.serialize(), before);
    }

    #[test]
    fn storage_failures_do_not_block_play() {
        let mut store = GameStore::new(BrokenStorage, StoreOptions::default());
        assert!(!store.load());
        store.set_question(0, 0, value(100), "Q", "A").unwrap();
        assert_eq!(store.adjust_score(PlayerId::Player1, 100), 100);
        store.set_player_name(PlayerId::Player1, "Ada");
        assert_eq!(store.player_name(PlayerId::Player1), "Player 1");
    }

    // --- events ---------------------------------------------------------------------

    #[test]
    fn one_cue_per_cue_bearing_mutation() {
        let mut store = store();
        store.add_listener(Box::new(NoOpListener));
        let log = recorded(&mut store);

        store.load_sample_board(0).unwrap();
        store.set_question(0, 0, value(100), "Q", "A").unwrap();
        store.start_play().unwrap();
        store.reveal_cell(0, 0, value(100)).unwrap();
        store.reveal_answer();
        store.adjust_score(PlayerId::Player1, 100);
        store.reset();

        let cues: Vec<SoundCue> = log.borrow().iter().filter_map(GameEvent::cue).collect();
        assert_eq!(
            cues,
            vec![
                SoundCue::Save,
                SoundCue::Start,
                SoundCue::Question,
                SoundCue::Reveal,
                SoundCue::Score,
                SoundCue::Reset,
            ]
        );
    }

    #[test]
    fn failed_mutations_emit_nothing() {
        let mut store = store();
        let log = recorded(&mut store);

        assert!(store.set_question(0, 0, value(100), "", "A").is_err());
        assert!(store.reveal_cell(3, 0, value(100)).is_err());
        assert!(store.set_active_round(3).is_err());
        assert!(store.start_play().is_err());

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn listeners_see_updated_state() {
        struct ScoreWatcher(Rc<RefCell<Vec<i64>>>);

        impl GameListener for ScoreWatcher {
            fn on_event(&mut self, event: &GameEvent, game: &Game) {
                if matches!(event, GameEvent::ScoreChanged { .. }) {
                    self.0.borrow_mut().push(game.scores.player2);
                }
            }
        }

        let mut store = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        store.add_listener(Box::new(ScoreWatcher(Rc::clone(&seen))));

        store.adjust_score(PlayerId::Player2, 500);
        store.adjust_score(PlayerId::Player2, -200);
        assert_eq!(*seen.borrow(), vec![500, 300]);
    }
}
