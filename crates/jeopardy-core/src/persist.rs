//! Snapshot serialization and field-by-field restore.
//!
//! The persisted blob is JSON of the form
//! `{"gameState": Game, "currentSetupRound": n}`. Writing is a plain serde
//! round-trip. Reading is forgiving: each field is reconciled on its own
//! against a fresh default game, so one damaged field never costs the rest.
//!
//! Restore also accepts blobs written by the browser build, where a round's
//! `categories` is a list of names and `questions` is keyed by category name
//! and then by value, `usedCells` holds `"r-c-v"` strings, and settings use
//! the short `sfx` / `music` keys.

use jeopardy_types::{
    CATEGORY_COUNT, CellId, Game, PointValue, QuestionEntry, Round, Scores, Settings,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Errors that make a blob unusable as a whole.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The blob is not JSON.
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The blob is JSON but not an object.
    #[error("snapshot root must be a JSON object")]
    NotAnObject,
}

/// Everything needed to resume a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Full game state.
    pub game_state: Game,
    /// Round open in the setup editor.
    pub current_setup_round: usize,
}

impl Snapshot {
    /// Render as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; none is expected for well-formed state.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A reconciled snapshot plus the names of fields that fell back to defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    /// The reconciled snapshot, indices already clamped.
    pub snapshot: Snapshot,
    /// Fields that were present but unusable.
    pub repaired: Vec<String>,
}

/// Reconcile `blob` over a fresh game that carries `settings`.
///
/// Present, valid fields override the defaults; absent fields keep them;
/// present but invalid fields keep them and are listed in
/// [`Restored::repaired`].
///
/// # Errors
///
/// Returns [`PersistError`] only when the blob as a whole is unusable.
pub fn restore(blob: &str, settings: Settings) -> Result<Restored, PersistError> {
    let root: Value = serde_json::from_str(blob)?;
    let Value::Object(root) = root else {
        return Err(PersistError::NotAnObject);
    };

    let mut game = Game::with_settings(settings);
    let mut repaired = Vec::new();

    match root.get("gameState") {
        Some(Value::Object(state)) => reconcile_game(&mut game, state, &mut repaired),
        Some(_) => repaired.push("gameState".to_owned()),
        None => {}
    }

    let mut setup_round = 0;
    if let Some(value) = root.get("currentSetupRound") {
        match value.as_u64().and_then(|n| usize::try_from(n).ok()) {
            Some(n) => setup_round = n,
            None => repaired.push("currentSetupRound".to_owned()),
        }
    }

    let last = game.rounds.len().saturating_sub(1);
    game.current_round_index = game.current_round_index.min(last);
    // Cells of truncated rounds stay marked; only impossible columns go.
    game.used_cells.retain(|cell| cell.category < CATEGORY_COUNT);

    for field in &repaired {
        tracing::warn!(field = field.as_str(), "Persisted field unusable, using default");
    }

    Ok(Restored {
        snapshot: Snapshot {
            game_state: game,
            current_setup_round: setup_round.min(last),
        },
        repaired,
    })
}

fn reconcile_game(game: &mut Game, state: &Map<String, Value>, repaired: &mut Vec<String>) {
    if let Some(value) = state.get("rounds") {
        match value.as_array() {
            Some(items) if !items.is_empty() => {
                game.rounds = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        round_from_value(item, i).unwrap_or_else(|| {
                            repaired.push(format!("rounds[{i}]"));
                            Round::new(i.saturating_add(1))
                        })
                    })
                    .collect();
            }
            Some(_) => {}
            None => repaired.push("rounds".to_owned()),
        }
    }

    if let Some(value) = state
        .get("currentRoundIndex")
        .or_else(|| state.get("currentRound"))
    {
        match value.as_u64().and_then(|n| usize::try_from(n).ok()) {
            Some(n) => game.current_round_index = n,
            None => repaired.push("currentRoundIndex".to_owned()),
        }
    }

    if let Some(value) = state.get("scores") {
        match Scores::deserialize(value) {
            Ok(scores) => game.scores = scores,
            Err(_) => repaired.push("scores".to_owned()),
        }
    }

    if let Some(value) = state.get("usedCells") {
        match value {
            Value::Array(items) => {
                game.used_cells = items.iter().filter_map(cell_from_value).collect();
            }
            // A JS `Set` stringifies to `{}`.
            Value::Object(map) if map.is_empty() => {}
            _ => repaired.push("usedCells".to_owned()),
        }
    }

    if let Some(value) = state.get("settings") {
        match value.as_object() {
            Some(map) => reconcile_settings(&mut game.settings, map, repaired),
            None => repaired.push("settings".to_owned()),
        }
    }
}

fn reconcile_settings(
    settings: &mut Settings,
    map: &Map<String, Value>,
    repaired: &mut Vec<String>,
) {
    let flag = |long: &str, short: &str| map.get(long).or_else(|| map.get(short));

    if let Some(value) = flag("sfxEnabled", "sfx") {
        match value.as_bool() {
            Some(on) => settings.sfx_enabled = on,
            None => repaired.push("settings.sfxEnabled".to_owned()),
        }
    }
    if let Some(value) = flag("musicEnabled", "music") {
        match value.as_bool() {
            Some(on) => settings.music_enabled = on,
            None => repaired.push("settings.musicEnabled".to_owned()),
        }
    }
}

fn cell_from_value(value: &Value) -> Option<CellId> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Object(_) => CellId::deserialize(value).ok(),
        _ => None,
    }
}

fn round_from_value(value: &Value, position: usize) -> Option<Round> {
    Round::deserialize(value)
        .ok()
        .or_else(|| browser_round(value, position))
}

/// Convert a round in the browser build's name-keyed shape.
fn browser_round(value: &Value, position: usize) -> Option<Round> {
    let obj = value.as_object()?;
    let names = obj.get("categories")?.as_array()?;
    if names.len() != CATEGORY_COUNT {
        return None;
    }
    let questions = obj.get("questions").and_then(Value::as_object);

    let mut round = Round::new(position.saturating_add(1));
    if let Some(name) = obj.get("name").and_then(Value::as_str) {
        name.clone_into(&mut round.name);
    }

    for (category, name) in round.categories.iter_mut().zip(names) {
        let name = name.as_str()?;
        name.clone_into(&mut category.name);

        let Some(by_value) = questions
            .and_then(|q| q.get(name))
            .and_then(Value::as_object)
        else {
            continue;
        };
        for value in PointValue::ALL {
            if let Some(entry) = by_value
                .get(&value.amount().to_string())
                .and_then(|e| QuestionEntry::deserialize(e).ok())
            {
                *category.entry_mut(value) = entry;
            }
        }
    }
    Some(round)
}
