//! Board structures: rounds, categories, and question entries.
//!
//! A [`Round`] always holds exactly [`CATEGORY_COUNT`] categories and each
//! [`Category`] always holds one [`QuestionEntry`] per [`PointValue`]. The
//! fixed-size arrays make a malformed board unrepresentable.
//!
//! Categories are addressed by position. The name is a label; two
//! categories may share one without their questions colliding.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::PointValue;

/// Number of categories (columns) on every board.
pub const CATEGORY_COUNT: usize = 5;

/// Number of point values (rows) in every category.
pub const VALUE_COUNT: usize = PointValue::ALL.len();

// ---------------------------------------------------------------------------
// QuestionEntry
// ---------------------------------------------------------------------------

/// The clue and its expected response. Empty strings mean "not filled in".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuestionEntry {
    /// Clue text read to the players.
    #[serde(default)]
    pub question: String,
    /// Expected response shown on reveal.
    #[serde(default)]
    pub answer: String,
}

impl QuestionEntry {
    /// Create an entry from clue and response text.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Both the clue and the response contain non-whitespace text.
    pub fn is_filled(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// A named column of five questions at increasing values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Category {
    /// Column header.
    pub name: String,
    /// Entries indexed by [`PointValue::slot`].
    pub questions: [QuestionEntry; VALUE_COUNT],
}

impl Category {
    /// Create a category with the given name and no questions filled in.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            questions: Default::default(),
        }
    }

    /// The placeholder header for column `index`: `Category {index + 1}`.
    pub fn default_name(index: usize) -> String {
        format!("Category {}", index.saturating_add(1))
    }

    /// A column named with its positional placeholder.
    pub fn placeholder(index: usize) -> Self {
        Self::new(Self::default_name(index))
    }

    /// The entry at `value`.
    #[allow(clippy::indexing_slicing)] // slot() is always < VALUE_COUNT
    pub fn entry(&self, value: PointValue) -> &QuestionEntry {
        &self.questions[value.slot()]
    }

    /// Mutable access to the entry at `value`.
    #[allow(clippy::indexing_slicing)] // slot() is always < VALUE_COUNT
    pub fn entry_mut(&mut self, value: PointValue) -> &mut QuestionEntry {
        &mut self.questions[value.slot()]
    }

    /// Iterate `(value, entry)` pairs from $100 down to $500.
    pub fn entries(&self) -> impl Iterator<Item = (PointValue, &QuestionEntry)> {
        PointValue::ALL.into_iter().zip(self.questions.iter())
    }

    /// Every entry has both a clue and a response.
    pub fn is_complete(&self) -> bool {
        self.questions.iter().all(QuestionEntry::is_filled)
    }
}

// ---------------------------------------------------------------------------
// Round
// ---------------------------------------------------------------------------

/// One full board of five categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Round {
    /// Tab label, e.g. `Round 2`.
    pub name: String,
    /// The five columns, left to right.
    pub categories: [Category; CATEGORY_COUNT],
}

impl Round {
    /// A blank board labelled `Round {number}` with placeholder categories.
    ///
    /// `number` is one-based, matching the label the host sees.
    pub fn new(number: usize) -> Self {
        Self {
            name: format!("Round {number}"),
            categories: core::array::from_fn(Category::placeholder),
        }
    }

    /// The category at `index`, if it exists.
    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    /// Mutable access to the category at `index`.
    pub fn category_mut(&mut self, index: usize) -> Option<&mut Category> {
        self.categories.get_mut(index)
    }

    /// The first category whose header equals `name`.
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// The questions under the first category named `name`.
    pub fn questions_for(&self, name: &str) -> Option<&[QuestionEntry; VALUE_COUNT]> {
        self.category_by_name(name).map(|c| &c.questions)
    }

    /// The five headers in column order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Every entry of every category is filled in.
    pub fn is_complete(&self) -> bool {
        self.categories.iter().all(Category::is_complete)
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new(1)
    }
}
