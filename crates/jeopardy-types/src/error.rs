//! Parse errors for the identifier types.

/// Failure to parse an identifier from user input or persisted data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The amount is not one of the five board values.
    #[error("{0} is not a board value (expected 100, 200, 300, 400 or 500)")]
    PointValue(u16),

    /// The text is not a number at all.
    #[error("invalid point value: {0:?}")]
    PointValueText(String),

    /// The text does not name one of the two players.
    #[error("unknown player: {0:?} (expected player1 or player2)")]
    Player(String),

    /// The text is not a `round-category-value` cell id.
    #[error("invalid cell id: {0:?}")]
    CellId(String),
}
