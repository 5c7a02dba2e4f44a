//! Error types for notation parsing and game-session operations.
//!
//! The rules engine itself never fails: move application reports a bool and
//! search returns an `Option`. Errors only arise at the edges, when text is
//! turned into squares, moves, or boards, and when a caller tries to play
//! out of turn.

use thiserror::Error;

use crate::piece::Player;

/// Errors produced while parsing squares, moves, or board diagrams.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Square notation outside `a1`..`h8`.
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    /// Move notation that is not `from-to`, `fromxto`, or `from to`.
    #[error("invalid move notation: {0:?}")]
    InvalidMove(String),

    /// Diagram with the wrong number of rows.
    #[error("board diagram must have 8 rows, found {0}")]
    RowCount(usize),

    /// Diagram row with the wrong number of cells.
    #[error("row {row} of the board diagram must have 8 cells, found {found}")]
    CellCount { row: usize, found: usize },

    /// Unknown cell character.
    #[error("unknown board cell {cell:?} at {square}")]
    UnknownCell { cell: char, square: String },

    /// Piece placed on a light square.
    #[error("piece on light square {0}")]
    LightSquare(String),
}

/// Errors produced by the game session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The game already has a winner.
    #[error("game is over, {winner} won")]
    GameOver { winner: Player },

    /// The requested action belongs to the other side.
    #[error("it is {expected}'s turn")]
    WrongTurn { expected: Player },

    /// The move is not among the legal moves of the side to move.
    #[error("illegal move: {0}")]
    IllegalMove(String),
}
