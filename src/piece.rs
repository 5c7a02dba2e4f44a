//! Pieces, owners, and the movement direction table.

use std::fmt;

use crate::constants::{BOARD_SIZE, KING_VALUE, MAN_VALUE};
use crate::position::{DIAGONALS, Direction, Position};

/// One of the two sides.
///
/// The human starts on rows 0..3 and moves toward increasing rows; the
/// computer starts on rows 5..8 and moves toward decreasing rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Row on which this side's men are promoted.
    pub fn promotion_row(self) -> i32 {
        match self {
            Player::Human => BOARD_SIZE - 1,
            Player::Computer => 0,
        }
    }

    /// Rows a man of this side has advanced when standing on `row`.
    pub fn progress(self, row: i32) -> i32 {
        match self {
            Player::Human => row,
            Player::Computer => BOARD_SIZE - 1 - row,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => write!(f, "human"),
            Player::Computer => write!(f, "computer"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Man,
    King,
}

impl PieceKind {
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Man => MAN_VALUE,
            PieceKind::King => KING_VALUE,
        }
    }
}

const HUMAN_FORWARD: [Direction; 2] = [DIAGONALS[0], DIAGONALS[1]];
const COMPUTER_FORWARD: [Direction; 2] = [DIAGONALS[2], DIAGONALS[3]];

/// Directions a piece of `kind` owned by `owner` moves and captures along.
pub fn directions(kind: PieceKind, owner: Player) -> &'static [Direction] {
    match (kind, owner) {
        (PieceKind::Man, Player::Human) => &HUMAN_FORWARD,
        (PieceKind::Man, Player::Computer) => &COMPUTER_FORWARD,
        (PieceKind::King, _) => &DIAGONALS,
    }
}

/// Identity of a piece, unique within one board and stable while the piece lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub owner: Player,
    pub position: Position,
}

impl Piece {
    #[inline]
    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }

    pub fn directions(&self) -> &'static [Direction] {
        directions(self.kind, self.owner)
    }

    /// Diagram character: `o`/`O` for the human, `x`/`X` for the computer.
    pub fn symbol(&self) -> char {
        match (self.owner, self.kind) {
            (Player::Human, PieceKind::Man) => 'o',
            (Player::Human, PieceKind::King) => 'O',
            (Player::Computer, PieceKind::Man) => 'x',
            (Player::Computer, PieceKind::King) => 'X',
        }
    }
}
