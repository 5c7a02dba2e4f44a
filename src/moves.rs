//! Move representation and notation.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::position::{Position, parse_coord};

/// A single turn: one piece travels from `from` to `to`, capturing every
/// piece in `captured` on the way.
///
/// A multi-jump chain is one move. Two moves are equal when their `from`
/// and `to` match; the capture list is not part of the identity, so a move
/// typed by a player can be looked up among the generated ones.
#[derive(Clone, Debug)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// Captured squares, in capture order.
    pub captured: Vec<Position>,
}

impl Move {
    /// A non-capturing move.
    pub fn simple(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            captured: Vec::new(),
        }
    }

    pub fn capture(from: Position, to: Position, captured: Vec<Position>) -> Self {
        Self { from, to, captured }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

/// Parse `c3-d4`, `c3xe5`, or `c3 d4`.
///
/// The parsed move carries no captures; resolve it against the legal moves
/// to recover them.
pub fn parse_move(s: &str) -> Result<Move, ParseError> {
    let trimmed = s.trim();
    let parts: Vec<&str> = trimmed
        .split(|c: char| c == '-' || c == 'x' || c == 'X' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    let [from, to] = parts.as_slice() else {
        return Err(ParseError::InvalidMove(s.to_string()));
    };
    let from = parse_coord(from).map_err(|_| ParseError::InvalidMove(s.to_string()))?;
    let to = parse_coord(to).map_err(|_| ParseError::InvalidMove(s.to_string()))?;
    Ok(Move::simple(from, to))
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s)
    }
}
