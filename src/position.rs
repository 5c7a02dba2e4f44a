//! Square coordinates and diagonal directions.
//!
//! A [`Position`] is a plain (row, col) pair. Row 0 is the human's home row,
//! so in algebraic notation `a1` is (0, 0) and `h8` is (7, 7). Play happens
//! only on dark squares, the ones where `row + col` is odd.

use std::fmt;
use std::str::FromStr;

use crate::constants::BOARD_SIZE;
use crate::error::ParseError;

/// A square on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Whether the position lies on the board.
    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Whether the position is a playable (dark) square.
    #[inline]
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// The position `steps` squares away along `dir`. May be off the board.
    #[inline]
    pub fn offset(self, dir: Direction, steps: i32) -> Self {
        Self {
            row: self.row + dir.row * steps,
            col: self.col + dir.col * steps,
        }
    }

    /// Whether the position is on the leftmost or rightmost column.
    #[inline]
    pub fn on_side_edge(self) -> bool {
        self.col == 0 || self.col == BOARD_SIZE - 1
    }
}

/// A diagonal unit vector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Direction {
    pub row: i32,
    pub col: i32,
}

impl Direction {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// The four diagonals, toward increasing rows first.
pub const DIAGONALS: [Direction; 4] = [
    Direction::new(1, -1),
    Direction::new(1, 1),
    Direction::new(-1, -1),
    Direction::new(-1, 1),
];

/// Parse a square in algebraic notation (`a1`..`h8`, case-insensitive).
pub fn parse_coord(s: &str) -> Result<Position, ParseError> {
    let lower = s.trim().to_ascii_lowercase();
    let mut chars = lower.chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(ParseError::InvalidSquare(s.to_string()));
    };
    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return Err(ParseError::InvalidSquare(s.to_string()));
    }
    Ok(Position::new(
        rank as i32 - '1' as i32,
        file as i32 - 'a' as i32,
    ))
}

/// Format a square in algebraic notation.
pub fn str_coord(pos: Position) -> String {
    pos.to_string()
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col as u8) as char;
        write!(f, "{}{}", file, self.row + 1)
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_coord(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_corners() {
        assert_eq!(parse_coord("a1"), Ok(Position::new(0, 0)));
        assert_eq!(parse_coord("H8"), Ok(Position::new(7, 7)));
        assert_eq!(parse_coord("c3"), Ok(Position::new(2, 2)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "a", "a9", "i1", "a10", "11", "aa"] {
            assert!(parse_coord(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_str_coord_roundtrip() {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                assert_eq!(parse_coord(&str_coord(pos)), Ok(pos));
            }
        }
    }

    #[test]
    fn test_dark_squares() {
        assert!(!Position::new(0, 0).is_dark());
        assert!(Position::new(0, 1).is_dark());
        assert!(Position::new(7, 6).is_dark());
    }

    #[test]
    fn test_offset_and_bounds() {
        let pos = Position::new(1, 0);
        assert_eq!(pos.offset(DIAGONALS[1], 2), Position::new(3, 2));
        assert!(!pos.offset(DIAGONALS[0], 1).in_bounds());
        assert!(pos.on_side_edge());
    }
}
