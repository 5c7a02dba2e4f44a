//! Board state and the rules of the game.
//!
//! This module is the only place rule logic lives:
//! - Standard 8x8 starting layout
//! - Simple moves for men (one step forward) and kings (sliding)
//! - Mandatory capture chains, found by depth-first search
//! - Move application with promotion
//! - Terminal detection
//!
//! The board is a plain value. `Clone` copies every piece, so the search can
//! explore a continuation on its own copy without touching sibling branches.

use std::fmt;

use tracing::trace;

use crate::constants::{BOARD_SIZE, START_ROWS};
use crate::error::ParseError;
use crate::moves::Move;
use crate::piece::{Piece, PieceId, PieceKind, Player};
use crate::position::{DIAGONALS, Position};

const CELLS: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

#[derive(Clone, Debug)]
pub struct Board {
    cells: [Option<Piece>; CELLS],
    next_id: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn idx(pos: Position) -> usize {
    (pos.row * BOARD_SIZE + pos.col) as usize
}

impl Board {
    /// A board with the standard starting layout: human men on the dark
    /// squares of rows 0..3, computer men on the dark squares of rows 5..8.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE {
            let owner = if row < START_ROWS {
                Player::Human
            } else if row >= BOARD_SIZE - START_ROWS {
                Player::Computer
            } else {
                continue;
            };
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                if pos.is_dark() {
                    board.place(PieceKind::Man, owner, pos);
                }
            }
        }
        board
    }

    /// A board with no pieces.
    pub fn empty() -> Self {
        Self {
            cells: [None; CELLS],
            next_id: 0,
        }
    }

    /// Put a new piece on `pos`, replacing whatever stood there.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is off the board.
    pub fn place(&mut self, kind: PieceKind, owner: Player, pos: Position) -> PieceId {
        assert!(pos.in_bounds(), "cannot place a piece off the board at {pos:?}");
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.cells[idx(pos)] = Some(Piece {
            id,
            kind,
            owner,
            position: pos,
        });
        id
    }

    /// The piece on `pos`, if any. Off-board positions are always empty.
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[idx(pos)].as_ref()
    }

    #[inline]
    fn is_empty_square(&self, pos: Position) -> bool {
        pos.in_bounds() && self.cells[idx(pos)].is_none()
    }

    /// All pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten()
    }

    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.owner == player)
    }

    pub fn count_pieces(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }

    // =========================================================================
    // Move generation
    // =========================================================================

    /// Every legal move for `player`.
    ///
    /// Captures are mandatory: if any piece can capture, only capture moves
    /// are returned. An empty result means `player` has lost.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        let captures: Vec<Move> = self
            .pieces_of(player)
            .flat_map(|piece| self.captures_for(piece))
            .collect();
        if !captures.is_empty() {
            return captures;
        }
        self.pieces_of(player)
            .flat_map(|piece| self.simple_moves(piece))
            .collect()
    }

    /// All complete capture chains available to `piece`, one move per chain.
    pub fn captures_for(&self, piece: &Piece) -> Vec<Move> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        match piece.kind {
            PieceKind::Man => self.man_captures(piece, piece.position, &mut path, &mut out),
            PieceKind::King => self.king_captures(piece, piece.position, &mut path, &mut out),
        }
        out
    }

    /// Extend a man's chain from `at`. `path` holds the squares captured so far.
    fn man_captures(
        &self,
        piece: &Piece,
        at: Position,
        path: &mut Vec<Position>,
        out: &mut Vec<Move>,
    ) {
        let mut extended = false;
        for &dir in piece.directions() {
            let jump = at.offset(dir, 1);
            let land = at.offset(dir, 2);
            let Some(victim) = self.piece_at(jump) else {
                continue;
            };
            if victim.owner == piece.owner || !self.is_empty_square(land) || path.contains(&jump)
            {
                continue;
            }
            path.push(jump);
            self.man_captures(piece, land, path, out);
            path.pop();
            extended = true;
        }
        if !extended && !path.is_empty() {
            out.push(Move::capture(piece.position, at, path.clone()));
        }
    }

    /// Extend a king's chain from `at`.
    ///
    /// Captured pieces stay on the board for the whole search, so they keep
    /// blocking slides, and the king's origin square stays occupied.
    fn king_captures(
        &self,
        piece: &Piece,
        at: Position,
        path: &mut Vec<Position>,
        out: &mut Vec<Move>,
    ) {
        let mut extended = false;
        for dir in DIAGONALS {
            let mut victim: Option<Position> = None;
            let mut cur = at.offset(dir, 1);
            while cur.in_bounds() {
                match (self.piece_at(cur), victim) {
                    (Some(other), None) => {
                        if other.owner == piece.owner || path.contains(&cur) {
                            break;
                        }
                        victim = Some(cur);
                    }
                    (Some(_), Some(_)) => break,
                    (None, Some(captured)) => {
                        path.push(captured);
                        self.king_captures(piece, cur, path, out);
                        path.pop();
                        extended = true;
                    }
                    (None, None) => {}
                }
                cur = cur.offset(dir, 1);
            }
        }
        if !extended && !path.is_empty() {
            out.push(Move::capture(piece.position, at, path.clone()));
        }
    }

    /// Non-capturing moves of `piece`.
    pub fn simple_moves(&self, piece: &Piece) -> Vec<Move> {
        let from = piece.position;
        let mut moves = Vec::new();
        for &dir in piece.directions() {
            let mut to = from.offset(dir, 1);
            while self.is_empty_square(to) {
                moves.push(Move::simple(from, to));
                if !piece.is_king() {
                    break;
                }
                to = to.offset(dir, 1);
            }
        }
        moves
    }

    // =========================================================================
    // Move application
    // =========================================================================

    /// Play `mv` on this board.
    ///
    /// Removes every captured piece, relocates the moving piece, and promotes
    /// it when it lands on its promotion row. Returns `false` without touching
    /// the board if `mv.from` is empty.
    pub fn apply_move(&mut self, mv: &Move) -> bool {
        if !mv.from.in_bounds() || !mv.to.in_bounds() {
            return false;
        }
        let Some(mut piece) = self.cells[idx(mv.from)].take() else {
            return false;
        };
        for &pos in &mv.captured {
            if pos.in_bounds() && self.cells[idx(pos)].take().is_some() {
                trace!(square = %pos, "captured piece");
            }
        }
        piece.position = mv.to;
        if piece.kind == PieceKind::Man && mv.to.row == piece.owner.promotion_row() {
            piece.kind = PieceKind::King;
            trace!(square = %mv.to, owner = %piece.owner, "promoted to king");
        }
        self.cells[idx(mv.to)] = Some(piece);
        true
    }

    // =========================================================================
    // Game result
    // =========================================================================

    /// The winner, if either side has no legal move.
    ///
    /// Both sides are tested independently of whose turn it is. When neither
    /// side can move the human is reported as the winner, since the computer
    /// is checked first.
    pub fn winner(&self) -> Option<Player> {
        if self.legal_moves(Player::Computer).is_empty() {
            Some(Player::Human)
        } else if self.legal_moves(Player::Human).is_empty() {
            Some(Player::Computer)
        } else {
            None
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    // =========================================================================
    // Diagrams
    // =========================================================================

    /// Parse a board diagram.
    ///
    /// Rows run from rank 8 down to rank 1 and are separated by newlines or
    /// `/`. Cells are `.` (empty), `o`/`O` (human man/king) and `x`/`X`
    /// (computer man/king). Whitespace inside a row is ignored.
    pub fn from_diagram(s: &str) -> Result<Self, ParseError> {
        let rows: Vec<Vec<char>> = s
            .split(['\n', '/'])
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|cells| !cells.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(ParseError::RowCount(rows.len()));
        }

        let mut board = Self::empty();
        for (i, cells) in rows.iter().enumerate() {
            if cells.len() != BOARD_SIZE as usize {
                return Err(ParseError::CellCount {
                    row: i,
                    found: cells.len(),
                });
            }
            let row = BOARD_SIZE - 1 - i as i32;
            for (col, &cell) in cells.iter().enumerate() {
                let pos = Position::new(row, col as i32);
                let (kind, owner) = match cell {
                    '.' => continue,
                    'o' => (PieceKind::Man, Player::Human),
                    'O' => (PieceKind::King, Player::Human),
                    'x' => (PieceKind::Man, Player::Computer),
                    'X' => (PieceKind::King, Player::Computer),
                    _ => {
                        return Err(ParseError::UnknownCell {
                            cell,
                            square: pos.to_string(),
                        });
                    }
                };
                if !pos.is_dark() {
                    return Err(ParseError::LightSquare(pos.to_string()));
                }
                board.place(kind, owner, pos);
            }
        }
        Ok(board)
    }

    /// The board as a `/`-separated diagram, rank 8 first.
    pub fn to_diagram(&self) -> String {
        (0..BOARD_SIZE)
            .rev()
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|col| {
                        self.piece_at(Position::new(row, col))
                            .map_or('.', Piece::symbol)
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..BOARD_SIZE {
                let ch = self
                    .piece_at(Position::new(row, col))
                    .map_or('.', Piece::symbol);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{} ", (b'a' + col as u8) as char)?;
        }
        writeln!(f)
    }
}
