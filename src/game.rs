//! Game session: a board, the side to move, and the computer opponent.
//!
//! The session enforces turn order and game-over; the board enforces the
//! rules. The human always moves first.

use tracing::debug;

use crate::board::Board;
use crate::constants::DEFAULT_DEPTH;
use crate::error::GameError;
use crate::moves::Move;
use crate::piece::Player;
use crate::position::Position;
use crate::search::Engine;

pub struct Game {
    board: Board,
    to_move: Player,
    engine: Engine,
    plies: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl Game {
    /// A new game from the starting position with the computer searching
    /// `depth` plies.
    pub fn new(depth: u32) -> Self {
        Self {
            board: Board::new(),
            to_move: Player::Human,
            engine: Engine::new(depth),
            plies: 0,
        }
    }

    /// Start over from the starting position, keeping the search depth.
    pub fn reset(&mut self) {
        self.set_position(Board::new(), Player::Human);
    }

    /// Replace the board and the side to move.
    pub fn set_position(&mut self, board: Board, to_move: Player) {
        self.board = board;
        self.to_move = to_move;
        self.plies = 0;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Number of moves played since the last reset.
    pub fn plies(&self) -> usize {
        self.plies
    }

    pub fn depth(&self) -> u32 {
        self.engine.depth()
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.engine.set_depth(depth);
    }

    /// The winner, if the game is over.
    ///
    /// The side to move loses when it has no legal move. Otherwise the board
    /// decides, which covers an opponent left without moves.
    pub fn winner(&self) -> Option<Player> {
        if self.board.legal_moves(self.to_move).is_empty() {
            return Some(self.to_move.opponent());
        }
        self.board.winner()
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.board.count_pieces(player)
    }

    /// Legal moves of the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves(self.to_move)
    }

    /// Squares holding a piece of the side to move that has a legal move.
    pub fn movable_squares(&self) -> Vec<Position> {
        let mut squares: Vec<Position> = Vec::new();
        for mv in self.legal_moves() {
            if !squares.contains(&mv.from) {
                squares.push(mv.from);
            }
        }
        squares
    }

    /// Legal moves of the side to move starting on `square`.
    pub fn moves_from(&self, square: Position) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|mv| mv.from == square)
            .collect()
    }

    /// Play `mv` for the side to move.
    ///
    /// `mv` is matched against the legal moves by its from and to squares;
    /// the generated move, with its captures, is the one applied and
    /// returned.
    pub fn play(&mut self, mv: &Move) -> Result<Move, GameError> {
        if let Some(winner) = self.winner() {
            return Err(GameError::GameOver { winner });
        }
        let legal = self
            .legal_moves()
            .into_iter()
            .find(|candidate| candidate == mv)
            .ok_or_else(|| GameError::IllegalMove(mv.to_string()))?;
        self.commit(&legal);
        Ok(legal)
    }

    /// Let the computer search and play its move.
    ///
    /// Returns `Ok(None)` when the computer has no legal move.
    pub fn play_computer(&mut self) -> Result<Option<Move>, GameError> {
        if let Some(winner) = self.winner() {
            return Err(GameError::GameOver { winner });
        }
        if self.to_move != Player::Computer {
            return Err(GameError::WrongTurn {
                expected: self.to_move,
            });
        }
        let Some(mv) = self.engine.best_move(&self.board) else {
            return Ok(None);
        };
        self.commit(&mv);
        Ok(Some(mv))
    }

    fn commit(&mut self, mv: &Move) {
        let applied = self.board.apply_move(mv);
        debug_assert!(applied, "generated move {mv} starts on an empty square");
        self.plies += 1;
        self.to_move = self.to_move.opponent();
        debug!(%mv, to_move = %self.to_move, plies = self.plies, "move played");
    }
}
