//! Position evaluation and alpha-beta minimax search.
//!
//! Scores are always from the computer's point of view: positive favors the
//! computer, negative favors the human. The computer is the maximizing side.
//!
//! Every ply explores its own clone of the board, so the search keeps no
//! state between branches or between calls. There is no transposition table
//! and no move ordering; for a fixed board and depth the result is
//! deterministic.

use tracing::{debug, info};

use crate::board::Board;
use crate::constants::{
    ADVANCE_BONUS, CHAIN_BONUS, DEFAULT_DEPTH, EDGE_BONUS_KING, EDGE_BONUS_MAN, MOBILITY_WEIGHT,
    THREAT_KING, THREAT_MAN, WIN_SCORE,
};
use crate::moves::Move;
use crate::piece::{Piece, PieceKind, Player};

/// Outcome of a root search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, `None` if the computer has no legal move
    pub best_move: Option<Move>,
    /// Score of the best move (or the terminal score when there is none)
    pub score: i32,
    /// Number of positions visited
    pub nodes: u64,
}

/// Minimax engine playing the computer side.
#[derive(Debug, Clone)]
pub struct Engine {
    depth: u32,
    nodes: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl Engine {
    pub fn new(depth: u32) -> Self {
        Self { depth, nodes: 0 }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.depth = depth;
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Pick the computer's move on `board`.
    pub fn best_move(&mut self, board: &Board) -> Option<Move> {
        self.search_root(board).best_move
    }

    /// Search every root move of the computer and keep the strictly best one.
    ///
    /// Ties go to the move generated first.
    pub fn search_root(&mut self, board: &Board) -> SearchResult {
        self.nodes = 0;
        let moves = board.legal_moves(Player::Computer);
        if moves.is_empty() {
            return SearchResult {
                best_move: None,
                score: -WIN_SCORE,
                nodes: 0,
            };
        }

        let child_depth = self.depth.saturating_sub(1);
        let mut best_score = i32::MIN;
        let mut best_move = None;

        for mv in moves {
            let mut child = board.clone();
            child.apply_move(&mv);
            let score = self.alpha_beta(&child, child_depth, i32::MIN, i32::MAX, false);
            debug!(%mv, score, "root move");

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
        }

        if let Some(mv) = &best_move {
            info!(%mv, score = best_score, nodes = self.nodes, "selected move");
        }
        SearchResult {
            best_move,
            score: best_score,
            nodes: self.nodes,
        }
    }

    /// Alpha-beta minimax from `board` with `depth` plies left.
    ///
    /// `maximizing` means the computer is to move.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        if let Some(score) = terminal_score(board) {
            return score;
        }
        if depth == 0 {
            return evaluate(board);
        }

        let mover = if maximizing {
            Player::Computer
        } else {
            Player::Human
        };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for mv in board.legal_moves(mover) {
            let mut child = board.clone();
            child.apply_move(&mv);
            let score = self.alpha_beta(&child, depth - 1, alpha, beta, !maximizing);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Pick the computer's move on `board`, searching `depth` plies.
pub fn best_move(board: &Board, depth: u32) -> Option<Move> {
    Engine::new(depth).best_move(board)
}

/// Score of a finished position, `None` while both sides can move.
///
/// The computer is checked first, so a board where neither side can move
/// scores as a loss for the computer.
pub fn terminal_score(board: &Board) -> Option<i32> {
    if board.legal_moves(Player::Computer).is_empty() {
        Some(-WIN_SCORE)
    } else if board.legal_moves(Player::Human).is_empty() {
        Some(WIN_SCORE)
    } else {
        None
    }
}

/// Static evaluation of `board` from the computer's point of view.
pub fn evaluate(board: &Board) -> i32 {
    let computer_moves = board.legal_moves(Player::Computer);
    if computer_moves.is_empty() {
        return -WIN_SCORE;
    }
    let human_moves = board.legal_moves(Player::Human);
    if human_moves.is_empty() {
        return WIN_SCORE;
    }

    let mut score = 0;
    for piece in board.pieces() {
        let value = piece.kind.value() + positional_bonus(piece);
        score += signed(piece.owner, value);
    }

    score += (computer_moves.len() as i32 - human_moves.len() as i32) * MOBILITY_WEIGHT;
    score += capture_threat(board, &computer_moves) - capture_threat(board, &human_moves);
    score
}

#[inline]
fn signed(owner: Player, value: i32) -> i32 {
    match owner {
        Player::Computer => value,
        Player::Human => -value,
    }
}

/// Advancement and edge-safety bonus of a single piece.
fn positional_bonus(piece: &Piece) -> i32 {
    let mut bonus = 0;
    if piece.kind == PieceKind::Man {
        bonus += piece.owner.progress(piece.position.row) * ADVANCE_BONUS;
    }
    if piece.position.on_side_edge() {
        bonus += match piece.kind {
            PieceKind::Man => EDGE_BONUS_MAN,
            PieceKind::King => EDGE_BONUS_KING,
        };
    }
    bonus
}

/// Value of the captures currently on offer in `moves`.
fn capture_threat(board: &Board, moves: &[Move]) -> i32 {
    moves
        .iter()
        .filter(|mv| mv.is_capture())
        .map(|mv| {
            let taken: i32 = mv
                .captured
                .iter()
                .filter_map(|&pos| board.piece_at(pos))
                .map(|p| match p.kind {
                    PieceKind::Man => THREAT_MAN,
                    PieceKind::King => THREAT_KING,
                })
                .sum();
            let count = mv.captured.len() as i32;
            if count > 1 {
                taken + count * CHAIN_BONUS
            } else {
                taken
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::parse_coord;

    fn sq(s: &str) -> crate::position::Position {
        parse_coord(s).unwrap()
    }

    #[test]
    fn test_opening_is_balanced() {
        // The layout is point-symmetric, so every term cancels.
        assert_eq!(evaluate(&Board::new()), 0);
    }

    #[test]
    fn test_terminal_scores() {
        let mut board = Board::empty();
        board.place(PieceKind::Man, Player::Computer, sq("e6"));
        assert_eq!(evaluate(&board), WIN_SCORE);
        assert_eq!(terminal_score(&board), Some(WIN_SCORE));

        let mut board = Board::empty();
        board.place(PieceKind::Man, Player::Human, sq("b3"));
        assert_eq!(evaluate(&board), -WIN_SCORE);
        assert_eq!(terminal_score(&Board::new()), None);
    }

    #[test]
    fn test_material_and_position_terms() {
        // Computer king on d5 (no edge), human man on a2 (edge, progress 1).
        let mut board = Board::empty();
        board.place(PieceKind::King, Player::Computer, sq("d5"));
        board.place(PieceKind::Man, Player::Human, sq("a2"));
        let computer = board.legal_moves(Player::Computer).len() as i32;
        let human = board.legal_moves(Player::Human).len() as i32;
        let expected = 300 - (100 + 3 + 15) + (computer - human) * 10;
        assert_eq!(evaluate(&board), expected);
    }

    #[test]
    fn test_king_edge_and_computer_advance_terms() {
        // Computer king on a4 (edge), computer man on e6 (progress 2), human
        // man on d2 (progress 1). No captures are on offer.
        let mut board = Board::empty();
        board.place(PieceKind::King, Player::Computer, sq("a4"));
        board.place(PieceKind::Man, Player::Computer, sq("e6"));
        board.place(PieceKind::Man, Player::Human, sq("d2"));

        // King: b5 c6 d7 e8 and b3 c2 d1. Man: d5 f5. Human: c3 e3.
        assert_eq!(board.legal_moves(Player::Computer).len(), 9);
        assert_eq!(board.legal_moves(Player::Human).len(), 2);

        let material = (300 + 8) + (100 + 2 * 3) - (100 + 3);
        let mobility = (9 - 2) * 10;
        let threat = 0;
        assert_eq!(evaluate(&board), material + mobility + threat);
        assert_eq!(evaluate(&board), 381);
    }

    #[test]
    fn test_capture_threat_counts() {
        // Human b3 can take c4 and nothing more.
        let mut board = Board::empty();
        board.place(PieceKind::Man, Player::Human, sq("b3"));
        board.place(PieceKind::Man, Player::Computer, sq("c4"));
        board.place(PieceKind::Man, Player::Computer, sq("h7"));
        let human_moves = board.legal_moves(Player::Human);
        assert_eq!(capture_threat(&board, &human_moves), THREAT_MAN);

        // A double jump over two men: 2 * 40 + 2 * 20.
        let mut board = Board::empty();
        board.place(PieceKind::Man, Player::Human, sq("b3"));
        board.place(PieceKind::Man, Player::Computer, sq("c4"));
        board.place(PieceKind::King, Player::Computer, sq("e6"));
        let human_moves = board.legal_moves(Player::Human);
        assert_eq!(
            capture_threat(&board, &human_moves),
            THREAT_MAN + THREAT_KING + 2 * CHAIN_BONUS
        );
    }

    #[test]
    fn test_forced_capture_is_played() {
        // e6xc4 is the computer's only legal move.
        let mut board = Board::empty();
        board.place(PieceKind::Man, Player::Computer, sq("e6"));
        board.place(PieceKind::Man, Player::Computer, sq("h7"));
        board.place(PieceKind::Man, Player::Human, sq("d5"));
        board.place(PieceKind::Man, Player::Human, sq("a2"));
        let mv = best_move(&board, 2).unwrap();
        assert_eq!(mv.from, sq("e6"));
        assert_eq!(mv.to, sq("c4"));
        assert_eq!(mv.captured, vec![sq("d5")]);
    }

    #[test]
    fn test_no_move_when_lost() {
        let mut board = Board::empty();
        board.place(PieceKind::Man, Player::Human, sq("b3"));
        let mut engine = Engine::default();
        let result = engine.search_root(&board);
        assert!(result.best_move.is_none());
        assert_eq!(result.score, -WIN_SCORE);
    }

    #[test]
    fn test_node_count_reported() {
        let mut engine = Engine::new(2);
        let result = engine.search_root(&Board::new());
        assert!(result.best_move.is_some());
        assert!(result.nodes > 0);
        assert_eq!(engine.nodes(), result.nodes);
    }
}
