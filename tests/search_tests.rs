//! Search tests: alpha-beta against a plain minimax reference, and
//! determinism of the chosen move.

use checkers_ai::board::Board;
use checkers_ai::moves::Move;
use checkers_ai::piece::{PieceKind, Player};
use checkers_ai::position::parse_coord;
use checkers_ai::random::RandomPlayer;
use checkers_ai::search::{Engine, best_move, evaluate, terminal_score};

// =============================================================================
// Reference minimax
// =============================================================================

/// Unpruned minimax with the same leaf rules as the engine.
fn minimax(board: &Board, depth: u32, maximizing: bool, nodes: &mut u64) -> i32 {
    *nodes += 1;
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
    let scores = board.legal_moves(mover).into_iter().map(|mv| {
        let mut child = board.clone();
        child.apply_move(&mv);
        minimax(&child, depth - 1, !maximizing, nodes)
    });
    if maximizing {
        scores.max().unwrap_or(i32::MIN)
    } else {
        scores.min().unwrap_or(i32::MAX)
    }
}

/// Root of the reference search: strictly better replaces, ties keep the
/// first move.
fn minimax_root(board: &Board, depth: u32) -> (Option<Move>, i32, u64) {
    let mut nodes = 0;
    let mut best: Option<(Move, i32)> = None;
    for mv in board.legal_moves(Player::Computer) {
        let mut child = board.clone();
        child.apply_move(&mv);
        let score = minimax(&child, depth.saturating_sub(1), false, &mut nodes);
        if best.as_ref().is_none_or(|(_, s)| score > *s) {
            best = Some((mv, score));
        }
    }
    match best {
        Some((mv, score)) => (Some(mv), score, nodes),
        None => (None, 0, nodes),
    }
}

/// Positions reached by random play from the opening.
fn random_positions(seed: u64, plies: usize) -> Vec<Board> {
    let mut board = Board::new();
    let mut random = RandomPlayer::new(seed);
    let mut to_move = Player::Human;
    let mut positions = Vec::new();
    for ply in 0..plies {
        let Some(mv) = random.choose(&board, to_move) else {
            break;
        };
        board.apply_move(&mv);
        to_move = to_move.opponent();
        if ply % 4 == 3 && !board.is_game_over() {
            positions.push(board.clone());
        }
    }
    positions
}

fn assert_agrees(board: &Board, depth: u32) {
    let (expected, expected_score, minimax_nodes) = minimax_root(board, depth);
    let mut engine = Engine::new(depth);
    let result = engine.search_root(board);

    assert_eq!(result.best_move, expected, "depth {depth}\n{board}");
    if let (Some(found), Some(expected)) = (&result.best_move, &expected) {
        assert_eq!(found.captured, expected.captured);
        assert_eq!(result.score, expected_score);
    }
    assert!(
        result.nodes <= minimax_nodes,
        "alpha-beta visited {} nodes, minimax {}",
        result.nodes,
        minimax_nodes
    );
}

// =============================================================================
// Pruning preserves the result
// =============================================================================

#[test]
fn test_alpha_beta_matches_minimax_after_opening() {
    let mut board = Board::new();
    board.apply_move(&Move::simple(
        parse_coord("d3").unwrap(),
        parse_coord("e4").unwrap(),
    ));
    for depth in 1..=4 {
        assert_agrees(&board, depth);
    }
}

#[test]
fn test_alpha_beta_matches_minimax_on_random_positions() {
    for seed in [3, 11, 29] {
        for board in random_positions(seed, 24) {
            assert_agrees(&board, 3);
        }
    }
}

#[test]
fn test_alpha_beta_matches_minimax_with_kings() {
    let mut board = Board::empty();
    for (square, kind, owner) in [
        ("d5", PieceKind::King, Player::Computer),
        ("h6", PieceKind::Man, Player::Computer),
        ("b7", PieceKind::Man, Player::Computer),
        ("d2", PieceKind::King, Player::Human),
        ("f2", PieceKind::Man, Player::Human),
        ("a2", PieceKind::Man, Player::Human),
    ] {
        board.place(kind, owner, parse_coord(square).unwrap());
    }
    for depth in 1..=4 {
        assert_agrees(&board, depth);
    }
}

#[test]
fn test_pruning_saves_work() {
    let board = Board::new();
    let (_, _, minimax_nodes) = minimax_root(&board, 4);
    let mut engine = Engine::new(4);
    let result = engine.search_root(&board);
    assert!(result.nodes < minimax_nodes);
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_same_board_same_move() {
    for board in random_positions(5, 30) {
        let first = best_move(&board, 3);
        let second = best_move(&board, 3);
        assert_eq!(first, second);
        if let (Some(a), Some(b)) = (first, second) {
            assert_eq!(a.captured, b.captured);
        }
    }
}

#[test]
fn test_engine_reuse_is_stateless() {
    let board = Board::new();
    let mut engine = Engine::new(3);
    let first = engine.search_root(&board);
    let second = engine.search_root(&board);
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert_eq!(first.nodes, second.nodes);
}
