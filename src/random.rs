//! Seeded random mover.
//!
//! Picks uniformly among the legal moves. Used as a sparring partner for
//! self-play and to drive randomized games in tests; the same seed always
//! produces the same sequence of choices.

use crate::board::Board;
use crate::moves::Move;
use crate::piece::Player;

pub struct RandomPlayer {
    rng: fastrand::Rng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// A random legal move for `player`, `None` if it has none.
    pub fn choose(&mut self, board: &Board, player: Player) -> Option<Move> {
        let mut moves = board.legal_moves(player);
        if moves.is_empty() {
            return None;
        }
        let i = self.rng.usize(..moves.len());
        Some(moves.swap_remove(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_is_legal() {
        let board = Board::new();
        let legal = board.legal_moves(Player::Human);
        let mut player = RandomPlayer::new(7);
        for _ in 0..20 {
            let mv = player.choose(&board, Player::Human).unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let board = Board::new();
        let mut a = RandomPlayer::new(42);
        let mut b = RandomPlayer::new(42);
        for _ in 0..10 {
            assert_eq!(
                a.choose(&board, Player::Computer),
                b.choose(&board, Player::Computer)
            );
        }
    }

    #[test]
    fn test_no_moves() {
        let mut player = RandomPlayer::new(1);
        assert!(player.choose(&Board::empty(), Player::Human).is_none());
    }
}
