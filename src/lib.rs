//! checkers-ai: a checkers (draughts) engine with a minimax opponent.
//!
//! This crate implements the rules of 8x8 checkers with flying kings and
//! mandatory multi-jump captures, and a computer opponent that searches a
//! fixed number of plies with alpha-beta pruning.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, evaluation weights, search parameters
//! - [`position`] - Squares, diagonal directions, and square notation
//! - [`piece`] - Pieces, owners, and movement directions
//! - [`moves`] - Moves and move notation
//! - [`board`] - Board state, move generation, capture chains, move application
//! - [`search`] - Evaluation and alpha-beta search
//! - [`random`] - Seeded random mover
//! - [`game`] - Game session with turn order
//! - [`protocol`] - Line-oriented text protocol
//! - [`error`] - Parse and game errors
//!
//! ## Example
//!
//! ```
//! use checkers_ai::board::Board;
//! use checkers_ai::piece::Player;
//! use checkers_ai::search::best_move;
//!
//! // Create a new game and make the human's first move
//! let mut board = Board::new();
//! let opening = board.legal_moves(Player::Human).remove(0);
//! board.apply_move(&opening);
//!
//! // Let the computer answer
//! let reply = best_move(&board, 2).unwrap();
//! println!("Computer plays {reply}");
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod moves;
pub mod piece;
pub mod position;
pub mod protocol;
pub mod random;
pub mod search;
