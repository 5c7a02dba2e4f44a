//! Constants for board geometry, evaluation weights, and search parameters.
//!
//! All tunable numbers of the engine live here so the rules and the
//! evaluator read from a single place.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Only the standard 8x8 board is supported.
pub const BOARD_SIZE: i32 = 8;

/// Number of rows each side fills with men at the start of a game.
pub const START_ROWS: i32 = 3;

// =============================================================================
// Material Values
// =============================================================================

/// Material value of a man.
pub const MAN_VALUE: i32 = 100;

/// Material value of a king.
pub const KING_VALUE: i32 = 300;

// =============================================================================
// Positional Weights
// =============================================================================

/// Bonus per row a man has advanced from its own home row.
pub const ADVANCE_BONUS: i32 = 3;

/// Bonus for a man standing on the leftmost or rightmost column.
pub const EDGE_BONUS_MAN: i32 = 15;

/// Bonus for a king standing on the leftmost or rightmost column.
pub const EDGE_BONUS_KING: i32 = 8;

/// Weight of the legal-move count difference.
pub const MOBILITY_WEIGHT: i32 = 10;

// =============================================================================
// Capture Threat Weights
// =============================================================================

/// Threat value of a capturable man.
pub const THREAT_MAN: i32 = 40;

/// Threat value of a capturable king.
pub const THREAT_KING: i32 = 120;

/// Extra threat per captured piece for chains longer than one jump.
pub const CHAIN_BONUS: i32 = 20;

// =============================================================================
// Search Parameters
// =============================================================================

/// Score of a position where one side has no legal move.
/// Dominates every heuristic term.
pub const WIN_SCORE: i32 = 10_000;

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u32 = 4;

/// Self-play games that reach this many plies are abandoned.
pub const MAX_GAME_PLIES: usize = 200;
