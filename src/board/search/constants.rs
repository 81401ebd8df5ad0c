//! Search constants.

// ============================================================================
// SEARCH LIMITS
// ============================================================================

/// Deepest ply the per-ply tables cover
pub const MAX_PLY: usize = 64;

/// Score of a won position at the root; wins found deeper score less
pub const MATE_SCORE: i32 = 30000;

/// Scores with absolute value >= this are mate scores
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

/// Bound wider than any reachable score
pub const INFINITY: i32 = MATE_SCORE + 1;

// ============================================================================
// MOVE ORDERING
// ============================================================================
// Higher classes are tried first: captures > killers > quiet moves.

pub const CAPTURE_CLASS: u8 = 3;
pub const KILLER_CLASS: u8 = 2;
pub const QUIET_CLASS: u8 = 1;

/// Flat bonus added to every capture's victim-minus-attacker score
pub const CAPTURE_BONUS: i32 = 10_000;

/// Killer moves remembered per ply
pub const KILLERS_PER_PLY: usize = 2;

/// History scores saturate here
pub const HISTORY_MAX: i32 = 1 << 14;
