use crate::board::Board;

/// Trait for computing admissible lower bounds on the number of moves
/// needed to reach the goal configuration.
pub trait Heuristic {
    /// Estimated number of moves remaining from `board` to the goal.
    /// Must never overestimate the true remaining distance.
    fn estimate(&self, board: &Board) -> u32;
}

pub struct NullHeuristic;

impl NullHeuristic {
    pub fn new() -> Self {
        NullHeuristic
    }
}

impl Heuristic for NullHeuristic {
    fn estimate(&self, _board: &Board) -> u32 {
        0
    }
}

/// Sum of Manhattan distances of all non-blank tiles to their goal cells.
/// Consistent: adjacent states differ by at most 1, so a node's cost is
/// final the first time it leaves the frontier.
pub struct ManhattanHeuristic;

impl ManhattanHeuristic {
    pub fn new() -> Self {
        ManhattanHeuristic
    }
}

impl Heuristic for ManhattanHeuristic {
    fn estimate(&self, board: &Board) -> u32 {
        board.manhattan()
    }
}
