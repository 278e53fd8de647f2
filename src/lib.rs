//! Optimal solver for the 4x4 sliding-tile puzzle: A* over the move
//! graph with a Manhattan-distance heuristic and a parity-based
//! solvability check.

pub mod board;
pub mod heuristic;
pub mod parity;
pub mod pqueue;
pub mod puzzles;
pub mod scramble;
pub mod solver;
pub mod worker;
