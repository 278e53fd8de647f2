use crate::board::Board;
use crate::heuristic::Heuristic;
use crate::parity;
use crate::pqueue::Frontier;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Error type for solve attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// Start state is not in the goal's reachability class
    Unsolvable,
    /// Node budget exceeded or the search was cancelled
    Cutoff,
    /// Frontier drained without reaching the goal
    Exhausted,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Unsolvable => write!(f, "puzzle is not solvable"),
            SolveError::Cutoff => write!(f, "node budget exceeded before a solution was found"),
            SolveError::Exhausted => write!(f, "search space exhausted without reaching the goal"),
        }
    }
}

/// Hook called once per expanded node, for diagnostics.
pub trait Tracer {
    fn trace(&self, board: &Board, nodes_explored: usize, f_cost: u32, g_cost: u32);
}

pub struct NullTracer;

impl Tracer for NullTracer {
    fn trace(&self, _board: &Board, _nodes_explored: usize, _f_cost: u32, _g_cost: u32) {}
}

const NO_PARENT: u32 = u32::MAX;

/// One expanded or discovered state. Paths are reconstructed by walking
/// `parent` links once the goal is extracted, instead of copying the
/// path into every frontier entry.
struct Node {
    board: Board,
    parent: u32,
    g: u32,
}

/// Best-first (A*) search over the sliding-move graph.
///
/// With an admissible, consistent heuristic the first extraction of the
/// goal carries the true shortest distance, so the returned path is
/// optimal in move count.
pub struct Solver<H: Heuristic, T: Tracer = NullTracer> {
    max_nodes_explored: usize,
    heuristic: H,
    tracer: Option<T>,
    nodes_explored: usize,
}

impl<H: Heuristic> Solver<H, NullTracer> {
    pub fn new(max_nodes_explored: usize, heuristic: H) -> Self {
        Self::with_tracer(max_nodes_explored, heuristic, None)
    }
}

impl<H: Heuristic, T: Tracer> Solver<H, T> {
    pub fn with_tracer(max_nodes_explored: usize, heuristic: H, tracer: Option<T>) -> Self {
        Solver {
            max_nodes_explored,
            heuristic,
            tracer,
            nodes_explored: 0,
        }
    }

    /// Number of nodes expanded by the most recent `solve` call.
    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    /// Find an optimal path from `start` to the goal.
    ///
    /// Returns the ordered states after `start`, ending at the goal;
    /// empty if `start` is already solved. The solvability pre-check is
    /// mandatory: an unsolvable input returns `Unsolvable` without any
    /// search, since its reachability class does not contain the goal
    /// and exhausting it is intractable.
    pub fn solve(&mut self, start: &Board) -> Result<Vec<Board>, SolveError> {
        self.solve_with_cancel(start, None)
    }

    /// Like `solve`, but polls `cancel` once per expansion; a cancelled
    /// search terminates early with `Cutoff`.
    pub fn solve_with_cancel(
        &mut self,
        start: &Board,
        cancel: Option<&AtomicBool>,
    ) -> Result<Vec<Board>, SolveError> {
        self.nodes_explored = 0;

        if !parity::is_solvable(start) {
            return Err(SolveError::Unsolvable);
        }

        let mut nodes = vec![Node {
            board: *start,
            parent: NO_PARENT,
            g: 0,
        }];
        let mut visited: HashSet<u64> = HashSet::new();
        let mut frontier: Frontier<u32> = Frontier::new();
        frontier.push(self.heuristic.estimate(start), 0, 0);

        while let Some(index) = frontier.pop_min() {
            let board = nodes[index as usize].board;
            let g = nodes[index as usize].g;

            // A state extracted earlier was reached by an equal or better
            // path; later frontier entries for it are stale.
            if !visited.insert(board.key()) {
                continue;
            }

            if let Some(cancel) = cancel {
                if cancel.load(Ordering::Relaxed) {
                    return Err(SolveError::Cutoff);
                }
            }
            if self.nodes_explored >= self.max_nodes_explored {
                return Err(SolveError::Cutoff);
            }
            self.nodes_explored += 1;

            if let Some(tracer) = &self.tracer {
                let f = g + self.heuristic.estimate(&board);
                tracer.trace(&board, self.nodes_explored, f, g);
            }

            if board.is_solved() {
                return Ok(Self::reconstruct_path(&nodes, index));
            }

            for neighbor in board.neighbors() {
                if visited.contains(&neighbor.key()) {
                    continue;
                }
                let h = self.heuristic.estimate(&neighbor);
                nodes.push(Node {
                    board: neighbor,
                    parent: index,
                    g: g + 1,
                });
                frontier.push(g + 1 + h, g + 1, (nodes.len() - 1) as u32);
            }
        }

        // Unreachable for inputs that pass the solvability check.
        Err(SolveError::Exhausted)
    }

    fn reconstruct_path(nodes: &[Node], goal_index: u32) -> Vec<Board> {
        let mut path = Vec::new();
        let mut index = goal_index;
        while nodes[index as usize].parent != NO_PARENT {
            path.push(nodes[index as usize].board);
            index = nodes[index as usize].parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Direction;
    use crate::heuristic::{ManhattanHeuristic, NullHeuristic};
    use crate::scramble;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::VecDeque;

    const MAX_NODES: usize = 1_000_000;

    /// Exhaustive breadth-first distance from `start` to the goal, as an
    /// independent ground truth for short instances.
    fn bfs_distance(start: &Board) -> u32 {
        let mut seen: HashSet<u64> = HashSet::new();
        let mut queue: VecDeque<(Board, u32)> = VecDeque::new();
        seen.insert(start.key());
        queue.push_back((*start, 0));

        while let Some((board, depth)) = queue.pop_front() {
            if board.is_solved() {
                return depth;
            }
            for neighbor in board.neighbors() {
                if seen.insert(neighbor.key()) {
                    queue.push_back((neighbor, depth + 1));
                }
            }
        }
        unreachable!("bfs_distance called on an unsolvable board");
    }

    #[test]
    fn test_solve_already_solved() {
        let mut solver = Solver::new(MAX_NODES, ManhattanHeuristic::new());
        let path = solver.solve(&Board::GOAL).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_solve_one_move() {
        let start = Board::GOAL.slide(Direction::Up).unwrap();
        let mut solver = Solver::new(MAX_NODES, ManhattanHeuristic::new());
        let path = solver.solve(&start).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0], Board::GOAL);
    }

    #[test]
    fn test_solve_unsolvable() {
        let start = Board::from_text("1 2 3 4 5 6 7 8 9 10 11 12 13 15 14 0").unwrap();
        let mut solver = Solver::new(MAX_NODES, ManhattanHeuristic::new());
        assert_eq!(solver.solve(&start), Err(SolveError::Unsolvable));
        // Refused before any expansion.
        assert_eq!(solver.nodes_explored(), 0);
    }

    #[test]
    fn test_solve_budget_cutoff() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let start = scramble::walk_from_goal(&mut rng, 30);
        let mut solver = Solver::new(1, ManhattanHeuristic::new());
        assert_eq!(solver.solve(&start), Err(SolveError::Cutoff));
    }

    #[test]
    fn test_solve_cancelled() {
        let start = Board::GOAL.slide(Direction::Up).unwrap();
        let cancel = AtomicBool::new(true);
        let mut solver = Solver::new(MAX_NODES, ManhattanHeuristic::new());
        let result = solver.solve_with_cancel(&start, Some(&cancel));
        assert_eq!(result, Err(SolveError::Cutoff));
    }

    #[test]
    fn test_solve_matches_bfs_on_short_instances() {
        for seed in 0..12 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let start = scramble::walk_from_goal(&mut rng, 6);
            let expected = bfs_distance(&start);

            let mut solver = Solver::new(MAX_NODES, ManhattanHeuristic::new());
            let path = solver.solve(&start).unwrap();
            assert_eq!(path.len() as u32, expected);
        }
    }

    #[test]
    fn test_null_heuristic_finds_same_length() {
        // Uniform-cost search must agree with A* on optimal length.
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let start = scramble::walk_from_goal(&mut rng, 6);

        let mut astar = Solver::new(MAX_NODES, ManhattanHeuristic::new());
        let mut uniform = Solver::new(MAX_NODES, NullHeuristic::new());
        let a = astar.solve(&start).unwrap();
        let u = uniform.solve(&start).unwrap();
        assert_eq!(a.len(), u.len());
    }

    #[test]
    fn test_path_replays_to_goal() {
        for seed in 0..6 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let start = scramble::walk_from_goal(&mut rng, 14);

            let mut solver = Solver::new(MAX_NODES, ManhattanHeuristic::new());
            let path = solver.solve(&start).unwrap();

            // Every consecutive pair is related by one legal move.
            let mut current = start;
            for board in &path {
                assert!(current.neighbors().contains(board));
                current = *board;
            }
            assert!(current.is_solved());
        }
    }

    #[test]
    fn test_deterministic_paths() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let start = scramble::walk_from_goal(&mut rng, 16);

        let mut first = Solver::new(MAX_NODES, ManhattanHeuristic::new());
        let mut second = Solver::new(MAX_NODES, ManhattanHeuristic::new());
        // Fixed tie-breaks make repeated runs identical, not merely
        // equal in length.
        assert_eq!(first.solve(&start), second.solve(&start));
    }

    #[test]
    fn test_nodes_explored_counted() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let start = scramble::walk_from_goal(&mut rng, 10);
        let mut solver = Solver::new(MAX_NODES, ManhattanHeuristic::new());
        let path = solver.solve(&start).unwrap();
        // At least the whole solution path plus the start was expanded.
        assert!(solver.nodes_explored() > path.len());
    }
}
