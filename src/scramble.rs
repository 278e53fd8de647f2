use crate::board::{ALL_DIRECTIONS, Board, CELLS, Direction};
use crate::parity;
use arrayvec::ArrayVec;
use rand::Rng;
use rand::seq::SliceRandom;

/// Uniformly shuffled board, retried until it lands in the goal's
/// reachability class. Half of all permutations are rejected.
pub fn random_board<R: Rng>(rng: &mut R) -> Board {
    let mut cells: [u8; CELLS] = *Board::GOAL.cells();
    loop {
        cells.shuffle(rng);
        // A shuffle of the goal cells is always a valid permutation.
        if let Ok(board) = Board::from_cells(&cells) {
            if parity::is_solvable(&board) {
                return board;
            }
        }
    }
}

/// Random walk of `steps` legal slides away from the goal, never
/// immediately undoing the previous slide. The result is solvable by
/// construction and its optimal solution length is at most `steps`.
pub fn walk_from_goal<R: Rng>(rng: &mut R, steps: usize) -> Board {
    let mut board = Board::GOAL;
    let mut last: Option<Direction> = None;

    for _ in 0..steps {
        let mut choices: ArrayVec<Direction, 4> = ArrayVec::new();
        for dir in ALL_DIRECTIONS {
            if last == Some(dir.opposite()) {
                continue;
            }
            if board.slide(dir).is_some() {
                choices.push(dir);
            }
        }

        // The blank always has at least two legal directions and at most
        // one is excluded as a backtrack.
        let dir = choices[rng.gen_range(0..choices.len())];
        if let Some(next) = board.slide(dir) {
            board = next;
            last = Some(dir);
        }
    }

    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_board_is_solvable() {
        for seed in 0..8 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let board = random_board(&mut rng);
            assert!(parity::is_solvable(&board));
        }
    }

    #[test]
    fn test_random_board_is_reproducible() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(random_board(&mut rng_a), random_board(&mut rng_b));
    }

    #[test]
    fn test_walk_zero_steps_is_goal() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(walk_from_goal(&mut rng, 0), Board::GOAL);
    }

    #[test]
    fn test_walk_stays_solvable_and_bounded() {
        for seed in 0..8 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let board = walk_from_goal(&mut rng, 12);
            assert!(parity::is_solvable(&board));
            // Manhattan distance is a lower bound on moves taken.
            assert!(board.manhattan() <= 12);
        }
    }

    #[test]
    fn test_walk_never_backtracks_to_previous_state() {
        // A single non-undoing step can never return to the goal.
        for seed in 0..8 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let board = walk_from_goal(&mut rng, 2);
            assert_ne!(board, Board::GOAL);
        }
    }
}
