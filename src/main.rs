use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

use loyd::board::Board;
use loyd::heuristic::{Heuristic, ManhattanHeuristic, NullHeuristic};
use loyd::puzzles::Puzzles;
use loyd::scramble;
use loyd::solver::{SolveError, Solver, Tracer};
use loyd::worker;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeuristicType {
    Manhattan,
    Null,
}

struct VerboseTracer {
    trace_start: usize,
    trace_end: usize,
}

impl VerboseTracer {
    fn new(from_node: usize, to_node: usize) -> Self {
        Self {
            trace_start: from_node,
            trace_end: to_node,
        }
    }
}

impl Tracer for VerboseTracer {
    fn trace(&self, board: &Board, nodes_explored: usize, f_cost: u32, g_cost: u32) {
        if self.trace_start <= nodes_explored && nodes_explored <= self.trace_end {
            println!(
                "count={}, f_cost={}, g_cost={}:\n{}",
                nodes_explored, f_cost, g_cost, board
            );
        }
    }
}

fn print_solution(start: &Board, path: &[Board]) {
    println!("\nStarting position:\n{}", start);
    let mut previous = *start;
    let total = path.len();
    for (count, board) in path.iter().enumerate() {
        // The tile that moved now sits where the blank was.
        let tile = board.cells()[previous.blank_index()];
        println!("Slide tile {} ({}/{}):\n{}", tile, count + 1, total, board);
        previous = *board;
    }
}

struct PuzzleStats {
    solved: bool,
    steps: usize,
    states_explored: usize,
    elapsed_ms: u128,
}

struct SolveOpts {
    puzzle_num: usize,
    max_nodes_explored: usize,
    print_solution: bool,
    trace_range: Option<(usize, usize)>,
}

fn solve_puzzle_helper<H: Heuristic + Send + 'static>(
    board: &Board,
    opts: &SolveOpts,
    heuristic: H,
) -> PuzzleStats {
    let tracer: Option<VerboseTracer> = opts
        .trace_range
        .map(|(trace_start, trace_end)| VerboseTracer::new(trace_start, trace_end));

    let solver = Solver::with_tracer(opts.max_nodes_explored, heuristic, tracer);

    // The engine runs off this thread; the full result comes back as a
    // single message when the search finishes.
    let start_time = Instant::now();
    let outcome = match worker::spawn_solve_with(*board, solver).wait() {
        Some(outcome) => outcome,
        None => {
            eprintln!("Error: solver thread terminated unexpectedly");
            std::process::exit(1);
        }
    };
    let elapsed_ms = start_time.elapsed().as_millis();

    let (solved_char, steps, solved) = match &outcome.result {
        Ok(path) => ('Y', path.len(), true),
        Err(SolveError::Unsolvable) => ('X', 0, false),
        Err(SolveError::Cutoff) | Err(SolveError::Exhausted) => ('N', 0, false),
    };

    println!(
        "puzzle: {:<3}  solved: {}  steps: {:<5}  states: {:<12}  elapsed: {} ms",
        opts.puzzle_num, solved_char, steps, outcome.nodes_explored, elapsed_ms
    );

    if opts.print_solution {
        if let Ok(path) = &outcome.result {
            print_solution(board, path);
        }
    }

    PuzzleStats {
        solved,
        steps,
        states_explored: outcome.nodes_explored,
        elapsed_ms,
    }
}

fn solve_puzzle(board: &Board, opts: &SolveOpts, heuristic_type: HeuristicType) -> PuzzleStats {
    match heuristic_type {
        HeuristicType::Manhattan => solve_puzzle_helper(board, opts, ManhattanHeuristic::new()),
        HeuristicType::Null => solve_puzzle_helper(board, opts, NullHeuristic::new()),
    }
}

#[derive(Parser)]
#[command(name = "loyd")]
#[command(about = "An optimal 15-puzzle solver", long_about = None)]
struct Args {
    /// Path to a puzzles file (16 numbers per line, 0 for the blank)
    #[arg(value_name = "FILE")]
    puzzles_file: Option<String>,

    /// Puzzle number to solve (1-indexed), or start of range
    #[arg(value_name = "PUZZLE")]
    puzzle_start: Option<usize>,

    /// Optional end of puzzle range (inclusive, 1-indexed)
    #[arg(value_name = "PUZZLE_END")]
    puzzle_end: Option<usize>,

    /// Number of random puzzles to generate when no FILE is given
    #[arg(short, long, default_value = "1")]
    random: usize,

    /// Seed for random puzzle generation
    #[arg(short, long, default_value = "271828")]
    seed: u64,

    /// Scramble with a random walk of this many moves instead of a full shuffle
    #[arg(long)]
    scramble_depth: Option<usize>,

    /// Print the solution step-by-step
    #[arg(short, long)]
    print_solution: bool,

    /// Maximum number of nodes to explore before giving up
    #[arg(short = 'n', long, default_value = "5000000")]
    max_nodes_explored: usize,

    /// Heuristic to use for solving
    #[arg(short = 'H', long, value_enum, default_value = "manhattan")]
    heuristic: HeuristicType,

    /// Range of node counts to trace (start, end)
    #[arg(long, num_args = 2)]
    trace_range: Option<Vec<usize>>,
}

fn main() {
    let args = Args::parse();

    // Collect the boards to solve.
    let boards: Vec<Board> = if let Some(path) = &args.puzzles_file {
        let puzzles = match Puzzles::from_file(path) {
            Ok(puzzles) => puzzles,
            Err(e) => {
                eprintln!("Error loading puzzles: {}", e);
                std::process::exit(1);
            }
        };

        let Some(puzzle_start) = args.puzzle_start else {
            eprintln!("Error: puzzle number required when solving from a file");
            std::process::exit(1);
        };
        let puzzle_end = args.puzzle_end.unwrap_or(puzzle_start);

        if puzzle_start == 0 {
            eprintln!("Error: puzzle numbers must be at least 1");
            std::process::exit(1);
        }
        if puzzle_end < puzzle_start {
            eprintln!("Error: puzzle end must be >= puzzle start");
            std::process::exit(1);
        }
        if puzzle_end > puzzles.len() {
            eprintln!(
                "Error: puzzle {} not found (file contains {} puzzles)",
                puzzle_end,
                puzzles.len()
            );
            std::process::exit(1);
        }

        (puzzle_start..=puzzle_end)
            .filter_map(|n| puzzles.get(n - 1).copied())
            .collect()
    } else {
        let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
        (0..args.random)
            .map(|_| match args.scramble_depth {
                Some(depth) => scramble::walk_from_goal(&mut rng, depth),
                None => scramble::random_board(&mut rng),
            })
            .collect()
    };

    if boards.is_empty() {
        eprintln!("Error: no puzzles to solve");
        std::process::exit(1);
    }
    if args.print_solution && boards.len() > 1 {
        eprintln!("Error: solution printing only supported when solving a single puzzle");
        std::process::exit(1);
    }

    // Validate trace_range
    if let Some(range) = &args.trace_range {
        if range[0] > range[1] {
            eprintln!("Error: trace range start must be <= end");
            std::process::exit(1);
        }
    }
    let trace_range = args.trace_range.as_ref().map(|v| (v[0], v[1]));

    let first_puzzle_num = args.puzzle_start.unwrap_or(1);

    let mut total_solved = 0;
    let mut total_steps = 0;
    let mut total_states = 0;
    let mut total_time_ms = 0;

    for (i, board) in boards.iter().enumerate() {
        let opts = SolveOpts {
            puzzle_num: first_puzzle_num + i,
            max_nodes_explored: args.max_nodes_explored,
            print_solution: args.print_solution,
            trace_range,
        };
        let stats = solve_puzzle(board, &opts, args.heuristic);

        if stats.solved {
            total_solved += 1;
        }
        total_steps += stats.steps;
        total_states += stats.states_explored;
        total_time_ms += stats.elapsed_ms;
    }

    // Print summary statistics if multiple puzzles were solved
    if boards.len() > 1 {
        println!("---");
        println!(
            "solved: {:>3}/{:<3}        steps: {:<5}  states: {:<12}  elapsed: {} ms",
            total_solved,
            boards.len(),
            total_steps,
            total_states,
            total_time_ms
        );
    }
}
