use crate::board::Board;
use crate::heuristic::Heuristic;
use crate::solver::{SolveError, Solver, Tracer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread::JoinHandle;

/// Result of a background solve, delivered once over the channel.
#[derive(Debug)]
pub struct SolveOutcome {
    pub result: Result<Vec<Board>, SolveError>,
    pub nodes_explored: usize,
}

/// Handle to a solve running on a background thread.
///
/// The engine itself is synchronous; this keeps it off the caller's
/// interaction path. The full result crosses the channel as one message,
/// so the caller never reads state the worker is still mutating.
#[derive(Debug)]
pub struct PendingSolve {
    cancel: Arc<AtomicBool>,
    rx: mpsc::Receiver<SolveOutcome>,
    join: Option<JoinHandle<()>>,
}

impl PendingSolve {
    /// Request cooperative cancellation; the search polls the flag once
    /// per expansion and terminates with `Cutoff`.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Non-blocking poll for the outcome.
    pub fn try_recv(&self) -> Option<SolveOutcome> {
        self.rx.try_recv().ok()
    }

    /// Block until the solve finishes and join the worker thread.
    /// Returns None only if the worker died without reporting.
    pub fn wait(mut self) -> Option<SolveOutcome> {
        let outcome = self.rx.recv().ok();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
        outcome
    }
}

/// Run a configured solver against `board` on a spawned thread and hand
/// the result back through a one-shot channel.
pub fn spawn_solve_with<H, T>(board: Board, mut solver: Solver<H, T>) -> PendingSolve
where
    H: Heuristic + Send + 'static,
    T: Tracer + Send + 'static,
{
    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_for_thread = Arc::clone(&cancel);
    let (tx, rx) = mpsc::channel::<SolveOutcome>();

    let join = std::thread::spawn(move || {
        let result = solver.solve_with_cancel(&board, Some(cancel_for_thread.as_ref()));
        let _ = tx.send(SolveOutcome {
            result,
            nodes_explored: solver.nodes_explored(),
        });
    });

    PendingSolve {
        cancel,
        rx,
        join: Some(join),
    }
}

/// Convenience wrapper over `spawn_solve_with` for an untraced solve.
pub fn spawn_solve<H>(board: Board, max_nodes_explored: usize, heuristic: H) -> PendingSolve
where
    H: Heuristic + Send + 'static,
{
    spawn_solve_with(board, Solver::new(max_nodes_explored, heuristic))
}
