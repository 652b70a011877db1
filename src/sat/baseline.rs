//! The baseline driver loop (spec §2 item 6): CDCL with one fixed heuristic,
//! no epoch accounting, no bandit — used for apples-to-apples comparison
//! against RL mode.

use std::time::Instant;

use crate::sat::solver::{Engine, StepResult};
use crate::sat::{HeuristicKind, SolveStatus, Stats};

pub struct BaselineResult {
    pub status: SolveStatus,
    pub stats: Stats,
    pub elapsed_seconds: f64,
}

/// `deadline`, if set, is checked between CDCL steps (spec §5: the core has
/// no notion of a clock, so the driver enforces the wall-clock budget).
pub fn solve(
    num_vars: usize,
    clauses: &[Vec<i64>],
    heuristic: HeuristicKind,
    restart_interval: u64,
    seed: u64,
    deadline: Option<Instant>,
) -> BaselineResult {
    let start = Instant::now();
    let mut engine = Engine::new(num_vars, clauses, heuristic, restart_interval, seed);

    if engine.is_trivially_unsat() {
        return BaselineResult {
            status: SolveStatus::Unsat,
            stats: engine.stats,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        };
    }

    loop {
        if let Some(d) = deadline {
            if Instant::now() >= d {
                return BaselineResult {
                    status: SolveStatus::Timeout,
                    stats: engine.stats,
                    elapsed_seconds: start.elapsed().as_secs_f64(),
                };
            }
        }

        match engine.step() {
            StepResult::Continuing | StepResult::ConflictResolved { .. } => {}
            StepResult::Sat(model) => {
                return BaselineResult {
                    status: SolveStatus::Sat(model),
                    stats: engine.stats,
                    elapsed_seconds: start.elapsed().as_secs_f64(),
                };
            }
            StepResult::Unsat => {
                return BaselineResult {
                    status: SolveStatus::Unsat,
                    stats: engine.stats,
                    elapsed_seconds: start.elapsed().as_secs_f64(),
                };
            }
        }
    }
}
