//! CDCL SAT solver core augmented with an online LinUCB contextual-bandit
//! controller that selects the branching heuristic at epoch boundaries.
//!
//! The library exposes two driver loops over the same CDCL engine
//! ([`sat::solver::Engine`]): [`sat::baseline`] runs with one fixed
//! heuristic, [`sat::rl`] lets the bandit switch heuristics across epochs.

pub mod dimacs;
pub mod error;
pub mod sat;

pub use sat::heuristics::HeuristicKind;
pub use sat::{SolveStatus, Stats};
