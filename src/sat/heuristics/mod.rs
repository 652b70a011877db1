//! The pluggable branching-heuristic family (spec §4.5). All four arms share
//! one small dispatch capability: `decide`/`on_learnt`/`on_restart`, matched
//! against the closed set via an enum rather than a trait object, since the
//! call frequency (one `decide` per propagation round) doesn't warrant
//! dynamic dispatch (spec §9).

mod dlis;
mod jw;
mod random;
mod vsids;

pub use dlis::Dlis;
pub use jw::JeroslowWang;
pub use random::Random;
pub use vsids::Vsids;

use crate::sat::assignment::Assignment;
use crate::sat::clause::ClauseDb;
use crate::sat::conflict::Activity;
use crate::sat::formula::{Lit, Var};

/// Read-only view of solver state passed to a heuristic's `decide`. Per spec
/// §5, heuristics must not mutate trail or watches; this view only borrows.
pub struct SolverView<'a> {
    pub assignment: &'a Assignment,
    pub activity: &'a Activity,
    pub clauses: &'a ClauseDb,
}

impl<'a> SolverView<'a> {
    /// First unassigned variable by index, for deterministic fallback
    /// iteration (used by Random, and as the tie-break order elsewhere).
    pub fn first_unassigned(&self) -> Option<Var> {
        (0..self.assignment.num_vars())
            .map(Var::from_index)
            .find(|&v| self.assignment.value_of(v) == crate::sat::assignment::LitVal::Undef)
    }

    pub fn is_unassigned(&self, v: Var) -> bool {
        self.assignment.value_of(v) == crate::sat::assignment::LitVal::Undef
    }

    /// Applies phase saving: if the variable was previously assigned, reuse
    /// that value; otherwise fall back to `natural_true`.
    pub fn phase(&self, v: Var, natural_true: bool) -> Lit {
        let assign_true = self.assignment.saved_phase(v).unwrap_or(natural_true);
        if assign_true {
            v.pos_lit()
        } else {
            v.neg_lit()
        }
    }
}

pub enum Heuristic {
    Vsids(Vsids),
    JeroslowWang(JeroslowWang),
    Dlis(Dlis),
    Random(Random),
}

impl Heuristic {
    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Vsids(_) => "vsids",
            Heuristic::JeroslowWang(_) => "jw",
            Heuristic::Dlis(_) => "dlis",
            Heuristic::Random(_) => "random",
        }
    }

    pub fn decide(&mut self, view: &SolverView) -> Option<Lit> {
        match self {
            Heuristic::Vsids(h) => h.decide(view),
            Heuristic::JeroslowWang(h) => h.decide(view),
            Heuristic::Dlis(h) => h.decide(view),
            Heuristic::Random(h) => h.decide(view),
        }
    }

    pub fn on_learnt(&mut self, clause: &[Lit]) {
        match self {
            Heuristic::Vsids(h) => h.on_learnt(clause),
            Heuristic::JeroslowWang(h) => h.on_learnt(clause),
            Heuristic::Dlis(h) => h.on_learnt(clause),
            Heuristic::Random(h) => h.on_learnt(clause),
        }
    }

    pub fn on_restart(&mut self) {
        match self {
            Heuristic::Vsids(h) => h.on_restart(),
            Heuristic::JeroslowWang(h) => h.on_restart(),
            Heuristic::Dlis(h) => h.on_restart(),
            Heuristic::Random(h) => h.on_restart(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicKind {
    Vsids,
    JeroslowWang,
    Dlis,
    Random,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 4] = [
        HeuristicKind::Vsids,
        HeuristicKind::JeroslowWang,
        HeuristicKind::Dlis,
        HeuristicKind::Random,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HeuristicKind::Vsids => "vsids",
            HeuristicKind::JeroslowWang => "jw",
            HeuristicKind::Dlis => "dlis",
            HeuristicKind::Random => "random",
        }
    }

    pub fn build(&self, clauses: &ClauseDb, seed: u64) -> Heuristic {
        match self {
            HeuristicKind::Vsids => Heuristic::Vsids(Vsids::new()),
            HeuristicKind::JeroslowWang => Heuristic::JeroslowWang(JeroslowWang::new(clauses)),
            HeuristicKind::Dlis => Heuristic::Dlis(Dlis::new()),
            HeuristicKind::Random => Heuristic::Random(Random::new(seed)),
        }
    }
}
