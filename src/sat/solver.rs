//! The shared CDCL engine (spec §4.1-§4.4): clause store, trail, watches,
//! propagation, conflict analysis, and the non-chronological-backtracking
//! main loop. Both the baseline driver (`sat::baseline`) and the RL driver
//! (`sat::rl`) step this engine; only the choice of *which* driver gets to
//! swap the active heuristic differs.

use std::collections::VecDeque;

use crate::sat::assignment::{Assignment, Reason};
use crate::sat::clause::ClauseDb;
use crate::sat::conflict::{self, Activity};
use crate::sat::formula::Lit;
use crate::sat::heuristics::{Heuristic, HeuristicKind, SolverView};
use crate::sat::propagate::{self, PropagateResult};
use crate::sat::watches::Watches;

/// Bounded window of the most recent learnt-clause LBDs (spec §3, K=100).
const RECENT_LBD_WINDOW: usize = 100;

#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub conflicts: u64,
    pub decisions: u64,
    pub propagations: u64,
    pub restarts: u64,
}

pub enum StepResult {
    /// Propagated without conflict; neither SAT nor UNSAT yet.
    Continuing,
    /// A conflict was analyzed, learnt, and backjumped past. `lbd` is the
    /// literal block distance of the clause just learnt, handed to the
    /// caller so it can track a per-epoch LBD average itself rather than
    /// relying on the engine's own windowed running average (spec §9: the
    /// running average must not be used as a per-epoch proxy).
    ConflictResolved { lbd: u32 },
    Sat(Vec<bool>),
    Unsat,
}

/// All four heuristics are kept alive simultaneously so every arm's
/// internal state (JW weights, etc.) stays current even while another arm is
/// active — only `decide` is gated by which one is "active" (spec §4.4: "on
/// every heuristic that declares interest").
struct HeuristicFamily {
    members: Vec<Heuristic>,
    active: usize,
}

impl HeuristicFamily {
    fn new(clauses: &ClauseDb, seed: u64) -> Self {
        let members = HeuristicKind::ALL
            .iter()
            .map(|k| k.build(clauses, seed))
            .collect();
        HeuristicFamily { members, active: 0 }
    }

    fn set_active(&mut self, kind: HeuristicKind) {
        self.active = HeuristicKind::ALL.iter().position(|k| *k == kind).unwrap();
    }

    fn active_kind(&self) -> HeuristicKind {
        HeuristicKind::ALL[self.active]
    }

    fn decide(&mut self, view: &SolverView) -> Option<Lit> {
        self.members[self.active].decide(view)
    }

    fn on_learnt(&mut self, clause: &[Lit]) {
        for h in self.members.iter_mut() {
            h.on_learnt(clause);
        }
    }

    fn on_restart(&mut self) {
        for h in self.members.iter_mut() {
            h.on_restart();
        }
    }
}

pub struct Engine {
    clauses: ClauseDb,
    assignment: Assignment,
    watches: Watches,
    activity: Activity,
    heuristics: HeuristicFamily,
    recent_lbd: VecDeque<u32>,
    restart_interval: u64,
    conflicts_since_restart: u64,
    pub stats: Stats,
    trivial_unsat: bool,
}

impl Engine {
    pub fn new(
        num_vars: usize,
        input_clauses: &[Vec<i64>],
        initial_heuristic: HeuristicKind,
        restart_interval: u64,
        seed: u64,
    ) -> Self {
        let mut assignment = Assignment::new();
        let mut watches = Watches::new();
        let mut activity = Activity::new(0.95);
        for _ in 0..num_vars {
            let v = assignment.new_var();
            watches.init_var(v);
            activity.init_var();
        }

        let mut clauses = ClauseDb::new();
        let mut trivial_unsat = false;
        for raw in input_clauses {
            let lits: Vec<Lit> = raw.iter().map(|&x| Lit::from_dimacs(x)).collect();
            if !Self::add_original_clause(&mut clauses, &mut watches, &mut assignment, lits) {
                trivial_unsat = true;
            }
        }

        let mut heuristics = HeuristicFamily::new(&clauses, seed);
        heuristics.set_active(initial_heuristic);

        Engine {
            clauses,
            assignment,
            watches,
            activity,
            heuristics,
            recent_lbd: VecDeque::with_capacity(RECENT_LBD_WINDOW),
            restart_interval,
            conflicts_since_restart: 0,
            stats: Stats::default(),
            trivial_unsat,
        }
    }

    /// Installs one *original* clause into the store (spec §4.1's
    /// `add_clause`). A unit clause is enqueued at level 0 immediately;
    /// returns `false` if that contradicts an existing assignment, or if the
    /// clause is empty.
    fn add_original_clause(
        clauses: &mut ClauseDb,
        watches: &mut Watches,
        assignment: &mut Assignment,
        lits: Vec<Lit>,
    ) -> bool {
        match lits.len() {
            0 => false,
            1 => {
                let ok = assignment.enqueue(lits[0], Reason::Decision);
                clauses.add(lits, false, 1);
                ok
            }
            _ => {
                let (c0, c1) = (lits[0], lits[1]);
                let id = clauses.add(lits, false, 0);
                watches.watch(c0, c1, id);
                true
            }
        }
    }

    /// Stores a learnt clause and installs its watches (if it has 2+
    /// literals). Does not enqueue the asserting literal itself — the
    /// caller does that after backjumping, per spec §4.4.
    fn store_learnt_clause(
        clauses: &mut ClauseDb,
        watches: &mut Watches,
        lits: Vec<Lit>,
        lbd: u32,
    ) -> crate::sat::clause::ClauseId {
        let id = clauses.add(lits.clone(), true, lbd);
        if lits.len() >= 2 {
            watches.watch(lits[0], lits[1], id);
        }
        id
    }

    pub fn is_trivially_unsat(&self) -> bool {
        self.trivial_unsat
    }

    pub fn active_heuristic(&self) -> HeuristicKind {
        self.heuristics.active_kind()
    }

    pub fn set_heuristic(&mut self, kind: HeuristicKind) {
        self.heuristics.set_active(kind);
    }

    pub fn num_vars(&self) -> usize {
        self.assignment.num_vars()
    }

    pub fn num_assigned(&self) -> usize {
        self.assignment.num_assigned()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn learnt_count(&self) -> usize {
        self.clauses.learnt_count()
    }

    pub fn decision_level(&self) -> u32 {
        self.assignment.decision_level()
    }

    pub fn recent_lbd_avg(&self) -> f64 {
        if self.recent_lbd.is_empty() {
            0.0
        } else {
            self.recent_lbd.iter().map(|&x| x as f64).sum::<f64>() / self.recent_lbd.len() as f64
        }
    }

    pub fn max_activity(&self) -> f64 {
        self.activity
            .iter()
            .map(|(_, &a)| a)
            .fold(0.0_f64, f64::max)
    }

    pub fn mean_activity(&self) -> f64 {
        let n = self.num_vars();
        if n == 0 {
            0.0
        } else {
            self.activity.iter().map(|(_, &a)| a).sum::<f64>() / n as f64
        }
    }

    pub fn satisfied_clause_count(&self) -> usize {
        self.clauses
            .iter()
            .filter(|(_, c)| c.lits.iter().any(|&l| self.assignment.is_true(l)))
            .count()
    }

    fn model(&self) -> Vec<bool> {
        (0..self.num_vars())
            .map(|i| {
                self.assignment.value_of(crate::sat::formula::Var::from_index(i))
                    == crate::sat::assignment::LitVal::True
            })
            .collect()
    }

    /// Advances the engine by exactly one CDCL "round": one BCP-to-fixpoint
    /// pass, followed by either conflict analysis or a fresh decision.
    pub fn step(&mut self) -> StepResult {
        if self.trivial_unsat {
            return StepResult::Unsat;
        }

        let (result, forced) =
            propagate::propagate(&mut self.assignment, &mut self.clauses, &mut self.watches);
        self.stats.propagations += forced;
        match result {
            PropagateResult::Conflict(conflicting) => {
                self.stats.conflicts += 1;
                if self.assignment.decision_level() == 0 {
                    return StepResult::Unsat;
                }

                let analysis =
                    conflict::analyze(conflicting, &self.assignment, &self.clauses, &mut self.activity);
                self.activity.decay();

                self.recent_lbd.push_back(analysis.lbd);
                if self.recent_lbd.len() > RECENT_LBD_WINDOW {
                    self.recent_lbd.pop_front();
                }

                let learnt = analysis.learnt;
                let backjump_level = analysis.backjump_level;
                let lbd = analysis.lbd;

                let asserting = learnt[0];
                let learnt_for_notify = learnt.clone();
                let reason_id =
                    Self::store_learnt_clause(&mut self.clauses, &mut self.watches, learnt, lbd);

                self.assignment.backtrack(backjump_level);
                self.assignment.enqueue(asserting, Reason::Clause(reason_id));
                self.heuristics.on_learnt(&learnt_for_notify);

                self.conflicts_since_restart += 1;
                if self.conflicts_since_restart >= self.restart_interval {
                    self.assignment.backtrack(0);
                    self.stats.restarts += 1;
                    self.conflicts_since_restart = 0;
                    self.heuristics.on_restart();
                }

                StepResult::ConflictResolved { lbd }
            }

            PropagateResult::NoConflict => {
                if self.assignment.all_assigned() {
                    return StepResult::Sat(self.model());
                }

                self.assignment.new_decision_level();
                let view = SolverView {
                    assignment: &self.assignment,
                    activity: &self.activity,
                    clauses: &self.clauses,
                };
                let lit = self
                    .heuristics
                    .decide(&view)
                    .expect("decide must return a literal while unassigned variables remain");
                self.stats.decisions += 1;
                self.assignment.enqueue(lit, Reason::Decision);
                StepResult::Continuing
            }
        }
    }
}
