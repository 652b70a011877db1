//! First-UIP conflict analysis, VSIDS activity bumping, and LBD scoring.
//! Implements spec §4.3. Grounded on `sat/minisat/search/conflict.rs`.

use std::collections::HashSet;

use crate::sat::assignment::{Assignment, Reason};
use crate::sat::clause::{ClauseDb, ClauseId};
use crate::sat::formula::{Lit, Var, VarMap};

const ACTIVITY_RESCALE_THRESHOLD: f64 = 1e100;
const ACTIVITY_RESCALE_FACTOR: f64 = 1e-100;

/// Per-variable VSIDS activity. Bumped during conflict analysis, decayed
/// after every conflict, rescaled to avoid overflow (spec §4.3).
pub struct Activity {
    act: VarMap<f64>,
    increment: f64,
    decay: f64,
}

impl Activity {
    pub fn new(decay: f64) -> Self {
        Activity {
            act: VarMap::new(),
            increment: 1.0,
            decay,
        }
    }

    pub fn init_var(&mut self) {
        self.act.push(0.0);
    }

    #[inline]
    pub fn of(&self, v: Var) -> f64 {
        self.act[v]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Var, &f64)> {
        self.act.iter()
    }

    pub fn bump(&mut self, v: Var) {
        let new = self.act[v] + self.increment;
        self.act[v] = new;
        if new > ACTIVITY_RESCALE_THRESHOLD {
            self.rescale();
        }
    }

    fn rescale(&mut self) {
        for v in 0..self.act.len() {
            let v = Var::from_index(v);
            self.act[v] *= ACTIVITY_RESCALE_FACTOR;
        }
        self.increment *= ACTIVITY_RESCALE_FACTOR;
    }

    /// Call once per conflict, after bumping.
    pub fn decay(&mut self) {
        self.increment /= self.decay;
        if self.increment > ACTIVITY_RESCALE_THRESHOLD {
            self.rescale();
        }
    }
}

pub struct Analysis {
    pub learnt: Vec<Lit>,
    pub backjump_level: u32,
    pub lbd: u32,
}

/// Resolves the conflicting clause against reasons along the trail until
/// exactly one current-level literal remains (the first UIP), per spec §4.3.
/// Bumps the activity of every variable touched during resolution.
pub fn analyze(
    conflict: ClauseId,
    assignment: &Assignment,
    clauses: &ClauseDb,
    activity: &mut Activity,
) -> Analysis {
    let current_level = assignment.decision_level();
    let mut seen: VarMap<bool> = VarMap::new();
    for _ in 0..assignment.num_vars() {
        seen.push(false);
    }

    let mut learnt: Vec<Lit> = Vec::new();
    let mut path_count = 0usize;
    let mut levels_seen: HashSet<u32> = HashSet::new();

    let mut reason_clause = conflict;
    let mut trail_index = assignment.trail().len();
    let mut resolving_lit: Option<Lit> = None;

    loop {
        let clause = clauses.get(reason_clause);
        let start = if resolving_lit.is_some() { 1 } else { 0 };
        for &q in &clause.lits[start..] {
            let v = q.var();
            if seen[v] {
                continue;
            }
            let level = assignment.level_of(v);
            if level == GROUND_LEVEL {
                continue;
            }
            seen[v] = true;
            activity.bump(v);
            if level == current_level {
                path_count += 1;
            } else {
                learnt.push(q);
                levels_seen.insert(level);
            }
        }

        // Walk the trail backward to the next seen literal at the current
        // level; that is the next one to resolve on.
        loop {
            trail_index -= 1;
            let lit = assignment.trail()[trail_index];
            if seen[lit.var()] {
                resolving_lit = Some(lit);
                break;
            }
        }
        let v = resolving_lit.unwrap().var();
        path_count -= 1;
        if path_count == 0 {
            break;
        }
        reason_clause = match assignment.reason_of(v) {
            Reason::Clause(cid) => cid,
            Reason::Decision => unreachable!("path literal must have a clausal reason"),
        };
    }

    let uip = !resolving_lit.unwrap();
    learnt.insert(0, uip);
    levels_seen.insert(current_level);

    let backjump_level = if learnt.len() == 1 {
        GROUND_LEVEL
    } else {
        learnt[1..]
            .iter()
            .map(|l| assignment.level_of(l.var()))
            .max()
            .unwrap_or(GROUND_LEVEL)
    };

    // Keep the literal with the highest level (besides the UIP) at position 1,
    // so a fresh 2-watched-literal clause can watch it directly.
    if learnt.len() > 1 {
        let (mut best_idx, mut best_level) = (1, assignment.level_of(learnt[1].var()));
        for i in 2..learnt.len() {
            let level = assignment.level_of(learnt[i].var());
            if level > best_level {
                best_level = level;
                best_idx = i;
            }
        }
        learnt.swap(1, best_idx);
    }

    let lbd = levels_seen.len() as u32;

    Analysis {
        learnt,
        backjump_level,
        lbd,
    }
}

const GROUND_LEVEL: u32 = crate::sat::assignment::GROUND_LEVEL;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::Reason;
    use crate::sat::clause::ClauseDb;

    #[test]
    fn unit_propagation_chain_yields_unit_learnt() {
        // (x1) and (-x1 v x2) and (-x2 v x3) and (-x3) at level 0: any
        // conflict found purely at level 0 should never reach analyze (the
        // main loop returns UNSAT directly); this test instead checks that a
        // single-decision conflict returns a 1-literal learnt clause when the
        // whole chain collapses to the decision itself.
        let mut assignment = Assignment::new();
        let mut clauses = ClauseDb::new();
        let mut activity = Activity::new(0.95);

        let v1 = assignment.new_var();
        activity.init_var();
        let v2 = assignment.new_var();
        activity.init_var();

        assignment.new_decision_level();
        assignment.enqueue(v1.pos_lit(), Reason::Decision);

        // -x1 v x2
        let c1 = clauses.add(vec![v1.neg_lit(), v2.pos_lit()], false, 0);
        assignment.enqueue(v2.pos_lit(), Reason::Clause(c1));

        // conflicting clause: -x2 (forces a conflict against v2=true)
        let c2 = clauses.add(vec![v2.neg_lit()], false, 0);

        let result = analyze(c2, &assignment, &clauses, &mut activity);
        assert_eq!(result.learnt.len(), 1);
        assert_eq!(result.backjump_level, 0);
    }
}
