//! The assignment trail: current variable values, decision levels, reasons,
//! and the propagation queue. Grounded on `sat/formula/assignment.rs` of the
//! teacher repository.

use crate::sat::clause::ClauseId;
use crate::sat::formula::{Lit, Var, VarMap};

pub const GROUND_LEVEL: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitVal {
    Undef,
    False,
    True,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    Decision,
    Clause(ClauseId),
}

#[derive(Debug, Clone, Copy)]
struct VarData {
    value: LitVal,
    level: u32,
    reason: Reason,
    /// `None` until the variable has been assigned and then unassigned at
    /// least once; after that, its last held value. Heuristics fall back to
    /// their own natural sign while this is `None` (spec §4.5).
    saved_phase: Option<bool>,
}

pub struct Assignment {
    vars: VarMap<VarData>,
    trail: Vec<Lit>,
    /// Trail index at which each decision level begins.
    level_starts: Vec<usize>,
    qhead: usize,
}

impl Assignment {
    pub fn new() -> Self {
        Assignment {
            vars: VarMap::new(),
            trail: Vec::new(),
            level_starts: Vec::new(),
            qhead: 0,
        }
    }

    pub fn new_var(&mut self) -> Var {
        let v = Var::from_index(self.vars.len());
        self.vars.push(VarData {
            value: LitVal::Undef,
            level: GROUND_LEVEL,
            reason: Reason::Decision,
            saved_phase: None,
        });
        v
    }

    #[inline]
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    #[inline]
    pub fn num_assigned(&self) -> usize {
        self.trail.len()
    }

    #[inline]
    pub fn decision_level(&self) -> u32 {
        self.level_starts.len() as u32
    }

    #[inline]
    pub fn value_of(&self, v: Var) -> LitVal {
        self.vars[v].value
    }

    #[inline]
    pub fn lit_value(&self, l: Lit) -> LitVal {
        match self.vars[l.var()].value {
            LitVal::Undef => LitVal::Undef,
            LitVal::True => {
                if l.sign() {
                    LitVal::False
                } else {
                    LitVal::True
                }
            }
            LitVal::False => {
                if l.sign() {
                    LitVal::True
                } else {
                    LitVal::False
                }
            }
        }
    }

    #[inline]
    pub fn is_true(&self, l: Lit) -> bool {
        self.lit_value(l) == LitVal::True
    }

    #[inline]
    pub fn is_false(&self, l: Lit) -> bool {
        self.lit_value(l) == LitVal::False
    }

    #[inline]
    pub fn level_of(&self, v: Var) -> u32 {
        self.vars[v].level
    }

    #[inline]
    pub fn reason_of(&self, v: Var) -> Reason {
        self.vars[v].reason
    }

    #[inline]
    pub fn saved_phase(&self, v: Var) -> Option<bool> {
        self.vars[v].saved_phase
    }

    pub fn trail(&self) -> &[Lit] {
        &self.trail
    }

    /// Pushes a new decision-level marker (called before a decision literal
    /// is enqueued).
    pub fn new_decision_level(&mut self) {
        self.level_starts.push(self.trail.len());
    }

    /// Assigns `lit` true. Returns `false` if `lit` was already false
    /// (conflict), `true` otherwise (including the already-true no-op case).
    pub fn enqueue(&mut self, lit: Lit, reason: Reason) -> bool {
        match self.lit_value(lit) {
            LitVal::True => true,
            LitVal::False => false,
            LitVal::Undef => {
                let level = self.decision_level();
                let v = lit.var();
                let data = &mut self.vars[v];
                data.value = if lit.sign() { LitVal::False } else { LitVal::True };
                data.level = level;
                data.reason = reason;
                self.trail.push(lit);
                true
            }
        }
    }

    /// Pops the next not-yet-scanned literal off the propagation queue.
    pub fn dequeue(&mut self) -> Option<Lit> {
        if self.qhead < self.trail.len() {
            let l = self.trail[self.qhead];
            self.qhead += 1;
            Some(l)
        } else {
            None
        }
    }

    pub fn queue_is_empty(&self) -> bool {
        self.qhead >= self.trail.len()
    }

    pub fn clear_queue(&mut self) {
        self.qhead = self.trail.len();
    }

    /// Undoes every assignment made at a level strictly greater than `level`,
    /// saving each unassigned variable's last value as its phase.
    pub fn backtrack(&mut self, level: u32) {
        if self.decision_level() <= level {
            return;
        }
        let target = self.level_starts[level as usize];
        for i in (target..self.trail.len()).rev() {
            let lit = self.trail[i];
            let v = lit.var();
            let was_true = self.vars[v].value == LitVal::True;
            self.vars[v].value = LitVal::Undef;
            self.vars[v].saved_phase = Some(was_true);
        }
        self.trail.truncate(target);
        self.level_starts.truncate(level as usize);
        self.qhead = self.trail.len();
    }

    pub fn all_assigned(&self) -> bool {
        self.trail.len() == self.vars.len()
    }
}

impl Default for Assignment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backtrack_restores_phase() {
        let mut a = Assignment::new();
        let v = a.new_var();
        a.new_decision_level();
        assert!(a.enqueue(v.pos_lit(), Reason::Decision));
        assert_eq!(a.value_of(v), LitVal::True);
        a.backtrack(0);
        assert_eq!(a.value_of(v), LitVal::Undef);
        assert_eq!(a.saved_phase(v), Some(true));
    }

    #[test]
    fn enqueue_conflict_detected() {
        let mut a = Assignment::new();
        let v = a.new_var();
        assert!(a.enqueue(v.pos_lit(), Reason::Decision));
        assert!(!a.enqueue(v.neg_lit(), Reason::Decision));
    }
}
