use super::SolverView;
use crate::sat::clause::ClauseDb;
use crate::sat::formula::{Lit, LitMap, Var};

/// Jeroslow-Wang: per-literal weight summing 2^(-|c|) over every clause
/// containing that literal, favoring literals in many short clauses.
pub struct JeroslowWang {
    weight: LitMap<f64>,
    num_vars: usize,
}

impl JeroslowWang {
    pub fn new(clauses: &ClauseDb) -> Self {
        let mut jw = JeroslowWang {
            weight: LitMap::new(),
            num_vars: 0,
        };
        for (_, c) in clauses.iter() {
            jw.add_clause(&c.lits);
        }
        jw
    }

    fn ensure_var(&mut self, v: Var) {
        while self.num_vars <= v.index() {
            self.weight.init_for(Var::from_index(self.num_vars), 0.0);
            self.num_vars += 1;
        }
    }

    fn add_clause(&mut self, lits: &[Lit]) {
        if lits.is_empty() {
            return;
        }
        let contribution = 2f64.powi(-(lits.len() as i32));
        for &l in lits {
            self.ensure_var(l.var());
            self.weight[l] += contribution;
        }
    }

    pub fn decide(&mut self, view: &SolverView) -> Option<Lit> {
        let mut best: Option<(Lit, f64)> = None;
        for i in 0..view.assignment.num_vars() {
            let v = Var::from_index(i);
            if !view.is_unassigned(v) {
                continue;
            }
            self.ensure_var(v);
            for &l in &[v.pos_lit(), v.neg_lit()] {
                let w = self.weight[l];
                match best {
                    Some((_, best_w)) if best_w >= w => {}
                    _ => best = Some((l, w)),
                }
            }
        }
        best.map(|(l, _)| {
            let natural_true = !l.sign();
            view.phase(l.var(), natural_true)
        })
    }

    pub fn on_learnt(&mut self, clause: &[Lit]) {
        self.add_clause(clause);
    }

    pub fn on_restart(&mut self) {}
}
