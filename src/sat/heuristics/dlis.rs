use super::SolverView;
use crate::sat::formula::{Lit, Var};

/// Dynamic Largest Individual Sum: counts, for each unassigned literal, its
/// occurrences in currently unsatisfied clauses, and picks the maximum.
/// Per spec §4.5/§9 this is a fresh scan on every decision; caching is left
/// as an optional optimization that must not change the tie-broken result.
#[derive(Default)]
pub struct Dlis;

impl Dlis {
    pub fn new() -> Self {
        Dlis
    }

    pub fn decide(&mut self, view: &SolverView) -> Option<Lit> {
        let mut counts: std::collections::HashMap<Lit, u64> = std::collections::HashMap::new();

        for (_, c) in view.clauses.iter() {
            if c.lits.iter().any(|&l| view.assignment.is_true(l)) {
                continue;
            }
            for &l in &c.lits {
                if view.is_unassigned(l.var()) {
                    *counts.entry(l).or_insert(0) += 1;
                }
            }
        }

        let mut best: Option<(Lit, u64)> = None;
        for i in 0..view.assignment.num_vars() {
            let v = Var::from_index(i);
            if !view.is_unassigned(v) {
                continue;
            }
            // Positive sign first on ties, per spec.
            for &l in &[v.pos_lit(), v.neg_lit()] {
                let count = *counts.get(&l).unwrap_or(&0);
                match best {
                    Some((_, best_count)) if best_count >= count => {}
                    _ => best = Some((l, count)),
                }
            }
        }
        best.map(|(l, _)| {
            let natural_true = !l.sign();
            view.phase(l.var(), natural_true)
        })
    }

    pub fn on_learnt(&mut self, _clause: &[Lit]) {}
    pub fn on_restart(&mut self) {}
}
