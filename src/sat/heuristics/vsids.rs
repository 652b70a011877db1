use super::SolverView;
use crate::sat::formula::{Lit, Var};

/// Activity-based (VSIDS) heuristic: picks the unassigned variable with
/// maximum activity, ties broken by lowest index. Polarity = saved phase,
/// default false.
#[derive(Default)]
pub struct Vsids;

impl Vsids {
    pub fn new() -> Self {
        Vsids
    }

    pub fn decide(&mut self, view: &SolverView) -> Option<Lit> {
        let mut best: Option<(Var, f64)> = None;
        for (v, &act) in view.activity.iter() {
            if !view.is_unassigned(v) {
                continue;
            }
            match best {
                Some((_, best_act)) if best_act >= act => {}
                _ => best = Some((v, act)),
            }
        }
        best.map(|(v, _)| view.phase(v, false))
    }

    pub fn on_learnt(&mut self, _clause: &[Lit]) {}
    pub fn on_restart(&mut self) {}
}
