use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::SolverView;
use crate::sat::formula::Lit;

/// Returns the first unassigned variable in index order, using its saved
/// phase when one exists, else a pseudo-random sign from a seeded generator.
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new(seed: u64) -> Self {
        Random {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn decide(&mut self, view: &SolverView) -> Option<Lit> {
        let v = view.first_unassigned()?;
        if view.assignment.saved_phase(v).is_some() {
            Some(view.phase(v, false))
        } else {
            let sign_true = self.rng.gen_bool(0.5);
            Some(if sign_true { v.pos_lit() } else { v.neg_lit() })
        }
    }

    pub fn on_learnt(&mut self, _clause: &[Lit]) {}
    pub fn on_restart(&mut self) {}
}
