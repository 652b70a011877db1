//! Context-vector construction and reward computation (spec §4.7).

pub const CONTEXT_DIM: usize = 11;

/// A snapshot of solver counters, taken at an epoch boundary, used both to
/// build the context vector and to compute the reward once the epoch closes.
/// LBD is deliberately absent here: the reward's LBD term is driven by a
/// per-epoch sum/count the caller accumulates itself (spec §9), not by a
/// snapshot of the engine's windowed running average.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterSnapshot {
    pub conflicts: u64,
    pub decisions: u64,
    pub propagations: u64,
    pub restarts: u64,
    pub learnt_clauses: usize,
}

pub struct RewardWeights {
    pub w_propagations: f64,
    pub w_conflicts: f64,
    pub w_lbd: f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        RewardWeights {
            w_propagations: 1e-3,
            w_conflicts: 1e-3,
            w_lbd: 1e-2,
        }
    }
}

/// Inputs needed to build the fixed-order, 11-dimensional context vector.
pub struct ContextInputs {
    pub recent_lbd_avg: f64,
    pub conflicts: u64,
    pub decisions: u64,
    pub propagations: u64,
    pub num_vars: usize,
    pub num_assigned: usize,
    pub max_activity: f64,
    pub mean_activity: f64,
    pub total_learnt: usize,
    pub learnt_this_epoch: usize,
    pub epoch_size: u64,
    pub restarts: u64,
    pub num_clauses: usize,
    pub satisfied_clauses: usize,
    pub decision_level: u32,
}

/// Builds the context vector in the fixed feature order of spec §4.7. Every
/// dimension is finite and bounded by construction.
pub fn build_context(inp: &ContextInputs) -> Vec<f64> {
    let decisions_denom = inp.decisions.max(1) as f64;
    let activity_ratio = if inp.mean_activity == 0.0 {
        1.0
    } else {
        inp.max_activity / inp.mean_activity
    };

    vec![
        inp.recent_lbd_avg,
        inp.conflicts as f64 / decisions_denom,
        inp.propagations as f64 / decisions_denom,
        if inp.num_vars == 0 {
            0.0
        } else {
            inp.num_assigned as f64 / inp.num_vars as f64
        },
        activity_ratio,
        inp.total_learnt as f64 / (1.0 + inp.total_learnt as f64),
        inp.learnt_this_epoch as f64 / inp.epoch_size.max(1) as f64,
        inp.restarts as f64 / (1.0 + inp.conflicts as f64),
        if inp.num_clauses == 0 {
            0.0
        } else {
            inp.satisfied_clauses as f64 / inp.num_clauses as f64
        },
        if inp.num_vars == 0 {
            0.0
        } else {
            inp.decision_level as f64 / inp.num_vars as f64
        },
        1.0,
    ]
}

/// Reward for a just-closed epoch: more propagation is good, more conflicts
/// is bad, higher LBD is bad. Clamped to [-10, 10] (spec §4.7).
///
/// `prev_epoch_avg_lbd`/`this_epoch_avg_lbd` must each be a per-epoch
/// `lbd_sum / lbd_count` the caller accumulated over exactly the conflicts
/// in that epoch — not the engine's windowed running average, which mixes
/// conflicts from outside the epoch and is explicitly disallowed as a proxy
/// here (spec §9).
pub fn compute_reward(
    start: &CounterSnapshot,
    end: &CounterSnapshot,
    prev_epoch_avg_lbd: f64,
    this_epoch_avg_lbd: f64,
    epoch_size: u64,
    weights: &RewardWeights,
) -> f64 {
    let epoch = epoch_size.max(1) as f64;
    let d_props = (end.propagations - start.propagations) as f64;
    let d_confl = (end.conflicts - start.conflicts) as f64;
    let d_lbd = this_epoch_avg_lbd - prev_epoch_avg_lbd;

    let r = weights.w_propagations * d_props / epoch
        - weights.w_conflicts * d_confl / epoch
        - weights.w_lbd * d_lbd;

    r.clamp(-10.0, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_has_fixed_dimension_and_bias() {
        let inp = ContextInputs {
            recent_lbd_avg: 3.0,
            conflicts: 10,
            decisions: 20,
            propagations: 50,
            num_vars: 10,
            num_assigned: 5,
            max_activity: 4.0,
            mean_activity: 2.0,
            total_learnt: 3,
            learnt_this_epoch: 1,
            epoch_size: 50,
            restarts: 0,
            num_clauses: 20,
            satisfied_clauses: 15,
            decision_level: 2,
        };
        let ctx = build_context(&inp);
        assert_eq!(ctx.len(), CONTEXT_DIM);
        assert_eq!(*ctx.last().unwrap(), 1.0);
        assert!(ctx.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn reward_sign_conventions() {
        let weights = RewardWeights::default();
        let start = CounterSnapshot {
            conflicts: 0,
            propagations: 0,
            ..Default::default()
        };
        let more_props = CounterSnapshot {
            propagations: 1000,
            ..start
        };
        let more_conflicts = CounterSnapshot {
            conflicts: 1000,
            ..start
        };
        assert!(compute_reward(&start, &more_props, 5.0, 5.0, 50, &weights) > 0.0);
        assert!(compute_reward(&start, &more_conflicts, 5.0, 5.0, 50, &weights) < 0.0);
        assert!(compute_reward(&start, &start, 5.0, 10.0, 50, &weights) < 0.0);
    }

    #[test]
    fn reward_is_clamped() {
        let weights = RewardWeights {
            w_propagations: 1.0,
            w_conflicts: 0.0,
            w_lbd: 0.0,
        };
        let start = CounterSnapshot::default();
        let end = CounterSnapshot {
            propagations: 1_000_000,
            ..Default::default()
        };
        let r = compute_reward(&start, &end, 0.0, 0.0, 1, &weights);
        assert_eq!(r, 10.0);
    }
}
