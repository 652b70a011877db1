//! The RL driver loop (spec §2 item 5, §4.8): drives the same CDCL engine as
//! the baseline driver, but at fixed conflict-count epoch boundaries it
//! snapshots telemetry, asks the LinUCB controller for an arm, switches the
//! active heuristic, and once the next epoch closes, computes a reward and
//! updates the controller.

use std::time::Instant;

use crate::sat::bandit::LinUcb;
use crate::sat::context::{build_context, compute_reward, ContextInputs, CounterSnapshot, RewardWeights};
use crate::sat::heuristics::HeuristicKind;
use crate::sat::solver::{Engine, StepResult};
use crate::sat::{SolveStatus, Stats};

pub struct RlConfig {
    pub epoch_size: u64,
    pub restart_interval: u64,
    pub alpha: f64,
    pub seed: u64,
    pub reward_weights: RewardWeights,
}

impl Default for RlConfig {
    fn default() -> Self {
        RlConfig {
            epoch_size: 50,
            restart_interval: 200,
            alpha: 0.3,
            seed: 0,
            reward_weights: RewardWeights::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EpochRecord {
    pub epoch_index: u64,
    pub arm: &'static str,
    pub context: Vec<f64>,
    pub reward: f64,
    pub conflicts_in_epoch: u64,
    pub propagations_in_epoch: u64,
    pub decisions_in_epoch: u64,
    pub avg_lbd_in_epoch: f64,
}

pub struct RlResult {
    pub status: SolveStatus,
    pub stats: Stats,
    pub elapsed_seconds: f64,
    pub epochs: Vec<EpochRecord>,
}

enum EpochState {
    Init,
    Active {
        epoch_index: u64,
        arm: HeuristicKind,
        ctx: Vec<f64>,
        start: CounterSnapshot,
        /// Sum and count of the LBDs of clauses learnt so far in this
        /// epoch, reset every time a new epoch begins. Drives the reward's
        /// per-epoch LBD average directly, rather than through the engine's
        /// windowed running average (spec §9).
        lbd_sum: u64,
        lbd_count: u64,
    },
}

fn arm_index(kind: HeuristicKind) -> usize {
    HeuristicKind::ALL.iter().position(|k| *k == kind).unwrap()
}

fn snapshot(engine: &Engine) -> CounterSnapshot {
    CounterSnapshot {
        conflicts: engine.stats.conflicts,
        decisions: engine.stats.decisions,
        propagations: engine.stats.propagations,
        restarts: engine.stats.restarts,
        learnt_clauses: engine.learnt_count(),
    }
}

fn context_now(engine: &Engine, epoch_size: u64, snap: &CounterSnapshot, prev: &CounterSnapshot) -> Vec<f64> {
    let learnt_this_epoch = snap.learnt_clauses.saturating_sub(prev.learnt_clauses);
    build_context(&ContextInputs {
        recent_lbd_avg: engine.recent_lbd_avg(),
        conflicts: snap.conflicts,
        decisions: snap.decisions,
        propagations: snap.propagations,
        num_vars: engine.num_vars(),
        num_assigned: engine.num_assigned(),
        max_activity: engine.max_activity(),
        mean_activity: engine.mean_activity(),
        total_learnt: snap.learnt_clauses,
        learnt_this_epoch,
        epoch_size,
        restarts: snap.restarts,
        num_clauses: engine.num_clauses(),
        satisfied_clauses: engine.satisfied_clause_count(),
        decision_level: engine.decision_level(),
    })
}

/// `deadline`, if set, is checked between CDCL steps (spec §5: the core has
/// no notion of a clock, so the driver enforces the wall-clock budget).
pub fn solve(
    num_vars: usize,
    clauses: &[Vec<i64>],
    config: RlConfig,
    deadline: Option<Instant>,
) -> RlResult {
    let start = Instant::now();
    let mut engine = Engine::new(
        num_vars,
        clauses,
        HeuristicKind::Vsids,
        config.restart_interval,
        config.seed,
    );
    let mut bandit = LinUcb::new(HeuristicKind::ALL.len(), crate::sat::context::CONTEXT_DIM, config.alpha);
    let mut state = EpochState::Init;
    let mut epochs = Vec::new();
    let mut prev_snapshot = CounterSnapshot::default();
    let mut prev_epoch_avg_lbd = 0.0;

    if engine.is_trivially_unsat() {
        return RlResult {
            status: SolveStatus::Unsat,
            stats: engine.stats,
            elapsed_seconds: start.elapsed().as_secs_f64(),
            epochs,
        };
    }

    loop {
        if let Some(d) = deadline {
            if Instant::now() >= d {
                return RlResult {
                    status: SolveStatus::Timeout,
                    stats: engine.stats,
                    elapsed_seconds: start.elapsed().as_secs_f64(),
                    epochs,
                };
            }
        }

        match engine.step() {
            StepResult::Continuing => {}

            StepResult::ConflictResolved { lbd } => match &state {
                EpochState::Init => {
                    let snap = snapshot(&engine);
                    let ctx = context_now(&engine, config.epoch_size, &snap, &prev_snapshot);
                    let arm = HeuristicKind::ALL[bandit.select(&ctx)];
                    engine.set_heuristic(arm);
                    prev_snapshot = snap;
                    state = EpochState::Active {
                        epoch_index: 0,
                        arm,
                        ctx,
                        start: snap,
                        lbd_sum: 0,
                        lbd_count: 0,
                    };
                }

                EpochState::Active {
                    epoch_index,
                    arm,
                    ctx,
                    start,
                    lbd_sum,
                    lbd_count,
                } => {
                    let lbd_sum = *lbd_sum + lbd as u64;
                    let lbd_count = *lbd_count + 1;

                    let conflicts_in_epoch = engine.stats.conflicts - start.conflicts;
                    if conflicts_in_epoch >= config.epoch_size {
                        let end = snapshot(&engine);
                        let this_epoch_avg_lbd = lbd_sum as f64 / lbd_count as f64;
                        let reward = compute_reward(
                            start,
                            &end,
                            prev_epoch_avg_lbd,
                            this_epoch_avg_lbd,
                            config.epoch_size,
                            &config.reward_weights,
                        );
                        bandit.update(arm_index(*arm), ctx, reward);

                        epochs.push(EpochRecord {
                            epoch_index: *epoch_index,
                            arm: arm.name(),
                            context: ctx.clone(),
                            reward,
                            conflicts_in_epoch,
                            propagations_in_epoch: end.propagations - start.propagations,
                            decisions_in_epoch: end.decisions - start.decisions,
                            avg_lbd_in_epoch: this_epoch_avg_lbd,
                        });
                        prev_epoch_avg_lbd = this_epoch_avg_lbd;

                        let new_ctx = context_now(&engine, config.epoch_size, &end, &prev_snapshot);
                        let new_arm = HeuristicKind::ALL[bandit.select(&new_ctx)];
                        engine.set_heuristic(new_arm);
                        prev_snapshot = end;
                        state = EpochState::Active {
                            epoch_index: epoch_index + 1,
                            arm: new_arm,
                            ctx: new_ctx,
                            start: end,
                            lbd_sum: 0,
                            lbd_count: 0,
                        };
                    } else {
                        state = EpochState::Active {
                            epoch_index: *epoch_index,
                            arm: *arm,
                            ctx: ctx.clone(),
                            start: *start,
                            lbd_sum,
                            lbd_count,
                        };
                    }
                }
            },

            StepResult::Sat(model) => {
                return RlResult {
                    status: SolveStatus::Sat(model),
                    stats: engine.stats,
                    elapsed_seconds: start.elapsed().as_secs_f64(),
                    epochs,
                };
            }

            StepResult::Unsat => {
                return RlResult {
                    status: SolveStatus::Unsat,
                    stats: engine.stats,
                    elapsed_seconds: start.elapsed().as_secs_f64(),
                    epochs,
                };
            }
        }
    }
}
