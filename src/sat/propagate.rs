//! Boolean constraint propagation over the two-watched-literal invariant.
//! Implements spec §4.2.

use crate::sat::assignment::{Assignment, LitVal, Reason};
use crate::sat::clause::{ClauseDb, ClauseId};
use crate::sat::watches::Watches;

pub enum PropagateResult {
    NoConflict,
    Conflict(ClauseId),
}

/// Runs BCP to fixpoint. Returns the number of literals forced by unit
/// clauses (spec §3's "propagations" counter) alongside the outcome.
pub fn propagate(
    assignment: &mut Assignment,
    clauses: &mut ClauseDb,
    watches: &mut Watches,
) -> (PropagateResult, u64) {
    let mut forced = 0u64;
    while let Some(lit) = assignment.dequeue() {
        let false_lit = !lit;
        let list = watches.take(lit);
        let mut kept = Vec::with_capacity(list.len());
        let mut conflict = None;

        for cid in list {
            if conflict.is_some() {
                kept.push(cid);
                continue;
            }

            let c = clauses.get_mut(cid);
            // Ensure the falsified watch sits at position 1.
            if c.lits[0] == false_lit {
                c.lits.swap(0, 1);
            }
            let first = c.lits[0];

            if assignment.is_true(first) {
                kept.push(cid);
                continue;
            }

            let mut replaced = false;
            for i in 2..c.lits.len() {
                let cand = c.lits[i];
                if !assignment.is_false(cand) {
                    c.lits.swap(1, i);
                    replaced = true;
                    watches.push(!cand, cid);
                    break;
                }
            }
            if replaced {
                continue;
            }

            kept.push(cid);
            if assignment.lit_value(first) == LitVal::Undef {
                assignment.enqueue(first, Reason::Clause(cid));
                forced += 1;
            } else {
                conflict = Some(cid);
            }
        }

        watches.replace(lit, kept);

        if let Some(cid) = conflict {
            assignment.clear_queue();
            return (PropagateResult::Conflict(cid), forced);
        }
    }
    (PropagateResult::NoConflict, forced)
}
