//! Watch lists: for each literal, the clauses currently watching it.
//! Grounded on `sat/minisat/search/watches.rs`.

use crate::sat::clause::ClauseId;
use crate::sat::formula::{Lit, LitMap, Var};

#[derive(Default)]
pub struct Watches {
    watches: LitMap<Vec<ClauseId>>,
}

impl Watches {
    pub fn new() -> Self {
        Watches {
            watches: LitMap::new(),
        }
    }

    pub fn init_var(&mut self, v: Var) {
        self.watches.init_for(v, Vec::new());
    }

    /// A 2+-literal clause is watched at its two head literals (positions 0
    /// and 1), and is found in the watch list of their negations (spec §3:
    /// "when a watched literal becomes false, the clause is visited").
    pub fn watch(&mut self, c0: Lit, c1: Lit, cid: ClauseId) {
        self.watches[!c0].push(cid);
        self.watches[!c1].push(cid);
    }

    pub fn unwatch(&mut self, c0: Lit, c1: Lit, cid: ClauseId) {
        self.watches[!c0].retain(|&x| x != cid);
        self.watches[!c1].retain(|&x| x != cid);
    }

    /// Takes ownership of the watch list for `lit`, leaving an empty one in
    /// its place, so the caller can rebuild it in place while scanning.
    pub fn take(&mut self, lit: Lit) -> Vec<ClauseId> {
        std::mem::take(&mut self.watches[lit])
    }

    pub fn replace(&mut self, lit: Lit, list: Vec<ClauseId>) {
        self.watches[lit] = list;
    }

    pub fn push(&mut self, lit: Lit, cid: ClauseId) {
        self.watches[lit].push(cid);
    }
}
