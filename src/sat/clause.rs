//! Clause storage. Original and learnt clauses share a single arena; the only
//! distinction kept is a `learnt` flag used for bookkeeping (LBD, VSIDS-style
//! clause-count features), per spec §3.

use crate::sat::formula::Lit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClauseId(usize);

#[derive(Debug, Clone)]
pub struct Clause {
    pub lits: Vec<Lit>,
    pub learnt: bool,
    pub lbd: u32,
}

impl Clause {
    #[inline]
    pub fn len(&self) -> usize {
        self.lits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }
}

/// Owns every clause ever added (original or learnt) in a flat `Vec`. Watch
/// lists elsewhere hold `ClauseId`s as non-owning back-references (spec §9).
#[derive(Debug, Default)]
pub struct ClauseDb {
    clauses: Vec<Clause>,
}

impl ClauseDb {
    pub fn new() -> Self {
        ClauseDb {
            clauses: Vec::new(),
        }
    }

    pub fn add(&mut self, lits: Vec<Lit>, learnt: bool, lbd: u32) -> ClauseId {
        let id = ClauseId(self.clauses.len());
        self.clauses.push(Clause { lits, learnt, lbd });
        id
    }

    #[inline]
    pub fn get(&self, id: ClauseId) -> &Clause {
        &self.clauses[id.0]
    }

    #[inline]
    pub fn get_mut(&mut self, id: ClauseId) -> &mut Clause {
        &mut self.clauses[id.0]
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClauseId, &Clause)> {
        self.clauses
            .iter()
            .enumerate()
            .map(|(i, c)| (ClauseId(i), c))
    }

    pub fn learnt_count(&self) -> usize {
        self.clauses.iter().filter(|c| c.learnt).count()
    }
}
