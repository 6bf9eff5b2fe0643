//! Byte-driven DFA evaluation: binary search over sorted neighbor intervals,
//! with on-demand expansion for lazily-built DFAs.

use super::{Dfa, DfaStateId};
use crate::nfa::Nfa;

/// Finds the neighbor band covering `byte`, if any, via binary search over
/// the sorted, disjoint bands — mirrors the reference implementation's
/// `findNeighbor` (`std::lower_bound` plus a one-step fallback).
fn find_neighbor(neighbors: &[super::Neighbor], byte: u8) -> Option<DfaStateId> {
    let idx = neighbors.partition_point(|n| n.hi < byte);
    neighbors
        .get(idx)
        .filter(|n| n.lo <= byte && byte <= n.hi)
        .map(|n| n.successor)
}

/// Evaluates `candidate` against a fully-processed (eager) [`Dfa`]. Every
/// state visited is expected to already be processed; an unprocessed state
/// mid-walk would indicate the DFA was not actually built eagerly.
pub fn eval_processed(dfa: &Dfa, candidate: &[u8]) -> bool {
    let Some(start) = dfa.start else {
        return candidate.is_empty();
    };

    let mut current = start;
    for &byte in candidate {
        debug_assert!(dfa.is_processed(current), "eager DFA has an unprocessed state");
        match find_neighbor(&dfa.state(current).neighbors, byte) {
            Some(next) => current = next,
            None => return false,
        }
    }

    dfa.state(current).is_match
}

/// Evaluates candidates against a [`Dfa`], expanding lazily-built states on
/// demand. Holds `&mut Dfa` since a lazy DFA mutates its own state table
/// during evaluation.
pub struct DfaEvaluator<'a> {
    nfa: &'a Nfa,
    dfa: &'a mut Dfa,
}

impl<'a> DfaEvaluator<'a> {
    pub fn new(nfa: &'a Nfa, dfa: &'a mut Dfa) -> Self {
        DfaEvaluator { nfa, dfa }
    }

    pub fn matches(&mut self, candidate: &[u8]) -> Result<bool, crate::nfa::BuildError> {
        let Some(start) = self.dfa.start else {
            return Ok(candidate.is_empty());
        };

        let mut current = start;
        for &byte in candidate {
            if !self.dfa.is_processed(current) {
                self.dfa.fill_neighbors(self.nfa, current)?;
            }
            match find_neighbor(&self.dfa.state(current).neighbors, byte) {
                Some(next) => current = next,
                None => return Ok(false),
            }
        }

        if !self.dfa.is_processed(current) {
            self.dfa.fill_neighbors(self.nfa, current)?;
        }
        Ok(self.dfa.state(current).is_match)
    }
}
