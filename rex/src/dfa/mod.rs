//! Subset-construction DFA built lazily or eagerly from an [`Nfa`], with
//! transitions compressed into sorted, disjoint byte intervals rather than a
//! dense 256-entry table per state.

pub mod eval;

use crate::interval::{reconcile, Claim};
use crate::nfa::eval::{expand, Scratch};
use crate::nfa::{Nfa, NfaStateId, NodeKind};
use std::collections::HashMap;

pub type DfaStateId = usize;

/// One outgoing transition band: bytes in `[lo, hi]` go to `successor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub lo: u8,
    pub hi: u8,
    pub successor: DfaStateId,
}

#[derive(Debug, Clone)]
pub struct DfaState {
    /// The canonical (sorted, deduped, split-free) NFA state set this DFA
    /// state was hash-consed from.
    nfa_set: Vec<NfaStateId>,
    pub is_match: bool,
    /// Sorted, disjoint, non-adjacent-mergeable transition bands.
    pub neighbors: Vec<Neighbor>,
    /// Eager construction fills every state's neighbors up front; lazy
    /// construction defers it to first visit via [`Dfa::fill_neighbors`].
    processed: bool,
}

/// A subset-construction DFA over bytes, built from an [`Nfa`].
///
/// `start` is `None` only for the "null" DFA built from an NFA with no start
/// state (an empty token stream), which accepts only the empty candidate.
#[derive(Debug, Clone)]
pub struct Dfa {
    states: Vec<DfaState>,
    set_to_state: HashMap<Vec<NfaStateId>, DfaStateId>,
    pub start: Option<DfaStateId>,
    max_states: Option<usize>,
}

impl Dfa {
    pub fn state(&self, id: DfaStateId) -> &DfaState {
        &self.states[id]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn hash_cons(&mut self, nfa: &Nfa, set: Vec<NfaStateId>) -> Result<DfaStateId, crate::nfa::BuildError> {
        if let Some(&id) = self.set_to_state.get(&set) {
            return Ok(id);
        }
        if let Some(max) = self.max_states {
            if self.states.len() >= max {
                return Err(crate::nfa::BuildError::TooManyStates);
            }
        }
        let is_match = set
            .iter()
            .any(|&s| matches!(nfa.state(s).kind, NodeKind::Match));
        let id = self.states.len();
        self.states.push(DfaState {
            nfa_set: set.clone(),
            is_match,
            neighbors: Vec::new(),
            processed: false,
        });
        self.set_to_state.insert(set, id);
        Ok(id)
    }

    /// Builds an eager DFA: every reachable state is fully expanded before
    /// this function returns.
    pub fn build_eager(nfa: &Nfa, max_states: Option<usize>) -> Result<Dfa, crate::nfa::BuildError> {
        let mut dfa = Dfa::new_shell(nfa, max_states)?;
        let Some(start) = dfa.start else {
            return Ok(dfa);
        };

        let mut worklist = vec![start];
        let mut scratch = Scratch::default();
        while let Some(id) = worklist.pop() {
            if dfa.states[id].processed {
                continue;
            }
            let newly_created = dfa.fill_neighbors_inner(nfa, id, &mut scratch)?;
            worklist.extend(newly_created);
        }

        Ok(dfa)
    }

    /// Builds a lazy DFA: only the start state is allocated; every other
    /// state is expanded on first visit via [`Dfa::fill_neighbors`].
    pub fn build_lazy(nfa: &Nfa, max_states: Option<usize>) -> Result<Dfa, crate::nfa::BuildError> {
        Dfa::new_shell(nfa, max_states)
    }

    fn new_shell(nfa: &Nfa, max_states: Option<usize>) -> Result<Dfa, crate::nfa::BuildError> {
        let mut dfa = Dfa {
            states: Vec::new(),
            set_to_state: HashMap::new(),
            start: None,
            max_states,
        };

        let Some(nfa_start) = nfa.start else {
            return Ok(dfa);
        };

        let mut scratch = Scratch::default();
        let start_set = expand(nfa, &[nfa_start], &mut scratch);
        let start_id = dfa.hash_cons(nfa, start_set)?;
        dfa.start = Some(start_id);
        Ok(dfa)
    }

    /// Computes and records the outgoing neighbors of `id`, hash-consing any
    /// newly discovered successor state sets. Idempotent: a no-op if `id` is
    /// already processed. Returns the ids of any newly created (unprocessed)
    /// successor states, so eager construction can push them onto its
    /// worklist.
    pub fn fill_neighbors(&mut self, nfa: &Nfa, id: DfaStateId) -> Result<(), crate::nfa::BuildError> {
        let mut scratch = Scratch::default();
        self.fill_neighbors_inner(nfa, id, &mut scratch)?;
        Ok(())
    }

    fn fill_neighbors_inner(
        &mut self,
        nfa: &Nfa,
        id: DfaStateId,
        scratch: &mut Scratch,
    ) -> Result<Vec<DfaStateId>, crate::nfa::BuildError> {
        if self.states[id].processed {
            return Ok(Vec::new());
        }

        let mut claims: Vec<Claim<NfaStateId>> = Vec::new();
        for &nfa_id in &self.states[id].nfa_set.clone() {
            match &nfa.state(nfa_id).kind {
                NodeKind::Literal(c) => claims.push(Claim {
                    lo: *c,
                    hi: *c,
                    item: nfa_id,
                }),
                NodeKind::Wildcard => claims.push(Claim {
                    lo: 0,
                    hi: u8::MAX,
                    item: nfa_id,
                }),
                NodeKind::Ranges(ranges) => {
                    for r in ranges {
                        claims.push(Claim {
                            lo: r.lo,
                            hi: r.hi,
                            item: nfa_id,
                        });
                    }
                }
                NodeKind::Match | NodeKind::Split => {}
            }
        }

        let bands = reconcile(&claims);
        let mut neighbors = Vec::with_capacity(bands.len());
        let mut created = Vec::new();

        for band in bands {
            let successors: Vec<NfaStateId> = band
                .items
                .iter()
                .map(|&nfa_id| nfa.state(nfa_id).out[0])
                .collect();
            let canonical = expand(nfa, &successors, scratch);
            let existed = self.set_to_state.contains_key(&canonical);
            let successor = self.hash_cons(nfa, canonical)?;
            if !existed {
                created.push(successor);
            }
            neighbors.push(Neighbor {
                lo: band.lo,
                hi: band.hi,
                successor,
            });
        }

        self.states[id].neighbors = neighbors;
        self.states[id].processed = true;
        Ok(created)
    }

    fn is_processed(&self, id: DfaStateId) -> bool {
        self.states[id].processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::Nfa;
    use crate::parser::to_postfix;

    fn build_eager(pattern: &str) -> (Nfa, Dfa) {
        let tokens = to_postfix(pattern.as_bytes()).unwrap();
        let nfa = Nfa::build(&tokens).unwrap();
        let dfa = Dfa::build_eager(&nfa, None).unwrap();
        (nfa, dfa)
    }

    #[test]
    fn eager_build_processes_every_state() {
        let (_, dfa) = build_eager("^a*b$");
        assert!(dfa.states.iter().all(|s| s.processed));
    }

    #[test]
    fn lazy_build_only_allocates_start() {
        let tokens = to_postfix(b"^a*b$").unwrap();
        let nfa = Nfa::build(&tokens).unwrap();
        let dfa = Dfa::build_lazy(&nfa, None).unwrap();
        assert_eq!(dfa.len(), 1);
        assert!(!dfa.is_processed(dfa.start.unwrap()));
    }

    #[test]
    fn too_many_states_is_capped() {
        let tokens = to_postfix(b"^[a-z][a-z][a-z][a-z]$").unwrap();
        let nfa = Nfa::build(&tokens).unwrap();
        let result = Dfa::build_eager(&nfa, Some(1));
        assert_eq!(result.err(), Some(crate::nfa::BuildError::TooManyStates));
    }
}
