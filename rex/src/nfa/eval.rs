//! Epsilon closure ("set expansion") and the reference NFA evaluator.

use super::{NfaStateId, NodeKind, Nfa};

/// Reusable scratch buffers for epsilon expansion, so repeated calls (one per
/// evaluated byte, or one per DFA state built) don't reallocate.
#[derive(Default)]
pub struct Scratch {
    stack: Vec<NfaStateId>,
    visited: std::collections::HashSet<NfaStateId>,
}

/// Expands `states` to its ε-closure: every `Split` is replaced by its two
/// successors, recursively, until none remain. The result is sorted and
/// deduplicated, which makes it the canonical form used for hash-consing DFA
/// states.
///
/// Iterative with an explicit stack and a visited set: `Split`s reachable
/// through `*`/`+` back-edges make the split graph cyclic, so naive recursion
/// would not terminate.
pub fn expand(nfa: &Nfa, states: &[NfaStateId], scratch: &mut Scratch) -> Vec<NfaStateId> {
    scratch.stack.clear();
    scratch.visited.clear();
    let mut result = Vec::new();

    for &s in states {
        scratch.stack.push(s);
    }

    while let Some(s) = scratch.stack.pop() {
        if !scratch.visited.insert(s) {
            continue;
        }
        match nfa.state(s).kind {
            NodeKind::Split => {
                let out = nfa.state(s).out;
                scratch.stack.push(out[0]);
                scratch.stack.push(out[1]);
            }
            _ => result.push(s),
        }
    }

    result.sort_unstable();
    result.dedup();
    result
}

/// Walks the NFA byte-by-byte, maintaining the current ε-closed state set.
/// This is the reference/fallback evaluator: correct but quadratic-ish in the
/// worst case, used to cross-check the DFA evaluators (see
/// `SPEC_FULL.md` property #1).
pub struct NfaEvaluator<'a> {
    nfa: &'a Nfa,
    scratch: Scratch,
}

impl<'a> NfaEvaluator<'a> {
    pub fn new(nfa: &'a Nfa) -> Self {
        NfaEvaluator {
            nfa,
            scratch: Scratch::default(),
        }
    }

    pub fn matches(&mut self, candidate: &[u8]) -> bool {
        let Some(start) = self.nfa.start else {
            return candidate.is_empty();
        };

        let mut states = expand(self.nfa, &[start], &mut self.scratch);

        for &byte in candidate {
            if states.is_empty() {
                return false;
            }
            let mut next = Vec::new();
            for &s in &states {
                if self.nfa.state(s).matches(byte) {
                    next.push(self.nfa.state(s).out[0]);
                }
            }
            states = expand(self.nfa, &next, &mut self.scratch);
        }

        states
            .iter()
            .any(|&s| matches!(self.nfa.state(s).kind, NodeKind::Match))
    }
}
