//! Thompson-construction NFA, built directly from a postfix [`Token`](crate::token::Token)
//! stream. States live in a flat arena (`Vec<NfaState>`) addressed by index rather than
//! by raw pointer, since a `Vec` index stays stable across reallocation in Rust.

pub mod eval;

use crate::token::{ClassInterval, Token};
use thiserror::Error;

/// An index into the NFA's state arena.
pub type NfaStateId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Matches exactly one byte.
    Literal(u8),
    /// Matches any byte.
    Wildcard,
    /// Matches one byte that falls within any of the (disjoint) intervals.
    Ranges(Vec<ClassInterval>),
    /// An ε-node with two (possibly equal) outgoing ε-moves.
    Split,
    /// Accepting state; has no outgoing moves.
    Match,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaState {
    pub kind: NodeKind,
    /// `out[0]` is the sole successor for `Literal`/`Wildcard`/`Ranges`; both
    /// `out[0]` and `out[1]` are used by `Split`. `Match` uses neither.
    pub out: [NfaStateId; 2],
}

impl NfaState {
    fn matches(&self, byte: u8) -> bool {
        match &self.kind {
            NodeKind::Literal(c) => *c == byte,
            NodeKind::Wildcard => true,
            NodeKind::Ranges(ranges) => ranges.iter().any(|r| r.lo <= byte && byte <= r.hi),
            NodeKind::Split | NodeKind::Match => false,
        }
    }
}

/// One of the two outgoing slots of a [`NfaState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Out {
    Zero,
    One,
}

/// A dangling outgoing slot that still needs to be patched to point somewhere.
#[derive(Debug, Clone, Copy)]
struct ExitSlot {
    state: NfaStateId,
    which: Out,
}

/// An in-progress piece of the NFA graph: an entry point and the list of
/// as-yet-unconnected outgoing slots ("exits") that will eventually be wired to
/// whatever comes next.
struct Fragment {
    entry: NfaStateId,
    exits: Vec<ExitSlot>,
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum BuildError {
    #[error("postfix token stream underflowed the fragment stack (malformed input)")]
    Underflow,
    #[error("DFA construction exceeded the configured state limit")]
    TooManyStates,
}

/// A Thompson-construction NFA over bytes.
#[derive(Debug, Clone)]
pub struct Nfa {
    states: Vec<NfaState>,
    /// `None` for the "null" NFA built from an empty token stream: such a
    /// pattern accepts only the empty candidate.
    pub start: Option<NfaStateId>,
}

impl Nfa {
    pub fn state(&self, id: NfaStateId) -> &NfaState {
        &self.states[id]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn alloc(&mut self, kind: NodeKind) -> NfaStateId {
        self.states.push(NfaState {
            kind,
            out: [0, 0],
        });
        self.states.len() - 1
    }

    fn patch(&mut self, slot: ExitSlot, target: NfaStateId) {
        match slot.which {
            Out::Zero => self.states[slot.state].out[0] = target,
            Out::One => self.states[slot.state].out[1] = target,
        }
    }

    fn connect(&mut self, fragment: &mut Fragment, entry: NfaStateId) {
        for slot in fragment.exits.drain(..) {
            self.patch(slot, entry);
        }
    }

    /// Builds the NFA for a single postfix [`Token`] stream, per the
    /// literal/concat/union/star/question/plus construction table.
    pub fn build(tokens: &[Token]) -> Result<Nfa, BuildError> {
        let mut nfa = Nfa {
            states: Vec::new(),
            start: None,
        };

        if tokens.is_empty() {
            return Ok(nfa);
        }

        let mut fragments: Vec<Fragment> = Vec::new();

        for token in tokens {
            match token {
                Token::Literal(c) => {
                    let s = nfa.alloc(NodeKind::Literal(*c));
                    fragments.push(Fragment {
                        entry: s,
                        exits: vec![ExitSlot {
                            state: s,
                            which: Out::Zero,
                        }],
                    });
                }
                Token::Dot => {
                    let s = nfa.alloc(NodeKind::Wildcard);
                    fragments.push(Fragment {
                        entry: s,
                        exits: vec![ExitSlot {
                            state: s,
                            which: Out::Zero,
                        }],
                    });
                }
                Token::Class(ranges) => {
                    let s = nfa.alloc(NodeKind::Ranges(ranges.clone()));
                    fragments.push(Fragment {
                        entry: s,
                        exits: vec![ExitSlot {
                            state: s,
                            which: Out::Zero,
                        }],
                    });
                }
                Token::Concat => {
                    let right = fragments.pop().ok_or(BuildError::Underflow)?;
                    let left = fragments.last_mut().ok_or(BuildError::Underflow)?;
                    let entry = right.entry;
                    nfa.connect(left, entry);
                    left.exits = right.exits;
                }
                Token::Union => {
                    let a = fragments.pop().ok_or(BuildError::Underflow)?;
                    let b = fragments.pop().ok_or(BuildError::Underflow)?;
                    let s = nfa.alloc(NodeKind::Split);
                    nfa.states[s].out[0] = a.entry;
                    nfa.states[s].out[1] = b.entry;
                    let mut exits = a.exits;
                    exits.extend(b.exits);
                    fragments.push(Fragment { entry: s, exits });
                }
                Token::Star => {
                    let fragment = fragments.last_mut().ok_or(BuildError::Underflow)?;
                    let s = nfa.alloc(NodeKind::Split);
                    nfa.states[s].out[0] = fragment.entry;
                    let fragment = fragments.last_mut().expect("checked above");
                    nfa.connect(fragment, s);
                    fragment.exits = vec![ExitSlot {
                        state: s,
                        which: Out::One,
                    }];
                    fragment.entry = s;
                }
                Token::Question => {
                    let fragment = fragments.last_mut().ok_or(BuildError::Underflow)?;
                    let s = nfa.alloc(NodeKind::Split);
                    nfa.states[s].out[0] = fragment.entry;
                    let fragment = fragments.last_mut().expect("checked above");
                    fragment.exits.push(ExitSlot {
                        state: s,
                        which: Out::One,
                    });
                    fragment.entry = s;
                }
                Token::Plus => {
                    let fragment = fragments.last_mut().ok_or(BuildError::Underflow)?;
                    let s = nfa.alloc(NodeKind::Split);
                    let fragment = fragments.last_mut().expect("checked above");
                    nfa.connect(fragment, s);
                    nfa.states[s].out[0] = fragment.entry;
                    fragment.exits.push(ExitSlot {
                        state: s,
                        which: Out::One,
                    });
                }
            }
        }

        let mut last = fragments.pop().ok_or(BuildError::Underflow)?;
        if !fragments.is_empty() {
            return Err(BuildError::Underflow);
        }
        let match_state = nfa.alloc(NodeKind::Match);
        nfa.connect(&mut last, match_state);
        nfa.start = Some(last.entry);

        Ok(nfa)
    }
}
