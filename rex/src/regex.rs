//! The public façade: compiles a pattern into a [`Regex`] and evaluates
//! candidates against it, dispatching across the three evaluation
//! [`Mode`]s without exposing the NFA/DFA machinery underneath.

use crate::dfa::eval::{eval_processed, DfaEvaluator};
use crate::dfa::Dfa;
use crate::nfa::eval::NfaEvaluator;
use crate::nfa::{BuildError, Nfa};
use crate::parser::{to_postfix, ParseError};
use std::cell::RefCell;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Which evaluation strategy a compiled [`Regex`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Always evaluate against the NFA directly; no DFA is built.
    NfaOnly,
    /// Build the full DFA up front.
    DfaEager,
    /// Build only the DFA start state; expand the rest on demand during
    /// evaluation.
    DfaLazy,
}

/// Optional limits applied during compilation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Caps the number of DFA states that may be created; exceeding it
    /// surfaces [`BuildError::TooManyStates`] instead of growing without
    /// bound.
    pub max_dfa_states: Option<usize>,
}

enum Backend {
    NfaOnly,
    DfaEager(Dfa),
    // A lazy DFA mutates its state table during evaluation. `RefCell` makes
    // `Regex` in this mode `!Sync`, turning the reference implementation's
    // "don't evaluate a lazy DFA concurrently" documentation-only contract
    // into one the compiler enforces.
    DfaLazy(RefCell<Dfa>),
}

/// A compiled regular expression, ready to test candidates against.
pub struct Regex {
    nfa: Nfa,
    backend: Backend,
}

impl Regex {
    /// Compiles `pattern` under the given evaluation `mode`.
    pub fn compile(pattern: &[u8], mode: Mode) -> Result<Regex, CompileError> {
        Self::compile_with(pattern, mode, CompileOptions::default())
    }

    pub fn compile_with(
        pattern: &[u8],
        mode: Mode,
        options: CompileOptions,
    ) -> Result<Regex, CompileError> {
        let tokens = to_postfix(pattern)?;
        let nfa = Nfa::build(&tokens)?;
        let backend = match mode {
            Mode::NfaOnly => Backend::NfaOnly,
            Mode::DfaEager => Backend::DfaEager(Dfa::build_eager(&nfa, options.max_dfa_states)?),
            Mode::DfaLazy => {
                // A cap can only be exceeded by states the lazy DFA has not discovered
                // yet; validate the full reachable set against it now, eagerly, so
                // `matches` below never hits the cap mid-evaluation.
                if let Some(cap) = options.max_dfa_states {
                    Dfa::build_eager(&nfa, Some(cap))?;
                }
                Backend::DfaLazy(RefCell::new(Dfa::build_lazy(&nfa, options.max_dfa_states)?))
            }
        };
        Ok(Regex { nfa, backend })
    }

    /// Recompiles this `Regex` in place for a new pattern and mode.
    pub fn set_pattern(&mut self, pattern: &[u8], mode: Mode) -> Result<(), CompileError> {
        *self = Regex::compile(pattern, mode)?;
        Ok(())
    }

    /// Tests whether `candidate` is accepted.
    pub fn matches(&self, candidate: &[u8]) -> bool {
        match &self.backend {
            Backend::NfaOnly => NfaEvaluator::new(&self.nfa).matches(candidate),
            Backend::DfaEager(dfa) => eval_processed(dfa, candidate),
            Backend::DfaLazy(dfa) => {
                let mut dfa = dfa.borrow_mut();
                DfaEvaluator::new(&self.nfa, &mut dfa)
                    .matches(candidate)
                    .expect("cap already validated eagerly at compile time")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_scenarios_across_all_modes() {
        let cases: &[(&str, &str, bool)] = &[
            ("^abc$", "abc", true),
            ("^abc$", "abcd", false),
            ("abc", "xabcy", true),
            ("^a(b|c)*d$", "abccbd", true),
            ("^a(b|c)*d$", "abccbe", false),
            ("^[a-z0-9]+$", "abc123", true),
            ("^[a-z0-9]+$", "abc_123", false),
            ("^.*$", "", true),
            ("^a?b?c?$", "", true),
            ("^a*b$", "aaaaab", true),
            ("^(ab)+$", "ababab", true),
            ("^(ab)+$", "aba", false),
            ("a\\.b", "xa.by", true),
            ("a\\.b", "xaXby", false),
        ];
        for &(pattern, candidate, expected) in cases {
            for mode in [Mode::NfaOnly, Mode::DfaEager, Mode::DfaLazy] {
                let regex = Regex::compile(pattern.as_bytes(), mode).unwrap();
                assert_eq!(
                    regex.matches(candidate.as_bytes()),
                    expected,
                    "{mode:?} {pattern:?} / {candidate:?}"
                );
            }
        }
    }

    #[test]
    fn set_pattern_replaces_compiled_state() {
        let mut regex = Regex::compile(b"^a$", Mode::DfaEager).unwrap();
        assert!(regex.matches(b"a"));
        regex.set_pattern(b"^b$", Mode::DfaEager).unwrap();
        assert!(!regex.matches(b"a"));
        assert!(regex.matches(b"b"));
    }

    #[test]
    fn malformed_pattern_is_rejected() {
        assert!(Regex::compile(b"(abc", Mode::NfaOnly).is_err());
    }

    #[test]
    fn lazy_mode_rejects_an_over_cap_pattern_at_compile_time_not_at_eval_time() {
        let tokens_pattern = b"^[a-z][a-z][a-z][a-z]$";
        let options = CompileOptions { max_dfa_states: Some(1) };
        let err = Regex::compile_with(tokens_pattern, Mode::DfaLazy, options).unwrap_err();
        assert_eq!(err, CompileError::Build(BuildError::TooManyStates));
    }

    #[test]
    fn lazy_mode_under_cap_still_evaluates_correctly() {
        let options = CompileOptions { max_dfa_states: Some(64) };
        let regex = Regex::compile_with(b"^a(b|c)*d$", Mode::DfaLazy, options).unwrap();
        assert!(regex.matches(b"abccbd"));
        assert!(!regex.matches(b"abccbe"));
    }
}
