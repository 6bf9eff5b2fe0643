//! # rex
//!
//! `rex` is a small regular expression engine built directly on an explicit
//! NFA/DFA pipeline: a shunting-yard translator turns a pattern into postfix
//! tokens, a Thompson construction turns those into an NFA, and a subset
//! construction turns the NFA into a DFA whose transitions are compressed
//! into sorted byte intervals rather than a dense 256-entry table.
//!
//! ## Example
//!
//! ```
//! use rex::regex::{Mode, Regex};
//!
//! let re = Regex::compile(b"^a(b|c)*d$", Mode::DfaEager).unwrap();
//! assert!(re.matches(b"abccbd"));
//! assert!(!re.matches(b"abccbe"));
//! ```
//!
//! ## Scope
//!
//! The dialect supports literals, `.`, `*`, `+`, `?`, `|`, grouping with
//! `()`, character classes `[...]` with `-` ranges, escaping with `\`, and
//! the `^`/`$` anchors at the very start/end of a pattern. Capture groups,
//! backreferences, lookaround, case-insensitive matching and negated
//! classes are out of scope.

pub mod dfa;
pub mod interval;
pub mod nfa;
pub mod parser;
pub mod regex;
pub mod token;
