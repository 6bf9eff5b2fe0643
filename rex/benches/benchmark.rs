use criterion::{black_box, criterion_group, criterion_main, Criterion};
use proptest::prelude::*;
use proptest::strategy::ValueTree;
use proptest::test_runner::TestRunner;
use regex::Regex as LibRegex;
use rex::regex::{Mode, Regex};

const SAMPLE_PATTERN: &str = "^a(b|c)*d[a-z0-9]+e?$";

pub fn regex_compile(c: &mut Criterion) {
    c.bench_function("rex compile (dfa eager)", |b| {
        b.iter(|| Regex::compile(black_box(SAMPLE_PATTERN.as_bytes()), Mode::DfaEager).unwrap())
    });
    c.bench_function("rex compile (dfa lazy)", |b| {
        b.iter(|| Regex::compile(black_box(SAMPLE_PATTERN.as_bytes()), Mode::DfaLazy).unwrap())
    });
    c.bench_function("library regex compile", |b| {
        b.iter(|| LibRegex::new(black_box(SAMPLE_PATTERN)).unwrap())
    });
}

pub fn regex_check(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let candidate = "[a-z0-9]{1,20}".new_tree(&mut runner).unwrap().current();

    let eager = Regex::compile(SAMPLE_PATTERN.as_bytes(), Mode::DfaEager).unwrap();
    c.bench_function("rex check (dfa eager)", |b| {
        b.iter(|| eager.matches(black_box(candidate.as_bytes())))
    });

    let lazy = Regex::compile(SAMPLE_PATTERN.as_bytes(), Mode::DfaLazy).unwrap();
    c.bench_function("rex check (dfa lazy)", |b| {
        b.iter(|| lazy.matches(black_box(candidate.as_bytes())))
    });

    let nfa_only = Regex::compile(SAMPLE_PATTERN.as_bytes(), Mode::NfaOnly).unwrap();
    c.bench_function("rex check (nfa)", |b| {
        b.iter(|| nfa_only.matches(black_box(candidate.as_bytes())))
    });

    let input_regex = LibRegex::new(SAMPLE_PATTERN).unwrap();
    c.bench_function("library regex check", |b| {
        b.iter(|| input_regex.is_match(black_box(&candidate)))
    });
}

criterion_group!(benches, regex_compile, regex_check);
criterion_main!(benches);
