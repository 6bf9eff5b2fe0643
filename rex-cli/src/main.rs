use clap::{Parser, ValueEnum};
use rex::regex::{CompileError, Mode, Regex};
use std::io::{self, BufRead, Write};
use std::time::Instant;
use thiserror::Error;

const MENU: &str = "1. Eval DFA\n2. Eval NFA\n3. Set Regex\n4. Exit\nChoice: ";
const DFA_OR_NFA: &str = "DFA or NFA?\n(Note that DFA construction may take time while NFA construction is very quick).\n(DFA / NFA): ";

#[derive(Debug, Error)]
enum Error {
    #[error("could not read from stdin: {0}")]
    Io(#[from] io::Error),
    #[error("failed to compile regex: {0}")]
    Compile(#[from] CompileError),
    #[error("end of input")]
    Eof,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StartupMode {
    Nfa,
    DfaEager,
    DfaLazy,
}

impl From<StartupMode> for Mode {
    fn from(value: StartupMode) -> Self {
        match value {
            StartupMode::Nfa => Mode::NfaOnly,
            StartupMode::DfaEager => Mode::DfaEager,
            StartupMode::DfaLazy => Mode::DfaLazy,
        }
    }
}

/// A REPL for compiling and evaluating regular expressions against an
/// explicit NFA/DFA pipeline.
#[derive(Debug, Parser)]
struct Args {
    /// Compile this pattern at startup instead of waiting for "3. Set Regex".
    #[arg(long)]
    pattern: Option<String>,

    /// Which mode to compile the startup pattern with.
    #[arg(long, value_enum, default_value_t = StartupMode::DfaEager)]
    mode: StartupMode,
}

/// Holds both a DFA-backed and an NFA-only evaluator for the current
/// pattern, falling back to the NFA evaluator when no DFA has been built yet
/// — mirrors the reference implementation's `Regex::eval`.
struct Session {
    dfa_regex: Option<Regex>,
    nfa_regex: Option<Regex>,
}

impl Session {
    fn empty() -> Self {
        Session {
            dfa_regex: None,
            nfa_regex: None,
        }
    }

    fn set_pattern(&mut self, pattern: &str, mode: Mode) -> Result<(), Error> {
        self.nfa_regex = Some(Regex::compile(pattern.as_bytes(), Mode::NfaOnly)?);
        self.dfa_regex = match mode {
            Mode::NfaOnly => None,
            dfa_mode => Some(Regex::compile(pattern.as_bytes(), dfa_mode)?),
        };
        Ok(())
    }

    fn eval_dfa(&self, candidate: &str) -> Option<bool> {
        self.dfa_regex
            .as_ref()
            .or(self.nfa_regex.as_ref())
            .map(|r| r.matches(candidate.as_bytes()))
    }

    fn eval_nfa(&self, candidate: &str) -> Option<bool> {
        self.nfa_regex.as_ref().map(|r| r.matches(candidate.as_bytes()))
    }
}

fn prompt(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "{text}")?;
    out.flush()
}

fn read_line(input: &mut impl BufRead) -> Result<String, Error> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::Eof);
    }
    Ok(line.trim().to_string())
}

fn run(args: Args) -> Result<(), Error> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let mut session = Session::empty();
    if let Some(pattern) = &args.pattern {
        session.set_pattern(pattern, args.mode.into())?;
    }

    loop {
        prompt(&mut stdout, MENU)?;
        let choice = match read_line(&mut input) {
            Ok(line) => line,
            Err(Error::Eof) => break,
            Err(e) => return Err(e),
        };

        let start = Instant::now();

        match choice.as_str() {
            "1" => {
                let candidate = read_line(&mut input)?;
                match session.eval_dfa(&candidate) {
                    Some(result) => println!("{result}"),
                    None => eprintln!("no regex has been set yet"),
                }
            }
            "2" => {
                let candidate = read_line(&mut input)?;
                match session.eval_nfa(&candidate) {
                    Some(result) => println!("{result}"),
                    None => eprintln!("no regex has been set yet"),
                }
            }
            "3" => {
                prompt(&mut stdout, "regex: ")?;
                let pattern = read_line(&mut input)?;
                prompt(&mut stdout, DFA_OR_NFA)?;
                let mode_choice = read_line(&mut input)?;
                let mode = if mode_choice.eq_ignore_ascii_case("dfa") {
                    Mode::DfaEager
                } else {
                    Mode::NfaOnly
                };
                if let Err(e) = session.set_pattern(&pattern, mode) {
                    eprintln!("{e}");
                }
            }
            "4" => break,
            other => eprintln!("unrecognized choice: {other:?}"),
        }

        let elapsed = start.elapsed();
        println!("------------------ {:.9} seconds", elapsed.as_secs_f64());
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
