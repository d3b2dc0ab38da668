//! This module defines the core data structures and types used throughout the Markov
//! interpreter, including rules, execution states, run reports, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::parser::Rule as GrammarRule;
use crate::rules::RuleTable;
use crate::tape::Tape;

/// The maximum number of rules a rule table accepts by default.
pub const MAX_RULES: usize = 32;
/// The maximum length in bytes of a rule's pattern or replacement.
pub const MAX_RULE_LENGTH: usize = 63;
/// The default tape capacity in bytes.
pub const DEFAULT_TAPE_CAPACITY: usize = 4096;
/// The default number of rewrites `run` performs before declaring divergence.
pub const DEFAULT_STEP_BOUND: usize = 1000;
/// The token separating a rule's pattern from its replacement.
pub const ARROW: &str = "->";
/// The marker that, placed right after the arrow, makes a rule terminal.
pub const TERMINAL_MARKER: char = '.';

/// Represents a Markov program: the initial tape and the prioritized rules that rewrite it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    /// The tape a machine starts from.
    pub tape: Tape,
    /// The rules, highest priority first.
    pub rules: RuleTable,
}

impl Program {
    pub fn new(tape: Tape, rules: RuleTable) -> Self {
        Self { tape, rules }
    }

    /// Returns the initial tape content as a `String`.
    pub fn initial_tape(&self) -> String {
        self.tape.as_str().to_string()
    }
}

/// A single rewrite rule: replace the leftmost occurrence of `pattern` with `replacement`.
///
/// Rules are created through [`RuleTable::add_rule`](crate::rules::RuleTable::add_rule),
/// which guarantees the pattern is non-empty. They are immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pattern: String,
    replacement: String,
    terminal: bool,
}

impl Rule {
    pub(crate) fn new(pattern: String, replacement: String, terminal: bool) -> Self {
        Self {
            pattern,
            replacement,
            terminal,
        }
    }

    /// The literal text this rule searches for.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The text substituted for the matched pattern. May be empty.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Whether applying this rule ends the run.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pattern, ARROW)?;
        if self.terminal {
            write!(f, " {}", TERMINAL_MARKER)?;
        }
        write!(f, " {}", self.replacement)
    }
}

/// Why a machine stopped rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Halt {
    /// A terminal rule was applied.
    Normal,
    /// No rule matched the tape.
    Stuck,
    /// The step bound was exhausted while rules still matched.
    Divergent,
}

/// The execution state of a machine.
///
/// `Halted` states are absorbing: stepping a halted machine reports the same halt
/// and leaves the tape untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionState {
    Running,
    Halted(Halt),
}

/// Represents the outcome of a single machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A non-terminal rule was applied and execution continues.
    Continue,
    /// The machine is halted, either by this step or earlier.
    Halt(Halt),
}

/// Summary of a call to `run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// The halt the run ended in.
    pub halt: Halt,
    /// Number of rewrites performed during this run.
    pub steps: usize,
    /// The tape after the run.
    pub tape: String,
}

impl RunReport {
    /// Returns `true` if the program stopped on its own, by a terminal rule or by getting stuck.
    pub fn is_completed(&self) -> bool {
        !self.is_diverged()
    }

    /// Returns `true` if the step bound ran out before the program stopped.
    pub fn is_diverged(&self) -> bool {
        self.halt == Halt::Divergent
    }
}

/// Represents various errors that can occur while loading or running Markov programs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkovError {
    /// The program text could not be read.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),
    /// A rule was added with an empty pattern.
    #[error("Rule pattern must not be empty")]
    EmptyPattern,
    /// A rule was added to a full rule table.
    #[error("Rule table is full (capacity {0})")]
    CapacityExceeded(usize),
    /// A pattern or replacement is longer than the per-rule limit.
    #[error("Rule text is {len} bytes long, the limit is {max}")]
    RuleTooLong { len: usize, max: usize },
    /// A tape would grow beyond its capacity.
    #[error("Tape of {len} bytes exceeds capacity of {capacity}")]
    TapeOverflow { len: usize, capacity: usize },
    /// A rewrite was requested at a position where the rule's pattern does not occur.
    #[error("Pattern {pattern:?} does not occur at position {position}")]
    InvalidMatch { pattern: String, position: usize },
    /// The program source could not be parsed.
    #[error("Program parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<GrammarRule>>),
    /// A program or configuration failed validation.
    #[error("Validation error: {0}")]
    ValidationError(String),
}
