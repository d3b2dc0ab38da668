//! This crate provides the core logic for a normal algorithm (Markov algorithm) interpreter.
//! It includes modules for parsing Markov programs, matching and applying prioritized rewrite
//! rules to a bounded tape, running programs under a step bound, and analyzing rule sets.

pub mod analyzer;
pub mod config;
pub mod loader;
pub mod machine;
pub mod matcher;
pub mod parser;
pub mod programs;
pub mod rewriter;
pub mod rules;
pub mod tape;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisWarning` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisWarning};
/// Re-exports the interpreter `Limits` from the config module.
pub use config::Limits;
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `MarkovMachine` struct from the machine module.
pub use machine::MarkovMachine;
/// Re-exports the rule selection function from the matcher module.
pub use matcher::{find_match, Match};
/// Re-exports the parsing functions from the parser module.
pub use parser::{parse, parse_with_limits};
/// Re-exports the built-in program catalogue from the programs module.
pub use programs::{BuiltinProgram, ProgramManager, PROGRAMS};
/// Re-exports the `apply` function from the rewriter module.
pub use rewriter::apply;
/// Re-exports the `RuleTable` struct from the rules module.
pub use rules::RuleTable;
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the program, rule, and execution types from the types module.
pub use types::{ExecutionState, Halt, MarkovError, Program, Rule, RunReport, Step};
