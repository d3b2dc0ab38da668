//! Built-in demo programs, embedded at compile time and parsed once on first use.

use crate::parser::parse;
use crate::types::{MarkovError, Program};

use tracing::warn;

// Embedded demo programs, by name
const PROGRAM_TEXTS: [(&str, &str); 3] = [
    (
        "binary-to-unary",
        include_str!("../demos/binary-to-unary.markov"),
    ),
    (
        "unary-addition",
        include_str!("../demos/unary-addition.markov"),
    ),
    ("sort-ab", include_str!("../demos/sort-ab.markov")),
];

/// A parsed built-in program along with its name and source text.
#[derive(Debug, Clone)]
pub struct BuiltinProgram {
    pub name: &'static str,
    pub source: &'static str,
    pub program: Program,
}

lazy_static::lazy_static! {
    /// The built-in programs that parsed successfully, in catalogue order.
    pub static ref PROGRAMS: Vec<BuiltinProgram> = PROGRAM_TEXTS
        .iter()
        .filter_map(|&(name, source)| match parse(source) {
            Ok(program) => Some(BuiltinProgram { name, source, program }),
            Err(e) => {
                warn!(name, error = %e, "failed to parse built-in program");
                None
            }
        })
        .collect();
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, MarkovError> {
        Self::get_builtin_by_index(index).map(|builtin| builtin.program.clone())
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, MarkovError> {
        Self::get_builtin_by_name(name).map(|builtin| builtin.program.clone())
    }

    /// Get the original text of a program by its index
    pub fn get_program_text_by_index(index: usize) -> Result<&'static str, MarkovError> {
        Self::get_builtin_by_index(index).map(|builtin| builtin.source)
    }

    /// List all program names
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|builtin| builtin.name).collect()
    }

    pub fn get_builtin_by_index(index: usize) -> Result<&'static BuiltinProgram, MarkovError> {
        PROGRAMS.get(index).ok_or_else(|| {
            MarkovError::ValidationError(format!("Program index {} out of range", index))
        })
    }

    pub fn get_builtin_by_name(name: &str) -> Result<&'static BuiltinProgram, MarkovError> {
        PROGRAMS
            .iter()
            .find(|builtin| builtin.name == name)
            .ok_or_else(|| MarkovError::ValidationError(format!("Program '{}' not found", name)))
    }
}
