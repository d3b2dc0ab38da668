//! This module provides the `ProgramLoader` struct, responsible for loading Markov programs
//! from various sources, including files and strings.

use crate::config::Limits;
use crate::parser::parse_with_limits;
use crate::types::{MarkovError, Program};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of Markov program sources.
pub const PROGRAM_EXTENSION: &str = "markov";

/// `ProgramLoader` is a utility struct for loading Markov programs.
/// It provides methods to load programs from individual files, from string content,
/// and to discover and load all `.markov` files within a specified directory.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single Markov program from the specified file path using the default limits.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the file is successfully read and parsed into a `Program`.
    /// * `Err(MarkovError::SourceUnavailable)` if the file cannot be read.
    /// * `Err(_)` from [`parse_with_limits`] if the content is not a valid program.
    pub fn load_program(path: &Path) -> Result<Program, MarkovError> {
        Self::load_program_with_limits(path, &Limits::default())
    }

    /// Loads a single Markov program from the specified file path, applying `limits`.
    pub fn load_program_with_limits(
        path: &Path,
        limits: &Limits,
    ) -> Result<Program, MarkovError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MarkovError::SourceUnavailable(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse_with_limits(&content, limits)
    }

    /// Loads a single Markov program from the provided string content.
    ///
    /// This is useful for parsing programs that are not stored in files, e.g., from stdin.
    pub fn load_program_from_string(content: &str) -> Result<Program, MarkovError> {
        parse_with_limits(content, &Limits::default())
    }

    pub fn load_program_from_string_with_limits(
        content: &str,
        limits: &Limits,
    ) -> Result<Program, MarkovError> {
        parse_with_limits(content, limits)
    }

    /// Loads all Markov program files (`.markov` extension) from a given directory using the
    /// default limits.
    pub fn load_programs(directory: &Path) -> Vec<Result<(PathBuf, Program), MarkovError>> {
        Self::load_programs_with_limits(directory, &Limits::default())
    }

    /// Loads all Markov program files (`.markov` extension) from a given directory, applying
    /// `limits` to every file.
    ///
    /// It iterates through the directory, attempts to load each `.markov` file, and collects
    /// the results. Directories and files with other extensions are skipped.
    ///
    /// # Returns
    ///
    /// * `Vec<Result<(PathBuf, Program), MarkovError>>` - one entry per program file, holding
    ///   either its path and `Program` or the error that occurred while loading it. If the
    ///   directory itself cannot be read, the vector holds that single error.
    pub fn load_programs_with_limits(
        directory: &Path,
        limits: &Limits,
    ) -> Vec<Result<(PathBuf, Program), MarkovError>> {
        if !directory.exists() {
            return vec![Err(MarkovError::SourceUnavailable(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(MarkovError::SourceUnavailable(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut results: Vec<_> = entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(MarkovError::SourceUnavailable(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and non-.markov files
                if path.is_dir() || path.extension().is_none_or(|ext| ext != PROGRAM_EXTENSION) {
                    return None;
                }

                let loaded = Self::load_program_with_limits(&path, limits);
                Some(loaded.map(|program| (path, program)))
            })
            .collect();

        // Directory order is platform dependent.
        results.sort_by(|a, b| match (a, b) {
            (Ok((a, _)), Ok((b, _))) => a.cmp(b),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => std::cmp::Ordering::Equal,
        });

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::MarkovMachine;
    use crate::types::DEFAULT_STEP_BOUND;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &str) {
        let mut file = File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_valid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.markov");
        write_file(&file_path, "abc\na -> b\nb -> c\nc -> .\n");

        let program = ProgramLoader::load_program(&file_path).unwrap();
        assert_eq!(program.initial_tape(), "abc");
        assert_eq!(program.rules.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();

        let result = ProgramLoader::load_program(&dir.path().join("___no_such_file___"));
        assert!(matches!(
            result,
            Err(MarkovError::SourceUnavailable(msg)) if msg.contains("___no_such_file___")
        ));
    }

    #[test]
    fn test_load_program_without_rules_runs_as_noop() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("noop.markov");
        write_file(&file_path, "abc\nno rules here\n");

        let program = ProgramLoader::load_program(&file_path).unwrap();
        let mut machine = MarkovMachine::new(program);
        assert_eq!(machine.tape(), "abc");

        let report = machine.run(DEFAULT_STEP_BOUND).unwrap();
        assert!(report.is_completed());
        assert_eq!(machine.tape(), "abc");
    }

    #[test]
    fn test_load_ignores_bad_lines_then_runs() {
        let program = ProgramLoader::load_program_from_string(
            "start\na -> b\nbad line without arrow\nc -> .\n",
        )
        .unwrap();
        let mut machine = MarkovMachine::new(program);

        machine.set_tape("a").unwrap();
        machine.step().unwrap();
        machine.step().unwrap();
        assert_eq!(machine.tape(), "b");
    }

    #[test]
    fn test_load_with_limits() {
        let limits = Limits {
            max_rules: 1,
            ..Limits::default()
        };

        let program =
            ProgramLoader::load_program_from_string_with_limits("a\na -> b\nb -> c\n", &limits)
                .unwrap();
        assert_eq!(program.rules.len(), 1);
    }

    #[test]
    fn test_load_programs_from_directory() {
        let dir = tempdir().unwrap();

        write_file(&dir.path().join("valid.markov"), "a\na -> b\n");
        // No tape line
        write_file(&dir.path().join("invalid.markov"), "\n\n");
        write_file(
            &dir.path().join("ignored.txt"),
            "This file should be ignored",
        );

        let results = ProgramLoader::load_programs(dir.path());

        // We should have 2 results: 1 success and 1 error
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_load_programs_with_limits_applies_to_every_file() {
        let dir = tempdir().unwrap();

        write_file(&dir.path().join("one.markov"), "a\na -> b\nb -> c\n");
        write_file(&dir.path().join("two.markov"), "x\nx -> y\ny -> z\nz -> .\n");
        let limits = Limits {
            max_rules: 1,
            ..Limits::default()
        };

        let results = ProgramLoader::load_programs_with_limits(dir.path(), &limits);
        assert_eq!(results.len(), 2);
        for result in &results {
            let (_, program) = result.as_ref().unwrap();
            assert_eq!(program.rules.len(), 1);
        }

        let (path, _) = results[0].as_ref().unwrap();
        assert!(path.ends_with("one.markov"));

        let unlimited = ProgramLoader::load_programs(dir.path());
        let (_, program) = unlimited[1].as_ref().unwrap();
        assert_eq!(program.rules.len(), 3);
    }

    #[test]
    fn test_load_programs_missing_directory() {
        let dir = tempdir().unwrap();

        let results = ProgramLoader::load_programs(&dir.path().join("missing"));
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(MarkovError::SourceUnavailable(_))));
    }
}
