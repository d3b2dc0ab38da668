//! Interpreter limits: rule table size, rule length, tape capacity, and the step bound.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::{
    MarkovError, DEFAULT_STEP_BOUND, DEFAULT_TAPE_CAPACITY, MAX_RULES, MAX_RULE_LENGTH,
};

/// Capacities and bounds applied when loading and running programs.
///
/// Stored as JSON. Missing fields fall back to the defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Limits {
    /// Maximum number of rules in a table.
    pub max_rules: usize,
    /// Maximum length in bytes of a pattern or replacement.
    pub max_rule_len: usize,
    /// Maximum tape length in bytes.
    pub tape_capacity: usize,
    /// Rewrites `run` performs before reporting divergence.
    pub step_bound: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_rules: MAX_RULES,
            max_rule_len: MAX_RULE_LENGTH,
            tape_capacity: DEFAULT_TAPE_CAPACITY,
            step_bound: DEFAULT_STEP_BOUND,
        }
    }
}

impl Limits {
    pub fn validate(&self) -> Result<(), MarkovError> {
        if self.max_rules == 0 {
            return Err(MarkovError::ValidationError(
                "max_rules must be > 0".to_string(),
            ));
        }
        if self.max_rule_len == 0 {
            return Err(MarkovError::ValidationError(
                "max_rule_len must be > 0".to_string(),
            ));
        }
        if self.tape_capacity == 0 {
            return Err(MarkovError::ValidationError(
                "tape_capacity must be > 0".to_string(),
            ));
        }
        if self.step_bound == 0 {
            return Err(MarkovError::ValidationError(
                "step_bound must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads limits from a JSON file and validates them.
    pub fn load(path: &Path) -> Result<Self, MarkovError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MarkovError::SourceUnavailable(format!(
                "Failed to read limits {}: {}",
                path.display(),
                e
            ))
        })?;

        let limits: Limits = serde_json::from_str(&content).map_err(|e| {
            MarkovError::ValidationError(format!("Invalid limits {}: {}", path.display(), e))
        })?;
        limits.validate()?;

        Ok(limits)
    }
}
