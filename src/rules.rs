//! This module provides `RuleTable`, the ordered and capacity-bounded set of rules of a
//! Markov program. A rule's position in the table is its priority: index 0 is tried first.

use serde::Serialize;
use std::fmt;
use std::ops::Index;

use crate::types::{MarkovError, Rule, MAX_RULES, MAX_RULE_LENGTH};

/// An ordered sequence of rules with a fixed maximum size.
///
/// Rules are only ever appended. The table never sorts, deduplicates, or removes rules,
/// so priority is exactly insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleTable {
    rules: Vec<Rule>,
    capacity: usize,
    max_rule_len: usize,
}

impl RuleTable {
    /// Creates an empty table accepting at most `capacity` rules, each with a pattern and
    /// replacement of at most `max_rule_len` bytes.
    pub fn new(capacity: usize, max_rule_len: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
            capacity,
            max_rule_len,
        }
    }

    /// Appends a rule at the lowest priority.
    ///
    /// # Arguments
    ///
    /// * `pattern` - The literal text to search for. Must be non-empty.
    /// * `replacement` - The text substituted for the pattern. May be empty.
    /// * `terminal` - Whether applying the rule halts the machine.
    ///
    /// # Returns
    ///
    /// * `Ok(index)` with the index of the new rule.
    /// * `Err(MarkovError::CapacityExceeded)` if the table is full.
    /// * `Err(MarkovError::EmptyPattern)` if `pattern` is empty.
    /// * `Err(MarkovError::RuleTooLong)` if the pattern or replacement is over the limit.
    pub fn add_rule(
        &mut self,
        pattern: &str,
        replacement: &str,
        terminal: bool,
    ) -> Result<usize, MarkovError> {
        if self.is_full() {
            return Err(MarkovError::CapacityExceeded(self.capacity));
        }
        if pattern.is_empty() {
            return Err(MarkovError::EmptyPattern);
        }
        for text in [pattern, replacement] {
            if text.len() > self.max_rule_len {
                return Err(MarkovError::RuleTooLong {
                    len: text.len(),
                    max: self.max_rule_len,
                });
            }
        }

        self.rules.push(Rule::new(
            pattern.to_string(),
            replacement.to_string(),
            terminal,
        ));
        Ok(self.rules.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    /// Iterates over the rules in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.rules.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_rule_len(&self) -> usize {
        self.max_rule_len
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new(MAX_RULES, MAX_RULE_LENGTH)
    }
}

impl Index<usize> for RuleTable {
    type Output = Rule;

    fn index(&self, index: usize) -> &Rule {
        &self.rules[index]
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Numbered listing of the rules, one per line, for diagnostics.
///
/// ```text
/// 1. a -> b
/// 2. b -> . c
/// ```
impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rules.is_empty() {
            return writeln!(f, "No rules");
        }

        for (i, rule) in self.rules.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, rule)?;
        }
        Ok(())
    }
}
