//! Rule selection: which rule fires next, and where.

use crate::rules::RuleTable;
use crate::types::Rule;

/// A rule chosen to fire, together with the byte offset of its leftmost occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'r> {
    /// Index of the rule in its table.
    pub index: usize,
    /// Byte offset of the leftmost occurrence of the rule's pattern in the tape.
    pub position: usize,
    pub rule: &'r Rule,
}

/// Finds the highest-priority rule whose pattern occurs in `tape`.
///
/// Rules are tried in table order and the first one that occurs anywhere wins, even when
/// a later rule occurs further left. Within the winning rule the leftmost occurrence is
/// used.
///
/// # Returns
///
/// * `Some(Match)` for the first applicable rule.
/// * `None` if no pattern occurs in the tape.
pub fn find_match<'r>(tape: &str, rules: &'r RuleTable) -> Option<Match<'r>> {
    rules.iter().enumerate().find_map(|(index, rule)| {
        tape.find(rule.pattern()).map(|position| Match {
            index,
            position,
            rule,
        })
    })
}
