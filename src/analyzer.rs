//! This module provides functions for analyzing the rules of a Markov program to spot rules
//! that can never fire and rules that keep the program running once they fire. Findings are
//! warnings: the program still loads and runs exactly as written.

use std::fmt;

use crate::rules::RuleTable;

/// Represents a suspicious pattern found in a rule table.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisWarning {
    /// The pattern of the earlier rule `by` occurs inside the pattern of `rule`, so whenever
    /// `rule` could match, `by` matches first and `rule` never fires.
    ShadowedRule { rule: usize, by: usize },
    /// A non-terminal rule whose replacement contains its own pattern. After it fires, some
    /// rule always matches, so the program can only stop through an earlier terminal rule.
    SelfSustaining { rule: usize },
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Rules are numbered from 1 to agree with the rule listing.
        match self {
            AnalysisWarning::ShadowedRule { rule, by } => {
                write!(f, "rule {} is shadowed by rule {}", rule + 1, by + 1)
            }
            AnalysisWarning::SelfSustaining { rule } => {
                write!(
                    f,
                    "rule {} reproduces its own pattern and may never halt",
                    rule + 1
                )
            }
        }
    }
}

/// Analyzes a rule table and returns every warning found, in rule order per check.
pub fn analyze(rules: &RuleTable) -> Vec<AnalysisWarning> {
    [check_shadowed_rules, check_self_sustaining_rules]
        .iter()
        .flat_map(|check| check(rules))
        .collect()
}

/// Reports each rule that an earlier rule makes unreachable. Only the first shadowing rule is
/// reported.
fn check_shadowed_rules(rules: &RuleTable) -> Vec<AnalysisWarning> {
    rules
        .iter()
        .enumerate()
        .filter_map(|(index, rule)| {
            rules
                .iter()
                .take(index)
                .position(|earlier| rule.pattern().contains(earlier.pattern()))
                .map(|by| AnalysisWarning::ShadowedRule { rule: index, by })
        })
        .collect()
}

fn check_self_sustaining_rules(rules: &RuleTable) -> Vec<AnalysisWarning> {
    rules
        .iter()
        .enumerate()
        .filter(|(_, rule)| !rule.is_terminal() && rule.replacement().contains(rule.pattern()))
        .map(|(index, _)| AnalysisWarning::SelfSustaining { rule: index })
        .collect()
}
