//! This module provides the parser for Markov programs, utilizing the `pest` crate.
//! It defines the grammar for `.markov` files and functions to parse the input into a
//! `Program` struct.
//!
//! Parsing is forgiving at the line level: lines that are not rules, and rule lines the rule
//! table rejects, are skipped without failing the whole program.

use pest::{iterators::Pair, Parser as PestParser};
use pest_derive::Parser as PestParser;
use tracing::{debug, warn};

use crate::{
    analyzer::analyze,
    config::Limits,
    rules::RuleTable,
    tape::Tape,
    types::{MarkovError, Program},
};

/// Derives a `PestParser` for the Markov grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct MarkovParser;

/// Parses the given input string into a `Program` using the default [`Limits`].
///
/// # Returns
///
/// * `Ok(Program)` if the input holds a tape line.
/// * `Err(MarkovError::ValidationError)` if the input has no non-blank line.
/// * `Err(MarkovError::TapeOverflow)` if the tape line exceeds the tape capacity.
pub fn parse(input: &str) -> Result<Program, MarkovError> {
    parse_with_limits(input, &Limits::default())
}

/// Parses the given input string into a `Program`, sizing the rule table and tape from
/// `limits`.
///
/// Rule lines are added in order until the rule table is full; later rule lines are ignored.
/// The resulting rules are analyzed and any warnings are logged.
pub fn parse_with_limits(input: &str, limits: &Limits) -> Result<Program, MarkovError> {
    limits.validate()?;

    let root = MarkovParser::parse(Rule::program, input)
        .map_err(|e| MarkovError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| MarkovError::ValidationError("Empty program".to_string()))?;

    let mut tape: Option<Tape> = None;
    let mut rules = RuleTable::new(limits.max_rules, limits.max_rule_len);

    for p in root.into_inner() {
        match p.as_rule() {
            Rule::tape => tape = Some(parse_tape(p, limits.tape_capacity)?),
            Rule::rule_line => add_rule_line(p, &mut rules),
            _ => {} // Skip EOI
        }
    }

    let tape = tape
        .filter(|tape| !tape.is_empty())
        .ok_or_else(|| MarkovError::ValidationError("Program has no tape line".to_string()))?;

    for warning in analyze(&rules) {
        warn!(%warning, "suspicious rule");
    }

    Ok(Program::new(tape, rules))
}

fn parse_tape(pair: Pair<Rule>, capacity: usize) -> Result<Tape, MarkovError> {
    Tape::new(pair.as_str().trim(), capacity)
}

/// Adds the rule on a `rule_line` to `rules`, skipping it if the table rejects it.
fn add_rule_line(pair: Pair<Rule>, rules: &mut RuleTable) {
    let (line, _) = pair.line_col();

    if rules.is_full() {
        debug!(
            line,
            capacity = rules.capacity(),
            "rule table full, ignoring rule"
        );
        return;
    }

    let mut pattern = "";
    let mut replacement = "";
    let mut terminal = false;

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::pattern => pattern = p.as_str().trim(),
            Rule::terminal => terminal = true,
            Rule::replacement => replacement = p.as_str().trim(),
            _ => {}
        }
    }

    if let Err(e) = rules.add_rule(pattern, replacement, terminal) {
        debug!(line, error = %e, "skipping rule");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_RULES;

    fn rule_texts(program: &Program) -> Vec<(String, String, bool)> {
        program
            .rules
            .iter()
            .map(|r| {
                (
                    r.pattern().to_string(),
                    r.replacement().to_string(),
                    r.is_terminal(),
                )
            })
            .collect()
    }

    #[test]
    fn test_parse_tape_and_rules() {
        let program = parse("abc\na -> b\nb -> c\nc -> .\n").unwrap();

        assert_eq!(program.initial_tape(), "abc");
        assert_eq!(
            rule_texts(&program),
            vec![
                ("a".to_string(), "b".to_string(), false),
                ("b".to_string(), "c".to_string(), false),
                ("c".to_string(), "".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let program = parse("  abc  \n  a  ->  b  \nb -> .c\n").unwrap();

        assert_eq!(program.initial_tape(), "abc");
        assert_eq!(
            rule_texts(&program),
            vec![
                ("a".to_string(), "b".to_string(), false),
                ("b".to_string(), "c".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_parse_terminal_marker_variants() {
        let program = parse("x\na ->.b\nc -> . d\ne -> f.\n").unwrap();

        assert_eq!(
            rule_texts(&program),
            vec![
                ("a".to_string(), "b".to_string(), true),
                ("c".to_string(), "d".to_string(), true),
                ("e".to_string(), "f.".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_parse_skips_lines_without_arrow() {
        let program = parse("start\na -> b\nbad line without arrow\n# comment\nc -> .\n").unwrap();

        assert_eq!(program.rules.len(), 2);
        assert_eq!(program.rules[1].pattern(), "c");
    }

    #[test]
    fn test_parse_skips_empty_pattern() {
        let program = parse("start\n -> b\na -> b\n").unwrap();

        assert_eq!(program.rules.len(), 1);
        assert_eq!(program.rules[0].pattern(), "a");
    }

    #[test]
    fn test_parse_skips_overlong_rule() {
        let source = format!("start\n{} -> x\na -> b\n", "p".repeat(64));
        let program = parse(&source).unwrap();

        assert_eq!(program.rules.len(), 1);
        assert_eq!(program.rules[0].pattern(), "a");
    }

    #[test]
    fn test_parse_splits_on_first_arrow() {
        let program = parse("x\na -> b -> c\n").unwrap();

        assert_eq!(program.rules[0].pattern(), "a");
        assert_eq!(program.rules[0].replacement(), "b -> c");
    }

    #[test]
    fn test_parse_skips_leading_blank_lines() {
        let program = parse("\n   \n\t\nabc\na -> b").unwrap();

        assert_eq!(program.initial_tape(), "abc");
        assert_eq!(program.rules.len(), 1);
    }

    #[test]
    fn test_parse_crlf_line_endings() {
        let program = parse("abc\r\na -> b\r\nb -> .c\r\n").unwrap();

        assert_eq!(program.initial_tape(), "abc");
        assert_eq!(program.rules[0].replacement(), "b");
        assert_eq!(program.rules[1].replacement(), "c");
        assert!(program.rules[1].is_terminal());
    }

    #[test]
    fn test_parse_tape_only() {
        let program = parse("start\n").unwrap();

        assert_eq!(program.initial_tape(), "start");
        assert!(program.rules.is_empty());
    }

    #[test]
    fn test_parse_utf8() {
        let program = parse("привет\nп -> р\n").unwrap();

        assert_eq!(program.initial_tape(), "привет");
        assert_eq!(program.rules[0].pattern(), "п");
    }

    #[test]
    fn test_parse_stops_at_capacity() {
        let mut source = String::from("a\n");
        for i in 0..MAX_RULES + 5 {
            source.push_str(&format!("r{} -> x\n", i));
        }

        let program = parse(&source).unwrap();
        assert_eq!(program.rules.len(), MAX_RULES);
        assert_eq!(
            program.rules[MAX_RULES - 1].pattern(),
            format!("r{}", MAX_RULES - 1)
        );
    }

    #[test]
    fn test_parse_skipped_lines_do_not_count_toward_capacity() {
        let limits = Limits {
            max_rules: 2,
            ..Limits::default()
        };
        let program =
            parse_with_limits("a\nnoise\n -> x\na -> b\nb -> c\nc -> d\n", &limits).unwrap();

        assert_eq!(program.rules.len(), 2);
        assert_eq!(program.rules[1].pattern(), "b");
    }

    #[test]
    fn test_parse_without_tape_line() {
        for source in ["", "\n\n", "   \n\t"] {
            assert!(matches!(
                parse(source),
                Err(MarkovError::ValidationError(_))
            ));
        }
    }

    #[test]
    fn test_parse_tape_over_capacity() {
        let limits = Limits {
            tape_capacity: 4,
            ..Limits::default()
        };

        assert_eq!(
            parse_with_limits("abcde\n", &limits),
            Err(MarkovError::TapeOverflow {
                len: 5,
                capacity: 4
            })
        );
    }

    #[test]
    fn test_parse_rejects_invalid_limits() {
        let limits = Limits {
            max_rules: 0,
            ..Limits::default()
        };

        assert!(parse_with_limits("abc\n", &limits).is_err());
    }
}
