//! Tape rewriting. Applying a rule never touches the input tape; a new tape is built and
//! only handed back if it fits.

use crate::tape::Tape;
use crate::types::{MarkovError, Rule};

/// Replaces the occurrence of `rule`'s pattern at `position` with its replacement.
///
/// The result is `tape[..position] + replacement + tape[position + pattern.len()..]`.
/// Termination is not decided here; the caller checks [`Rule::is_terminal`].
///
/// # Returns
///
/// * `Ok(Tape)` holding the rewritten text, with the same capacity as `tape`.
/// * `Err(MarkovError::TapeOverflow)` if the result would not fit the capacity.
/// * `Err(MarkovError::InvalidMatch)` if the pattern does not occur at `position`.
pub fn apply(tape: &Tape, rule: &Rule, position: usize) -> Result<Tape, MarkovError> {
    let text = tape.as_str();
    let pattern = rule.pattern();
    let end = position.saturating_add(pattern.len());

    if text.get(position..end) != Some(pattern) {
        return Err(MarkovError::InvalidMatch {
            pattern: pattern.to_string(),
            position,
        });
    }

    let len = text.len() - pattern.len() + rule.replacement().len();
    if len > tape.capacity() {
        return Err(MarkovError::TapeOverflow {
            len,
            capacity: tape.capacity(),
        });
    }

    let mut rewritten = String::with_capacity(len);
    rewritten.push_str(&text[..position]);
    rewritten.push_str(rule.replacement());
    rewritten.push_str(&text[end..]);

    Tape::new(rewritten, tape.capacity())
}
