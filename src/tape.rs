//! The capacity-bounded text buffer a Markov machine rewrites.

use serde::Serialize;
use std::fmt;

use crate::types::{MarkovError, DEFAULT_TAPE_CAPACITY};

/// A text buffer that never grows beyond a fixed capacity, measured in bytes.
///
/// Every constructor checks the capacity, so a `Tape` in hand is always within bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tape {
    content: String,
    capacity: usize,
}

impl Tape {
    /// Creates a tape holding `content`.
    ///
    /// # Returns
    ///
    /// * `Err(MarkovError::TapeOverflow)` if `content` is longer than `capacity`.
    pub fn new(content: impl Into<String>, capacity: usize) -> Result<Self, MarkovError> {
        let content = content.into();
        if content.len() > capacity {
            return Err(MarkovError::TapeOverflow {
                len: content.len(),
                capacity,
            });
        }

        Ok(Self { content, capacity })
    }

    /// Creates an empty tape with the given capacity.
    pub fn empty(capacity: usize) -> Self {
        Self {
            content: String::new(),
            capacity,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::empty(DEFAULT_TAPE_CAPACITY)
    }
}

impl AsRef<str> for Tape {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tape_within_capacity() {
        let tape = Tape::new("a".repeat(511), 511).unwrap();
        assert_eq!(tape.len(), 511);
        assert_eq!(tape.capacity(), 511);
    }

    #[test]
    fn test_tape_over_capacity() {
        let result = Tape::new("abcd", 3);
        assert_eq!(
            result,
            Err(MarkovError::TapeOverflow {
                len: 4,
                capacity: 3
            })
        );
    }

    #[test]
    fn test_capacity_counts_bytes() {
        // Each Cyrillic letter is two bytes in UTF-8.
        assert!(Tape::new("привет", 12).is_ok());
        assert!(Tape::new("привет", 11).is_err());
    }

    #[test]
    fn test_default_tape_is_empty() {
        let tape = Tape::default();
        assert!(tape.is_empty());
        assert_eq!(tape.capacity(), DEFAULT_TAPE_CAPACITY);
        assert_eq!(tape.to_string(), "");
    }
}
