//! The five-letter word type used throughout the engine.

use crate::error::Error;
use crate::WORD_LENGTH;
use std::fmt;
use std::str::FromStr;

/// A lowercase ASCII word of exactly [`WORD_LENGTH`] letters.
///
/// Words are stored as raw bytes so comparisons and pattern evaluation never
/// touch UTF-8 decoding. Ordering is lexicographic on the letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Build a word from bytes, accepting either case.
    ///
    /// Returns `None` unless every byte is an ASCII letter.
    pub fn from_bytes(bytes: [u8; WORD_LENGTH]) -> Option<Self> {
        let mut letters = [0u8; WORD_LENGTH];
        for (slot, b) in letters.iter_mut().zip(bytes) {
            if !b.is_ascii_alphabetic() {
                return None;
            }
            *slot = b.to_ascii_lowercase();
        }
        Some(Self(letters))
    }

    pub fn letter(&self, position: usize) -> u8 {
        self.0[position]
    }

    /// Number of times `letter` appears in the word.
    pub fn count(&self, letter: u8) -> usize {
        self.0.iter().filter(|&&b| b == letter).count()
    }

    pub fn contains(&self, letter: u8) -> bool {
        self.0.contains(&letter)
    }

    /// Bitmask of the distinct letters in the word, bit 0 being `a`.
    pub fn letter_mask(&self) -> u32 {
        self.0.iter().fold(0, |mask, &b| mask | letter_bit(b))
    }

    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII letters.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    pub fn to_uppercase(&self) -> String {
        self.as_str().to_ascii_uppercase()
    }
}

/// Single-bit mask for a lowercase letter.
pub(crate) fn letter_bit(letter: u8) -> u32 {
    1 << (letter - b'a')
}

impl FromStr for Word {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bytes: [u8; WORD_LENGTH] = trimmed.as_bytes().try_into().map_err(|_| {
            Error::MalformedRoundInput(format!(
                "'{}' is not {} letters long",
                trimmed, WORD_LENGTH
            ))
        })?;
        Self::from_bytes(bytes).ok_or_else(|| {
            Error::MalformedRoundInput(format!("'{}' contains non-alphabetic characters", trimmed))
        })
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
