//! The read-only word list every session filters from.

use crate::error::{Error, Result};
use crate::word::Word;
use log::{debug, warn};
use std::fs;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

/// Ordered, immutable list of valid words.
///
/// Cloning is cheap and clones share storage, so one dictionary can back any
/// number of sessions, including sessions running on other threads.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Arc<[Word]>,
}

impl Dictionary {
    /// Build a dictionary from already-validated words, preserving order.
    pub fn new(words: Vec<Word>) -> Result<Self> {
        if words.is_empty() {
            return Err(Error::EmptyDictionary);
        }
        Ok(Self {
            words: words.into(),
        })
    }

    /// Parse the word-list text format: one word per line, case-insensitive,
    /// surrounding whitespace ignored. Blank lines are skipped and lines that
    /// are not five ASCII letters are dropped with a warning.
    pub fn parse(text: &str) -> Result<Self> {
        let mut words = Vec::new();
        let mut skipped = 0usize;
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.parse::<Word>() {
                Ok(word) => words.push(word),
                Err(e) => {
                    skipped += 1;
                    warn!("skipping word list line {}: {}", number + 1, e);
                }
            }
        }
        debug!("parsed {} words ({} skipped)", words.len(), skipped);
        Self::new(words)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn contains(&self, word: Word) -> bool {
        self.words.contains(&word)
    }
}

impl Deref for Dictionary {
    type Target = [Word];

    fn deref(&self) -> &[Word] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalises_and_keeps_order() {
        let dict = Dictionary::parse("  Slate\nCRANE\n\n trace \n").unwrap();
        let words: Vec<_> = dict.iter().map(|w| w.as_str()).collect();
        assert_eq!(words, ["slate", "crane", "trace"]);
    }

    #[test]
    fn parse_tolerates_duplicates_and_drops_bad_lines() {
        let dict = Dictionary::parse("crane\ncrane\ncranes\nab1de\n").unwrap();
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(Dictionary::parse(""), Err(Error::EmptyDictionary)));
        assert!(matches!(
            Dictionary::parse("toolong\nx\n"),
            Err(Error::EmptyDictionary)
        ));
        assert!(matches!(Dictionary::new(vec![]), Err(Error::EmptyDictionary)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Dictionary::from_file("/nonexistent/words.txt").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/words.txt"));
    }
}
