//! Accumulated letter constraints and the candidate filter built on them.
//!
//! Feedback only ever tightens the constraints, so filtering the previous
//! round's candidates gives the same result as filtering the whole dictionary.

use crate::feedback::{Feedback, FeedbackPattern};
use crate::word::{letter_bit, Word};
use crate::WORD_LENGTH;
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Everything learned from the rounds played so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    /// Letters confirmed at an exact position (green)
    correct: [Option<u8>; WORD_LENGTH],
    /// Letters known to be in the word, with the positions they are not at (yellow)
    misplaced: BTreeMap<u8, BTreeSet<usize>>,
    /// Letters that may not appear more often than `correct` already places them (gray)
    excluded: BTreeSet<u8>,
    /// Set when two rounds put different letters at the same green position
    conflicting: bool,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one round of feedback into the constraints.
    ///
    /// Greens and yellows are applied before grays, and a gray letter is only
    /// excluded when no other copy of it was green or yellow in the same
    /// round. A repeated guess letter can be yellow at one position and gray
    /// at another; in that case the gray only says there is no further copy.
    pub fn update(&mut self, guess: Word, pattern: FeedbackPattern) {
        let feedbacks = pattern.to_feedbacks();
        let mut confirmed_this_round = 0u32;

        for (i, &fb) in feedbacks.iter().enumerate() {
            if fb != Feedback::Correct {
                continue;
            }
            let letter = guess.letter(i);
            let existing = self.correct[i];
            match existing {
                Some(existing) if existing != letter => {
                    warn!(
                        "position {} was confirmed as '{}' but is now '{}'",
                        i, existing as char, letter as char
                    );
                    self.conflicting = true;
                }
                _ => self.correct[i] = Some(letter),
            }
            self.excluded.remove(&letter);
            confirmed_this_round |= letter_bit(letter);
        }

        for (i, &fb) in feedbacks.iter().enumerate() {
            if fb != Feedback::Present {
                continue;
            }
            let letter = guess.letter(i);
            self.misplaced.entry(letter).or_default().insert(i);
            self.excluded.remove(&letter);
            confirmed_this_round |= letter_bit(letter);
        }

        for (i, &fb) in feedbacks.iter().enumerate() {
            let letter = guess.letter(i);
            if fb == Feedback::Absent && confirmed_this_round & letter_bit(letter) == 0 {
                self.excluded.insert(letter);
            }
        }

        debug!("constraints after '{}' {}: {}", guess, pattern, self);
    }

    /// Whether `word` is consistent with every accumulated constraint.
    pub fn matches(&self, word: Word) -> bool {
        if self.conflicting {
            return false;
        }

        for (i, required) in self.correct.iter().enumerate() {
            if let Some(letter) = *required {
                if word.letter(i) != letter {
                    return false;
                }
            }
        }

        for (&letter, forbidden) in &self.misplaced {
            if !word.contains(letter) || forbidden.iter().any(|&i| word.letter(i) == letter) {
                return false;
            }
        }

        self.excluded
            .iter()
            .all(|&letter| word.count(letter) <= self.required_count(letter))
    }

    /// Keep the candidates that satisfy every constraint, preserving order.
    pub fn apply(&self, candidates: &[Word]) -> Vec<Word> {
        let filtered: Vec<Word> = candidates
            .iter()
            .copied()
            .filter(|&word| self.matches(word))
            .collect();
        debug!(
            "filter kept {} of {} candidates",
            filtered.len(),
            candidates.len()
        );
        filtered
    }

    /// Number of green positions holding `letter`.
    pub fn required_count(&self, letter: u8) -> usize {
        self.correct.iter().filter(|&&c| c == Some(letter)).count()
    }

    pub fn correct(&self) -> &[Option<u8>; WORD_LENGTH] {
        &self.correct
    }

    pub fn misplaced(&self) -> &BTreeMap<u8, BTreeSet<usize>> {
        &self.misplaced
    }

    pub fn excluded(&self) -> &BTreeSet<u8> {
        &self.excluded
    }

    pub fn is_conflicting(&self) -> bool {
        self.conflicting
    }

    pub fn is_correct_at(&self, position: usize) -> bool {
        self.correct[position].is_some()
    }

    /// Bitmask of letters already settled: green somewhere, or excluded.
    pub fn settled_mask(&self) -> u32 {
        let correct = self
            .correct
            .iter()
            .flatten()
            .fold(0, |mask, &letter| mask | letter_bit(letter));
        self.excluded
            .iter()
            .fold(correct, |mask, &letter| mask | letter_bit(letter))
    }

    /// True until the first round of feedback is recorded.
    pub fn is_empty(&self) -> bool {
        self.correct.iter().all(Option::is_none)
            && self.misplaced.is_empty()
            && self.excluded.is_empty()
            && !self.conflicting
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let correct: String = self
            .correct
            .iter()
            .map(|c| c.map_or('_', |b| b as char))
            .collect();
        write!(f, "correct={} misplaced={{", correct)?;
        for (n, (letter, positions)) in self.misplaced.iter().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{:?}", *letter as char, positions)?;
        }
        let excluded: String = self.excluded.iter().map(|&b| b as char).collect();
        write!(f, "}} excluded={}", excluded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    #[test]
    fn display_renders_all_three_parts() {
        let mut c = ConstraintSet::new();
        c.update(w("crane"), FeedbackPattern::parse("gyxxx").unwrap());
        assert_eq!(c.to_string(), "correct=c____ misplaced={r:{1}} excluded=aen");
    }

    #[test]
    fn conflicting_greens_reject_everything() {
        let mut c = ConstraintSet::new();
        c.update(w("crane"), FeedbackPattern::parse("gxxxx").unwrap());
        c.update(w("slate"), FeedbackPattern::parse("gxxxx").unwrap());
        assert!(c.is_conflicting());
        assert_eq!(c.correct()[0], Some(b'c'));
        assert!(!c.matches(w("crisp")));
        assert!(!c.matches(w("sloth")));
    }

    #[test]
    fn settled_mask_covers_green_and_gray_letters() {
        let mut c = ConstraintSet::new();
        c.update(w("crane"), FeedbackPattern::parse("gxxyx").unwrap());
        let mask = c.settled_mask();
        for letter in [b'c', b'r', b'a', b'e'] {
            assert_ne!(mask & letter_bit(letter), 0);
        }
        assert_eq!(mask & letter_bit(b'n'), 0);
    }
}
