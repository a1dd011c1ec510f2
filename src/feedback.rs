//! Feedback patterns for Wordle guesses.
//!
//! This module computes the pattern (green/yellow/gray) a guess would receive
//! against a hidden answer, and parses patterns typed in by the player.

use crate::error::{Error, Result};
use crate::word::{letter_bit, Word};
use crate::WORD_LENGTH;
use std::fmt;

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Correct letter in correct position (green)
    Correct,
    /// Letter in the word but at another position (yellow)
    Present,
    /// Letter not in the word beyond the copies already accounted for (gray)
    Absent,
}

impl Feedback {
    /// Convert to a character for display
    pub fn to_char(self) -> char {
        match self {
            Feedback::Correct => '🟩',
            Feedback::Present => '🟨',
            Feedback::Absent => '⬛',
        }
    }

    /// Parse from a character (g=green, y=yellow, x/b=gray, or 2/1/0)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' | '2' => Some(Feedback::Correct),
            'y' | '1' => Some(Feedback::Present),
            'x' | 'b' | '0' => Some(Feedback::Absent),
            _ => None,
        }
    }

    fn digit(self) -> u8 {
        match self {
            Feedback::Absent => 0,
            Feedback::Present => 1,
            Feedback::Correct => 2,
        }
    }
}

/// How yellow tiles are assigned when a letter repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationRule {
    /// A letter that is not green is yellow whenever it occurs anywhere in the
    /// answer. A guess letter repeated more often than the answer holds it is
    /// yellow at every occurrence.
    #[default]
    Membership,
    /// Official Wordle rules: each answer letter can justify at most one
    /// green or yellow tile, surplus copies in the guess are gray.
    Standard,
}

/// A complete feedback pattern for a 5-letter guess.
/// Encoded as a single u8 value (0-242) for efficiency.
/// Each position can be 0 (absent), 1 (present), or 2 (correct).
/// Pattern = p0 + 3*p1 + 9*p2 + 27*p3 + 81*p4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackPattern(u8);

impl FeedbackPattern {
    /// The pattern indicating all correct (winning)
    pub const ALL_CORRECT: Self = Self(2 + 2 * 3 + 2 * 9 + 2 * 27 + 2 * 81);

    pub const ALL_ABSENT: Self = Self(0);

    /// Total number of possible patterns (3^5)
    pub const NUM_PATTERNS: usize = 243;

    /// Create a new pattern from individual feedback values
    pub fn new(feedbacks: [Feedback; WORD_LENGTH]) -> Self {
        let mut pattern: u8 = 0;
        let mut multiplier: u8 = 1;
        for fb in feedbacks {
            pattern += fb.digit() * multiplier;
            multiplier *= 3;
        }
        Self(pattern)
    }

    /// Pattern `guess` receives against `answer` under the default
    /// [`EvaluationRule::Membership`] rule.
    ///
    /// Position `i` is green when the letters match, yellow when `guess[i]`
    /// occurs anywhere in `answer`, gray otherwise.
    pub fn calculate(guess: Word, answer: Word) -> Self {
        Self::calculate_with(EvaluationRule::Membership, guess, answer)
    }

    pub fn calculate_with(rule: EvaluationRule, guess: Word, answer: Word) -> Self {
        match rule {
            EvaluationRule::Membership => Self::membership(guess, answer),
            EvaluationRule::Standard => Self::standard(guess, answer),
        }
    }

    fn membership(guess: Word, answer: Word) -> Self {
        let answer_mask = answer.letter_mask();
        let mut feedback = [Feedback::Absent; WORD_LENGTH];
        for (i, slot) in feedback.iter_mut().enumerate() {
            let g = guess.letter(i);
            if g == answer.letter(i) {
                *slot = Feedback::Correct;
            } else if answer_mask & letter_bit(g) != 0 {
                *slot = Feedback::Present;
            }
        }
        Self::new(feedback)
    }

    fn standard(guess: Word, answer: Word) -> Self {
        let mut feedback = [Feedback::Absent; WORD_LENGTH];
        let mut answer_remaining = [0u8; 26];

        for i in 0..WORD_LENGTH {
            if guess.letter(i) == answer.letter(i) {
                feedback[i] = Feedback::Correct;
            } else {
                answer_remaining[(answer.letter(i) - b'a') as usize] += 1;
            }
        }

        for i in 0..WORD_LENGTH {
            if feedback[i] != Feedback::Correct {
                let idx = (guess.letter(i) - b'a') as usize;
                if answer_remaining[idx] > 0 {
                    feedback[i] = Feedback::Present;
                    answer_remaining[idx] -= 1;
                }
            }
        }

        Self::new(feedback)
    }

    /// Pattern from its base-3 code, or `None` past the last valid code.
    pub fn from_code(code: u8) -> Option<Self> {
        ((code as usize) < Self::NUM_PATTERNS).then_some(Self(code))
    }

    /// The base-3 code, usable as an index into a `NUM_PATTERNS` table.
    pub fn code(self) -> u8 {
        self.0
    }

    /// Convert pattern to array of feedbacks
    pub fn to_feedbacks(self) -> [Feedback; WORD_LENGTH] {
        let mut pattern = self.0;
        let mut feedbacks = [Feedback::Absent; WORD_LENGTH];
        for feedback in feedbacks.iter_mut() {
            *feedback = match pattern % 3 {
                0 => Feedback::Absent,
                1 => Feedback::Present,
                _ => Feedback::Correct,
            };
            pattern /= 3;
        }
        feedbacks
    }

    /// Number of green positions.
    pub fn correct_count(self) -> usize {
        self.to_feedbacks()
            .iter()
            .filter(|&&f| f == Feedback::Correct)
            .count()
    }

    /// Check if this pattern represents a win (all correct)
    pub fn is_win(self) -> bool {
        self == Self::ALL_CORRECT
    }

    /// Parse a pattern from a string like "gyxxx", "gybbb" or "21000"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.chars().count() != WORD_LENGTH {
            return None;
        }
        let feedbacks: Option<Vec<_>> = s.chars().map(Feedback::from_char).collect();
        let arr: [Feedback; WORD_LENGTH] = feedbacks?.try_into().ok()?;
        Some(Self::new(arr))
    }

    /// Like [`parse`](Self::parse), but reports why the input was rejected.
    pub fn parse_strict(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.chars().count() != WORD_LENGTH {
            return Err(Error::MalformedRoundInput(format!(
                "feedback '{}' must have {} marks",
                trimmed, WORD_LENGTH
            )));
        }
        if let Some(bad) = trimmed.chars().find(|&c| Feedback::from_char(c).is_none()) {
            return Err(Error::MalformedRoundInput(format!(
                "invalid feedback mark '{}' (use g, y or x)",
                bad
            )));
        }
        Self::parse(trimmed)
            .ok_or_else(|| Error::MalformedRoundInput(format!("invalid feedback '{}'", trimmed)))
    }

    /// Display as emoji string
    pub fn to_emoji_string(self) -> String {
        self.to_feedbacks().iter().map(|f| f.to_char()).collect()
    }
}

impl fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_emoji_string())
    }
}
