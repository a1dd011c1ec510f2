//! Next-guess selection and the per-session state behind it.
//!
//! Each round the candidates are narrowed by the accumulated constraints,
//! then the front of the candidate list is scored by entropy plus two small
//! letter heuristics and the best word is suggested.

use crate::config::SuggesterConfig;
use crate::constraints::ConstraintSet;
use crate::dictionary::Dictionary;
use crate::entropy::{CandidateSet, EntropyScorer};
use crate::error::{Error, Result};
use crate::feedback::FeedbackPattern;
use crate::word::{letter_bit, Word};
use crate::WORD_LENGTH;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::HashSet;

/// Where a session stands between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ready to produce a suggestion.
    AwaitingGuess,
    /// A suggestion is out; waiting for the player to report feedback.
    AwaitingFeedback,
    /// No candidate survives the feedback. Only a reset leaves this state.
    Exhausted,
}

/// How a suggestion was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Taken from the precomputed opening table.
    Opening,
    /// So few candidates remain that the first one is played directly.
    FewRemaining,
    /// Best combined entropy and heuristic score in the sampling window.
    Scored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub word: Word,
    /// Combined score; zero when the word was not scored.
    pub score: f64,
    /// Entropy in bits, when it was computed.
    pub entropy: Option<f64>,
    pub reason: Reason,
    /// Candidates left when the suggestion was made.
    pub remaining: usize,
}

/// What the caller gets back after submitting one round.
#[derive(Debug, Clone)]
pub struct RoundReport {
    pub guess: Word,
    pub pattern: FeedbackPattern,
    pub before: usize,
    pub remaining: usize,
    /// The first few remaining candidates, in candidate order.
    pub preview: Vec<Word>,
    pub solved: bool,
    /// `None` once the candidates are exhausted.
    pub suggestion: Option<Suggestion>,
}

impl RoundReport {
    pub fn eliminated(&self) -> usize {
        self.before - self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Everything one game accumulates. Replaced wholesale on reset.
#[derive(Debug, Clone)]
pub struct SessionState {
    round: usize,
    history: Vec<(Word, FeedbackPattern)>,
    suggested: HashSet<Word>,
    constraints: ConstraintSet,
    candidates: CandidateSet,
    scorer: EntropyScorer,
    phase: Phase,
}

impl SessionState {
    fn new(dictionary: &Dictionary, config: &SuggesterConfig) -> Self {
        Self {
            round: 0,
            history: Vec::new(),
            suggested: HashSet::new(),
            constraints: ConstraintSet::new(),
            candidates: CandidateSet::new(dictionary.to_vec()),
            scorer: EntropyScorer::new(config.rule),
            phase: Phase::AwaitingGuess,
        }
    }

    /// Number of rounds of feedback submitted.
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn history(&self) -> &[(Word, FeedbackPattern)] {
        &self.history
    }

    pub fn suggested(&self) -> &HashSet<Word> {
        &self.suggested
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn scorer(&self) -> &EntropyScorer {
        &self.scorer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

/// Suggests guesses for one game at a time.
///
/// The dictionary is shared; the session state is owned outright, so
/// independent suggesters can run side by side on other threads.
#[derive(Debug, Clone)]
pub struct Suggester {
    dictionary: Dictionary,
    config: SuggesterConfig,
    openers: Vec<(Word, f64)>,
    common_mask: u32,
    state: SessionState,
}

impl Suggester {
    pub fn new(dictionary: Dictionary, config: SuggesterConfig) -> Self {
        let openers = config
            .opening_words
            .iter()
            .filter_map(|(text, weight)| match text.parse::<Word>() {
                Ok(word) => Some((word, *weight)),
                Err(e) => {
                    warn!("ignoring opening word: {}", e);
                    None
                }
            })
            .collect();
        let common_mask = config.common_mask();
        let state = SessionState::new(&dictionary, &config);
        Self {
            dictionary,
            config,
            openers,
            common_mask,
            state,
        }
    }

    pub fn with_defaults(dictionary: Dictionary) -> Self {
        Self::new(dictionary, SuggesterConfig::default())
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn config(&self) -> &SuggesterConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn round(&self) -> usize {
        self.state.round
    }

    pub fn remaining_count(&self) -> usize {
        self.state.candidates.len()
    }

    pub fn candidates(&self) -> &[Word] {
        &self.state.candidates
    }

    /// The first `preview_len` remaining candidates.
    pub fn preview(&self) -> &[Word] {
        let n = self.config.preview_len.min(self.state.candidates.len());
        &self.state.candidates[..n]
    }

    /// Produce the next guess, or `None` once no candidates remain.
    pub fn suggest(&mut self) -> Option<Suggestion> {
        if self.state.phase == Phase::Exhausted {
            return None;
        }
        let remaining = self.state.candidates.len();
        if remaining == 0 {
            info!("no candidates remain after {} rounds", self.state.round);
            self.state.phase = Phase::Exhausted;
            return None;
        }

        let suggestion = if remaining <= self.config.few_remaining {
            Suggestion {
                word: self.state.candidates[0],
                score: 0.0,
                entropy: None,
                reason: Reason::FewRemaining,
                remaining,
            }
        } else if self.is_opening_round() {
            match self.opening_word() {
                Some((word, weight)) => Suggestion {
                    word,
                    score: weight,
                    entropy: None,
                    reason: Reason::Opening,
                    remaining,
                },
                None => self.best_scored(self.config.opening_window),
            }
        } else {
            self.best_scored(self.config.sample_window)
        };

        info!(
            "round {}: suggesting '{}' ({:?}, score {:.3}) from {} candidates",
            self.state.round + 1,
            suggestion.word,
            suggestion.reason,
            suggestion.score,
            remaining
        );
        self.state.suggested.insert(suggestion.word);
        self.state.phase = Phase::AwaitingFeedback;
        Some(suggestion)
    }

    /// Record the feedback for one guess and suggest the next word.
    ///
    /// Fails with [`Error::NoCandidatesRemain`] if the session is already
    /// exhausted; the state is left untouched in that case.
    pub fn submit(&mut self, guess: Word, pattern: FeedbackPattern) -> Result<RoundReport> {
        if self.state.phase == Phase::Exhausted {
            return Err(Error::NoCandidatesRemain);
        }

        let before = self.state.candidates.len();
        self.state.constraints.update(guess, pattern);
        let mut narrowed = self.state.constraints.apply(&self.state.candidates);
        if !pattern.is_win() {
            narrowed.retain(|&word| word != guess);
        }
        self.state.candidates.replace(narrowed);
        self.state.round += 1;
        self.state.history.push((guess, pattern));
        self.state.phase = Phase::AwaitingGuess;
        debug!(
            "round {}: '{}' {} left {} of {} candidates",
            self.state.round,
            guess,
            pattern,
            self.state.candidates.len(),
            before
        );

        let suggestion = self.suggest();
        Ok(RoundReport {
            guess,
            pattern,
            before,
            remaining: self.state.candidates.len(),
            preview: self.preview().to_vec(),
            solved: pattern.is_win() && !self.state.candidates.is_empty(),
            suggestion,
        })
    }

    /// Validate raw round input, then [`submit`](Self::submit) it.
    pub fn submit_str(&mut self, guess: &str, pattern: &str) -> Result<RoundReport> {
        let guess: Word = guess.parse()?;
        let pattern = FeedbackPattern::parse_strict(pattern)?;
        self.submit(guess, pattern)
    }

    /// Start a new game and return its first suggestion.
    pub fn reset(&mut self) -> Option<Suggestion> {
        self.state = SessionState::new(&self.dictionary, &self.config);
        info!("session reset, {} candidates", self.state.candidates.len());
        self.suggest()
    }

    /// Bonus added to a word's entropy.
    ///
    /// Rewards distinct letters that are neither green nor excluded yet, and
    /// common letters placed where no green is known.
    pub fn heuristic_bonus(&self, word: Word) -> f64 {
        let constraints = &self.state.constraints;
        let fresh = word.letter_mask() & !constraints.settled_mask();
        let common = (0..WORD_LENGTH)
            .filter(|&i| {
                !constraints.is_correct_at(i) && self.common_mask & letter_bit(word.letter(i)) != 0
            })
            .count();
        fresh.count_ones() as f64 * self.config.unused_letter_bonus
            + common as f64 * self.config.common_letter_bonus
    }

    fn is_opening_round(&self) -> bool {
        self.state.round == 0 && self.state.constraints.is_empty()
    }

    /// Highest-weighted opening word present in the dictionary.
    fn opening_word(&self) -> Option<(Word, f64)> {
        let mut best: Option<(Word, f64)> = None;
        for &(word, weight) in &self.openers {
            if !self.dictionary.contains(word) {
                continue;
            }
            if best.map_or(true, |(_, w)| weight > w) {
                best = Some((word, weight));
            }
        }
        best
    }

    /// Score the first `window` candidates and keep the first maximum.
    fn best_scored(&mut self, window: usize) -> Suggestion {
        let remaining = self.state.candidates.len();
        let sample: Vec<Word> = self
            .state
            .candidates
            .iter()
            .take(window.max(1))
            .copied()
            .collect();

        let mut best: Option<Suggestion> = None;
        for word in sample {
            let entropy = self.state.scorer.entropy(word, &self.state.candidates);
            let score = entropy + self.heuristic_bonus(word);
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(Suggestion {
                    word,
                    score,
                    entropy: Some(entropy),
                    reason: Reason::Scored,
                    remaining,
                });
            }
        }

        // The sample holds at least one word: callers check for an empty set.
        best.unwrap_or_else(|| Suggestion {
            word: self.state.candidates[0],
            score: 0.0,
            entropy: None,
            reason: Reason::FewRemaining,
            remaining,
        })
    }

    /// Play a game, asking `get_feedback` for the pattern of each guess.
    /// Returns the guesses made, stopping on a win, on exhaustion, or after
    /// `max_rounds` guesses.
    pub fn solve_with_feedback<F>(&mut self, mut get_feedback: F) -> Vec<(Word, FeedbackPattern)>
    where
        F: FnMut(Word) -> FeedbackPattern,
    {
        let mut guesses = Vec::new();
        let mut next = self.suggest();

        for _ in 0..self.config.max_rounds {
            let Some(suggestion) = next else {
                break;
            };

            let pattern = get_feedback(suggestion.word);
            guesses.push((suggestion.word, pattern));

            if pattern.is_win() {
                break;
            }

            next = match self.submit(suggestion.word, pattern) {
                Ok(report) => report.suggestion,
                Err(_) => None,
            };
        }

        guesses
    }

    /// Solve a puzzle knowing the target word (for testing/benchmarking)
    pub fn solve_for_target(&mut self, target: Word) -> Vec<(Word, FeedbackPattern)> {
        let rule = self.config.rule;
        self.solve_with_feedback(|guess| FeedbackPattern::calculate_with(rule, guess, target))
    }

    fn fresh(&self) -> Self {
        Self {
            dictionary: self.dictionary.clone(),
            config: self.config.clone(),
            openers: self.openers.clone(),
            common_mask: self.common_mask,
            state: SessionState::new(&self.dictionary, &self.config),
        }
    }

    /// Guesses needed for `target` in a fresh game, or `max_rounds + 1` on failure.
    fn guesses_for(&self, target: Word) -> usize {
        let mut session = self.fresh();
        let guesses = session.solve_for_target(target);
        match guesses.last() {
            Some((_, pattern)) if pattern.is_win() => guesses.len(),
            _ => self.config.max_rounds + 1,
        }
    }

    /// Calculate the average number of guesses needed to solve all words.
    /// Unsolved words count as `max_rounds + 1`.
    pub fn benchmark_average_guesses(&self) -> f64 {
        let total_guesses: usize = self
            .dictionary
            .words()
            .par_iter()
            .map(|&target| self.guesses_for(target))
            .sum();

        total_guesses as f64 / self.dictionary.len() as f64
    }

    /// Get distribution of guess counts across all words
    pub fn benchmark_guess_distribution(&self) -> Vec<(usize, usize)> {
        let guess_counts: Vec<usize> = self
            .dictionary
            .words()
            .par_iter()
            .map(|&target| self.guesses_for(target))
            .collect();

        let max_guesses = guess_counts.iter().copied().max().unwrap_or(0);
        let mut distribution = vec![0usize; max_guesses + 1];

        for count in guess_counts {
            distribution[count] += 1;
        }

        distribution
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggester(words: &[&str]) -> Suggester {
        let dict = Dictionary::new(words.iter().map(|s| s.parse().unwrap()).collect()).unwrap();
        Suggester::with_defaults(dict)
    }

    #[test]
    fn bonus_counts_fresh_and_common_letters() {
        let s = suggester(&["crane", "slate", "trace"]);
        let crane: Word = "crane".parse().unwrap();
        // Five fresh letters; r, a, n, e are common, c is not.
        let expected = 5.0 * 0.5 + 4.0 * 0.3;
        assert!((s.heuristic_bonus(crane) - expected).abs() < 1e-9);
    }

    #[test]
    fn bonus_ignores_settled_letters_and_green_positions() {
        let mut s = suggester(&["crane", "slate", "trace", "grape", "plane"]);
        s.submit_str("crane", "xxggg").unwrap();
        // c and r are excluded; a, n, e are green at positions 2..5.
        let plane: Word = "plane".parse().unwrap();
        // Fresh letters: p, l. Common letters off the greens: l at position 1.
        let expected = 2.0 * 0.5 + 1.0 * 0.3;
        assert!((s.heuristic_bonus(plane) - expected).abs() < 1e-9);
    }

    #[test]
    fn fresh_sessions_share_the_dictionary() {
        let s = suggester(&["crane", "slate", "trace"]);
        let copy = s.fresh();
        assert!(std::ptr::eq(
            s.dictionary().words().as_ptr(),
            copy.dictionary().words().as_ptr()
        ));
        assert_eq!(copy.round(), 0);
    }
}
