//! Information-theoretic scoring of guesses.
//!
//! A guess splits the remaining candidates into buckets by the pattern it
//! would produce against each of them. The Shannon entropy of that split is
//! the expected number of bits the guess reveals.

use crate::feedback::{EvaluationRule, FeedbackPattern};
use crate::word::Word;
use log::trace;
use std::collections::HashMap;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SNAPSHOT: AtomicU64 = AtomicU64::new(0);

fn next_snapshot() -> u64 {
    NEXT_SNAPSHOT.fetch_add(1, Ordering::Relaxed)
}

/// The words still consistent with the feedback, tagged with a snapshot id.
///
/// Ids are unique per process and every refinement takes a new one, so
/// anything computed against an older snapshot can be recognised as stale.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    words: Vec<Word>,
    version: u64,
}

impl CandidateSet {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            version: next_snapshot(),
        }
    }

    /// Replace the contents, moving to the next snapshot id.
    pub fn replace(&mut self, words: Vec<Word>) {
        self.words = words;
        self.version = next_snapshot();
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

impl Deref for CandidateSet {
    type Target = [Word];

    fn deref(&self) -> &[Word] {
        &self.words
    }
}

/// Entropy in bits of the pattern distribution `guess` induces over `candidates`.
///
/// Returns 0 for an empty slice; callers are expected not to ask.
pub fn entropy(rule: EvaluationRule, guess: Word, candidates: &[Word]) -> f64 {
    debug_assert!(!candidates.is_empty(), "entropy over no candidates");
    let n = candidates.len() as f64;
    if candidates.len() <= 1 {
        return 0.0;
    }

    let mut pattern_counts = [0u32; FeedbackPattern::NUM_PATTERNS];
    for &answer in candidates {
        let pattern = FeedbackPattern::calculate_with(rule, guess, answer);
        pattern_counts[pattern.code() as usize] += 1;
    }

    let mut entropy = 0.0;
    for &count in &pattern_counts {
        if count > 0 {
            let p = count as f64 / n;
            entropy -= p * p.log2();
        }
    }
    entropy
}

/// Memoising wrapper around [`entropy`].
///
/// The cache belongs to a single candidate snapshot. Asking about a different
/// snapshot drops every stored value first.
#[derive(Debug, Clone, Default)]
pub struct EntropyScorer {
    rule: EvaluationRule,
    snapshot: Option<u64>,
    cache: HashMap<Word, f64>,
    evaluations: u64,
}

impl EntropyScorer {
    pub fn new(rule: EvaluationRule) -> Self {
        Self {
            rule,
            ..Self::default()
        }
    }

    pub fn entropy(&mut self, guess: Word, candidates: &CandidateSet) -> f64 {
        if self.snapshot != Some(candidates.version()) {
            if !self.cache.is_empty() {
                trace!(
                    "dropping {} cached scores from snapshot {:?}",
                    self.cache.len(),
                    self.snapshot
                );
            }
            self.cache.clear();
            self.snapshot = Some(candidates.version());
        }

        if let Some(&cached) = self.cache.get(&guess) {
            return cached;
        }

        let value = entropy(self.rule, guess, candidates);
        self.evaluations += 1;
        trace!("entropy({}) = {:.4} over {} candidates", guess, value, candidates.len());
        self.cache.insert(guess, value);
        value
    }

    /// Number of entropy computations that were not served from the cache.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn cache_hits_do_not_recompute() {
        let set = CandidateSet::new(words(&["crane", "slate", "trace", "grape"]));
        let mut scorer = EntropyScorer::new(EvaluationRule::Membership);
        let guess = set[0];
        let first = scorer.entropy(guess, &set);
        let second = scorer.entropy(guess, &set);
        assert_eq!(first, second);
        assert_eq!(scorer.evaluations(), 1);
        assert_eq!(scorer.cached(), 1);
    }

    #[test]
    fn new_snapshot_invalidates_cache() {
        let mut set = CandidateSet::new(words(&["crane", "slate", "trace", "grape"]));
        let mut scorer = EntropyScorer::new(EvaluationRule::Membership);
        let guess: Word = "crane".parse().unwrap();
        let before = scorer.entropy(guess, &set);
        assert!(before > 0.0);

        set.replace(words(&["trace"]));
        let after = scorer.entropy(guess, &set);
        assert_eq!(after, 0.0);
        assert_eq!(scorer.evaluations(), 2);
        assert_eq!(scorer.cached(), 1);
    }

    #[test]
    fn even_split_gives_whole_bits() {
        // Against "abcde", each of these produces a distinct pattern.
        let set = words(&["abcde", "fghij", "abcdz", "zbcde"]);
        let guess: Word = "abcde".parse().unwrap();
        let h = entropy(EvaluationRule::Membership, guess, &set);
        assert!((h - 2.0).abs() < 1e-12);
    }

    #[test]
    fn single_shared_pattern_gives_zero() {
        // None of c, r, a, p, e occurs in any of them: all gray.
        let set = words(&["built", "dizzy", "month"]);
        let guess: Word = "crape".parse().unwrap();
        for rule in [EvaluationRule::Membership, EvaluationRule::Standard] {
            assert_eq!(entropy(rule, guess, &set), 0.0);
        }
    }

    #[test]
    fn positive_exactly_when_patterns_differ() {
        let set = words(&[
            "crane", "slate", "trace", "grape", "plane", "built", "dizzy", "month", "geese",
            "those",
        ]);
        let guesses = words(&["crane", "built", "geese", "jumpy", "wwwww", "zebra"]);
        for rule in [EvaluationRule::Membership, EvaluationRule::Standard] {
            for &guess in &guesses {
                for n in 1..=set.len() {
                    let sample = &set[..n];
                    let buckets: std::collections::HashSet<_> = sample
                        .iter()
                        .map(|&answer| FeedbackPattern::calculate_with(rule, guess, answer))
                        .collect();
                    let h = entropy(rule, guess, sample);
                    assert!(h >= 0.0);
                    assert_eq!(h > 0.0, buckets.len() > 1, "{} over {:?}", guess, sample);
                }
            }
        }
    }
}
