//! # Wordle Suggest
//!
//! Suggests the next Wordle guess from the feedback seen so far.
//!
//! Feedback is folded into a [`ConstraintSet`] that narrows the dictionary to
//! the words still possible. The [`Suggester`] then picks the candidate whose
//! feedback pattern is expected to reveal the most information, with small
//! bonuses for trying fresh and common letters.

pub mod config;
pub mod constraints;
pub mod dictionary;
pub mod entropy;
pub mod error;
pub mod feedback;
pub mod suggester;
pub mod word;

pub use config::SuggesterConfig;
pub use constraints::ConstraintSet;
pub use dictionary::Dictionary;
pub use entropy::{entropy, CandidateSet, EntropyScorer};
pub use error::{Error, Result};
pub use feedback::{EvaluationRule, Feedback, FeedbackPattern};
pub use suggester::{Phase, Reason, RoundReport, SessionState, Suggester, Suggestion};
pub use word::Word;

/// Word length for Wordle
pub const WORD_LENGTH: usize = 5;

/// Load the dictionary from the embedded word list
pub fn load_dictionary() -> Result<Dictionary> {
    Dictionary::parse(include_str!("../dictionary/words.txt"))
}
