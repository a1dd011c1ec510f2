use crate::feedback::EvaluationRule;
use crate::word::letter_bit;

/// Tunables for next-guess selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggesterConfig {
    /// How many candidates, from the front of the list, are scored each round.
    pub sample_window: usize,
    /// Window used on the first round when no opening word is in the dictionary.
    pub opening_window: usize,
    /// At or below this many candidates the first one is returned unscored.
    pub few_remaining: usize,
    /// Added per distinct letter of a guess that is neither green nor excluded yet.
    pub unused_letter_bonus: f64,
    /// Added per common letter sitting at a position that is not green yet.
    pub common_letter_bonus: f64,
    pub common_letters: String,
    /// Precomputed first-round openers and their weights.
    pub opening_words: Vec<(String, f64)>,
    /// Number of remaining candidates listed after each round.
    pub preview_len: usize,
    /// Guess limit for simulated games.
    pub max_rounds: usize,
    pub rule: EvaluationRule,
}

impl Default for SuggesterConfig {
    fn default() -> Self {
        Self {
            sample_window: 100,
            opening_window: 200,
            few_remaining: 2,
            unused_letter_bonus: 0.5,
            common_letter_bonus: 0.3,
            common_letters: "etaoinshrdl".to_string(),
            opening_words: vec![
                ("stare".to_string(), 5.92),
                ("crane".to_string(), 5.89),
                ("trace".to_string(), 5.88),
                ("adieu".to_string(), 5.85),
                ("audio".to_string(), 5.83),
            ],
            preview_len: 20,
            max_rounds: 6,
            rule: EvaluationRule::Membership,
        }
    }
}

impl SuggesterConfig {
    /// Bitmask of `common_letters`, bit 0 being `a`. Non-letters are ignored.
    pub fn common_mask(&self) -> u32 {
        self.common_letters
            .bytes()
            .filter(u8::is_ascii_lowercase)
            .fold(0, |mask, b| mask | letter_bit(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_mask_ignores_non_letters() {
        let config = SuggesterConfig {
            common_letters: "e-a!E".to_string(),
            ..SuggesterConfig::default()
        };
        assert_eq!(config.common_mask(), letter_bit(b'e') | letter_bit(b'a'));
        assert_eq!(SuggesterConfig::default().common_mask().count_ones(), 11);
    }
}
