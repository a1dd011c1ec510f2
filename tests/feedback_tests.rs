use wordle_suggest::{EvaluationRule, Feedback, FeedbackPattern, Word};

fn w(s: &str) -> Word {
    s.parse().unwrap()
}

fn membership(guess: &str, answer: &str) -> [Feedback; 5] {
    FeedbackPattern::calculate(w(guess), w(answer)).to_feedbacks()
}

fn standard(guess: &str, answer: &str) -> [Feedback; 5] {
    FeedbackPattern::calculate_with(EvaluationRule::Standard, w(guess), w(answer)).to_feedbacks()
}

use Feedback::{Absent as X, Correct as G, Present as Y};

#[test]
fn test_all_correct() {
    let pattern = FeedbackPattern::calculate(w("crane"), w("crane"));
    assert!(pattern.is_win());
    assert_eq!(pattern, FeedbackPattern::ALL_CORRECT);
}

#[test]
fn test_all_absent() {
    let pattern = FeedbackPattern::calculate(w("quick"), w("dream"));
    assert_eq!(pattern, FeedbackPattern::ALL_ABSENT);
}

#[test]
fn test_mixed_feedback() {
    assert_eq!(membership("crane", "charm"), [G, Y, G, X, X]);
}

#[test]
fn test_crane_against_trace() {
    // Position matches are green, c is elsewhere in "trace", n is not in it.
    assert_eq!(membership("crane", "trace"), [Y, G, G, X, G]);
}

#[test]
fn test_membership_marks_every_surplus_copy_present() {
    // Both e's of "speed" are green; p is yellow, s and d are not in "creep".
    assert_eq!(membership("speed", "creep"), [X, Y, G, G, X]);
    // "geese" has three e's against two in "creep"; all non-green ones are yellow.
    assert_eq!(membership("geese", "creep"), [X, Y, G, X, Y]);
    // One e in "those", yet both misplaced e's in "geese" are yellow.
    assert_eq!(membership("geese", "those"), [X, Y, Y, G, G]);
}

#[test]
fn test_standard_rule_limits_present_to_answer_copies() {
    assert_eq!(standard("speed", "creep"), [X, Y, G, G, X]);
    assert_eq!(standard("geese", "creep"), [X, Y, G, X, X]);
    assert_eq!(standard("geese", "those"), [X, X, X, G, G]);
    assert_eq!(standard("sores", "those"), [Y, Y, X, Y, X]);
}

#[test]
fn test_rules_agree_without_repeated_letters() {
    for (guess, answer) in [("crane", "trace"), ("slate", "plane"), ("audio", "radio")] {
        assert_eq!(membership(guess, answer), standard(guess, answer));
    }
}

#[test]
fn test_correct_count_matches_positional_agreement() {
    let words = ["crane", "trace", "geese", "those", "creep", "speed", "sores", "audio"];
    for guess in words {
        for answer in words {
            let expected = guess
                .bytes()
                .zip(answer.bytes())
                .filter(|(a, b)| a == b)
                .count();
            let pattern = FeedbackPattern::calculate(w(guess), w(answer));
            assert_eq!(pattern.correct_count(), expected, "{} vs {}", guess, answer);
        }
    }
}

#[test]
fn test_pattern_parse() {
    let pattern = FeedbackPattern::parse("gyxxx").unwrap();
    assert_eq!(pattern.to_feedbacks(), [G, Y, X, X, X]);
    assert_eq!(FeedbackPattern::parse("gybbb"), Some(pattern));
    assert_eq!(FeedbackPattern::parse("21000"), Some(pattern));
    assert_eq!(FeedbackPattern::parse("GYXXX"), Some(pattern));
}

#[test]
fn test_pattern_parse_invalid() {
    assert!(FeedbackPattern::parse("gyxxx1").is_none());
    assert!(FeedbackPattern::parse("gyxx").is_none());
    assert!(FeedbackPattern::parse("gyzxx").is_none());

    let err = FeedbackPattern::parse_strict("gyzxx").unwrap_err();
    assert!(err.to_string().contains("'z'"));
    let err = FeedbackPattern::parse_strict("gy").unwrap_err();
    assert!(err.to_string().contains("5 marks"));
}

#[test]
fn test_emoji_display() {
    let pattern = FeedbackPattern::new([G, Y, X, X, G]);
    assert_eq!(pattern.to_emoji_string(), "🟩🟨⬛⬛🟩");
    assert_eq!(pattern.to_string(), "🟩🟨⬛⬛🟩");
}

#[test]
fn test_pattern_codes_stop_at_all_correct() {
    assert_eq!(FeedbackPattern::from_code(0), Some(FeedbackPattern::ALL_ABSENT));
    assert_eq!(FeedbackPattern::from_code(242), Some(FeedbackPattern::ALL_CORRECT));
    assert_eq!(FeedbackPattern::ALL_CORRECT.code(), 242);
    assert!(FeedbackPattern::from_code(243).is_none());
    assert!(FeedbackPattern::from_code(250).is_none());
}
