use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wordle_suggest::{
    entropy, load_dictionary, ConstraintSet, EvaluationRule, FeedbackPattern, Suggester, Word,
};

fn first_scored_round(c: &mut Criterion) {
    let dict = load_dictionary().unwrap();
    let stare: Word = "stare".parse().unwrap();
    let light: Word = "light".parse().unwrap();
    let pattern = FeedbackPattern::calculate(stare, light);
    c.bench_function("suggest_after_opening", |b| {
        b.iter(|| {
            let mut suggester = Suggester::with_defaults(dict.clone());
            suggester.submit(stare, black_box(pattern)).unwrap()
        })
    });
}

fn entropy_full_dictionary(c: &mut Criterion) {
    let dict = load_dictionary().unwrap();
    let guess: Word = "crane".parse().unwrap();
    for rule in [EvaluationRule::Membership, EvaluationRule::Standard] {
        c.bench_function(&format!("entropy_{:?}", rule).to_lowercase(), |b| {
            b.iter(|| entropy(rule, black_box(guess), &dict))
        });
    }
}

fn filter_full_dictionary(c: &mut Criterion) {
    let dict = load_dictionary().unwrap();
    let mut constraints = ConstraintSet::new();
    constraints.update("crane".parse().unwrap(), FeedbackPattern::parse("xyxxg").unwrap());
    c.bench_function("filter_full_dictionary", |b| {
        b.iter(|| constraints.apply(black_box(&dict)))
    });
}

criterion_group!(
    benches,
    first_scored_round,
    entropy_full_dictionary,
    filter_full_dictionary
);
criterion_main!(benches);
