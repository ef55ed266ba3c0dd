// tests/scorer_properties.rs
//
// Totality and scenario checks for the scorer and normalizer over noisy input.
// Randomized inputs are seeded, so failures reproduce.

use rand::{rngs::StdRng, Rng, SeedableRng};

use topic_sentiment_analyzer::{normalize, SentimentLabel, SentimentScore, SentimentScorer};

const FRAGMENTS: &[&str] = &[
    "great",
    "not",
    "terrible",
    "war",
    "record",
    "@user",
    "#tag",
    "https://t.co/x",
    "www.example.org",
    "   ",
    "\n\t",
    ".",
    ". ",
    "naïve",
    "日本語",
    "😀",
    "don't",
    "very",
    "ab",
    "",
    "h",
    "ttp://",
    "@",
    "#",
    "\u{00A0}",
    "breakthrough",
    "kills",
];

fn random_text(rng: &mut StdRng) -> String {
    let n = rng.random_range(0..24);
    (0..n)
        .map(|_| FRAGMENTS[rng.random_range(0..FRAGMENTS.len())])
        .collect::<Vec<_>>()
        .join(if rng.random_range(0..2) == 0 { " " } else { "" })
}

fn assert_bounded(s: SentimentScore, input: &str) {
    assert!(
        (0.0..=1.0).contains(&s.confidence),
        "confidence {} out of range for {input:?}",
        s.confidence
    );
    assert!(matches!(
        s.label,
        SentimentLabel::Positive | SentimentLabel::Negative | SentimentLabel::Neutral
    ));
}

#[test]
fn score_is_total_and_bounded() {
    let lexical = SentimentScorer::new();
    let keyword = SentimentScorer::keyword_ratio();
    let mut rng = StdRng::seed_from_u64(7);

    let mut fixed = vec![
        String::new(),
        " ".repeat(1000),
        "\u{0}\u{1}\u{7f}".to_string(),
        "😀".repeat(500),
        "great ".repeat(20_000),
        "terrible war ".repeat(5_000),
    ];
    fixed.extend((0..500).map(|_| random_text(&mut rng)));

    for text in &fixed {
        assert_bounded(lexical.score(text), text);
        assert_bounded(keyword.score(text), text);
    }
}

#[test]
fn degenerate_inputs() {
    let s = SentimentScorer::new();
    let expected = SentimentScore::new(SentimentLabel::Neutral, 0.5);
    assert_eq!(s.score(""), expected);
    assert_eq!(s.score("ab"), expected);
    assert_eq!(s.score("   \t\n "), expected);
    assert_eq!(s.score("@someone #"), expected);
}

#[test]
fn normalize_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..1_000 {
        let x = random_text(&mut rng);
        let once = normalize(&x);
        assert_eq!(normalize(&once), once, "input: {x:?}");
    }
}

#[test]
fn scoring_is_deterministic() {
    let a = SentimentScorer::new();
    let b = SentimentScorer::new();
    let text = "Investors cheer a strong rally, though fears of recession linger.";
    assert_eq!(a.score(text), b.score(text));
    assert_eq!(a.score(text), a.score(text));
}

#[test]
fn scenario_strong_positive_news() {
    let s = SentimentScorer::new().score(
        "BBC reports economic growth and record achievement. Markets celebrate the breakthrough.",
    );
    assert_eq!(s.label, SentimentLabel::Positive);
    assert!(s.confidence >= 0.7, "confidence {}", s.confidence);
}

#[test]
fn scenario_violent_news() {
    let s = SentimentScorer::new().score("Deadly attack kills dozens in war zone violence.");
    assert_eq!(s.label, SentimentLabel::Negative);
    assert!(s.confidence >= 0.65, "confidence {}", s.confidence);
}

#[test]
fn negated_praise_is_not_positive() {
    let s = SentimentScorer::new().score("The new policy is not good for anyone involved");
    assert_ne!(s.label, SentimentLabel::Positive);
}

#[test]
fn confidence_has_three_decimals() {
    let s = SentimentScorer::new();
    for text in [
        "Shares rise modestly as profits improve",
        "Crowds protest the plan amid fears of layoffs",
        "A quiet day at the office",
    ] {
        let c = s.score(text).confidence;
        assert!(((c * 1000.0).round() - c * 1000.0).abs() < 1e-6, "{c}");
    }
}
