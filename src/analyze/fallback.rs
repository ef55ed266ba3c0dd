//! Keyword-ratio scorer used when no polarity lexicon is available.
//!
//! Counts occurrences of two fixed word lists and classifies by which side
//! dominates. Every occurrence counts, so a repeated word weighs more.
//! Confidence comes in fixed tiers rather than from a polarity.

use crate::item::SentimentLabel;
use crate::sentiment::tokenize;

use super::SentimentScore;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "love", "best", "wonderful", "fantastic", "awesome",
    "happy", "perfect", "beautiful", "incredible", "brilliant", "outstanding", "superb",
    "terrific", "fabulous", "nice",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "worst", "hate", "horrible", "poor", "disappointing", "sad",
    "angry", "useless", "pathetic", "disgusting", "annoying", "frustrating", "ugly", "stupid",
    "boring", "waste",
];

const NO_SIGNAL_CONFIDENCE: f64 = 0.6;
const DOMINANT_SHARE: f64 = 0.6;
const DOMINANT_CONFIDENCE: f64 = 0.75;
const MAJORITY_CONFIDENCE: f64 = 0.65;

/// Score lowercased text by keyword counts.
pub fn keyword_ratio(text: &str) -> SentimentScore {
    let tokens = tokenize(text);
    let pos = tokens
        .iter()
        .filter(|t| POSITIVE_WORDS.contains(&t.as_str()))
        .count();
    let neg = tokens
        .iter()
        .filter(|t| NEGATIVE_WORDS.contains(&t.as_str()))
        .count();

    let total = pos + neg;
    if total == 0 || pos == neg {
        return SentimentScore::new(SentimentLabel::Neutral, NO_SIGNAL_CONFIDENCE);
    }

    let (label, winner) = if pos > neg {
        (SentimentLabel::Positive, pos)
    } else {
        (SentimentLabel::Negative, neg)
    };
    let share = winner as f64 / total as f64;
    let confidence = if share > DOMINANT_SHARE {
        DOMINANT_CONFIDENCE
    } else {
        MAJORITY_CONFIDENCE
    };
    SentimentScore::new(label, confidence)
}
