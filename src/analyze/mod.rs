// src/analyze/mod.rs
//! Sentiment scorer: normalized text → `(label, confidence)`.
//!
//! Two tiers, picked once when the scorer is built:
//! 1) `Lexical`: lexicon polarity + weighted signal sets (see `signals`, `scoring`)
//! 2) `KeywordRatio`: keyword counting (see `fallback`), used when the lexicon
//!    cannot be loaded
//!
//! Both are total. Text shorter than 3 chars after normalization is
//! `(neutral, 0.5)` in either tier.

pub mod fallback;
pub mod scoring;
pub mod signals;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::item::SentimentLabel;
use crate::normalize::normalize;
use crate::sentiment::PolarityLexicon;

pub use crate::analyze::scoring::{classify, confidence, ConfidenceInputs};
pub use crate::analyze::signals::SignalHits;

const MIN_SCORABLE_CHARS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    pub confidence: f64,
}

impl SentimentScore {
    pub fn new(label: SentimentLabel, confidence: f64) -> Self {
        Self { label, confidence }
    }

    /// Score for empty / near-empty text.
    pub fn degenerate() -> Self {
        Self::new(SentimentLabel::Neutral, scoring::DEGENERATE_CONFIDENCE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Lexical,
    KeywordRatio,
}

#[derive(Debug, Clone)]
enum Strategy {
    Lexical(Arc<PolarityLexicon>),
    KeywordRatio,
}

/// Stateless scorer. Cheap to clone, safe to share across threads.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    strategy: Strategy,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer {
    /// Build with the embedded lexicon, falling back to keyword counting if it
    /// does not load.
    pub fn new() -> Self {
        match PolarityLexicon::embedded() {
            Ok(lex) => Self::with_lexicon(lex),
            Err(e) => {
                warn!(error = ?e, "polarity lexicon unavailable, using keyword-ratio scoring");
                Self::keyword_ratio()
            }
        }
    }

    /// Build from a caller-supplied lexicon document; same fallback rule.
    pub fn from_lexicon_json(raw: &str) -> Self {
        match PolarityLexicon::from_json(raw) {
            Ok(lex) => Self::with_lexicon(lex),
            Err(e) => {
                warn!(error = ?e, "custom lexicon rejected, using keyword-ratio scoring");
                Self::keyword_ratio()
            }
        }
    }

    pub fn with_lexicon(lexicon: PolarityLexicon) -> Self {
        Self {
            strategy: Strategy::Lexical(Arc::new(lexicon)),
        }
    }

    pub fn keyword_ratio() -> Self {
        Self {
            strategy: Strategy::KeywordRatio,
        }
    }

    pub fn strategy(&self) -> StrategyKind {
        match self.strategy {
            Strategy::Lexical(_) => StrategyKind::Lexical,
            Strategy::KeywordRatio => StrategyKind::KeywordRatio,
        }
    }

    /// Score raw text.
    pub fn score(&self, text: &str) -> SentimentScore {
        self.score_normalized(text, &normalize(text))
    }

    /// Score when the caller already holds the normalized form.
    pub fn score_normalized(&self, raw: &str, normalized: &str) -> SentimentScore {
        if normalized.chars().count() < MIN_SCORABLE_CHARS {
            return SentimentScore::degenerate();
        }

        match &self.strategy {
            Strategy::Lexical(lex) => {
                let base = lex.estimate(normalized);
                let hits = SignalHits::scan(normalized);
                let inputs = ConfidenceInputs::new(base.polarity, base.subjectivity, hits);
                let label = classify(inputs.adjusted_polarity);
                SentimentScore::new(label, confidence(label, &inputs))
            }
            Strategy::KeywordRatio => fallback::keyword_ratio(&raw.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_lexicon() {
        assert_eq!(SentimentScorer::new().strategy(), StrategyKind::Lexical);
    }

    #[test]
    fn broken_lexicon_selects_keyword_ratio() {
        let s = SentimentScorer::from_lexicon_json("{ not json");
        assert_eq!(s.strategy(), StrategyKind::KeywordRatio);
        let out = s.score("What a great and wonderful result for everyone");
        assert_eq!(out, SentimentScore::new(SentimentLabel::Positive, 0.75));
    }

    #[test]
    fn degenerate_floor_in_both_tiers() {
        for s in [SentimentScorer::new(), SentimentScorer::keyword_ratio()] {
            assert_eq!(s.score(""), SentimentScore::degenerate());
            assert_eq!(s.score("ab"), SentimentScore::degenerate());
            assert_eq!(s.score("  @handle  https://x.y "), SentimentScore::degenerate());
        }
    }

    #[test]
    fn mild_signal_moves_off_neutral() {
        let s = SentimentScorer::new();
        let out = s.score("Officials said the plan could support local farmers");
        assert_eq!(out.label, SentimentLabel::Positive);
    }

    #[test]
    fn plain_fact_is_neutral() {
        let s = SentimentScorer::new();
        let out = s.score("The committee will meet on Tuesday to review the schedule");
        assert_eq!(out, SentimentScore::new(SentimentLabel::Neutral, 0.7));
    }
}
