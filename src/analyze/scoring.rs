//! Label and confidence from an adjusted polarity.
//!
//! Labels split at ±0.05 (exclusive). Confidence:
//! - positive/negative: `min(|polarity| * 1.2, 1.0)`, then ×1.15 when the text
//!   is highly subjective (> 0.7)
//! - neutral: flat 0.7
//! - floors when the signal sets carry unambiguous evidence for the label
//!
//! Output is rounded to 3 decimals.

use super::signals::SignalHits;
use crate::item::SentimentLabel;

pub const POLARITY_THRESHOLD: f64 = 0.05;
pub const NEUTRAL_CONFIDENCE: f64 = 0.7;
pub const DEGENERATE_CONFIDENCE: f64 = 0.5;

const POLARITY_SCALE: f64 = 1.2;
const SUBJECTIVE_ABOVE: f64 = 0.7;
const SUBJECTIVE_BOOST: f64 = 1.15;
const STRONG_FLOOR: f64 = 0.7;
const NEG_CONTEXT_FLOOR: f64 = 0.65;
const NEG_CONTEXT_MIN_HITS: usize = 2;

/// Inputs to the confidence step.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfidenceInputs {
    /// Base polarity plus signal adjustment, clamped to [-1, 1].
    pub adjusted_polarity: f64,
    pub subjectivity: f64,
    pub hits: SignalHits,
}

impl ConfidenceInputs {
    /// Combine a base estimate with signal hits (clamping included).
    pub fn new(base_polarity: f64, subjectivity: f64, hits: SignalHits) -> Self {
        Self {
            adjusted_polarity: (base_polarity + hits.adjustment()).clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
            hits,
        }
    }
}

pub fn classify(adjusted_polarity: f64) -> SentimentLabel {
    if adjusted_polarity > POLARITY_THRESHOLD {
        SentimentLabel::Positive
    } else if adjusted_polarity < -POLARITY_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

pub fn confidence(label: SentimentLabel, inputs: &ConfidenceInputs) -> f64 {
    let mut c = match label {
        SentimentLabel::Neutral => NEUTRAL_CONFIDENCE,
        _ => (inputs.adjusted_polarity.abs() * POLARITY_SCALE).min(1.0),
    };

    if label != SentimentLabel::Neutral && inputs.subjectivity > SUBJECTIVE_ABOVE {
        c = (c * SUBJECTIVE_BOOST).min(1.0);
    }

    let h = &inputs.hits;
    match label {
        SentimentLabel::Positive if h.strong_positive > 0 => c = c.max(STRONG_FLOOR),
        SentimentLabel::Negative => {
            if h.strong_negative > 0 {
                c = c.max(STRONG_FLOOR);
            }
            if h.negative_context >= NEG_CONTEXT_MIN_HITS {
                c = c.max(NEG_CONTEXT_FLOOR);
            }
        }
        _ => {}
    }

    round3(c.clamp(0.0, 1.0))
}

#[inline]
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(p: f64, s: f64, hits: SignalHits) -> ConfidenceInputs {
        ConfidenceInputs::new(p, s, hits)
    }

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(classify(0.05), SentimentLabel::Neutral);
        assert_eq!(classify(-0.05), SentimentLabel::Neutral);
        assert_eq!(classify(0.051), SentimentLabel::Positive);
        assert_eq!(classify(-0.051), SentimentLabel::Negative);
    }

    #[test]
    fn scaled_and_capped() {
        let i = inputs(0.5, 0.3, SignalHits::default());
        assert_eq!(confidence(SentimentLabel::Positive, &i), 0.6);
        let i = inputs(-0.9, 0.3, SignalHits::default());
        assert_eq!(confidence(SentimentLabel::Negative, &i), 1.0);
    }

    #[test]
    fn neutral_is_flat_even_when_subjective() {
        let i = inputs(0.0, 0.95, SignalHits::default());
        assert_eq!(confidence(SentimentLabel::Neutral, &i), 0.7);
    }

    #[test]
    fn subjectivity_boost() {
        let i = inputs(0.4, 0.8, SignalHits::default());
        // 0.4 * 1.2 * 1.15 = 0.552
        assert_eq!(confidence(SentimentLabel::Positive, &i), 0.552);
    }

    #[test]
    fn floors_apply_to_matching_label_only() {
        let strong_pos = SignalHits {
            strong_positive: 1,
            ..Default::default()
        };
        let i = inputs(-0.1, 0.0, strong_pos); // 0.05 adjusted
        assert_eq!(classify(i.adjusted_polarity), SentimentLabel::Neutral);

        let i = inputs(0.0, 0.0, strong_pos); // adjusted 0.15 → 0.18 raw
        assert_eq!(confidence(SentimentLabel::Positive, &i), 0.7);

        let strong_neg = SignalHits {
            strong_negative: 1,
            ..Default::default()
        };
        let i = inputs(0.0, 0.0, strong_neg); // adjusted -0.15 → 0.18 raw
        assert_eq!(confidence(SentimentLabel::Negative, &i), 0.7);
        // strong-negative evidence does not lift a positive label
        let i = inputs(0.3, 0.0, strong_neg); // adjusted 0.15 → 0.18 raw
        assert_eq!(confidence(SentimentLabel::Positive, &i), 0.18);

        let ctx = SignalHits {
            negative_context: 2,
            ..Default::default()
        };
        let i = inputs(0.0, 0.0, ctx); // adjusted -0.16 → 0.192 raw
        assert_eq!(confidence(SentimentLabel::Negative, &i), 0.65);
    }

    #[test]
    fn adjusted_polarity_is_clamped() {
        let hits = SignalHits {
            strong_positive: 10,
            ..Default::default()
        };
        assert_eq!(inputs(0.9, 0.0, hits).adjusted_polarity, 1.0);
    }
}
