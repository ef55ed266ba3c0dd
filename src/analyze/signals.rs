//! Weighted lexical signals layered on top of the base polarity.
//!
//! Four curated sets. "Strong" words are unambiguous on their own and weigh
//! 0.15 per hit; "context" words lean one way and weigh 0.08. Each entry counts
//! at most once per text. Multi-word entries match as consecutive tokens.

use once_cell::sync::Lazy;

use crate::sentiment::tokenize;

pub const STRONG_WEIGHT: f64 = 0.15;
pub const CONTEXT_WEIGHT: f64 = 0.08;

const STRONG_POSITIVE: &[&str] = &[
    "breakthrough",
    "record",
    "achievement",
    "achievements",
    "celebrate",
    "celebrates",
    "celebrated",
    "triumph",
    "historic",
    "victory",
    "milestone",
    "landmark",
    "remarkable",
    "outstanding",
    "excellent",
    "brilliant",
    "thriving",
    "booming",
    "soar",
    "soars",
    "soared",
    "all-time high",
];

const STRONG_NEGATIVE: &[&str] = &[
    "deadly",
    "kill",
    "kills",
    "killed",
    "killing",
    "disaster",
    "catastrophe",
    "catastrophic",
    "tragedy",
    "tragic",
    "devastating",
    "horrific",
    "massacre",
    "fatal",
    "collapse",
    "collapsed",
    "plunge",
    "plunged",
    "scandal",
    "fraud",
    "terror",
];

const POSITIVE_CONTEXT: &[&str] = &[
    "growth",
    "gain",
    "gains",
    "improve",
    "improved",
    "improvement",
    "recovery",
    "progress",
    "boost",
    "rally",
    "profit",
    "profits",
    "innovation",
    "agreement",
    "peace",
    "hope",
    "optimism",
    "support",
    "approved",
    "welcomed",
    "peace deal",
    "rate cut",
];

const NEGATIVE_CONTEXT: &[&str] = &[
    "attack",
    "attacks",
    "war",
    "violence",
    "conflict",
    "crisis",
    "decline",
    "loss",
    "losses",
    "layoffs",
    "recession",
    "shortage",
    "injured",
    "dead",
    "death",
    "deaths",
    "threat",
    "fears",
    "protest",
    "protests",
    "sanctions",
    "lawsuit",
    "job cuts",
];

/// An entry pre-split into tokens with the same tokenizer used on the text.
struct SignalSet(Vec<Vec<String>>);

impl SignalSet {
    fn new(entries: &[&str]) -> Self {
        Self(entries.iter().map(|e| tokenize(e)).collect())
    }

    fn count_in(&self, tokens: &[String]) -> usize {
        self.0
            .iter()
            .filter(|entry| match entry.as_slice() {
                [] => false,
                [word] => tokens.iter().any(|t| t == word),
                phrase => tokens.windows(phrase.len()).any(|w| w == phrase),
            })
            .count()
    }
}

static SETS: Lazy<[SignalSet; 4]> = Lazy::new(|| {
    [
        SignalSet::new(STRONG_POSITIVE),
        SignalSet::new(STRONG_NEGATIVE),
        SignalSet::new(POSITIVE_CONTEXT),
        SignalSet::new(NEGATIVE_CONTEXT),
    ]
});

/// Per-set hit counts for one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignalHits {
    pub strong_positive: usize,
    pub strong_negative: usize,
    pub positive_context: usize,
    pub negative_context: usize,
}

impl SignalHits {
    /// Scan normalized text (case is folded here).
    pub fn scan(text: &str) -> Self {
        let tokens = tokenize(text);
        let [sp, sn, pc, nc] = &*SETS;
        Self {
            strong_positive: sp.count_in(&tokens),
            strong_negative: sn.count_in(&tokens),
            positive_context: pc.count_in(&tokens),
            negative_context: nc.count_in(&tokens),
        }
    }

    /// Signed polarity shift: positive hits add, negative hits subtract.
    pub fn adjustment(&self) -> f64 {
        let pos = self.strong_positive as f64 * STRONG_WEIGHT
            + self.positive_context as f64 * CONTEXT_WEIGHT;
        let neg = self.strong_negative as f64 * STRONG_WEIGHT
            + self.negative_context as f64 * CONTEXT_WEIGHT;
        pos - neg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_and_context_sets_are_disjoint() {
        for set in [STRONG_POSITIVE, STRONG_NEGATIVE, POSITIVE_CONTEXT] {
            for w in set {
                assert!(!NEGATIVE_CONTEXT.contains(w), "{w} in two sets");
            }
        }
        for w in STRONG_POSITIVE {
            assert!(!POSITIVE_CONTEXT.contains(w) && !STRONG_NEGATIVE.contains(w));
        }
    }

    #[test]
    fn counts_distinct_entries_once() {
        let h = SignalHits::scan("War, war and more war after the attack");
        assert_eq!(h.negative_context, 2);
        assert_eq!(h.strong_negative, 0);
    }

    #[test]
    fn phrases_match_as_token_runs() {
        let h = SignalHits::scan("Stocks hit an all-time high as the peace deal holds");
        assert_eq!(h.strong_positive, 1);
        // "peace" and "peace deal" are separate entries
        assert_eq!(h.positive_context, 2);
    }

    #[test]
    fn whole_words_only() {
        // "award" must not hit "war", "warning" neither
        let h = SignalHits::scan("An award and a warning");
        assert_eq!(h, SignalHits::default());
    }

    #[test]
    fn adjustment_weights() {
        let h = SignalHits {
            strong_positive: 2,
            strong_negative: 0,
            positive_context: 1,
            negative_context: 3,
        };
        let expected = 2.0 * 0.15 + 0.08 - 3.0 * 0.08;
        assert!((h.adjustment() - expected).abs() < 1e-12);
    }
}
