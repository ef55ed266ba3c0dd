//! Lexicon polarity estimator.
//!
//! Every lexicon word carries `[polarity, subjectivity]` with polarity in [-1,1]
//! and subjectivity in [0,1]. A text's estimate is the mean over the words it
//! contains, after two local modifiers:
//! - an intensifier right before a word scales it ("very good" > "good"),
//! - a negator within the 3 preceding tokens flips and halves it ("not good").
//!
//! Text without any lexicon word estimates to (0.0, 0.0).

use anyhow::{ensure, Context, Result};
use std::collections::HashMap;

/// Lexicon shipped with the crate.
pub const EMBEDDED_LEXICON: &str = include_str!("../sentiment_lexicon.json");

const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Polarity {
    /// Negative-to-positive valence in [-1, 1].
    pub polarity: f64,
    /// Opinionated-vs-factual in [0, 1].
    pub subjectivity: f64,
}

#[derive(Debug, Clone)]
pub struct PolarityLexicon {
    words: HashMap<String, (f64, f64)>,
}

impl PolarityLexicon {
    /// Parse the lexicon bundled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_LEXICON).context("embedded sentiment lexicon")
    }

    /// Parse and check a `{"word": [polarity, subjectivity], ...}` document.
    /// Out-of-range values or an empty table are errors, not silently clamped.
    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: HashMap<String, (f64, f64)> =
            serde_json::from_str(raw).context("lexicon is not a word → [polarity, subjectivity] map")?;
        ensure!(!parsed.is_empty(), "lexicon has no entries");

        let mut words = HashMap::with_capacity(parsed.len());
        for (w, (p, s)) in parsed {
            ensure!((-1.0..=1.0).contains(&p), "polarity out of range for {w:?}: {p}");
            ensure!((0.0..=1.0).contains(&s), "subjectivity out of range for {w:?}: {s}");
            words.insert(w.to_lowercase(), (p, s));
        }
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Estimate polarity and subjectivity of already-normalized text.
    pub fn estimate(&self, text: &str) -> Polarity {
        let tokens = tokenize(text);
        let mut pol_sum = 0.0f64;
        let mut subj_sum = 0.0f64;
        let mut hits = 0usize;

        for (i, tok) in tokens.iter().enumerate() {
            let Some(&(mut p, mut s)) = self.words.get(tok.as_str()) else {
                continue;
            };

            if let Some(m) = i.checked_sub(1).and_then(|j| intensifier(&tokens[j])) {
                p *= m;
                s *= m;
            }

            let negated = (1..=NEGATION_WINDOW).any(|k| i >= k && is_negator(&tokens[i - k]));
            if negated {
                p *= NEGATION_FACTOR;
            }

            pol_sum += p;
            subj_sum += s;
            hits += 1;
        }

        if hits == 0 {
            return Polarity::default();
        }
        Polarity {
            polarity: (pol_sum / hits as f64).clamp(-1.0, 1.0),
            subjectivity: (subj_sum / hits as f64).clamp(0.0, 1.0),
        }
    }
}

/// Lowercased word tokens; apostrophes stay inside words so "isn't" is one token.
pub fn tokenize(s: &str) -> Vec<String> {
    s.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|t| t.trim_matches(|c| c == '\'' || c == '\u{2019}'))
        .filter(|t| !t.is_empty())
        .map(|t| t.replace('\u{2019}', "'").to_lowercase())
        .collect()
}

fn intensifier(tok: &str) -> Option<f64> {
    match tok {
        "very" | "really" | "highly" | "deeply" => Some(1.3),
        "extremely" | "hugely" => Some(1.5),
        "incredibly" | "exceptionally" => Some(1.4),
        "so" | "too" => Some(1.2),
        "quite" => Some(1.1),
        "slightly" | "somewhat" => Some(0.6),
        _ => None,
    }
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "nor"
            | "hardly"
            | "isn't"
            | "wasn't"
            | "aren't"
            | "weren't"
            | "won't"
            | "can't"
            | "cannot"
            | "don't"
            | "doesn't"
            | "didn't"
            | "without"
    )
}
