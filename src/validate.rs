// src/validate.rs
//! Quality gate: drops items with too little substance or promotional filler
//! before they reach scoring and skew the aggregate counts.
//!
//! All checks run on normalized text. The gate is a pure predicate and never
//! fails; an item with absent text is simply rejected as too short.

use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::item::RawItem;
use crate::normalize::normalize;

/// Promotional phrases; each counts once no matter how often it repeats.
pub const SPAM_PHRASES: &[&str] = &[
    "click here",
    "subscribe now",
    "sign up",
    "download app",
    "watch video",
    "see more",
    "read full story here",
];

/// Why an item did not make it into the scored set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    TooShort,
    /// No sentence break and still short: a bare headline.
    HeadlineOnly,
    Spam,
    /// Valid, but the batch cap was already reached.
    OverCap,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::TooShort => "too_short",
            RejectReason::HeadlineOnly => "headline_only",
            RejectReason::Spam => "spam",
            RejectReason::OverCap => "over_cap",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityValidator {
    min_text_len: usize,
    headline_len: usize,
    max_spam_phrases: usize,
}

impl Default for QualityValidator {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

impl QualityValidator {
    pub fn from_config(cfg: &PipelineConfig) -> Self {
        Self {
            min_text_len: cfg.min_text_len,
            headline_len: cfg.headline_len,
            max_spam_phrases: cfg.max_spam_phrases,
        }
    }

    pub fn is_acceptable(&self, item: &RawItem) -> bool {
        self.check(item).is_ok()
    }

    /// Validate an item, normalizing its text first.
    pub fn check(&self, item: &RawItem) -> Result<(), RejectReason> {
        self.check_normalized(&normalize(&item.text))
    }

    /// Validate text that has already been through `normalize`.
    pub fn check_normalized(&self, text: &str) -> Result<(), RejectReason> {
        let len = text.chars().count();
        if len < self.min_text_len {
            return Err(RejectReason::TooShort);
        }
        if !text.contains(". ") && len < self.headline_len {
            return Err(RejectReason::HeadlineOnly);
        }
        if spam_phrase_count(text) > self.max_spam_phrases {
            return Err(RejectReason::Spam);
        }
        Ok(())
    }
}

/// Number of distinct spam phrases present (case-insensitive).
pub fn spam_phrase_count(text: &str) -> usize {
    let lower = text.to_lowercase();
    SPAM_PHRASES.iter().filter(|p| lower.contains(*p)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "Officials confirmed the bridge reopened on Monday. \
                           Traffic returned to normal levels by the evening rush.";

    #[test]
    fn accepts_substantial_text() {
        let v = QualityValidator::default();
        assert!(v.is_acceptable(&RawItem::new(ARTICLE)));
    }

    #[test]
    fn rejects_short_and_empty() {
        let v = QualityValidator::default();
        assert_eq!(v.check(&RawItem::new("Too short")), Err(RejectReason::TooShort));
        assert_eq!(v.check(&RawItem::default()), Err(RejectReason::TooShort));
    }

    #[test]
    fn length_is_measured_after_normalization() {
        let v = QualityValidator::default();
        let padded = format!("hi https://{}.example.com   @someone", "x".repeat(80));
        assert_eq!(v.check(&RawItem::new(padded)), Err(RejectReason::TooShort));
    }

    #[test]
    fn bare_headline_needs_more_length() {
        let v = QualityValidator::default();
        let headline = "Central bank leaves interest rates unchanged amid uncertainty";
        assert!(headline.len() >= 50 && headline.len() < 100);
        assert_eq!(v.check(&RawItem::new(headline)), Err(RejectReason::HeadlineOnly));

        let long_headline = format!("{headline} while analysts debate the outlook for the next quarter");
        assert!(v.is_acceptable(&RawItem::new(long_headline)));
    }

    #[test]
    fn spam_threshold_is_strictly_greater() {
        let v = QualityValidator::default();
        let two = format!("{ARTICLE} Click here or sign up.");
        assert_eq!(spam_phrase_count(&two), 2);
        assert!(v.is_acceptable(&RawItem::new(two)));

        let three = format!("{ARTICLE} Click here, sign up, subscribe now.");
        assert_eq!(v.check(&RawItem::new(three)), Err(RejectReason::Spam));
    }

    #[test]
    fn repeated_phrase_counts_once() {
        assert_eq!(spam_phrase_count("see more see more SEE MORE"), 1);
    }
}
