//! # Items
//! Value types flowing through the pipeline: `RawItem` in, `ScoredItem` out.
//!
//! Provider payloads are loosely typed, so deserialization is lenient:
//! a missing, `null` or non-string `text` becomes `""`, and non-string optional
//! fields become `None`. Nothing downstream has to re-check field shapes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Sentiment class assigned by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One text item as handed over by a fetch collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub title: Option<String>,
    /// Outlet / provider name (e.g. "Reuters").
    #[serde(default, deserialize_with = "lenient_opt")]
    pub source: Option<String>,
    /// Posting account for social items.
    #[serde(default, deserialize_with = "lenient_opt")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub url: Option<String>,
    /// ISO-8601, passed through untouched.
    #[serde(default, deserialize_with = "lenient_opt")]
    pub timestamp: Option<String>,
}

impl RawItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A `RawItem` plus its sentiment. Serializes flat, like the raw item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: RawItem,
    pub sentiment: SentimentLabel,
    /// Always in [0.0, 1.0], rounded to 3 decimals.
    pub confidence: f64,
}

impl ScoredItem {
    pub fn new(item: RawItem, sentiment: SentimentLabel, confidence: f64) -> Self {
        Self {
            item,
            sentiment,
            confidence,
        }
    }

    pub fn source(&self) -> Option<&str> {
        non_blank(self.item.source.as_deref())
    }

    pub fn author(&self) -> Option<&str> {
        non_blank(self.item.author.as_deref())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

fn lenient_text<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

pub(crate) fn lenient_opt<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}
