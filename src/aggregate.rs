//! # Aggregator
//! Pure, testable summary of a scored batch: label counts and percentages,
//! highest-confidence examples per label, and a frequency ranking by group key.
//! No I/O, no mutation of the input; the result is a fresh snapshot.
//!
//! Ordering is deterministic: both rankings use stable sorts, so ties keep
//! batch order (examples) or first-seen order (groups).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::{GroupBy, PipelineConfig};
use crate::item::{ScoredItem, SentimentLabel};

pub const UNKNOWN_GROUP: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelStat {
    pub count: usize,
    /// `count / total * 100`, 2 decimals; 0 when the batch is empty.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtremeExamples {
    pub most_positive: Vec<ScoredItem>,
    pub most_negative: Vec<ScoredItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateResult {
    pub total_items: usize,
    /// Items seen before validation; never below `total_items`.
    pub total_found: usize,
    pub positive: LabelStat,
    pub negative: LabelStat,
    pub neutral: LabelStat,
    pub extreme_examples: ExtremeExamples,
    pub top_groups: Vec<GroupCount>,
}

impl AggregateResult {
    pub fn stat(&self, label: SentimentLabel) -> LabelStat {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    /// Record how many items arrived before filtering (clamped to `total_items`).
    pub fn with_total_found(mut self, total_found: usize) -> Self {
        self.total_found = total_found.max(self.total_items);
        self
    }

    /// Items dropped between intake and scoring.
    pub fn filtered_count(&self) -> usize {
        self.total_found.saturating_sub(self.total_items)
    }
}

/// Source, then author, then nothing.
pub fn source_key(item: &ScoredItem) -> Option<String> {
    item.source().or_else(|| item.author()).map(str::to_string)
}

/// Author, then source, then nothing.
pub fn author_key(item: &ScoredItem) -> Option<String> {
    item.author().or_else(|| item.source()).map(str::to_string)
}

impl GroupBy {
    pub fn key_of(self, item: &ScoredItem) -> Option<String> {
        match self {
            GroupBy::Source => source_key(item),
            GroupBy::Author => author_key(item),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    extreme_limit: usize,
    top_group_limit: usize,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

impl Aggregator {
    pub fn from_config(cfg: &PipelineConfig) -> Self {
        Self {
            extreme_limit: cfg.extreme_limit,
            top_group_limit: cfg.top_group_limit,
        }
    }

    /// Summarize `items`. `total_found` starts equal to `total_items`; the
    /// pipeline widens it with `with_total_found`.
    pub fn aggregate<F>(&self, items: &[ScoredItem], group_key: F) -> AggregateResult
    where
        F: Fn(&ScoredItem) -> Option<String>,
    {
        let total = items.len();

        // 1) Tally labels in one pass
        let (mut pos, mut neg, mut neu) = (0usize, 0usize, 0usize);
        for it in items {
            match it.sentiment {
                SentimentLabel::Positive => pos += 1,
                SentimentLabel::Negative => neg += 1,
                SentimentLabel::Neutral => neu += 1,
            }
        }

        // 2) Extremes per label
        let extreme_examples = ExtremeExamples {
            most_positive: self.top_by_confidence(items, SentimentLabel::Positive),
            most_negative: self.top_by_confidence(items, SentimentLabel::Negative),
        };

        // 3) Group ranking
        let top_groups = self.rank_groups(items, group_key);

        AggregateResult {
            total_items: total,
            total_found: total,
            positive: stat(pos, total),
            negative: stat(neg, total),
            neutral: stat(neu, total),
            extreme_examples,
            top_groups,
        }
    }

    fn top_by_confidence(&self, items: &[ScoredItem], label: SentimentLabel) -> Vec<ScoredItem> {
        let mut part: Vec<&ScoredItem> = items.iter().filter(|it| it.sentiment == label).collect();
        // stable: equal confidences keep batch order
        part.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        part.into_iter()
            .take(self.extreme_limit)
            .cloned()
            .collect()
    }

    fn rank_groups<F>(&self, items: &[ScoredItem], group_key: F) -> Vec<GroupCount>
    where
        F: Fn(&ScoredItem) -> Option<String>,
    {
        // first-seen order lives in `groups`; `index` maps key → slot
        let mut groups: Vec<GroupCount> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for it in items {
            let key = group_key(it)
                .filter(|k| !k.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_GROUP.to_string());
            match index.get(&key) {
                Some(&slot) => groups[slot].count += 1,
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(GroupCount { key, count: 1 });
                }
            }
        }
        groups.sort_by(|a, b| b.count.cmp(&a.count));
        groups.truncate(self.top_group_limit);
        groups
    }
}

fn stat(count: usize, total: usize) -> LabelStat {
    LabelStat {
        count,
        percentage: percentage(count, total),
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

#[inline]
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
