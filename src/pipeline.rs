//! # Batch Pipeline
//! `RawItem`s → normalize → validate → score → aggregate.
//!
//! Cap policy is filter-then-cap: every item is validated, then the first
//! `max_items` survivors (input order) are scored. Valid items beyond the cap
//! are reported as `RejectReason::OverCap`. This keeps the most usable items
//! when a batch is noisy.
//!
//! Emptiness is a typed signal, not a failure string: the caller matches on
//! `PipelineError` to tell "nothing came in" from "nothing passed the checks".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{AggregateResult, Aggregator};
use crate::analyze::SentimentScorer;
use crate::config::{GroupBy, PipelineConfig};
use crate::item::{RawItem, ScoredItem};
use crate::logging::anon_hash;
use crate::metrics;
use crate::normalize::normalize;
use crate::validate::{QualityValidator, RejectReason};

/// An input item that was not scored, by position in the input batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub index: usize,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("no topic given")]
    MissingTopic,
    #[error("no items to analyze for {topic:?}")]
    NoInput { topic: String },
    #[error("all {total_found} items for {topic:?} failed validation")]
    NoSurvivors {
        topic: String,
        total_found: usize,
        rejections: Vec<Rejection>,
    },
    #[error("analysis failed: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Text suitable for showing to the person who asked.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::MissingTopic => "Please enter a topic to analyze.".to_string(),
            PipelineError::NoInput { topic } => format!(
                "No items found for \"{topic}\". Try a different topic or broader search terms."
            ),
            PipelineError::NoSurvivors { topic, .. } => format!(
                "No items about \"{topic}\" passed the quality checks. \
                 Try rephrasing the topic or a more widely covered subject."
            ),
            PipelineError::Internal(_) => {
                "Analysis failed unexpectedly. Please try again.".to_string()
            }
        }
    }

    /// Metric/log label for the empty-result kinds.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::MissingTopic => "missing_topic",
            PipelineError::NoInput { .. } => "no_input",
            PipelineError::NoSurvivors { .. } => "no_survivors",
            PipelineError::Internal(_) => "internal",
        }
    }
}

/// Everything a presentation layer needs for one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub topic: String,
    pub generated_at: DateTime<Utc>,
    pub aggregate: AggregateResult,
    /// `total_found - total_items`.
    pub filtered_count: usize,
    pub rejections: Vec<Rejection>,
    /// Scored items in input order.
    pub items: Vec<ScoredItem>,
}

/// Stateless pipeline: build once, share by reference (or `Arc`) across calls.
#[derive(Debug, Clone)]
pub struct Pipeline {
    validator: QualityValidator,
    scorer: SentimentScorer,
    aggregator: Aggregator,
    max_items: usize,
    group_by: GroupBy,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Pipeline {
    pub fn new(cfg: PipelineConfig) -> Self {
        Self::with_scorer(cfg, SentimentScorer::new())
    }

    pub fn with_scorer(cfg: PipelineConfig, scorer: SentimentScorer) -> Self {
        let cfg = cfg.sanitized();
        Self {
            validator: QualityValidator::from_config(&cfg),
            scorer,
            aggregator: Aggregator::from_config(&cfg),
            max_items: cfg.max_items,
            group_by: cfg.group_by,
        }
    }

    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }

    /// Analyze one batch about `topic`.
    pub fn run(&self, items: Vec<RawItem>, topic: &str) -> Result<AnalysisReport, PipelineError> {
        metrics::ensure_described();
        let topic = topic.trim();
        if topic.is_empty() {
            metrics::record_empty(PipelineError::MissingTopic.kind());
            return Err(PipelineError::MissingTopic);
        }

        let total_found = items.len();
        metrics::record_run(total_found);
        if items.is_empty() {
            let err = PipelineError::NoInput {
                topic: topic.to_string(),
            };
            metrics::record_empty(err.kind());
            return Err(err);
        }

        // 1) Normalize + validate everything, cap survivors
        let mut rejections = Vec::new();
        let mut survivors: Vec<(RawItem, String)> = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            let normalized = normalize(&item.text);
            let verdict = self
                .validator
                .check_normalized(&normalized)
                .and_then(|_| {
                    if survivors.len() < self.max_items {
                        Ok(())
                    } else {
                        Err(RejectReason::OverCap)
                    }
                });
            match verdict {
                Ok(()) => survivors.push((item, normalized)),
                Err(reason) => {
                    debug!(index, id = %anon_hash(&item.text), reason = reason.as_str(), "item rejected");
                    metrics::record_rejected(reason);
                    rejections.push(Rejection { index, reason });
                }
            }
        }

        if survivors.is_empty() {
            let err = PipelineError::NoSurvivors {
                topic: topic.to_string(),
                total_found,
                rejections,
            };
            metrics::record_empty(err.kind());
            return Err(err);
        }

        // 2) Score
        let scored: Vec<ScoredItem> = survivors
            .into_iter()
            .map(|(item, normalized)| {
                let s = self.scorer.score_normalized(&item.text, &normalized);
                metrics::record_scored(s.label);
                ScoredItem::new(item, s.label, s.confidence)
            })
            .collect();

        // 3) Aggregate
        let group_by = self.group_by;
        let aggregate = self
            .aggregator
            .aggregate(&scored, |it| group_by.key_of(it))
            .with_total_found(total_found);

        debug!(
            topic,
            found = total_found,
            scored = aggregate.total_items,
            positive = aggregate.positive.count,
            negative = aggregate.negative.count,
            neutral = aggregate.neutral.count,
            "batch analyzed"
        );

        Ok(AnalysisReport {
            topic: topic.to_string(),
            generated_at: Utc::now(),
            filtered_count: aggregate.filtered_count(),
            aggregate,
            rejections,
            items: scored,
        })
    }
}
