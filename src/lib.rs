// src/lib.rs
//! Sentiment scoring and aggregation for short texts about a topic.
//!
//! Flow: `RawItem`s → `normalize` → `validate` → `analyze` (scorer) →
//! `aggregate`, sequenced by `pipeline::Pipeline`. `ingest` holds the boundary
//! with fetch collaborators.

pub mod aggregate;
pub mod analyze;
pub mod config;
pub mod ingest;
pub mod item;
pub mod logging;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod sentiment;
pub mod validate;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{AggregateResult, Aggregator, GroupCount, LabelStat};
pub use crate::analyze::{SentimentScore, SentimentScorer, StrategyKind};
pub use crate::config::{GroupBy, PipelineConfig};
pub use crate::item::{RawItem, ScoredItem, SentimentLabel};
pub use crate::normalize::normalize;
pub use crate::pipeline::{AnalysisReport, Pipeline, PipelineError, Rejection};
pub use crate::validate::{QualityValidator, RejectReason};
