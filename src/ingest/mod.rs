// src/ingest/mod.rs
//! Boundary with fetch collaborators: payload cleanup and a per-source runner.
//!
//! `analyze_sources` fetches every source concurrently and runs the pipeline
//! once per source on the blocking pool. Sources never share a batch, and a
//! failing or panicking source only affects its own `SourceReport`.

pub mod providers;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use once_cell::sync::OnceCell;
use regex::Regex;
use tokio::task::JoinError;
use tracing::warn;

use crate::ingest::types::ItemSource;
use crate::pipeline::{AnalysisReport, Pipeline, PipelineError};

const MAX_TEXT_CHARS: usize = 2_000;

/// Clean provider markup: decode HTML entities, strip tags, ASCII quotes,
/// collapse whitespace, cap length.
pub fn clean_markup(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    out = crate::normalize::fold_whitespace(&out);

    // 5) Length cap
    if out.chars().count() > MAX_TEXT_CHARS {
        out = out.chars().take(MAX_TEXT_CHARS).collect();
    }
    out
}

/// Why a source produced no report.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisFailure {
    /// Fetch collaborator failed (network, auth, rate limit, timeout).
    #[error("upstream source failed: {0:#}")]
    Upstream(anyhow::Error),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

#[derive(Debug)]
pub struct SourceReport {
    pub source: String,
    pub outcome: Result<AnalysisReport, AnalysisFailure>,
}

/// Fetch from all sources concurrently and analyze each batch on its own.
/// Reports come back in the order of `sources`.
pub async fn analyze_sources(
    pipeline: Arc<Pipeline>,
    sources: &[Arc<dyn ItemSource>],
    topic: &str,
    fetch_timeout: Duration,
) -> Vec<SourceReport> {
    let handles: Vec<_> = sources
        .iter()
        .map(|src| {
            let src = Arc::clone(src);
            let pipeline = Arc::clone(&pipeline);
            let topic = topic.to_string();
            let name = src.name().to_string();
            let handle =
                tokio::spawn(async move { analyze_one(pipeline, src, topic, fetch_timeout).await });
            (name, handle)
        })
        .collect();

    let mut out = Vec::with_capacity(handles.len());
    for (source, handle) in handles {
        let outcome = match handle.await {
            Ok(res) => res,
            Err(e) => Err(AnalysisFailure::Upstream(anyhow!("source task aborted: {e}"))),
        };
        if let Err(e) = &outcome {
            warn!(source = %source, error = %e, "source produced no report");
        }
        out.push(SourceReport { source, outcome });
    }
    out
}

async fn analyze_one(
    pipeline: Arc<Pipeline>,
    src: Arc<dyn ItemSource>,
    topic: String,
    fetch_timeout: Duration,
) -> Result<AnalysisReport, AnalysisFailure> {
    let items = match tokio::time::timeout(fetch_timeout, src.fetch(&topic)).await {
        Ok(Ok(items)) => items,
        Ok(Err(e)) => return Err(AnalysisFailure::Upstream(e)),
        Err(_) => {
            return Err(AnalysisFailure::Upstream(anyhow!(
                "{} timed out after {:?}",
                src.name(),
                fetch_timeout
            )))
        }
    };

    blocking_outcome(tokio::task::spawn_blocking(move || pipeline.run(items, &topic)).await)
}

/// `Pipeline::run` is total on content; the join error arm only catches a
/// bug that panics inside the pipeline, reported as `Internal` for that source.
fn blocking_outcome(
    joined: Result<Result<AnalysisReport, PipelineError>, JoinError>,
) -> Result<AnalysisReport, AnalysisFailure> {
    match joined {
        Ok(res) => res.map_err(AnalysisFailure::from),
        Err(e) => Err(PipelineError::Internal(e.to_string()).into()),
    }
}
