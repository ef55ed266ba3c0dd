//! Demo: analyze one or more JSON item files about a topic and print the reports.
//!
//! Usage: `analyze_batch <topic> <items.json> [more.json ...]`
//! Each file is treated as its own source and analyzed independently.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use topic_sentiment_analyzer::ingest::providers::json_fixture::JsonFixtureSource;
use topic_sentiment_analyzer::ingest::types::ItemSource;
use topic_sentiment_analyzer::ingest::{analyze_sources, AnalysisFailure};
use topic_sentiment_analyzer::{config, logging, Pipeline};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev so SENTIMENT_CONFIG_PATH / RUST_LOG can come from it.
    let _ = dotenvy::dotenv();
    logging::init_tracing();

    let mut args = std::env::args().skip(1);
    let Some(topic) = args.next() else {
        bail!("usage: analyze_batch <topic> <items.json> [more.json ...]");
    };
    let paths: Vec<PathBuf> = args.map(PathBuf::from).collect();
    if paths.is_empty() {
        bail!("no item files given");
    }

    let cfg = config::load_default()?;
    let pipeline = Arc::new(Pipeline::new(cfg));
    tracing::info!(strategy = ?pipeline.scorer().strategy(), files = paths.len(), "starting analysis");

    let mut sources: Vec<Arc<dyn ItemSource>> = Vec::with_capacity(paths.len());
    for p in &paths {
        sources.push(Arc::new(JsonFixtureSource::from_path(p)?));
    }

    for report in analyze_sources(pipeline, &sources, &topic, FETCH_TIMEOUT).await {
        match report.outcome {
            Ok(r) => println!("{}", serde_json::to_string_pretty(&r)?),
            Err(AnalysisFailure::Pipeline(e)) => {
                eprintln!("[{}] {}", report.source, e.user_message());
            }
            Err(AnalysisFailure::Upstream(e)) => {
                eprintln!("[{}] could not read items: {e:#}", report.source);
            }
        }
    }
    Ok(())
}
