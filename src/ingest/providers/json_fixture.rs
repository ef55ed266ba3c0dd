// src/ingest/providers/json_fixture.rs
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

use crate::ingest::types::{ItemSource, NewsSearchResponse, SocialPost};
use crate::item::RawItem;

/// Source backed by JSON content already on hand (a saved search response or
/// a hand-written batch). Accepted shapes:
/// - `[{"text": ..., "source": ...}, ...]`: raw items
/// - `{"articles": [...]}`: news search response
/// - `{"posts": [...]}`: social posts
///
/// No HTTP; the topic is not used for filtering.
pub struct JsonFixtureSource {
    name: String,
    content: String,
}

impl JsonFixtureSource {
    pub fn from_fixture(name: impl Into<String>, content: &str) -> Self {
        Self {
            name: name.into(),
            content: content.to_string(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading items from {}", path.display()))?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("fixture")
            .to_string();
        Ok(Self { name, content })
    }
}

/// Parse any of the accepted shapes into raw items.
pub fn parse_items(content: &str) -> Result<Vec<RawItem>> {
    let v: Value = serde_json::from_str(content).context("parsing items json")?;
    if v.is_array() {
        return Ok(serde_json::from_value(v)?);
    }
    if v.get("articles").is_some() {
        let resp: NewsSearchResponse = serde_json::from_value(v)?;
        if let Some(status) = resp.status.as_deref() {
            if status != "ok" {
                bail!("news search returned status {status:?}");
            }
        }
        return Ok(resp.articles.into_iter().map(RawItem::from).collect());
    }
    if let Value::Object(mut obj) = v {
        if let Some(posts) = obj.remove("posts") {
            let posts: Vec<SocialPost> = serde_json::from_value(posts)?;
            return Ok(posts.into_iter().map(RawItem::from).collect());
        }
    }
    bail!("unsupported items json: expected an array, {{\"articles\"}} or {{\"posts\"}}")
}

#[async_trait]
impl ItemSource for JsonFixtureSource {
    async fn fetch(&self, _topic: &str) -> Result<Vec<RawItem>> {
        let items = parse_items(&self.content)?;
        tracing::debug!(source = %self.name, count = items.len(), "fixture items parsed");
        Ok(items)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
