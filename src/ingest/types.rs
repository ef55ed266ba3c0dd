// src/ingest/types.rs
use anyhow::Result;
use serde::Deserialize;

use crate::ingest::clean_markup;
use crate::item::{lenient_opt, RawItem};

/// A fetch collaborator: returns the items it found for a topic.
/// Implementations own their network calls and timeouts, and return an empty
/// vec (not an error) when nothing matched.
#[async_trait::async_trait]
pub trait ItemSource: Send + Sync {
    async fn fetch(&self, topic: &str) -> Result<Vec<RawItem>>;
    fn name(&self) -> &str;
}

/// News search article (NewsAPI `everything` shape).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    #[serde(default, deserialize_with = "lenient_opt")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_outlet")]
    pub source: Option<NewsOutlet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsOutlet {
    #[serde(default, deserialize_with = "lenient_opt")]
    pub name: Option<String>,
}

/// Outlet objects of the wrong shape read as absent.
fn lenient_outlet<'de, D>(de: D) -> Result<Option<NewsOutlet>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(de)?;
    Ok(serde_json::from_value(v).ok())
}

/// Response envelope of a news search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsSearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub articles: Vec<NewsArticle>,
}

impl From<NewsArticle> for RawItem {
    /// Title and description are joined as `"{title}. {description}"` so the
    /// headline contributes to scoring.
    fn from(a: NewsArticle) -> Self {
        let title = a.title.as_deref().map(clean_markup).filter(|s| !s.is_empty());
        let desc = a
            .description
            .as_deref()
            .map(clean_markup)
            .filter(|s| !s.is_empty());
        let text = match (&title, &desc) {
            (Some(t), Some(d)) => format!("{}. {}", t.trim_end_matches('.'), d),
            (Some(t), None) => t.clone(),
            (None, Some(d)) => d.clone(),
            (None, None) => String::new(),
        };
        RawItem {
            text,
            title,
            source: a.source.and_then(|s| s.name),
            author: a.author,
            url: a.url,
            timestamp: a.published_at,
        }
    }
}

/// Social post (tweet, caption) as returned by social search collaborators.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialPost {
    #[serde(default, deserialize_with = "lenient_opt", alias = "caption")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt", alias = "username")]
    pub author: Option<String>,
    /// e.g. "twitter", "instagram"; used as the item source.
    #[serde(default, deserialize_with = "lenient_opt")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt", alias = "timestamp")]
    pub created_at: Option<String>,
}

impl From<SocialPost> for RawItem {
    fn from(p: SocialPost) -> Self {
        RawItem {
            text: p.text.as_deref().map(clean_markup).unwrap_or_default(),
            title: None,
            source: p.platform,
            author: p.author,
            url: p.url,
            timestamp: p.created_at,
        }
    }
}
