// src/config.rs
//! Pipeline configuration: validation floors, batch cap, result sizes, grouping.
//!
//! Every field has a default, so a partial file (or no file at all) is fine.
//! TOML shape:
//! ```toml
//! min_text_len = 50
//! headline_len = 100
//! max_spam_phrases = 2
//! max_items = 100
//! extreme_limit = 5
//! top_group_limit = 10
//! group_by = "source"   # or "author"
//! ```
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "SENTIMENT_CONFIG_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/sentiment.toml";
pub const DEFAULT_JSON_PATH: &str = "config/sentiment.json";

/// Which item attribute the aggregator ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// Outlet name, then author.
    #[default]
    Source,
    /// Posting account, then outlet.
    Author,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Normalized texts shorter than this (chars) are rejected.
    pub min_text_len: usize,
    /// Texts without a sentence break must be at least this long.
    pub headline_len: usize,
    /// More distinct spam phrases than this → rejected.
    pub max_spam_phrases: usize,
    /// Upper bound on scored items per batch.
    pub max_items: usize,
    pub extreme_limit: usize,
    pub top_group_limit: usize,
    pub group_by: GroupBy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_text_len: 50,
            headline_len: 100,
            max_spam_phrases: 2,
            max_items: 100,
            extreme_limit: 5,
            top_group_limit: 10,
            group_by: GroupBy::Source,
        }
    }
}

impl PipelineConfig {
    /// Raise zero caps to 1 so a misconfigured file can't empty every result.
    pub fn sanitized(mut self) -> Self {
        self.max_items = self.max_items.max(1);
        self.extreme_limit = self.extreme_limit.max(1);
        self.top_group_limit = self.top_group_limit.max(1);
        self
    }
}

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_from(path: &Path) -> Result<PipelineConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading pipeline config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str())
        .with_context(|| format!("parsing pipeline config {}", path.display()))
}

/// Load config using env var + fallbacks:
/// 1) $SENTIMENT_CONFIG_PATH
/// 2) config/sentiment.toml
/// 3) config/sentiment.json
/// 4) built-in defaults
pub fn load_default() -> Result<PipelineConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_from(&pb);
        } else {
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from(DEFAULT_TOML_PATH);
    if toml_p.exists() {
        return load_from(&toml_p);
    }
    let json_p = PathBuf::from(DEFAULT_JSON_PATH);
    if json_p.exists() {
        return load_from(&json_p);
    }
    Ok(PipelineConfig::default())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<PipelineConfig> {
    match hint_ext {
        "toml" => return Ok(toml::from_str::<PipelineConfig>(s)?.sanitized()),
        "json" => return Ok(serde_json::from_str::<PipelineConfig>(s)?.sanitized()),
        _ => {}
    }
    if let Ok(c) = toml::from_str::<PipelineConfig>(s) {
        return Ok(c.sanitized());
    }
    if let Ok(c) = serde_json::from_str::<PipelineConfig>(s) {
        return Ok(c.sanitized());
    }
    Err(anyhow!("unsupported pipeline config format"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = parse_config("max_items = 20\ngroup_by = \"author\"", "toml").unwrap();
        assert_eq!(c.max_items, 20);
        assert_eq!(c.group_by, GroupBy::Author);
        assert_eq!(c.min_text_len, 50);
        assert_eq!(c.top_group_limit, 10);
    }

    #[test]
    fn json_and_unknown_extension() {
        let c = parse_config(r#"{"min_text_len": 30}"#, "json").unwrap();
        assert_eq!(c.min_text_len, 30);
        let c2 = parse_config(r#"{"headline_len": 80}"#, "").unwrap();
        assert_eq!(c2.headline_len, 80);
        assert!(parse_config("<xml/>", "").is_err());
    }

    #[test]
    fn zero_caps_are_raised() {
        let c = parse_config("max_items = 0\nextreme_limit = 0", "toml").unwrap();
        assert_eq!(c.max_items, 1);
        assert_eq!(c.extreme_limit, 1);
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        env::remove_var(ENV_CONFIG_PATH);

        // No files → defaults
        assert_eq!(load_default().unwrap(), PipelineConfig::default());

        // config/sentiment.json picked up
        fs::create_dir_all(tmp.path().join("config")).unwrap();
        fs::write(tmp.path().join(DEFAULT_JSON_PATH), r#"{"max_items": 7}"#).unwrap();
        assert_eq!(load_default().unwrap().max_items, 7);

        // Env wins over files
        let p = tmp.path().join("custom.toml");
        fs::write(&p, "max_items = 3").unwrap();
        env::set_var(ENV_CONFIG_PATH, p.display().to_string());
        assert_eq!(load_default().unwrap().max_items, 3);

        // Env pointing nowhere is an error, not a silent default
        env::set_var(ENV_CONFIG_PATH, tmp.path().join("missing.toml"));
        assert!(load_default().is_err());

        env::remove_var(ENV_CONFIG_PATH);
        env::set_current_dir(&old).unwrap();
    }
}
