//! Tracing setup and log-safe item identifiers.

use sha2::{Digest, Sha256};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG_FORMAT: &str = "SENTIMENT_LOG_FORMAT";
const DEFAULT_FILTER: &str = "topic_sentiment_analyzer=info,warn";

/// Install a global subscriber: `RUST_LOG` filter (default above), compact
/// output, or JSON lines when `SENTIMENT_LOG_FORMAT=json`.
/// Calling it again (or after another subscriber was set) is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = std::env::var(ENV_LOG_FORMAT)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}

/// Item id for rejection/debug lines: first 12 hex chars of SHA-256(text).
pub fn anon_hash(text: &str) -> String {
    Sha256::digest(text.as_bytes())[..6]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
