//! Recency Cache demo host
//!
//! Builds a cache from the environment, drives a short access sequence
//! through it, and prints the resulting statistics as JSON.

use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recency_cache::{CacheConfig, LruCache};

/// Keys written by the demo, in order.
const DEMO_KEYS: [&str; 8] = ["a", "b", "c", "d", "a", "a", "a", "a"];

fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recency_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env().context("failed to load cache configuration")?;
    info!("Configuration loaded: max_size={}", config.max_size);

    let mut cache = LruCache::new(config.max_size)?;

    for key in DEMO_KEYS {
        cache.put(key, "1")?;
        debug!(key, size = cache.size(), "stored");
    }

    let stats = cache.stats();
    info!(
        "Demo complete: entries={}, size={}/{}, evictions={}",
        stats.entries, stats.total_size, stats.max_size, stats.evictions
    );

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
