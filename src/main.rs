// Audit API server
//
// Serves the crawl-backed audit tools over HTTP. Typically fronted by the
// dashboard; listens on 127.0.0.1:8080 unless SITELENS_ADDR says otherwise.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sitelens::cache::ResultCache;
use sitelens::config::AuditConfig;
use sitelens::server::{self, AppState};

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut builder = AuditConfig::builder();
    if let Some(max_pages) = env_parse::<usize>("SITELENS_MAX_PAGES") {
        builder = builder.max_pages(max_pages);
    }
    if let Some(timeout) = env_parse::<u64>("SITELENS_NAV_TIMEOUT_SECS") {
        builder = builder.navigation_timeout_secs(timeout);
    }
    if let Some(ttl) = env_parse::<u64>("SITELENS_CACHE_TTL_SECS") {
        builder = builder.cache_ttl_secs(ttl);
    }
    let config = builder.build().context("Invalid configuration")?;

    // The one piece of process-wide state: constructed here, injected into
    // every handler through AppState
    let cache = Arc::new(ResultCache::new(Duration::from_secs(
        config.cache_ttl_secs(),
    )));

    let state = AppState::new(config, cache)?;
    let app = server::router(state);

    let addr = std::env::var("SITELENS_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("sitelens audit API listening on {addr}");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
