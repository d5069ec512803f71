//! HTTP surface for the audit tools
//!
//! One POST endpoint per tool under `/api/`, JSON in and out, with the
//! shared result cache and browser provider carried in application state.

pub mod error;
pub mod handlers;
pub mod meta_audit;

pub use error::{AuditError, AuditResult};

use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::browser::BrowserProvider;
use crate::cache::ResultCache;
use crate::config::AuditConfig;
use crate::utils::constants::CHROME_USER_AGENT;

/// Shared state handed to every handler.
///
/// The cache is the only cross-request mutable state in the process; it is
/// constructed once at startup and injected here rather than living behind
/// a hidden singleton.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ResultCache>,
    pub config: AuditConfig,
    pub provider: BrowserProvider,
    pub http: reqwest::Client,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the shared HTTP client cannot be constructed.
    pub fn new(config: AuditConfig, cache: Arc<ResultCache>) -> anyhow::Result<Self> {
        let provider = BrowserProvider::new(config.headless());
        let http = reqwest::Client::builder()
            .user_agent(CHROME_USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            cache,
            config,
            provider,
            http,
        })
    }
}

/// Build the audit API router.
#[must_use]
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/duplicate-finder", post(handlers::duplicate_finder))
        .route("/api/authority-checker", post(handlers::authority_checker))
        .route("/api/semantic-seo-mapper", post(handlers::semantic_seo_mapper))
        .route("/api/general-audit", post(handlers::general_audit))
        .route("/api/meta-auditor", post(handlers::meta_auditor))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
