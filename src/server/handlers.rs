//! Audit tool endpoints
//!
//! Every handler follows the same shape: validate input, consult the result
//! cache, acquire a browser on a miss, crawl and score, store, respond.
//! The browser handle is closed before any error propagates, so a failed
//! computation never leaks a Chrome process.

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use super::AppState;
use super::error::{AuditError, AuditResult};
use super::meta_audit;
use crate::analysis::{self, EntityCount};
use crate::crawl::{self, CrawlOutcome, CrawlTarget, LinkGraph};
use crate::extract::{self, PageSignal, RenderOptions};

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    url: Option<String>,
    keyword: Option<String>,
    competitor_url: Option<String>,
}

/// Validate a required URL field into a normalized target.
fn require_target(url: Option<&String>) -> AuditResult<CrawlTarget> {
    let raw = url
        .map(String::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AuditError::InvalidInput("url is required".to_string()))?;

    CrawlTarget::parse(raw).map_err(|e| AuditError::InvalidInput(format!("Invalid url: {e:#}")))
}

/// Run a full bounded crawl, closing the browser on every exit path.
async fn crawl_with_browser(state: &AppState, seed: CrawlTarget) -> AuditResult<CrawlOutcome> {
    let handle = state.provider.acquire().await?;
    let outcome = crawl::crawl_site(&handle, seed, &state.config).await;
    handle.close().await;
    outcome.map_err(AuditError::from)
}

/// Render individual pages without link-following, one browser for all.
///
/// Returns one `Option<PageSignal>` per target; a page that fails to render
/// yields `None` and the rest still load.
async fn render_pages(
    state: &AppState,
    targets: &[CrawlTarget],
) -> AuditResult<Vec<Option<PageSignal>>> {
    let handle = state.provider.acquire().await?;
    let options = RenderOptions {
        navigation_timeout_secs: state.config.navigation_timeout_secs(),
    };

    let result = async {
        let page = handle.new_page().await?;
        let mut signals = Vec::with_capacity(targets.len());
        for target in targets {
            signals.push(extract::render(&page, target, options).await);
        }
        Ok::<_, anyhow::Error>(signals)
    }
    .await;

    handle.close().await;
    result.map_err(AuditError::from)
}

/// `POST /api/duplicate-finder`: crawl a site and report near-duplicate
/// page pairs.
pub async fn duplicate_finder(
    State(state): State<AppState>,
    Json(req): Json<UrlRequest>,
) -> AuditResult<Json<Value>> {
    let target = require_target(req.url.as_ref())?;
    let key = crate::cache::ResultCache::key("duplicate-finder", &[target.as_str()]);

    if let Some(cached) = state.cache.get(&key) {
        return Ok(Json(cached));
    }

    let outcome = crawl_with_browser(&state, target).await?;
    let duplicates = analysis::find_near_duplicates(&outcome.pages);

    let response = json!({
        "duplicates": duplicates,
        "scannedCount": outcome.scanned_count(),
    });

    state.cache.insert(key, response.clone());
    Ok(Json(response))
}

/// `POST /api/authority-checker`: crawl a site and report its internal
/// link graph: degrees, orphans and clusters.
pub async fn authority_checker(
    State(state): State<AppState>,
    Json(req): Json<UrlRequest>,
) -> AuditResult<Json<Value>> {
    let target = require_target(req.url.as_ref())?;
    let key = crate::cache::ResultCache::key("authority-checker", &[target.as_str()]);

    if let Some(cached) = state.cache.get(&key) {
        return Ok(Json(cached));
    }

    let outcome = crawl_with_browser(&state, target).await?;
    let graph = LinkGraph::build(&outcome);

    let response = json!({
        "nodes": graph.nodes,
        "links": graph.links,
        "orphans": graph.orphans,
        "clusters": graph.clusters,
        "scannedCount": outcome.scanned_count(),
    });

    state.cache.insert(key, response.clone());
    Ok(Json(response))
}

/// Resolve comparison entity counts: a live competitor page when one was
/// given and renders, the deterministic reference table otherwise.
fn comparison_counts(
    competitor_signal: Option<&PageSignal>,
    keyword: &str,
) -> (Vec<EntityCount>, String) {
    match competitor_signal {
        Some(signal) => (
            analysis::term_frequencies(&signal.text),
            signal.url.clone(),
        ),
        None => (
            analysis::fallback_reference_counts(keyword),
            "reference".to_string(),
        ),
    }
}

/// `POST /api/semantic-seo-mapper`: rank the entity gaps between a target
/// page and a comparison source for one keyword.
pub async fn semantic_seo_mapper(
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> AuditResult<Json<Value>> {
    let target = require_target(req.url.as_ref())?;
    let keyword = req
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AuditError::InvalidInput("keyword is required".to_string()))?
        .to_string();

    let competitor = match req.competitor_url.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(CrawlTarget::parse(raw).map_err(|e| {
            AuditError::InvalidInput(format!("Invalid competitorUrl: {e:#}"))
        })?),
        _ => None,
    };

    let key = crate::cache::ResultCache::key(
        "semantic-seo-mapper",
        &[
            target.as_str(),
            &keyword,
            competitor.as_ref().map_or("", |c| c.as_str()),
        ],
    );

    if let Some(cached) = state.cache.get(&key) {
        return Ok(Json(cached));
    }

    let mut targets = vec![target.clone()];
    if let Some(c) = &competitor {
        targets.push(c.clone());
    }
    let mut signals = render_pages(&state, &targets).await?;

    let target_signal = signals
        .remove(0)
        .ok_or_else(|| AuditError::Internal("Failed to load target page".to_string()))?;
    let competitor_signal = signals.pop().flatten();
    if competitor.is_some() && competitor_signal.is_none() {
        warn!("Competitor page failed to render, using reference comparison");
    }

    let target_counts = analysis::term_frequencies(&target_signal.text);
    let (comp_counts, comp_source) = comparison_counts(competitor_signal.as_ref(), &keyword);
    let entities = analysis::rank_gaps(&target_counts, &comp_counts);

    let response = json!({
        "entities": entities,
        "competitorUrl": if comp_source == "reference" { Value::Null } else { json!(comp_source) },
        "meta": {
            "keyword": keyword,
            "targetUrl": target_signal.url,
            "wordCount": target_signal.word_count,
            "headingCount": target_signal.headings.len(),
        },
    });

    state.cache.insert(key, response.clone());
    Ok(Json(response))
}

/// `POST /api/general-audit`: side-by-side entity coverage of a target page
/// and a competitor (or the reference table), plus the ranked gaps.
pub async fn general_audit(
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> AuditResult<Json<Value>> {
    let target = require_target(req.url.as_ref())?;
    let keyword = req
        .keyword
        .as_deref()
        .map(str::trim)
        .unwrap_or("")
        .to_string();

    let competitor = match req.competitor_url.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(CrawlTarget::parse(raw).map_err(|e| {
            AuditError::InvalidInput(format!("Invalid competitorUrl: {e:#}"))
        })?),
        _ => None,
    };

    let key = crate::cache::ResultCache::key(
        "general-audit",
        &[
            target.as_str(),
            &keyword,
            competitor.as_ref().map_or("", |c| c.as_str()),
        ],
    );

    if let Some(cached) = state.cache.get(&key) {
        return Ok(Json(cached));
    }

    let mut targets = vec![target.clone()];
    if let Some(c) = &competitor {
        targets.push(c.clone());
    }
    let mut signals = render_pages(&state, &targets).await?;

    let target_signal = signals
        .remove(0)
        .ok_or_else(|| AuditError::Internal("Failed to load target page".to_string()))?;
    let competitor_signal = signals.pop().flatten();
    if competitor.is_some() && competitor_signal.is_none() {
        warn!("Competitor page failed to render, using reference comparison");
    }

    let target_counts = analysis::term_frequencies(&target_signal.text);
    let (comp_counts, comp_source) = comparison_counts(competitor_signal.as_ref(), &keyword);
    let gaps = analysis::rank_gaps(&target_counts, &comp_counts);
    let h1_count = target_signal.headings_at(1).len();

    let response = json!({
        "user": {
            "url": target_signal.url,
            "wordCount": target_signal.word_count,
            "headingCount": target_signal.headings.len(),
            "h1Count": h1_count,
            "imagesMissingAlt": target_signal.images_missing_alt,
            "entities": target_counts,
        },
        "competitor": {
            "source": comp_source,
            "entities": comp_counts,
        },
        "gaps": gaps,
        "scannedAt": Utc::now().to_rfc3339(),
    });

    state.cache.insert(key, response.clone());
    Ok(Json(response))
}

/// `POST /api/meta-auditor`: head-tag audit over a plain HTTP fetch,
/// no browser involved.
pub async fn meta_auditor(
    State(state): State<AppState>,
    Json(req): Json<UrlRequest>,
) -> AuditResult<Json<Value>> {
    let target = require_target(req.url.as_ref())?;
    let key = crate::cache::ResultCache::key("meta-auditor", &[target.as_str()]);

    if let Some(cached) = state.cache.get(&key) {
        return Ok(Json(cached));
    }

    let html = meta_audit::fetch_html(&state.http, target.as_str())
        .await
        .map_err(AuditError::from)?;
    let meta = meta_audit::parse_meta(&html).map_err(AuditError::from)?;
    let findings = meta_audit::audit_meta(&meta);

    let response = json!({
        "url": target.as_str(),
        "meta": meta,
        "findings": findings,
    });

    state.cache.insert(key, response.clone());
    Ok(Json(response))
}
