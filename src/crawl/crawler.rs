//! Breadth-first site crawler
//!
//! Drives one page object through a bounded frontier: dequeue FIFO, render,
//! collect the signal, admit newly discovered same-origin links. Visitation
//! order is deterministic (first-seen FIFO) so identical requests produce
//! identical results; the result cache depends on that.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::frontier::Frontier;
use super::target::CrawlTarget;
use crate::browser::BrowserHandle;
use crate::config::AuditConfig;
use crate::extract::{self, PageSignal, RenderOptions};

/// A directed link between two successfully crawled pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEdge {
    pub source: String,
    pub target: String,
}

/// Everything one crawl produced: the signals of every page that rendered,
/// and the link edges between them.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    pub pages: Vec<PageSignal>,
    pub edges: Vec<LinkEdge>,
    pub seed: String,
}

impl CrawlOutcome {
    #[must_use]
    pub fn scanned_count(&self) -> usize {
        self.pages.len()
    }
}

/// Decide whether a discovered link should be crawled.
#[must_use]
pub fn should_visit(candidate: &CrawlTarget, seed: &CrawlTarget, config: &AuditConfig) -> bool {
    if !seed.same_origin(candidate, config.allow_subdomains()) {
        return false;
    }

    for regex in config.excluded_patterns_compiled() {
        if regex.is_match(candidate.as_str()) {
            return false;
        }
    }

    true
}

/// Crawl a site breadth-first from `seed`, bounded by the configured page cap.
///
/// One page object is reused across sequential navigations, a deliberate
/// simplification trading parallel-fetch speed for a predictable resource
/// footprint. A page that fails to render is skipped without refunding its
/// frontier slot; reaching the cap is normal termination, not an error.
pub async fn crawl_site(
    handle: &BrowserHandle,
    seed: CrawlTarget,
    config: &AuditConfig,
) -> Result<CrawlOutcome> {
    let page = handle.new_page().await?;
    let options = RenderOptions {
        navigation_timeout_secs: config.navigation_timeout_secs(),
    };

    let mut frontier = Frontier::new(seed.clone(), config.max_pages());
    let mut pages: Vec<PageSignal> = Vec::new();
    // Raw edges are collected for every same-origin link and filtered to
    // visited endpoints once the crawl settles
    let mut raw_edges: Vec<(CrawlTarget, CrawlTarget)> = Vec::new();

    info!(seed = %seed, max_pages = config.max_pages(), "Starting crawl");

    while let Some(current) = frontier.dequeue() {
        let Some(signal) = extract::render(&page, &current, options).await else {
            continue;
        };

        frontier.mark_visited(&current);

        for link in &signal.links {
            let resolved = match current.join(&link.href) {
                Ok(t) => t,
                Err(e) => {
                    debug!(href = %link.href, error = %e, "Dropping unresolvable href");
                    continue;
                }
            };

            if resolved == current || !should_visit(&resolved, &seed, config) {
                continue;
            }

            raw_edges.push((current.clone(), resolved.clone()));
            frontier.admit(resolved);
        }

        pages.push(signal);
    }

    // Report only edges whose endpoints were both successfully visited
    let mut edges: Vec<LinkEdge> = Vec::new();
    for (source, target) in raw_edges {
        if !frontier.was_visited(&source) || !frontier.was_visited(&target) {
            continue;
        }
        let edge = LinkEdge {
            source: source.as_str().to_string(),
            target: target.as_str().to_string(),
        };
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }

    if pages.is_empty() {
        warn!(seed = %seed, "Crawl produced no pages");
    } else {
        info!(
            seed = %seed,
            visited = frontier.visited_count(),
            admitted = frontier.seen_count(),
            edges = edges.len(),
            "Crawl complete"
        );
    }

    Ok(CrawlOutcome {
        pages,
        edges,
        seed: seed.as_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_visit_same_origin_only() {
        let config = AuditConfig::default();
        let seed = CrawlTarget::parse("https://example.com/").unwrap();

        let inside = CrawlTarget::parse("https://example.com/pricing").unwrap();
        let outside = CrawlTarget::parse("https://other.io/pricing").unwrap();
        let subdomain = CrawlTarget::parse("https://blog.example.com/").unwrap();

        assert!(should_visit(&inside, &seed, &config));
        assert!(!should_visit(&outside, &seed, &config));
        assert!(!should_visit(&subdomain, &seed, &config));
    }

    #[test]
    fn test_should_visit_respects_excluded_patterns() {
        let config = AuditConfig::builder()
            .excluded_patterns(vec!["*/admin/*".to_string()])
            .build()
            .unwrap();
        let seed = CrawlTarget::parse("https://example.com/").unwrap();
        let admin = CrawlTarget::parse("https://example.com/admin/users").unwrap();

        assert!(!should_visit(&admin, &seed, &config));
    }
}
