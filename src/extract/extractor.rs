//! Fetch/render extraction
//!
//! Navigates a page object to a target URL and pulls a [`PageSignal`] out of
//! the rendered document. Every await here is time-boxed; a page that fails
//! to navigate or evaluate is reported as `None` and the caller moves on;
//! single-page failures never abort a crawl.

use anyhow::{Context, Result};
use chromiumoxide::Page;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use super::js_scripts::PAGE_SIGNAL_SCRIPT;
use super::schema::{PageSignal, RenderOptions};
use crate::crawl::CrawlTarget;

/// Wrap an async page operation with an explicit timeout
///
/// Prevents indefinite hangs on navigation or evaluation. The error message
/// distinguishes a timeout from an operation failure.
async fn with_page_timeout<F, T>(operation: F, timeout_secs: u64, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(Duration::from_secs(timeout_secs), operation).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!(
            "{operation_name} timeout after {timeout_secs} seconds"
        )),
    }
}

/// Navigate to `target` and extract its page signal.
///
/// Returns `None` on any per-page failure (navigation timeout, DNS, HTTP
/// error page, evaluation failure); the failure is logged here so callers
/// can treat a `None` as "skip and continue".
pub async fn render(page: &Page, target: &CrawlTarget, options: RenderOptions) -> Option<PageSignal> {
    match render_inner(page, target, options).await {
        Ok(signal) => {
            debug!(
                url = %target,
                words = signal.word_count,
                links = signal.links.len(),
                "Extracted page signal"
            );
            Some(signal)
        }
        Err(e) => {
            warn!(url = %target, error = %e, "Skipping page after render failure");
            None
        }
    }
}

async fn render_inner(
    page: &Page,
    target: &CrawlTarget,
    options: RenderOptions,
) -> Result<PageSignal> {
    let timeout_secs = options.navigation_timeout_secs;

    with_page_timeout(
        async {
            page.goto(target.as_str())
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))
        },
        timeout_secs,
        "Page navigation",
    )
    .await?;

    with_page_timeout(
        async {
            page.wait_for_navigation()
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))
        },
        timeout_secs,
        "Page load",
    )
    .await?;

    let js_result = with_page_timeout(
        async {
            page.evaluate(PAGE_SIGNAL_SCRIPT)
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))
        },
        timeout_secs,
        "Signal extraction",
    )
    .await?;

    let value = js_result
        .into_value::<serde_json::Value>()
        .map_err(|e| anyhow::anyhow!("Failed to get value from JS result: {e}"))?;

    let mut signal: PageSignal =
        serde_json::from_value(value).context("Failed to parse page signal from JS result")?;

    // Re-validate hrefs on the Rust side; the in-page filter is advisory
    signal.links.retain(|link| {
        crate::utils::is_valid_url(&link.href) && !crate::utils::is_binary_asset(&link.href)
    });

    Ok(signal)
}
