//! Lightweight meta-tag audit over plain HTTP
//!
//! The one tool that skips the browser entirely: fetches raw HTML with a
//! bounded timeout and inspects head tags. Cheap enough to run on every
//! save in an editor integration, which is why it avoids the render path.

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parsed head-tag snapshot of a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: Option<String>,
    pub robots: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
}

/// One actionable meta finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaFinding {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Fetch a page over plain HTTP and return its raw HTML.
pub async fn fetch_html(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .context("Request failed")?
        .error_for_status()
        .context("Server returned an error status")?;

    response.text().await.context("Failed to read response body")
}

fn select_content<'a>(document: &'a Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse head tags out of raw HTML.
///
/// # Errors
///
/// Returns an error only when a selector fails to compile, which would be a
/// programming mistake rather than bad input HTML; scraper parses any
/// document leniently.
pub fn parse_meta(html: &str) -> Result<PageMeta> {
    let document = Html::parse_document(html);

    let title_sel = Selector::parse("title").map_err(|e| anyhow::anyhow!("{e}"))?;
    let desc_sel = Selector::parse(r#"meta[name="description"]"#)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let canonical_sel =
        Selector::parse(r#"link[rel="canonical"]"#).map_err(|e| anyhow::anyhow!("{e}"))?;
    let robots_sel =
        Selector::parse(r#"meta[name="robots"]"#).map_err(|e| anyhow::anyhow!("{e}"))?;
    let og_title_sel =
        Selector::parse(r#"meta[property="og:title"]"#).map_err(|e| anyhow::anyhow!("{e}"))?;
    let og_desc_sel = Selector::parse(r#"meta[property="og:description"]"#)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let og_image_sel =
        Selector::parse(r#"meta[property="og:image"]"#).map_err(|e| anyhow::anyhow!("{e}"))?;

    let title = document
        .select(&title_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty());

    let canonical = document
        .select(&canonical_sel)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(PageMeta {
        title,
        description: select_content(&document, &desc_sel),
        canonical,
        robots: select_content(&document, &robots_sel),
        og_title: select_content(&document, &og_title_sel),
        og_description: select_content(&document, &og_desc_sel),
        og_image: select_content(&document, &og_image_sel),
    })
}

/// Derive findings from a meta snapshot.
#[must_use]
pub fn audit_meta(meta: &PageMeta) -> Vec<MetaFinding> {
    let mut findings = Vec::new();

    match &meta.title {
        None => findings.push(MetaFinding {
            severity: Severity::Error,
            message: "Page has no <title> tag".to_string(),
        }),
        Some(title) if title.chars().count() > 60 => findings.push(MetaFinding {
            severity: Severity::Warning,
            message: format!(
                "Title is {} characters; search results truncate around 60",
                title.chars().count()
            ),
        }),
        Some(title) if title.chars().count() < 10 => findings.push(MetaFinding {
            severity: Severity::Warning,
            message: "Title is under 10 characters".to_string(),
        }),
        Some(_) => {}
    }

    match &meta.description {
        None => findings.push(MetaFinding {
            severity: Severity::Error,
            message: "Page has no meta description".to_string(),
        }),
        Some(desc) if desc.chars().count() > 160 => findings.push(MetaFinding {
            severity: Severity::Warning,
            message: format!(
                "Meta description is {} characters; snippets truncate around 160",
                desc.chars().count()
            ),
        }),
        Some(desc) if desc.chars().count() < 50 => findings.push(MetaFinding {
            severity: Severity::Warning,
            message: "Meta description is under 50 characters".to_string(),
        }),
        Some(_) => {}
    }

    if meta.canonical.is_none() {
        findings.push(MetaFinding {
            severity: Severity::Warning,
            message: "No canonical link declared".to_string(),
        });
    }

    if meta.og_title.is_none() || meta.og_description.is_none() || meta.og_image.is_none() {
        findings.push(MetaFinding {
            severity: Severity::Warning,
            message: "Open Graph tags incomplete (og:title, og:description, og:image)"
                .to_string(),
        });
    }

    findings
}
