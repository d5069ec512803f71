//! URL classification helpers used by link discovery.

use url::Url;

/// File extensions that never yield a renderable HTML document.
///
/// Links to these are dropped during discovery so the crawler spends its
/// page budget on documents that can actually be compared.
const BINARY_ASSET_EXTENSIONS: &[&str] = &[
    ".pdf", ".zip", ".gz", ".tar", ".rar", ".7z", ".exe", ".dmg", ".pkg", ".jpg", ".jpeg", ".png",
    ".gif", ".webp", ".svg", ".ico", ".mp3", ".mp4", ".webm", ".avi", ".mov", ".wav", ".doc",
    ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".css", ".js", ".json", ".xml", ".rss", ".woff",
    ".woff2", ".ttf", ".eot",
];

/// Check if a URL is a crawlable http(s) document URL.
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:")
        || url.starts_with("javascript:")
        || url.starts_with("mailto:")
        || url.starts_with("tel:")
    {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
        }
        Err(_) => false,
    }
}

/// Check if a URL points at a binary asset rather than a page.
#[must_use]
pub fn is_binary_asset(url: &str) -> bool {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_ascii_lowercase(),
        Err(_) => return false,
    };

    BINARY_ASSET_EXTENSIONS
        .iter()
        .any(|ext| path.ends_with(ext))
}

/// Check if a href is a fragment-only self link ("#section").
#[must_use]
pub fn is_fragment_only(href: &str) -> bool {
    href.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_http_urls() {
        assert!(is_valid_url("https://example.com/page"));
        assert!(is_valid_url("http://example.com"));
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        assert!(!is_valid_url("javascript:void(0)"));
        assert!(!is_valid_url("mailto:team@example.com"));
        assert!(!is_valid_url("data:text/html,hello"));
        assert!(!is_valid_url("ftp://example.com/file"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_binary_asset_detection() {
        assert!(is_binary_asset("https://example.com/report.pdf"));
        assert!(is_binary_asset("https://example.com/logo.PNG"));
        assert!(is_binary_asset("https://example.com/app.js?v=3"));
        assert!(!is_binary_asset("https://example.com/pricing"));
        assert!(!is_binary_asset("https://example.com/blog/post.html"));
    }

    #[test]
    fn test_fragment_only() {
        assert!(is_fragment_only("#top"));
        assert!(!is_fragment_only("https://example.com/#top"));
    }
}
