use anyhow::{Context, Result};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use url::Url;

/// An immutable, cheaply-cloneable crawl target.
///
/// `CrawlTarget` normalizes its input once at construction (input trimmed,
/// fragment stripped, scheme and host lowercased by URL parsing) and shares
/// the parsed `Url` via `Arc`. Two targets that differ only by surrounding
/// whitespace, casing of the host, or a fragment anchor compare equal, which
/// is what frontier deduplication and cache keying rely on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrawlTarget {
    url_str: String,
    url: Arc<Url>,
}

impl CrawlTarget {
    /// Parse and normalize a target URL.
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, unparseable URLs, and non-http(s)
    /// schemes.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            anyhow::bail!("URL must not be empty");
        }

        let mut parsed = Url::parse(trimmed).context("Failed to parse URL")?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("Unsupported URL scheme: {}", parsed.scheme());
        }

        // Fragment anchors address the same HTTP resource
        parsed.set_fragment(None);

        let url_str = parsed.as_str().to_string();
        Ok(Self {
            url_str,
            url: Arc::new(parsed),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url_str
    }

    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// The scheme+host[+port] prefix this target belongs to.
    ///
    /// Used for same-origin link filtering during discovery.
    #[must_use]
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// Resolve a href found on this page against this target.
    ///
    /// Relative hrefs resolve against the page URL; absolute hrefs parse as
    /// themselves. The result is normalized like any other target.
    pub fn join(&self, href: &str) -> Result<Self> {
        let resolved = self.url.join(href).context("Failed to resolve href")?;
        Self::parse(resolved.as_str())
    }

    /// Whether `other` belongs to this target's origin.
    ///
    /// With `allow_subdomains`, `docs.example.com` counts as inside
    /// `example.com`.
    #[must_use]
    pub fn same_origin(&self, other: &CrawlTarget, allow_subdomains: bool) -> bool {
        if self.url.scheme() != other.url.scheme() {
            return false;
        }
        match (self.host(), other.host()) {
            (Some(own), Some(theirs)) => {
                own == theirs || (allow_subdomains && theirs.ends_with(&format!(".{own}")))
            }
            _ => false,
        }
    }
}

impl fmt::Display for CrawlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url_str)
    }
}

impl Hash for CrawlTarget {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url_str.hash(state);
    }
}

impl std::str::FromStr for CrawlTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for CrawlTarget {
    fn as_ref(&self) -> &str {
        &self.url_str
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_fragment() {
        let target = CrawlTarget::parse("https://example.com/page#section").unwrap();
        assert_eq!(target.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_parse_trims_and_lowercases_host() {
        let a = CrawlTarget::parse("  https://Example.COM/Page  ").unwrap();
        let b = CrawlTarget::parse("https://example.com/Page").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.host(), Some("example.com"));
    }

    #[test]
    fn test_rejects_non_http() {
        assert!(CrawlTarget::parse("ftp://example.com").is_err());
        assert!(CrawlTarget::parse("   ").is_err());
    }

    #[test]
    fn test_origin() {
        let target = CrawlTarget::parse("https://example.com:8443/a/b").unwrap();
        assert_eq!(target.origin(), "https://example.com:8443");
    }

    #[test]
    fn test_join_relative() {
        let target = CrawlTarget::parse("https://example.com/blog/post").unwrap();
        let joined = target.join("/pricing").unwrap();
        assert_eq!(joined.as_str(), "https://example.com/pricing");
    }

    #[test]
    fn test_same_origin() {
        let a = CrawlTarget::parse("https://example.com/a").unwrap();
        let b = CrawlTarget::parse("https://example.com/b").unwrap();
        let sub = CrawlTarget::parse("https://docs.example.com/").unwrap();
        let other = CrawlTarget::parse("https://elsewhere.net/").unwrap();

        assert!(a.same_origin(&b, false));
        assert!(!a.same_origin(&sub, false));
        assert!(a.same_origin(&sub, true));
        assert!(!a.same_origin(&other, true));
    }

    #[test]
    fn test_clone_is_cheap() {
        let a = CrawlTarget::parse("https://example.com").unwrap();
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.url, &b.url));
    }
}
