//! Read accessors for `AuditConfig`
//!
//! Fields stay private to the config module so every consumer goes through
//! these getters and defaults remain centralized.

use super::types::AuditConfig;

impl AuditConfig {
    /// Hard cap on URLs admitted to one crawl frontier
    #[must_use]
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Timeout applied to each navigation, in seconds
    #[must_use]
    pub fn navigation_timeout_secs(&self) -> u64 {
        self.navigation_timeout_secs
    }

    /// Whether the browser runs headless
    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    /// Whether subdomain links count as same-origin for crawling
    #[must_use]
    pub fn allow_subdomains(&self) -> bool {
        self.allow_subdomains
    }

    /// Raw exclusion patterns, if configured
    #[must_use]
    pub fn excluded_patterns(&self) -> Option<&Vec<String>> {
        self.excluded_patterns.as_ref()
    }

    /// Pre-compiled exclusion patterns
    ///
    /// Compiled once at config creation to avoid hot-path regex compilation.
    #[must_use]
    pub fn excluded_patterns_compiled(&self) -> &[regex::Regex] {
        &self.excluded_patterns_compiled
    }

    /// Result-cache TTL in seconds
    #[must_use]
    pub fn cache_ttl_secs(&self) -> u64 {
        self.cache_ttl_secs
    }
}
