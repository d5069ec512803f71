//! Fluent builder for `AuditConfig`
//!
//! Validates ranges and pre-compiles exclusion patterns once at config
//! creation time so the crawl hot path never compiles a regex.

use anyhow::{Result, anyhow};
use regex::Regex;

use super::types::AuditConfig;
use crate::utils::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_MAX_PAGES, DEFAULT_NAVIGATION_TIMEOUT_SECS,
};

/// Compile a glob pattern into a regex
///
/// Converts glob patterns (where * matches any sequence) into anchored regex
/// patterns, once, at config creation time.
///
/// # Errors
///
/// Returns an error if the resulting regex pattern is invalid.
fn compile_glob_pattern(pattern: &str) -> Result<Regex> {
    let regex_pattern = pattern.replace('*', ".*");
    let anchored = format!("^{regex_pattern}$");
    Regex::new(&anchored).map_err(|e| anyhow!("Invalid glob pattern '{pattern}': {e}"))
}

#[derive(Debug, Default)]
pub struct AuditConfigBuilder {
    max_pages: Option<usize>,
    navigation_timeout_secs: Option<u64>,
    headless: Option<bool>,
    allow_subdomains: Option<bool>,
    excluded_patterns: Option<Vec<String>>,
    cache_ttl_secs: Option<u64>,
}

impl AuditConfigBuilder {
    /// Set the page cap for crawls (clamped to 1..=100)
    #[must_use]
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages.clamp(1, 100));
        self
    }

    /// Set the navigation timeout in seconds (clamped to 5..=30)
    #[must_use]
    pub fn navigation_timeout_secs(mut self, secs: u64) -> Self {
        self.navigation_timeout_secs = Some(secs.clamp(5, 30));
        self
    }

    /// Run the browser with a visible window (debugging only)
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = Some(headless);
        self
    }

    /// Follow links on subdomains of the seed host
    #[must_use]
    pub fn allow_subdomains(mut self, allow: bool) -> Self {
        self.allow_subdomains = Some(allow);
        self
    }

    /// Exclude URLs matching these glob patterns from crawling
    #[must_use]
    pub fn excluded_patterns(mut self, patterns: Vec<String>) -> Self {
        self.excluded_patterns = Some(patterns);
        self
    }

    /// Set the result-cache TTL in seconds
    #[must_use]
    pub fn cache_ttl_secs(mut self, secs: u64) -> Self {
        self.cache_ttl_secs = Some(secs);
        self
    }

    /// Build the config, compiling exclusion patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if any exclusion pattern fails to compile.
    pub fn build(self) -> Result<AuditConfig> {
        let excluded_patterns_compiled = match &self.excluded_patterns {
            Some(patterns) => patterns
                .iter()
                .map(|p| compile_glob_pattern(p))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(AuditConfig {
            max_pages: self.max_pages.unwrap_or(DEFAULT_MAX_PAGES),
            navigation_timeout_secs: self
                .navigation_timeout_secs
                .unwrap_or(DEFAULT_NAVIGATION_TIMEOUT_SECS),
            headless: self.headless.unwrap_or(true),
            allow_subdomains: self.allow_subdomains.unwrap_or(false),
            excluded_patterns: self.excluded_patterns,
            excluded_patterns_compiled,
            cache_ttl_secs: self.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuditConfigBuilder::default().build().unwrap();
        assert_eq!(config.max_pages(), DEFAULT_MAX_PAGES);
        assert!(config.headless());
        assert!(!config.allow_subdomains());
    }

    #[test]
    fn test_max_pages_clamped() {
        let config = AuditConfigBuilder::default().max_pages(0).build().unwrap();
        assert_eq!(config.max_pages(), 1);

        let config = AuditConfigBuilder::default()
            .max_pages(10_000)
            .build()
            .unwrap();
        assert_eq!(config.max_pages(), 100);
    }

    #[test]
    fn test_excluded_patterns_compile() {
        let config = AuditConfigBuilder::default()
            .excluded_patterns(vec!["*/admin/*".to_string()])
            .build()
            .unwrap();
        assert_eq!(config.excluded_patterns_compiled().len(), 1);
        assert!(
            config.excluded_patterns_compiled()[0].is_match("https://example.com/admin/users")
        );
    }
}
