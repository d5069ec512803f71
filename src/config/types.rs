//! Core configuration types for audit crawls
//!
//! This module contains the main `AuditConfig` struct that defines the
//! parameters shared by all crawl-backed audit tools.

use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_MAX_PAGES, DEFAULT_NAVIGATION_TIMEOUT_SECS,
};

/// Main configuration struct for audit crawls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Hard cap on URLs ever admitted to a crawl frontier.
    ///
    /// **INVARIANT:** enforced strictly at admit time; a crawl can never
    /// visit more pages than this, and a failed page does not free a slot.
    pub(crate) max_pages: usize,

    /// Timeout in seconds for `page.goto()` and the subsequent load wait
    ///
    /// Prevents hangs on slow DNS, unresponsive servers, or streaming
    /// content. A timed-out navigation skips the page.
    pub(crate) navigation_timeout_secs: u64,

    /// Whether to run the browser headless (disabled only for debugging)
    pub(crate) headless: bool,

    /// Allow following links on subdomains of the seed host
    pub(crate) allow_subdomains: bool,

    /// URL substring/regex patterns to exclude from crawling
    pub(crate) excluded_patterns: Option<Vec<String>>,

    /// Compiled regex patterns from `excluded_patterns`
    /// Pre-compiled at config creation to avoid hot-path regex compilation
    #[serde(skip)]
    pub(crate) excluded_patterns_compiled: Vec<regex::Regex>,

    /// Result cache TTL in seconds
    pub(crate) cache_ttl_secs: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            navigation_timeout_secs: DEFAULT_NAVIGATION_TIMEOUT_SECS,
            headless: true,
            allow_subdomains: false,
            excluded_patterns: None,
            excluded_patterns_compiled: Vec::new(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl AuditConfig {
    /// Create a builder for constructing a validated config
    #[must_use]
    pub fn builder() -> super::AuditConfigBuilder {
        super::AuditConfigBuilder::default()
    }
}
