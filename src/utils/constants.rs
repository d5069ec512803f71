//! Shared configuration constants for sitelens
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Default page cap for a single crawl: 25 pages
///
/// Bounds the frontier so one audit request never walks an entire site.
/// Together with the pairwise similarity comparison this keeps the O(P²)
/// scoring stage at a few hundred pairs at most.
pub const DEFAULT_MAX_PAGES: usize = 25;

/// Default navigation timeout: 20 seconds
///
/// Applied to `page.goto()` and the subsequent load wait. A page that cannot
/// produce a document in this window is skipped, not retried.
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 20;

/// Default result-cache TTL: 1 hour
///
/// Identical audit requests within this window are served from the in-memory
/// cache instead of re-crawling the target site.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Shingle width used for near-duplicate fingerprinting
///
/// Four-word windows are long enough that shared boilerplate phrases rarely
/// collide, short enough that rewordings still overlap.
pub const SHINGLE_SIZE: usize = 4;

/// Maximum similarity pairs returned per duplicate scan
pub const MAX_SIMILARITY_RESULTS: usize = 20;

/// Maximum ranked entities returned per frequency table
pub const MAX_ENTITIES_PER_PAGE: usize = 30;

/// Chrome user agent string presented by the rendering browser
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
/// Next update: 2025-04-29 (quarterly schedule)
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
