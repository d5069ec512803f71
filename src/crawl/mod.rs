//! Crawl Engine Module
//!
//! Bounded breadth-first crawling: normalized targets, the capped frontier,
//! the sequential crawl loop and link-graph assembly.

pub mod crawler;
pub mod frontier;
pub mod link_graph;
pub mod target;

pub use crawler::{CrawlOutcome, LinkEdge, crawl_site, should_visit};
pub use frontier::Frontier;
pub use link_graph::{GraphNode, LinkGraph};
pub use target::CrawlTarget;
