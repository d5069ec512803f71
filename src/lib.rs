pub mod analysis;
pub mod browser;
pub mod cache;
pub mod config;
pub mod crawl;
pub mod extract;
pub mod server;
pub mod utils;

pub use analysis::{EntityCount, EntityGap, GapPriority, SimilarityResult};
pub use browser::{BrowserHandle, BrowserProvider, LaunchError};
pub use cache::ResultCache;
pub use config::{AuditConfig, AuditConfigBuilder};
pub use crawl::{CrawlOutcome, CrawlTarget, Frontier, LinkEdge, LinkGraph, crawl_site};
pub use extract::{PageSignal, RenderOptions};
pub use server::{AppState, AuditError, router};
