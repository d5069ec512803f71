//! Audit configuration
//!
//! Configuration for crawl-based audit tools: page caps, navigation
//! timeouts, origin rules and cache TTL.

mod builder;
mod getters;
mod types;

pub use builder::AuditConfigBuilder;
pub use types::AuditConfig;
