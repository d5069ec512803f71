//! Content comparison analytics
//!
//! Shingle/Jaccard near-duplicate scoring and entity-frequency gap ranking.

pub mod entity_gap;
pub mod similarity;

pub use entity_gap::{
    EntityCount, EntityGap, GapPriority, fallback_reference_counts, rank_gaps, term_frequencies,
};
pub use similarity::{SimilarityResult, find_near_duplicates, jaccard, shingles};
