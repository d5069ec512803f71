//! Entity-frequency gap analysis
//!
//! Ranks the terms a page leans on, then diffs that table against a
//! comparison page to surface what the target under-covers. The analyzer
//! never knows where the comparison counts came from: a live competitor
//! page and a fallback reference table feed the same math.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::utils::constants::MAX_ENTITIES_PER_PAGE;

/// Common words that carry no topical signal, pre-filtered from frequency
/// tables. Only words longer than 4 characters appear here; shorter tokens
/// are dropped by the length rule before the stoplist is consulted.
static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "about", "above", "after", "again", "against", "almost", "along", "already", "although",
        "always", "among", "another", "anything", "around", "because", "become", "before",
        "being", "below", "between", "cannot", "could", "doing", "during", "either", "enough",
        "every", "everything", "first", "found", "further", "getting", "going", "having",
        "however", "include", "including", "itself", "least", "likely", "making", "might",
        "never", "often", "other", "others", "perhaps", "please", "rather", "really", "should",
        "since", "something", "still", "their", "there", "these", "things", "those", "through",
        "together", "under", "until", "using", "where", "whether", "which", "while", "within",
        "without", "would", "yours",
    ])
});

/// One ranked entity from a page's frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCount {
    pub entity: String,
    pub count: usize,
}

/// Urgency tier for a coverage gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPriority {
    High,
    Medium,
    Low,
}

impl GapPriority {
    /// Tier by gap magnitude: above 5 high, above 2 medium, else low.
    #[must_use]
    pub fn from_gap(gap: i64) -> Self {
        match gap.unsigned_abs() {
            magnitude if magnitude > 5 => Self::High,
            magnitude if magnitude > 2 => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// The frequency difference for one entity between target and comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityGap {
    pub entity: String,
    pub target_count: usize,
    pub comparison_count: usize,

    /// `target_count - comparison_count`; negative means under-coverage
    pub gap: i64,

    pub priority: GapPriority,
}

/// Candidate-entity filter: alphabetic, longer than 4 chars, not a stopword.
fn is_candidate(token: &str) -> bool {
    token.len() > 4
        && token.chars().all(|c| c.is_alphabetic())
        && !STOPWORDS.contains(token)
}

/// Count candidate entities in a text and return the top 30.
///
/// Sorted by count descending with an alphabetical tie-break so identical
/// inputs always produce identical tables (the result cache depends on
/// deterministic output).
#[must_use]
pub fn term_frequencies(text: &str) -> Vec<EntityCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for raw in text.to_lowercase().split_whitespace() {
        let token = raw.trim_matches(|c: char| !c.is_alphanumeric());
        if is_candidate(token) {
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }

    let mut table: Vec<EntityCount> = counts
        .into_iter()
        .map(|(entity, count)| EntityCount { entity, count })
        .collect();

    table.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.entity.cmp(&b.entity)));
    table.truncate(MAX_ENTITIES_PER_PAGE);
    table
}

/// Diff a target frequency table against a comparison table.
///
/// Every entity in the comparison table yields a gap; entities the target
/// never mentions produce the most negative gaps and sort first, since they
/// are the most urgent additions.
#[must_use]
pub fn rank_gaps(target: &[EntityCount], comparison: &[EntityCount]) -> Vec<EntityGap> {
    let target_counts: HashMap<&str, usize> = target
        .iter()
        .map(|entry| (entry.entity.as_str(), entry.count))
        .collect();

    let mut gaps: Vec<EntityGap> = comparison
        .iter()
        .map(|entry| {
            let target_count = target_counts.get(entry.entity.as_str()).copied().unwrap_or(0);
            let gap = target_count as i64 - entry.count as i64;
            EntityGap {
                entity: entry.entity.clone(),
                target_count,
                comparison_count: entry.count,
                gap,
                priority: GapPriority::from_gap(gap),
            }
        })
        .collect();

    gaps.sort_by(|a, b| a.gap.cmp(&b.gap).then_with(|| a.entity.cmp(&b.entity)));
    gaps
}

/// Deterministic reference table used when no competitor URL is supplied.
///
/// Seeds the comparison with the keyword's own tokens plus the companion
/// terms a competitive page on any topic tends to cover. Fixed counts keep
/// cached responses stable across identical requests.
#[must_use]
pub fn fallback_reference_counts(keyword: &str) -> Vec<EntityCount> {
    let mut table: Vec<EntityCount> = Vec::new();

    for raw in keyword.to_lowercase().split_whitespace() {
        let token = raw.trim_matches(|c: char| !c.is_alphanumeric());
        if is_candidate(token) {
            table.push(EntityCount {
                entity: token.to_string(),
                count: 12,
            });
        }
    }

    for (entity, count) in [
        ("guide", 9),
        ("features", 8),
        ("benefits", 7),
        ("pricing", 6),
        ("examples", 6),
        ("comparison", 5),
        ("tutorial", 5),
        ("alternatives", 4),
        ("review", 4),
        ("questions", 3),
    ] {
        if !table.iter().any(|entry| entry.entity == entity) {
            table.push(EntityCount {
                entity: entity.to_string(),
                count,
            });
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_frequencies_filters_short_and_stopwords() {
        let table = term_frequencies(
            "Kubernetes cluster management: the cluster runs about fifty kubernetes nodes",
        );

        let entities: Vec<&str> = table.iter().map(|e| e.entity.as_str()).collect();
        assert!(entities.contains(&"kubernetes"));
        assert!(entities.contains(&"cluster"));
        // "about" is stoplisted, "the"/"runs" too short
        assert!(!entities.contains(&"about"));
        assert!(!entities.contains(&"runs"));
    }

    #[test]
    fn test_term_frequencies_deterministic_tie_break() {
        let a = term_frequencies("zebra apple zebra apple mango mango");
        let b = term_frequencies("mango apple zebra mango zebra apple");
        assert_eq!(a, b);
        // Equal counts sort alphabetically
        assert_eq!(a[0].entity, "apple");
    }

    #[test]
    fn test_gap_priorities_match_magnitude_tiers() {
        assert_eq!(GapPriority::from_gap(-8), GapPriority::High);
        assert_eq!(GapPriority::from_gap(-1), GapPriority::Low);
        assert_eq!(GapPriority::from_gap(-3), GapPriority::Medium);
        assert_eq!(GapPriority::from_gap(6), GapPriority::High);
        assert_eq!(GapPriority::from_gap(0), GapPriority::Low);
    }

    #[test]
    fn test_rank_gaps_missing_entities_sort_first() {
        let target = vec![EntityCount {
            entity: "pricing".to_string(),
            count: 3,
        }];
        let comparison = vec![
            EntityCount {
                entity: "pricing".to_string(),
                count: 4,
            },
            EntityCount {
                entity: "integrations".to_string(),
                count: 8,
            },
        ];

        let gaps = rank_gaps(&target, &comparison);
        assert_eq!(gaps[0].entity, "integrations");
        assert_eq!(gaps[0].gap, -8);
        assert_eq!(gaps[0].priority, GapPriority::High);
        assert_eq!(gaps[1].entity, "pricing");
        assert_eq!(gaps[1].gap, -1);
        assert_eq!(gaps[1].priority, GapPriority::Low);
    }

    #[test]
    fn test_fallback_reference_is_deterministic() {
        let a = fallback_reference_counts("project management software");
        let b = fallback_reference_counts("project management software");
        assert_eq!(a, b);
        assert!(a.iter().any(|e| e.entity == "project" && e.count == 12));
        assert!(a.iter().any(|e| e.entity == "pricing"));
    }
}
