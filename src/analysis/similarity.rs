//! Near-duplicate detection via shingling and Jaccard similarity
//!
//! Page text is fingerprinted as a set of overlapping 4-word shingles;
//! pairwise Jaccard overlap between fingerprints flags near-duplicates.
//! The comparison is O(P²) over crawled pages, an accepted tradeoff:
//! the frontier cap bounds P to a small constant and keeps the whole stage
//! under a few hundred set intersections.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::extract::PageSignal;
use crate::utils::constants::{MAX_SIMILARITY_RESULTS, SHINGLE_SIZE};

/// Similarity above this is worth reporting at all
pub const REPORT_THRESHOLD: f64 = 60.0;

/// Similarity above this means the pages are effectively the same document
pub const NEAR_IDENTICAL_THRESHOLD: f64 = 90.0;

/// A reportable overlap between two crawled pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResult {
    pub page_a: String,
    pub page_b: String,

    /// Jaccard overlap of the two pages' shingle sets, 0–100
    pub similarity: f64,

    pub recommendation: String,
}

/// Lowercase a text and drop punctuation, keeping word tokens.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Build the set of n-word shingles for a text.
///
/// Returns the empty set when the text has fewer than `n` tokens; otherwise
/// the set holds every window of `n` consecutive tokens, so its size is at
/// most `tokens - n + 1` (less when windows repeat).
#[must_use]
pub fn shingles(text: &str, n: usize) -> HashSet<String> {
    let tokens = tokenize(text);
    if n == 0 || tokens.len() < n {
        return HashSet::new();
    }

    tokens.windows(n).map(|window| window.join(" ")).collect()
}

/// Jaccard similarity between two shingle sets, expressed 0–100.
///
/// Returns 0 when either set is empty.
#[must_use]
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;

    100.0 * intersection as f64 / union as f64
}

fn recommendation_for(similarity: f64) -> String {
    if similarity > NEAR_IDENTICAL_THRESHOLD {
        "Near-identical content. Redirect one page to the other or declare a canonical."
            .to_string()
    } else {
        "Significant overlap. Consolidate these pages into a single stronger page.".to_string()
    }
}

/// Compare every pair of crawled pages and report near-duplicates.
///
/// Results are sorted by similarity descending and truncated to the top 20.
#[must_use]
pub fn find_near_duplicates(pages: &[PageSignal]) -> Vec<SimilarityResult> {
    let fingerprints: Vec<HashSet<String>> = pages
        .iter()
        .map(|page| shingles(&page.text, SHINGLE_SIZE))
        .collect();

    let mut results: Vec<SimilarityResult> = Vec::new();

    for i in 0..pages.len() {
        for j in (i + 1)..pages.len() {
            let similarity = jaccard(&fingerprints[i], &fingerprints[j]);
            if similarity <= REPORT_THRESHOLD {
                continue;
            }

            results.push(SimilarityResult {
                page_a: pages[i].url.clone(),
                page_b: pages[j].url.clone(),
                similarity: (similarity * 10.0).round() / 10.0,
                recommendation: recommendation_for(similarity),
            });
        }
    }

    results.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(MAX_SIMILARITY_RESULTS);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shingle_count_matches_window_count() {
        let text = "one two three four five six";
        let set = shingles(text, 4);
        // 6 distinct tokens -> 3 windows
        assert_eq!(set.len(), 3);
        assert!(set.contains("one two three four"));
        assert!(set.contains("three four five six"));
    }

    #[test]
    fn test_shingles_empty_below_n_tokens() {
        assert!(shingles("one two three", 4).is_empty());
        assert!(shingles("", 4).is_empty());
    }

    #[test]
    fn test_shingles_normalize_case_and_punctuation() {
        let a = shingles("Hello, World! This is FINE.", 4);
        let b = shingles("hello world this is fine", 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_jaccard_identity_and_empty() {
        let a = shingles("alpha beta gamma delta epsilon", 4);
        assert_eq!(jaccard(&a, &a), 100.0);
        assert_eq!(jaccard(&a, &HashSet::new()), 0.0);
        assert_eq!(jaccard(&HashSet::new(), &HashSet::new()), 0.0);
    }

    #[test]
    fn test_jaccard_symmetric() {
        let a = shingles("the quick brown fox jumps over the lazy dog", 4);
        let b = shingles("the quick brown fox sleeps under the old tree", 4);
        assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
    }

    fn page(url: &str, text: &str) -> PageSignal {
        PageSignal {
            url: url.to_string(),
            title: String::new(),
            text: text.to_string(),
            word_count: text.split_whitespace().count(),
            headings: Vec::new(),
            links: Vec::new(),
            image_count: 0,
            images_missing_alt: 0,
            script_count: 0,
            meta_description: None,
        }
    }

    #[test]
    fn test_verbatim_copy_flagged_near_identical() {
        let body = "pricing plans for growing teams start at nine dollars per seat monthly \
                    with unlimited projects and priority support included in every tier";
        let pages = vec![
            page("https://example.com/a", body),
            page("https://example.com/b", body),
            page("https://example.com/c", "entirely different copy about hiring engineers"),
        ];

        let results = find_near_duplicates(&pages);
        assert_eq!(results.len(), 1);
        assert!(results[0].similarity > 90.0);
        assert!(results[0].recommendation.contains("Redirect"));
    }

    #[test]
    fn test_dissimilar_pages_not_reported() {
        let pages = vec![
            page("https://example.com/a", "blue whales migrate across entire ocean basins"),
            page("https://example.com/b", "tax season checklist for small business owners"),
        ];
        assert!(find_near_duplicates(&pages).is_empty());
    }

    #[test]
    fn test_results_sorted_descending() {
        let base = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu";
        let near = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda nu";
        let pages = vec![
            page("https://example.com/a", base),
            page("https://example.com/b", base),
            page("https://example.com/c", near),
        ];

        let results = find_near_duplicates(&pages);
        assert!(results.len() >= 2);
        for pair in results.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }
}
