//! Internal link-graph construction
//!
//! Builds the authority view of a crawl: per-page in/out degree, the edge
//! list, orphaned pages and the number of connected clusters. Only pages
//! that actually rendered participate; the crawler has already filtered
//! edges to visited endpoints.

use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::crawler::{CrawlOutcome, LinkEdge};

/// One page in the link graph with its degree counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub url: String,
    pub title: String,
    pub inbound: usize,
    pub outbound: usize,
}

/// The assembled link graph for an authority audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<LinkEdge>,

    /// Pages (other than the seed) no crawled page links to
    pub orphans: Vec<String>,

    /// Connected components over the undirected view of the graph
    pub clusters: usize,
}

impl LinkGraph {
    /// Build the graph from a finished crawl.
    #[must_use]
    pub fn build(outcome: &CrawlOutcome) -> Self {
        let index: HashMap<&str, usize> = outcome
            .pages
            .iter()
            .enumerate()
            .map(|(i, page)| (page.url.as_str(), i))
            .collect();

        let mut inbound = vec![0usize; outcome.pages.len()];
        let mut outbound = vec![0usize; outcome.pages.len()];
        let mut union_find: UnionFind<usize> = UnionFind::new(outcome.pages.len());

        for edge in &outcome.edges {
            let (Some(&src), Some(&dst)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) else {
                continue;
            };
            outbound[src] += 1;
            inbound[dst] += 1;
            union_find.union(src, dst);
        }

        let nodes: Vec<GraphNode> = outcome
            .pages
            .iter()
            .enumerate()
            .map(|(i, page)| GraphNode {
                url: page.url.clone(),
                title: page.title.clone(),
                inbound: inbound[i],
                outbound: outbound[i],
            })
            .collect();

        // The seed is the entry point; lacking inbound links is its nature,
        // not an audit finding
        let orphans: Vec<String> = nodes
            .iter()
            .filter(|node| node.inbound == 0 && node.url != outcome.seed)
            .map(|node| node.url.clone())
            .collect();

        let clusters = if outcome.pages.is_empty() {
            0
        } else {
            let roots: HashSet<usize> = (0..outcome.pages.len())
                .map(|i| union_find.find(i))
                .collect();
            roots.len()
        };

        log::debug!(
            "Link graph assembled: {} nodes, {} edges, {} orphans, {} clusters",
            nodes.len(),
            outcome.edges.len(),
            orphans.len(),
            clusters
        );

        Self {
            nodes,
            links: outcome.edges.clone(),
            orphans,
            clusters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PageSignal;

    fn page(url: &str) -> PageSignal {
        PageSignal {
            url: url.to_string(),
            title: url.to_string(),
            text: String::new(),
            word_count: 0,
            headings: Vec::new(),
            links: Vec::new(),
            image_count: 0,
            images_missing_alt: 0,
            script_count: 0,
            meta_description: None,
        }
    }

    fn edge(source: &str, target: &str) -> LinkEdge {
        LinkEdge {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    fn outcome(pages: Vec<PageSignal>, edges: Vec<LinkEdge>, seed: &str) -> CrawlOutcome {
        CrawlOutcome {
            pages,
            edges,
            seed: seed.to_string(),
        }
    }

    #[test]
    fn test_degrees_and_orphans() {
        let a = "https://example.com/";
        let b = "https://example.com/b";
        let c = "https://example.com/c";

        let graph = LinkGraph::build(&outcome(
            vec![page(a), page(b), page(c)],
            vec![edge(a, b)],
            a,
        ));

        assert_eq!(graph.nodes[0].outbound, 1);
        assert_eq!(graph.nodes[1].inbound, 1);
        // c has no inbound link and is not the seed
        assert_eq!(graph.orphans, vec![c.to_string()]);
        // {a, b} form one cluster, c its own
        assert_eq!(graph.clusters, 2);
    }

    #[test]
    fn test_seed_is_never_orphaned() {
        let a = "https://example.com/";
        let graph = LinkGraph::build(&outcome(vec![page(a)], vec![], a));
        assert!(graph.orphans.is_empty());
        assert_eq!(graph.clusters, 1);
    }

    #[test]
    fn test_empty_crawl() {
        let graph = LinkGraph::build(&outcome(vec![], vec![], "https://example.com/"));
        assert_eq!(graph.clusters, 0);
        assert!(graph.nodes.is_empty());
    }
}
