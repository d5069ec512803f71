//! End-to-end tests of the scoring pipeline over synthetic crawl results.
//!
//! These exercise everything downstream of the browser: frontier behavior,
//! link-graph assembly, duplicate detection and gap ranking, using page
//! signals built by hand instead of rendered documents.

use sitelens::analysis::{self, EntityCount};
use sitelens::cache::ResultCache;
use sitelens::crawl::{CrawlOutcome, CrawlTarget, Frontier, LinkEdge, LinkGraph};
use sitelens::extract::PageSignal;
use std::time::Duration;

fn signal(url: &str, text: &str) -> PageSignal {
    PageSignal {
        url: url.to_string(),
        title: format!("Title of {url}"),
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

const PAGE_A_TEXT: &str = "our platform helps marketing teams plan content calendars measure \
     campaign performance and collaborate on publishing schedules across \
     every channel the team already uses daily";

#[test]
fn verbatim_copy_across_three_page_site_is_flagged_for_redirect() {
    // Page B is a verbatim copy of page A; page C is unrelated
    let pages = vec![
        signal("https://example.com/", PAGE_A_TEXT),
        signal("https://example.com/copy", PAGE_A_TEXT),
        signal(
            "https://example.com/blog",
            "weekly engineering notes about database migrations and query tuning",
        ),
    ];

    let duplicates = analysis::find_near_duplicates(&pages);

    assert_eq!(duplicates.len(), 1, "only the A/B pair should be reported");
    assert!(duplicates[0].similarity > 90.0);
    assert!(
        duplicates[0].recommendation.contains("Redirect")
            || duplicates[0].recommendation.contains("canonical"),
        "near-identical pages should get the redirect/canonical recommendation"
    );
}

#[test]
fn frontier_visitation_is_deterministic_and_capped() {
    let seed = CrawlTarget::parse("https://example.com/").unwrap();

    let run = || {
        let mut frontier = Frontier::new(seed.clone(), 5);
        // Discovery order as a crawler would see it
        for path in ["/a", "/b", "/c", "/d", "/e", "/f"] {
            frontier.admit(CrawlTarget::parse(&format!("https://example.com{path}")).unwrap());
        }
        let mut order = Vec::new();
        while let Some(next) = frontier.dequeue() {
            frontier.mark_visited(&next);
            order.push(next.as_str().to_string());
        }
        order
    };

    let first = run();
    let second = run();

    assert_eq!(first, second, "identical inputs must visit in the same order");
    assert_eq!(first.len(), 5, "visits never exceed the page cap");
    assert_eq!(first[0], "https://example.com/");
    assert_eq!(first[1], "https://example.com/a");
}

#[test]
fn link_graph_reports_orphans_and_clusters() {
    let a = "https://example.com/";
    let b = "https://example.com/docs";
    let c = "https://example.com/legacy";

    let outcome = CrawlOutcome {
        pages: vec![signal(a, "home"), signal(b, "docs"), signal(c, "old page")],
        edges: vec![
            LinkEdge {
                source: a.to_string(),
                target: b.to_string(),
            },
            LinkEdge {
                source: b.to_string(),
                target: a.to_string(),
            },
        ],
        seed: a.to_string(),
    };

    let graph = LinkGraph::build(&outcome);

    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.links.len(), 2);
    assert_eq!(graph.orphans, vec![c.to_string()]);
    assert_eq!(graph.clusters, 2);

    // Every reported edge endpoint is a crawled node
    for edge in &graph.links {
        assert!(graph.nodes.iter().any(|n| n.url == edge.source));
        assert!(graph.nodes.iter().any(|n| n.url == edge.target));
    }
}

#[test]
fn gap_ranking_surfaces_missing_entities_first() {
    let target_text = "pricing pricing pricing plans for small teams";
    let competitor_text = "pricing pricing pricing pricing integrations integrations \
         integrations integrations integrations integrations integrations integrations";

    let target = analysis::term_frequencies(target_text);
    let competitor = analysis::term_frequencies(competitor_text);
    let gaps = analysis::rank_gaps(&target, &competitor);

    assert_eq!(gaps[0].entity, "integrations");
    assert_eq!(gaps[0].target_count, 0);
    assert_eq!(gaps[0].comparison_count, 8);
    assert_eq!(gaps[0].gap, -8);
    assert_eq!(format!("{:?}", gaps[0].priority), "High");
}

#[test]
fn reference_comparison_feeds_the_same_gap_math() {
    // The analyzer must not care whether counts came from a live page
    let target = analysis::term_frequencies("short landing page about widgets");
    let reference: Vec<EntityCount> = analysis::fallback_reference_counts("widget analytics");

    let gaps = analysis::rank_gaps(&target, &reference);
    assert_eq!(gaps.len(), reference.len());
    assert!(gaps.iter().all(|g| g.gap <= 0));
}

#[test]
fn cache_collapses_equivalent_requests_and_expires() {
    let cache = ResultCache::new(Duration::from_millis(40));

    let key_a = ResultCache::key("duplicate-finder", &["  https://Example.com/  "]);
    let key_b = ResultCache::key("duplicate-finder", &["https://example.com/"]);
    assert_eq!(key_a, key_b);

    cache.insert(key_a.clone(), serde_json::json!({"scannedCount": 2}));
    assert!(cache.get(&key_b).is_some());

    std::thread::sleep(Duration::from_millis(60));
    assert!(cache.get(&key_a).is_none(), "entry must expire after TTL");
}
