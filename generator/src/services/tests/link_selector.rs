//! Tests for the LinkSelector service

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::services::link_selector::LinkSelector;
use shared::LinkIndex;

fn index() -> LinkIndex {
    let mut index = LinkIndex::new();
    index.insert(
        "codes".to_string(),
        vec![
            "/codes/new-codes/".to_string(),
            "/codes/working-codes/".to_string(),
            "/codes/expired-codes/".to_string(),
        ],
    );
    index.insert(
        "guides".to_string(),
        vec![
            "/guides/beginner-guide/".to_string(),
            "/guides/level-up-fast/".to_string(),
        ],
    );
    index.insert(
        "tier-list".to_string(),
        vec!["/tier-list/best-weapons/".to_string()],
    );
    index
}

fn selector() -> LinkSelector {
    LinkSelector::new(index(), "https://example.org")
}

#[test]
fn test_never_selects_self_and_never_exceeds_count() {
    let selector = selector();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let links = selector.select_links(&mut rng, "/codes/new-codes/", 2, true);
        assert!(links.len() <= 2);
        assert!(!links.contains(&"/codes/new-codes/".to_string()));
    }
}

#[test]
fn test_same_category_preferred_when_enough_links() {
    let selector = selector();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let links = selector.select_links(&mut rng, "/codes/new-codes/", 2, true);
        assert_eq!(links.len(), 2);
        for link in &links {
            assert!(link.starts_with("/codes/"), "expected codes link, got {link}");
        }
        // Distinct entries
        assert_ne!(links[0], links[1]);
    }
}

#[test]
fn test_falls_back_to_other_categories() {
    let selector = selector();
    // tier-list has no other links besides the target itself
    let mut rng = StdRng::seed_from_u64(3);
    let links = selector.select_links(&mut rng, "/tier-list/best-weapons/", 2, true);
    assert_eq!(links.len(), 2);
    assert!(!links.contains(&"/tier-list/best-weapons/".to_string()));
    for link in &links {
        assert!(!link.starts_with("/tier-list/"));
    }
}

#[test]
fn test_tops_up_from_other_categories_when_pool_short() {
    let selector = selector();
    // guides has only one other link; the second must come from elsewhere
    let mut rng = StdRng::seed_from_u64(9);
    let links = selector.select_links(&mut rng, "/guides/beginner-guide/", 2, true);
    assert_eq!(links.len(), 2);
    assert!(links.contains(&"/guides/level-up-fast/".to_string()));
}

#[test]
fn test_short_result_when_fewer_links_exist() {
    let mut small = LinkIndex::new();
    small.insert("codes".to_string(), vec!["/codes/only/".to_string()]);
    let selector = LinkSelector::new(small, "https://example.org");

    let mut rng = StdRng::seed_from_u64(1);
    let links = selector.select_links(&mut rng, "/codes/other/", 5, true);
    assert_eq!(links, vec!["/codes/only/".to_string()]);
}

#[test]
fn test_empty_index_yields_empty_output() {
    let selector = LinkSelector::new(LinkIndex::new(), "https://example.org");
    let mut rng = StdRng::seed_from_u64(1);
    assert!(selector
        .select_links(&mut rng, "/codes/anything/", 2, true)
        .is_empty());
    assert_eq!(selector.format_for_prompt(&[]), "");
}

#[test]
fn test_unknown_category_defaults_to_fallback_pool() {
    let selector = selector();
    let mut rng = StdRng::seed_from_u64(4);
    let links = selector.select_links(&mut rng, "/news/latest-update/", 2, true);
    assert_eq!(links.len(), 2);
}

#[test]
fn test_randomized_subsets_vary_across_seeds() {
    let selector = selector();
    let mut seen = std::collections::HashSet::new();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut links = selector.select_links(&mut rng, "/guides/level-up-fast/", 2, true);
        links.sort();
        seen.insert(links);
    }
    assert!(seen.len() > 1, "sampling should vary with the seed");
}

#[test]
fn test_derived_titles_are_title_cased() {
    let selector = selector();
    let links = vec![
        "/guides/FAQ-page/".to_string(),
        "/codes/NEW-codes/".to_string(),
    ];
    assert_eq!(
        selector.format_for_prompt(&links),
        "- [Faq Page](https://example.org/guides/FAQ-page/)\n\
         - [New Codes](https://example.org/codes/NEW-codes/)"
    );
}

#[test]
fn test_format_for_prompt_bullets() {
    let selector = selector();
    let links = vec![
        "/codes/new-codes/".to_string(),
        "/guides/level-up-fast/".to_string(),
    ];
    let formatted = selector.format_for_prompt(&links);
    assert_eq!(
        formatted,
        "- [New Codes](https://example.org/codes/new-codes/)\n\
         - [Level Up Fast](https://example.org/guides/level-up-fast/)"
    );
}
