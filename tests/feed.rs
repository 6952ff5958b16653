//! Feed controller tests: pagination, filtering, dedup and the loading guard

mod common;

use std::collections::BTreeSet;

use basho::feed::{FeedController, FeedStatus, FetchError, PageRequestKind, PageSource};
use common::{ids, post, posts, tags, FakeBackend};

// ========================================================================
// Filtering
// ========================================================================

#[test]
fn test_filter_nature_shows_four_of_ten() {
    let mut all = posts(1..=4, &["nature"]);
    all.extend(posts(5..=10, &["city"]));
    let source = FakeBackend::new(all.clone());
    let mut feed = FeedController::new(all, 10);

    feed.set_filters_from(tags(&["nature"]), &source);

    assert_eq!(feed.visible_items().len(), 4);
    assert_eq!(ids(&feed.visible_items()), vec![1, 2, 3, 4]);
    // The refetch returned a full page, so more may exist
    assert!(feed.has_more());
    assert_eq!(feed.status(), FeedStatus::Idle);
}

#[test]
fn test_filter_requires_every_selected_tag() {
    let all = vec![
        post(1, &["nature", "winter"]),
        post(2, &["nature"]),
        post(3, &["winter"]),
    ];
    let source = FakeBackend::new(all.clone());
    let mut feed = FeedController::new(all, 10);

    feed.set_filters_from(tags(&["nature", "winter"]), &source);
    assert_eq!(ids(&feed.visible_items()), vec![1]);
}

#[test]
fn test_clearing_filters_restores_seed_page_without_fetch() {
    let seed = posts(1..=10, &["nature"]);
    let source = FakeBackend::new(posts(1..=30, &["nature"]));
    let mut feed = FeedController::new(seed, 10);

    feed.load_more_from(&source);
    feed.load_more_from(&source);
    assert_eq!(feed.items().len(), 30);
    let calls = source.calls();

    assert!(feed.set_filters(BTreeSet::new()).is_none());
    assert_eq!(source.calls(), calls);
    assert_eq!(feed.items().len(), 10);
    assert_eq!(feed.page_cursor(), 1);
    assert!(feed.has_more());
    assert_eq!(feed.status(), FeedStatus::Idle);
}

#[test]
fn test_refilter_is_sized_to_loaded_extent() {
    let source = FakeBackend::new(posts(1..=40, &["nature"]));
    let mut feed = FeedController::new(posts(1..=10, &["nature"]), 10);
    feed.load_more_from(&source);
    feed.load_more_from(&source);

    let request = feed.set_filters(tags(&["nature"])).unwrap();
    assert_eq!(request.kind, PageRequestKind::Refilter);
    assert_eq!(request.offset, 0);
    assert_eq!(request.limit, 30);
    assert!(feed.items().is_empty());

    let result = source.fetch_page(request.offset, request.limit, &request.tags);
    assert!(feed.page_loaded(&request, result));
    assert_eq!(feed.items().len(), 30);

    // Next load continues after the refetched extent
    let next = feed.load_more().unwrap();
    assert_eq!(next.offset, 30);
}

#[test]
fn test_short_refilter_exhausts() {
    let source = FakeBackend::new(posts(1..=6, &["nature"]));
    let mut feed = FeedController::new(posts(1..=6, &["nature"]), 10);

    feed.set_filters_from(tags(&["nature"]), &source);
    assert!(!feed.has_more());
    assert!(feed.load_more().is_none());
}

// ========================================================================
// Pagination
// ========================================================================

#[test]
fn test_overlapping_pages_are_deduplicated() {
    let source = FakeBackend::new(posts(1..=25, &[])).with_overlap(3);
    let mut feed = FeedController::new(posts(1..=10, &[]), 10);

    feed.load_more_from(&source);
    feed.load_more_from(&source);

    let held: Vec<i64> = feed.items().iter().map(|p| p.id).collect();
    let unique: BTreeSet<i64> = held.iter().copied().collect();
    assert_eq!(held.len(), unique.len());
    assert_eq!(unique, (1..=25).collect());
}

#[test]
fn test_exhaustion_sticks_until_filters_change() {
    let source = FakeBackend::new(posts(1..=15, &["nature"]));
    let mut feed = FeedController::new(posts(1..=10, &["nature"]), 10);

    assert!(feed.load_more_from(&source));
    assert_eq!(feed.status(), FeedStatus::Exhausted);
    assert!(!feed.load_more_from(&source));
    assert!(feed.on_visibility(true).is_none());

    feed.set_filters(BTreeSet::new());
    assert!(feed.has_more());
}

#[test]
fn test_failure_keeps_items_and_allows_retry() {
    let source = FakeBackend::new(posts(1..=20, &[]));
    let mut feed = FeedController::new(posts(1..=10, &[]), 10);

    source.fail_next(1);
    assert!(feed.load_more_from(&source));
    assert_eq!(feed.status(), FeedStatus::Error);
    assert!(matches!(feed.last_error(), Some(FetchError::Network(_))));
    assert_eq!(feed.items().len(), 10);
    assert!(feed.has_more());
    assert_eq!(feed.page_cursor(), 1);

    assert!(feed.load_more_from(&source));
    assert_eq!(feed.items().len(), 20);
    assert!(feed.last_error().is_none());
}

#[test]
fn test_failed_refilter_retries_from_first_page() {
    let source = FakeBackend::new(posts(1..=30, &["nature"]));
    let mut feed = FeedController::new(posts(1..=10, &["nature"]), 10);
    assert!(feed.load_more_from(&source));
    assert_eq!(feed.items().len(), 20);

    source.fail_next(1);
    feed.set_filters_from(tags(&["nature"]), &source);
    assert_eq!(feed.status(), FeedStatus::Error);
    assert!(feed.has_more());

    assert!(feed.load_more_from(&source));
    assert_eq!(ids(&feed.visible_items()), (1..=20).collect::<Vec<_>>());
    assert_eq!(feed.page_cursor(), 2);
    assert_eq!(feed.status(), FeedStatus::Idle);
}

#[test]
fn test_two_triggers_one_outstanding_fetch() {
    let mut feed = FeedController::new(posts(1..=10, &[]), 10);

    let first = feed.load_more();
    let second = feed.load_more();
    let third = feed.on_visibility(true);

    assert!(first.is_some());
    assert!(second.is_none());
    assert!(third.is_none());
    assert!(feed.is_loading());
}

#[test]
fn test_stale_page_after_filter_change_is_dropped() {
    let mut feed = FeedController::new(posts(1..=10, &["nature"]), 10);
    let stale = feed.load_more().unwrap();

    let refilter = feed.set_filters(tags(&["nature"])).unwrap();
    assert!(!feed.page_loaded(&stale, Ok(posts(11..=20, &["nature"]))));
    assert!(feed.is_loading());

    assert!(feed.page_loaded(&refilter, Ok(posts(1..=10, &["nature"]))));
    assert_eq!(feed.items().len(), 10);
}

// ========================================================================
// Tag suggestions and likes
// ========================================================================

#[test]
fn test_tag_suggestions_case_insensitive_excluding_selected() {
    let all = vec![
        post(1, &["Nature", "night"]),
        post(2, &["winter", "nature"]),
        post(3, &["snow"]),
    ];
    let source = FakeBackend::new(all.clone());
    let mut feed = FeedController::new(all, 10);

    assert_eq!(feed.tag_suggestions("N"), vec!["Nature", "night", "winter", "nature", "snow"]);
    assert!(feed.tag_suggestions("").is_empty());

    feed.set_filters_from(tags(&["night"]), &source);
    assert_eq!(feed.tag_suggestions("ni"), Vec::<String>::new());
    assert_eq!(feed.tag_suggestions("nat"), vec!["Nature", "nature"]);
}

#[test]
fn test_apply_like_updates_held_copy() {
    let mut feed = FeedController::new(posts(1..=3, &[]), 10);
    assert!(feed.apply_like(2, true));
    assert_eq!(feed.items()[1].likes_count, 1);
    assert!(feed.apply_like(2, false));
    assert!(feed.apply_like(2, false));
    assert_eq!(feed.items()[1].likes_count, 0);
    assert!(!feed.apply_like(99, true));
}
