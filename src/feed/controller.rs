//! Feed pagination and tag-filter reconciliation

use std::collections::BTreeSet;

use crate::model::{Post, PostId};

use super::filter::{self, dedup_by_id, merge_unique};
use super::{FetchError, PageSource};

/// Default number of posts per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Lifecycle of the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedStatus {
    /// Nothing in flight, more pages may exist
    #[default]
    Idle,
    /// A page fetch is in flight
    Loading,
    /// The last fetch came back short; no more pages
    Exhausted,
    /// The last fetch failed; a later trigger may retry
    Error,
}

/// Why a page is being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequestKind {
    /// Next page appended after the held items
    LoadMore,
    /// Re-fetch from offset 0 after the tag selection changed
    Refilter,
}

/// A page fetch the runtime must perform on behalf of the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub kind: PageRequestKind,
    /// Filter generation this request belongs to
    pub generation: u64,
    pub offset: usize,
    pub limit: usize,
    pub tags: BTreeSet<String>,
}

/// Read-only view handed to presentation surfaces
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub visible: Vec<Post>,
    pub selected_tags: BTreeSet<String>,
    pub status: FeedStatus,
    pub has_more: bool,
    pub is_loading: bool,
    pub last_error: Option<FetchError>,
}

/// Owns the held posts, the tag selection and the pagination cursor.
///
/// Fetching is split in two: [`load_more`](Self::load_more) and
/// [`set_filters`](Self::set_filters) return a [`PageRequest`] to perform,
/// and [`page_loaded`](Self::page_loaded) applies its result. At most one
/// request is in flight at a time.
#[derive(Debug, Clone)]
pub struct FeedController {
    initial: Vec<Post>,
    items: Vec<Post>,
    selected_tags: BTreeSet<String>,
    page_size: usize,
    page_cursor: usize,
    has_more: bool,
    status: FeedStatus,
    /// Bumped on every filter change; completions from older generations are stale
    generation: u64,
    last_error: Option<FetchError>,
    /// Limit of a refilter that failed; the next trigger re-issues it
    failed_refilter: Option<usize>,
}

impl FeedController {
    /// Create a controller seeded with the page at offset 0
    pub fn new(initial: Vec<Post>, page_size: usize) -> Self {
        let initial = dedup_by_id(initial);
        Self {
            items: initial.clone(),
            initial,
            selected_tags: BTreeSet::new(),
            page_size: page_size.max(1),
            page_cursor: 1,
            has_more: true,
            status: FeedStatus::Idle,
            generation: 0,
            last_error: None,
            failed_refilter: None,
        }
    }

    /// Replace the seed page, as when the owning view re-fetches page 0.
    ///
    /// The tag selection is kept: with no tags selected the new seed page is
    /// shown directly, otherwise a refilter request is returned.
    pub fn replace_initial(&mut self, initial: Vec<Post>) -> Option<PageRequest> {
        self.initial = dedup_by_id(initial);
        let tags = self.selected_tags.clone();
        self.set_filters(tags)
    }

    /// Start fetching the next page.
    ///
    /// Returns `None` (and changes nothing) while a fetch is in flight or
    /// once the feed is exhausted. After a failed refilter, the refilter
    /// from offset 0 is retried instead.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if let Some(limit) = self.failed_refilter {
            if self.is_loading() {
                return None;
            }
            self.status = FeedStatus::Loading;
            tracing::debug!("feed: retrying refilter (limit={})", limit);
            return Some(PageRequest {
                kind: PageRequestKind::Refilter,
                generation: self.generation,
                offset: 0,
                limit,
                tags: self.selected_tags.clone(),
            });
        }

        if self.is_loading() || !self.has_more {
            tracing::trace!(
                "feed: load_more ignored (status={:?}, has_more={})",
                self.status,
                self.has_more
            );
            return None;
        }

        self.status = FeedStatus::Loading;
        let request = PageRequest {
            kind: PageRequestKind::LoadMore,
            generation: self.generation,
            offset: self.page_cursor * self.page_size,
            limit: self.page_size,
            tags: self.selected_tags.clone(),
        };
        tracing::debug!(
            "feed: loading page {} (offset={}, limit={})",
            self.page_cursor,
            request.offset,
            request.limit
        );
        Some(request)
    }

    /// Visibility signal from the end-of-list sentinel
    pub fn on_visibility(&mut self, near_end: bool) -> Option<PageRequest> {
        if near_end {
            self.load_more()
        } else {
            None
        }
    }

    /// Change the tag selection.
    ///
    /// An empty selection restores the seed page without fetching. A
    /// non-empty one drops the held posts and returns a request that
    /// re-fetches from offset 0, sized to what was already loaded so the
    /// list does not visibly shrink.
    pub fn set_filters(&mut self, tags: BTreeSet<String>) -> Option<PageRequest> {
        self.generation += 1;
        self.last_error = None;
        self.failed_refilter = None;
        self.selected_tags = tags;

        if self.selected_tags.is_empty() {
            self.items = self.initial.clone();
            self.page_cursor = 1;
            self.has_more = true;
            self.status = FeedStatus::Idle;
            tracing::debug!("feed: filters cleared, restored {} seed posts", self.items.len());
            return None;
        }

        let limit = self.page_size * self.page_cursor.max(1);
        self.items.clear();
        self.status = FeedStatus::Loading;
        tracing::debug!(
            "feed: filters set to {:?}, refetching {} posts",
            self.selected_tags,
            limit
        );
        Some(PageRequest {
            kind: PageRequestKind::Refilter,
            generation: self.generation,
            offset: 0,
            limit,
            tags: self.selected_tags.clone(),
        })
    }

    /// Add a tag to the selection (no-op if already selected)
    pub fn select_tag(&mut self, tag: &str) -> Option<PageRequest> {
        if self.selected_tags.contains(tag) {
            return None;
        }
        let mut tags = self.selected_tags.clone();
        tags.insert(tag.to_string());
        self.set_filters(tags)
    }

    /// Remove a tag from the selection (no-op if not selected)
    pub fn deselect_tag(&mut self, tag: &str) -> Option<PageRequest> {
        if !self.selected_tags.contains(tag) {
            return None;
        }
        let mut tags = self.selected_tags.clone();
        tags.remove(tag);
        self.set_filters(tags)
    }

    /// Apply the outcome of a request previously returned by this controller.
    ///
    /// Returns false when the completion was stale and ignored.
    pub fn page_loaded(
        &mut self,
        request: &PageRequest,
        result: Result<Vec<Post>, FetchError>,
    ) -> bool {
        if request.generation != self.generation || !self.is_loading() {
            tracing::debug!(
                "feed: discarding stale page (request gen {} != current gen {})",
                request.generation,
                self.generation
            );
            return false;
        }

        let posts = match result {
            Ok(posts) => posts,
            Err(err) => {
                tracing::warn!("feed: failed to load page at offset {}: {}", request.offset, err);
                self.status = FeedStatus::Error;
                self.last_error = Some(err);
                if request.kind == PageRequestKind::Refilter {
                    self.failed_refilter = Some(request.limit);
                }
                return true;
            }
        };

        let returned = posts.len();
        self.last_error = None;

        match request.kind {
            PageRequestKind::LoadMore => {
                let added = merge_unique(&mut self.items, posts);
                self.page_cursor += 1;
                self.has_more = returned == request.limit;
                tracing::debug!(
                    "feed: page merged ({} returned, {} new, {} held)",
                    returned,
                    added,
                    self.items.len()
                );
            }
            PageRequestKind::Refilter => {
                self.failed_refilter = None;
                self.items = dedup_by_id(posts);
                self.page_cursor = (request.limit / self.page_size).max(1);
                self.has_more = returned >= request.limit;
                tracing::debug!(
                    "feed: refiltered ({} returned, {} held)",
                    returned,
                    self.items.len()
                );
            }
        }

        self.status = if self.has_more {
            FeedStatus::Idle
        } else {
            FeedStatus::Exhausted
        };
        true
    }

    /// Run `load_more` against a source and apply the result synchronously
    pub fn load_more_from(&mut self, source: &impl PageSource) -> bool {
        match self.load_more() {
            Some(request) => {
                let result = source.fetch_page(request.offset, request.limit, &request.tags);
                self.page_loaded(&request, result)
            }
            None => false,
        }
    }

    /// Run `set_filters` against a source and apply any fetch synchronously
    pub fn set_filters_from(&mut self, tags: BTreeSet<String>, source: &impl PageSource) {
        if let Some(request) = self.set_filters(tags) {
            let result = source.fetch_page(request.offset, request.limit, &request.tags);
            self.page_loaded(&request, result);
        }
    }

    /// Reflect a like toggle on the held copy of a post
    pub fn apply_like(&mut self, post_id: PostId, liked: bool) -> bool {
        let Some(post) = self.items.iter_mut().find(|p| p.id == post_id) else {
            return false;
        };
        post.likes_count = if liked {
            post.likes_count.saturating_add(1)
        } else {
            post.likes_count.saturating_sub(1)
        };
        if let Some(seed) = self.initial.iter_mut().find(|p| p.id == post_id) {
            seed.likes_count = post.likes_count;
        }
        true
    }

    /// Posts matching the current tag selection
    pub fn visible_items(&self) -> Vec<&Post> {
        filter::visible_items(&self.items, &self.selected_tags)
    }

    pub fn tag_suggestions(&self, query: &str) -> Vec<String> {
        filter::tag_suggestions(&self.items, &self.selected_tags, query)
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            visible: self.visible_items().into_iter().cloned().collect(),
            selected_tags: self.selected_tags.clone(),
            status: self.status,
            has_more: self.has_more,
            is_loading: self.is_loading(),
            last_error: self.last_error.clone(),
        }
    }

    pub fn items(&self) -> &[Post] {
        &self.items
    }

    pub fn selected_tags(&self) -> &BTreeSet<String> {
        &self.selected_tags
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FeedStatus::Loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn page_cursor(&self) -> usize {
        self.page_cursor
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;
    use chrono::{TimeZone, Utc};

    fn post(id: PostId, tags: &[&str]) -> Post {
        Post {
            id,
            text: format!("haiku {}", id),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            color: String::new(),
            likes_count: 1,
            owner: User {
                id: 1,
                username: "basho".to_string(),
                avatar: None,
                email: None,
            },
            date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            is_draft: false,
        }
    }

    fn posts(range: std::ops::Range<PostId>) -> Vec<Post> {
        range.map(|id| post(id, &[])).collect()
    }

    #[test]
    fn test_load_more_requests_next_offset() {
        let mut feed = FeedController::new(posts(0..10), 10);
        let request = feed.load_more().unwrap();

        assert_eq!(request.kind, PageRequestKind::LoadMore);
        assert_eq!(request.offset, 10);
        assert_eq!(request.limit, 10);
        assert_eq!(feed.status(), FeedStatus::Loading);
    }

    #[test]
    fn test_second_load_more_while_loading_is_noop() {
        let mut feed = FeedController::new(posts(0..10), 10);
        assert!(feed.load_more().is_some());
        assert!(feed.load_more().is_none());
        assert!(feed.on_visibility(true).is_none());
    }

    #[test]
    fn test_full_page_keeps_idle_short_page_exhausts() {
        let mut feed = FeedController::new(posts(0..10), 10);

        let req = feed.load_more().unwrap();
        assert!(feed.page_loaded(&req, Ok(posts(10..20))));
        assert_eq!(feed.status(), FeedStatus::Idle);
        assert_eq!(feed.page_cursor(), 2);

        let req = feed.load_more().unwrap();
        assert_eq!(req.offset, 20);
        feed.page_loaded(&req, Ok(posts(20..23)));
        assert_eq!(feed.status(), FeedStatus::Exhausted);
        assert!(!feed.has_more());
        assert!(feed.load_more().is_none());
        assert_eq!(feed.items().len(), 23);
    }

    #[test]
    fn test_overlapping_page_is_deduplicated() {
        let mut feed = FeedController::new(posts(0..10), 10);
        let req = feed.load_more().unwrap();
        feed.page_loaded(&req, Ok(posts(5..15)));

        let ids: Vec<_> = feed.items().iter().map(|p| p.id).collect();
        assert_eq!(ids, (0..15).collect::<Vec<_>>());
        // Returned count, not new count, decides has_more
        assert!(feed.has_more());
    }

    #[test]
    fn test_failure_keeps_items_and_allows_retry() {
        let mut feed = FeedController::new(posts(0..10), 10);
        let req = feed.load_more().unwrap();
        feed.page_loaded(&req, Err(FetchError::Network("connection refused".into())));

        assert_eq!(feed.status(), FeedStatus::Error);
        assert!(!feed.is_loading());
        assert!(feed.has_more());
        assert_eq!(feed.items().len(), 10);
        assert!(feed.last_error().is_some());

        let retry = feed.load_more().unwrap();
        assert_eq!(retry.offset, 10);
    }

    #[test]
    fn test_clearing_filters_restores_seed_page() {
        let mut feed = FeedController::new(posts(0..10), 10);
        let req = feed.load_more().unwrap();
        feed.page_loaded(&req, Ok(posts(10..13)));
        assert!(!feed.has_more());

        assert!(feed.set_filters(BTreeSet::new()).is_none());
        assert_eq!(feed.items().len(), 10);
        assert_eq!(feed.page_cursor(), 1);
        assert!(feed.has_more());
        assert_eq!(feed.status(), FeedStatus::Idle);
    }

    #[test]
    fn test_refilter_is_sized_to_loaded_extent() {
        let mut feed = FeedController::new(posts(0..10), 10);
        let req = feed.load_more().unwrap();
        feed.page_loaded(&req, Ok(posts(10..20)));

        let req = feed.select_tag("nature").unwrap();
        assert_eq!(req.kind, PageRequestKind::Refilter);
        assert_eq!(req.offset, 0);
        assert_eq!(req.limit, 20);
        assert!(feed.items().is_empty());

        let mut page = posts(0..20);
        page.push(post(3, &[]));
        feed.page_loaded(&req, Ok(page));
        assert_eq!(feed.items().len(), 20);
        assert_eq!(feed.page_cursor(), 2);
        assert!(feed.has_more());
    }

    #[test]
    fn test_failed_refilter_is_retried_from_start() {
        let mut feed = FeedController::new(posts(0..10), 10);
        let req = feed.load_more().unwrap();
        feed.page_loaded(&req, Ok(posts(10..13)));
        assert!(!feed.has_more());

        let req = feed.select_tag("nature").unwrap();
        feed.page_loaded(&req, Err(FetchError::Server {
            status: 503,
            message: "unavailable".into(),
        }));
        assert_eq!(feed.status(), FeedStatus::Error);

        let retry = feed.on_visibility(true).unwrap();
        assert_eq!(retry.kind, PageRequestKind::Refilter);
        assert_eq!(retry.offset, 0);
        assert_eq!(retry.limit, req.limit);
        assert!(feed.load_more().is_none());

        feed.page_loaded(&retry, Ok(posts(0..20)));
        assert_eq!(feed.items().len(), 20);
        let next = feed.load_more().unwrap();
        assert_eq!(next.kind, PageRequestKind::LoadMore);
    }

    #[test]
    fn test_replace_initial_keeps_selection() {
        let mut feed = FeedController::new(posts(0..10), 10);
        assert!(feed.replace_initial(posts(5..15)).is_none());
        assert_eq!(feed.items()[0].id, 5);

        let req = feed.select_tag("nature").unwrap();
        feed.page_loaded(&req, Ok(Vec::new()));
        let refetch = feed.replace_initial(posts(20..30)).unwrap();
        assert_eq!(refetch.kind, PageRequestKind::Refilter);
        assert!(feed.selected_tags().contains("nature"));
    }

    #[test]
    fn test_stale_page_after_filter_change_is_dropped() {
        let mut feed = FeedController::new(posts(0..10), 10);
        let stale = feed.load_more().unwrap();
        feed.set_filters(BTreeSet::new());

        assert!(!feed.page_loaded(&stale, Ok(posts(10..20))));
        assert_eq!(feed.items().len(), 10);
        assert_eq!(feed.status(), FeedStatus::Idle);
    }

    #[test]
    fn test_apply_like_adjusts_count() {
        let mut feed = FeedController::new(posts(0..3), 10);
        assert!(feed.apply_like(1, true));
        assert_eq!(feed.items()[1].likes_count, 2);
        assert!(feed.apply_like(1, false));
        assert!(feed.apply_like(1, false));
        assert!(feed.apply_like(1, false));
        assert_eq!(feed.items()[1].likes_count, 0);
        assert!(!feed.apply_like(99, true));
    }

    #[test]
    fn test_select_and_deselect_tag() {
        let mut feed = FeedController::new(vec![post(1, &["a"]), post(2, &["b"])], 10);
        assert!(feed.select_tag("a").is_some());
        assert!(feed.select_tag("a").is_none());
        assert!(feed.deselect_tag("zzz").is_none());
        assert!(feed.deselect_tag("a").is_none()); // cleared -> seed restore, no fetch
        assert_eq!(feed.items().len(), 2);
    }
}
