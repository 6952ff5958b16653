//! Incrementally loaded, tag-filtered feed of posts.
//!
//! # Architecture
//!
//! - [`FeedController`]: state machine owning the held posts, tag selection
//!   and pagination cursor
//! - [`PageRequest`]: a fetch the controller wants performed; the caller runs
//!   it (on a worker, or inline through a [`PageSource`]) and hands the
//!   result back to [`FeedController::page_loaded`]
//! - [`filter`]: pure projections (visible posts, tag suggestions, merging)
//!
//! # Example
//!
//! ```
//! use basho::feed::{FeedController, FeedStatus};
//!
//! let mut feed = FeedController::new(Vec::new(), 10);
//! let request = feed.load_more().expect("feed starts with more pages");
//! assert_eq!(request.offset, 10);
//!
//! // A second trigger while the first is in flight is absorbed.
//! assert!(feed.load_more().is_none());
//!
//! feed.page_loaded(&request, Ok(Vec::new()));
//! assert_eq!(feed.status(), FeedStatus::Exhausted);
//! ```

mod controller;
pub mod filter;

use std::collections::BTreeSet;

use thiserror::Error;

pub use controller::{
    FeedController, FeedSnapshot, FeedStatus, PageRequest, PageRequestKind, DEFAULT_PAGE_SIZE,
};

use crate::model::Post;

/// A failed page fetch, as recorded by the controller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (or its body was unreadable)
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
}

/// Anything that can serve a page of posts.
///
/// Must be idempotent for the same offset, limit and tags.
pub trait PageSource {
    fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
        tags: &BTreeSet<String>,
    ) -> Result<Vec<Post>, FetchError>;
}
