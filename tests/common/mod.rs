//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};

use basho::api::{ApiError, Backend};
use basho::config::ClientConfig;
use basho::feed::{FetchError, PageSource};
use basho::model::{AppModel, NewPost, Post, PostId, ProfileData, ProfileTarget, User};
use basho::session::Session;

pub const PASSWORD: &str = "frog-pond";

/// A post by `basho` with the given id and tags
pub fn post(id: PostId, tags: &[&str]) -> Post {
    Post {
        id,
        text: format!("haiku {}\nsecond line\nthird line", id),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        color: "bg-white/70".to_string(),
        likes_count: 0,
        owner: user(1, "basho"),
        date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::minutes(id),
        is_draft: false,
    }
}

/// Posts with ids in `ids`, each tagged with `tags`
pub fn posts(ids: std::ops::RangeInclusive<PostId>, tags: &[&str]) -> Vec<Post> {
    ids.map(|id| post(id, tags)).collect()
}

pub fn user(id: i64, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        avatar: None,
        email: Some(format!("{}@example.com", username)),
    }
}

pub fn tags(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|t| t.to_string()).collect()
}

pub fn ids(posts: &[&Post]) -> Vec<PostId> {
    posts.iter().map(|p| p.id).collect()
}

/// Create a test model with an anonymous session and the default config
pub fn test_model() -> AppModel {
    AppModel::new(ClientConfig::default(), Session::anonymous())
}

#[derive(Debug, Default)]
struct FakeState {
    posts: Vec<Post>,
    liked: HashSet<PostId>,
    next_id: PostId,
}

/// In-memory backend.
///
/// Pages ignore the tag filter, like the real server. `overlap` shifts every
/// page after the first back by that many posts, simulating posts inserted
/// upstream between fetches.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
    calls: Arc<AtomicUsize>,
    failures: Arc<AtomicUsize>,
    overlap: usize,
    delay: Option<Duration>,
    token: Option<String>,
}

impl FakeBackend {
    pub fn new(posts: Vec<Post>) -> Self {
        let next_id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            state: Arc::new(Mutex::new(FakeState {
                posts,
                liked: HashSet::new(),
                next_id,
            })),
            calls: Arc::new(AtomicUsize::new(0)),
            failures: Arc::new(AtomicUsize::new(0)),
            overlap: 0,
            delay: None,
            token: None,
        }
    }

    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make the next `count` page fetches fail
    pub fn fail_next(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    /// Number of page fetches served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn post_count(&self) -> usize {
        self.state.lock().unwrap().posts.len()
    }

    fn token_user(&self) -> Result<User, ApiError> {
        match &self.token {
            Some(token) if token.starts_with("tok-") => Ok(user(1, &token["tok-".len()..])),
            Some(_) => Err(ApiError::Server {
                status: 401,
                message: "Could not validate credentials".to_string(),
            }),
            None => Err(ApiError::Unauthenticated),
        }
    }
}

impl PageSource for FakeBackend {
    fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
        _tags: &BTreeSet<String>,
    ) -> Result<Vec<Post>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(FetchError::Network("connection reset".to_string()));
        }

        let state = self.state.lock().unwrap();
        let start = if offset > 0 {
            offset.saturating_sub(self.overlap)
        } else {
            0
        };
        Ok(state
            .posts
            .iter()
            .filter(|p| !p.is_draft)
            .skip(start)
            .take(limit)
            .cloned()
            .collect())
    }
}

impl Backend for FakeBackend {
    fn authorized(&self, session: &Session) -> Self {
        let mut copy = self.clone();
        copy.token = session.token.clone();
        copy
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<String, ApiError> {
        if password != PASSWORD {
            return Err(ApiError::Server {
                status: 401,
                message: "Incorrect username or password".to_string(),
            });
        }
        let name = email.split('@').next().unwrap_or(email);
        Ok(format!("tok-{}", name))
    }

    fn sign_up(&self, _username: &str, email: &str, password: &str) -> Result<String, ApiError> {
        self.sign_in(email, password)
    }

    fn current_user(&self) -> Result<User, ApiError> {
        self.token_user()
    }

    fn publish(&self, new_post: &NewPost) -> Result<Post, ApiError> {
        let owner = self.token_user()?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        let created = Post {
            id,
            text: new_post.text.clone(),
            tags: new_post.tags.clone(),
            color: new_post.color.clone(),
            likes_count: 0,
            owner,
            date: Utc::now(),
            is_draft: new_post.is_draft,
        };
        state.posts.push(created.clone());
        Ok(created)
    }

    fn like(&self, post_id: PostId) -> Result<bool, ApiError> {
        self.token_user()?;
        let mut state = self.state.lock().unwrap();
        let liked = if state.liked.remove(&post_id) {
            false
        } else {
            state.liked.insert(post_id);
            true
        };
        if let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) {
            post.likes_count = if liked {
                post.likes_count + 1
            } else {
                post.likes_count.saturating_sub(1)
            };
        }
        Ok(liked)
    }

    fn profile(&self, target: ProfileTarget) -> Result<ProfileData, ApiError> {
        let state = self.state.lock().unwrap();
        match target {
            ProfileTarget::Me => {
                drop(state);
                let me = self.token_user()?;
                let state = self.state.lock().unwrap();
                let own = |draft: bool| -> Vec<Post> {
                    state
                        .posts
                        .iter()
                        .filter(|p| p.owner.id == me.id && p.is_draft == draft)
                        .cloned()
                        .collect()
                };
                Ok(ProfileData {
                    posts: own(false),
                    drafts: own(true),
                    liked: state
                        .posts
                        .iter()
                        .filter(|p| state.liked.contains(&p.id))
                        .cloned()
                        .collect(),
                    user: me,
                    is_self: true,
                })
            }
            ProfileTarget::User(id) => {
                let posts: Vec<Post> = state
                    .posts
                    .iter()
                    .filter(|p| p.owner.id == id && !p.is_draft)
                    .cloned()
                    .collect();
                let user = posts
                    .first()
                    .map(|p| p.owner.clone())
                    .ok_or_else(|| ApiError::Server {
                        status: 404,
                        message: "User not found".to_string(),
                    })?;
                Ok(ProfileData {
                    user,
                    posts,
                    liked: Vec::new(),
                    drafts: Vec::new(),
                    is_self: false,
                })
            }
        }
    }
}
