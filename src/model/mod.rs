//! Application model - the complete state of the client
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod post;
pub mod profile;
pub mod status;

pub use post::{NewPost, Post, PostId, User, UserId};
pub use profile::{ProfileData, ProfileState, ProfileTab, ProfileTarget};
pub use status::{StatusKind, TransientMessage};

use crate::composer::{Composer, ComposerSnapshot};
use crate::config::ClientConfig;
use crate::feed::{FeedController, FeedSnapshot};
use crate::observer::{Subscribers, Subscription};
use crate::session::Session;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Effective configuration (file plus command-line overrides)
    pub config: ClientConfig,
    /// Signed-in state, passed explicitly to every authenticated call
    pub session: Session,
    /// The browsable feed
    pub feed: FeedController,
    /// True while the seed page of the feed is being fetched
    pub feed_refreshing: bool,
    /// The compose surface
    pub composer: Composer,
    /// True while a publish request is in flight
    pub publishing: bool,
    /// Profile page state
    pub profile: ProfileState,
    /// Transient status line
    pub status: Option<TransientMessage>,
    /// Set once the user asked to quit
    pub quit_requested: bool,
    feed_observers: Subscribers<FeedSnapshot>,
    composer_observers: Subscribers<ComposerSnapshot>,
}

impl AppModel {
    pub fn new(config: ClientConfig, session: Session) -> Self {
        let feed = FeedController::new(Vec::new(), config.page_size);
        let composer = Composer::with_history_depth(config.history_depth);
        Self {
            config,
            session,
            feed,
            feed_refreshing: false,
            composer,
            publishing: false,
            profile: ProfileState::default(),
            status: None,
            quit_requested: false,
            feed_observers: Subscribers::new(),
            composer_observers: Subscribers::new(),
        }
    }

    pub fn subscribe_feed(&mut self) -> Subscription<FeedSnapshot> {
        self.feed_observers.subscribe()
    }

    pub fn subscribe_composer(&mut self) -> Subscription<ComposerSnapshot> {
        self.composer_observers.subscribe()
    }

    pub fn feed_observers_mut(&mut self) -> &mut Subscribers<FeedSnapshot> {
        &mut self.feed_observers
    }

    pub fn composer_observers_mut(&mut self) -> &mut Subscribers<ComposerSnapshot> {
        &mut self.composer_observers
    }

    /// Publish the current feed state to subscribers
    pub fn notify_feed(&mut self) {
        if self.feed_observers.is_empty() {
            return;
        }
        let snapshot = self.feed.snapshot();
        self.feed_observers.notify(&snapshot);
    }

    /// Publish the current composer state to subscribers
    pub fn notify_composer(&mut self) {
        if self.composer_observers.is_empty() {
            return;
        }
        let snapshot = self.composer.snapshot();
        self.composer_observers.notify(&snapshot);
    }

    pub fn set_status(&mut self, message: TransientMessage) {
        tracing::debug!("status: {}", message.text);
        self.status = Some(message);
    }

    /// Drop the status message once it has expired
    pub fn expire_status(&mut self) -> bool {
        if self.status.as_ref().is_some_and(|s| s.is_expired()) {
            self.status = None;
            return true;
        }
        false
    }
}
