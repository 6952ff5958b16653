//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types. Completion messages
//! (`*Loaded`, `*Toggled`, `Published`, ...) are sent back by the runtime
//! once the side effect requested by a [`Cmd`](crate::commands::Cmd) finishes.

use std::collections::BTreeSet;

use crate::feed::{FetchError, PageRequest};
use crate::model::{Post, PostId, ProfileData, ProfileTab, ProfileTarget, User};

/// Feed messages (pagination, filtering, likes)
#[derive(Debug, Clone)]
pub enum FeedMsg {
    /// Fetch the seed page again (first page, no filters)
    Refresh,
    /// Seed page fetch completed
    InitialLoaded(Result<Vec<Post>, FetchError>),
    /// Explicit "load more" trigger
    LoadMore,
    /// End-of-list sentinel entered (true) or left (false) the viewport
    NearEnd(bool),
    /// Replace the whole tag selection
    SetFilters(BTreeSet<String>),
    /// Add one tag to the selection
    SelectTag(String),
    /// Remove one tag from the selection
    DeselectTag(String),
    /// Page fetch completed
    PageLoaded {
        request: PageRequest,
        result: Result<Vec<Post>, FetchError>,
    },
    /// Like button pressed
    ToggleLike(PostId),
    /// Like toggle completed; `Ok(liked)` is the new state
    LikeToggled {
        post_id: PostId,
        result: Result<bool, String>,
    },
}

/// Compose surface messages (text, history, tags, publishing)
#[derive(Debug, Clone)]
pub enum ComposerMsg {
    /// The input surface reports a new full value
    SetText(String),
    Undo,
    Redo,
    AddTag(String),
    RemoveTag(usize),
    /// Select a palette color by name or token
    SelectColor(String),
    /// Publish the current text (or save it as a draft)
    Publish { is_draft: bool },
    /// Publish completed
    Published(Result<Post, String>),
    /// Discard the current document and start over
    New,
}

/// Session messages (sign in/out)
#[derive(Debug, Clone)]
pub enum SessionMsg {
    Login { email: String, password: String },
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// Token exchange completed
    LoggedIn(Result<String, String>),
    /// Re-fetch the current user for the stored token
    Refresh,
    /// `/users/me` completed
    UserLoaded(Result<User, String>),
    Logout,
}

/// Profile page messages
#[derive(Debug, Clone)]
pub enum ProfileMsg {
    Open(ProfileTarget),
    SelectTab(ProfileTab),
    Loaded {
        target: ProfileTarget,
        result: Result<ProfileData, String>,
    },
}

/// Application-level messages
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Periodic tick (expires status messages)
    Tick,
    /// Dismiss the status message now
    DismissStatus,
    /// Quit the application
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Feed messages (pagination, filters, likes)
    Feed(FeedMsg),
    /// Compose surface messages
    Composer(ComposerMsg),
    /// Session messages
    Session(SessionMsg),
    /// Profile messages
    Profile(ProfileMsg),
    /// App messages
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn load_more() -> Self {
        Msg::Feed(FeedMsg::LoadMore)
    }

    pub fn select_tag(tag: impl Into<String>) -> Self {
        Msg::Feed(FeedMsg::SelectTag(tag.into()))
    }

    pub fn set_text(text: impl Into<String>) -> Self {
        Msg::Composer(ComposerMsg::SetText(text.into()))
    }

    /// Short label for tracing
    pub fn label(&self) -> &'static str {
        match self {
            Msg::Feed(m) => match m {
                FeedMsg::Refresh => "Feed::Refresh",
                FeedMsg::InitialLoaded(_) => "Feed::InitialLoaded",
                FeedMsg::LoadMore => "Feed::LoadMore",
                FeedMsg::NearEnd(_) => "Feed::NearEnd",
                FeedMsg::SetFilters(_) => "Feed::SetFilters",
                FeedMsg::SelectTag(_) => "Feed::SelectTag",
                FeedMsg::DeselectTag(_) => "Feed::DeselectTag",
                FeedMsg::PageLoaded { .. } => "Feed::PageLoaded",
                FeedMsg::ToggleLike(_) => "Feed::ToggleLike",
                FeedMsg::LikeToggled { .. } => "Feed::LikeToggled",
            },
            Msg::Composer(_) => "Composer",
            Msg::Session(m) => match m {
                // Never log credentials
                SessionMsg::Login { .. } => "Session::Login",
                SessionMsg::Register { .. } => "Session::Register",
                SessionMsg::LoggedIn(_) => "Session::LoggedIn",
                SessionMsg::Refresh => "Session::Refresh",
                SessionMsg::UserLoaded(_) => "Session::UserLoaded",
                SessionMsg::Logout => "Session::Logout",
            },
            Msg::Profile(_) => "Profile",
            Msg::App(_) => "App",
        }
    }
}
