//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! Network commands are run off the update thread; each one eventually sends
//! exactly one completion [`Msg`](crate::messages::Msg) back.

use crate::feed::PageRequest;
use crate::model::{NewPost, PostId, ProfileTarget};

/// Commands returned by update functions
#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Presentation state changed; re-render
    Redraw,
    /// Fetch the seed page (offset 0, no filters)
    /// Sends Msg::Feed(InitialLoaded) when done
    FetchInitialPage { limit: usize },
    /// Fetch one feed page
    /// Sends Msg::Feed(PageLoaded) when done
    FetchPage(PageRequest),
    /// Create a post
    /// Sends Msg::Composer(Published) when done
    PublishPost(NewPost),
    /// Toggle the signed-in user's like on a post
    /// Sends Msg::Feed(LikeToggled) when done
    ToggleLike { post_id: PostId },
    /// Exchange credentials for a token
    /// Sends Msg::Session(LoggedIn) when done
    Login { email: String, password: String },
    /// Create an account and sign in
    /// Sends Msg::Session(LoggedIn) when done
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// Fetch `/users/me` for the current token
    /// Sends Msg::Session(UserLoaded) when done
    FetchCurrentUser,
    /// Fetch everything shown on a profile page
    /// Sends Msg::Profile(Loaded) when done
    FetchProfile { target: ProfileTarget },
    /// Write the session to disk
    PersistSession,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
    /// Request application exit
    Quit,
}

impl Cmd {
    /// Create a batch of commands, flattening away `None`
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.into_iter().next().unwrap_or_default(),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Wrap an optional page request, redrawing either way
    pub fn fetch_page_or_redraw(request: Option<PageRequest>) -> Self {
        match request {
            Some(request) => Cmd::batch(vec![Cmd::FetchPage(request), Cmd::Redraw]),
            None => Cmd::Redraw,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // Completions trigger their own redraw
            Cmd::FetchInitialPage { .. }
            | Cmd::FetchPage(_)
            | Cmd::PublishPost(_)
            | Cmd::ToggleLike { .. }
            | Cmd::Login { .. }
            | Cmd::Register { .. }
            | Cmd::FetchCurrentUser
            | Cmd::FetchProfile { .. } => false,
            Cmd::PersistSession => false,
            Cmd::Quit => false,
        }
    }

    /// Number of completion messages this command will produce
    pub fn pending_completions(&self) -> usize {
        match self {
            Cmd::Batch(cmds) => cmds.iter().map(|c| c.pending_completions()).sum(),
            Cmd::FetchInitialPage { .. }
            | Cmd::FetchPage(_)
            | Cmd::PublishPost(_)
            | Cmd::ToggleLike { .. }
            | Cmd::Login { .. }
            | Cmd::Register { .. }
            | Cmd::FetchCurrentUser
            | Cmd::FetchProfile { .. } => 1,
            Cmd::None | Cmd::Redraw | Cmd::PersistSession | Cmd::Quit => 0,
        }
    }
}
