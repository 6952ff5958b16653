//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod composer;
mod feed;
mod profile;
mod session;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::messages::AppMsg;
#[cfg(debug_assertions)]
use crate::tracing::FeedTrace;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use composer::update_composer;
pub use feed::update_feed;
pub use profile::update_profile;
pub use session::update_session;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let touches_feed = matches!(msg, Msg::Feed(_));
    let touches_composer = matches!(msg, Msg::Composer(_));

    let result = match msg {
        Msg::Feed(m) => feed::update_feed(model, m),
        Msg::Composer(m) => composer::update_composer(model, m),
        Msg::Session(m) => session::update_session(model, m),
        Msg::Profile(m) => profile::update_profile(model, m),
        Msg::App(m) => app::update_app(model, m),
    };

    if result.is_some() {
        if touches_feed {
            model.notify_feed();
        }
        if touches_composer {
            model.notify_composer();
        }
    }

    result
}

/// Update with tracing instrumentation (debug builds only)
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    // Skip logging for noisy periodic messages
    let is_noisy = matches!(&msg, Msg::App(AppMsg::Tick));

    let msg_name = msg.label();
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = FeedTrace::from_feed(&model.feed);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = FeedTrace::from_feed(&model.feed);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "feed", %diff, "state changed");
    }

    result
}
