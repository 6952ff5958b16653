//! Feed update handlers

use crate::commands::Cmd;
use crate::messages::FeedMsg;
use crate::model::{AppModel, TransientMessage};

/// Handle feed messages
pub fn update_feed(model: &mut AppModel, msg: FeedMsg) -> Option<Cmd> {
    match msg {
        FeedMsg::Refresh => {
            if model.feed_refreshing {
                return None;
            }
            model.feed_refreshing = true;
            Some(Cmd::FetchInitialPage {
                limit: model.feed.page_size(),
            })
        }

        FeedMsg::InitialLoaded(result) => {
            model.feed_refreshing = false;
            match result {
                Ok(posts) => {
                    tracing::info!("Loaded {} haikus", posts.len());
                    Some(Cmd::fetch_page_or_redraw(model.feed.replace_initial(posts)))
                }
                Err(e) => {
                    tracing::warn!("Failed to load haikus: {}", e);
                    model.set_status(TransientMessage::error(format!(
                        "Failed to load haikus: {}",
                        e
                    )));
                    Some(Cmd::Redraw)
                }
            }
        }

        FeedMsg::LoadMore => model
            .feed
            .load_more()
            .map(|request| Cmd::batch(vec![Cmd::FetchPage(request), Cmd::Redraw])),

        FeedMsg::NearEnd(near_end) => model
            .feed
            .on_visibility(near_end)
            .map(|request| Cmd::batch(vec![Cmd::FetchPage(request), Cmd::Redraw])),

        FeedMsg::SetFilters(tags) => {
            if &tags == model.feed.selected_tags() {
                return None;
            }
            Some(Cmd::fetch_page_or_redraw(model.feed.set_filters(tags)))
        }

        FeedMsg::SelectTag(tag) => {
            let tag = tag.trim().to_string();
            if tag.is_empty() || model.feed.selected_tags().contains(&tag) {
                return None;
            }
            Some(Cmd::fetch_page_or_redraw(model.feed.select_tag(&tag)))
        }

        FeedMsg::DeselectTag(tag) => {
            if !model.feed.selected_tags().contains(&tag) {
                return None;
            }
            Some(Cmd::fetch_page_or_redraw(model.feed.deselect_tag(&tag)))
        }

        FeedMsg::PageLoaded { request, result } => {
            let failure = result.as_ref().err().cloned();
            if !model.feed.page_loaded(&request, result) {
                return None;
            }
            if let Some(e) = failure {
                model.set_status(TransientMessage::error(format!(
                    "Failed to load more haikus: {}",
                    e
                )));
            }
            Some(Cmd::Redraw)
        }

        FeedMsg::ToggleLike(post_id) => {
            if !model.session.is_authenticated() {
                model.set_status(TransientMessage::error("Sign in to like haikus"));
                return Some(Cmd::Redraw);
            }
            Some(Cmd::ToggleLike { post_id })
        }

        FeedMsg::LikeToggled { post_id, result } => {
            match result {
                Ok(liked) => {
                    model.feed.apply_like(post_id, liked);
                    let verb = if liked { "Liked" } else { "Unliked" };
                    model.set_status(TransientMessage::info(format!("{} haiku #{}", verb, post_id)));
                }
                Err(e) => {
                    tracing::warn!("Failed to toggle like on {}: {}", post_id, e);
                    model.set_status(TransientMessage::error("Failed to toggle like"));
                }
            }
            Some(Cmd::Redraw)
        }
    }
}
