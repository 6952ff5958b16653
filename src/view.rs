//! Plain-text rendering of the model
//!
//! Every function here is pure: it reads a snapshot or the model and
//! returns the text to print. The CLI writes it to stdout.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::composer::ComposerSnapshot;
use crate::feed::{FeedSnapshot, FeedStatus};
use crate::model::{AppModel, Post, ProfileState, ProfileTab, StatusKind};

const RULE: &str = "────────────────────────────────────────";

/// Short relative age ("3m", "5h", "2d"), falling back to the date
pub fn format_age(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - date).num_seconds().max(0);
    match secs {
        0..=59 => "now".to_string(),
        60..=3_599 => format!("{}m", secs / 60),
        3_600..=86_399 => format!("{}h", secs / 3_600),
        86_400..=604_799 => format!("{}d", secs / 86_400),
        _ => date.format("%Y-%m-%d").to_string(),
    }
}

/// One post as an indented block
pub fn render_post(post: &Post, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let draft = if post.is_draft { " [draft]" } else { "" };
    let _ = writeln!(
        out,
        "#{} @{} · {} · ♥ {}{}",
        post.id,
        post.owner.username,
        format_age(post.date, now),
        post.likes_count,
        draft
    );
    for line in post.text.lines() {
        let _ = writeln!(out, "    {}", line);
    }
    if !post.tags.is_empty() {
        let tags: Vec<String> = post.tags.iter().map(|t| format!("#{}", t)).collect();
        let _ = writeln!(out, "    {}", tags.join(" "));
    }
    out
}

fn render_posts(out: &mut String, posts: &[Post], now: DateTime<Utc>) {
    for (i, post) in posts.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_post(post, now));
    }
}

/// The feed: active filters, visible posts, then the end-of-list marker
pub fn render_feed(snapshot: &FeedSnapshot, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    if !snapshot.selected_tags.is_empty() {
        let tags: Vec<&str> = snapshot.selected_tags.iter().map(String::as_str).collect();
        let _ = writeln!(out, "Filtering by: {}", tags.join(", "));
        let _ = writeln!(out, "{}", RULE);
    }

    if snapshot.visible.is_empty() && !snapshot.is_loading {
        out.push_str("No haikus yet.\n");
    } else {
        render_posts(&mut out, &snapshot.visible, now);
    }

    let footer = match snapshot.status {
        FeedStatus::Loading => "Loading...".to_string(),
        FeedStatus::Exhausted => "End of feed".to_string(),
        FeedStatus::Error => match &snapshot.last_error {
            Some(e) => format!("Failed to load: {}", e),
            None => "Failed to load".to_string(),
        },
        FeedStatus::Idle if snapshot.has_more => "More available".to_string(),
        FeedStatus::Idle => "End of feed".to_string(),
    };
    let _ = writeln!(out, "{}\n{}", RULE, footer);
    out
}

pub fn render_suggestions(query: &str, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return format!("No tags matching \"{}\"\n", query);
    }
    let mut out = String::new();
    for tag in suggestions {
        let _ = writeln!(out, "#{}", tag);
    }
    out
}

/// The compose surface with history and word count
pub fn render_composer(snapshot: &ComposerSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}]", snapshot.color);
    if snapshot.text.is_empty() {
        out.push_str("    (empty)\n");
    }
    for line in snapshot.text.lines() {
        let _ = writeln!(out, "    {}", line);
    }
    if !snapshot.tags.is_empty() {
        let _ = writeln!(out, "tags: {}", snapshot.tags.join(", "));
    }
    let _ = writeln!(
        out,
        "{} words · undo {} · redo {}",
        snapshot.word_count,
        if snapshot.can_undo { "on" } else { "off" },
        if snapshot.can_redo { "on" } else { "off" },
    );
    out
}

pub fn render_profile(profile: &ProfileState, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    if profile.loading {
        out.push_str("Loading profile...\n");
        return out;
    }
    if let Some(error) = &profile.error {
        let _ = writeln!(out, "Failed to load profile: {}", error);
        return out;
    }
    let Some(data) = &profile.data else {
        return out;
    };

    let _ = writeln!(out, "@{} (#{})", data.user.username, data.user.id);
    if data.is_self {
        let _ = writeln!(
            out,
            "{} posts · {} liked · {} drafts",
            data.posts.len(),
            data.liked.len(),
            data.drafts.len()
        );
    } else {
        let _ = writeln!(out, "{} posts", data.posts.len());
    }
    let tab = match profile.tab {
        ProfileTab::Posts => "Posts",
        ProfileTab::Liked => "Liked",
        ProfileTab::Drafts => "Drafts",
    };
    let _ = writeln!(out, "{}\n{}", RULE, tab);

    let posts = profile.tab_posts();
    if posts.is_empty() {
        out.push_str("Nothing here yet.\n");
    } else {
        render_posts(&mut out, posts, now);
    }
    out
}

/// Status line, prefixed by severity
pub fn render_status(model: &AppModel) -> Option<String> {
    model.status.as_ref().map(|status| match status.kind {
        StatusKind::Info => status.text.clone(),
        StatusKind::Error => format!("error: {}", status.text),
    })
}
