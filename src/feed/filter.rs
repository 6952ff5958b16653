//! Pure projections over a held collection of posts

use std::collections::{BTreeSet, HashSet};

use crate::model::{Post, PostId};

/// Posts carrying every selected tag, in held order
pub fn visible_items<'a>(items: &'a [Post], selected: &BTreeSet<String>) -> Vec<&'a Post> {
    if selected.is_empty() {
        return items.iter().collect();
    }
    items.iter().filter(|p| p.has_all_tags(selected)).collect()
}

/// Distinct tags across `items` (first-seen order) that contain `query`,
/// ignoring case, and are not already selected.
///
/// An empty query suggests nothing.
pub fn tag_suggestions(items: &[Post], selected: &BTreeSet<String>, query: &str) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    for tag in items.iter().flat_map(|p| p.tags.iter()) {
        if !seen.insert(tag.as_str()) {
            continue;
        }
        if selected.contains(tag) {
            continue;
        }
        if tag.to_lowercase().contains(&needle) {
            suggestions.push(tag.clone());
        }
    }

    suggestions
}

/// Append `incoming` to `items`, skipping ids already present (including
/// repeats within `incoming` itself). Returns how many posts were added.
pub fn merge_unique(items: &mut Vec<Post>, incoming: Vec<Post>) -> usize {
    let mut known: HashSet<PostId> = items.iter().map(|p| p.id).collect();
    let before = items.len();
    for post in incoming {
        if known.insert(post.id) {
            items.push(post);
        }
    }
    items.len() - before
}

/// Keep the first occurrence of each id, preserving order
pub fn dedup_by_id(posts: Vec<Post>) -> Vec<Post> {
    let mut items = Vec::with_capacity(posts.len());
    merge_unique(&mut items, posts);
    items
}
