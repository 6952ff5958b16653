//! Compose surface: text with undo/redo, tags and a color token

use crate::editable::TextHistory;
use crate::model::NewPost;

/// A selectable background color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    /// Style token stored on the post
    pub token: &'static str,
}

/// Colors offered by the compose surface; the first is the default
pub static PALETTE: &[PaletteColor] = &[
    PaletteColor {
        name: "White",
        token: "bg-white/70",
    },
    PaletteColor {
        name: "Amber",
        token: "bg-amber-100/70",
    },
    PaletteColor {
        name: "Rose",
        token: "bg-rose-100/70",
    },
    PaletteColor {
        name: "Teal",
        token: "bg-teal-100/70",
    },
    PaletteColor {
        name: "Indigo",
        token: "bg-indigo-100/70",
    },
    PaletteColor {
        name: "Emerald",
        token: "bg-emerald-100/70",
    },
    PaletteColor {
        name: "Sky",
        token: "bg-sky-100/70",
    },
];

/// Look up a palette entry by name (case-insensitive) or by token
pub fn find_color(name_or_token: &str) -> Option<&'static PaletteColor> {
    PALETTE
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name_or_token) || c.token == name_or_token)
}

/// Read-only view of the compose surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerSnapshot {
    pub text: String,
    pub tags: Vec<String>,
    pub color: &'static str,
    pub word_count: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

#[derive(Debug, Clone)]
pub struct Composer {
    history: TextHistory,
    tags: Vec<String>,
    color: &'static PaletteColor,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    pub fn new() -> Self {
        Self::with_history_depth(crate::editable::DEFAULT_MAX_ENTRIES)
    }

    pub fn with_history_depth(depth: usize) -> Self {
        Self {
            history: TextHistory::with_max_entries(depth),
            tags: Vec::new(),
            color: &PALETTE[0],
        }
    }

    pub fn text(&self) -> &str {
        self.history.current_text()
    }

    pub fn history(&self) -> &TextHistory {
        &self.history
    }

    /// Replace the buffer contents (one undo step)
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.history.edit(value);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    /// Start a new document from `text`, forgetting history
    pub fn load_text(&mut self, text: impl Into<String>) {
        self.history.reset(text);
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Add a trimmed tag. Empty input and duplicates are ignored.
    pub fn add_tag(&mut self, input: &str) -> bool {
        let tag = input.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, index: usize) -> Option<String> {
        if index < self.tags.len() {
            Some(self.tags.remove(index))
        } else {
            None
        }
    }

    pub fn color(&self) -> &'static PaletteColor {
        self.color
    }

    /// Select a palette color by name or token. Unknown colors are rejected.
    pub fn select_color(&mut self, name_or_token: &str) -> bool {
        match find_color(name_or_token) {
            Some(color) => {
                self.color = color;
                true
            }
            None => false,
        }
    }

    pub fn word_count(&self) -> usize {
        self.text().split_whitespace().count()
    }

    /// Whether there is anything worth publishing
    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }

    pub fn to_new_post(&self, is_draft: bool) -> NewPost {
        NewPost {
            text: self.text().trim().to_string(),
            color: self.color.token.to_string(),
            tags: self.tags.clone(),
            is_draft,
        }
    }

    /// Reset everything after a successful publish
    pub fn clear(&mut self) {
        self.history.reset("");
        self.tags.clear();
        self.color = &PALETTE[0];
    }

    pub fn snapshot(&self) -> ComposerSnapshot {
        ComposerSnapshot {
            text: self.text().to_string(),
            tags: self.tags.clone(),
            color: self.color.token,
            word_count: self.word_count(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }
}
