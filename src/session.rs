//! Signed-in session state
//!
//! The session is an explicit value: created at start-up (optionally from
//! `~/.config/basho/session.json`), passed to whatever needs authenticated
//! calls, and cleared on logout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::User;

/// Access token plus the user it belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    /// Where this session is persisted; not serialized
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Session {
    /// Anonymous session with no backing file
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Load the persisted session, or start anonymous
    pub fn load() -> Self {
        match crate::config_paths::session_file() {
            Some(path) => Self::load_from(path),
            None => Self::anonymous(),
        }
    }

    /// Load a session from `path`; unreadable files yield an anonymous
    /// session that will still save back to `path`
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut session = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Session>(&contents) {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!("Discarding unreadable session at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        session.path = Some(path);
        session
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record a fresh token; the user is filled in once fetched
    pub fn sign_in(&mut self, token: String) {
        self.token = Some(token);
        self.user = None;
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Forget the token and user, deleting the persisted copy
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
        if let Some(path) = &self.path {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    tracing::warn!("Failed to remove session at {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Persist the session (no-op for sessions without a backing file)
    pub fn save(&self) -> Result<(), String> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create session directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize session: {}", e))?;
        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write session to {}: {}", path.display(), e))?;

        tracing::debug!("Saved session to {}", path.display());
        Ok(())
    }

    /// Display name for prompts and status lines
    pub fn display_name(&self) -> &str {
        match (&self.user, &self.token) {
            (Some(user), _) => &user.username,
            (None, Some(_)) => "(signed in)",
            (None, None) => "(anonymous)",
        }
    }
}
