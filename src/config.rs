//! Client configuration persistence
//!
//! Stores user preferences in `~/.config/basho/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::editable::DEFAULT_MAX_ENTRIES;
use crate::feed::DEFAULT_PAGE_SIZE;

/// Client configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the haiku backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Posts per feed page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum undo snapshots kept by the composer
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,

    /// HTTP timeout for every backend call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_history_depth() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            page_size: default_page_size(),
            history_depth: default_history_depth(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, api_url: Option<String>, page_size: Option<usize>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(size) = page_size {
            self.page_size = size.max(1);
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
