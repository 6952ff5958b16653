//! Where basho keeps its files
//!
//! Everything sits in one per-user directory: the YAML client config, the
//! JSON session written after sign-in, and the rolling log files.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "basho";

/// Per-user basho directory.
///
/// `$XDG_CONFIG_HOME/basho` when set, else `~/.config/basho`.
/// On Windows: `%APPDATA%\basho`.
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|base| base.join(APP_DIR))
    }
}

/// API url, page size and history depth
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// Bearer token and cached user; removed on logout
pub fn session_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("session.json"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the log directory if needed, returning its path
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    create_dir(&logs)?;
    Ok(logs)
}

fn create_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Cannot create {}: {}", path.display(), e))
}
