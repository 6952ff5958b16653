//! Tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging feed
//! pagination and compose history transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=basho::feed=trace` - module-level filtering
//! - `RUST_LOG=basho::api=debug,basho::update=debug` - scoped filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/basho/logs/basho.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::feed::{FeedController, FeedStatus};

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr so it never mixes with command output.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "basho.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of feed state for diffing around an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedTrace {
    pub status: FeedStatus,
    pub held: usize,
    pub page_cursor: usize,
    pub has_more: bool,
    pub filters: usize,
}

impl FeedTrace {
    pub fn from_feed(feed: &FeedController) -> Self {
        Self {
            status: feed.status(),
            held: feed.items().len(),
            page_cursor: feed.page_cursor(),
            has_more: feed.has_more(),
            filters: feed.selected_tags().len(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &FeedTrace) -> Option<String> {
        let mut changes = Vec::new();
        if self.status != other.status {
            changes.push(format!("status: {:?} → {:?}", self.status, other.status));
        }
        if self.held != other.held {
            changes.push(format!("held: {} → {}", self.held, other.held));
        }
        if self.page_cursor != other.page_cursor {
            changes.push(format!("page: {} → {}", self.page_cursor, other.page_cursor));
        }
        if self.has_more != other.has_more {
            changes.push(format!("has_more: {} → {}", self.has_more, other.has_more));
        }
        if self.filters != other.filters {
            changes.push(format!("filters: {} → {}", self.filters, other.filters));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_reports_changes() {
        let mut feed = FeedController::new(Vec::new(), 10);
        let before = FeedTrace::from_feed(&feed);
        assert_eq!(before.diff(&before), None);

        feed.load_more();
        let after = FeedTrace::from_feed(&feed);
        assert_eq!(
            before.diff(&after).as_deref(),
            Some("status: Idle → Loading")
        );
    }
}
