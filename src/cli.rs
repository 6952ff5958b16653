//! Command-line argument parsing
//!
//! Supports:
//! - Browsing the feed with tag filters and extra pages
//! - Tag suggestions
//! - Signing in, signing up and out
//! - Publishing haikus and drafts
//! - Liking posts and viewing profiles

use clap::{Parser, Subcommand, ValueEnum};

use crate::composer::find_color;
use crate::model::{PostId, ProfileTab, UserId};

/// A terminal client for a haiku feed
#[derive(Parser, Debug)]
#[command(name = "basho", version, about = "A terminal client for a haiku feed")]
pub struct CliArgs {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Posts per page (overrides the config file)
    #[arg(long, global = true, value_name = "N")]
    pub page_size: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the feed
    Feed {
        /// Only show posts carrying this tag (repeatable)
        #[arg(short = 't', long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Number of pages to load
        #[arg(short = 'p', long, default_value_t = 1, value_name = "N")]
        pages: usize,
    },
    /// Suggest tags from the loaded feed
    Tags {
        /// Case-insensitive substring to match
        query: String,

        /// Tags already selected (excluded from suggestions)
        #[arg(short = 't', long = "tag", value_name = "TAG")]
        selected: Vec<String>,
    },
    /// Sign in and remember the session
    Login {
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        username: String,
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Publish a haiku; each argument is one line
    Publish {
        #[arg(required = true, value_name = "LINE")]
        lines: Vec<String>,

        #[arg(short = 't', long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Palette color by name (White, Amber, Rose, Teal, Indigo, Emerald, Sky)
        #[arg(short = 'c', long, default_value = "White")]
        color: String,

        /// Save as a draft instead of publishing
        #[arg(long)]
        draft: bool,
    },
    /// Toggle your like on a post
    Like { post_id: PostId },
    /// Show a profile (your own when no id is given)
    Profile {
        user_id: Option<UserId>,

        #[arg(long, value_enum, default_value_t = TabArg::Posts)]
        tab: TabArg,
    },
    /// Print the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Feed {
            tags: Vec::new(),
            pages: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TabArg {
    Posts,
    Liked,
    Drafts,
}

impl From<TabArg> for ProfileTab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Posts => ProfileTab::Posts,
            TabArg::Liked => ProfileTab::Liked,
            TabArg::Drafts => ProfileTab::Drafts,
        }
    }
}

impl CliArgs {
    /// Reject argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.page_size == Some(0) {
            return Err("--page-size must be at least 1".to_string());
        }
        match &self.command {
            Some(Command::Feed { pages: 0, .. }) => {
                Err("--pages must be at least 1".to_string())
            }
            Some(Command::Publish { color, .. }) if find_color(color).is_none() => {
                Err(format!("Unknown color: {}", color))
            }
            Some(Command::Profile { user_id: Some(_), tab, .. }) if *tab != TabArg::Posts => {
                Err("Only your own profile has liked and draft tabs".to_string())
            }
            _ => Ok(()),
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }
}

/// Join positional lines into haiku text
pub fn haiku_text(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join("\n")
}
