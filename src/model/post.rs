//! Post and user payloads exchanged with the haiku backend
//!
//! Field names follow the backend's JSON shape (`likes_count`, `date`,
//! `is_draft`), so these types deserialize API responses directly.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Unique post identifier assigned by the backend
pub type PostId = i64;

/// Unique user identifier assigned by the backend
pub type UserId = i64;

/// Public summary of a user, as embedded in every post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A published (or draft) haiku
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub text: String,
    /// Display order is preserved; filtering treats these as a set
    #[serde(default, deserialize_with = "non_empty_tags")]
    pub tags: Vec<String>,
    /// Opaque style token, passed through unmodified
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub likes_count: u32,
    pub owner: User,
    #[serde(deserialize_with = "utc_timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub is_draft: bool,
}

impl Post {
    /// True if every tag in `selected` is carried by this post
    pub fn has_all_tags(&self, selected: &BTreeSet<String>) -> bool {
        selected
            .iter()
            .all(|tag| self.tags.iter().any(|own| own == tag))
    }

    /// Number of lines in the poem body
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

/// The backend stores untagged posts as `""`, which comes back as `[""]`
fn non_empty_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = Vec::<String>::deserialize(deserializer)?;
    Ok(tags.into_iter().filter(|t| !t.trim().is_empty()).collect())
}

/// Accepts RFC 3339 timestamps as well as naive ones, which are taken as UTC
fn utc_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

/// Request body for creating a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub text: String,
    pub color: String,
    pub tags: Vec<String>,
    pub is_draft: bool,
}
