use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::genre::Genre;

/// A single pinned contribution. The authoritative copy lives server-side;
/// this is the in-memory representation every projection works on.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub post_id: i64,
    pub place_id: i64,
    pub user_id: String,
    pub title: String,
    pub text: String,
    pub genre_id: i32,
    pub num_reaction: u32,
    #[serde(default)]
    pub num_view: u32,
    /// Kept as the raw server string so a single unparsable date degrades
    /// date filtering for that post only, not the whole payload.
    pub post_date: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl Post {
    /// The backend emits RFC 3339 for new rows and a bare
    /// `%Y-%m-%d %H:%M:%S` for migrated ones.
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.post_date) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.post_date, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|dt| dt.and_utc())
    }

    pub fn genre(&self) -> Genre {
        Genre::from(self.genre_id)
    }
}

/// Input for the optimistic creation flow.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub text: String,
    pub genre: Genre,
    pub images: Vec<String>,
}
