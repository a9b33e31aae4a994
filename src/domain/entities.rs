//! Content records mirrored from the backend's JSON responses.
//!
//! Identifiers are opaque strings minted by the backend; timestamps arrive as
//! RFC 3339 and are kept in UTC. Unknown extra fields are ignored so a newer
//! backend never breaks an older console.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::items::ListItem;
use crate::domain::types::{ArticleStatus, GalleryState, ReleaseKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    pub status: ArticleStatus,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub scheduled_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub id: String,
    pub title: String,
    pub kind: ReleaseKind,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub release_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryRecord {
    pub id: String,
    pub title: String,
    pub state: GalleryState,
    #[serde(default)]
    pub image_count: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl ListItem for ArticleRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    /// Published time when present, creation time for drafts.
    fn primary_time(&self) -> OffsetDateTime {
        self.published_at.unwrap_or(self.created_at)
    }

    fn scheduled_time(&self) -> Option<OffsetDateTime> {
        self.scheduled_at
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl ListItem for ReleaseRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn primary_time(&self) -> OffsetDateTime {
        self.release_date
    }

    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl ListItem for GalleryRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn primary_time(&self) -> OffsetDateTime {
        self.created_at
    }
}
