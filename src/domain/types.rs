//! Shared domain enumerations aligned with the backend's wire values.

use serde::{Deserialize, Serialize};

/// The content collection a list view is bound to. Also namespaces persisted
/// per-view preferences, so two open views never clobber each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Articles,
    TheaterReleases,
    OttReleases,
    Galleries,
}

impl ViewKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Articles => "articles",
            ViewKind::TheaterReleases => "theater_releases",
            ViewKind::OttReleases => "ott_releases",
            ViewKind::Galleries => "galleries",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    Draft,
    Published,
    Scheduled,
    Archived,
}

impl ArticleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Published => "published",
            ArticleStatus::Scheduled => "scheduled",
            ArticleStatus::Archived => "archived",
        }
    }
}

impl TryFrom<&str> for ArticleStatus {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "draft" => Ok(ArticleStatus::Draft),
            "published" => Ok(ArticleStatus::Published),
            "scheduled" => Ok(ArticleStatus::Scheduled),
            "archived" => Ok(ArticleStatus::Archived),
            _ => Err(()),
        }
    }
}

/// Release channel: theatrical runs and OTT premieres share a record shape
/// but live under separate endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseKind {
    Theater,
    Ott,
}

impl ReleaseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseKind::Theater => "theater",
            ReleaseKind::Ott => "ott",
        }
    }

    pub fn view_kind(self) -> ViewKind {
        match self {
            ReleaseKind::Theater => ViewKind::TheaterReleases,
            ReleaseKind::Ott => ViewKind::OttReleases,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryState {
    Active,
    Hidden,
}

impl GalleryState {
    pub fn as_str(self) -> &'static str {
        match self {
            GalleryState::Active => "active",
            GalleryState::Hidden => "hidden",
        }
    }
}
