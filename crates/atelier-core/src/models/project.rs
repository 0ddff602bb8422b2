//! Projects: groupings of related work

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::artwork::Artwork;
use super::common::{DocumentMeta, Image, Slug};
use super::media::MediaItem;
use super::person::PersonRef;
use super::portable_text::PortableText;
use super::taxonomy::Tag;
use super::{null_default, resolved};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
    Cancelled,
    Archived,
    /// A status this version does not know
    #[serde(other)]
    Unknown,
}

impl ProjectStatus {
    /// Every known status
    pub const ALL: [ProjectStatus; 5] = [
        ProjectStatus::Planning,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Cancelled,
        ProjectStatus::Archived,
    ];

    /// Stored value
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::InProgress => "inProgress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
            ProjectStatus::Archived => "archived",
            ProjectStatus::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown project status: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    pub slug: Option<Slug>,
    pub status: Option<ProjectStatus>,
    #[serde(default, deserialize_with = "null_default")]
    pub description: PortableText,
    #[serde(default, deserialize_with = "resolved")]
    pub creators: Vec<PersonRef>,
    #[serde(default, deserialize_with = "resolved")]
    pub collaborators: Vec<PersonRef>,
    pub cover_image: Option<Image>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub website: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub media: Vec<MediaItem>,
    #[serde(default, deserialize_with = "resolved")]
    pub tags: Vec<Tag>,
    pub is_featured: Option<bool>,
    pub order_rank: Option<f64>,
    /// Number of artworks pointing at this project, counted per fetch
    #[serde(default, deserialize_with = "null_default")]
    pub artwork_count: u32,
    /// Detail view only
    #[serde(default, deserialize_with = "resolved")]
    pub artworks: Vec<Artwork>,
}

impl Project {
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_ref().map(Slug::as_str)
    }
}

/// A project expanded inside another document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRef {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    pub slug: Option<Slug>,
    pub cover_image: Option<Image>,
}
