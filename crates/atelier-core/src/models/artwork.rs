//! Artworks

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{DocumentMeta, Slug};
use super::media::{primary_media, MediaItem};
use super::person::PersonRef;
use super::portable_text::PortableText;
use super::project::ProjectRef;
use super::taxonomy::{MediaType, Tag, Technique};
use super::{null_default, one_or_many, resolved};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Availability {
    Available,
    Sold,
    NotForSale,
    Private,
    #[serde(other)]
    Unknown,
}

/// A single art piece with its expanded references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    pub slug: Option<Slug>,
    /// Credited people, in editorial order
    #[serde(default, deserialize_with = "resolved")]
    pub artists: Vec<PersonRef>,
    pub year: Option<i32>,
    pub creation_date: Option<NaiveDate>,
    /// One or many media types; older documents hold a single `medium`
    #[serde(default, deserialize_with = "one_or_many")]
    pub media_types: Vec<MediaType>,
    #[serde(default, deserialize_with = "resolved")]
    pub techniques: Vec<Technique>,
    #[serde(default, deserialize_with = "resolved")]
    pub tags: Vec<Tag>,
    #[serde(default, deserialize_with = "null_default")]
    pub description: PortableText,
    pub dimensions: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub media: Vec<MediaItem>,
    pub is_primary_artwork: Option<bool>,
    pub is_featured: Option<bool>,
    pub credits: Option<String>,
    pub project: Option<ProjectRef>,
    #[serde(default, deserialize_with = "resolved")]
    pub related_artworks: Vec<ArtworkRef>,
    pub price: Option<f64>,
    pub availability: Option<Availability>,
    /// Where the piece is kept, free text
    pub location: Option<String>,
    pub order_rank: Option<f64>,
}

impl Artwork {
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_ref().map(Slug::as_str)
    }

    pub fn primary_media(&self) -> Option<&MediaItem> {
        primary_media(&self.media)
    }
}

/// An artwork expanded inside another document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkRef {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    pub slug: Option<Slug>,
    #[serde(default, deserialize_with = "null_default")]
    pub media: Vec<MediaItem>,
}
