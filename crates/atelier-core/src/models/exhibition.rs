//! Exhibitions, the venues they happen at, and awards

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::artwork::ArtworkRef;
use super::common::{DocumentMeta, Geopoint, Image, Slug};
use super::person::PersonRef;
use super::portable_text::PortableText;
use super::project::ProjectRef;
use super::taxonomy::LocationType;
use super::{null_default, resolved};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExhibitionType {
    Solo,
    Group,
    Collaboration,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExhibitionStatus {
    Upcoming,
    Current,
    Past,
    #[serde(other)]
    Unknown,
}

impl ExhibitionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExhibitionStatus::Upcoming => "upcoming",
            ExhibitionStatus::Current => "current",
            ExhibitionStatus::Past => "past",
            ExhibitionStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressItem {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    pub publication: Option<String>,
    pub url: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub image: Image,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibition {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    pub slug: Option<Slug>,
    #[serde(rename = "type")]
    pub exhibition_type: Option<ExhibitionType>,
    pub status: Option<ExhibitionStatus>,
    pub main_image: Option<Image>,
    #[serde(default, deserialize_with = "null_default")]
    pub description: PortableText,
    #[serde(default, deserialize_with = "resolved")]
    pub curators: Vec<PersonRef>,
    /// Venue document; `venue`/`city`/`country` are the free-text fallback
    pub location: Option<LocationRef>,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "resolved")]
    pub artworks: Vec<ArtworkRef>,
    #[serde(default, deserialize_with = "resolved")]
    pub featured_projects: Vec<ProjectRef>,
    #[serde(default, deserialize_with = "resolved")]
    pub press: Vec<PressItem>,
    #[serde(default, deserialize_with = "resolved")]
    pub gallery: Vec<GalleryItem>,
    pub is_featured: Option<bool>,
}

impl Exhibition {
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_ref().map(Slug::as_str)
    }

    /// Best available venue label: the location document's name, else the free-text venue
    pub fn venue_name(&self) -> Option<&str> {
        self.location
            .as_ref()
            .map(|l| l.name.as_str())
            .filter(|name| !name.is_empty())
            .or(self.venue.as_deref())
    }
}

/// Exhibition row listed on a location page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitionSummary {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    pub slug: Option<Slug>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ExhibitionStatus>,
}

/// A physical venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    pub slug: Option<Slug>,
    pub location_type: Option<LocationType>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<Geopoint>,
    pub website: Option<String>,
    pub opening_hours: Option<String>,
    /// Detail view only: exhibitions held here, newest first
    #[serde(default, deserialize_with = "resolved")]
    pub exhibitions: Vec<ExhibitionSummary>,
}

impl Location {
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_ref().map(Slug::as_str)
    }
}

/// A location expanded inside an exhibition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRef {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    pub slug: Option<Slug>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<Geopoint>,
}

/// Recognition or prize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    pub slug: Option<Slug>,
    pub organization: Option<String>,
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "null_default")]
    pub description: PortableText,
    #[serde(default, deserialize_with = "resolved")]
    pub recipients: Vec<PersonRef>,
    pub artwork: Option<ArtworkRef>,
    pub is_major_award: Option<bool>,
}
