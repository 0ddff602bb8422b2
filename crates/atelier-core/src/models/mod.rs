//! Data models for Atelier
//!
//! Typed shapes of the documents returned by the query layer. Every struct
//! here mirrors a projection compiled in [`crate::projection`]: fields that a
//! projection names but the stored document lacks arrive as `null` and decode
//! to `None` or an empty collection.
//!
//! Expanded reference arrays drop entries whose target no longer exists, so a
//! deleted person simply disappears from an artwork's `artists`.

mod artwork;
mod common;
mod document;
mod exhibition;
mod media;
mod person;
pub mod portable_text;
mod project;
mod taxonomy;

pub use artwork::{Artwork, ArtworkRef, Availability};
pub use common::{
    Crop, DocType, DocumentMeta, FileAsset, Geopoint, Hotspot, Image, Reference, Slug,
    SocialMedia,
};
pub use document::Document;
pub use exhibition::{
    Award, Exhibition, ExhibitionStatus, ExhibitionSummary, ExhibitionType, GalleryItem,
    Location, LocationRef, PressItem,
};
pub use media::{primary_media, ImageMedia, MediaItem, VideoMedia, VimeoMedia, YoutubeMedia};
pub use person::{Education, Person, PersonRef, PersonalProject};
pub use portable_text::{Block, PortableText, Span};
pub use project::{Project, ProjectRef, ProjectStatus};
pub use taxonomy::{
    Category, CategoryRef, LocationType, MediaType, Medium, Role, SiteSettings, Tag,
    TaxonomyTerm, Technique,
};

use serde::{Deserialize, Deserializer};

/// Decode `null` as the type's default value
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode an array of expanded references, dropping dangling (`null`) entries
pub(crate) fn resolved<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<Option<T>>),
    One(T),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearOrDate {
    Year(i32),
    Date(String),
}

/// Decode a year stored as a number or as the year part of a `YYYY-MM-DD` date
///
/// A date whose year cannot be read decodes as `None`.
pub(crate) fn year_or_date<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<YearOrDate>::deserialize(deserializer)? {
        None => None,
        Some(YearOrDate::Year(year)) => Some(year),
        Some(YearOrDate::Date(date)) => date.split('-').next().and_then(|y| y.parse().ok()),
    })
}

/// Decode a field that holds either a single value or an array of them
pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(item)) => vec![item],
        Some(OneOrMany::Many(items)) => items.into_iter().flatten().collect(),
    })
}
