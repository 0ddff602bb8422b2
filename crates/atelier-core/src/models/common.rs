//! Value types shared by every document

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document type discriminator (`_type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocType {
    Person,
    /// Retired profile generation, superseded by `Person`
    Artist,
    Artwork,
    Project,
    Exhibition,
    Award,
    Location,
    Role,
    Medium,
    MediaType,
    Technique,
    Tag,
    Category,
    LocationType,
    SiteSettings,
}

impl DocType {
    pub const ALL: [DocType; 15] = [
        DocType::Person,
        DocType::Artist,
        DocType::Artwork,
        DocType::Project,
        DocType::Exhibition,
        DocType::Award,
        DocType::Location,
        DocType::Role,
        DocType::Medium,
        DocType::MediaType,
        DocType::Technique,
        DocType::Tag,
        DocType::Category,
        DocType::LocationType,
        DocType::SiteSettings,
    ];

    /// The `_type` string stored in the dataset
    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Person => "person",
            DocType::Artist => "artist",
            DocType::Artwork => "artwork",
            DocType::Project => "project",
            DocType::Exhibition => "exhibition",
            DocType::Award => "award",
            DocType::Location => "location",
            DocType::Role => "role",
            DocType::Medium => "medium",
            DocType::MediaType => "mediaType",
            DocType::Technique => "technique",
            DocType::Tag => "tag",
            DocType::Category => "category",
            DocType::LocationType => "locationType",
            DocType::SiteSettings => "siteSettings",
        }
    }

    /// Flat labelled vocabularies
    pub fn is_taxonomy(self) -> bool {
        matches!(
            self,
            DocType::Role
                | DocType::Medium
                | DocType::MediaType
                | DocType::Technique
                | DocType::Tag
                | DocType::LocationType
        )
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown document type: {}", s))
    }
}

/// System fields every document carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_type", default)]
    pub doc_type: Option<DocType>,
    #[serde(rename = "_createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "_updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "_rev", default)]
    pub rev: Option<String>,
}

impl DocumentMeta {
    pub fn new(id: impl Into<String>, doc_type: DocType) -> Self {
        Self {
            id: id.into(),
            doc_type: Some(doc_type),
            created_at: None,
            updated_at: None,
            rev: None,
        }
    }
}

/// Human-readable per-type unique key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slug {
    pub current: String,
}

impl Slug {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.current
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.current)
    }
}

/// An id-only pointer to another document or asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "_ref")]
    pub id: String,
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "_weak", default, skip_serializing_if = "Option::is_none")]
    pub weak: Option<bool>,
}

impl Reference {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            key: None,
            weak: None,
        }
    }
}

/// Focal point of an image, in fractions of its size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub width: f64,
}

/// Crop insets, in fractions of the image size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// An image field: asset reference plus editorial metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub asset: Option<Reference>,
    pub alt: Option<String>,
    pub caption: Option<String>,
    pub hotspot: Option<Hotspot>,
    pub crop: Option<Crop>,
}

impl Image {
    /// The asset reference id, e.g. `image-abc123-800x600-jpg`
    pub fn asset_ref(&self) -> Option<&str> {
        self.asset.as_ref().map(|r| r.id.as_str())
    }
}

/// A file field (video upload, CV, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileAsset {
    pub asset: Option<Reference>,
}

impl FileAsset {
    /// The asset reference id, e.g. `file-abc123-pdf`
    pub fn asset_ref(&self) -> Option<&str> {
        self.asset.as_ref().map(|r| r.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geopoint {
    pub lat: f64,
    pub lng: f64,
    pub alt: Option<f64>,
}

/// Social media handles or URLs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialMedia {
    pub instagram: Option<String>,
    pub vimeo: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub other: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_doc_type_round_trips_through_str() {
        for t in DocType::ALL {
            assert_eq!(t.as_str().parse::<DocType>().unwrap(), t);
            let json = serde_json::to_value(t).unwrap();
            assert_eq!(json, json!(t.as_str()));
        }
        assert!("sanity.imageAsset".parse::<DocType>().is_err());
    }

    #[test]
    fn test_taxonomy_types() {
        assert!(DocType::MediaType.is_taxonomy());
        assert!(DocType::LocationType.is_taxonomy());
        assert!(!DocType::Category.is_taxonomy());
        assert!(!DocType::Person.is_taxonomy());
    }

    #[test]
    fn test_meta_decodes_system_fields() {
        let meta: DocumentMeta = serde_json::from_value(json!({
            "_id": "person-1",
            "_type": "person",
            "_createdAt": "2024-03-01T10:00:00Z",
            "_updatedAt": null
        }))
        .unwrap();

        assert_eq!(meta.id, "person-1");
        assert_eq!(meta.doc_type, Some(DocType::Person));
        assert!(meta.created_at.is_some());
        assert!(meta.updated_at.is_none());
    }

    #[test]
    fn test_image_asset_ref() {
        let image: Image = serde_json::from_value(json!({
            "_type": "image",
            "asset": {"_type": "reference", "_ref": "image-abc-10x10-png"}
        }))
        .unwrap();
        assert_eq!(image.asset_ref(), Some("image-abc-10x10-png"));
        assert_eq!(Image::default().asset_ref(), None);
    }
}
