//! The general document union

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::artwork::Artwork;
use super::common::{DocType, DocumentMeta};
use super::exhibition::{Award, Exhibition, Location};
use super::person::Person;
use super::project::Project;
use super::taxonomy::{Category, SiteSettings, TaxonomyTerm};

/// Any published document, narrowed by its `_type`
///
/// Retired `artist` documents decode as [`Document::Person`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Person(Person),
    Artwork(Artwork),
    Project(Project),
    Exhibition(Exhibition),
    Award(Award),
    Location(Location),
    Category(Category),
    /// Role, Medium, MediaType, Technique, Tag or LocationType
    Taxonomy(TaxonomyTerm),
    SiteSettings(SiteSettings),
}

impl Document {
    pub fn meta(&self) -> &DocumentMeta {
        match self {
            Document::Person(d) => &d.meta,
            Document::Artwork(d) => &d.meta,
            Document::Project(d) => &d.meta,
            Document::Exhibition(d) => &d.meta,
            Document::Award(d) => &d.meta,
            Document::Location(d) => &d.meta,
            Document::Category(d) => &d.meta,
            Document::Taxonomy(d) => &d.meta,
            Document::SiteSettings(d) => &d.meta,
        }
    }

    pub fn id(&self) -> &str {
        &self.meta().id
    }

    /// Short human label: a name or a title
    pub fn label(&self) -> String {
        match self {
            Document::Person(d) => d.display_name(),
            Document::Artwork(d) => d.title.clone(),
            Document::Project(d) => d.title.clone(),
            Document::Exhibition(d) => d.title.clone(),
            Document::Award(d) => d.title.clone(),
            Document::Location(d) => d.name.clone(),
            Document::Category(d) => d.title.clone(),
            Document::Taxonomy(d) => d.title.clone(),
            Document::SiteSettings(d) => d.title.clone(),
        }
    }

    pub fn is_person(&self) -> bool {
        matches!(self, Document::Person(_))
    }

    pub fn is_artwork(&self) -> bool {
        matches!(self, Document::Artwork(_))
    }

    pub fn is_project(&self) -> bool {
        matches!(self, Document::Project(_))
    }

    pub fn is_exhibition(&self) -> bool {
        matches!(self, Document::Exhibition(_))
    }

    pub fn is_award(&self) -> bool {
        matches!(self, Document::Award(_))
    }

    pub fn is_location(&self) -> bool {
        matches!(self, Document::Location(_))
    }

    /// Flat vocabularies and categories
    pub fn is_taxonomy(&self) -> bool {
        matches!(self, Document::Taxonomy(_) | Document::Category(_))
    }

    pub fn is_site_settings(&self) -> bool {
        matches!(self, Document::SiteSettings(_))
    }
}

impl TryFrom<Value> for Document {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let doc_type = value
            .get("_type")
            .and_then(Value::as_str)
            .ok_or_else(|| serde_json::Error::custom("document has no _type"))?
            .parse::<DocType>()
            .map_err(serde_json::Error::custom)?;

        Ok(match doc_type {
            DocType::Person | DocType::Artist => Document::Person(serde_json::from_value(value)?),
            DocType::Artwork => Document::Artwork(serde_json::from_value(value)?),
            DocType::Project => Document::Project(serde_json::from_value(value)?),
            DocType::Exhibition => Document::Exhibition(serde_json::from_value(value)?),
            DocType::Award => Document::Award(serde_json::from_value(value)?),
            DocType::Location => Document::Location(serde_json::from_value(value)?),
            DocType::Category => Document::Category(serde_json::from_value(value)?),
            DocType::SiteSettings => Document::SiteSettings(serde_json::from_value(value)?),
            DocType::Role
            | DocType::Medium
            | DocType::MediaType
            | DocType::Technique
            | DocType::Tag
            | DocType::LocationType => Document::Taxonomy(serde_json::from_value(value)?),
        })
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::try_from(value).map_err(D::Error::custom)
    }
}
