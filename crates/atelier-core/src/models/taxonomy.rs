//! Vocabularies and site settings
//!
//! Role, Medium, MediaType, Technique, Tag and LocationType share one shape
//! and differ only by `_type`. Category adds a self-referencing parent.

use serde::{Deserialize, Serialize};

use super::common::{DocumentMeta, Slug, SocialMedia};
use super::portable_text::PortableText;
use super::{null_default, resolved};

/// A labelled vocabulary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyTerm {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    pub description: Option<String>,
    pub slug: Option<Slug>,
    /// Manual sort position
    pub order_rank: Option<f64>,
}

pub type Role = TaxonomyTerm;
pub type Medium = TaxonomyTerm;
pub type MediaType = TaxonomyTerm;
pub type Technique = TaxonomyTerm;
pub type Tag = TaxonomyTerm;
pub type LocationType = TaxonomyTerm;

/// Hierarchical category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    pub slug: Option<Slug>,
    pub description: Option<String>,
    pub parent: Option<CategoryRef>,
    /// Categories whose parent is this one; filled only by the root-category query
    #[serde(default, deserialize_with = "resolved")]
    pub children: Vec<CategoryRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    pub slug: Option<Slug>,
}

/// Singleton site configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub social_media: Option<SocialMedia>,
    #[serde(default, deserialize_with = "null_default")]
    pub footer_text: PortableText,
}
