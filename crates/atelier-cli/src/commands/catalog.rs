//! Awards, locations, vocabularies and single documents

use anyhow::Result;
use clap::ValueEnum;

use atelier_core::models::SiteSettings;
use atelier_core::queries::{self, awards, locations, taxonomy};
use atelier_core::{Award, Backend, Category, DocType, Document, Location, TaxonomyTerm};

use super::Session;

/// A controlled vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Vocabulary {
    Roles,
    Mediums,
    MediaTypes,
    Techniques,
    Tags,
    LocationTypes,
    Categories,
    /// Top-level categories with their children
    Roots,
}

impl Vocabulary {
    /// Document type of a flat vocabulary; categories are hierarchical
    fn term_type(self) -> Option<DocType> {
        match self {
            Vocabulary::Roles => Some(DocType::Role),
            Vocabulary::Mediums => Some(DocType::Medium),
            Vocabulary::MediaTypes => Some(DocType::MediaType),
            Vocabulary::Techniques => Some(DocType::Technique),
            Vocabulary::Tags => Some(DocType::Tag),
            Vocabulary::LocationTypes => Some(DocType::LocationType),
            Vocabulary::Categories | Vocabulary::Roots => None,
        }
    }
}

/// List awards, or only those received by one profile
pub async fn awards<B: Backend>(session: &Session<'_, B>, profile: Option<&str>) -> Result<()> {
    let prepared = match profile {
        Some(slug) => awards::by_profile(slug),
        None => awards::all(),
    };
    session.list::<Award>(prepared, "awards").await
}

pub async fn locations<B: Backend>(session: &Session<'_, B>) -> Result<()> {
    session.list::<Location>(locations::all(), "locations").await
}

pub async fn location<B: Backend>(session: &Session<'_, B>, slug: &str) -> Result<()> {
    session
        .show::<Location>(locations::by_slug(slug), "location", slug)
        .await
}

pub async fn vocabulary<B: Backend>(session: &Session<'_, B>, vocabulary: Vocabulary) -> Result<()> {
    match (vocabulary, vocabulary.term_type()) {
        (_, Some(doc_type)) => {
            session
                .list::<TaxonomyTerm>(taxonomy::terms(doc_type), "terms")
                .await
        }
        (Vocabulary::Roots, None) => {
            session
                .list::<Category>(taxonomy::root_categories(), "root categories")
                .await
        }
        (_, None) => {
            session
                .list::<Category>(taxonomy::categories(), "categories")
                .await
        }
    }
}

pub async fn settings<B: Backend>(session: &Session<'_, B>) -> Result<()> {
    session
        .show::<SiteSettings>(taxonomy::site_settings(), "site settings", "siteSettings")
        .await
}

/// Show any document by id
pub async fn document<B: Backend>(session: &Session<'_, B>, id: &str) -> Result<()> {
    session
        .show::<Document>(queries::document_by_id(id), "document", id)
        .await
}
