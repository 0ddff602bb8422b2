//! Vocabularies, categories and site settings

use crate::client::{ContentClient, Prepared};
use crate::error::Result;
use crate::groq::{Filter, Path, Query};
use crate::models::{
    Category, DocType, MediaType, Medium, Role, SiteSettings, Tag, TaxonomyTerm, Technique,
};
use crate::projection::{self, order};
use crate::store::Backend;

/// Every term of a flat vocabulary
///
/// Tags are listed alphabetically; the other vocabularies follow their manual
/// rank, then title.
pub fn terms(doc_type: DocType) -> Prepared {
    let sort = match doc_type {
        DocType::Tag => order::by_title(),
        _ => order::taxonomy(),
    };
    Prepared::new(
        Query::new(Filter::doc_type(doc_type))
            .order_by(sort)
            .project(projection::taxonomy_term()),
        format!("all {} terms", doc_type),
    )
}

pub fn categories() -> Prepared {
    Prepared::new(
        Query::new(Filter::doc_type(DocType::Category))
            .order_by(order::by_title())
            .project(projection::category_with_parent()),
        "all categories",
    )
}

/// Top-level categories with their direct children
pub fn root_categories() -> Prepared {
    Prepared::new(
        Query::new(
            Filter::doc_type(DocType::Category).and(!Filter::defined(Path::field("parent"))),
        )
        .order_by(order::by_title())
        .project(projection::category_with_children()),
        "root categories",
    )
}

pub fn site_settings() -> Prepared {
    Prepared::new(
        Query::new(Filter::doc_type(DocType::SiteSettings))
            .first()
            .project(projection::site_settings()),
        "site settings",
    )
}

impl<B: Backend> ContentClient<B> {
    /// Terms of any flat vocabulary type
    pub async fn get_terms(&self, doc_type: DocType) -> Result<Vec<TaxonomyTerm>> {
        self.run(terms(doc_type)).await
    }

    pub async fn get_all_roles(&self) -> Result<Vec<Role>> {
        self.get_terms(DocType::Role).await
    }

    pub async fn get_all_mediums(&self) -> Result<Vec<Medium>> {
        self.get_terms(DocType::Medium).await
    }

    pub async fn get_all_media_types(&self) -> Result<Vec<MediaType>> {
        self.get_terms(DocType::MediaType).await
    }

    pub async fn get_all_techniques(&self) -> Result<Vec<Technique>> {
        self.get_terms(DocType::Technique).await
    }

    pub async fn get_all_tags(&self) -> Result<Vec<Tag>> {
        self.get_terms(DocType::Tag).await
    }

    pub async fn get_all_categories(&self) -> Result<Vec<Category>> {
        self.run(categories()).await
    }

    pub async fn get_root_categories(&self) -> Result<Vec<Category>> {
        self.run(root_categories()).await
    }

    pub async fn get_site_settings(&self) -> Result<Option<SiteSettings>> {
        self.run(site_settings()).await
    }
}
