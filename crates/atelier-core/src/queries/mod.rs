//! Public query surface
//!
//! Each submodule offers two layers per query:
//!
//! - a builder returning a [`Prepared`] query (used by `--explain` and tests)
//! - a `ContentClient` method that runs it and decodes the typed result
//!
//! Single-document lookups return `Ok(None)` for an unknown slug.

pub mod artworks;
pub mod awards;
pub mod exhibitions;
pub mod locations;
pub mod people;
pub mod projects;
pub mod search;
pub mod taxonomy;

use crate::client::{ContentClient, Prepared};
use crate::error::Result;
use crate::groq::{Filter, Path, Query};
use crate::models::Document;
use crate::params::Params;
use crate::projection;
use crate::store::Backend;

pub use search::SearchResults;

/// A window over an ordered result list, `[offset, offset + limit)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    pub const DEFAULT_LIMIT: usize = 100;

    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Exclusive end index
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, 0)
    }
}

/// Any document by id, shaped by its type's detail projection
pub fn document_by_id(id: &str) -> Prepared {
    Prepared::new(
        Query::new(Filter::param_eq(Path::field("_id"), "id"))
            .first()
            .project(projection::document()),
        format!("document: {}", id),
    )
    .with_params(Params::new().bind("id", id))
}

impl<B: Backend> ContentClient<B> {
    pub async fn get_document(&self, id: &str) -> Result<Option<Document>> {
        self.run(document_by_id(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_client;

    #[test]
    fn test_page_bounds() {
        let page = Page::default();
        assert_eq!((page.offset, page.end()), (0, 100));
        assert_eq!(Page::new(10, 20).end(), 30);
        assert_eq!(Page::new(usize::MAX, 1).end(), usize::MAX);
    }

    #[tokio::test]
    async fn test_get_document_dispatches_on_type() {
        let client = fixture_client();

        let project = client.get_document("project-tides").await.unwrap().unwrap();
        assert!(project.is_project());
        let crate::models::Document::Project(project) = project else {
            unreachable!()
        };
        assert_eq!(project.artwork_count as usize, project.artworks.len());

        let tag = client.get_document("tag-light").await.unwrap().unwrap();
        assert!(tag.is_taxonomy());
        assert_eq!(tag.label(), "Light");

        let artist = client.get_document("artist-max").await.unwrap().unwrap();
        assert!(artist.is_person());

        assert!(client.get_document("drafts.person-ada").await.unwrap().is_none());
        assert!(client.get_document("missing").await.unwrap().is_none());
    }
}
