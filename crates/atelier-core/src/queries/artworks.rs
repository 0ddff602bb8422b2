//! Artwork listings and lookups

use crate::client::{ContentClient, Prepared};
use crate::compat::any_profile_filter;
use crate::error::Result;
use crate::groq::{Bound, Filter, Operand, Path, Query};
use crate::models::{Artwork, DocType};
use crate::params::Params;
use crate::projection::{self, order};
use crate::resolver::references_any;
use crate::store::Backend;

use super::Page;

pub const FEATURED_LIMIT: usize = 6;

fn artworks() -> Filter {
    Filter::doc_type(DocType::Artwork)
}

/// `$param in <field>[]->slug.current`
fn tagged_with(field: &'static str, param: &'static str) -> Filter {
    Filter::In(
        Operand::Param(param),
        Operand::Path(Path::field(field).each().deref().dot("slug").dot("current")),
    )
}

/// One page of every artwork, newest first
pub fn all(page: Page) -> Prepared {
    Prepared::new(
        Query::new(artworks())
            .order_by(order::artworks())
            .range(Bound::Param("offset"), Bound::Param("end"))
            .project(projection::artwork()),
        format!("artworks [{}...{}]", page.offset, page.end()),
    )
    .with_params(
        Params::new()
            .bind("offset", page.offset)
            .bind("end", page.end()),
    )
}

pub fn featured(limit: usize) -> Prepared {
    Prepared::new(
        Query::new(artworks().and(Filter::is_true("isFeatured")))
            .order_by(order::featured())
            .range(Bound::At(0), Bound::Param("limit"))
            .project(projection::artwork()),
        "featured artworks",
    )
    .with_params(Params::new().bind("limit", limit))
}

pub fn by_slug(slug: &str) -> Prepared {
    Prepared::new(
        Query::new(artworks().and(Filter::slug_is("slug")))
            .first()
            .project(projection::artwork()),
        format!("artwork: {}", slug),
    )
    .with_params(Params::new().bind("slug", slug))
}

/// Artworks referencing the profile with this slug, in any field
pub fn by_person(slug: &str) -> Prepared {
    Prepared::new(
        Query::new(artworks().and(references_any(
            any_profile_filter().and(Filter::slug_is("personSlug")),
        )))
        .order_by(order::artworks())
        .project(projection::artwork()),
        format!("artworks by person: {}", slug),
    )
    .with_params(Params::new().bind("personSlug", slug))
}

/// Artworks of one project, in the project's manual order
pub fn by_project(slug: &str) -> Prepared {
    Prepared::new(
        Query::new(artworks().and(Filter::param_eq(
            Path::field("project").deref().dot("slug").dot("current"),
            "projectSlug",
        )))
        .order_by(order::artworks_in_project())
        .project(projection::artwork()),
        format!("artworks in project: {}", slug),
    )
    .with_params(Params::new().bind("projectSlug", slug))
}

pub fn by_technique(slug: &str) -> Prepared {
    Prepared::new(
        Query::new(artworks().and(tagged_with("techniques", "techniqueSlug")))
            .order_by(order::artworks())
            .project(projection::artwork()),
        format!("artworks by technique: {}", slug),
    )
    .with_params(Params::new().bind("techniqueSlug", slug))
}

pub fn by_tag(slug: &str) -> Prepared {
    Prepared::new(
        Query::new(artworks().and(tagged_with("tags", "tagSlug")))
            .order_by(order::artworks())
            .project(projection::artwork()),
        format!("artworks by tag: {}", slug),
    )
    .with_params(Params::new().bind("tagSlug", slug))
}

impl<B: Backend> ContentClient<B> {
    pub async fn get_all_artworks(&self, page: Page) -> Result<Vec<Artwork>> {
        self.run(all(page)).await
    }

    pub async fn get_featured_artworks(&self, limit: usize) -> Result<Vec<Artwork>> {
        self.run(featured(limit)).await
    }

    pub async fn get_artwork_by_slug(&self, slug: &str) -> Result<Option<Artwork>> {
        self.run(by_slug(slug)).await
    }

    pub async fn get_artworks_by_person(&self, slug: &str) -> Result<Vec<Artwork>> {
        self.run(by_person(slug)).await
    }

    pub async fn get_artworks_by_project(&self, slug: &str) -> Result<Vec<Artwork>> {
        self.run(by_project(slug)).await
    }

    pub async fn get_artworks_by_technique(&self, slug: &str) -> Result<Vec<Artwork>> {
        self.run(by_technique(slug)).await
    }

    pub async fn get_artworks_by_tag(&self, slug: &str) -> Result<Vec<Artwork>> {
        self.run(by_tag(slug)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_client;

    fn slugs(artworks: &[Artwork]) -> Vec<&str> {
        artworks.iter().filter_map(Artwork::slug).collect()
    }

    #[tokio::test]
    async fn test_all_artworks_paged() {
        let client = fixture_client();

        let all = client.get_all_artworks(Page::default()).await.unwrap();
        assert_eq!(
            slugs(&all),
            vec!["red-dawn", "ghost-print", "blue-hour", "salt-lines", "map-of-hours"]
        );

        let window = client.get_all_artworks(Page::new(2, 1)).await.unwrap();
        assert_eq!(slugs(&window), vec!["ghost-print", "blue-hour"]);

        let past_end = client.get_all_artworks(Page::new(10, 50)).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_featured_artworks() {
        let client = fixture_client();
        let featured = client.get_featured_artworks(FEATURED_LIMIT).await.unwrap();
        assert_eq!(slugs(&featured), vec!["red-dawn", "blue-hour", "ghost-print"]);

        let two = client.get_featured_artworks(2).await.unwrap();
        assert_eq!(slugs(&two), vec!["red-dawn", "blue-hour"]);
    }

    #[tokio::test]
    async fn test_artwork_by_slug_expands_references() {
        let client = fixture_client();
        let blue = client.get_artwork_by_slug("blue-hour").await.unwrap().unwrap();

        assert_eq!(blue.slug(), Some("blue-hour"));
        assert_eq!(blue.meta.doc_type, Some(DocType::Artwork));
        assert_eq!(blue.artists.len(), 1, "dangling artist dropped");
        assert_eq!(blue.artists[0].display_name(), "Dr. Ada Schork");
        assert_eq!(blue.artists[0].roles, vec!["Painter".to_string()]);
        assert_eq!(blue.media_types[0].title, "Video");
        assert_eq!(blue.techniques[0].title, "Cyanotype");
        assert_eq!(blue.project.as_ref().unwrap().title, "Tides");
        assert!(blue.primary_media().unwrap().is_image());

        assert!(client.get_artwork_by_slug("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_legacy_medium_and_dangling_project() {
        let client = fixture_client();

        let salt = client.get_artwork_by_slug("salt-lines").await.unwrap().unwrap();
        assert_eq!(salt.media_types.len(), 1);
        assert_eq!(salt.media_types[0].title, "Oil");
        assert_eq!(salt.techniques.len(), 1, "dangling technique dropped");

        let ghost = client.get_artwork_by_slug("ghost-print").await.unwrap().unwrap();
        assert!(ghost.project.is_none());
        assert!(ghost.media_types.is_empty());
    }

    #[tokio::test]
    async fn test_artworks_by_person() {
        let client = fixture_client();

        let ada = client.get_artworks_by_person("ada-schork").await.unwrap();
        assert_eq!(slugs(&ada), vec!["red-dawn", "blue-hour", "salt-lines"]);

        let max = client.get_artworks_by_person("max-ernst").await.unwrap();
        assert_eq!(slugs(&max), vec!["ghost-print"]);

        assert!(client.get_artworks_by_person("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_artworks_by_project_in_manual_order() {
        let client = fixture_client();
        let tides = client.get_artworks_by_project("tides").await.unwrap();
        assert_eq!(slugs(&tides), vec!["red-dawn", "blue-hour"]);
        assert!(client.get_artworks_by_project("quiet").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_artworks_by_technique_and_tag() {
        let client = fixture_client();

        let cyanotype = client.get_artworks_by_technique("cyanotype").await.unwrap();
        assert_eq!(slugs(&cyanotype), vec!["blue-hour", "salt-lines"]);

        let light = client.get_artworks_by_tag("light").await.unwrap();
        assert_eq!(slugs(&light), vec!["red-dawn", "blue-hour"]);

        assert!(client.get_artworks_by_tag("unknown").await.unwrap().is_empty());
    }

    #[test]
    fn test_query_text() {
        assert_eq!(
            by_project("tides").query.filter.to_string(),
            r#"_type == "artwork" && project->slug.current == $projectSlug"#
        );
        assert_eq!(
            by_tag("light").query.filter.to_string(),
            r#"_type == "artwork" && $tagSlug in tags[]->slug.current"#
        );
        assert_eq!(
            by_person("ada-schork").query.filter.to_string(),
            r#"_type == "artwork" && references(*[_type in ["person", "artist"] && slug.current == $personSlug]._id)"#
        );
        assert!(all(Page::default())
            .to_string()
            .contains("| order(year desc, orderRank asc) [$offset...$end]"));
    }
}
