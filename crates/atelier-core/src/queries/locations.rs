//! Venues

use crate::client::{ContentClient, Prepared};
use crate::error::Result;
use crate::groq::{Filter, Query};
use crate::models::{DocType, Location};
use crate::params::Params;
use crate::projection::{self, order};
use crate::store::Backend;

pub fn all() -> Prepared {
    Prepared::new(
        Query::new(Filter::doc_type(DocType::Location))
            .order_by(order::locations())
            .project(projection::location_list()),
        "all locations",
    )
}

/// Location with the exhibitions held there
pub fn by_slug(slug: &str) -> Prepared {
    Prepared::new(
        Query::new(Filter::doc_type(DocType::Location).and(Filter::slug_is("slug")))
            .first()
            .project(projection::location_detail()),
        format!("location: {}", slug),
    )
    .with_params(Params::new().bind("slug", slug))
}

impl<B: Backend> ContentClient<B> {
    pub async fn get_all_locations(&self) -> Result<Vec<Location>> {
        self.run(all()).await
    }

    pub async fn get_location_by_slug(&self, slug: &str) -> Result<Option<Location>> {
        self.run(by_slug(slug)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_client;

    #[tokio::test]
    async fn test_locations_by_name() {
        let locations = fixture_client().get_all_locations().await.unwrap();
        let names: Vec<_> = locations.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Atelier Schork", "KW Institute"]);
        assert!(locations.iter().all(|l| l.exhibitions.is_empty()));
    }

    #[tokio::test]
    async fn test_location_by_slug_lists_exhibitions() {
        let client = fixture_client();
        let kw = client.get_location_by_slug("kw-institute").await.unwrap().unwrap();

        assert_eq!(kw.slug(), Some("kw-institute"));
        assert_eq!(kw.meta.doc_type, Some(DocType::Location));
        assert_eq!(kw.location_type.as_ref().unwrap().title, "Gallery");
        let shown: Vec<_> = kw.exhibitions.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(shown, vec!["Winter Salon", "Salt and Light"]);

        assert!(client.get_location_by_slug("nowhere").await.unwrap().is_none());
    }
}
