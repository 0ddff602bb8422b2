//! Person profiles, both schema generations

use crate::client::{ContentClient, Prepared};
use crate::compat::profile_filter;
use crate::error::Result;
use crate::groq::{Filter, Query};
use crate::models::Person;
use crate::params::Params;
use crate::projection::{self, order};
use crate::store::Backend;

pub fn all() -> Prepared {
    Prepared::new(
        Query::new(profile_filter())
            .order_by(order::people())
            .project(projection::person_list()),
        "all people",
    )
}

/// Full profile with the artworks, projects and exhibitions referencing it
pub fn by_slug(slug: &str) -> Prepared {
    Prepared::new(
        Query::new(profile_filter().and(Filter::slug_is("slug")))
            .first()
            .project(projection::person_detail()),
        format!("person: {}", slug),
    )
    .with_params(Params::new().bind("slug", slug))
}

impl<B: Backend> ContentClient<B> {
    pub async fn get_all_people(&self) -> Result<Vec<Person>> {
        self.run(all()).await
    }

    pub async fn get_person_by_slug(&self, slug: &str) -> Result<Option<Person>> {
        self.run(by_slug(slug)).await
    }
}
