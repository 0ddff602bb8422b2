//! Awards

use crate::client::{ContentClient, Prepared};
use crate::compat::any_profile_filter;
use crate::error::Result;
use crate::groq::{Filter, Query};
use crate::models::{Award, DocType};
use crate::params::Params;
use crate::projection::{self, order};
use crate::resolver::references_any;
use crate::store::Backend;

pub fn all() -> Prepared {
    Prepared::new(
        Query::new(Filter::doc_type(DocType::Award))
            .order_by(order::awards())
            .project(projection::award()),
        "all awards",
    )
}

/// Awards referencing the profile with this slug, either generation
pub fn by_profile(slug: &str) -> Prepared {
    Prepared::new(
        Query::new(Filter::doc_type(DocType::Award).and(references_any(
            any_profile_filter().and(Filter::slug_is("slug")),
        )))
        .order_by(order::awards())
        .project(projection::award_summary()),
        format!("awards for: {}", slug),
    )
    .with_params(Params::new().bind("slug", slug))
}

impl<B: Backend> ContentClient<B> {
    pub async fn get_all_awards(&self) -> Result<Vec<Award>> {
        self.run(all()).await
    }

    pub async fn get_awards_by_profile(&self, slug: &str) -> Result<Vec<Award>> {
        self.run(by_profile(slug)).await
    }
}
