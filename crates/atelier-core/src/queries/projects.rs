//! Projects

use crate::client::{ContentClient, Prepared};
use crate::error::Result;
use crate::groq::{Bound, Filter, Path, Query};
use crate::models::{DocType, Project, ProjectStatus};
use crate::params::Params;
use crate::projection::{self, order};
use crate::store::Backend;

pub const FEATURED_LIMIT: usize = 3;

fn projects() -> Filter {
    Filter::doc_type(DocType::Project)
}

pub fn all() -> Prepared {
    Prepared::new(
        Query::new(projects())
            .order_by(order::projects())
            .project(projection::project_list()),
        "all projects",
    )
}

pub fn featured(limit: usize) -> Prepared {
    Prepared::new(
        Query::new(projects().and(Filter::is_true("isFeatured")))
            .order_by(order::featured())
            .range(Bound::At(0), Bound::Param("limit"))
            .project(projection::project_list()),
        "featured projects",
    )
    .with_params(Params::new().bind("limit", limit))
}

/// Project detail including its artworks
pub fn by_slug(slug: &str) -> Prepared {
    Prepared::new(
        Query::new(projects().and(Filter::slug_is("slug")))
            .first()
            .project(projection::project_detail()),
        format!("project: {}", slug),
    )
    .with_params(Params::new().bind("slug", slug))
}

pub fn by_status(status: ProjectStatus) -> Prepared {
    Prepared::new(
        Query::new(projects().and(Filter::param_eq(Path::field("status"), "status")))
            .order_by(order::projects())
            .project(projection::project_list()),
        format!("projects with status: {}", status.as_str()),
    )
    .with_params(Params::new().bind("status", status.as_str()))
}

impl<B: Backend> ContentClient<B> {
    pub async fn get_all_projects(&self) -> Result<Vec<Project>> {
        self.run(all()).await
    }

    pub async fn get_featured_projects(&self, limit: usize) -> Result<Vec<Project>> {
        self.run(featured(limit)).await
    }

    pub async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        self.run(by_slug(slug)).await
    }

    pub async fn get_projects_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>> {
        self.run(by_status(status)).await
    }
}
