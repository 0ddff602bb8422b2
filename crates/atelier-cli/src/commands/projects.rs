//! Project command handlers

use anyhow::Result;

use atelier_core::models::ProjectStatus;
use atelier_core::queries::projects;
use atelier_core::{Backend, Project};

use super::Session;

pub async fn list<B: Backend>(session: &Session<'_, B>, status: Option<ProjectStatus>) -> Result<()> {
    let prepared = match status {
        Some(status) => projects::by_status(status),
        None => projects::all(),
    };
    session.list::<Project>(prepared, "projects").await
}

pub async fn featured<B: Backend>(session: &Session<'_, B>, limit: usize) -> Result<()> {
    session
        .list::<Project>(projects::featured(limit), "featured projects")
        .await
}

/// Show a project with its artworks
pub async fn show<B: Backend>(session: &Session<'_, B>, slug: &str) -> Result<()> {
    session
        .show::<Project>(projects::by_slug(slug), "project", slug)
        .await
}
