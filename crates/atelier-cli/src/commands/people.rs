//! People command handlers

use anyhow::Result;

use atelier_core::queries::people;
use atelier_core::{Backend, Person};

use super::Session;

/// List all profiles, surname first
pub async fn list<B: Backend>(session: &Session<'_, B>) -> Result<()> {
    session.list::<Person>(people::all(), "people").await
}

/// Show one profile with its artworks, projects and exhibitions
pub async fn show<B: Backend>(session: &Session<'_, B>, slug: &str) -> Result<()> {
    session
        .show::<Person>(people::by_slug(slug), "person", slug)
        .await
}
