//! Artwork command handlers

use anyhow::Result;

use atelier_core::queries::artworks;
use atelier_core::{Artwork, Backend, Page};

use super::Session;

/// Filter applied by `artworks list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    None,
    Person(String),
    Project(String),
    Technique(String),
    Tag(String),
}

pub async fn list<B: Backend>(session: &Session<'_, B>, filter: Filter, page: Page) -> Result<()> {
    let prepared = match &filter {
        Filter::None => artworks::all(page),
        Filter::Person(slug) => artworks::by_person(slug),
        Filter::Project(slug) => artworks::by_project(slug),
        Filter::Technique(slug) => artworks::by_technique(slug),
        Filter::Tag(slug) => artworks::by_tag(slug),
    };
    session.list::<Artwork>(prepared, "artworks").await
}

pub async fn featured<B: Backend>(session: &Session<'_, B>, limit: usize) -> Result<()> {
    session
        .list::<Artwork>(artworks::featured(limit), "featured artworks")
        .await
}

pub async fn show<B: Backend>(session: &Session<'_, B>, slug: &str) -> Result<()> {
    session
        .show::<Artwork>(artworks::by_slug(slug), "artwork", slug)
        .await
}
