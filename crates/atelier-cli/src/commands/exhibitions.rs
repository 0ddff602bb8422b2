//! Exhibition command handlers

use anyhow::Result;

use atelier_core::models::ExhibitionStatus;
use atelier_core::queries::exhibitions;
use atelier_core::{Backend, Exhibition};

use super::Session;

/// List exhibitions, optionally only those with a given status
///
/// `limit` applies to past exhibitions only.
pub async fn list<B: Backend>(
    session: &Session<'_, B>,
    status: Option<ExhibitionStatus>,
    limit: usize,
) -> Result<()> {
    let prepared = match status {
        None | Some(ExhibitionStatus::Unknown) => exhibitions::all(),
        Some(ExhibitionStatus::Upcoming) => exhibitions::upcoming(),
        Some(ExhibitionStatus::Current) => exhibitions::current(),
        Some(ExhibitionStatus::Past) => exhibitions::past(limit),
    };
    session.list::<Exhibition>(prepared, "exhibitions").await
}

pub async fn show<B: Backend>(session: &Session<'_, B>, slug: &str) -> Result<()> {
    session
        .show::<Exhibition>(exhibitions::by_slug(slug), "exhibition", slug)
        .await
}
