//! Search command handler

use anyhow::Result;

use atelier_core::queries::search;
use atelier_core::{Backend, SearchPattern};

use super::Session;

/// Search artworks, projects and people for a term
///
/// A term with nothing searchable in it prints empty results.
pub async fn run<B: Backend>(session: &Session<'_, B>, term: &str) -> Result<()> {
    if session.explain {
        if let Some(pattern) = SearchPattern::contains(term) {
            session.output.print_explain(&[
                search::artworks(&pattern),
                search::projects(&pattern),
                search::people(&pattern),
            ])?;
        }
        return Ok(());
    }

    let results = session.client.search_content(term).await?;
    session.output.print_search(&results)
}
