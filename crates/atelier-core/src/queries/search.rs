//! Free-text search across artworks, projects and people
//!
//! The three category queries run concurrently and share one bound pattern.
//! If any of them fails the whole search fails; there are no partial results.

use futures_util::future::try_join3;
use serde::Serialize;

use crate::client::{ContentClient, Prepared};
use crate::compat::profile_filter;
use crate::error::Result;
use crate::groq::{Bound, Filter, Operand, Order, Path, Projection, Query};
use crate::models::{Artwork, DocType, Person, Project};
use crate::params::{Params, SearchPattern};
use crate::projection::{self, order};
use crate::store::Backend;

/// Results kept per category
pub const SEARCH_LIMIT: usize = 10;

const TERM: &str = "searchTerm";

/// Matches, artworks first, then projects, then people
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub artworks: Vec<Artwork>,
    pub projects: Vec<Project>,
    pub people: Vec<Person>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty() && self.projects.is_empty() && self.people.is_empty()
    }

    pub fn len(&self) -> usize {
        self.artworks.len() + self.projects.len() + self.people.len()
    }
}

fn matches(field: &'static str) -> Filter {
    Filter::Match(Operand::field(field), Operand::Param(TERM))
}

fn text_matches(field: &'static str) -> Filter {
    Filter::Match(Operand::PlainText(Path::field(field)), Operand::Param(TERM))
}

fn category(
    filter: Filter,
    order: Vec<Order>,
    projection: Projection,
    label: &str,
    pattern: &SearchPattern,
) -> Prepared {
    Prepared::new(
        Query::new(filter)
            .order_by(order)
            .range(Bound::At(0), Bound::At(SEARCH_LIMIT))
            .project(projection),
        format!("search {}: {}", label, pattern.as_str()),
    )
    .with_params(Params::new().bind(TERM, pattern.clone()))
}

pub fn artworks(pattern: &SearchPattern) -> Prepared {
    category(
        Filter::doc_type(DocType::Artwork)
            .and(Filter::any(vec![matches("title"), text_matches("description")])),
        vec![Order::desc("year")],
        projection::artwork(),
        "artworks",
        pattern,
    )
}

pub fn projects(pattern: &SearchPattern) -> Prepared {
    category(
        Filter::doc_type(DocType::Project)
            .and(Filter::any(vec![matches("title"), text_matches("description")])),
        order::projects(),
        projection::project_list(),
        "projects",
        pattern,
    )
}

pub fn people(pattern: &SearchPattern) -> Prepared {
    category(
        profile_filter().and(Filter::any(vec![
            matches("firstName"),
            matches("lastName"),
            text_matches("biography"),
        ])),
        order::people(),
        projection::person_list(),
        "people",
        pattern,
    )
}

impl<B: Backend> ContentClient<B> {
    /// Case-insensitive search of titles, names and rich-text bodies
    ///
    /// A term with nothing searchable in it (empty, blank or only wildcards)
    /// yields empty results without querying the store.
    pub async fn search_content(&self, term: &str) -> Result<SearchResults> {
        let Some(pattern) = SearchPattern::contains(term) else {
            return Ok(SearchResults::default());
        };

        let (artworks, projects, people) = try_join3(
            self.run(artworks(&pattern)),
            self.run(projects(&pattern)),
            self.run(people(&pattern)),
        )
        .await?;

        Ok(SearchResults {
            artworks,
            projects,
            people,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::error::Error;
    use crate::store::MemoryStore;
    use crate::testing::{fixture_client, fixture_documents, shadowed_fixture_client, FailingBackend};
    use serde_json::json;

    #[tokio::test]
    async fn test_search_matches_titles_and_rich_text() {
        let results = fixture_client().search_content("salt").await.unwrap();

        let artworks: Vec<_> = results.artworks.iter().filter_map(Artwork::slug).collect();
        assert_eq!(artworks, vec!["blue-hour", "salt-lines"]);
        let projects: Vec<_> = results.projects.iter().filter_map(Project::slug).collect();
        assert_eq!(projects, vec!["tides"]);
        let people: Vec<_> = results.people.iter().filter_map(Person::slug).collect();
        assert_eq!(people, vec!["ada-schork"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_finds_names() {
        let results = fixture_client().search_content("ERNST").await.unwrap();
        assert!(results.artworks.is_empty());
        assert_eq!(results.people.len(), 1);
        assert_eq!(results.people[0].last_name, "Ernst");
    }

    #[tokio::test]
    async fn test_search_skips_shadowed_artist() {
        let results = shadowed_fixture_client().search_content("salt").await.unwrap();
        let ids: Vec<_> = results.people.iter().map(|p| p.meta.id.as_str()).collect();
        assert_eq!(ids, vec!["person-ada"]);
    }

    #[tokio::test]
    async fn test_search_zero_matches() {
        let results = fixture_client().search_content("zeppelin").await.unwrap();
        assert!(results.is_empty());
        assert_eq!(
            serde_json::to_value(&results).unwrap(),
            json!({"artworks": [], "projects": [], "people": []})
        );
    }

    #[tokio::test]
    async fn test_search_caps_each_category() {
        let mut docs = fixture_documents();
        docs.extend((0..12).map(|n| {
            json!({
                "_id": format!("artwork-study-{}", n),
                "_type": "artwork",
                "title": format!("Salt Study {}", n),
                "year": 2000 + n
            })
        }));
        let client = ContentClient::new(
            MemoryStore::from_documents(docs).unwrap(),
            Environment::Production,
        );

        let results = client.search_content("salt").await.unwrap();
        assert_eq!(results.artworks.len(), SEARCH_LIMIT);
        assert_eq!(results.artworks[0].title, "Blue Hour");
        assert_eq!(results.projects.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_term_skips_the_store() {
        let client = ContentClient::new(FailingBackend::always(), Environment::Production);
        for term in ["", "   ", "**"] {
            assert!(client.search_content(term).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_one_failing_category_fails_the_search() {
        let client = ContentClient::new(
            FailingBackend::fail_on(DocType::Project),
            Environment::Development,
        );

        let err = client.search_content("salt").await.unwrap_err();
        match err {
            Error::Fetch(fetch) => {
                assert_eq!(fetch.context, "search projects: *salt*");
                assert!(fetch.query.contains("pt::text(description) match $searchTerm"));
            }
            other => panic!("expected fetch error, got {:?}", other),
        }
    }

    #[test]
    fn test_people_query_text() {
        let prepared = people(&SearchPattern::contains("ada").unwrap());
        assert!(prepared.to_string().starts_with(
            r#"*[_type in ["person", "artist"] && !(_type == "artist" && slug.current in *[_type == "person"].slug.current) && (firstName match $searchTerm || lastName match $searchTerm || pt::text(biography) match $searchTerm)] | order(lastName asc, firstName asc, _id asc) [0...10]"#
        ));
        assert_eq!(prepared.params.len(), 1);
    }
}
