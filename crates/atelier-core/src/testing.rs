//! Shared fixtures for unit tests
//!
//! A small studio dataset exercising both schema generations, dangling
//! references, a draft, and ties in the default sort keys. Profiles are listed
//! out of name order on purpose.

use std::io;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tracing_subscriber::fmt::MakeWriter;

use crate::client::ContentClient;
use crate::config::Environment;
use crate::error::BackendError;
use crate::groq::{Filter, Query};
use crate::models::DocType;
use crate::params::Params;
use crate::store::{Backend, MemoryStore};

fn text(body: &str) -> Value {
    json!([{
        "_type": "block",
        "_key": "b0",
        "style": "normal",
        "children": [{"_type": "span", "_key": "s0", "text": body, "marks": []}],
        "markDefs": []
    }])
}

fn slug(current: &str) -> Value {
    json!({"_type": "slug", "current": current})
}

fn reference(id: &str) -> Value {
    json!({"_type": "reference", "_ref": id})
}

fn term(id: &str, doc_type: &str, title: &str, rank: Option<i64>) -> Value {
    json!({
        "_id": id,
        "_type": doc_type,
        "title": title,
        "slug": slug(&title.to_lowercase()),
        "orderRank": rank
    })
}

fn vocabularies() -> Vec<Value> {
    vec![
        term("role-curator", "role", "Curator", Some(2)),
        term("role-painter", "role", "Painter", Some(1)),
        term("medium-oil", "medium", "Oil", Some(1)),
        term("mt-video", "mediaType", "Video", Some(2)),
        term("mt-print", "mediaType", "Print", Some(1)),
        term("tech-collage", "technique", "Collage", None),
        term("tech-cyanotype", "technique", "Cyanotype", Some(2)),
        term("tech-etching", "technique", "Etching", Some(1)),
        term("tag-water", "tag", "Water", None),
        term("tag-light", "tag", "Light", None),
        term("tag-archive", "tag", "Archive", None),
        term("lt-gallery", "locationType", "Gallery", None),
        json!({"_id": "cat-works", "_type": "category", "title": "Works", "slug": slug("works")}),
        json!({"_id": "cat-prints", "_type": "category", "title": "Prints", "slug": slug("prints"), "parent": reference("cat-works")}),
        json!({"_id": "cat-press", "_type": "category", "title": "Press", "slug": slug("press")}),
        json!({"_id": "cat-paintings", "_type": "category", "title": "Paintings", "slug": slug("paintings"), "parent": reference("cat-works")}),
        json!({
            "_id": "site-settings",
            "_type": "siteSettings",
            "title": "Atelier Schork",
            "description": "Studio for print, paint and moving image",
            "contactEmail": "studio@schork.example",
            "footerText": text("All works © their artists.")
        }),
    ]
}

fn profiles() -> Vec<Value> {
    vec![
        json!({
            "_id": "person-lena",
            "_type": "person",
            "_createdAt": "2024-02-01T09:00:00Z",
            "firstName": "Lena",
            "lastName": "Schork",
            "slug": slug("lena-schork"),
            "roles": [reference("role-curator")],
            "biography": text("Lena curates the studio archive."),
            "isCoreArtist": false
        }),
        json!({
            "_id": "person-ada",
            "_type": "person",
            "_createdAt": "2024-01-15T09:00:00Z",
            "_updatedAt": "2025-06-01T12:30:00Z",
            "title": "Dr.",
            "firstName": "Ada",
            "lastName": "Schork",
            "slug": slug("ada-schork"),
            "roles": [reference("role-painter"), reference("role-retired")],
            "profileImage": {"_type": "image", "asset": reference("image-ada-800x800-jpg")},
            "biography": text("Ada paints with salt and light."),
            "statement": text("Every print is a tide line."),
            "education": [{"_key": "e0", "degree": "MFA", "institution": "HFBK Hamburg", "year": 2012}],
            "isCoreArtist": true,
            "isActive": true,
            "birthYear": 1986
        }),
        json!({
            "_id": "drafts.person-ada",
            "_type": "person",
            "firstName": "Ada (draft)",
            "lastName": "Schork",
            "slug": slug("ada-schork")
        }),
        json!({
            "_id": "person-jo",
            "_type": "person",
            "firstName": "Jo",
            "lastName": "Adler",
            "slug": slug("jo-adler"),
            "biography": null
        }),
        json!({
            "_id": "artist-max",
            "_type": "artist",
            "firstName": "Max",
            "lastName": "Ernst",
            "slug": slug("max-ernst"),
            "image": {"_type": "image", "asset": reference("image-ernst-400x500-jpg")},
            "nationality": "German",
            "birthDate": "1891-04-02"
        }),
    ]
}

fn projects() -> Vec<Value> {
    vec![
        json!({
            "_id": "project-quiet",
            "_type": "project",
            "title": "Quiet Rooms",
            "slug": slug("quiet"),
            "status": "planning",
            "creators": [reference("person-jo")],
            "isFeatured": false
        }),
        json!({
            "_id": "project-tides",
            "_type": "project",
            "title": "Tides",
            "slug": slug("tides"),
            "status": "inProgress",
            "description": text("A study of salt water and light."),
            "creators": [reference("person-ada")],
            "collaborators": [reference("person-jo")],
            "coverImage": {"_type": "image", "asset": reference("image-tides-1600x900-png")},
            "startDate": "2021-03-01",
            "tags": [reference("tag-water")],
            "isFeatured": true,
            "orderRank": 2
        }),
        json!({
            "_id": "project-atlas",
            "_type": "project",
            "title": "Atlas of Small Things",
            "slug": slug("atlas"),
            "status": "completed",
            "description": text("Collected objects, mapped."),
            "creators": [reference("person-lena")],
            "startDate": "2019-05-01",
            "endDate": "2020-01-31",
            "isFeatured": true,
            "orderRank": 1
        }),
    ]
}

fn artworks() -> Vec<Value> {
    vec![
        json!({
            "_id": "artwork-blue",
            "_type": "artwork",
            "title": "Blue Hour",
            "slug": slug("blue-hour"),
            "artists": [reference("person-ada"), reference("person-gone")],
            "year": 2021,
            "mediaTypes": [reference("mt-video")],
            "techniques": [reference("tech-cyanotype")],
            "tags": [reference("tag-light"), reference("tag-water")],
            "description": text("Salt prints exposed at dusk."),
            "media": [
                {"_type": "vimeoMedia", "_key": "m0", "vimeoId": "76979871"},
                {"_type": "imageMedia", "_key": "m1", "image": {"asset": reference("image-bluehour-1200x800-jpg")}, "alt": "Blue Hour", "isPrimary": true}
            ],
            "project": reference("project-tides"),
            "isFeatured": true,
            "availability": "available",
            "price": 2400.0,
            "orderRank": 2
        }),
        json!({
            "_id": "artwork-red",
            "_type": "artwork",
            "title": "Red Dawn",
            "slug": slug("red-dawn"),
            "artists": [reference("person-ada"), reference("person-lena")],
            "year": 2023,
            "mediaTypes": [reference("mt-print")],
            "techniques": [reference("tech-etching")],
            "tags": [reference("tag-light")],
            "project": reference("project-tides"),
            "relatedArtworks": [reference("artwork-blue")],
            "isFeatured": true,
            "orderRank": 1
        }),
        json!({
            "_id": "artwork-salt",
            "_type": "artwork",
            "title": "Salt Lines",
            "slug": slug("salt-lines"),
            "artists": [reference("person-ada")],
            "year": 2019,
            "medium": reference("medium-oil"),
            "techniques": [reference("tech-cyanotype"), reference("tech-retired")],
            "project": reference("project-atlas"),
            "isFeatured": false,
            "orderRank": 1
        }),
        json!({
            "_id": "artwork-ghost",
            "_type": "artwork",
            "title": "Ghost Print",
            "slug": slug("ghost-print"),
            "artists": [reference("artist-max")],
            "year": 2023,
            "tags": [reference("tag-archive")],
            "project": reference("project-gone"),
            "isFeatured": true
        }),
        json!({
            "_id": "artwork-map",
            "_type": "artwork",
            "title": "Map of Hours",
            "slug": slug("map-of-hours"),
            "artists": [reference("person-lena")],
            "year": 2019,
            "tags": [reference("tag-water")],
            "project": reference("project-atlas"),
            "isFeatured": false,
            "orderRank": 2
        }),
    ]
}

fn events() -> Vec<Value> {
    vec![
        json!({
            "_id": "location-kw",
            "_type": "location",
            "name": "KW Institute",
            "slug": slug("kw-institute"),
            "locationType": reference("lt-gallery"),
            "city": "Berlin",
            "country": "Germany",
            "coordinates": {"_type": "geopoint", "lat": 52.527, "lng": 13.396}
        }),
        json!({
            "_id": "location-atelier",
            "_type": "location",
            "name": "Atelier Schork",
            "slug": slug("atelier"),
            "city": "Hamburg",
            "country": "Germany"
        }),
        json!({
            "_id": "exhibition-salt",
            "_type": "exhibition",
            "title": "Salt and Light",
            "slug": slug("salt-and-light"),
            "type": "solo",
            "status": "past",
            "curators": [reference("person-lena"), reference("person-ada")],
            "location": reference("location-kw"),
            "startDate": "2022-04-01",
            "endDate": "2022-06-30",
            "artworks": [reference("artwork-blue"), reference("artwork-red")],
            "press": [{"_key": "p0", "title": "Salt, seen", "publication": "Monopol", "date": "2022-04-10"}]
        }),
        json!({
            "_id": "exhibition-tides",
            "_type": "exhibition",
            "title": "Tides Open Studio",
            "slug": slug("tides-open-studio"),
            "type": "group",
            "status": "current",
            "curators": [reference("person-ada")],
            "location": reference("location-atelier"),
            "startDate": "2026-09-01",
            "artworks": [reference("artwork-red")],
            "featuredProjects": [reference("project-tides")]
        }),
        json!({
            "_id": "exhibition-atlas",
            "_type": "exhibition",
            "title": "Atlas Revisited",
            "slug": slug("atlas-revisited"),
            "type": "collaboration",
            "status": "upcoming",
            "curators": [reference("person-jo")],
            "venue": "Kunsthalle",
            "city": "Basel",
            "startDate": "2027-02-01",
            "featuredProjects": [reference("project-atlas")]
        }),
        json!({
            "_id": "exhibition-winter",
            "_type": "exhibition",
            "title": "Winter Salon",
            "slug": slug("winter-salon"),
            "type": "group",
            "status": "upcoming",
            "location": reference("location-kw"),
            "startDate": "2026-12-01",
            "artworks": [reference("artwork-ghost")]
        }),
        json!({
            "_id": "award-early",
            "_type": "award",
            "title": "Early Career Grant",
            "organization": "Kunstfonds",
            "year": 2018,
            "recipients": [reference("artist-max")]
        }),
        json!({
            "_id": "award-lumen",
            "_type": "award",
            "title": "Lumen Prize",
            "organization": "Lumen",
            "year": 2022,
            "recipients": [reference("person-ada")],
            "artwork": reference("artwork-blue"),
            "isMajorAward": true
        }),
        json!({
            "_id": "award-shared",
            "_type": "award",
            "title": "Shared Studio Award",
            "year": 2024,
            "recipients": [reference("person-ada"), reference("person-lena")],
            "isMajorAward": false
        }),
    ]
}

/// The raw dataset, including one draft
pub(crate) fn fixture_documents() -> Vec<Value> {
    let mut docs = vocabularies();
    docs.extend(profiles());
    docs.extend(projects());
    docs.extend(artworks());
    docs.extend(events());
    docs
}

pub(crate) fn fixture_store() -> MemoryStore {
    MemoryStore::from_documents(fixture_documents()).expect("fixture documents all carry an _id")
}

pub(crate) fn fixture_client() -> ContentClient<MemoryStore> {
    ContentClient::new(fixture_store(), Environment::Development)
}

/// The fixtures preceded by a retired `artist` holding Ada's slug
pub(crate) fn shadowed_fixture_client() -> ContentClient<MemoryStore> {
    let mut docs = vec![json!({
        "_id": "artist-ada-legacy",
        "_type": "artist",
        "firstName": "Ada",
        "lastName": "Schork",
        "slug": slug("ada-schork"),
        "biography": text("Early salt prints."),
        "nationality": "German"
    })];
    docs.extend(fixture_documents());
    let store = MemoryStore::from_documents(docs).expect("fixture documents all carry an _id");
    ContentClient::new(store, Environment::Development)
}

/// Log output collected by [`log_capture`]
#[derive(Clone, Default)]
pub(crate) struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub(crate) fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// A subscriber recording every event at DEBUG and above into a buffer
///
/// Install it for one test with `tracing::subscriber::with_default`, or for a
/// future with `WithSubscriber::with_subscriber`.
pub(crate) fn log_capture() -> (LogBuffer, impl tracing::Subscriber + Send + Sync + 'static) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .with_writer(buffer.clone())
        .finish();
    (buffer, subscriber)
}

/// A backend that rejects some or all queries with a 503
pub(crate) struct FailingBackend {
    store: MemoryStore,
    target: Option<DocType>,
}

impl FailingBackend {
    /// Rejects every query
    pub(crate) fn always() -> Self {
        Self {
            store: MemoryStore::new(),
            target: None,
        }
    }

    /// Rejects queries selecting `doc_type`; everything else runs on the fixtures
    pub(crate) fn fail_on(doc_type: DocType) -> Self {
        Self {
            store: fixture_store(),
            target: Some(doc_type),
        }
    }
}

fn selects(filter: &Filter, doc_type: DocType) -> bool {
    match filter {
        Filter::Type(t) => *t == doc_type,
        Filter::AnyType(types) => types.contains(&doc_type),
        Filter::And(terms) => terms.iter().any(|term| selects(term, doc_type)),
        _ => false,
    }
}

impl Backend for FailingBackend {
    async fn execute(&self, query: &Query, params: &Params) -> Result<Value, BackendError> {
        let fails = self
            .target
            .map_or(true, |doc_type| selects(&query.filter, doc_type));
        if fails {
            return Err(BackendError::Rejected {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        self.store.evaluate(query, params)
    }
}
