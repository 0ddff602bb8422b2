//! Atelier Core Library
//!
//! Typed, read-only access to an art studio's published content: people,
//! artworks, projects, exhibitions, awards, locations and their vocabularies,
//! held in a hosted Sanity document store.
//!
//! # Architecture
//!
//! - **Queries** are typed GROQ expressions (`groq`), never assembled from
//!   strings; caller input reaches them only as bound parameters (`params`).
//! - **Projections** (`projection`) give every document type one canonical
//!   wire shape; references are joined at query time (`resolver`).
//! - **Backends** (`store`) execute compiled queries: the hosted HTTP API, or
//!   an in-memory evaluator over a dataset export.
//! - **ContentClient** (`client`, `queries`) runs queries, decodes typed
//!   results and reports every failure as a contextual `Error::Fetch`.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let client = ContentClient::new(HttpBackend::new(&config)?, config.environment);
//!
//! let people = client.get_all_people().await?;
//! let ada = client.get_person_by_slug("ada-schork").await?;
//! let hits = client.search_content("salt").await?;
//! ```
//!
//! # Modules
//!
//! - `queries`: the public query surface (main entry point)
//! - `models`: typed documents and value objects
//! - `compat`: retired schema names and deprecated entry points
//! - `assets`: CDN URLs for images and files
//! - `config`: project, dataset and environment settings

pub mod assets;
pub mod client;
pub mod compat;
pub mod config;
pub mod error;
pub mod groq;
pub mod models;
pub mod params;
pub mod projection;
pub mod queries;
pub mod resolver;
pub mod store;

#[cfg(test)]
mod testing;

pub use assets::{AssetUrls, ImageFormat, ImageOptions};
pub use client::{ContentClient, Prepared};
pub use config::{Config, Environment};
pub use error::{BackendError, ConfigError, Error, FetchError, Result};
pub use models::{
    Artwork, Award, Category, DocType, Document, Exhibition, Location, MediaItem, Person,
    Project, SiteSettings, TaxonomyTerm,
};
pub use params::{ParamValue, Params, SearchPattern};
pub use queries::{Page, SearchResults};
pub use store::{Backend, HttpBackend, MemoryStore};
