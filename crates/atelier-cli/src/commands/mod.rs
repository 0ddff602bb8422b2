//! Command handlers

pub mod artworks;
pub mod asset;
pub mod catalog;
pub mod config;
pub mod exhibitions;
pub mod people;
pub mod projects;
pub mod search;

use anyhow::{bail, Result};
use serde::de::DeserializeOwned;

use atelier_core::{Backend, ContentClient, Prepared};

use crate::output::{Listing, Output};

/// What a content command runs against
pub struct Session<'a, B> {
    pub client: &'a ContentClient<B>,
    pub output: &'a Output,
    /// Print compiled queries instead of running them
    pub explain: bool,
}

impl<B: Backend> Session<'_, B> {
    /// Run a prepared query; under `--explain` print it and return `None`
    pub async fn fetch<T: DeserializeOwned>(&self, prepared: Prepared) -> Result<Option<T>> {
        if self.explain {
            self.output.print_explain(std::slice::from_ref(&prepared))?;
            return Ok(None);
        }
        Ok(Some(self.client.run(prepared).await?))
    }

    pub async fn list<T>(&self, prepared: Prepared, noun: &str) -> Result<()>
    where
        T: Listing + DeserializeOwned,
    {
        if let Some(items) = self.fetch::<Vec<T>>(prepared).await? {
            self.output.print_list(&items, noun)?;
        }
        Ok(())
    }

    /// Print one document, failing when the lookup matched nothing
    pub async fn show<T>(&self, prepared: Prepared, kind: &str, key: &str) -> Result<()>
    where
        T: Listing + DeserializeOwned,
    {
        match self.fetch::<Option<T>>(prepared).await? {
            Some(Some(item)) => self.output.print_item(&item),
            Some(None) => bail!("No {} found for '{}'", kind, key),
            None => Ok(()),
        }
    }
}
