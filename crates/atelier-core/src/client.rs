//! Query execution
//!
//! [`ContentClient`] is the single path every query takes: it renders the
//! query, runs it on a [`Backend`], decodes the result and turns any failure
//! into [`Error::Fetch`] carrying the query text, parameters and a context
//! label. There are no retries and no fallbacks; the caller decides how to
//! degrade.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::config::Environment;
use crate::error::{BackendError, Error, FetchError, Result};
use crate::groq::Query;
use crate::params::Params;
use crate::store::Backend;

/// A compiled query with its bindings and context label, ready to run
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    pub query: Query,
    pub params: Params,
    pub context: String,
}

impl Prepared {
    pub fn new(query: Query, context: impl Into<String>) -> Self {
        Self {
            query,
            params: Params::new(),
            context: context.into(),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}

impl fmt::Display for Prepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query)?;
        if !self.params.is_empty() {
            write!(f, "\n{}", self.params)?;
        }
        Ok(())
    }
}

/// Entry point for reading content
///
/// Holds no mutable state; share it by reference across concurrent tasks.
#[derive(Debug, Clone)]
pub struct ContentClient<B> {
    backend: B,
    environment: Environment,
}

impl<B: Backend> ContentClient<B> {
    pub fn new(backend: B, environment: Environment) -> Self {
        Self {
            backend,
            environment,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Execute `query` and decode its result into `T`
    ///
    /// In development the query text and parameters are logged before
    /// execution and failures are logged before being returned. Production
    /// logs nothing.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        query: &Query,
        params: &Params,
        context: impl Into<String>,
    ) -> Result<T> {
        let context = context.into();
        let text = query.to_string();
        let diagnostics = self.environment.logs_queries();

        if diagnostics {
            tracing::debug!(%context, query = %text, %params, "Executing query");
        }

        let outcome = match self.backend.execute(query, params).await {
            Ok(value) => serde_json::from_value::<T>(value).map_err(BackendError::from),
            Err(e) => Err(e),
        };

        outcome.map_err(|cause| {
            if diagnostics {
                tracing::error!(%context, query = %text, %params, error = %cause, "Query failed");
            }
            Error::Fetch(FetchError {
                context,
                query: text,
                params: params.clone(),
                cause,
            })
        })
    }

    /// Execute a prepared query
    pub async fn run<T: DeserializeOwned>(&self, prepared: Prepared) -> Result<T> {
        self.fetch(&prepared.query, &prepared.params, prepared.context)
            .await
    }
}
