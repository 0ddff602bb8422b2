//! Query backends
//!
//! A backend takes a compiled [`Query`] plus its bound [`Params`] and returns
//! the raw JSON result. Two are provided:
//!
//! - [`HttpBackend`]: the store's HTTP query API
//! - [`MemoryStore`]: an in-memory evaluator over a dataset export, used for
//!   offline inspection and tests

mod http;
mod memory;

use std::future::Future;

use serde_json::Value;

use crate::error::BackendError;
use crate::groq::Query;
use crate::params::Params;

pub use http::HttpBackend;
pub use memory::MemoryStore;

/// Executes compiled queries
pub trait Backend: Send + Sync {
    /// Run `query` with `params` bound, returning the `result` value
    ///
    /// A single-document query yields the document or `null`; every other
    /// query yields an array.
    fn execute(
        &self,
        query: &Query,
        params: &Params,
    ) -> impl Future<Output = Result<Value, BackendError>> + Send;
}
