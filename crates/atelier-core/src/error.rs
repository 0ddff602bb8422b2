//! Error handling
//!
//! Provides the error taxonomy of the query layer with descriptive messages
//! and recovery suggestions.
//!
//! - [`ConfigError`]: a required setting is absent or unreadable. Fatal at startup.
//! - [`FetchError`]: a query failed. Carries the query text, the bound
//!   parameters, a context label and the underlying [`BackendError`].
//!
//! A reference pointing at a missing document is not an error: it resolves
//! to an absent value.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::params::Params;

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required value was not provided by the config file or environment
    #[error("Missing required configuration value '{name}'. Set it in the config file or via {env_var}.")]
    Missing {
        name: &'static str,
        env_var: String,
    },

    /// A value was provided but could not be interpreted
    #[error("Invalid value for '{name}': '{value}'")]
    Invalid { name: &'static str, value: String },

    /// Failed to read the config file
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to parse the config file
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failures reported by a backend while executing a query
#[derive(Error, Debug)]
pub enum BackendError {
    /// The store could not be reached
    #[error("store unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered but rejected the query
    #[error("query rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The response body was not a valid query response
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The result did not have the expected shape
    #[error("unexpected result shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// The query could not be evaluated (e.g. an unbound parameter)
    #[error("evaluation failed: {0}")]
    Evaluation(String),
}

/// A failed query, with everything needed to reproduce it
#[derive(Error, Debug)]
#[error("Failed to fetch {context}: {cause}")]
pub struct FetchError {
    /// Human-readable label, e.g. "person: jane-doe"
    pub context: String,
    /// The GROQ text that was sent
    pub query: String,
    /// The parameters bound to the query
    pub params: Params,
    /// What went wrong
    #[source]
    pub cause: BackendError,
}

/// Top-level error type of the query layer
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl Error {
    /// The context label of a failed fetch, if this is one
    pub fn context(&self) -> Option<&str> {
        match self {
            Error::Fetch(e) => Some(&e.context),
            Error::Config(_) => None,
        }
    }

    /// Check if the store could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            Error::Fetch(FetchError {
                cause: BackendError::Transport(_),
                ..
            })
        )
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Error::Config(ConfigError::Missing { .. }) => {
                Some("Provide the project and dataset identifiers before starting.")
            }
            Error::Config(ConfigError::Parse { .. }) => {
                Some("Fix the syntax of the config file or remove it to use defaults.")
            }
            Error::Fetch(FetchError {
                cause: BackendError::Transport(_),
                ..
            }) => Some("Check network connectivity and that the project identifier is correct."),
            Error::Fetch(FetchError {
                cause: BackendError::Rejected { .. },
                ..
            }) => Some("Check the dataset name and API version; the query text is included for diagnosis."),
            _ => None,
        }
    }
}

/// Result type for query layer operations
pub type Result<T> = std::result::Result<T, Error>;
