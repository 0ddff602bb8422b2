//! HTTP query API backend
//!
//! Sends `GET <query_url>?query=<groq>&$<name>=<json>` and unwraps the
//! `{"result": ...}` envelope. Rejections come back as
//! `{"error": {"description": ...}}`, usually with a non-2xx status.

use serde_json::Value;

use super::Backend;
use crate::config::Config;
use crate::error::BackendError;
use crate::groq::Query;
use crate::params::Params;

const USER_AGENT: &str = concat!("atelier/", env!("CARGO_PKG_VERSION"));

/// Backend talking to the hosted content store
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    query_url: String,
}

impl HttpBackend {
    /// Create a backend with a default HTTP client
    ///
    /// The default client has no request timeout; use [`HttpBackend::with_client`]
    /// to impose one.
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(config, client))
    }

    /// Create a backend using a caller-configured client
    pub fn with_client(config: &Config, client: reqwest::Client) -> Self {
        Self {
            client,
            query_url: config.query_url(),
        }
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }
}

/// Query string pairs: the GROQ text, then one `$name` entry per parameter
fn query_pairs(query: &Query, params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len() + 1);
    pairs.push(("query".to_string(), query.to_string()));
    for (name, value) in params.iter() {
        pairs.push((format!("${}", name), value.to_json().to_string()));
    }
    pairs
}

/// Interpret a response body according to the store protocol
fn interpret(status: u16, body: &str) -> Result<Value, BackendError> {
    let success = (200..300).contains(&status);

    let mut envelope: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !success => {
            return Err(BackendError::Rejected {
                status,
                message: body.trim().to_string(),
            })
        }
        Err(e) => {
            return Err(BackendError::MalformedResponse(format!(
                "response is not JSON: {}",
                e
            )))
        }
    };

    if let Some(error) = envelope.get("error") {
        let message = error
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(BackendError::Rejected { status, message });
    }

    if !success {
        let message = envelope
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| envelope.to_string());
        return Err(BackendError::Rejected { status, message });
    }

    envelope
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| BackendError::MalformedResponse("response has no 'result' field".into()))
}

impl Backend for HttpBackend {
    async fn execute(&self, query: &Query, params: &Params) -> Result<Value, BackendError> {
        let response = self
            .client
            .get(&self.query_url)
            .query(&query_pairs(query, params))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        interpret(status, &body)
    }
}
