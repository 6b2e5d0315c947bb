//! Content store access
//!
//! [`ContentStore`] is the seam between the facade and whatever holds the
//! documents. [`SanityClient`] talks to the hosted query API over HTTP;
//! [`FixtureStore`](crate::fixtures::FixtureStore) answers the same queries
//! from a local JSON file.

use std::future::Future;
use std::sync::Arc;

use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::CmsConfig;
use crate::error::{CmsError, CmsResult};
use crate::fixtures::FixtureStore;
use crate::query::ContentQuery;

/// Something that can answer content queries with raw JSON documents
pub trait ContentStore: Send + Sync {
    /// Run a query and return the raw `result` value.
    ///
    /// Singleton queries answer `null` when nothing matches; list queries
    /// answer an array.
    fn fetch(&self, query: &ContentQuery) -> impl Future<Output = CmsResult<Value>> + Send;
}

impl<T: ContentStore> ContentStore for Arc<T> {
    fn fetch(&self, query: &ContentQuery) -> impl Future<Output = CmsResult<Value>> + Send {
        (**self).fetch(query)
    }
}

/// Response envelope of the query endpoint
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

/// HTTP client for a Sanity-compatible query API
#[derive(Debug, Clone)]
pub struct SanityClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl SanityClient {
    /// Create a new client from configuration
    pub fn new(config: &CmsConfig) -> CmsResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        let endpoint = config.query_endpoint();

        info!("Content store client initialized with endpoint: {}", endpoint);

        Ok(Self {
            http,
            endpoint,
            token: config.token.clone(),
        })
    }

    async fn run(&self, query: &ContentQuery) -> CmsResult<Value> {
        let groq = query.to_groq();

        let mut pairs = vec![("query".to_string(), groq.text)];
        for (name, value) in &groq.params {
            pairs.push((format!("${}", name), serde_json::to_string(value)?));
        }

        // Editors expect their changes to show up on the next page load
        let mut request = self
            .http
            .get(&self.endpoint)
            .query(&pairs)
            .header(CACHE_CONTROL, "no-store");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        debug!("Issuing {} query", query.name());
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            error!(
                "Content store rejected {} query with {}: {}",
                query.name(),
                status,
                message
            );
            return Err(CmsError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: QueryResponse = serde_json::from_str(&body)?;
        Ok(envelope.result)
    }
}

impl ContentStore for SanityClient {
    fn fetch(&self, query: &ContentQuery) -> impl Future<Output = CmsResult<Value>> + Send {
        self.run(query)
    }
}

/// Pull a readable message out of an error body
fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            v.pointer("/error/description")
                .or_else(|| v.pointer("/message"))
                .or_else(|| v.get("error"))
        })
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.chars().take(200).collect())
}

/// The store selected at startup
#[derive(Debug, Clone)]
pub enum ContentBackend {
    Sanity(SanityClient),
    Fixtures(FixtureStore),
}

impl ContentBackend {
    /// Fixture documents win when `fixtures_path` is configured
    pub fn from_config(config: &CmsConfig) -> CmsResult<Self> {
        match &config.fixtures_path {
            Some(path) => Ok(ContentBackend::Fixtures(FixtureStore::load(path)?)),
            None => Ok(ContentBackend::Sanity(SanityClient::new(config)?)),
        }
    }
}

impl ContentStore for ContentBackend {
    async fn fetch(&self, query: &ContentQuery) -> CmsResult<Value> {
        match self {
            ContentBackend::Sanity(client) => client.fetch(query).await,
            ContentBackend::Fixtures(fixtures) => fixtures.fetch(query).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"error":{"description":"param $term referenced, but not provided"}}"#),
            "param $term referenced, but not provided"
        );
        assert_eq!(error_message(r#"{"error":"Unauthorized"}"#), "Unauthorized");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
