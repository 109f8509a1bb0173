//! SPARQL 1.1 Protocol client
//!
//! Queries are POSTed form-encoded and answered in the SPARQL JSON results
//! format. One call is one request: there is no retry, paging or caching.

pub mod config;
pub mod error;
pub mod metrics;

pub use crate::config::EndpointConfig;
pub use crate::error::{EndpointError, Error, Result};
pub use crate::metrics::ExecutorMetrics;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use airtz_core::SparqlResults;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Longest error body excerpt kept in an error message.
const MAX_ERROR_EXCERPT: usize = 500;

#[derive(Clone, Debug)]
pub struct SparqlClient {
    http: reqwest::Client,
    config: EndpointConfig,
    metrics: Arc<ExecutorMetrics>,
}

impl SparqlClient {
    pub fn new(config: EndpointConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            config,
            metrics: Arc::new(ExecutorMetrics::new()),
        })
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub fn metrics(&self) -> &ExecutorMetrics {
        &self.metrics
    }

    /// Runs `query` and returns the result table untouched.
    ///
    /// `name` identifies the query for logging and picks the canned response
    /// when the endpoint is a `file://` prefix.
    #[instrument(skip(self, query), fields(endpoint = %self.config.url))]
    pub async fn execute_raw(&self, name: &str, query: &str) -> Result<SparqlResults> {
        let start = Instant::now();
        debug!(query, "executing SPARQL query");

        let result = match self.config.fixture_path(name) {
            Some(path) => read_fixture(&path).await,
            None => self.post(query).await,
        };

        match &result {
            Ok(results) => {
                self.metrics
                    .update_success(start.elapsed(), results.len());
                debug!(rows = results.len(), vars = ?results.head.vars, "query succeeded");
            }
            Err(e) => {
                self.metrics.update_failure();
                warn!(error = %e, "query failed");
            }
        }
        result
    }

    /// Runs `query` and deserializes every row into `T`.
    ///
    /// Rows are handed to `T` as objects of `variable -> lexical value`;
    /// unbound variables are absent. A row `T` cannot be built from makes the
    /// whole response malformed.
    pub async fn execute<T>(&self, name: &str, query: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let results = self.execute_raw(name, query).await?;
        deserialize_rows(results)
    }

    /// Like [`execute`](Self::execute), but the response header must project
    /// every variable in `vars`. A response answering some other query is
    /// malformed even if its rows happen to fit `T`.
    pub async fn execute_projecting<T>(
        &self,
        name: &str,
        query: &str,
        vars: &[&str],
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let results = self.execute_raw(name, query).await?;
        let missing = results.missing_vars(vars);
        if !missing.is_empty() {
            warn!(?missing, projected = ?results.head.vars, "response lacks variables");
            return Err(EndpointError::Malformed(format!(
                "response does not project {}",
                missing.join(", ")
            ))
            .into());
        }
        deserialize_rows(results)
    }

    async fn post(&self, query: &str) -> Result<SparqlResults> {
        let response = self
            .http
            .post(&self.config.url)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", query), ("format", "json")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::BAD_REQUEST {
            return Err(Error::QuerySyntax {
                status: status.as_u16(),
                message: excerpt(&body),
            });
        }
        if !status.is_success() {
            return Err(EndpointError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            }
            .into());
        }
        parse_results(&body)
    }
}

async fn read_fixture(path: &Path) -> Result<SparqlResults> {
    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| EndpointError::Fixture {
            path: path.to_path_buf(),
            source,
        })?;
    parse_results(&body)
}

fn deserialize_rows<T: DeserializeOwned>(results: SparqlResults) -> Result<Vec<T>> {
    results
        .into_rows()
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            serde_json::from_value(row)
                .map_err(|e| Error::from(EndpointError::Malformed(format!("row {}: {}", index, e))))
        })
        .collect()
}

fn parse_results(body: &str) -> Result<SparqlResults> {
    serde_json::from_str(body).map_err(|e| Error::from(EndpointError::Malformed(e.to_string())))
}

/// The part of an error body worth showing: the line naming the exception
/// if there is one (Blazegraph answers with a stack trace), otherwise the
/// first non-blank line.
fn excerpt(body: &str) -> String {
    let line = body
        .lines()
        .find(|l| l.contains("Exception"))
        .or_else(|| body.lines().find(|l| !l.trim().is_empty()))
        .unwrap_or("")
        .trim();
    line.chars().take(MAX_ERROR_EXCERPT).collect()
}
