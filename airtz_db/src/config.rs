use std::path::PathBuf;
use std::time::Duration;

use airtz_core::{WIKIDATA_ENTITY_PREFIX, WIKIDATA_SPARQL_ENDPOINT};
use serde::Deserialize;

/// Scheme that switches the client to reading canned responses from disk.
pub const FIXTURE_SCHEME: &str = "file://";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EndpointConfig {
    /// SPARQL endpoint the queries are POSTed to.
    ///
    /// A `file://` URL is taken as a path prefix instead: the response for a
    /// query named `n` is read from `<prefix>n.json`.
    ///
    /// _Default:_ `https://query.wikidata.org/sparql`.
    pub url: String,
    /// Prefix stripped from entity URIs to obtain bare `Q` ids.
    ///
    /// _Default:_ `http://www.wikidata.org/entity/`.
    pub entity_prefix: String,
    /// Sent as the `User-Agent` header. The Wikidata query service rejects
    /// requests without one.
    ///
    /// _Default:_ `airtz/<crate version>`.
    pub user_agent: String,
    /// Number of seconds to wait for the whole request, response body
    /// included.
    ///
    /// _Default:_ `60`.
    pub timeout_secs: u64,
    /// Row limit appended to the queries.
    ///
    /// _Default:_ `None`.
    pub limit: Option<usize>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: WIKIDATA_SPARQL_ENDPOINT.to_string(),
            entity_prefix: WIKIDATA_ENTITY_PREFIX.to_string(),
            user_agent: concat!("airtz/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 60,
            limit: None,
        }
    }
}

impl EndpointConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_fixture(&self) -> bool {
        self.url.starts_with(FIXTURE_SCHEME)
    }

    /// File holding the canned response for the query `name`, if the
    /// endpoint is a fixture prefix.
    pub fn fixture_path(&self, name: &str) -> Option<PathBuf> {
        self.url
            .strip_prefix(FIXTURE_SCHEME)
            .map(|prefix| PathBuf::from(format!("{}{}.json", prefix, name)))
    }
}
