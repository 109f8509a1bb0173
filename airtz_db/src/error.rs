use std::path::PathBuf;

use thiserror::Error;

/// The endpoint could not be reached or did not answer with a usable result
/// set.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("failed to read {}: {source}", path.display())]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Endpoint error: {0}")]
    Endpoint(#[from] EndpointError),

    /// The endpoint refused to parse or evaluate the query text.
    #[error("Query syntax error ({status}): {message}")]
    QuerySyntax { status: u16, message: String },
}

impl Error {
    pub fn is_endpoint(&self) -> bool {
        matches!(self, Error::Endpoint(_))
    }

    pub fn is_query_syntax(&self) -> bool {
        matches!(self, Error::QuerySyntax { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Endpoint(EndpointError::Transport(e))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
