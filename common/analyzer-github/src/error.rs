//! GitHub client errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    /// Upstream answered with a non-2xx status
    #[error("GitHub API request failed ({status}): {body}")]
    Request { status: u16, body: String },

    /// The connection could not be established or the transfer broke off
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The path resolved to a directory, symlink or submodule
    #[error("Path {path} is not a file (found {kind})")]
    NotAFile { path: String, kind: String },

    /// The request URL could not be built from the base and path segments
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// The response body did not have the expected shape
    #[error("Parse error: {0}")]
    Decode(String),
}

impl GitHubError {
    /// Upstream HTTP status, when the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GitHubError {
    fn from(err: serde_json::Error) -> Self {
        GitHubError::Decode(err.to_string())
    }
}
