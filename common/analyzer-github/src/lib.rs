//! GitHub API client library
//!
//! Read-only access to a GitHub-compatible REST API, used as the tool surface
//! of the contribution analysis agent.
//!
//! ## Modules
//!
//! - [`client`]: Core client, request builder and error mapping
//! - [`auth`]: Token resolution and the per-request token context
//! - [`commits`]: Latest commit, commit diff and recent commit history
//! - [`contents`]: Repository file contents
//! - [`repositories`]: Repository and branch metadata
//! - [`types`]: Typed records decoded from API responses
//! - [`error`]: Error taxonomy

pub mod auth;
pub mod client;
mod commits;
mod contents;
pub mod error;
mod repositories;
pub mod types;

// Re-export public API
pub use auth::{GitHubAuth, TokenContext, TokenResolver};
pub use client::{DEFAULT_API_BASE, DEFAULT_USER_AGENT, GitHubClient};
pub use error::GitHubError;
pub use types::{
    BranchInfo, CommitDiff, CommitInfo, FileChange, FileContent, FileStatus, RepoInfo,
};

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Branch used when a caller does not name one
pub const DEFAULT_BRANCH: &str = "main";

/// Number of commits returned by `get_recent_commits` when unspecified
pub const DEFAULT_COMMIT_COUNT: usize = 10;

/// Upper bound GitHub accepts for `per_page`
pub const MAX_PER_PAGE: usize = 100;
