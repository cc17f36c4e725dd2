//! Typed records decoded from GitHub API responses
//!
//! The `*Payload` structs mirror the subset of the upstream JSON this crate
//! reads. They are converted into the public records right after decoding, so
//! a missing required field fails the call instead of leaking a half-filled
//! record.

use serde::{Deserialize, Serialize};

/// A single commit, flattened from the upstream commit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub date: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Removed,
    Modified,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    #[serde(other)]
    Unknown,
}

/// Per-file change within a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub filename: String,
    pub status: FileStatus,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    /// Unified diff; GitHub omits it for binary and very large files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
}

/// A commit together with its file changes.
///
/// The totals are computed once in [`CommitDiff::new`] and cannot drift from
/// `files` afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitDiff {
    commit: CommitInfo,
    files: Vec<FileChange>,
    total_additions: u64,
    total_deletions: u64,
}

impl CommitDiff {
    pub fn new(commit: CommitInfo, files: Vec<FileChange>) -> Self {
        let total_additions = files.iter().map(|f| f.additions).sum();
        let total_deletions = files.iter().map(|f| f.deletions).sum();
        Self {
            commit,
            files,
            total_additions,
            total_deletions,
        }
    }

    pub fn commit(&self) -> &CommitInfo {
        &self.commit
    }

    pub fn files(&self) -> &[FileChange] {
        &self.files
    }

    pub fn total_additions(&self) -> u64 {
        self.total_additions
    }

    pub fn total_deletions(&self) -> u64 {
        self.total_deletions
    }
}

/// Decoded content of a single repository file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileContent {
    pub path: String,
    pub content: String,
    pub sha: String,
    pub size: u64,
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub default_branch: String,
    pub clone_url: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchInfo {
    pub name: String,
    pub sha: String,
    pub protected: bool,
}

// Upstream payloads

#[derive(Debug, Deserialize)]
pub(crate) struct CommitPayload {
    pub sha: String,
    pub commit: GitCommitPayload,
    pub html_url: String,
    #[serde(default)]
    pub files: Vec<FileChange>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitCommitPayload {
    pub message: String,
    pub author: GitAuthorPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitAuthorPayload {
    pub name: String,
    pub date: String,
}

impl CommitPayload {
    pub(crate) fn into_parts(self) -> (CommitInfo, Vec<FileChange>) {
        let CommitPayload {
            sha,
            commit,
            html_url,
            files,
        } = self;
        let info = CommitInfo {
            sha,
            message: commit.message,
            author: commit.author.name,
            date: commit.author.date,
            url: html_url,
        };
        (info, files)
    }
}

impl From<CommitPayload> for CommitInfo {
    fn from(payload: CommitPayload) -> Self {
        payload.into_parts().0
    }
}

impl From<CommitPayload> for CommitDiff {
    fn from(payload: CommitPayload) -> Self {
        let (commit, files) = payload.into_parts();
        CommitDiff::new(commit, files)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentPayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Option<String>,
    pub sha: String,
    pub size: u64,
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BranchPayload {
    pub name: String,
    pub commit: BranchCommitPayload,
    #[serde(default)]
    pub protected: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BranchCommitPayload {
    pub sha: String,
}

impl From<BranchPayload> for BranchInfo {
    fn from(payload: BranchPayload) -> Self {
        BranchInfo {
            name: payload.name,
            sha: payload.commit.sha,
            protected: payload.protected,
        }
    }
}
