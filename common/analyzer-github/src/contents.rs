//! Repository contents

use crate::client::GitHubClient;
use crate::error::GitHubError;
use crate::types::{ContentPayload, FileContent};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Method;

impl GitHubClient {
    /// Get the decoded content of a file.
    ///
    /// # Errors
    /// Returns [`GitHubError::NotAFile`] when `path` names a directory, a
    /// symlink or a submodule.
    pub async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> crate::Result<FileContent> {
        let path = path.trim_matches('/');
        let mut segments = vec!["repos", owner, repo, "contents"];
        segments.extend(path.split('/'));

        let value = self
            .request(&segments, &[("ref", branch)], Method::GET, None)
            .await?;

        // Directories come back as a listing rather than an object
        if value.is_array() {
            return Err(GitHubError::NotAFile {
                path: path.to_string(),
                kind: "dir".to_string(),
            });
        }

        let payload: ContentPayload = serde_json::from_value(value)?;
        if payload.kind != "file" {
            return Err(GitHubError::NotAFile {
                path: path.to_string(),
                kind: payload.kind,
            });
        }

        let encoded = payload
            .content
            .ok_or_else(|| GitHubError::Decode(format!("No content returned for {}", path)))?;

        Ok(FileContent {
            path: path.to_string(),
            content: decode_content(&encoded)?,
            sha: payload.sha,
            size: payload.size,
            download_url: payload.download_url,
        })
    }
}

/// Decode the base64 transport encoding, which GitHub wraps at 60 columns
pub(crate) fn decode_content(encoded: &str) -> crate::Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| GitHubError::Decode(format!("Invalid base64 content: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| GitHubError::Decode(format!("File content is not UTF-8: {}", e)))
}
