//! Repository-related operations

use crate::client::GitHubClient;
use crate::types::{BranchInfo, BranchPayload, RepoInfo};

impl GitHubClient {
    pub async fn get_repository(&self, owner: &str, repo: &str) -> crate::Result<RepoInfo> {
        self.get_json(&["repos", owner, repo], &[]).await
    }

    pub async fn get_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> crate::Result<BranchInfo> {
        let payload: BranchPayload = self
            .get_json(&["repos", owner, repo, "branches", branch], &[])
            .await?;
        Ok(payload.into())
    }
}
