//! Commit operations

use crate::client::GitHubClient;
use crate::types::{CommitDiff, CommitInfo, CommitPayload};
use crate::MAX_PER_PAGE;

impl GitHubClient {
    /// Get the tip commit of a branch
    ///
    /// # Example
    /// ```rust,no_run
    /// use analyzer_github::{GitHubClient, TokenResolver};
    ///
    /// # async fn example() -> analyzer_github::Result<()> {
    /// let client = GitHubClient::new(
    ///     "https://api.github.com",
    ///     TokenResolver::new(Some("github_token".to_string())),
    /// );
    /// let commit = client.get_latest_commit("octocat", "Hello-World", "main").await?;
    /// println!("{} by {}", commit.sha, commit.author);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_latest_commit(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> crate::Result<CommitInfo> {
        let payload: CommitPayload = self
            .get_json(&["repos", owner, repo, "commits", branch], &[])
            .await?;
        Ok(payload.into())
    }

    /// Get one commit with its per-file changes.
    ///
    /// Addition and deletion totals are summed client-side from the files.
    pub async fn get_commit_diff(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> crate::Result<CommitDiff> {
        let payload: CommitPayload = self
            .get_json(&["repos", owner, repo, "commits", sha], &[])
            .await?;
        Ok(payload.into())
    }

    /// Get up to `count` most recent commits on a branch, newest first.
    ///
    /// Only a single page is fetched, so `count` is capped at 100.
    pub async fn get_recent_commits(
        &self,
        owner: &str,
        repo: &str,
        count: usize,
        branch: &str,
    ) -> crate::Result<Vec<CommitInfo>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let per_page = count.min(MAX_PER_PAGE).to_string();
        let payload: Vec<CommitPayload> = self
            .get_json(
                &["repos", owner, repo, "commits"],
                &[("sha", branch), ("per_page", &per_page)],
            )
            .await?;

        Ok(payload
            .into_iter()
            .take(count)
            .map(CommitInfo::from)
            .collect())
    }
}
