//! GitHub tools exposed to the model

use super::openai::ToolDefinition;
use crate::constants::github::{DEFAULT_BRANCH, REPORT_COMMIT_COUNT};
use crate::contribution::ContributionReport;
use analyzer_github::{DEFAULT_COMMIT_COUNT, GitHubClient};
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::info;

pub const GET_LATEST_COMMIT: &str = "get_latest_commit";
pub const GET_COMMIT_DIFF: &str = "get_commit_diff";
pub const GET_RECENT_COMMITS: &str = "get_recent_commits";
pub const GET_FILE_CONTENT: &str = "get_file_content";
pub const GET_REPOSITORY: &str = "get_repository";
pub const GET_BRANCH: &str = "get_branch";
pub const ANALYZE_AUTHOR_CONTRIBUTION: &str = "analyze_author_contribution";

/// Something that can run the tools a model asks for
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Tools advertised to the model
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Run tool `name` with JSON-encoded `arguments`, returning its text output
    async fn call(&self, name: &str, arguments: &str) -> Result<String>;
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_count() -> usize {
    DEFAULT_COMMIT_COUNT
}

fn default_report_count() -> usize {
    REPORT_COMMIT_COUNT
}

#[derive(Debug, Deserialize)]
struct RepoArgs {
    owner: String,
    repo: String,
}

#[derive(Debug, Deserialize)]
struct BranchArgs {
    owner: String,
    repo: String,
    #[serde(default = "default_branch")]
    branch: String,
}

#[derive(Debug, Deserialize)]
struct CommitDiffArgs {
    owner: String,
    repo: String,
    commit_sha: String,
}

#[derive(Debug, Deserialize)]
struct RecentCommitsArgs {
    owner: String,
    repo: String,
    #[serde(default = "default_count")]
    count: usize,
    #[serde(default = "default_branch")]
    branch: String,
}

#[derive(Debug, Deserialize)]
struct FileContentArgs {
    owner: String,
    repo: String,
    file_path: String,
    #[serde(default = "default_branch")]
    branch: String,
}

#[derive(Debug, Deserialize)]
struct ContributionArgs {
    owner: String,
    repo: String,
    author: String,
    #[serde(default = "default_report_count")]
    count: usize,
    #[serde(default = "default_branch")]
    branch: String,
}

fn parse_args<T: DeserializeOwned>(name: &str, arguments: &str) -> Result<T> {
    let arguments = if arguments.trim().is_empty() {
        "{}"
    } else {
        arguments
    };
    serde_json::from_str(arguments).with_context(|| format!("Invalid arguments for {}", name))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize tool result")
}

/// GitHub read-only operations, bound to one client
#[derive(Debug, Clone)]
pub struct GitHubTools {
    client: GitHubClient,
}

impl GitHubTools {
    /// `client` should already be scoped to the request's token context
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    async fn analyze_author_contribution(&self, args: ContributionArgs) -> Result<String> {
        let commits = self
            .client
            .get_recent_commits(&args.owner, &args.repo, args.count, &args.branch)
            .await?;
        let report = ContributionReport::from_commits(&args.repo, &args.author, &commits)?;

        info!(
            "Contribution of {} to {}/{}: {}/{} commits, rating {}",
            args.author,
            args.owner,
            args.repo,
            report.author_commits,
            report.total_commits,
            report.rating
        );

        Ok(report.render())
    }
}

#[async_trait]
impl ToolExecutor for GitHubTools {
    fn definitions(&self) -> Vec<ToolDefinition> {
        let owner = json!({"type": "string", "description": "Repository owner (user or organization)"});
        let repo = json!({"type": "string", "description": "Repository name"});
        let branch = json!({"type": "string", "description": "Branch name", "default": DEFAULT_BRANCH});

        vec![
            ToolDefinition::function(
                GET_LATEST_COMMIT,
                "Get the latest commit from a repository branch.",
                json!({
                    "type": "object",
                    "properties": {"owner": owner, "repo": repo, "branch": branch},
                    "required": ["owner", "repo"]
                }),
            ),
            ToolDefinition::function(
                GET_COMMIT_DIFF,
                "Get detailed diff for a specific commit, with per-file changes and totals.",
                json!({
                    "type": "object",
                    "properties": {
                        "owner": owner,
                        "repo": repo,
                        "commit_sha": {"type": "string", "description": "Commit SHA"}
                    },
                    "required": ["owner", "repo", "commit_sha"]
                }),
            ),
            ToolDefinition::function(
                GET_RECENT_COMMITS,
                "Get recent commits from a repository branch, newest first.",
                json!({
                    "type": "object",
                    "properties": {
                        "owner": owner,
                        "repo": repo,
                        "count": {
                            "type": "integer",
                            "description": "Number of commits (at most 100)",
                            "default": DEFAULT_COMMIT_COUNT
                        },
                        "branch": branch
                    },
                    "required": ["owner", "repo"]
                }),
            ),
            ToolDefinition::function(
                GET_FILE_CONTENT,
                "Get content of a specific file from a repository.",
                json!({
                    "type": "object",
                    "properties": {
                        "owner": owner,
                        "repo": repo,
                        "file_path": {"type": "string", "description": "Path of the file in the repository"},
                        "branch": branch
                    },
                    "required": ["owner", "repo", "file_path"]
                }),
            ),
            ToolDefinition::function(
                GET_REPOSITORY,
                "Get repository metadata such as description and default branch.",
                json!({
                    "type": "object",
                    "properties": {"owner": owner, "repo": repo},
                    "required": ["owner", "repo"]
                }),
            ),
            ToolDefinition::function(
                GET_BRANCH,
                "Get branch details: tip commit SHA and protection status.",
                json!({
                    "type": "object",
                    "properties": {"owner": owner, "repo": repo, "branch": branch},
                    "required": ["owner", "repo"]
                }),
            ),
            ToolDefinition::function(
                ANALYZE_AUTHOR_CONTRIBUTION,
                "Count an author's share of the recent commits of a repository and rate it out of 6. \
                 Returns the contribution report in its final format.",
                json!({
                    "type": "object",
                    "properties": {
                        "owner": owner,
                        "repo": repo,
                        "author": {"type": "string", "description": "Commit author name"},
                        "count": {
                            "type": "integer",
                            "description": "Number of recent commits to sample (at most 100)",
                            "default": REPORT_COMMIT_COUNT
                        },
                        "branch": branch
                    },
                    "required": ["owner", "repo", "author"]
                }),
            ),
        ]
    }

    async fn call(&self, name: &str, arguments: &str) -> Result<String> {
        match name {
            GET_LATEST_COMMIT => {
                let args: BranchArgs = parse_args(name, arguments)?;
                let commit = self
                    .client
                    .get_latest_commit(&args.owner, &args.repo, &args.branch)
                    .await?;
                to_json(&commit)
            }
            GET_COMMIT_DIFF => {
                let args: CommitDiffArgs = parse_args(name, arguments)?;
                let diff = self
                    .client
                    .get_commit_diff(&args.owner, &args.repo, &args.commit_sha)
                    .await?;
                to_json(&diff)
            }
            GET_RECENT_COMMITS => {
                let args: RecentCommitsArgs = parse_args(name, arguments)?;
                let commits = self
                    .client
                    .get_recent_commits(&args.owner, &args.repo, args.count, &args.branch)
                    .await?;
                to_json(&commits)
            }
            GET_FILE_CONTENT => {
                let args: FileContentArgs = parse_args(name, arguments)?;
                let content = self
                    .client
                    .get_file_content(&args.owner, &args.repo, &args.file_path, &args.branch)
                    .await?;
                to_json(&content)
            }
            GET_REPOSITORY => {
                let args: RepoArgs = parse_args(name, arguments)?;
                let repository = self.client.get_repository(&args.owner, &args.repo).await?;
                to_json(&repository)
            }
            GET_BRANCH => {
                let args: BranchArgs = parse_args(name, arguments)?;
                let branch = self
                    .client
                    .get_branch(&args.owner, &args.repo, &args.branch)
                    .await?;
                to_json(&branch)
            }
            ANALYZE_AUTHOR_CONTRIBUTION => {
                let args: ContributionArgs = parse_args(name, arguments)?;
                self.analyze_author_contribution(args).await
            }
            _ => bail!("Unknown tool: {}", name),
        }
    }
}
