//! Contribution scoring
//!
//! Rates an author's share of a repository's commits on a scale of 1 to 6.
//!
//! | share of commits | rating |
//! |------------------|--------|
//! | up to 10%        | 1      |
//! | up to 25%        | 2      |
//! | up to 40%        | 3      |
//! | up to 55%        | 4      |
//! | up to 75%        | 5      |
//! | above 75%        | 6      |
//!
//! Band edges are inclusive on the upper side, and a share between two edges
//! always lands in the higher band, so an author with exactly half of the
//! commits is rated 4.

use analyzer_github::CommitInfo;
use serde::Serialize;
use thiserror::Error;

pub const MAX_RATING: u8 = 6;

/// Upper edge (inclusive, in percent) of each rating band
const BANDS: [(f64, u8); 5] = [(10.0, 1), (25.0, 2), (40.0, 3), (55.0, 4), (75.0, 5)];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContributionError {
    #[error("Cannot rate a contribution to a repository with no commits")]
    NoCommits,

    #[error("Author has {author_commits} commits but the sample only has {total_commits}")]
    MoreThanTotal {
        author_commits: usize,
        total_commits: usize,
    },
}

/// Share of commits, in percent
pub fn contribution_percentage(
    author_commits: usize,
    total_commits: usize,
) -> Result<f64, ContributionError> {
    if total_commits == 0 {
        return Err(ContributionError::NoCommits);
    }
    if author_commits > total_commits {
        return Err(ContributionError::MoreThanTotal {
            author_commits,
            total_commits,
        });
    }
    Ok(author_commits as f64 / total_commits as f64 * 100.0)
}

/// Rating for an already computed percentage
pub fn rating_for_percentage(percentage: f64) -> u8 {
    BANDS
        .iter()
        .find(|(upper, _)| percentage <= *upper)
        .map(|(_, rating)| *rating)
        .unwrap_or(MAX_RATING)
}

pub fn rate_contribution(
    author_commits: usize,
    total_commits: usize,
) -> Result<u8, ContributionError> {
    contribution_percentage(author_commits, total_commits).map(rating_for_percentage)
}

/// Whether `commit` was authored by `author`, ignoring case and surrounding space
pub fn is_authored_by(commit: &CommitInfo, author: &str) -> bool {
    commit.author.trim().to_lowercase() == author.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionReport {
    pub project: String,
    pub author: String,
    pub total_commits: usize,
    pub author_commits: usize,
    pub percentage: f64,
    pub rating: u8,
}

impl ContributionReport {
    /// Build a report from a sample of commits
    pub fn from_commits(
        project: &str,
        author: &str,
        commits: &[CommitInfo],
    ) -> Result<Self, ContributionError> {
        let total_commits = commits.len();
        let author_commits = commits.iter().filter(|c| is_authored_by(c, author)).count();
        let percentage = contribution_percentage(author_commits, total_commits)?;

        Ok(Self {
            project: project.to_string(),
            author: author.to_string(),
            total_commits,
            author_commits,
            percentage,
            rating: rating_for_percentage(percentage),
        })
    }

    /// The fixed text layout returned to callers
    pub fn render(&self) -> String {
        format!(
            "Project name: {}\n\
             Author name: {}\n\
             Total commits: {}\n\
             No of commits by author: {}\n\
             Contribution percentage: {:.1}%\n\
             Contribution Rating: {}/{}",
            self.project,
            self.author,
            self.total_commits,
            self.author_commits,
            self.percentage,
            self.rating,
            MAX_RATING
        )
    }
}
