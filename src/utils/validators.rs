//! Request validation
//!
//! Centralized checks for the fields of an analysis request, kept separate
//! from the HTTP layer so they can be tested directly.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use thiserror::Error;

/// GitHub owner and repository names: ASCII letters, digits, `.`, `_`, `-`
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid name pattern"));

const MAX_NAME_LENGTH: usize = 100;

/// Enumeration of possible validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid {field}: '{value}'")]
    InvalidName { field: &'static str, value: String },

    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

/// Body of `POST /api/analyze-contribution` as received
#[derive(Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    pub project: Option<String>,
    pub author: Option<String>,
    pub owner: Option<String>,
    pub github_token: Option<String>,
}

/// An analysis request whose required fields are present and well formed
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub project: String,
    pub author: String,
    pub owner: String,
    pub github_token: Option<String>,
}

impl std::fmt::Debug for ValidatedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedRequest")
            .field("project", &self.project)
            .field("author", &self.author)
            .field("owner", &self.owner)
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Validates an analysis request.
///
/// Missing fields are reported before malformed ones, all at once.
pub fn validate_analyze_request(request: AnalyzeRequest) -> Result<ValidatedRequest, ValidationError> {
    let project = present(request.project);
    let author = present(request.author);
    let owner = present(request.owner);

    let mut missing = Vec::new();
    if project.is_none() {
        missing.push("project");
    }
    if author.is_none() {
        missing.push("author");
    }
    if owner.is_none() {
        missing.push("owner");
    }

    let (Some(project), Some(author), Some(owner)) = (project, author, owner) else {
        return Err(ValidationError::MissingFields(missing));
    };

    validate_name("owner", &owner)?;
    validate_name("project", &project)?;

    Ok(ValidatedRequest {
        project,
        author,
        owner,
        github_token: present(request.github_token),
    })
}

/// Check an owner or repository name
pub fn validate_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.len() > MAX_NAME_LENGTH || !NAME_PATTERN.is_match(value) || value == "." || value == ".."
    {
        return Err(ValidationError::InvalidName {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
