//! Authentication handling and token resolution
//!
//! A token can reach a request three ways. In order of precedence:
//!
//! 1. passed explicitly to [`GitHubClient::request`](crate::GitHubClient::request)
//! 2. carried by the [`TokenContext`] the client was scoped to for the current
//!    HTTP request
//! 3. the fallback token the [`TokenResolver`] was built with at startup
//!
//! Blank tokens are treated as absent at every level.

/// A resolved GitHub credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubAuth {
    token: String,
}

impl GitHubAuth {
    pub fn new(token: String) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header
    pub fn get_auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Credential supplied by the caller of one HTTP request.
///
/// Owned by the request that created it and dropped with it, so two requests
/// in flight never see each other's token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenContext {
    token: Option<String>,
}

impl TokenContext {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: non_blank(token),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.token.is_some()
    }
}

impl std::fmt::Debug for TokenContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenContext")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Resolves which credential a request carries
#[derive(Clone, Default)]
pub struct TokenResolver {
    fallback: Option<String>,
}

impl TokenResolver {
    pub fn new(fallback: Option<String>) -> Self {
        Self {
            fallback: non_blank(fallback),
        }
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn resolve<'a>(
        &'a self,
        explicit: Option<&'a str>,
        context: &'a TokenContext,
    ) -> Option<GitHubAuth> {
        explicit
            .filter(|token| !token.trim().is_empty())
            .or_else(|| context.token())
            .or(self.fallback.as_deref())
            .map(|token| GitHubAuth::new(token.to_string()))
    }
}

impl std::fmt::Debug for TokenResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResolver")
            .field("fallback", &self.fallback.as_ref().map(|_| "***"))
            .finish()
    }
}

fn non_blank(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.trim().is_empty())
}
