//! GitHub client implementation
//!
//! Every operation funnels through [`GitHubClient::request`], which builds the
//! URL from path segments, attaches the resolved credential and maps failures
//! onto [`GitHubError`]. The typed operations live in sibling modules that extend
//! the client with `impl` blocks.

use crate::auth::{TokenContext, TokenResolver};
use crate::error::GitHubError;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// GitHub API base URL
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default User-Agent header for API requests
pub const DEFAULT_USER_AGENT: &str = concat!("contrib-analyzer/", env!("CARGO_PKG_VERSION"));

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// GitHub API client for making authenticated, read-only requests.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct GitHubClient {
    pub(crate) client: Client,
    api_base: String,
    resolver: TokenResolver,
    context: TokenContext,
}

impl GitHubClient {
    /// Create a client against `api_base` with the given credential resolver
    pub fn new(api_base: impl Into<String>, resolver: TokenResolver) -> Self {
        Self::with_http_client(Client::new(), api_base, resolver)
    }

    pub fn with_http_client(
        client: Client,
        api_base: impl Into<String>,
        resolver: TokenResolver,
    ) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            client,
            api_base,
            resolver,
            context: TokenContext::empty(),
        }
    }

    /// A copy of this client bound to one request's token context
    pub fn scoped(&self, context: TokenContext) -> Self {
        Self {
            client: self.client.clone(),
            api_base: self.api_base.clone(),
            resolver: self.resolver.clone(),
            context,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn context(&self) -> &TokenContext {
        &self.context
    }

    /// Full URL for an endpoint relative to the API base.
    ///
    /// Each segment is percent-encoded on its own, so `/`, `?` and `#` inside
    /// a name stay part of that segment. Empty, `.` and `..` segments are
    /// rejected.
    pub fn endpoint_url(&self, segments: &[&str]) -> crate::Result<Url> {
        let mut url = Url::parse(&self.api_base).map_err(|e| {
            GitHubError::InvalidUrl(format!("{} is not a valid API base: {}", self.api_base, e))
        })?;

        if let Some(segment) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(GitHubError::InvalidUrl(format!(
                "invalid path segment {:?} in {}",
                segment,
                segments.join("/")
            )));
        }

        url.path_segments_mut()
            .map_err(|_| {
                GitHubError::InvalidUrl(format!("{} cannot carry a path", self.api_base))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Make an authenticated request and decode the JSON body.
    ///
    /// `token` overrides both the scoped context and the fallback credential.
    pub async fn request(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        method: Method,
        token: Option<&str>,
    ) -> crate::Result<Value> {
        let url = self.endpoint_url(segments)?;
        debug!("GitHub API request: {} {} {:?}", method, url, query);

        let mut request = self
            .client
            .request(method, url)
            .header("User-Agent", DEFAULT_USER_AGENT)
            .header("Accept", ACCEPT_HEADER);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(auth) = self.resolver.resolve(token, &self.context) {
            request = request.header("Authorization", auth.get_auth_header());
        }

        let response = request.send().await.map_err(GitHubError::Network)?;
        let status = response.status();
        let body = response.text().await.map_err(GitHubError::Network)?;

        if !status.is_success() {
            return Err(GitHubError::Request {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// `GET` an endpoint and decode it into `T`
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> crate::Result<T> {
        let value = self.request(segments, query, Method::GET, None).await?;
        Ok(serde_json::from_value(value)?)
    }
}
