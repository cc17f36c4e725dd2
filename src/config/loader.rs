//! Configuration file loading and environment overrides

use super::validation::ConfigError;
use crate::constants;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variables read at startup
pub mod env_keys {
    pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
    pub const GITHUB_API_BASE: &str = "GITHUB_API_BASE";
    pub const AZURE_API_KEY: &str = "AZURE_API_KEY";
    pub const AZURE_API_ENDPOINT: &str = "AZURE_API_ENDPOINT";
    pub const AZURE_DEPLOYMENT: &str = "AZURE_DEPLOYMENT";
    pub const AZURE_API_VERSION: &str = "AZURE_API_VERSION";
    pub const AZURE_MODEL: &str = "AZURE_MODEL";
    pub const HOST: &str = "ANALYZER_HOST";
    pub const PORT: &str = "ANALYZER_PORT";
    pub const MAX_TOOL_ITERATIONS: &str = "ANALYZER_MAX_TOOL_ITERATIONS";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub github: GitHubConfig,
    pub azure: AzureConfig,
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Serve `GET /debug`
    pub debug_endpoint: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: constants::server::DEFAULT_HOST.to_string(),
            port: constants::server::DEFAULT_PORT,
            debug_endpoint: true,
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub api_base: String,
    /// Fallback token for requests that do not bring their own
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: constants::github::API_BASE.to_string(),
            token: None,
        }
    }
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_base", &self.api_base)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub deployment: Option<String>,
    pub api_version: String,
    pub model: String,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: None,
            deployment: None,
            api_version: constants::azure::DEFAULT_API_VERSION.to_string(),
            model: constants::azure::DEFAULT_MODEL.to_string(),
        }
    }
}

impl std::fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub max_tool_iterations: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_tool_iterations: constants::agent::DEFAULT_MAX_TOOL_ITERATIONS,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Defaults, then the config file (if any), then the process environment.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load_layered(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => {
                let default_path = Path::new(constants::config::DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override settings from environment-style `lookup`; blank values are ignored
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(token) = get(env_keys::GITHUB_TOKEN) {
            self.github.token = Some(token);
        }
        if let Some(base) = get(env_keys::GITHUB_API_BASE) {
            self.github.api_base = base;
        }
        if let Some(key) = get(env_keys::AZURE_API_KEY) {
            self.azure.api_key = Some(key);
        }
        if let Some(endpoint) = get(env_keys::AZURE_API_ENDPOINT) {
            self.azure.endpoint = Some(endpoint);
        }
        if let Some(deployment) = get(env_keys::AZURE_DEPLOYMENT) {
            self.azure.deployment = Some(deployment);
        }
        if let Some(version) = get(env_keys::AZURE_API_VERSION) {
            self.azure.api_version = version;
        }
        if let Some(model) = get(env_keys::AZURE_MODEL) {
            self.azure.model = model;
        }
        if let Some(host) = get(env_keys::HOST) {
            self.server.host = host;
        }
        if let Some(port) = get(env_keys::PORT) {
            self.server.port = parse_number(env_keys::PORT, &port)?;
        }
        if let Some(iterations) = get(env_keys::MAX_TOOL_ITERATIONS) {
            self.agent.max_tool_iterations = parse_number(env_keys::MAX_TOOL_ITERATIONS, &iterations)?;
        }

        Ok(())
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
