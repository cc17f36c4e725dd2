//! Startup validation of the loaded configuration

use super::loader::{Config, env_keys};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {}", .0.join(", "))]
    MissingRequired(Vec<String>),
}

impl Config {
    /// Check that everything needed to serve requests is present.
    ///
    /// All missing settings are reported together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();

        let required = [
            (env_keys::AZURE_API_KEY, &self.azure.api_key),
            (env_keys::AZURE_API_ENDPOINT, &self.azure.endpoint),
            (env_keys::AZURE_DEPLOYMENT, &self.azure.deployment),
            (env_keys::GITHUB_TOKEN, &self.github.token),
        ];
        for (key, value) in required {
            if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                missing.push(key.to_string());
            }
        }

        if !missing.is_empty() {
            return Err(ConfigError::MissingRequired(missing));
        }

        for (key, url) in [
            (env_keys::GITHUB_API_BASE, Some(&self.github.api_base)),
            (env_keys::AZURE_API_ENDPOINT, self.azure.endpoint.as_ref()),
        ] {
            if let Some(url) = url
                && !is_http_url(url)
            {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: url.clone(),
                });
            }
        }

        if self.agent.max_tool_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                key: env_keys::MAX_TOOL_ITERATIONS.to_string(),
                value: "0".to_string(),
            });
        }

        Ok(())
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}
