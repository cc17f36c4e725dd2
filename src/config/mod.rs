//! Configuration management module
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! environment variables, then command-line flags. The result is validated
//! once at startup and any error is fatal.

pub mod loader;
pub mod validation;

pub use loader::{AgentConfig, AzureConfig, Config, GitHubConfig, ServerConfig, env_keys};
pub use validation::ConfigError;
