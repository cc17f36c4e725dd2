//! Central constants for the contribution analyzer

/// Default values for the HTTP server
pub mod server {
    pub const DEFAULT_HOST: &str = "localhost";

    pub const DEFAULT_PORT: u16 = 8765;

    /// Body returned by `GET /health`
    pub const HEALTH_STATUS: &str = "Backend is running";
}

/// Default values for GitHub operations
pub mod github {
    pub use analyzer_github::{DEFAULT_API_BASE as API_BASE, DEFAULT_BRANCH};

    /// Commits sampled by the contribution report tool
    pub const REPORT_COMMIT_COUNT: usize = 100;
}

/// Default values for the chat model
pub mod azure {
    pub const DEFAULT_MODEL: &str = "gpt-4o-2024-05-13";

    /// Oldest Azure OpenAI API version with tool calling
    pub const DEFAULT_API_VERSION: &str = "2024-06-01";
}

/// Default values for the agent loop
pub mod agent {
    pub const AGENT_NAME: &str = "contribution_agent";

    /// Source recorded on messages that came from the caller
    pub const USER_SOURCE: &str = "user";

    /// Model turns that may request tools before a text reply is forced
    pub const DEFAULT_MAX_TOOL_ITERATIONS: u32 = 10;

    /// Answer returned when the agent produced no text message
    pub const NO_RESPONSE: &str = "No response generated";
}

/// Default values for configuration
pub mod config {
    /// Configuration file picked up from the working directory
    pub const DEFAULT_CONFIG_FILE: &str = "contrib-analyzer.yaml";
}
