//! Contrib Analyzer - An HTTP service that rates an author's contribution to a GitHub repository

pub mod agent;
pub mod config;
pub mod constants;
pub mod contribution;
pub mod orchestrator;
pub mod server;
pub mod utils;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use agent::{Agent, AgentFactory, AgentMessage, MessageKind};
pub use config::Config;
pub use orchestrator::{AgentOutcome, build_task, run_agent};
pub use server::{AppState, router};
