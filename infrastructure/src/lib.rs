//! Infrastructure layer for sous
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the Anthropic Messages API gateway, configuration
//! file loading, the JSONL conversation logger, and an in-memory user-data
//! store for tests and demos.

pub mod config;
pub mod logging;
pub mod providers;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigLoader, FileApiConfig, FileAssistantConfig, FileConfig, FileLoggingConfig};
pub use logging::JsonlConversationLogger;
pub use providers::anthropic::AnthropicGateway;
pub use store::InMemoryUserData;
