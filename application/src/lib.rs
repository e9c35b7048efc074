//! Application layer for sous
//!
//! This crate contains use cases, port definitions, and assistant
//! configuration. It depends only on the domain layer; adapters for the
//! ports live in the infrastructure crate.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::AssistantParams;
pub use ports::{
    completion_gateway::{CompletionError, CompletionGateway, OutboundMessage},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    credentials::{ApiKeySource, NoApiKey, StaticApiKey},
    user_data::{StoreError, UserDataStore},
};
pub use use_cases::conversation::ConversationController;
pub use use_cases::gather_context::ContextAggregator;
