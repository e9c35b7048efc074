//! Chat session: transcript entities and completion reply types

pub mod entities;
pub mod reply;

pub use entities::{ChatMessage, Conversation, Role};
pub use reply::{CompletionResponse, ContentBlock, TokenUsage};
