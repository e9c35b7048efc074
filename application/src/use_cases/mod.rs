//! Use cases orchestrating the conversation pipeline

pub mod conversation;
pub mod gather_context;

pub use conversation::ConversationController;
pub use gather_context::ContextAggregator;
