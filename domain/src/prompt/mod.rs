//! Prompt assembly, query classification, and conversation copy

pub mod classify;
pub mod suggestions;
pub mod template;

pub use classify::{classify_query, QueryType};
pub use suggestions::{suggested_queries, welcome_message, MAX_SUGGESTED_QUERIES};
pub use template::PromptTemplate;
