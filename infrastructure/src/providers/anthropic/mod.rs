//! Anthropic Messages API adapter
//!
//! `protocol` holds the wire types; `adapter` implements the
//! `CompletionGateway` port with rate limiting and retries.

pub mod adapter;
pub mod protocol;

pub use adapter::AnthropicGateway;
