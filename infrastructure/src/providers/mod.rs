//! Provider adapters for the completion gateway port

pub mod anthropic;
