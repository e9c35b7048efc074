//! Completion gateway port
//!
//! Defines the interface to the chat-completion endpoint, the role-only
//! projection of transcript messages sent on the wire, and the full error
//! taxonomy the conversation layer recovers from.

use crate::config::AssistantParams;
use async_trait::async_trait;
use sous_domain::session::entities::{ChatMessage, Role};
use sous_domain::session::reply::CompletionResponse;
use thiserror::Error;

/// Role/content projection of a transcript message.
///
/// Message ids and timestamps never leave the process; only role and
/// content are transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub role: Role,
    pub content: String,
}

impl From<&ChatMessage> for OutboundMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

fn fmt_retry_after(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(seconds) => format!(". Retry after {seconds} seconds"),
        None => ". Please try again later".to_string(),
    }
}

fn fmt_http_message(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {message}"),
        None => String::new(),
    }
}

/// Errors surfaced by a completion gateway.
///
/// The gateway fully classifies every failure; raw transport errors never
/// leak past it. Source errors are carried as strings so the taxonomy stays
/// free of HTTP-client types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// No API key available from the configured source. Checked before any
    /// network attempt; never retried.
    #[error("Assistant API key is not configured")]
    MissingApiKey,

    /// The endpoint rejected the key (401). Never retried.
    #[error("Invalid or missing API key")]
    InvalidApiKey,

    /// Rate limited (429) with the server's retry-after hint, if it sent
    /// one.
    #[error("Rate limit exceeded{}", fmt_retry_after(.retry_after))]
    RateLimitExceeded { retry_after: Option<u64> },

    /// Any other client error (4xx), with the decoded error-body message
    /// when parseable.
    #[error("HTTP error {status}{}", fmt_http_message(.message))]
    Http { status: u16, message: Option<String> },

    /// Server error (5xx) after the retry budget is exhausted.
    #[error("Server error: {0}")]
    Server(String),

    /// Transport-level failure (connection, timeout) outside any HTTP
    /// status.
    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx body that does not decode as a completion response.
    #[error("Failed to decode completion response: {0}")]
    Decoding(String),

    /// A response that is not recognizable as HTTP at all.
    #[error("Invalid response from the completion endpoint")]
    InvalidResponse,
}

impl CompletionError {
    /// Actionable recovery hint surfaced alongside the description.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CompletionError::MissingApiKey | CompletionError::InvalidApiKey => {
                "Add your API key to the sous config file or the ANTHROPIC_API_KEY environment variable."
            }
            CompletionError::RateLimitExceeded { .. } => {
                "Wait a moment before sending another message."
            }
            CompletionError::Network(_) => "Check your internet connection and try again.",
            _ => "Please try again later.",
        }
    }
}

/// Gateway to the chat-completion endpoint.
///
/// One implementation instance is expected to be shared across every
/// conversation session in the process: its rate-limit gate and usage
/// counters are deliberately global, and making it per-session would change
/// the rate-limiting semantics.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Send the conversation and receive the model's reply.
    async fn complete(
        &self,
        messages: &[OutboundMessage],
        system_prompt: Option<&str>,
        params: &AssistantParams,
    ) -> Result<CompletionResponse, CompletionError>;
}
