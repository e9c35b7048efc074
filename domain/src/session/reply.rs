//! Completion reply types.
//!
//! Domain view of what the completion endpoint returns. The wire schema
//! allows a reply to carry several content blocks; only the first one is
//! consumed by the conversation layer (see [`CompletionResponse::first_text`]),
//! so trailing blocks are decoded but never read.

/// A single block of content within a completion reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    /// Block type reported by the endpoint (normally `"text"`).
    pub kind: String,
    pub text: String,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

/// Token accounting reported by the completion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// A decoded reply from the completion endpoint. Transient: consumed in the
/// turn that received it, never persisted.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub id: String,
    pub content: Vec<ContentBlock>,
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Text of the first content block, if any block is present.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|block| block.text.as_str())
    }
}
