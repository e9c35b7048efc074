//! Anthropic Messages API wire types
//!
//! Request and response bodies for the `POST /v1/messages` endpoint, plus
//! the error-body envelope. Conversions into the domain reply types live
//! here so the adapter stays focused on transport behavior.

use serde::{Deserialize, Serialize};
use sous_application::ports::completion_gateway::OutboundMessage;
use sous_domain::session::entities::Role;
use sous_domain::session::reply::{CompletionResponse, ContentBlock, TokenUsage};

/// One message as transmitted on the wire: role and content only.
#[derive(Debug, Serialize)]
pub struct WireMessage<'a> {
    pub role: Role,
    pub content: &'a str,
}

/// Request body for the Messages endpoint. Built fresh per turn; never
/// persisted.
#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl<'a> MessagesRequest<'a> {
    pub fn new(
        model: &'a str,
        max_tokens: u32,
        messages: &'a [OutboundMessage],
        system: Option<&'a str>,
        temperature: f64,
    ) -> Self {
        Self {
            model,
            max_tokens,
            messages: messages
                .iter()
                .map(|message| WireMessage {
                    role: message.role,
                    content: &message.content,
                })
                .collect(),
            system,
            temperature: Some(temperature),
        }
    }
}

/// Response body for a successful completion.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub role: String,
    pub content: Vec<WireContentBlock>,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: WireUsage,
}

#[derive(Debug, Deserialize)]
pub struct WireContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct WireUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl From<MessagesResponse> for CompletionResponse {
    fn from(response: MessagesResponse) -> Self {
        CompletionResponse {
            id: response.id,
            content: response
                .content
                .into_iter()
                .map(|block| ContentBlock {
                    kind: block.kind,
                    text: block.text,
                })
                .collect(),
            usage: TokenUsage {
                input_tokens: response.usage.input_tokens,
                output_tokens: response.usage.output_tokens,
            },
        }
    }
}

/// Error-body envelope: `{"type": "error", "error": {"type", "message"}}`.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}
