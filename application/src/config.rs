//! Assistant request parameters

/// Default completion model.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Model and sampling parameters applied to every completion request.
///
/// A fresh wire request is built from these each turn; the struct itself is
/// plain session configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantParams {
    pub model: String,
    pub max_tokens: u32,
    /// Sampling temperature in `[0.0, 1.0]`.
    pub temperature: f64,
}

impl Default for AssistantParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}
