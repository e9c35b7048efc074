//! API credential port

/// Supplies the completion API key.
///
/// Queried on every send so key rotation in the backing config takes effect
/// without rebuilding the gateway. Returning `None` (or an empty string)
/// makes the gateway fail the turn with `MissingApiKey` before any network
/// attempt.
pub trait ApiKeySource: Send + Sync {
    fn api_key(&self) -> Option<String>;
}

/// Fixed-key source for tests and embedding hosts.
pub struct StaticApiKey(pub String);

impl ApiKeySource for StaticApiKey {
    fn api_key(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Source that never yields a key.
pub struct NoApiKey;

impl ApiKeySource for NoApiKey {
    fn api_key(&self) -> Option<String> {
        None
    }
}
