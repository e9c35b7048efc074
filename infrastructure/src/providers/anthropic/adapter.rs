//! Anthropic Messages API gateway adapter
//!
//! Implements the `CompletionGateway` port with the transport behavior the
//! conversation layer relies on: a global 500 ms spacing between initial
//! dispatches, retry-after-driven retries on 429, exponential backoff on
//! 5xx, immediate failure on auth problems, and full classification of
//! every failure into the `CompletionError` taxonomy.
//!
//! One instance is meant to be shared (`Arc`) by every conversation session
//! in the process. The rate-limit timestamp and usage counters are
//! instance-global on purpose; making them per-session would change the
//! rate-limiting semantics.

use super::protocol::{ErrorEnvelope, MessagesRequest, MessagesResponse};
use crate::config::FileApiConfig;
use sous_application::config::AssistantParams;
use sous_application::ports::completion_gateway::{
    CompletionError, CompletionGateway, OutboundMessage,
};
use sous_application::ports::credentials::ApiKeySource;
use async_trait::async_trait;
use sous_domain::session::reply::CompletionResponse;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, warn};

/// Minimum spacing between initial request dispatches (not retries).
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(500);

/// Retry budget shared by the 429 and 5xx paths.
const MAX_RETRIES: u32 = 3;

/// Per-attempt request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared mutable state: rate-limit gate plus usage counters.
///
/// Process-lifetime state with no teardown; the lock is only ever held for
/// micro-sections, never across an await.
#[derive(Debug, Default)]
struct GatewayState {
    last_request_at: Option<Instant>,
    request_count: u64,
    total_tokens_used: u64,
}

/// Remaining wait before the gate opens, if any.
fn remaining_wait(last: Option<Instant>, now: Instant, min_interval: Duration) -> Option<Duration> {
    let elapsed = now.duration_since(last?);
    if elapsed < min_interval {
        Some(min_interval - elapsed)
    } else {
        None
    }
}

/// Backoff before the next 5xx retry: 2^attempt seconds.
fn server_backoff(attempt: u32) -> Duration {
    Duration::from_secs(1 << attempt)
}

/// The `retry-after` header as whole seconds, if present and parseable.
fn retry_after_header(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
}

/// Rate-limited, retrying client for the Anthropic Messages API.
pub struct AnthropicGateway {
    http: reqwest::Client,
    endpoint: String,
    api_version: String,
    keys: Arc<dyn ApiKeySource>,
    state: Mutex<GatewayState>,
}

impl AnthropicGateway {
    pub fn new(
        endpoint: impl Into<String>,
        api_version: impl Into<String>,
        keys: Arc<dyn ApiKeySource>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_version: api_version.into(),
            keys,
            state: Mutex::new(GatewayState::default()),
        }
    }

    /// Build a gateway from file configuration; the config itself supplies
    /// the key (explicit value or environment lookup).
    pub fn from_config(config: &FileApiConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.version.clone(),
            Arc::new(config.clone()),
        )
    }

    /// Whether a non-empty API key is currently available.
    pub fn is_configured(&self) -> bool {
        self.keys
            .api_key()
            .is_some_and(|key| !key.is_empty())
    }

    /// Requests completed successfully since construction or the last
    /// [`reset_usage`](Self::reset_usage).
    pub fn request_count(&self) -> u64 {
        self.state.lock().map(|state| state.request_count).unwrap_or(0)
    }

    /// Cumulative input+output tokens across successful requests.
    /// Observability only; no policy decision reads this.
    pub fn total_tokens_used(&self) -> u64 {
        self.state
            .lock()
            .map(|state| state.total_tokens_used)
            .unwrap_or(0)
    }

    /// Reset the usage counters (not the rate-limit gate).
    pub fn reset_usage(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.request_count = 0;
            state.total_tokens_used = 0;
        }
    }

    /// Claim a dispatch slot, or report how long to wait before retrying
    /// the claim. Claiming stamps `last_request_at` so concurrent callers
    /// serialize against the same gate.
    fn try_claim(&self) -> Option<Duration> {
        let Ok(mut state) = self.state.lock() else {
            return None;
        };
        let now = Instant::now();
        match remaining_wait(state.last_request_at, now, MIN_REQUEST_INTERVAL) {
            Some(wait) => Some(wait),
            None => {
                state.last_request_at = Some(now);
                None
            }
        }
    }

    /// Suspend until the 500 ms inter-request gate opens. Applies to
    /// initial dispatches only; retries inside one send do not re-enter.
    async fn enforce_rate_limit(&self) {
        while let Some(wait) = self.try_claim() {
            debug!(wait_ms = wait.as_millis() as u64, "rate limit gate: waiting");
            sleep(wait).await;
        }
    }

    async fn dispatch_with_retry(
        &self,
        api_key: &str,
        request: &MessagesRequest<'_>,
    ) -> Result<CompletionResponse, CompletionError> {
        let mut attempt: u32 = 0;

        loop {
            let response = self
                .http
                .post(&self.endpoint)
                .timeout(REQUEST_TIMEOUT)
                .header("x-api-key", api_key)
                .header("anthropic-version", &self.api_version)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .json(request)
                .send()
                .await
                .map_err(|error| CompletionError::Network(error.to_string()))?;

            let status = response.status().as_u16();
            match status {
                200..=299 => return Self::decode_success(response).await,

                429 => {
                    let retry_after = retry_after_header(response.headers());
                    // Retry only when the server said how long to wait and
                    // budget remains; a 429 without the header fails at
                    // once, no invented default backoff.
                    if attempt < MAX_RETRIES
                        && let Some(seconds) = retry_after
                    {
                        debug!(seconds, attempt, "rate limited upstream; honoring retry-after");
                        sleep(Duration::from_secs(seconds)).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(CompletionError::RateLimitExceeded { retry_after });
                }

                401 => return Err(CompletionError::InvalidApiKey),

                400..=499 => {
                    let message = Self::decode_error_message(response).await;
                    return Err(CompletionError::Http { status, message });
                }

                500..=599 => {
                    if attempt < MAX_RETRIES {
                        let backoff = server_backoff(attempt);
                        warn!(
                            status,
                            attempt,
                            backoff_secs = backoff.as_secs(),
                            "server error; backing off"
                        );
                        sleep(backoff).await;
                        attempt += 1;
                        continue;
                    }
                    let message = Self::decode_error_message(response).await;
                    return Err(CompletionError::Server(
                        message.unwrap_or_else(|| "Unknown server error".to_string()),
                    ));
                }

                _ => {
                    return Err(CompletionError::Http {
                        status,
                        message: None,
                    });
                }
            }
        }
    }

    async fn decode_success(
        response: reqwest::Response,
    ) -> Result<CompletionResponse, CompletionError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|error| CompletionError::Network(error.to_string()))?;
        let decoded: MessagesResponse = serde_json::from_slice(&bytes)
            .map_err(|error| CompletionError::Decoding(error.to_string()))?;
        debug!(
            model = %decoded.model,
            stop_reason = ?decoded.stop_reason,
            "completion received"
        );
        Ok(decoded.into())
    }

    /// Best-effort extraction of the error-body message: the documented
    /// envelope when it parses, the raw body text otherwise.
    async fn decode_error_message(response: reqwest::Response) -> Option<String> {
        let bytes = response.bytes().await.ok()?;
        match serde_json::from_slice::<ErrorEnvelope>(&bytes) {
            Ok(envelope) => Some(envelope.error.message),
            Err(_) => {
                let raw = String::from_utf8_lossy(&bytes).into_owned();
                if raw.is_empty() { None } else { Some(raw) }
            }
        }
    }
}

#[async_trait]
impl CompletionGateway for AnthropicGateway {
    async fn complete(
        &self,
        messages: &[OutboundMessage],
        system_prompt: Option<&str>,
        params: &AssistantParams,
    ) -> Result<CompletionResponse, CompletionError> {
        self.enforce_rate_limit().await;

        let api_key = self
            .keys
            .api_key()
            .filter(|key| !key.is_empty())
            .ok_or(CompletionError::MissingApiKey)?;

        let request = MessagesRequest::new(
            &params.model,
            params.max_tokens,
            messages,
            system_prompt,
            params.temperature,
        );

        let response = self.dispatch_with_retry(&api_key, &request).await?;

        if let Ok(mut state) = self.state.lock() {
            state.request_count += 1;
            state.total_tokens_used += response.usage.total();
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_wait_respects_the_interval() {
        let interval = Duration::from_millis(500);
        let now = Instant::now();

        assert_eq!(remaining_wait(None, now, interval), None);

        let wait = remaining_wait(Some(now), now + Duration::from_millis(200), interval);
        assert_eq!(wait, Some(Duration::from_millis(300)));

        assert_eq!(
            remaining_wait(Some(now), now + Duration::from_millis(700), interval),
            None
        );
    }

    #[test]
    fn server_backoff_doubles_per_attempt() {
        assert_eq!(server_backoff(0), Duration::from_secs(1));
        assert_eq!(server_backoff(1), Duration::from_secs(2));
        assert_eq!(server_backoff(2), Duration::from_secs(4));
    }

    #[test]
    fn retry_after_header_parses_whole_seconds_only() {
        let mut headers = reqwest::header::HeaderMap::new();
        assert_eq!(retry_after_header(&headers), None);

        headers.insert(reqwest::header::RETRY_AFTER, "2".parse().unwrap());
        assert_eq!(retry_after_header(&headers), Some(2));

        // HTTP-date form is treated as absent.
        headers.insert(
            reqwest::header::RETRY_AFTER,
            "Wed, 21 Oct 2025 07:28:00 GMT".parse().unwrap(),
        );
        assert_eq!(retry_after_header(&headers), None);
    }
}
