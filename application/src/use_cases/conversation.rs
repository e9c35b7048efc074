//! Conversation controller use case.
//!
//! Orchestrates one chat turn end to end: append the user message, build
//! the privacy-respecting context and system prompt, call the completion
//! gateway, and append the assistant reply (or a synthesized error message
//! when the turn fails). Also owns the mutable session state: transcript,
//! loading flag, last error, privacy flags, and the statistics snapshot.

use crate::config::AssistantParams;
use crate::ports::completion_gateway::{CompletionGateway, OutboundMessage};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::user_data::UserDataStore;
use crate::use_cases::gather_context::ContextAggregator;
use sous_domain::context::stats;
use sous_domain::context::value_objects::{DataSource, PrivacyFlags, UserStatistics};
use sous_domain::prompt::{suggestions, PromptTemplate};
use sous_domain::session::entities::{ChatMessage, Conversation};
use sous_domain::time::ClockSnapshot;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Controller for a single conversation session.
///
/// Not meant for concurrent turns: `send_message` takes `&mut self`, and
/// the `is_loading` flag is the signal callers surface to keep the user
/// from firing a second turn while one is in flight.
pub struct ConversationController<G: CompletionGateway, S: UserDataStore> {
    gateway: Arc<G>,
    aggregator: ContextAggregator<S>,
    params: AssistantParams,
    conversation: Conversation,
    is_loading: bool,
    last_error: Option<String>,
    flags: PrivacyFlags,
    statistics: UserStatistics,
    logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<G: CompletionGateway, S: UserDataStore> ConversationController<G, S> {
    /// Create a controller and open the transcript with a welcome message.
    pub fn new(gateway: Arc<G>, store: Arc<S>, params: AssistantParams) -> Self {
        let aggregator = ContextAggregator::new(store);
        let snapshot = ClockSnapshot::now();
        let flags = PrivacyFlags::default();
        let statistics = aggregator.user_statistics(&snapshot);

        let mut conversation = Conversation::new();
        conversation.push(ChatMessage::assistant(suggestions::welcome_message(
            &statistics,
            &flags,
            &snapshot,
        )));

        Self {
            gateway,
            aggregator,
            params,
            conversation,
            is_loading: false,
            last_error: None,
            flags,
            statistics,
            logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    /// Set a conversation logger for structured event logging.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Attach a cancellation token; a cancelled token abandons the in-flight
    /// turn at its next suspension point.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn flags(&self) -> &PrivacyFlags {
        &self.flags
    }

    pub fn statistics(&self) -> &UserStatistics {
        &self.statistics
    }

    /// Suggested queries for the current statistics and flags.
    pub fn suggested_queries(&self) -> Vec<String> {
        suggestions::suggested_queries(&self.statistics, &self.flags, &ClockSnapshot::now())
    }

    /// Run one turn. Empty or whitespace-only input is a no-op.
    pub async fn send_message(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }

        self.conversation.push(ChatMessage::user(text));
        self.last_error = None;
        self.is_loading = true;
        self.logger.log(ConversationEvent::new(
            "user_message",
            serde_json::json!({ "content": text }),
        ));

        let snapshot = ClockSnapshot::now();
        let context = self.aggregator.build_context(&self.flags, &snapshot);
        let system_prompt = PromptTemplate::system_prompt(&context);
        let outbound: Vec<OutboundMessage> = self
            .conversation
            .messages()
            .iter()
            .map(OutboundMessage::from)
            .collect();

        let gateway = Arc::clone(&self.gateway);
        let params = self.params.clone();
        let turn = gateway.complete(&outbound, Some(&system_prompt), &params);

        let result = match self.cancellation_token.clone() {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        // Abandoned turn: drop the in-flight future (which
                        // cancels its sleeps and the network call), append
                        // nothing, and settle the loading flag.
                        debug!("turn cancelled by caller");
                        self.is_loading = false;
                        return;
                    }
                    result = turn => result,
                }
            }
            None => turn.await,
        };

        match result {
            Ok(response) => {
                if let Some(reply) = response.first_text() {
                    self.logger.log(ConversationEvent::new(
                        "assistant_reply",
                        serde_json::json!({
                            "id": response.id,
                            "input_tokens": response.usage.input_tokens,
                            "output_tokens": response.usage.output_tokens,
                            "bytes": reply.len(),
                        }),
                    ));
                    self.conversation.push(ChatMessage::assistant(reply));
                }
                // A reply with no content blocks appends nothing.
            }
            Err(error) => {
                warn!("completion failed: {error}");
                self.last_error = Some(error.to_string());
                self.logger.log(ConversationEvent::new(
                    "completion_failed",
                    serde_json::json!({ "error": error.to_string() }),
                ));
                self.conversation.push(ChatMessage::assistant(format!(
                    "❌ Sorry, I encountered an error: {error}.\n\n{}",
                    error.recovery_suggestion()
                )));
            }
        }

        self.is_loading = false;
    }

    /// Recompute statistics from the store.
    ///
    /// Returns a human sentence describing the change when at least one of
    /// the three counters moved, for hosts that surface a "your data
    /// changed" notification.
    pub fn refresh_statistics(&mut self) -> Option<String> {
        let fresh = self.aggregator.user_statistics(&ClockSnapshot::now());
        let change = stats::describe_change(&self.statistics, &fresh);
        self.statistics = fresh;
        change
    }

    /// Hard reset: discard the transcript, recompute statistics, and open a
    /// fresh welcome message. Nothing is archived.
    pub fn clear_conversation(&mut self) {
        self.conversation.clear();
        self.refresh_statistics();
        let snapshot = ClockSnapshot::now();
        self.conversation.push(ChatMessage::assistant(
            suggestions::welcome_message(&self.statistics, &self.flags, &snapshot),
        ));
        self.last_error = None;
        self.logger.log(ConversationEvent::new(
            "conversation_cleared",
            serde_json::json!({}),
        ));
    }

    /// Toggle one privacy flag.
    ///
    /// Affects only future context builds; messages already in the
    /// transcript are never rewritten or re-tagged.
    pub fn set_source_enabled(&mut self, source: DataSource, enabled: bool) {
        self.flags.set(source, enabled);
        self.refresh_statistics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::completion_gateway::CompletionError;
    use crate::ports::user_data::StoreError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use sous_domain::context::entities::{MealPlanEntry, SavedRecipe, ShoppingItem};
    use sous_domain::session::entities::Role;
    use sous_domain::session::reply::{CompletionResponse, ContentBlock, TokenUsage};
    use std::sync::Mutex;

    struct EmptyStore;

    impl UserDataStore for EmptyStore {
        fn saved_recipes(&self) -> Result<Vec<SavedRecipe>, StoreError> {
            Ok(vec![])
        }
        fn shopping_items(&self) -> Result<Vec<ShoppingItem>, StoreError> {
            Ok(vec![])
        }
        fn meal_plan_entries(
            &self,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<MealPlanEntry>, StoreError> {
            Ok(vec![])
        }
    }

    /// Gateway scripted with a fixed sequence of outcomes.
    struct ScriptedGateway {
        script: Mutex<Vec<Result<CompletionResponse, CompletionError>>>,
        calls: Mutex<usize>,
        seen_systems: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new(script: Vec<Result<CompletionResponse, CompletionError>>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: Mutex::new(0),
                seen_systems: Mutex::new(vec![]),
            }
        }

        fn replying(text: &str) -> Self {
            Self::new(vec![Ok(CompletionResponse {
                id: "msg_test".to_string(),
                content: vec![ContentBlock::text(text)],
                usage: TokenUsage {
                    input_tokens: 10,
                    output_tokens: 5,
                },
            })])
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl CompletionGateway for ScriptedGateway {
        async fn complete(
            &self,
            _messages: &[OutboundMessage],
            system_prompt: Option<&str>,
            _params: &AssistantParams,
        ) -> Result<CompletionResponse, CompletionError> {
            *self.calls.lock().unwrap() += 1;
            if let Some(system) = system_prompt {
                self.seen_systems.lock().unwrap().push(system.to_string());
            }
            self.script
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(CompletionError::InvalidResponse))
        }
    }

    fn controller(
        gateway: ScriptedGateway,
    ) -> (
        ConversationController<ScriptedGateway, EmptyStore>,
        Arc<ScriptedGateway>,
    ) {
        let gateway = Arc::new(gateway);
        let controller = ConversationController::new(
            gateway.clone(),
            Arc::new(EmptyStore),
            AssistantParams::default(),
        );
        (controller, gateway)
    }

    #[tokio::test]
    async fn starts_with_exactly_one_welcome_message() {
        let (controller, _) = controller(ScriptedGateway::new(vec![]));
        assert_eq!(controller.messages().len(), 1);
        assert_eq!(controller.messages()[0].role, Role::Assistant);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn blank_input_is_a_no_op() {
        let (mut controller, gateway) = controller(ScriptedGateway::replying("hi"));
        controller.send_message("").await;
        controller.send_message("   ").await;
        controller.send_message("\n\t ").await;

        assert_eq!(controller.messages().len(), 1);
        assert!(!controller.is_loading());
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn successful_turn_appends_user_then_assistant() {
        let (mut controller, _) = controller(ScriptedGateway::replying("Try a stir fry!"));
        controller.send_message("what's for dinner?").await;

        let messages = controller.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "what's for dinner?");
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].content, "Try a stir fry!");
        assert!(!controller.is_loading());
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn empty_content_blocks_append_no_assistant_message() {
        let (mut controller, _) = controller(ScriptedGateway::new(vec![Ok(CompletionResponse {
            id: "msg_empty".to_string(),
            content: vec![],
            usage: TokenUsage::default(),
        })]));
        controller.send_message("hello?").await;

        // Welcome + user message only; the empty reply is dropped silently.
        assert_eq!(controller.messages().len(), 2);
        assert!(controller.last_error().is_none());
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn failed_turn_appends_one_error_message_and_clears_loading() {
        let (mut controller, _) = controller(ScriptedGateway::new(vec![Err(
            CompletionError::Network("connection refused".to_string()),
        )]));
        controller.send_message("hello?").await;

        let messages = controller.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].role, Role::Assistant);
        assert!(messages[2].content.contains("Sorry, I encountered an error"));
        assert!(messages[2].content.contains("Check your internet connection"));
        assert!(!controller.is_loading());
        assert!(controller.last_error().unwrap().contains("Network error"));
    }

    #[tokio::test]
    async fn toggling_a_flag_never_rewrites_history() {
        let (mut controller, _) = controller(ScriptedGateway::replying("reply"));
        controller.send_message("first message").await;

        let before: Vec<(String, String)> = controller
            .messages()
            .iter()
            .map(|m| (m.id.clone(), m.content.clone()))
            .collect();

        controller.set_source_enabled(DataSource::ShoppingList, false);
        controller.set_source_enabled(DataSource::SavedRecipes, false);

        let after: Vec<(String, String)> = controller
            .messages()
            .iter()
            .map(|m| (m.id.clone(), m.content.clone()))
            .collect();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn flag_change_affects_only_future_context_builds() {
        let (mut controller, gateway) = controller(ScriptedGateway::new(vec![
            Ok(CompletionResponse {
                id: "msg_2".to_string(),
                content: vec![ContentBlock::text("second")],
                usage: TokenUsage::default(),
            }),
            Ok(CompletionResponse {
                id: "msg_1".to_string(),
                content: vec![ContentBlock::text("first")],
                usage: TokenUsage::default(),
            }),
        ]));

        controller.send_message("one").await;
        controller.set_source_enabled(DataSource::MealPlan, false);
        controller.send_message("two").await;

        let systems = gateway.seen_systems.lock().unwrap();
        assert!(systems[0].contains("Meal plan access is enabled"));
        assert!(systems[1].contains("CANNOT see the user's meal plan"));
    }

    #[tokio::test]
    async fn clear_conversation_resets_to_a_single_welcome() {
        let (mut controller, _) = controller(ScriptedGateway::replying("reply"));
        controller.send_message("hello").await;
        assert!(controller.messages().len() > 1);

        controller.clear_conversation();
        assert_eq!(controller.messages().len(), 1);
        assert_eq!(controller.messages()[0].role, Role::Assistant);
        assert!(controller.last_error().is_none());
    }

    /// Gateway whose request never resolves, for cancellation tests.
    struct PendingGateway;

    #[async_trait]
    impl CompletionGateway for PendingGateway {
        async fn complete(
            &self,
            _messages: &[OutboundMessage],
            _system_prompt: Option<&str>,
            _params: &AssistantParams,
        ) -> Result<CompletionResponse, CompletionError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn cancelled_turn_appends_nothing_and_settles_loading() {
        let token = CancellationToken::new();
        let mut controller = ConversationController::new(
            Arc::new(PendingGateway),
            Arc::new(EmptyStore),
            AssistantParams::default(),
        )
        .with_cancellation_token(token.clone());

        token.cancel();
        controller.send_message("never sent").await;

        // The pending user message stays; no assistant/error message lands.
        assert_eq!(controller.messages().len(), 2);
        assert_eq!(controller.messages()[1].role, Role::User);
        assert!(!controller.is_loading());
    }
}
