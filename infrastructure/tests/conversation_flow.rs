//! End-to-end turn: in-memory store → context aggregation → system prompt
//! → Anthropic gateway → transcript.

use chrono::{Days, Local, Utc};
use sous_application::config::AssistantParams;
use sous_application::use_cases::conversation::ConversationController;
use sous_domain::context::entities::{MealPlanEntry, MealSlot, SavedRecipe};
use sous_domain::session::entities::Role;
use sous_infrastructure::{AnthropicGateway, InMemoryUserData};
use sous_application::ports::credentials::StaticApiKey;
use std::sync::Arc;

fn seeded_store() -> Arc<InMemoryUserData> {
    let store = Arc::new(InMemoryUserData::new());
    store.add_recipe(SavedRecipe {
        id: "pad-thai".to_string(),
        name: "Pad Thai".to_string(),
        category: "Noodles".to_string(),
        cuisine: "Thai".to_string(),
        image_url: None,
        date_saved: Utc::now(),
    });
    if let Some(date) = Local::now().date_naive().checked_add_days(Days::new(1)) {
        store.add_meal(MealPlanEntry {
            date,
            slot: MealSlot::Dinner,
            recipe_name: "Pad Thai".to_string(),
        });
    }
    store
}

#[tokio::test]
async fn a_turn_ships_the_user_context_in_the_system_prompt() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        // The system prompt must carry the rendered recipe section all the
        // way to the wire.
        .match_body(mockito::Matcher::Regex(
            "(?s)USER DATA - SAVED RECIPES.*Pad Thai".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "id": "msg_e2e",
                "type": "message",
                "role": "assistant",
                "content": [{"type": "text", "text": "Pad Thai sounds great tonight."}],
                "model": "claude-sonnet-4-5-20250929",
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 200, "output_tokens": 12}
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let gateway = Arc::new(AnthropicGateway::new(
        format!("{}/v1/messages", server.url()),
        "2023-06-01",
        Arc::new(StaticApiKey("test-key".to_string())),
    ));

    let mut controller =
        ConversationController::new(gateway.clone(), seeded_store(), AssistantParams::default());

    // Welcome message reflects the visible data.
    assert_eq!(controller.messages().len(), 1);
    assert!(controller.messages()[0].content.contains("1 saved recipe"));

    controller.send_message("what should I cook tonight?").await;

    let messages = controller.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].role, Role::Assistant);
    assert_eq!(messages[2].content, "Pad Thai sounds great tonight.");
    assert!(!controller.is_loading());
    assert_eq!(gateway.request_count(), 1);
    assert_eq!(gateway.total_tokens_used(), 212);
    mock.assert_async().await;
}
