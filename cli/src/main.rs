//! CLI entrypoint for sous
//!
//! This is the main binary that wires together all layers using
//! dependency injection: config → gateway adapter → in-memory store →
//! conversation controller → REPL or one-shot question.

use anyhow::{bail, Result};
use chrono::{Days, Duration as ChronoDuration, Local};
use clap::Parser;
use sous_application::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use sous_application::use_cases::conversation::ConversationController;
use sous_domain::context::entities::{MealPlanEntry, MealSlot, SavedRecipe, ShoppingItem};
use sous_infrastructure::{
    AnthropicGateway, ConfigLoader, InMemoryUserData, JsonlConversationLogger,
};
use sous_presentation::{ChatRepl, Cli, ConsoleFormatter, TurnSpinner};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting sous");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    // === Dependency Injection ===
    let gateway = Arc::new(AnthropicGateway::from_config(&config.api));
    if !gateway.is_configured() {
        eprintln!(
            "warning: no API key configured — set {} or [api].key in sous.toml",
            config.api.key_env
        );
    }

    let store = Arc::new(InMemoryUserData::new());
    if cli.demo {
        seed_demo_data(&store);
    }

    let logger: Arc<dyn ConversationLogger> = match &config.logging.conversation_log {
        Some(path) => match JsonlConversationLogger::new(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    let controller = ConversationController::new(
        gateway.clone(),
        store,
        config.assistant.to_params(),
    )
    .with_conversation_logger(logger);

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(controller).with_quiet(cli.quiet);
        repl.run().await?;
        info!(
            requests = gateway.request_count(),
            tokens = gateway.total_tokens_used(),
            "session finished"
        );
        return Ok(());
    }

    // Single question mode - question is required
    let Some(question) = cli.question else {
        bail!("Question is required. Use --chat for interactive mode.");
    };

    let mut controller = controller;
    let before = controller.messages().len();
    let spinner = TurnSpinner::start(cli.quiet);
    controller.send_message(&question).await;
    spinner.finish();

    for message in controller.messages().iter().skip(before + 1) {
        println!("{}", ConsoleFormatter::format_message(message));
    }

    Ok(())
}

/// Seed the in-memory store with sample data so the context pipeline has
/// something to describe.
fn seed_demo_data(store: &InMemoryUserData) {
    let now = chrono::Utc::now();
    let today = Local::now().date_naive();

    for (name, cuisine, category, days_ago) in [
        ("Pad Thai", "Thai", "Noodles", 1i64),
        ("Green Curry", "Thai", "Curry", 3),
        ("Margherita Pizza", "Italian", "Pizza", 5),
        ("Shakshuka", "Middle Eastern", "Breakfast", 8),
    ] {
        store.add_recipe(SavedRecipe {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            category: category.to_string(),
            cuisine: cuisine.to_string(),
            image_url: None,
            date_saved: now - ChronoDuration::days(days_ago),
        });
    }

    for (name, quantity, checked, recipe) in [
        ("Rice noodles", "1 pack", false, Some("Pad Thai")),
        ("Tamarind paste", "1 jar", false, Some("Pad Thai")),
        ("Mozzarella", "250 g", true, Some("Margherita Pizza")),
    ] {
        store.add_item(ShoppingItem {
            name: name.to_string(),
            quantity: quantity.to_string(),
            is_checked: checked,
            source_recipe_name: recipe.map(str::to_string),
            planned_date: today.checked_add_days(Days::new(2)),
            date_added: now,
        });
    }

    for (offset, slot, recipe) in [
        (0u64, MealSlot::Dinner, "Pad Thai"),
        (1, MealSlot::Dinner, "Green Curry"),
        (2, MealSlot::Breakfast, "Shakshuka"),
    ] {
        if let Some(date) = today.checked_add_days(Days::new(offset)) {
            store.add_meal(MealPlanEntry {
                date,
                slot,
                recipe_name: recipe.to_string(),
            });
        }
    }

    info!("seeded demo data");
}
