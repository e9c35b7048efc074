//! Console formatting for the conversation transcript

use colored::Colorize;
use sous_domain::session::entities::{ChatMessage, Role};

/// Formats transcript messages and session details for the terminal.
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One message with a colored role prefix.
    pub fn format_message(message: &ChatMessage) -> String {
        match message.role {
            Role::User => format!("{} {}", "You:".bold().cyan(), message.content),
            Role::Assistant => format!("{} {}", "Sous:".bold().green(), message.content),
        }
    }

    /// Bullet list of suggested queries.
    pub fn format_suggestions(suggestions: &[String]) -> String {
        suggestions
            .iter()
            .map(|suggestion| format!("  • {suggestion}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One-line statistics summary for the /stats command.
    pub fn format_statistics(statistics: &sous_domain::UserStatistics) -> String {
        let cuisines = if statistics.favorite_cuisines.is_empty() {
            "none yet".to_string()
        } else {
            statistics.favorite_cuisines.join(", ")
        };
        format!(
            "Saved recipes: {} | Shopping items: {} | Upcoming meals: {} | Favorite cuisines: {}",
            statistics.saved_recipe_count,
            statistics.shopping_item_count,
            statistics.upcoming_meals_count,
            cuisines,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_formatting_includes_content() {
        let message = ChatMessage::user("hello there");
        let formatted = ConsoleFormatter::format_message(&message);
        assert!(formatted.contains("hello there"));
    }

    #[test]
    fn suggestions_render_one_per_line() {
        let formatted = ConsoleFormatter::format_suggestions(&[
            "first".to_string(),
            "second".to_string(),
        ]);
        assert_eq!(formatted.lines().count(), 2);
    }
}
