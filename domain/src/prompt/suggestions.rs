//! Suggested queries and the welcome message

use crate::context::value_objects::{DataSource, PrivacyFlags, UserStatistics};
use crate::time::{self, ClockSnapshot, MealPeriod};

/// Upper bound on returned suggestions.
pub const MAX_SUGGESTED_QUERIES: usize = 4;

/// Generic fallbacks; at least one of these is always offered.
const GENERIC_SUGGESTIONS: &[&str] = &[
    "What's a good substitute for eggs?",
    "How do I store fresh herbs?",
    "What are some quick breakfast ideas?",
];

/// Key phrases used to spot semantically duplicate suggestions; two
/// suggestions naming the same source count as one.
const DUPLICATE_KEYS: &[&str] = &["saved recipes", "shopping list", "meal plan"];

fn is_duplicate(existing: &[String], candidate: &str) -> bool {
    if existing.iter().any(|s| s == candidate) {
        return true;
    }
    let lowered = candidate.to_lowercase();
    DUPLICATE_KEYS.iter().any(|key| {
        lowered.contains(key) && existing.iter().any(|s| s.to_lowercase().contains(key))
    })
}

fn push_unique(picked: &mut Vec<String>, candidate: &str) {
    if !is_duplicate(picked, candidate) {
        picked.push(candidate.to_string());
    }
}

/// Suggested queries for the current moment and data situation.
///
/// Merges the time-based suggestions with data-availability suggestions for
/// sources that are visible (non-empty AND enabled), deduplicates, and
/// reserves the last slot for a generic fallback.
pub fn suggested_queries(
    statistics: &UserStatistics,
    flags: &PrivacyFlags,
    snapshot: &ClockSnapshot,
) -> Vec<String> {
    let has_recipes = statistics.visible_count(DataSource::SavedRecipes, flags) > 0;
    let has_shopping = statistics.visible_count(DataSource::ShoppingList, flags) > 0;
    let has_meal_plan = statistics.visible_count(DataSource::MealPlan, flags) > 0;

    let mut picked: Vec<String> = Vec::new();

    for suggestion in time::time_based_suggestions(
        snapshot.meal_period(),
        snapshot.day_type(),
        has_recipes,
        has_shopping,
        has_meal_plan,
    ) {
        push_unique(&mut picked, &suggestion);
    }

    if has_recipes {
        push_unique(&mut picked, "What can I make with my saved recipes?");
        push_unique(&mut picked, "Suggest a meal plan based on my favorites");
    }
    if has_shopping {
        push_unique(&mut picked, "What recipes use items from my shopping list?");
    }
    if has_meal_plan {
        push_unique(&mut picked, "Review my upcoming meal plan");
    }

    // Reserve the last slot so one generic fallback always survives.
    picked.truncate(MAX_SUGGESTED_QUERIES - 1);
    for generic in GENERIC_SUGGESTIONS {
        if picked.len() >= MAX_SUGGESTED_QUERIES {
            break;
        }
        push_unique(&mut picked, generic);
    }

    picked.truncate(MAX_SUGGESTED_QUERIES);
    picked
}

fn closing_question(period: MealPeriod) -> &'static str {
    match period {
        MealPeriod::Breakfast => "Ready to start your day with a great breakfast?",
        MealPeriod::Brunch => "Perfect time for a relaxing brunch!",
        MealPeriod::Lunch => "What are you in the mood for at lunch?",
        MealPeriod::Snack => "Looking for an afternoon snack?",
        MealPeriod::Dinner => "What would you like for dinner tonight?",
        MealPeriod::LateNight => "Craving a late-night snack?",
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Welcome message opening a fresh conversation.
///
/// Branches on whether any source is visible (non-empty AND enabled), so it
/// must be recomputed whenever flags or statistics change; it is never
/// cached.
pub fn welcome_message(
    statistics: &UserStatistics,
    flags: &PrivacyFlags,
    snapshot: &ClockSnapshot,
) -> String {
    let recipes = statistics.visible_count(DataSource::SavedRecipes, flags);
    let items = statistics.visible_count(DataSource::ShoppingList, flags);
    let meals = statistics.visible_count(DataSource::MealPlan, flags);

    if recipes == 0 && items == 0 && meals == 0 {
        return "👋 Hi! I'm your Sous Assistant!\n\n\
                I'm here to help you with:\n\
                🍳 Recipe ideas and cooking tips\n\
                🥗 Meal planning advice\n\
                🛒 Shopping list suggestions\n\
                🔄 Ingredient substitutions\n\
                📚 Food and nutrition questions\n\n\
                Start exploring recipes in the app, and I'll be able to give you \
                personalized suggestions based on what you save!\n\n\
                What can I help you with today?"
            .to_string();
    }

    let mut message = format!("{}! I'm your Sous Assistant. ", snapshot.greeting());

    if recipes > 0 {
        message.push_str(&format!(
            "I see you have {recipes} saved recipe{}. ",
            plural(recipes)
        ));
    }
    if items > 0 {
        message.push_str(&format!(
            "You have {items} item{} on your shopping list. ",
            plural(items)
        ));
    }
    if meals > 0 {
        message.push_str(&format!("And {meals} meal{} planned! ", plural(meals)));
    }

    message.push_str(&format!(
        "\n\nI can help you with recipes, cooking tips, meal planning, and more. {}",
        closing_question(snapshot.meal_period())
    ));

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn snapshot(hour: u32) -> ClockSnapshot {
        ClockSnapshot {
            hour,
            minute: 0,
            weekday: Weekday::Mon,
            date: NaiveDate::from_ymd_opt(2025, 12, 15).unwrap(),
        }
    }

    fn stats(recipes: usize, items: usize, meals: usize) -> UserStatistics {
        UserStatistics {
            saved_recipe_count: recipes,
            shopping_item_count: items,
            upcoming_meals_count: meals,
            favorite_cuisines: vec![],
        }
    }

    #[test]
    fn never_more_than_four_suggestions() {
        for hour in 0..24 {
            let suggestions =
                suggested_queries(&stats(5, 5, 5), &PrivacyFlags::default(), &snapshot(hour));
            assert!(suggestions.len() <= MAX_SUGGESTED_QUERIES, "hour {hour}");
        }
    }

    #[test]
    fn empty_data_and_disabled_flags_still_yield_a_fallback() {
        let suggestions = suggested_queries(
            &stats(0, 0, 0),
            &PrivacyFlags::all_disabled(),
            &snapshot(13),
        );
        assert!(!suggestions.is_empty());
        assert!(
            suggestions
                .iter()
                .any(|s| GENERIC_SUGGESTIONS.contains(&s.as_str())),
            "expected a generic fallback in {suggestions:?}"
        );
    }

    #[test]
    fn disabled_source_is_never_suggested() {
        let mut flags = PrivacyFlags::all_disabled();
        flags.include_meal_plan = true;
        let suggestions = suggested_queries(&stats(4, 4, 4), &flags, &snapshot(13));
        assert!(
            !suggestions
                .iter()
                .any(|s| s.to_lowercase().contains("saved recipes")
                    || s.to_lowercase().contains("shopping list")),
            "hidden sources leaked into {suggestions:?}"
        );
    }

    #[test]
    fn no_duplicate_source_suggestions() {
        // Dinner + saved recipes: the time-based list already mentions saved
        // recipes, the data-based one must not repeat it.
        let suggestions =
            suggested_queries(&stats(3, 0, 0), &PrivacyFlags::default(), &snapshot(18));
        let mentioning = suggestions
            .iter()
            .filter(|s| s.to_lowercase().contains("saved recipes"))
            .count();
        assert!(mentioning <= 1, "duplicates in {suggestions:?}");
    }

    #[test]
    fn welcome_enumerates_only_visible_sources() {
        let mut flags = PrivacyFlags::default();
        flags.include_shopping_list = false;

        let message = welcome_message(&stats(2, 7, 0), &flags, &snapshot(18));
        assert!(message.contains("2 saved recipes"));
        assert!(!message.contains("shopping list"));
        assert!(message.contains("What would you like for dinner tonight?"));
    }

    #[test]
    fn welcome_uses_singular_forms() {
        let message = welcome_message(&stats(1, 1, 1), &PrivacyFlags::default(), &snapshot(8));
        assert!(message.contains("1 saved recipe."));
        assert!(message.contains("1 item on your shopping list."));
        assert!(message.contains("1 meal planned!"));
    }

    #[test]
    fn welcome_falls_back_to_onboarding_when_nothing_visible() {
        let with_hidden_data =
            welcome_message(&stats(9, 9, 9), &PrivacyFlags::all_disabled(), &snapshot(12));
        let with_no_data = welcome_message(&stats(0, 0, 0), &PrivacyFlags::default(), &snapshot(12));
        assert_eq!(with_hidden_data, with_no_data);
        assert!(with_no_data.contains("Start exploring recipes"));
    }
}
