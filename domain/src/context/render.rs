//! Pure renderers for the natural-language context block.
//!
//! The application layer fetches user data and decides, per source, whether
//! the section is disabled, empty, or populated; everything here just turns
//! that decision into fixed-format text. Section order never varies with
//! flag combinations: app overview, time context, saved recipes, meal plan,
//! shopping list, data-access reminder.

use super::entities::{MealPlanEntry, SavedRecipe, ShoppingItem};
use super::stats::favorite_cuisines;
use super::value_objects::DataSource;
use crate::time::{self, ClockSnapshot};

/// Outcome of fetching one data source, as fed into the assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionState {
    /// The user disabled this source; only a status sentence is emitted.
    Disabled,
    /// Enabled but nothing to show (includes degraded read failures).
    Empty,
    /// Enabled with data; carries the rendered section text.
    Rendered(String),
}

/// Fixed description of the app, leading every context block.
pub fn app_overview() -> &'static str {
    "You are a helpful AI assistant for Sous, a recipe discovery and meal planning app.\n\
     You help users with:\n\
     - Finding and understanding recipes\n\
     - Meal planning and preparation advice\n\
     - Shopping list management\n\
     - Food and cooking questions\n\
     - Nutritional information\n\
     - Ingredient substitutions"
}

/// Trailing instruction telling the model not to fabricate data it cannot
/// see.
pub fn capability_reminder() -> &'static str {
    "IMPORTANT: If you cannot see a data source, do NOT make up information about it. \
     Tell the user you don't have access to that information."
}

fn disabled_sentence(source: DataSource) -> String {
    format!(
        "DATA ACCESS: You CANNOT see the user's {} (disabled by user).",
        source.label()
    )
}

fn empty_sentence(source: DataSource) -> String {
    let detail = match source {
        DataSource::SavedRecipes => "the user has no saved recipes yet",
        DataSource::ShoppingList => "the user's shopping list is empty",
        DataSource::MealPlan => "the user has no meals planned for the next 7 days",
    };
    let label = source.label();
    // Capitalize the label for sentence position.
    let mut heading = label.to_string();
    if let Some(first) = heading.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    format!("DATA ACCESS: {heading} access is enabled, but {detail}.")
}

/// Render the saved-recipes section. Callers pass a non-empty slice; rows
/// are re-sorted by save date descending so the listing owns its ordering.
pub fn saved_recipes_section(recipes: &[SavedRecipe]) -> String {
    let mut ordered: Vec<&SavedRecipe> = recipes.iter().collect();
    ordered.sort_by(|a, b| b.date_saved.cmp(&a.date_saved));

    let listing = ordered
        .iter()
        .map(|recipe| {
            format!(
                "- {} [Cuisine: {}, Category: {}] (saved on {})",
                recipe.name,
                recipe.cuisine,
                recipe.category,
                recipe.date_saved.format("%b %d, %Y"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut section = format!(
        "USER DATA - SAVED RECIPES:\n\
         The user has {} saved recipe(s) in their collection.\n\
         Here are all their saved recipes:\n\
         {}",
        recipes.len(),
        listing,
    );

    let sorted: Vec<SavedRecipe> = ordered.into_iter().cloned().collect();
    let cuisines = favorite_cuisines(&sorted);
    if !cuisines.is_empty() {
        section.push_str(&format!(
            "\n\nThe user's favorite cuisines (based on saved recipes): {}",
            cuisines.join(", ")
        ));
    }

    section
}

/// Render the meal-plan section for entries already clamped to the 7-day
/// window. Rows are sorted by date ascending; the breakdown is sorted by
/// meal-slot name.
pub fn meal_plan_section(entries: &[MealPlanEntry]) -> String {
    let mut ordered: Vec<&MealPlanEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date));

    let mut slot_counts: Vec<(&'static str, usize)> = Vec::new();
    for entry in &ordered {
        let name = entry.slot.as_str();
        match slot_counts.iter_mut().find(|(slot, _)| *slot == name) {
            Some((_, count)) => *count += 1,
            None => slot_counts.push((name, 1)),
        }
    }
    slot_counts.sort_by(|a, b| a.0.cmp(b.0));

    let breakdown = slot_counts
        .iter()
        .map(|(slot, count)| format!("{slot}: {count}"))
        .collect::<Vec<_>>()
        .join(", ");

    let listing = ordered
        .iter()
        .map(|entry| {
            format!(
                "- {}: '{}' on {}",
                entry.slot,
                entry.recipe_name,
                entry.date.format("%A, %B %d, %Y"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "USER DATA - MEAL PLAN:\n\
         The user has {} meal(s) planned for the next 7 days.\n\
         Breakdown by meal type: {}\n\n\
         Scheduled meals:\n\
         {}",
        entries.len(),
        breakdown,
        listing,
    )
}

fn shopping_item_line(item: &ShoppingItem) -> String {
    let mut line = String::new();
    line.push_str(if item.is_checked { "☑ " } else { "☐ " });
    line.push_str(&item.name);
    if !item.quantity.is_empty() {
        line.push_str(&format!(" - Quantity: {}", item.quantity));
    }
    if let Some(recipe) = item
        .source_recipe_name
        .as_deref()
        .filter(|name| !name.is_empty())
    {
        if item.is_checked {
            line.push_str(&format!(" (was for recipe: '{recipe}')"));
        } else {
            line.push_str(&format!(" (needed for recipe: '{recipe}')"));
        }
    }
    if let Some(date) = item.planned_date {
        if item.is_checked {
            line.push_str(&format!(" [was planned for: {}]", date.format("%b %d, %Y")));
        } else {
            line.push_str(&format!(" [planned for: {}]", date.format("%b %d, %Y")));
        }
    }
    line.push_str(if item.is_checked {
        " [STATUS: ALREADY PURCHASED]"
    } else {
        " [STATUS: NOT YET PURCHASED]"
    });
    line
}

/// Render the shopping-list section: unchecked group first, then checked.
pub fn shopping_list_section(items: &[ShoppingItem]) -> String {
    let unchecked: Vec<&ShoppingItem> = items.iter().filter(|item| !item.is_checked).collect();
    let checked: Vec<&ShoppingItem> = items.iter().filter(|item| item.is_checked).collect();

    let mut section = format!(
        "USER DATA - SHOPPING LIST:\n\
         The user has {} total item(s) in their shopping list.\n\
         - {} item(s) still need to be purchased (unchecked)\n\
         - {} item(s) already obtained (checked off)",
        items.len(),
        unchecked.len(),
        checked.len(),
    );

    if !unchecked.is_empty() {
        let listing = unchecked
            .iter()
            .map(|item| shopping_item_line(item))
            .collect::<Vec<_>>()
            .join("\n");
        section.push_str(&format!("\n\nItems still needed (unchecked):\n{listing}"));
    }

    if !checked.is_empty() {
        let listing = checked
            .iter()
            .map(|item| shopping_item_line(item))
            .collect::<Vec<_>>()
            .join("\n");
        section.push_str(&format!("\n\nItems already obtained (checked off):\n{listing}"));
    }

    section
}

fn section_text(source: DataSource, state: SectionState) -> String {
    match state {
        SectionState::Disabled => disabled_sentence(source),
        SectionState::Empty => empty_sentence(source),
        SectionState::Rendered(text) => text,
    }
}

/// Assemble the full context block in its fixed order.
pub fn assemble_context(
    snapshot: &ClockSnapshot,
    saved_recipes: SectionState,
    meal_plan: SectionState,
    shopping_list: SectionState,
) -> String {
    let parts = vec![
        app_overview().to_string(),
        time::time_context_block(snapshot),
        section_text(DataSource::SavedRecipes, saved_recipes),
        section_text(DataSource::MealPlan, meal_plan),
        section_text(DataSource::ShoppingList, shopping_list),
        capability_reminder().to_string(),
    ];
    parts.join("\n\n")
}
