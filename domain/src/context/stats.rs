//! Statistics derivation helpers

use super::entities::SavedRecipe;
use super::value_objects::UserStatistics;

/// Top cuisines by save frequency, at most three.
///
/// Input order matters: recipes arrive sorted by save date descending, and
/// cuisines tied on count keep their first-encountered position. That
/// tie-break is a contract, not an accident; the stable sort preserves it.
pub fn favorite_cuisines(recipes: &[SavedRecipe]) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for recipe in recipes {
        match counts.iter_mut().find(|(cuisine, _)| *cuisine == recipe.cuisine) {
            Some((_, count)) => *count += 1,
            None => counts.push((recipe.cuisine.as_str(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(3)
        .map(|(cuisine, _)| cuisine.to_string())
        .collect()
}

/// One human sentence describing how the counters moved between two
/// snapshots, or `None` when all three are unchanged.
pub fn describe_change(old: &UserStatistics, new: &UserStatistics) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    let mut diff = |label: &str, before: usize, after: usize| {
        if after > before {
            parts.push(format!("{label} went up from {before} to {after}"));
        } else if after < before {
            parts.push(format!("{label} went down from {before} to {after}"));
        }
    };

    diff(
        "saved recipes",
        old.saved_recipe_count,
        new.saved_recipe_count,
    );
    diff(
        "shopping list items",
        old.shopping_item_count,
        new.shopping_item_count,
    );
    diff(
        "upcoming planned meals",
        old.upcoming_meals_count,
        new.upcoming_meals_count,
    );

    if parts.is_empty() {
        None
    } else {
        Some(format!("Your data changed: {}.", parts.join(", ")))
    }
}
