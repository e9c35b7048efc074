//! Gather Context use case.
//!
//! Aggregates the user's saved recipes, meal plan, and shopping list into
//! the natural-language context block injected into the system prompt, and
//! derives the numeric statistics snapshot.
//!
//! Privacy flags gate only the context block. Statistics always read all
//! three sources; they feed in-app badges, not the model. Store read
//! failures degrade to an empty source and are logged; they never abort
//! context building.

use crate::ports::user_data::UserDataStore;
use sous_domain::context::render::{self, SectionState};
use sous_domain::context::value_objects::{DataSource, PrivacyFlags, UserStatistics};
use sous_domain::context::{meal_plan_window, stats};
use sous_domain::time::ClockSnapshot;
use std::sync::Arc;
use tracing::warn;

/// Use case producing the privacy-respecting context block and the user
/// statistics snapshot.
pub struct ContextAggregator<S: UserDataStore> {
    store: Arc<S>,
}

impl<S: UserDataStore> ContextAggregator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Assemble the full context block for the given flags.
    ///
    /// Section order is fixed regardless of flag combinations; a disabled
    /// source contributes a "disabled by user" sentence and an enabled but
    /// empty source an "enabled but empty" sentence, so the model can state
    /// the absence of data instead of staying silent.
    pub fn build_context(&self, flags: &PrivacyFlags, snapshot: &ClockSnapshot) -> String {
        render::assemble_context(
            snapshot,
            self.saved_recipes_state(flags),
            self.meal_plan_state(flags, snapshot),
            self.shopping_list_state(flags),
        )
    }

    /// Statistics snapshot; reads every source regardless of flags.
    pub fn user_statistics(&self, snapshot: &ClockSnapshot) -> UserStatistics {
        let recipes = self.fetch_recipes();
        let items = self.fetch_items();
        let meals = self.fetch_meals(snapshot);

        UserStatistics {
            saved_recipe_count: recipes.len(),
            shopping_item_count: items.len(),
            upcoming_meals_count: meals.len(),
            favorite_cuisines: stats::favorite_cuisines(&recipes),
        }
    }

    fn saved_recipes_state(&self, flags: &PrivacyFlags) -> SectionState {
        if !flags.include_saved_recipes {
            return SectionState::Disabled;
        }
        let recipes = self.fetch_recipes();
        if recipes.is_empty() {
            SectionState::Empty
        } else {
            SectionState::Rendered(render::saved_recipes_section(&recipes))
        }
    }

    fn meal_plan_state(&self, flags: &PrivacyFlags, snapshot: &ClockSnapshot) -> SectionState {
        if !flags.include_meal_plan {
            return SectionState::Disabled;
        }
        let entries = self.fetch_meals(snapshot);
        if entries.is_empty() {
            SectionState::Empty
        } else {
            SectionState::Rendered(render::meal_plan_section(&entries))
        }
    }

    fn shopping_list_state(&self, flags: &PrivacyFlags) -> SectionState {
        if !flags.include_shopping_list {
            return SectionState::Disabled;
        }
        let items = self.fetch_items();
        if items.is_empty() {
            SectionState::Empty
        } else {
            SectionState::Rendered(render::shopping_list_section(&items))
        }
    }

    fn fetch_recipes(&self) -> Vec<sous_domain::SavedRecipe> {
        self.store.saved_recipes().unwrap_or_else(|e| {
            warn!(source = ?DataSource::SavedRecipes, "store read failed: {e}");
            Vec::new()
        })
    }

    fn fetch_items(&self) -> Vec<sous_domain::ShoppingItem> {
        self.store.shopping_items().unwrap_or_else(|e| {
            warn!(source = ?DataSource::ShoppingList, "store read failed: {e}");
            Vec::new()
        })
    }

    fn fetch_meals(&self, snapshot: &ClockSnapshot) -> Vec<sous_domain::MealPlanEntry> {
        let (start, end) = meal_plan_window(snapshot.date);
        let mut entries = self.store.meal_plan_entries(start, end).unwrap_or_else(|e| {
            warn!(source = ?DataSource::MealPlan, "store read failed: {e}");
            Vec::new()
        });
        // The store promises the window, but the 7-day invariant is ours.
        entries.retain(|entry| entry.is_within(start, end));
        entries
    }
}
