//! Context value objects: privacy flags and derived statistics

use serde::{Deserialize, Serialize};

/// The three user data sources the assistant may draw on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    SavedRecipes,
    ShoppingList,
    MealPlan,
}

impl DataSource {
    /// Human label used in context prose ("the user's saved recipes").
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::SavedRecipes => "saved recipes",
            DataSource::ShoppingList => "shopping list",
            DataSource::MealPlan => "meal plan",
        }
    }
}

/// Per-source switches controlling what may enter the prompt context.
///
/// Flags gate only the prose context sent to the model. They never gate
/// statistics, and toggling one never rewrites messages already appended
/// to the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyFlags {
    pub include_saved_recipes: bool,
    pub include_shopping_list: bool,
    pub include_meal_plan: bool,
}

impl Default for PrivacyFlags {
    fn default() -> Self {
        Self {
            include_saved_recipes: true,
            include_shopping_list: true,
            include_meal_plan: true,
        }
    }
}

impl PrivacyFlags {
    pub fn all_disabled() -> Self {
        Self {
            include_saved_recipes: false,
            include_shopping_list: false,
            include_meal_plan: false,
        }
    }

    pub fn is_enabled(&self, source: DataSource) -> bool {
        match source {
            DataSource::SavedRecipes => self.include_saved_recipes,
            DataSource::ShoppingList => self.include_shopping_list,
            DataSource::MealPlan => self.include_meal_plan,
        }
    }

    pub fn set(&mut self, source: DataSource, enabled: bool) {
        match source {
            DataSource::SavedRecipes => self.include_saved_recipes = enabled,
            DataSource::ShoppingList => self.include_shopping_list = enabled,
            DataSource::MealPlan => self.include_meal_plan = enabled,
        }
    }
}

/// Derived snapshot of the user's data volumes.
///
/// Recomputed on demand from the store; never the source of truth. Counts
/// ignore privacy flags (flags gate prompt prose, not in-app badges).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserStatistics {
    pub saved_recipe_count: usize,
    pub shopping_item_count: usize,
    pub upcoming_meals_count: usize,
    /// Up to 3 cuisine names by descending save frequency.
    pub favorite_cuisines: Vec<String>,
}

impl UserStatistics {
    pub fn has_any_data(&self) -> bool {
        self.saved_recipe_count > 0 || self.shopping_item_count > 0 || self.upcoming_meals_count > 0
    }

    /// Count for one source if it is both populated and enabled; zero
    /// otherwise. "Visible" is what the welcome message and suggestions
    /// may mention.
    pub fn visible_count(&self, source: DataSource, flags: &PrivacyFlags) -> usize {
        if !flags.is_enabled(source) {
            return 0;
        }
        match source {
            DataSource::SavedRecipes => self.saved_recipe_count,
            DataSource::ShoppingList => self.shopping_item_count,
            DataSource::MealPlan => self.upcoming_meals_count,
        }
    }

    pub fn any_visible(&self, flags: &PrivacyFlags) -> bool {
        self.visible_count(DataSource::SavedRecipes, flags) > 0
            || self.visible_count(DataSource::ShoppingList, flags) > 0
            || self.visible_count(DataSource::MealPlan, flags) > 0
    }
}
