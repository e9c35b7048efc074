//! In-memory user-data store
//!
//! Backs tests and the CLI demo. The real application wires the port to its
//! persistent store; this adapter just honors the same contract: recipes
//! and items sorted by date descending, meal plan filtered to the requested
//! inclusive window and sorted ascending.

use chrono::NaiveDate;
use sous_application::ports::user_data::{StoreError, UserDataStore};
use sous_domain::context::entities::{MealPlanEntry, SavedRecipe, ShoppingItem};
use std::sync::Mutex;

/// Mutable in-memory store behind a mutex; reads observe whatever the host
/// wrote last, with no cross-source consistency guarantees (matching what
/// the port promises).
#[derive(Default)]
pub struct InMemoryUserData {
    recipes: Mutex<Vec<SavedRecipe>>,
    items: Mutex<Vec<ShoppingItem>>,
    meals: Mutex<Vec<MealPlanEntry>>,
}

impl InMemoryUserData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_recipe(&self, recipe: SavedRecipe) {
        if let Ok(mut recipes) = self.recipes.lock() {
            recipes.push(recipe);
        }
    }

    pub fn add_item(&self, item: ShoppingItem) {
        if let Ok(mut items) = self.items.lock() {
            items.push(item);
        }
    }

    pub fn add_meal(&self, entry: MealPlanEntry) {
        if let Ok(mut meals) = self.meals.lock() {
            meals.push(entry);
        }
    }
}

impl UserDataStore for InMemoryUserData {
    fn saved_recipes(&self) -> Result<Vec<SavedRecipe>, StoreError> {
        let mut recipes = self
            .recipes
            .lock()
            .map_err(|_| StoreError("recipe store poisoned".to_string()))?
            .clone();
        recipes.sort_by(|a, b| b.date_saved.cmp(&a.date_saved));
        Ok(recipes)
    }

    fn shopping_items(&self) -> Result<Vec<ShoppingItem>, StoreError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| StoreError("shopping store poisoned".to_string()))?
            .clone();
        items.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        Ok(items)
    }

    fn meal_plan_entries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MealPlanEntry>, StoreError> {
        let mut meals: Vec<MealPlanEntry> = self
            .meals
            .lock()
            .map_err(|_| StoreError("meal plan store poisoned".to_string()))?
            .iter()
            .filter(|entry| entry.is_within(start, end))
            .cloned()
            .collect();
        meals.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(meals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Utc};
    use sous_domain::context::entities::MealSlot;

    #[test]
    fn recipes_come_back_newest_first() {
        let store = InMemoryUserData::new();
        for (name, day) in [("older", 1), ("newest", 20), ("middle", 10)] {
            store.add_recipe(SavedRecipe {
                id: name.to_string(),
                name: name.to_string(),
                category: "Main".to_string(),
                cuisine: "Thai".to_string(),
                image_url: None,
                date_saved: Utc.with_ymd_and_hms(2025, 12, day, 8, 0, 0).unwrap(),
            });
        }
        let recipes = store.saved_recipes().unwrap();
        let names: Vec<&str> = recipes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["newest", "middle", "older"]);
    }

    #[test]
    fn meal_window_is_inclusive_and_sorted() {
        let store = InMemoryUserData::new();
        for day in [11, 19, 12, 20] {
            store.add_meal(MealPlanEntry {
                date: NaiveDate::from_ymd_opt(2025, 12, day).unwrap(),
                slot: MealSlot::Dinner,
                recipe_name: format!("meal-{day}"),
            });
        }
        let start = NaiveDate::from_ymd_opt(2025, 12, 12).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 12, 19).unwrap();
        let meals = store.meal_plan_entries(start, end).unwrap();
        let days: Vec<u32> = meals.iter().map(|m| m.date.day()).collect();
        assert_eq!(days, vec![12, 19]);
    }
}
