//! User-data records read from the host application's store

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recipe the user has saved to their collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub id: String,
    pub name: String,
    pub category: String,
    pub cuisine: String,
    pub image_url: Option<String>,
    pub date_saved: DateTime<Utc>,
}

/// An entry on the user's shopping list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    /// Free-text quantity ("2 lbs", "1 bunch"); may be empty.
    pub quantity: String,
    pub is_checked: bool,
    /// Recipe this item was added for, if any.
    pub source_recipe_name: Option<String>,
    pub planned_date: Option<NaiveDate>,
    pub date_added: DateTime<Utc>,
}

/// Slot a planned meal occupies on the weekly plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One scheduled meal on the weekly plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanEntry {
    pub date: NaiveDate,
    pub slot: MealSlot,
    pub recipe_name: String,
}

impl MealPlanEntry {
    /// Whether this entry falls inside `[start, end]`, both ends inclusive.
    pub fn is_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date >= start && self.date <= end
    }
}
