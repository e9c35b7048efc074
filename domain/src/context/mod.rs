//! User-data context: entities, privacy flags, statistics, and rendering

pub mod entities;
pub mod render;
pub mod stats;
pub mod value_objects;

use chrono::{Days, NaiveDate};

pub use entities::{MealPlanEntry, MealSlot, SavedRecipe, ShoppingItem};
pub use render::SectionState;
pub use value_objects::{DataSource, PrivacyFlags, UserStatistics};

/// Length of the forward-looking meal plan window, in days.
pub const MEAL_PLAN_WINDOW_DAYS: u64 = 7;

/// Inclusive meal-plan window starting at `today`.
pub fn meal_plan_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let end = today
        .checked_add_days(Days::new(MEAL_PLAN_WINDOW_DAYS))
        .unwrap_or(today);
    (today, end)
}
