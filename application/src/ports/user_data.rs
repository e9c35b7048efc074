//! User data store port
//!
//! Read-only view of the host application's persistent store. This core
//! never writes; the store may be mutated concurrently by other parts of
//! the host app, and no cross-source transactional consistency is assumed
//! between the three reads.

use chrono::NaiveDate;
use sous_domain::context::entities::{MealPlanEntry, SavedRecipe, ShoppingItem};
use thiserror::Error;

/// Failure reading the host store.
///
/// Context building degrades any read failure to an empty source, so this
/// error never propagates past the aggregator.
#[derive(Error, Debug, Clone)]
#[error("store read failed: {0}")]
pub struct StoreError(pub String);

/// Read-only access to the user's saved data.
pub trait UserDataStore: Send + Sync {
    /// Saved recipes, sorted by save date descending.
    fn saved_recipes(&self) -> Result<Vec<SavedRecipe>, StoreError>;

    /// Shopping items, sorted by add date descending.
    fn shopping_items(&self) -> Result<Vec<ShoppingItem>, StoreError>;

    /// Meal plan entries with dates in `[start, end]` (both inclusive),
    /// sorted by date ascending.
    fn meal_plan_entries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MealPlanEntry>, StoreError>;
}
