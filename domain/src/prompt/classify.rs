//! Free-text query classification

/// Category of a user query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    RecipeSearch,
    CookingAdvice,
    NutritionQuestion,
    IngredientSubstitution,
    MealPlanningHelp,
    ShoppingListHelp,
    AppNavigation,
    General,
}

const RECIPE_SEARCH: &[&str] = &["recipe for", "how to make", "how do i cook", "find recipe"];
const COOKING_ADVICE: &[&str] = &[
    "how to cook",
    "cooking technique",
    "what temperature",
    "how long",
];
const NUTRITION: &[&str] = &["calorie", "nutrition", "healthy", "protein", "vitamin"];
const SUBSTITUTION: &[&str] = &["substitute", "instead of", "replace", "alternative to"];
const MEAL_PLANNING: &[&str] = &[
    "meal plan",
    "what should i cook",
    "dinner idea",
    "lunch suggestion",
];
const SHOPPING_LIST: &[&str] = &["shopping list", "ingredients i need", "what to buy"];
const APP_NAVIGATION: &[&str] = &["how do i", "where can i find", "how to use"];

/// Classify a query by case-insensitive substring matching.
///
/// Categories are checked in a fixed priority order and the first match
/// wins: "recipe for a low calorie dinner" is a recipe search, not a
/// nutrition question, because recipe search is checked first.
pub fn classify_query(query: &str) -> QueryType {
    let lowered = query.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|keyword| lowered.contains(keyword));

    if matches(RECIPE_SEARCH) {
        QueryType::RecipeSearch
    } else if matches(COOKING_ADVICE) {
        QueryType::CookingAdvice
    } else if matches(NUTRITION) {
        QueryType::NutritionQuestion
    } else if matches(SUBSTITUTION) {
        QueryType::IngredientSubstitution
    } else if matches(MEAL_PLANNING) {
        QueryType::MealPlanningHelp
    } else if matches(SHOPPING_LIST) {
        QueryType::ShoppingListHelp
    } else if matches(APP_NAVIGATION) {
        QueryType::AppNavigation
    } else {
        QueryType::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_categories() {
        assert_eq!(classify_query("Recipe for lasagna"), QueryType::RecipeSearch);
        assert_eq!(
            classify_query("what temperature for roast chicken"),
            QueryType::CookingAdvice
        );
        assert_eq!(
            classify_query("How many CALORIES in an avocado?"),
            QueryType::NutritionQuestion
        );
        assert_eq!(
            classify_query("what can I use instead of buttermilk"),
            QueryType::IngredientSubstitution
        );
        assert_eq!(
            classify_query("help me with a meal plan"),
            QueryType::MealPlanningHelp
        );
        assert_eq!(
            classify_query("add milk to my shopping list"),
            QueryType::ShoppingListHelp
        );
        assert_eq!(
            classify_query("where can i find my favorites"),
            QueryType::AppNavigation
        );
        assert_eq!(classify_query("tell me a food fact"), QueryType::General);
    }

    #[test]
    fn priority_order_first_match_wins() {
        // Matches both "recipe for" and "calorie": recipe search is checked
        // first.
        assert_eq!(
            classify_query("recipe for a low calorie dinner"),
            QueryType::RecipeSearch
        );
        // "how do i cook" belongs to recipe search even though "how do i"
        // would also match app navigation later in the order.
        assert_eq!(
            classify_query("how do i cook rice"),
            QueryType::RecipeSearch
        );
    }
}
