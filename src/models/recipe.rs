use serde::{Deserialize, Serialize};

use crate::models::ingredient::{Ingredient, IngredientCategory, Unit};
use crate::planner::constants::DEFAULT_RECIPE_SERVINGS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// One ingredient line of a recipe, with quantities given for the recipe's
/// default serving count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub quantity: f64,
    pub unit: Unit,
    /// The line as it was written in the source, e.g. "2 large onions, diced".
    #[serde(default)]
    pub original: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub household: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_minutes: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    /// Method, in cooking order.
    #[serde(default)]
    pub steps: Vec<String>,
}

fn default_servings() -> u32 {
    DEFAULT_RECIPE_SERVINGS
}

impl Recipe {
    /// Servings the ingredient quantities are written for.
    ///
    /// A zero count falls back to the default so scaling never divides by zero.
    pub fn base_servings(&self) -> u32 {
        if self.servings == 0 {
            DEFAULT_RECIPE_SERVINGS
        } else {
            self.servings
        }
    }

    pub fn total_minutes(&self) -> Option<u32> {
        match (self.prep_minutes, self.cook_minutes) {
            (None, None) => None,
            (prep, cook) => Some(prep.unwrap_or(0).saturating_add(cook.unwrap_or(0))),
        }
    }
}

/// A recipe as supplied by the user before ingredients are resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub prep_minutes: Option<u32>,
    #[serde(default)]
    pub cook_minutes: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<IngredientDraft>,
    #[serde(default)]
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientDraft {
    pub name: String,
    #[serde(default)]
    pub category: IngredientCategory,
    pub quantity: f64,
    pub unit: Unit,
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe(servings: u32) -> Recipe {
        Recipe {
            id: RecipeId(1),
            household: "home".to_string(),
            title: "Soup".to_string(),
            description: None,
            servings,
            prep_minutes: Some(10),
            cook_minutes: None,
            steps: Vec::new(),
            ingredients: Vec::new(),
        }
    }

    #[test]
    fn test_base_servings_guards_zero() {
        assert_eq!(sample_recipe(0).base_servings(), DEFAULT_RECIPE_SERVINGS);
        assert_eq!(sample_recipe(6).base_servings(), 6);
    }

    #[test]
    fn test_total_minutes() {
        assert_eq!(sample_recipe(4).total_minutes(), Some(10));
        let mut recipe = sample_recipe(4);
        recipe.prep_minutes = None;
        assert_eq!(recipe.total_minutes(), None);
    }

    #[test]
    fn test_total_minutes_saturates() {
        let json = r#"{"id": 1, "household": "home", "title": "Stock",
            "prep_minutes": 4294967295, "cook_minutes": 1}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.total_minutes(), Some(u32::MAX));
        assert!(recipe.steps.is_empty());
    }

    #[test]
    fn test_draft_defaults() {
        let json = r#"{"title": "Toast", "ingredients": [
            {"name": "Bread", "quantity": 2, "unit": "piece"}
        ]}"#;
        let draft: RecipeDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.servings, DEFAULT_RECIPE_SERVINGS);
        assert_eq!(draft.ingredients[0].category, IngredientCategory::Other);
    }
}
