pub mod ingredient;
pub mod pantry;
pub mod plan;
pub mod recipe;
pub mod shopping;

pub use ingredient::{
    normalize_name, Ingredient, IngredientCategory, IngredientId, Unit, UnitDimension,
};
pub use pantry::{PantryExtras, PantryItem, PantryItemId, PantryStatus};
pub use plan::{MealPlan, MealPlanId, MealType, PlannedMeal};
pub use recipe::{IngredientDraft, Recipe, RecipeDraft, RecipeId, RecipeIngredient};
pub use shopping::{ShoppingItemId, ShoppingList, ShoppingListItem};
