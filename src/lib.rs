pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod state;

pub use error::{KitchenError, Result, UnitMismatch};
pub use models::{Ingredient, MealPlan, PantryItem, Recipe, ShoppingList};
