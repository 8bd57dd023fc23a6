use thiserror::Error;

use crate::models::Unit;

/// Two quantities for the same ingredient that cannot be combined because
/// their units differ.
///
/// Attached to the affected shopping line instead of aborting the whole
/// computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{ingredient}: {found} cannot be combined with {expected} ({origin}, {})",
    describe_dimensions(.expected, .found)
)]
pub struct UnitMismatch {
    pub ingredient: String,
    pub expected: Unit,
    pub found: Unit,
    pub origin: MismatchOrigin,
}

impl UnitMismatch {
    /// Whether the two units measure different things, e.g. grams and cups.
    pub fn crosses_dimensions(&self) -> bool {
        self.expected.dimension() != self.found.dimension()
    }
}

fn describe_dimensions(expected: &Unit, found: &Unit) -> String {
    let (expected, found) = (expected.dimension(), found.dimension());
    if expected == found {
        format!("both {}", expected)
    } else {
        format!("{} vs {}", found, expected)
    }
}

/// Where the conflicting unit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchOrigin {
    /// Another planned recipe uses the ingredient in a different unit.
    Recipe,
    /// The pantry stocks the ingredient in a different unit.
    Pantry,
}

impl std::fmt::Display for MismatchOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MismatchOrigin::Recipe => write!(f, "another recipe"),
            MismatchOrigin::Pantry => write!(f, "pantry stock"),
        }
    }
}

#[derive(Debug, Error)]
pub enum KitchenError {
    #[error("Input violation: {0}")]
    InputViolation(String),

    #[error("Unit mismatch: {0}")]
    UnitMismatch(#[from] UnitMismatch),

    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(u64),

    #[error("Meal plan not found: {0}")]
    MealPlanNotFound(u64),

    #[error("Pantry item not found: {0}")]
    PantryItemNotFound(u64),

    #[error("Shopping list not found for week of {0}")]
    ShoppingListNotFound(chrono::NaiveDate),

    #[error("Shopping list item not found: {0}")]
    ShoppingItemNotFound(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date error: {0}")]
    Date(#[from] chrono::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, KitchenError>;
