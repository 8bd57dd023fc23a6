use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::KitchenError;
use crate::models::recipe::{Recipe, RecipeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealPlanId(pub u64);

impl fmt::Display for MealPlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = KitchenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| KitchenError::InvalidInput(format!("unknown meal type '{}'", s)))
    }
}

/// A recipe scheduled into one (date, meal type) slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: MealPlanId,
    pub household: String,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub recipe_id: RecipeId,
    pub servings: u32,
}

impl MealPlan {
    pub fn occupies(&self, household: &str, date: NaiveDate, meal_type: MealType) -> bool {
        self.household == household && self.date == date && self.meal_type == meal_type
    }
}

/// A meal plan entry resolved against its recipe, ready for aggregation.
#[derive(Debug, Clone, Copy)]
pub struct PlannedMeal<'a> {
    pub servings: u32,
    pub recipe: &'a Recipe,
}

impl<'a> PlannedMeal<'a> {
    pub fn new(servings: u32, recipe: &'a Recipe) -> Self {
        Self { servings, recipe }
    }

    /// Planned servings over the recipe's base servings.
    pub fn serving_ratio(&self) -> f64 {
        self.servings as f64 / self.recipe.base_servings() as f64
    }
}
