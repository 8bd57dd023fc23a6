use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ingredient::{IngredientCategory, IngredientId, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingItemId(pub u64);

impl std::fmt::Display for ShoppingItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A snapshotted line on a shopping list.
///
/// Nothing here tracks the live ingredient, pantry or plan state after the
/// line is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: ShoppingItemId,
    /// `None` for lines the user added by hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<IngredientId>,
    pub name: String,
    pub category: IngredientCategory,
    pub quantity: f64,
    pub unit: Unit,
    #[serde(default)]
    pub checked: bool,
}

/// A household's list for one week, addressed by (household, week_of).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub household: String,
    /// Monday the week starts on.
    pub week_of: NaiveDate,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn new(household: &str, week_of: NaiveDate) -> Self {
        Self {
            household: household.to_string(),
            week_of,
            name: format!("Shopping List ({})", week_of.format("%Y-%m-%d")),
            items: Vec::new(),
        }
    }

    pub fn is_for(&self, household: &str, week_of: NaiveDate) -> bool {
        self.household == household && self.week_of == week_of
    }

    /// The generated line for an ingredient in a given unit, if present.
    pub fn find_line_mut(
        &mut self,
        ingredient_id: IngredientId,
        unit: Unit,
    ) -> Option<&mut ShoppingListItem> {
        self.items
            .iter_mut()
            .find(|item| item.ingredient_id == Some(ingredient_id) && item.unit == unit)
    }

    pub fn item_mut(&mut self, id: ShoppingItemId) -> Option<&mut ShoppingListItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Items ordered by category, then name, for display and export.
    pub fn grouped_items(&self) -> Vec<&ShoppingListItem> {
        let mut items: Vec<&ShoppingListItem> = self.items.iter().collect();
        items.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        items
    }

    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|item| !item.checked).count()
    }
}
