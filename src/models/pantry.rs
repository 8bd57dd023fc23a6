use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ingredient::{Ingredient, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PantryItemId(pub u64);

impl std::fmt::Display for PantryItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PantryStatus {
    #[default]
    InStock,
    Low,
    OutOfStock,
}

impl PantryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PantryStatus::InStock => "in stock",
            PantryStatus::Low => "low",
            PantryStatus::OutOfStock => "out of stock",
        }
    }
}

/// Stock a household holds of one ingredient.
///
/// At most one item exists per (household, ingredient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: PantryItemId,
    pub household: String,
    pub ingredient: Ingredient,
    pub quantity: f64,
    pub unit: Unit,
    #[serde(default)]
    pub status: PantryStatus,
    /// Restock threshold; at or below it the item is reported as low.
    #[serde(default)]
    pub min_quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PantryItem {
    /// Recompute `status` from the current quantity.
    pub fn refresh_status(&mut self) {
        self.status = if self.quantity <= 0.0 {
            PantryStatus::OutOfStock
        } else if self.quantity <= self.min_quantity {
            PantryStatus::Low
        } else {
            PantryStatus::InStock
        };
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|d| d < today)
    }
}

/// Optional metadata supplied when stocking an ingredient.
#[derive(Debug, Clone, Default)]
pub struct PantryExtras {
    pub location: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub min_quantity: Option<f64>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ingredient::{IngredientCategory, IngredientId};

    fn item(quantity: f64, min_quantity: f64) -> PantryItem {
        PantryItem {
            id: PantryItemId(1),
            household: "home".to_string(),
            ingredient: Ingredient {
                id: IngredientId(1),
                name: "Rice".to_string(),
                category: IngredientCategory::Grains,
            },
            quantity,
            unit: Unit::Gram,
            status: PantryStatus::InStock,
            min_quantity,
            location: None,
            expiry_date: None,
            notes: None,
        }
    }

    #[test]
    fn test_refresh_status() {
        let mut rice = item(0.0, 100.0);
        rice.refresh_status();
        assert_eq!(rice.status, PantryStatus::OutOfStock);

        rice.quantity = 100.0;
        rice.refresh_status();
        assert_eq!(rice.status, PantryStatus::Low);

        rice.quantity = 500.0;
        rice.refresh_status();
        assert_eq!(rice.status, PantryStatus::InStock);
    }

    #[test]
    fn test_is_expired() {
        let mut rice = item(1.0, 0.0);
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert!(!rice.is_expired(today));
        rice.expiry_date = NaiveDate::from_ymd_opt(2026, 3, 9);
        assert!(rice.is_expired(today));
        rice.expiry_date = Some(today);
        assert!(!rice.is_expired(today));
    }
}
