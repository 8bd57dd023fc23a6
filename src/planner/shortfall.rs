use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{KitchenError, MismatchOrigin, Result, UnitMismatch};
use crate::models::{IngredientCategory, IngredientId, PantryItem, Unit};
use crate::planner::aggregation::Requirements;
use crate::planner::constants::round_quantity;

/// What still has to be bought for one requirement line.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortfallEntry {
    pub ingredient_id: IngredientId,
    pub name: String,
    pub category: IngredientCategory,
    /// Quantity the planned meals need, full precision.
    pub needed: f64,
    /// Portion of `needed` covered by pantry stock, full precision.
    pub from_pantry: f64,
    /// Rounded to two decimals, always positive.
    pub buy_quantity: f64,
    pub unit: Unit,
    pub issues: Vec<UnitMismatch>,
}

fn index_pantry(pantry: &[PantryItem]) -> Result<HashMap<IngredientId, &PantryItem>> {
    let mut by_ingredient = HashMap::with_capacity(pantry.len());
    for item in pantry {
        if !item.quantity.is_finite() || item.quantity < 0.0 {
            return Err(KitchenError::InputViolation(format!(
                "pantry item '{}' has invalid quantity {}",
                item.ingredient.name, item.quantity
            )));
        }
        if by_ingredient.insert(item.ingredient.id, item).is_some() {
            return Err(KitchenError::InputViolation(format!(
                "pantry holds more than one item for '{}'",
                item.ingredient.name
            )));
        }
    }
    Ok(by_ingredient)
}

/// Subtract pantry stock from aggregated requirements.
///
/// Stock is only subtracted from the line in the same unit; other lines of
/// that ingredient are bought in full and carry a `UnitMismatch`. Lines whose
/// rounded buy quantity is zero are omitted.
pub fn compute_shortfall(
    requirements: &Requirements,
    pantry: &[PantryItem],
) -> Result<Vec<ShortfallEntry>> {
    let stock = index_pantry(pantry)?;
    let mut shortfall = Vec::new();

    for entry in requirements.iter() {
        let mut issues = entry.issues.clone();

        let (buy, from_pantry) = match stock.get(&entry.ingredient_id) {
            None => (entry.quantity, 0.0),
            Some(item) if item.unit == entry.unit => (
                (entry.quantity - item.quantity).max(0.0),
                item.quantity.min(entry.quantity),
            ),
            Some(item) => {
                warn!(
                    ingredient = %entry.name,
                    needed = %entry.unit,
                    stocked = %item.unit,
                    "pantry stock in a different unit, buying full quantity"
                );
                issues.push(UnitMismatch {
                    ingredient: entry.name.clone(),
                    expected: entry.unit,
                    found: item.unit,
                    origin: MismatchOrigin::Pantry,
                });
                (entry.quantity, 0.0)
            }
        };

        let buy_quantity = round_quantity(buy);
        if buy_quantity <= 0.0 {
            debug!(ingredient = %entry.name, "covered by pantry");
            continue;
        }

        shortfall.push(ShortfallEntry {
            ingredient_id: entry.ingredient_id,
            name: entry.name.clone(),
            category: entry.category,
            needed: entry.quantity,
            from_pantry,
            buy_quantity,
            unit: entry.unit,
            issues,
        });
    }

    Ok(shortfall)
}
