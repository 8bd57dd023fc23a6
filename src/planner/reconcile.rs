use tracing::debug;

use crate::models::{ShoppingItemId, ShoppingList, ShoppingListItem};
use crate::planner::shortfall::ShortfallEntry;

/// Counts of what a reconcile pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl ReconcileSummary {
    pub fn touched(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Upsert shortfall lines into a shopping list.
///
/// A line already on the list for the same (ingredient, unit) gets its
/// quantity overwritten; anything else is appended unchecked. Lines that are
/// no longer required, and hand-added lines, are left as they are.
pub fn reconcile_list<F>(
    list: &mut ShoppingList,
    shortfall: &[ShortfallEntry],
    mut next_id: F,
) -> ReconcileSummary
where
    F: FnMut() -> ShoppingItemId,
{
    let mut summary = ReconcileSummary::default();

    for entry in shortfall {
        match list.find_line_mut(entry.ingredient_id, entry.unit) {
            Some(existing) if existing.quantity == entry.buy_quantity => {
                summary.unchanged += 1;
            }
            Some(existing) => {
                debug!(
                    ingredient = %entry.name,
                    from = existing.quantity,
                    to = entry.buy_quantity,
                    "updating shopping line"
                );
                existing.quantity = entry.buy_quantity;
                summary.updated += 1;
            }
            None => {
                list.items.push(ShoppingListItem {
                    id: next_id(),
                    ingredient_id: Some(entry.ingredient_id),
                    name: entry.name.clone(),
                    category: entry.category,
                    quantity: entry.buy_quantity,
                    unit: entry.unit,
                    checked: false,
                });
                summary.inserted += 1;
            }
        }
    }

    summary
}
