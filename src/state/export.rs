use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::{RecipeDraft, ShoppingList};

#[derive(Debug, Serialize)]
struct ShoppingRow<'a> {
    name: &'a str,
    category: &'a str,
    quantity: f64,
    unit: &'a str,
    checked: bool,
}

/// Write a shopping list as CSV, grouped by category.
pub fn export_shopping_list_csv<P: AsRef<Path>>(path: P, list: &ShoppingList) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for item in list.grouped_items() {
        writer.serialize(ShoppingRow {
            name: &item.name,
            category: item.category.as_str(),
            quantity: item.quantity,
            unit: item.unit.as_str(),
            checked: item.checked,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Read recipe drafts from a JSON file holding an array of recipes.
pub fn import_recipe_drafts<P: AsRef<Path>>(path: P) -> Result<Vec<RecipeDraft>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
