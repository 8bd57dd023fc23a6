use dialoguer::{Confirm, Select};

use crate::error::Result;
use crate::state::KitchenStateManager;

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Resolve a typed ingredient name against the known ingredients.
///
/// Returns the stored name when it matches exactly (case-insensitive) or the
/// user accepts a close suggestion. `None` means the user wants the typed
/// name used as a new ingredient.
pub fn resolve_ingredient_name(
    manager: &KitchenStateManager,
    input: &str,
) -> Result<Option<String>> {
    if let Some(ingredient) = manager.ingredient(input) {
        return Ok(Some(ingredient.name.clone()));
    }

    let suggestions = manager.suggest_ingredients(input);

    if suggestions.is_empty() {
        return Ok(None);
    }

    if suggestions.len() == 1 {
        let accept = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", suggestions[0]))
            .default(true)
            .interact()?;
        return Ok(accept.then(|| suggestions[0].clone()));
    }

    let mut options = suggestions.clone();
    options.push(format!("None of these, add '{}'", input.trim()));

    let selection = Select::new()
        .with_prompt("Which did you mean?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(suggestions.get(selection).cloned())
}
