use chrono::NaiveDate;

use crate::models::{IngredientCategory, MealPlan, PantryItem, PantryStatus, Recipe, ShoppingList};
use crate::planner::RecipeMatch;
use crate::state::{Generation, KitchenStateManager};

/// Format a quantity without trailing zeros ("400", "1.5", "0.33").
pub fn format_quantity(quantity: f64) -> String {
    let text = format!("{:.2}", quantity);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Column width for a set of names, counted in characters.
fn name_width<'a, I>(names: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(10)
}

/// Display a shopping list grouped by category.
pub fn display_shopping_list(list: &ShoppingList) {
    if list.items.is_empty() {
        println!("{}: (empty)", list.name);
        return;
    }

    println!();
    println!(
        "=== {} ({} of {} left) ===",
        list.name,
        list.remaining(),
        list.items.len()
    );

    let items = list.grouped_items();
    let max_name_len = name_width(items.iter().map(|i| i.name.as_str()));
    let mut current: Option<IngredientCategory> = None;

    for item in items {
        if current != Some(item.category) {
            println!();
            println!("  [{}]", item.category);
            current = Some(item.category);
        }
        let mark = if item.checked { "x" } else { " " };
        println!(
            "  [{}] {:>4}  {:<width$}  {:>8} {}",
            mark,
            item.id,
            item.name,
            format_quantity(item.quantity),
            item.unit.abbreviation(),
            width = max_name_len
        );
    }

    println!();
}

/// Display the outcome of a generation run.
pub fn display_generation(generation: &Generation) {
    match generation {
        Generation::NothingPlanned { week_of } => {
            println!("No meals planned for the week of {}. Nothing to generate.", week_of);
        }
        Generation::Generated {
            week_of,
            lines,
            summary,
            issues,
        } => {
            println!(
                "Week of {}: {} items to buy ({} added, {} updated, {} unchanged).",
                week_of, lines, summary.inserted, summary.updated, summary.unchanged
            );
            if !issues.is_empty() {
                println!();
                println!("Unit mismatches (not combined, check these lines):");
                for issue in issues {
                    let mark = if issue.crosses_dimensions() { "!" } else { "-" };
                    println!("  {} {}", mark, issue);
                }
            }
        }
    }
}

/// Display recipes ranked by pantry coverage.
pub fn display_matches(matches: &[RecipeMatch<'_>]) {
    if matches.is_empty() {
        println!("No recipes to match.");
        return;
    }

    println!();
    println!("=== What can I cook? ===");
    println!();

    let max_title_len = name_width(matches.iter().map(|m| m.recipe.title.as_str()));

    for m in matches {
        println!(
            "  {:>3}%  {:<width$}  (id {})",
            m.match_percentage,
            m.recipe.title,
            m.recipe.id,
            width = max_title_len
        );
        if !m.missing.is_empty() {
            println!("        missing: {}", m.missing.join(", "));
        }
    }

    println!();
}

/// Display a household's pantry.
pub fn display_pantry(items: &[&PantryItem], today: NaiveDate) {
    if items.is_empty() {
        println!("Pantry: (empty)");
        return;
    }

    println!();
    println!("=== Pantry ({} items) ===", items.len());
    println!();

    let max_name_len = name_width(items.iter().map(|p| p.ingredient.name.as_str()));

    for item in items {
        let mut tags = Vec::new();
        if item.status != PantryStatus::InStock {
            tags.push(item.status.as_str().to_string());
        }
        if item.is_expired(today) {
            tags.push("expired".to_string());
        } else if let Some(expiry) = item.expiry_date {
            tags.push(format!("use by {}", expiry));
        }
        if let Some(location) = &item.location {
            tags.push(location.clone());
        }

        let tags_str = if tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", tags.join(", "))
        };

        println!(
            "  {:>4}  {:<width$}  {:>8} {}{}",
            item.id,
            item.ingredient.name,
            format_quantity(item.quantity),
            item.unit.abbreviation(),
            tags_str,
            width = max_name_len
        );
    }

    println!();
}

/// Display the meals planned in a date range.
pub fn display_week(manager: &KitchenStateManager, plans: &[&MealPlan]) {
    if plans.is_empty() {
        println!("No meals planned.");
        return;
    }

    println!();
    let mut current: Option<NaiveDate> = None;
    for plan in plans {
        if current != Some(plan.date) {
            println!("{}", plan.date.format("%A %Y-%m-%d"));
            current = Some(plan.date);
        }
        let title = manager
            .recipe(plan.recipe_id)
            .map(|r| r.title.as_str())
            .unwrap_or("(missing recipe)");
        println!(
            "  {:>4}  {:<9} {} x{}",
            plan.id, plan.meal_type, title, plan.servings
        );
    }
    println!();
}

/// Display a simple list of recipes.
pub fn display_recipes(recipes: &[&Recipe]) {
    if recipes.is_empty() {
        println!("Recipes: (none)");
        return;
    }

    println!();
    println!("=== Recipes ({} items) ===", recipes.len());
    println!();

    for recipe in recipes {
        let time = recipe
            .total_minutes()
            .map(|m| format!(", {} min", m))
            .unwrap_or_default();
        println!(
            "  {:>4}  {} - serves {}, {} ingredients, {} steps{}",
            recipe.id,
            recipe.title,
            recipe.servings,
            recipe.ingredients.len(),
            recipe.steps.len(),
            time
        );
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(400.0), "400");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(0.333), "0.33");
        assert_eq!(format_quantity(0.0), "0");
    }

    #[test]
    fn test_name_width_counts_characters() {
        assert_eq!(name_width(["Crème fraîche", "Salt"]), 13);
        assert_eq!(name_width(Vec::<&str>::new()), 10);
    }
}
