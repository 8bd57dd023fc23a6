use std::collections::HashSet;

use crate::models::{IngredientId, Recipe};

/// How much of a recipe the pantry already covers.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeMatch<'a> {
    pub recipe: &'a Recipe,
    /// 0 to 100.
    pub match_percentage: u8,
    pub matching: Vec<String>,
    pub missing: Vec<String>,
}

/// Score one recipe against the pantry's ingredient set.
///
/// Presence only: quantities are not compared. Each distinct ingredient
/// counts once. A recipe with no ingredients scores 0.
pub fn score_recipe<'a>(pantry: &HashSet<IngredientId>, recipe: &'a Recipe) -> RecipeMatch<'a> {
    let mut seen = HashSet::new();
    let mut matching = Vec::new();
    let mut missing = Vec::new();

    for line in &recipe.ingredients {
        if !seen.insert(line.ingredient.id) {
            continue;
        }
        if pantry.contains(&line.ingredient.id) {
            matching.push(line.ingredient.name.clone());
        } else {
            missing.push(line.ingredient.name.clone());
        }
    }

    RecipeMatch {
        recipe,
        match_percentage: percentage(matching.len(), seen.len()),
        matching,
        missing,
    }
}

/// Half-up rounded percentage, 0 when `total` is 0.
fn percentage(matched: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((200 * matched + total) / (2 * total)) as u8
}

/// Score every recipe and order them best first.
///
/// The sort is stable so recipes with equal scores keep their input order.
pub fn score_recipe_matches<'a, I>(
    pantry: &HashSet<IngredientId>,
    recipes: I,
) -> Vec<RecipeMatch<'a>>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let mut matches: Vec<RecipeMatch<'a>> = recipes
        .into_iter()
        .map(|recipe| score_recipe(pantry, recipe))
        .collect();
    matches.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, IngredientCategory, RecipeId, RecipeIngredient, Unit};

    fn ingredient(id: u64, name: &str) -> Ingredient {
        Ingredient {
            id: IngredientId(id),
            name: name.to_string(),
            category: IngredientCategory::Baking,
        }
    }

    fn recipe(id: u64, ingredients: &[&Ingredient]) -> Recipe {
        Recipe {
            id: RecipeId(id),
            household: "home".to_string(),
            title: format!("Recipe {}", id),
            description: None,
            servings: 4,
            prep_minutes: None,
            cook_minutes: None,
            steps: Vec::new(),
            ingredients: ingredients
                .iter()
                .map(|i| RecipeIngredient {
                    ingredient: (*i).clone(),
                    quantity: 1.0,
                    unit: Unit::Cup,
                    original: String::new(),
                    note: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(3, 3), 100);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_flour_salt_sugar() {
        let flour = ingredient(1, "Flour");
        let salt = ingredient(2, "Salt");
        let sugar = ingredient(3, "Sugar");
        let recipes = vec![
            recipe(1, &[&flour, &sugar, &salt]),
            recipe(2, &[&flour, &salt]),
        ];
        let pantry: HashSet<IngredientId> = [flour.id, salt.id].into_iter().collect();

        let matches = score_recipe_matches(&pantry, &recipes);
        assert_eq!(matches[0].recipe.id, RecipeId(2));
        assert_eq!(matches[0].match_percentage, 100);
        assert_eq!(matches[1].recipe.id, RecipeId(1));
        assert_eq!(matches[1].match_percentage, 67);
        assert_eq!(matches[1].missing, vec!["Sugar".to_string()]);
        assert_eq!(matches[1].matching, vec!["Flour".to_string(), "Salt".to_string()]);
    }

    #[test]
    fn test_empty_recipe_scores_zero() {
        let flour = ingredient(1, "Flour");
        let pantry: HashSet<IngredientId> = [flour.id].into_iter().collect();
        let empty = recipe(1, &[]);
        assert_eq!(score_recipe(&pantry, &empty).match_percentage, 0);
    }

    #[test]
    fn test_duplicate_ingredient_counts_once() {
        let flour = ingredient(1, "Flour");
        let sugar = ingredient(3, "Sugar");
        let pantry: HashSet<IngredientId> = [flour.id].into_iter().collect();
        let r = recipe(1, &[&flour, &flour, &sugar]);
        let m = score_recipe(&pantry, &r);
        assert_eq!(m.match_percentage, 50);
        assert_eq!(m.matching.len(), 1);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let flour = ingredient(1, "Flour");
        let salt = ingredient(2, "Salt");
        let pantry: HashSet<IngredientId> = [flour.id].into_iter().collect();
        let recipes = vec![
            recipe(1, &[&salt]),
            recipe(2, &[&flour, &salt]),
            recipe(3, &[&salt, &flour]),
            recipe(4, &[&salt]),
        ];

        let order: Vec<u64> = score_recipe_matches(&pantry, &recipes)
            .iter()
            .map(|m| m.recipe.id.0)
            .collect();
        assert_eq!(order, vec![2, 3, 1, 4]);
    }
}
