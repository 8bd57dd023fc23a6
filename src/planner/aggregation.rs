use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::error::{KitchenError, MismatchOrigin, Result, UnitMismatch};
use crate::models::{IngredientCategory, IngredientId, PlannedMeal, RecipeIngredient, Unit};

/// Requirements are tracked per (ingredient, unit); quantities in different
/// units are never summed into one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequirementKey {
    pub ingredient_id: IngredientId,
    pub unit: Unit,
}

/// Total quantity of one ingredient, in one unit, needed by the planned meals.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementEntry {
    pub ingredient_id: IngredientId,
    pub name: String,
    pub category: IngredientCategory,
    /// Full precision; rounding happens when the shortfall is computed.
    pub quantity: f64,
    pub unit: Unit,
    /// Set when the same ingredient is also needed in another unit.
    pub issues: Vec<UnitMismatch>,
}

impl RequirementEntry {
    pub fn key(&self) -> RequirementKey {
        RequirementKey {
            ingredient_id: self.ingredient_id,
            unit: self.unit,
        }
    }
}

/// Aggregated requirements in the order ingredients were first seen.
#[derive(Debug, Clone, Default)]
pub struct Requirements {
    entries: Vec<RequirementEntry>,
    index: HashMap<RequirementKey, usize>,
}

impl Requirements {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RequirementEntry> {
        self.entries.iter()
    }

    pub fn get(&self, ingredient_id: IngredientId, unit: Unit) -> Option<&RequirementEntry> {
        self.index
            .get(&RequirementKey {
                ingredient_id,
                unit,
            })
            .map(|&i| &self.entries[i])
    }

    pub fn ingredient_ids(&self) -> HashSet<IngredientId> {
        self.entries.iter().map(|e| e.ingredient_id).collect()
    }

    /// Accumulate `needed` of a recipe ingredient.
    fn add(&mut self, line: &RecipeIngredient, needed: f64) {
        let key = RequirementKey {
            ingredient_id: line.ingredient.id,
            unit: line.unit,
        };

        if let Some(&i) = self.index.get(&key) {
            self.entries[i].quantity += needed;
            return;
        }

        let mut entry = RequirementEntry {
            ingredient_id: line.ingredient.id,
            name: line.ingredient.name.clone(),
            category: line.ingredient.category,
            quantity: needed,
            unit: line.unit,
            issues: Vec::new(),
        };

        for other in self
            .entries
            .iter_mut()
            .filter(|e| e.ingredient_id == key.ingredient_id)
        {
            warn!(
                ingredient = %other.name,
                existing = %other.unit,
                incoming = %line.unit,
                "ingredient planned in more than one unit, keeping separate lines"
            );
            other.issues.push(UnitMismatch {
                ingredient: other.name.clone(),
                expected: other.unit,
                found: line.unit,
                origin: MismatchOrigin::Recipe,
            });
            entry.issues.push(UnitMismatch {
                ingredient: entry.name.clone(),
                expected: line.unit,
                found: other.unit,
                origin: MismatchOrigin::Recipe,
            });
        }

        self.index.insert(key, self.entries.len());
        self.entries.push(entry);
    }
}

/// Reject meals that would produce a negative or undefined requirement.
pub fn validate_meal(meal: &PlannedMeal) -> Result<()> {
    if meal.servings == 0 {
        return Err(KitchenError::InputViolation(format!(
            "meal plan for '{}' has zero servings",
            meal.recipe.title
        )));
    }

    for line in &meal.recipe.ingredients {
        if !line.quantity.is_finite() || line.quantity < 0.0 {
            return Err(KitchenError::InputViolation(format!(
                "'{}' in '{}' has invalid quantity {}",
                line.ingredient.name, meal.recipe.title, line.quantity
            )));
        }
    }

    Ok(())
}

/// Total the ingredients needed by a set of planned meals.
///
/// Each recipe's quantities are scaled by planned servings over the recipe's
/// base servings. All meals are validated before anything is accumulated.
/// An empty slice yields empty requirements.
pub fn aggregate_requirements(meals: &[PlannedMeal]) -> Result<Requirements> {
    for meal in meals {
        validate_meal(meal)?;
    }

    let mut requirements = Requirements::default();
    for meal in meals {
        let ratio = meal.serving_ratio();
        debug!(
            recipe = %meal.recipe.title,
            servings = meal.servings,
            ratio,
            "aggregating meal"
        );
        for line in &meal.recipe.ingredients {
            requirements.add(line, line.quantity * ratio);
        }
    }

    debug!(lines = requirements.len(), "aggregated requirements");
    Ok(requirements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, Recipe, RecipeId};

    fn ingredient(id: u64, name: &str) -> Ingredient {
        Ingredient {
            id: IngredientId(id),
            name: name.to_string(),
            category: IngredientCategory::Produce,
        }
    }

    fn line(ing: &Ingredient, quantity: f64, unit: Unit) -> RecipeIngredient {
        RecipeIngredient {
            ingredient: ing.clone(),
            quantity,
            unit,
            original: String::new(),
            note: None,
        }
    }

    fn recipe(id: u64, servings: u32, ingredients: Vec<RecipeIngredient>) -> Recipe {
        Recipe {
            id: RecipeId(id),
            household: "home".to_string(),
            title: format!("Recipe {}", id),
            description: None,
            servings,
            prep_minutes: None,
            cook_minutes: None,
            steps: Vec::new(),
            ingredients,
        }
    }

    #[test]
    fn test_empty_plan_is_empty() {
        let requirements = aggregate_requirements(&[]).unwrap();
        assert!(requirements.is_empty());
    }

    #[test]
    fn test_scales_by_ratio() {
        let onion = ingredient(1, "Onion");
        let soup = recipe(1, 4, vec![line(&onion, 300.0, Unit::Gram)]);

        let requirements = aggregate_requirements(&[PlannedMeal::new(2, &soup)]).unwrap();
        let entry = requirements.get(onion.id, Unit::Gram).unwrap();
        assert!((entry.quantity - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_sums_same_unit_across_meals() {
        let onion = ingredient(1, "Onion");
        let soup = recipe(1, 4, vec![line(&onion, 300.0, Unit::Gram)]);
        let stew = recipe(2, 2, vec![line(&onion, 100.0, Unit::Gram)]);

        let meals = [PlannedMeal::new(4, &soup), PlannedMeal::new(4, &stew)];
        let requirements = aggregate_requirements(&meals).unwrap();
        assert_eq!(requirements.len(), 1);
        let entry = requirements.get(onion.id, Unit::Gram).unwrap();
        assert!((entry.quantity - 500.0).abs() < 1e-9);
        assert!(entry.issues.is_empty());
    }

    #[test]
    fn test_mixed_units_keep_separate_lines() {
        let milk = ingredient(2, "Milk");
        let pancakes = recipe(1, 4, vec![line(&milk, 1.0, Unit::Cup)]);
        let custard = recipe(2, 4, vec![line(&milk, 500.0, Unit::Milliliter)]);

        let meals = [PlannedMeal::new(4, &pancakes), PlannedMeal::new(4, &custard)];
        let requirements = aggregate_requirements(&meals).unwrap();

        let lines: Vec<&RequirementEntry> = requirements
            .iter()
            .filter(|e| e.ingredient_id == milk.id)
            .collect();
        assert_eq!(lines.len(), 2);
        assert!((requirements.get(milk.id, Unit::Cup).unwrap().quantity - 1.0).abs() < 1e-9);
        assert!(
            (requirements.get(milk.id, Unit::Milliliter).unwrap().quantity - 500.0).abs() < 1e-9
        );
        for entry in lines {
            assert_eq!(entry.issues.len(), 1);
            assert_eq!(entry.issues[0].origin, MismatchOrigin::Recipe);
        }
    }

    #[test]
    fn test_zero_recipe_servings_uses_default() {
        let rice = ingredient(3, "Rice");
        let pilaf = recipe(1, 0, vec![line(&rice, 400.0, Unit::Gram)]);

        let requirements = aggregate_requirements(&[PlannedMeal::new(4, &pilaf)]).unwrap();
        let entry = requirements.get(rice.id, Unit::Gram).unwrap();
        assert!(entry.quantity.is_finite());
        assert!((entry.quantity - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_zero_plan_servings() {
        let rice = ingredient(3, "Rice");
        let pilaf = recipe(1, 4, vec![line(&rice, 400.0, Unit::Gram)]);

        let result = aggregate_requirements(&[PlannedMeal::new(0, &pilaf)]);
        assert!(matches!(result, Err(KitchenError::InputViolation(_))));
    }

    #[test]
    fn test_rejects_negative_quantity_before_accumulating() {
        let rice = ingredient(3, "Rice");
        let good = recipe(1, 4, vec![line(&rice, 400.0, Unit::Gram)]);
        let bad = recipe(2, 4, vec![line(&rice, -1.0, Unit::Gram)]);

        let result = aggregate_requirements(&[PlannedMeal::new(4, &good), PlannedMeal::new(4, &bad)]);
        assert!(matches!(result, Err(KitchenError::InputViolation(_))));
    }

    #[test]
    fn test_recipe_without_ingredients_contributes_nothing() {
        let empty = recipe(1, 4, Vec::new());
        let requirements = aggregate_requirements(&[PlannedMeal::new(4, &empty)]).unwrap();
        assert!(requirements.is_empty());
    }
}
