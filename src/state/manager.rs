use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;
use tracing::{debug, info};

use crate::error::{KitchenError, MismatchOrigin, Result, UnitMismatch};
use crate::models::{
    normalize_name, Ingredient, IngredientCategory, IngredientId, MealPlan, MealPlanId, MealType,
    PantryExtras, PantryItem, PantryItemId, PantryStatus, PlannedMeal, Recipe, RecipeDraft,
    RecipeId, RecipeIngredient, ShoppingItemId, ShoppingList, ShoppingListItem, Unit,
};
use crate::planner::{
    aggregate_requirements, compute_shortfall, reconcile_list, score_recipe_matches,
    PlannerConfig, RecipeMatch, ReconcileSummary, MAX_SUGGESTIONS, SUGGESTION_THRESHOLD,
};

/// Everything persisted in the state file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KitchenState {
    /// Last id handed out; ids are unique across all record kinds.
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub meal_plans: Vec<MealPlan>,
    #[serde(default)]
    pub pantry: Vec<PantryItem>,
    #[serde(default)]
    pub shopping_lists: Vec<ShoppingList>,
}

impl KitchenState {
    /// Highest id used by any record.
    pub fn max_used_id(&self) -> u64 {
        let ingredients = self.ingredients.iter().map(|i| i.id.0);
        let recipes = self.recipes.iter().map(|r| r.id.0);
        let plans = self.meal_plans.iter().map(|p| p.id.0);
        let pantry = self.pantry.iter().map(|p| p.id.0);
        let items = self
            .shopping_lists
            .iter()
            .flat_map(|l| l.items.iter().map(|i| i.id.0));
        ingredients
            .chain(recipes)
            .chain(plans)
            .chain(pantry)
            .chain(items)
            .max()
            .unwrap_or(0)
    }
}

/// Outcome of a shopping list generation.
#[derive(Debug, Clone, PartialEq)]
pub enum Generation {
    /// No meals are planned for the week; the list was not touched.
    NothingPlanned { week_of: NaiveDate },
    Generated {
        week_of: NaiveDate,
        lines: usize,
        summary: ReconcileSummary,
        issues: Vec<UnitMismatch>,
    },
}

/// Owns the household state and applies every mutating operation to it.
pub struct KitchenStateManager {
    state: KitchenState,
    config: PlannerConfig,
}

impl KitchenStateManager {
    pub fn new(state: KitchenState) -> Self {
        Self::with_config(state, PlannerConfig::default())
    }

    pub fn with_config(state: KitchenState, config: PlannerConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &KitchenState {
        &self.state
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn allocate_id(&mut self) -> u64 {
        self.state.next_id += 1;
        self.state.next_id
    }

    /// Get an ingredient by name (case-insensitive).
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        let key = normalize_name(name);
        self.state.ingredients.iter().find(|i| i.key() == key)
    }

    pub fn ingredient_by_id(&self, id: IngredientId) -> Option<&Ingredient> {
        self.state.ingredients.iter().find(|i| i.id == id)
    }

    /// Look an ingredient up by name, creating it on first reference.
    ///
    /// The category of an existing ingredient is never changed.
    pub fn find_or_create_ingredient(
        &mut self,
        name: &str,
        category: IngredientCategory,
    ) -> Result<Ingredient> {
        if let Some(existing) = self.ingredient(name) {
            return Ok(existing.clone());
        }

        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(KitchenError::InvalidInput(
                "ingredient name is empty".to_string(),
            ));
        }

        let ingredient = Ingredient {
            id: IngredientId(self.allocate_id()),
            name: trimmed.to_string(),
            category,
        };
        debug!(name = %ingredient.name, id = %ingredient.id, "created ingredient");
        self.state.ingredients.push(ingredient.clone());
        Ok(ingredient)
    }

    /// Known ingredient names close to `name`, best first.
    pub fn suggest_ingredients(&self, name: &str) -> Vec<String> {
        let wanted = normalize_name(name);
        let mut candidates: Vec<(&Ingredient, f64)> = self
            .state
            .ingredients
            .iter()
            .map(|i| (i, jaro_winkler(&i.key(), &wanted)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(i, _)| i.name.clone())
            .collect()
    }

    /// Store a recipe, resolving each ingredient by name.
    pub fn add_recipe(&mut self, household: &str, draft: RecipeDraft) -> Result<RecipeId> {
        if draft.title.trim().is_empty() {
            return Err(KitchenError::InvalidInput("recipe title is empty".to_string()));
        }
        if draft.servings == 0 {
            return Err(KitchenError::InputViolation(format!(
                "recipe '{}' has zero servings",
                draft.title
            )));
        }
        if draft.ingredients.iter().any(|i| i.name.trim().is_empty()) {
            return Err(KitchenError::InvalidInput(format!(
                "recipe '{}' has an ingredient without a name",
                draft.title
            )));
        }
        if let Some(bad) = draft
            .ingredients
            .iter()
            .find(|i| !i.quantity.is_finite() || i.quantity < 0.0)
        {
            return Err(KitchenError::InputViolation(format!(
                "'{}' in '{}' has invalid quantity {}",
                bad.name, draft.title, bad.quantity
            )));
        }

        let mut ingredients = Vec::with_capacity(draft.ingredients.len());
        for line in draft.ingredients {
            let ingredient = self.find_or_create_ingredient(&line.name, line.category)?;
            let original = line.original.unwrap_or_else(|| {
                format!("{} {} {}", line.quantity, line.unit.abbreviation(), line.name)
            });
            ingredients.push(RecipeIngredient {
                ingredient,
                quantity: line.quantity,
                unit: line.unit,
                original,
                note: line.note,
            });
        }

        let id = RecipeId(self.allocate_id());
        info!(recipe = %draft.title, %id, "added recipe");
        self.state.recipes.push(Recipe {
            id,
            household: household.to_string(),
            title: draft.title.trim().to_string(),
            description: draft.description,
            servings: draft.servings,
            prep_minutes: draft.prep_minutes,
            cook_minutes: draft.cook_minutes,
            steps: draft
                .steps
                .into_iter()
                .map(|step| step.trim().to_string())
                .filter(|step| !step.is_empty())
                .collect(),
            ingredients,
        });
        Ok(id)
    }

    pub fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.state.recipes.iter().find(|r| r.id == id)
    }

    pub fn recipes_for(&self, household: &str) -> Vec<&Recipe> {
        self.state
            .recipes
            .iter()
            .filter(|r| r.household == household)
            .collect()
    }

    /// Delete a recipe together with any meal plans that schedule it.
    pub fn remove_recipe(&mut self, id: RecipeId) -> Result<Recipe> {
        let index = self
            .state
            .recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or(KitchenError::RecipeNotFound(id.0))?;
        let recipe = self.state.recipes.remove(index);

        let before = self.state.meal_plans.len();
        self.state.meal_plans.retain(|p| p.recipe_id != id);
        let dropped = before - self.state.meal_plans.len();
        info!(recipe = %recipe.title, plans = dropped, "removed recipe");
        Ok(recipe)
    }

    /// Put a recipe into a (date, meal type) slot, replacing any occupant.
    ///
    /// The new plan is validated and built before the occupant is removed,
    /// so a failed assignment leaves the slot as it was.
    pub fn assign_meal(
        &mut self,
        household: &str,
        date: NaiveDate,
        meal_type: MealType,
        recipe_id: RecipeId,
        servings: Option<u32>,
    ) -> Result<MealPlanId> {
        let servings = servings.unwrap_or(self.config.default_plan_servings);
        if servings == 0 {
            return Err(KitchenError::InputViolation(
                "a planned meal needs at least one serving".to_string(),
            ));
        }
        match self.recipe(recipe_id) {
            Some(recipe) if recipe.household == household => {}
            _ => return Err(KitchenError::RecipeNotFound(recipe_id.0)),
        }

        let plan = MealPlan {
            id: MealPlanId(self.allocate_id()),
            household: household.to_string(),
            date,
            meal_type,
            recipe_id,
            servings,
        };
        let id = plan.id;

        self.state
            .meal_plans
            .retain(|p| !p.occupies(household, date, meal_type));
        self.state.meal_plans.push(plan);
        debug!(%date, %meal_type, recipe = %recipe_id, "assigned meal");
        Ok(id)
    }

    pub fn remove_meal(&mut self, id: MealPlanId) -> Result<MealPlan> {
        let index = self
            .state
            .meal_plans
            .iter()
            .position(|p| p.id == id)
            .ok_or(KitchenError::MealPlanNotFound(id.0))?;
        Ok(self.state.meal_plans.remove(index))
    }

    /// Plans in an inclusive date range, ordered by date then meal type.
    pub fn plans_between(
        &self,
        household: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<&MealPlan> {
        let mut plans: Vec<&MealPlan> = self
            .state
            .meal_plans
            .iter()
            .filter(|p| p.household == household && p.date >= start && p.date <= end)
            .collect();
        plans.sort_by_key(|p| (p.date, p.meal_type));
        plans
    }

    /// Plans in an inclusive date range resolved against their recipes.
    pub fn meals_between(
        &self,
        household: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PlannedMeal<'_>>> {
        self.plans_between(household, start, end)
            .into_iter()
            .map(|plan| {
                self.recipe(plan.recipe_id)
                    .map(|recipe| PlannedMeal::new(plan.servings, recipe))
                    .ok_or(KitchenError::RecipeNotFound(plan.recipe_id.0))
            })
            .collect()
    }

    /// Stock an ingredient. A second add for the same ingredient increments
    /// the existing item and must use the same unit.
    pub fn add_pantry_item(
        &mut self,
        household: &str,
        ingredient_id: IngredientId,
        quantity: f64,
        unit: Unit,
        extras: PantryExtras,
    ) -> Result<PantryItemId> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(KitchenError::InputViolation(format!(
                "pantry quantity must be non-negative, got {}",
                quantity
            )));
        }
        if let Some(min) = extras.min_quantity {
            if !min.is_finite() || min < 0.0 {
                return Err(KitchenError::InputViolation(format!(
                    "restock threshold must be non-negative, got {}",
                    min
                )));
            }
        }
        let ingredient = self
            .ingredient_by_id(ingredient_id)
            .cloned()
            .ok_or_else(|| KitchenError::IngredientNotFound(ingredient_id.to_string()))?;

        if let Some(existing) = self
            .state
            .pantry
            .iter_mut()
            .find(|p| p.household == household && p.ingredient.id == ingredient_id)
        {
            if existing.unit != unit {
                return Err(UnitMismatch {
                    ingredient: ingredient.name,
                    expected: existing.unit,
                    found: unit,
                    origin: MismatchOrigin::Pantry,
                }
                .into());
            }
            existing.quantity += quantity;
            if extras.location.is_some() {
                existing.location = extras.location;
            }
            if extras.expiry_date.is_some() {
                existing.expiry_date = extras.expiry_date;
            }
            if let Some(min) = extras.min_quantity {
                existing.min_quantity = min;
            }
            if extras.notes.is_some() {
                existing.notes = extras.notes;
            }
            existing.refresh_status();
            debug!(ingredient = %ingredient.name, total = existing.quantity, "restocked");
            return Ok(existing.id);
        }

        let mut item = PantryItem {
            id: PantryItemId(self.allocate_id()),
            household: household.to_string(),
            ingredient,
            quantity,
            unit,
            status: PantryStatus::InStock,
            min_quantity: extras.min_quantity.unwrap_or(0.0),
            location: extras.location,
            expiry_date: extras.expiry_date,
            notes: extras.notes,
        };
        item.refresh_status();
        let id = item.id;
        debug!(ingredient = %item.ingredient.name, quantity, "stocked");
        self.state.pantry.push(item);
        Ok(id)
    }

    /// Edit a pantry item. Only the supplied fields change.
    pub fn update_pantry_item(
        &mut self,
        id: PantryItemId,
        quantity: Option<f64>,
        extras: PantryExtras,
    ) -> Result<()> {
        if let Some(quantity) = quantity {
            if !quantity.is_finite() || quantity < 0.0 {
                return Err(KitchenError::InputViolation(format!(
                    "pantry quantity must be non-negative, got {}",
                    quantity
                )));
            }
        }
        if let Some(min) = extras.min_quantity {
            if !min.is_finite() || min < 0.0 {
                return Err(KitchenError::InputViolation(format!(
                    "restock threshold must be non-negative, got {}",
                    min
                )));
            }
        }

        let item = self
            .state
            .pantry
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(KitchenError::PantryItemNotFound(id.0))?;
        if let Some(quantity) = quantity {
            item.quantity = quantity;
        }
        if let Some(min) = extras.min_quantity {
            item.min_quantity = min;
        }
        if extras.location.is_some() {
            item.location = extras.location;
        }
        if extras.expiry_date.is_some() {
            item.expiry_date = extras.expiry_date;
        }
        if extras.notes.is_some() {
            item.notes = extras.notes;
        }
        item.refresh_status();
        debug!(
            ingredient = %item.ingredient.name,
            quantity = item.quantity,
            "updated pantry item"
        );
        Ok(())
    }

    pub fn remove_pantry_item(&mut self, id: PantryItemId) -> Result<PantryItem> {
        let index = self
            .state
            .pantry
            .iter()
            .position(|p| p.id == id)
            .ok_or(KitchenError::PantryItemNotFound(id.0))?;
        Ok(self.state.pantry.remove(index))
    }

    /// A household's pantry ordered by ingredient name.
    pub fn pantry_for(&self, household: &str) -> Vec<&PantryItem> {
        let mut items: Vec<&PantryItem> = self
            .state
            .pantry
            .iter()
            .filter(|p| p.household == household)
            .collect();
        items.sort_by_key(|p| p.ingredient.key());
        items
    }

    pub fn shopping_list(&self, household: &str, week_of: NaiveDate) -> Option<&ShoppingList> {
        self.state
            .shopping_lists
            .iter()
            .find(|l| l.is_for(household, week_of))
    }

    /// Index of the (household, week) list, creating it when missing.
    fn list_index(&mut self, household: &str, week_of: NaiveDate) -> usize {
        if let Some(i) = self
            .state
            .shopping_lists
            .iter()
            .position(|l| l.is_for(household, week_of))
        {
            return i;
        }
        info!(%household, %week_of, "created shopping list");
        self.state
            .shopping_lists
            .push(ShoppingList::new(household, week_of));
        self.state.shopping_lists.len() - 1
    }

    /// Build or refresh the shopping list for the week containing `date`.
    ///
    /// Planned meals are aggregated, pantry stock is subtracted, and the
    /// result is upserted into the (household, week) list.
    pub fn generate_shopping_list(
        &mut self,
        household: &str,
        date: NaiveDate,
    ) -> Result<Generation> {
        let (start, end) = self.config.week_bounds(date);

        let shortfall = {
            let meals = self.meals_between(household, start, end)?;
            if meals.is_empty() {
                info!(%household, week_of = %start, "no meals planned");
                return Ok(Generation::NothingPlanned { week_of: start });
            }
            let requirements = aggregate_requirements(&meals)?;
            let wanted = requirements.ingredient_ids();
            let pantry: Vec<PantryItem> = self
                .state
                .pantry
                .iter()
                .filter(|p| p.household == household && wanted.contains(&p.ingredient.id))
                .cloned()
                .collect();
            compute_shortfall(&requirements, &pantry)?
        };

        let index = self.list_index(household, start);
        let KitchenState {
            next_id,
            shopping_lists,
            ..
        } = &mut self.state;
        let summary = reconcile_list(&mut shopping_lists[index], &shortfall, || {
            *next_id += 1;
            ShoppingItemId(*next_id)
        });

        let issues: Vec<UnitMismatch> = shortfall
            .iter()
            .flat_map(|entry| entry.issues.iter().cloned())
            .collect();

        info!(
            %household,
            week_of = %start,
            lines = shortfall.len(),
            inserted = summary.inserted,
            updated = summary.updated,
            "generated shopping list"
        );

        Ok(Generation::Generated {
            week_of: start,
            lines: shortfall.len(),
            summary,
            issues,
        })
    }

    /// Add a line by hand to the list for the week containing `date`.
    pub fn add_manual_item(
        &mut self,
        household: &str,
        date: NaiveDate,
        name: &str,
        quantity: f64,
        unit: Unit,
        category: IngredientCategory,
    ) -> Result<ShoppingItemId> {
        if name.trim().is_empty() {
            return Err(KitchenError::InvalidInput("item name is empty".to_string()));
        }
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(KitchenError::InputViolation(format!(
                "shopping quantity must be non-negative, got {}",
                quantity
            )));
        }

        let week_of = self.config.week_of(date);
        let id = ShoppingItemId(self.allocate_id());
        let index = self.list_index(household, week_of);
        self.state.shopping_lists[index].items.push(ShoppingListItem {
            id,
            ingredient_id: None,
            name: name.trim().to_string(),
            category,
            quantity,
            unit,
            checked: false,
        });
        Ok(id)
    }

    pub fn set_item_checked(
        &mut self,
        household: &str,
        week_of: NaiveDate,
        item_id: ShoppingItemId,
        checked: bool,
    ) -> Result<()> {
        let list = self
            .state
            .shopping_lists
            .iter_mut()
            .find(|l| l.is_for(household, week_of))
            .ok_or(KitchenError::ShoppingListNotFound(week_of))?;
        let item = list
            .item_mut(item_id)
            .ok_or(KitchenError::ShoppingItemNotFound(item_id.0))?;
        item.checked = checked;
        Ok(())
    }

    /// Rank the household's recipes by how much of each the pantry covers.
    pub fn match_recipes(&self, household: &str) -> Vec<RecipeMatch<'_>> {
        let stocked: HashSet<IngredientId> = self
            .state
            .pantry
            .iter()
            .filter(|p| p.household == household)
            .map(|p| p.ingredient.id)
            .collect();
        score_recipe_matches(
            &stocked,
            self.state.recipes.iter().filter(|r| r.household == household),
        )
    }

    /// Count of recipes across all households.
    pub fn recipe_count(&self) -> usize {
        self.state.recipes.len()
    }
}
