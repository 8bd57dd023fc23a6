use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kitchen_planner_rs::cli::{Cli, Command, PantryAction, PlanAction, RecipeAction, ShopAction};
use kitchen_planner_rs::error::{KitchenError, Result};
use kitchen_planner_rs::interface::{
    display_generation, display_matches, display_pantry, display_recipes, display_shopping_list,
    display_week, prompt_yes_no, resolve_ingredient_name,
};
use kitchen_planner_rs::models::{
    MealPlanId, PantryExtras, PantryItemId, RecipeId, ShoppingItemId,
};
use kitchen_planner_rs::state::{
    export_shopping_list_csv, import_recipe_drafts, load_or_default, save_state, Generation,
    KitchenStateManager,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn run(cli: Cli) -> Result<()> {
    let state = load_or_default(&cli.file)?;
    let mut manager = KitchenStateManager::new(state);
    let household = cli.household.as_str();

    let changed = match cli.command {
        Command::Recipe { action } => cmd_recipe(&mut manager, household, action)?,
        Command::Plan { action } => cmd_plan(&mut manager, household, action)?,
        Command::Pantry { action } => cmd_pantry(&mut manager, household, action)?,
        Command::Shop { action } => cmd_shop(&mut manager, household, action)?,
        Command::Match => {
            display_matches(&manager.match_recipes(household));
            false
        }
    };

    if changed {
        save(&cli.file, &manager, cli.yes)?;
    }
    Ok(())
}

fn save(path: &Path, manager: &KitchenStateManager, skip_prompt: bool) -> Result<()> {
    if skip_prompt || prompt_yes_no("Save kitchen state?", true)? {
        save_state(path, manager.state())?;
        println!("Kitchen state saved.");
    }
    Ok(())
}

/// Returns whether the state changed.
fn cmd_recipe(
    manager: &mut KitchenStateManager,
    household: &str,
    action: RecipeAction,
) -> Result<bool> {
    match action {
        RecipeAction::Import { path } => {
            let drafts = import_recipe_drafts(&path)?;
            if drafts.is_empty() {
                println!("No recipes found in {}.", path.display());
                return Ok(false);
            }
            for draft in drafts {
                let title = draft.title.clone();
                let id = manager.add_recipe(household, draft)?;
                println!("Imported '{}' as recipe {}.", title, id);
            }
            Ok(true)
        }
        RecipeAction::List => {
            display_recipes(&manager.recipes_for(household));
            Ok(false)
        }
        RecipeAction::Remove { id } => {
            let recipe = manager.remove_recipe(RecipeId(id))?;
            println!("Removed '{}'.", recipe.title);
            Ok(true)
        }
    }
}

fn cmd_plan(
    manager: &mut KitchenStateManager,
    household: &str,
    action: PlanAction,
) -> Result<bool> {
    match action {
        PlanAction::Assign {
            date,
            meal,
            recipe,
            servings,
        } => {
            let id = manager.assign_meal(household, date, meal, RecipeId(recipe), servings)?;
            println!("Planned {} on {} (plan {}).", meal, date, id);
            Ok(true)
        }
        PlanAction::Remove { id } => {
            let plan = manager.remove_meal(MealPlanId(id))?;
            println!("Removed {} on {}.", plan.meal_type, plan.date);
            Ok(true)
        }
        PlanAction::Show { date } => {
            let (start, end) = manager.config().week_bounds(date.unwrap_or_else(today));
            println!("Week of {}", start);
            display_week(manager, &manager.plans_between(household, start, end));
            Ok(false)
        }
    }
}

fn cmd_pantry(
    manager: &mut KitchenStateManager,
    household: &str,
    action: PantryAction,
) -> Result<bool> {
    match action {
        PantryAction::Add {
            ingredient,
            quantity,
            unit,
            category,
            location,
            expires,
            min,
            notes,
        } => {
            let name = resolve_ingredient_name(manager, &ingredient)?.unwrap_or(ingredient);
            let resolved = manager.find_or_create_ingredient(&name, category)?;
            let extras = PantryExtras {
                location,
                expiry_date: expires,
                min_quantity: min,
                notes,
            };
            let id = manager.add_pantry_item(household, resolved.id, quantity, unit, extras)?;
            println!("Stocked {} (pantry item {}).", resolved.name, id);
            Ok(true)
        }
        PantryAction::Set {
            id,
            quantity,
            location,
            expires,
            min,
            notes,
        } => {
            let extras = PantryExtras {
                location,
                expiry_date: expires,
                min_quantity: min,
                notes,
            };
            manager.update_pantry_item(PantryItemId(id), quantity, extras)?;
            Ok(true)
        }
        PantryAction::Remove { id } => {
            let item = manager.remove_pantry_item(PantryItemId(id))?;
            println!("Removed {} from the pantry.", item.ingredient.name);
            Ok(true)
        }
        PantryAction::List => {
            display_pantry(&manager.pantry_for(household), today());
            Ok(false)
        }
    }
}

fn cmd_shop(
    manager: &mut KitchenStateManager,
    household: &str,
    action: ShopAction,
) -> Result<bool> {
    match action {
        ShopAction::Generate { date } => {
            let date = date.unwrap_or_else(today);
            let generation = manager.generate_shopping_list(household, date)?;
            display_generation(&generation);
            Ok(matches!(generation, Generation::Generated { .. }))
        }
        ShopAction::Show { date } => {
            let week_of = manager.config().week_of(date.unwrap_or_else(today));
            match manager.shopping_list(household, week_of) {
                Some(list) => display_shopping_list(list),
                None => println!("No shopping list for the week of {}.", week_of),
            }
            Ok(false)
        }
        ShopAction::Check {
            item,
            uncheck,
            date,
        } => {
            let week_of = manager.config().week_of(date.unwrap_or_else(today));
            manager.set_item_checked(household, week_of, ShoppingItemId(item), !uncheck)?;
            Ok(true)
        }
        ShopAction::Add {
            name,
            quantity,
            unit,
            category,
            date,
        } => {
            let id = manager.add_manual_item(
                household,
                date.unwrap_or_else(today),
                &name,
                quantity,
                unit,
                category,
            )?;
            println!("Added {} (item {}).", name, id);
            Ok(true)
        }
        ShopAction::Export { path, date } => {
            let week_of = manager.config().week_of(date.unwrap_or_else(today));
            let list = manager
                .shopping_list(household, week_of)
                .ok_or(KitchenError::ShoppingListNotFound(week_of))?;
            export_shopping_list_csv(&path, list)?;
            println!("Wrote {} items to {}.", list.items.len(), path.display());
            Ok(false)
        }
    }
}
