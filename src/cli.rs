use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};

use crate::models::{IngredientCategory, MealType, Unit};

/// Kitchen Planner: pantry, meal plans, shopping lists and recipe matching.
#[derive(Parser, Debug)]
#[command(name = "kitchen_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the kitchen state JSON file.
    #[arg(
        short,
        long,
        global = true,
        env = "KITCHEN_STATE_FILE",
        default_value = "kitchen_state.json"
    )]
    pub file: PathBuf,

    /// Household whose pantry, plans and lists are used.
    #[arg(long, global = true, env = "KITCHEN_HOUSEHOLD", default_value = "home")]
    pub household: String,

    /// Save without asking for confirmation.
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage recipes.
    Recipe {
        #[command(subcommand)]
        action: RecipeAction,
    },

    /// Schedule recipes into meal slots.
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },

    /// Track what is on hand.
    Pantry {
        #[command(subcommand)]
        action: PantryAction,
    },

    /// Generate and work through shopping lists.
    Shop {
        #[command(subcommand)]
        action: ShopAction,
    },

    /// Rank recipes by how much of each the pantry already covers.
    Match,
}

#[derive(Subcommand, Debug)]
pub enum RecipeAction {
    /// Import recipes from a JSON file holding an array of recipes.
    Import { path: PathBuf },

    /// List the household's recipes.
    List,

    /// Delete a recipe and any meals planned with it.
    Remove { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum PlanAction {
    /// Put a recipe into a slot, replacing whatever was there.
    Assign {
        /// Day of the meal (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// breakfast, lunch or dinner.
        #[arg(long)]
        meal: MealType,

        /// Recipe id.
        #[arg(long)]
        recipe: u64,

        /// Servings to cook; defaults to 4.
        #[arg(long)]
        servings: Option<u32>,
    },

    /// Remove a planned meal.
    Remove { id: u64 },

    /// Show the week containing a date (default today).
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PantryAction {
    /// Stock an ingredient; repeating an ingredient adds to its quantity.
    Add {
        #[arg(long)]
        ingredient: String,

        #[arg(long)]
        quantity: f64,

        #[arg(long)]
        unit: Unit,

        /// Category used if the ingredient is new.
        #[arg(long, default_value = "other")]
        category: IngredientCategory,

        #[arg(long)]
        location: Option<String>,

        /// Expiry date (YYYY-MM-DD).
        #[arg(long)]
        expires: Option<NaiveDate>,

        /// Restock threshold.
        #[arg(long)]
        min: Option<f64>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Edit a pantry item; only the given fields change.
    Set {
        id: u64,

        /// New quantity, replacing the current one.
        quantity: Option<f64>,

        #[arg(long)]
        location: Option<String>,

        /// Expiry date (YYYY-MM-DD).
        #[arg(long)]
        expires: Option<NaiveDate>,

        /// Restock threshold.
        #[arg(long)]
        min: Option<f64>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove a pantry item.
    Remove { id: u64 },

    /// List the household's pantry.
    List,
}

#[derive(Subcommand, Debug)]
pub enum ShopAction {
    /// Build or refresh the list for the week containing a date.
    Generate {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show the list for the week containing a date.
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Tick an item off (or back on with --uncheck).
    Check {
        item: u64,

        #[arg(long)]
        uncheck: bool,

        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Add an item by hand.
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        quantity: f64,

        #[arg(long)]
        unit: Unit,

        #[arg(long, default_value = "other")]
        category: IngredientCategory,

        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Write the list as CSV.
    Export {
        path: PathBuf,

        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_assign() {
        let cli = Cli::try_parse_from([
            "kitchen_planner",
            "--household",
            "cabin",
            "plan",
            "assign",
            "--date",
            "2026-10-20",
            "--meal",
            "dinner",
            "--recipe",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.household, "cabin");
        match cli.command {
            Command::Plan {
                action:
                    PlanAction::Assign {
                        date,
                        meal,
                        recipe,
                        servings,
                    },
            } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
                assert_eq!(meal, MealType::Dinner);
                assert_eq!(recipe, 3);
                assert_eq!(servings, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_pantry_add_units() {
        let cli = Cli::try_parse_from([
            "kitchen_planner",
            "pantry",
            "add",
            "--ingredient",
            "Onion",
            "--quantity",
            "200",
            "--unit",
            "g",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Pantry {
                action: PantryAction::Add { unit, category, .. },
            } => {
                assert_eq!(unit, Unit::Gram);
                assert_eq!(category, IngredientCategory::Other);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_pantry_set_fields_only() {
        let cli = Cli::try_parse_from([
            "kitchen_planner",
            "pantry",
            "set",
            "12",
            "--expires",
            "2026-10-30",
            "--min",
            "1.5",
        ])
        .unwrap();

        match cli.command {
            Command::Pantry {
                action:
                    PantryAction::Set {
                        id,
                        quantity,
                        location,
                        expires,
                        min,
                        notes,
                    },
            } => {
                assert_eq!(id, 12);
                assert_eq!(quantity, None);
                assert_eq!(location, None);
                assert_eq!(expires, NaiveDate::from_ymd_opt(2026, 10, 30));
                assert_eq!(min, Some(1.5));
                assert_eq!(notes, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_unit() {
        let result = Cli::try_parse_from([
            "kitchen_planner",
            "shop",
            "add",
            "--name",
            "Foil",
            "--quantity",
            "1",
            "--unit",
            "bushel",
        ]);
        assert!(result.is_err());
    }
}
