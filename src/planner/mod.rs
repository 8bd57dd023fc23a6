pub mod aggregation;
pub mod constants;
pub mod matching;
pub mod reconcile;
pub mod shortfall;
pub mod week;

pub use aggregation::{
    aggregate_requirements, validate_meal, RequirementEntry, RequirementKey, Requirements,
};
pub use constants::*;
pub use matching::{score_recipe, score_recipe_matches, RecipeMatch};
pub use reconcile::{reconcile_list, ReconcileSummary};
pub use shortfall::{compute_shortfall, ShortfallEntry};
pub use week::PlannerConfig;
