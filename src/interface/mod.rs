pub mod prompts;
pub mod render;

pub use prompts::{prompt_yes_no, resolve_ingredient_name};
pub use render::{
    display_generation, display_matches, display_pantry, display_recipes, display_shopping_list,
    display_week, format_quantity,
};
