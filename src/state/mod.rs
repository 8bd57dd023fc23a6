mod export;
mod manager;
mod persistence;

pub use export::{export_shopping_list_csv, import_recipe_drafts};
pub use manager::{Generation, KitchenState, KitchenStateManager};
pub use persistence::{load_or_default, load_state, save_state};
