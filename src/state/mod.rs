mod manager;
mod persistence;
mod store;

pub use manager::{JsonStore, PlannerData};
pub use persistence::{load_config, load_data, save_data};
pub use store::{GoalStore, MenuStore, PantryStore, RecipeCatalog, RecipeFilter};
