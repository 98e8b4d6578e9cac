pub mod config;
pub mod constants;
pub mod daily;
pub mod ledger;
pub mod matcher;
pub mod optimizer;
pub mod random;
pub mod scoring;
pub mod selectors;
pub mod weekly;
pub mod window;

pub use config::PlannerConfig;
pub use daily::{
    Combination, DailyTargets, combination_score, find_best_combination, penalized_score,
    recipe_fitness,
};
pub use ledger::{IngredientLedger, daily_shopping_list, weekly_shopping_list};
pub use matcher::{StockMap, normalize_name};
pub use optimizer::{MacroDeviation, MacroTargets, optimize_weekly_macros};
pub use random::{RandomSource, seeded};
pub use scoring::{MealPools, ScoredRecipe, score_recipe, score_recipes};
pub use selectors::{SELECTOR_CHAIN, SelectionContext, select_meal};
pub use weekly::plan_week;
pub use window::RecentWindow;
