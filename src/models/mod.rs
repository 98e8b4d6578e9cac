pub mod goals;
pub mod household;
pub mod menu;
pub mod pantry;
pub mod plan;
pub mod recipe;
pub mod request;
pub mod shopping;

pub use goals::UserGoals;
pub use household::Household;
pub use menu::{MenuBody, SavedMenu, SavedShoppingList};
pub use pantry::{PantryImportance, PantryItem};
pub use plan::{
    DailyPlan, IngredientLine, IngredientUsage, MacroTotals, PlannedMeal, SearchTier, Selection,
    WeeklyDay, WeeklyPlan,
};
pub use recipe::{Ingredient, MealType, Recipe};
pub use request::MenuRequest;
pub use shopping::{ShoppingItem, ShoppingList};
