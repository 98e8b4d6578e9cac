use crate::error::Result;
use crate::models::{MealType, MenuBody, MenuRequest, PantryItem, Recipe, SavedShoppingList};

/// Hard filters applied before any scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    pub diet_type: Option<String>,
    /// Recipes tagged with any of these allergens are dropped (case-insensitive).
    pub allergies: Vec<String>,
    /// Empty means every meal type.
    pub meal_types: Vec<MealType>,
    pub max_cooking_time: Option<u32>,
}

impl RecipeFilter {
    /// Filter for all three meal slots of `request`.
    pub fn from_request(request: &MenuRequest) -> Self {
        Self {
            diet_type: request
                .diet_type
                .clone()
                .filter(|d| !d.trim().is_empty()),
            allergies: request
                .allergies
                .iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
            meal_types: MealType::ALL.to_vec(),
            max_cooking_time: request.max_time_per_meal.filter(|t| *t > 0),
        }
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(diet) = &self.diet_type {
            if !recipe.has_diet_type(diet) {
                return false;
            }
        }
        if self.allergies.iter().any(|a| recipe.has_allergen(a)) {
            return false;
        }
        if !self.meal_types.is_empty() && !self.meal_types.contains(&recipe.meal_type) {
            return false;
        }
        if let Some(max_time) = self.max_cooking_time {
            if recipe.cooking_time > max_time {
                return false;
            }
        }
        true
    }
}

pub trait RecipeCatalog {
    /// Recipes passing `filter`, in a stable order.
    fn filtered_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>>;
}

pub trait PantryStore {
    fn pantry_items(&self, user_id: u32) -> Result<Vec<PantryItem>>;
}

pub trait GoalStore {
    /// The user's daily calorie goal, if one is set.
    fn daily_calorie_goal(&self, user_id: u32) -> Result<Option<f64>>;
}

pub trait MenuStore {
    /// Persist a menu and return its new id.
    fn save_menu(&mut self, user_id: u32, body: MenuBody) -> Result<u32>;

    /// Persist a shopping list, replacing any earlier list for the same menu.
    fn save_shopping_list(&mut self, list: SavedShoppingList) -> Result<()>;

    fn shopping_list(&self, menu_id: u32) -> Result<Option<SavedShoppingList>>;
}
