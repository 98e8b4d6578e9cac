use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{
    MenuBody, PantryItem, Recipe, SavedMenu, SavedShoppingList, UserGoals,
};
use crate::state::store::{GoalStore, MenuStore, PantryStore, RecipeCatalog, RecipeFilter};

/// On-disk layout of the planner data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerData {
    pub recipes: Vec<Recipe>,
    pub pantry: Vec<PantryItem>,
    pub goals: Vec<UserGoals>,
    pub menus: Vec<SavedMenu>,
    pub shopping_lists: Vec<SavedShoppingList>,
}

/// In-memory store over the planner data file.
pub struct JsonStore {
    /// Recipes keyed by id, iterated in id order.
    recipes: BTreeMap<u32, Recipe>,
    pantry: Vec<PantryItem>,
    goals: HashMap<u32, UserGoals>,
    menus: Vec<SavedMenu>,
    shopping_lists: Vec<SavedShoppingList>,
}

impl JsonStore {
    pub fn new(data: PlannerData) -> Self {
        Self {
            recipes: data.recipes.into_iter().map(|r| (r.id, r)).collect(),
            pantry: data.pantry,
            goals: data.goals.into_iter().map(|g| (g.user_id, g)).collect(),
            menus: data.menus,
            shopping_lists: data.shopping_lists,
        }
    }

    pub fn menu(&self, id: u32) -> Option<&SavedMenu> {
        self.menus.iter().find(|m| m.id == id)
    }

    /// Every allergen tag in the catalog, lower-cased and de-duplicated.
    pub fn allergens(&self) -> Vec<String> {
        self.recipes
            .values()
            .flat_map(|r| r.allergens.iter())
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Convert state back to the file layout for serialization.
    pub fn to_data(&self) -> PlannerData {
        let mut goals: Vec<UserGoals> = self.goals.values().cloned().collect();
        goals.sort_by_key(|g| g.user_id);
        PlannerData {
            recipes: self.recipes.values().cloned().collect(),
            pantry: self.pantry.clone(),
            goals,
            menus: self.menus.clone(),
            shopping_lists: self.shopping_lists.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeCatalog for JsonStore {
    fn filtered_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>> {
        Ok(self
            .recipes
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }
}

impl PantryStore for JsonStore {
    fn pantry_items(&self, user_id: u32) -> Result<Vec<PantryItem>> {
        Ok(self
            .pantry
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }
}

impl GoalStore for JsonStore {
    fn daily_calorie_goal(&self, user_id: u32) -> Result<Option<f64>> {
        Ok(self
            .goals
            .get(&user_id)
            .map(|g| g.daily_calories)
            .filter(|c| *c > 0.0))
    }
}

impl MenuStore for JsonStore {
    fn save_menu(&mut self, user_id: u32, body: MenuBody) -> Result<u32> {
        let id = self.menus.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        self.menus.push(SavedMenu { id, user_id, body });
        Ok(id)
    }

    fn save_shopping_list(&mut self, list: SavedShoppingList) -> Result<()> {
        self.shopping_lists.retain(|l| l.menu_id != list.menu_id);
        self.shopping_lists.push(list);
        Ok(())
    }

    fn shopping_list(&self, menu_id: u32) -> Result<Option<SavedShoppingList>> {
        Ok(self
            .shopping_lists
            .iter()
            .find(|l| l.menu_id == menu_id)
            .cloned())
    }
}
