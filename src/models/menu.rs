use serde::{Deserialize, Serialize};

use crate::models::{DailyPlan, ShoppingList, WeeklyPlan};

/// Body of a stored menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MenuBody {
    Daily(DailyPlan),
    Weekly(WeeklyPlan),
}

impl MenuBody {
    pub fn kind(&self) -> &'static str {
        match self {
            MenuBody::Daily(_) => "daily",
            MenuBody::Weekly(_) => "weekly",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedMenu {
    pub id: u32,
    pub user_id: u32,
    pub body: MenuBody,
}

/// Shopping list stored against the menu it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedShoppingList {
    pub menu_id: u32,
    pub user_id: u32,
    pub list: ShoppingList,
}
