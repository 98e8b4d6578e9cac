use serde::{Deserialize, Serialize};

use crate::models::{Household, PantryImportance};

/// Parameters of a daily or weekly menu request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuRequest {
    pub user_id: u32,

    /// Daily calorie target; falls back to the user's goal, then 2000.
    pub target_calories: Option<f64>,

    pub diet_type: Option<String>,

    pub allergies: Vec<String>,

    /// Budget for the three meals together, in minutes.
    pub max_total_time: Option<u32>,

    pub max_time_per_meal: Option<u32>,

    pub consider_pantry: bool,

    pub pantry_importance: PantryImportance,

    pub household: Household,
}

impl Default for MenuRequest {
    fn default() -> Self {
        Self {
            user_id: 1,
            target_calories: None,
            diet_type: None,
            allergies: Vec::new(),
            max_total_time: None,
            max_time_per_meal: None,
            consider_pantry: false,
            pantry_importance: PantryImportance::default(),
            household: Household::default(),
        }
    }
}

impl MenuRequest {
    /// Importance mode the scorer actually runs with.
    ///
    /// Without pantry consideration nothing may be filtered out, so this is `Ignore`.
    pub fn effective_importance(&self) -> PantryImportance {
        if self.consider_pantry {
            self.pantry_importance
        } else {
            PantryImportance::Ignore
        }
    }

    /// Weight given to pantry-fit scores when ranking.
    pub fn pantry_weight(&self) -> f64 {
        self.effective_importance().weight()
    }
}
