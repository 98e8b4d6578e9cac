use serde::{Deserialize, Serialize};

use crate::models::Recipe;
use crate::planner::constants::{ADULT_DAILY_CALORIES, CHILD_DAILY_CALORIES, CHILD_SERVING_FACTOR};

/// Who the menu is cooked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
}

impl Default for Household {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
        }
    }
}

impl Household {
    pub fn new(adults: u32, children: u32) -> Self {
        Self { adults, children }
    }

    /// Same household with at least one adult; requests may leave adults at 0.
    pub fn normalized(&self) -> Self {
        Self {
            adults: self.adults.max(1),
            children: self.children,
        }
    }

    /// Portions needed per meal; a child eats 0.7 of an adult portion.
    ///
    /// An empty household still cooks one portion.
    pub fn total_servings(&self) -> f64 {
        let total = self.adults as f64 + self.children as f64 * CHILD_SERVING_FACTOR;
        if total == 0.0 { 1.0 } else { total }
    }

    /// Scale factor from a recipe as written to what this household needs.
    pub fn serving_multiplier(&self, recipe: &Recipe) -> f64 {
        if recipe.servings == 0 {
            return 1.0;
        }
        self.total_servings() / recipe.servings as f64
    }

    /// Daily energy target for the whole household.
    pub fn daily_calorie_target(&self) -> f64 {
        self.adults as f64 * ADULT_DAILY_CALORIES + self.children as f64 * CHILD_DAILY_CALORIES
    }
}
