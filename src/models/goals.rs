use serde::{Deserialize, Serialize};

/// Per-user nutrition goals, used for the default daily calorie target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserGoals {
    pub user_id: u32,
    #[serde(default)]
    pub daily_calories: f64,
}
