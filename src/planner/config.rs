use serde::{Deserialize, Serialize};

use crate::planner::constants::{
    ANTI_REPEAT_DAYS, CALORIE_TOLERANCE, FALLBACK_THRESHOLD, MACRO_TOLERANCE, MAX_REPLACEMENTS,
    RANDOM_SAMPLES, REPLACEMENT_CALORIE_WINDOW, STRICT_MISSING_RATIO, TOP_K,
};

/// Runtime-configurable search bounds and tolerances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub top_k: usize,
    pub random_samples: usize,
    pub fallback_threshold: f64,
    pub calorie_tolerance: f64,
    pub anti_repeat_days: usize,
    pub macro_tolerance: f64,
    pub max_replacements: usize,
    pub replacement_calorie_window: f64,
    pub strict_missing_ratio: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            top_k: TOP_K,
            random_samples: RANDOM_SAMPLES,
            fallback_threshold: FALLBACK_THRESHOLD,
            calorie_tolerance: CALORIE_TOLERANCE,
            anti_repeat_days: ANTI_REPEAT_DAYS,
            macro_tolerance: MACRO_TOLERANCE,
            max_replacements: MAX_REPLACEMENTS,
            replacement_calorie_window: REPLACEMENT_CALORIE_WINDOW,
            strict_missing_ratio: STRICT_MISSING_RATIO,
        }
    }
}

impl PlannerConfig {
    /// Compact one-line form for logs.
    pub fn display(&self) -> String {
        format!(
            "k={} samples={} fallback<{:.2} cal_tol={:.2} repeat={}d macro_tol={:.2} swaps<={}",
            self.top_k,
            self.random_samples,
            self.fallback_threshold,
            self.calorie_tolerance,
            self.anti_repeat_days,
            self.macro_tolerance,
            self.max_replacements
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: PlannerConfig = serde_json::from_str(r#"{"top_k": 5}"#).unwrap();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.random_samples, RANDOM_SAMPLES);
        assert_eq!(config.max_replacements, MAX_REPLACEMENTS);
    }
}
