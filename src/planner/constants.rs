use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::MealType;

/// Energy density of macronutrients, kcal per gram.
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;

/// Daily target used when neither the request nor the user goal sets one.
pub const DEFAULT_DAILY_CALORIES: f64 = 2000.0;

// ─────────────────────────────────────────────────────────────────────────────
// Household sizing
// ─────────────────────────────────────────────────────────────────────────────

pub const ADULT_DAILY_CALORIES: f64 = 2000.0;
pub const CHILD_DAILY_CALORIES: f64 = 1400.0;

/// A child eats this share of an adult portion.
pub const CHILD_SERVING_FACTOR: f64 = 0.7;

/// Share of the daily target per meal slot.
pub static MEAL_CALORIE_SHARES: LazyLock<HashMap<MealType, f64>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(MealType::Breakfast, 0.25);
    m.insert(MealType::Lunch, 0.40);
    m.insert(MealType::Dinner, 0.35);
    m
});

/// Share of the daily calorie target for a meal slot.
pub fn meal_calorie_share(meal_type: MealType) -> f64 {
    *MEAL_CALORIE_SHARES.get(&meal_type).unwrap_or(&0.0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Pantry scoring
// ─────────────────────────────────────────────────────────────────────────────

/// `strict` drops recipes missing more than this share of their ingredients.
pub const STRICT_MISSING_RATIO: f64 = 0.5;

// ─────────────────────────────────────────────────────────────────────────────
// Per-recipe fitness (pre-sort of the daily search)
// ─────────────────────────────────────────────────────────────────────────────

pub const FITNESS_PANTRY_WEIGHT: f64 = 0.4;
pub const FITNESS_TIME_WEIGHT: f64 = 0.3;
pub const FITNESS_CALORIE_WEIGHT: f64 = 0.3;

/// Flat malus for a recipe slower than the per-meal limit.
pub const FITNESS_OVERTIME_PENALTY: f64 = 0.2;

/// Calorie distance (relative to target/3) beyond which a recipe is penalized.
pub const FITNESS_CALORIE_WINDOW: f64 = 0.5;
pub const FITNESS_FAR_CALORIE_PENALTY: f64 = 0.1;

// ─────────────────────────────────────────────────────────────────────────────
// Combination score
// ─────────────────────────────────────────────────────────────────────────────

pub const SCORE_CALORIE_WEIGHT: f64 = 0.40;
pub const SCORE_TIME_WEIGHT: f64 = 0.25;
pub const SCORE_PANTRY_WEIGHT: f64 = 0.20;
pub const SCORE_MACRO_WEIGHT: f64 = 0.10;
pub const SCORE_VARIETY_BONUS: f64 = 0.05;

/// Bonus when there is no time budget and the meals average under 30 minutes.
pub const QUICK_MENU_BONUS: f64 = 0.10;
pub const QUICK_MENU_AVG_MINUTES: f64 = 30.0;

/// Time overrun malus: min(excess * factor, cap).
pub const OVERTIME_SCORE_FACTOR: f64 = 0.5;
pub const OVERTIME_SCORE_CAP: f64 = 0.5;

/// Ideal protein/fat/carb shares of macro calories for one day.
pub const DAILY_IDEAL_PROTEIN_SHARE: f64 = 0.30;
pub const DAILY_IDEAL_FAT_SHARE: f64 = 0.30;
pub const DAILY_IDEAL_CARB_SHARE: f64 = 0.40;

/// Summed share deviation that zeroes the macro component.
pub const MACRO_DEVIATION_SCALE: f64 = 1.5;

/// Cap of the multiplicative time-overrun penalty.
pub const TIME_PENALTY_CAP: f64 = 0.5;

/// Multiplier on calorie deviation once outside the tolerance.
pub const CALORIE_PENALTY_FACTOR: f64 = 0.7;

// ─────────────────────────────────────────────────────────────────────────────
// Search bounds
// ─────────────────────────────────────────────────────────────────────────────

/// Recipes per pool kept for the exhaustive tier.
pub const TOP_K: usize = 15;

/// Triples sampled by the randomized tier.
pub const RANDOM_SAMPLES: usize = 1000;

/// Best exhaustive score below which the randomized tier runs.
pub const FALLBACK_THRESHOLD: f64 = 0.3;

/// Allowed relative deviation from the calorie target before penalizing.
pub const CALORIE_TOLERANCE: f64 = 0.3;

// ─────────────────────────────────────────────────────────────────────────────
// Weekly planning
// ─────────────────────────────────────────────────────────────────────────────

pub const DAYS_PER_WEEK: usize = 7;

/// Days a recipe stays blocked after being planned.
pub const ANTI_REPEAT_DAYS: usize = 3;

/// Weight of the pantry score when breaking calorie ties.
pub const PANTRY_TIE_BREAK_WEIGHT: f64 = 0.3;

// ─────────────────────────────────────────────────────────────────────────────
// Weekly macro balance
// ─────────────────────────────────────────────────────────────────────────────

pub const WEEKLY_PROTEIN_SHARE: f64 = 0.25;
pub const WEEKLY_FAT_SHARE: f64 = 0.30;
pub const WEEKLY_CARB_SHARE: f64 = 0.45;

/// Allowed relative deviation of each weekly macro total.
pub const MACRO_TOLERANCE: f64 = 0.07;

pub const MAX_REPLACEMENTS: usize = 4;

/// Alternatives must stay within this relative calorie distance of the meal they replace.
pub const REPLACEMENT_CALORIE_WINDOW: f64 = 0.2;

/// Score per gram of a macro pushed in the corrective direction.
pub const REPLACEMENT_GRAM_WEIGHT: f64 = 0.1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_shares_sum_to_one() {
        let total: f64 = MealType::ALL.iter().map(|m| meal_calorie_share(*m)).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weekly_shares_sum_to_one() {
        assert!((WEEKLY_PROTEIN_SHARE + WEEKLY_FAT_SHARE + WEEKLY_CARB_SHARE - 1.0).abs() < 1e-9);
    }
}
