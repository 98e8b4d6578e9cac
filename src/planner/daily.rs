use std::cmp::Ordering;

use tracing::{debug, info};

use crate::error::{PlannerError, Result};
use crate::models::{DailyPlan, MacroTotals, MealType, MenuRequest, PlannedMeal, SearchTier};
use crate::planner::config::PlannerConfig;
use crate::planner::constants::*;
use crate::planner::random::RandomSource;
use crate::planner::scoring::{MealPools, ScoredRecipe};

/// What a single day is scored against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTargets {
    pub calories: f64,
    pub max_total_time: Option<u32>,
    pub max_time_per_meal: Option<u32>,
    /// 0 when pantry fit must not influence ranking.
    pub pantry_weight: f64,
}

impl DailyTargets {
    /// Targets for `request` with an already resolved calorie target.
    ///
    /// Zero time limits mean "no limit".
    pub fn from_request(request: &MenuRequest, calories: f64) -> Self {
        Self {
            calories,
            max_total_time: request.max_total_time.filter(|t| *t > 0),
            max_time_per_meal: request.max_time_per_meal.filter(|t| *t > 0),
            pantry_weight: request.pantry_weight(),
        }
    }
}

/// Relative distance of `total` from `target`; 1.0 for a non-positive target.
pub fn calorie_deviation(total: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 1.0;
    }
    (total - target).abs() / target
}

/// Standalone fitness of one recipe, used to pre-sort the pools.
pub fn recipe_fitness(sr: &ScoredRecipe, targets: &DailyTargets) -> f64 {
    let mut score = sr.score * FITNESS_PANTRY_WEIGHT * targets.pantry_weight;

    if let Some(max_time) = targets.max_time_per_meal {
        if sr.recipe.cooking_time <= max_time {
            let ratio = sr.recipe.cooking_time as f64 / max_time as f64;
            score += (1.0 - ratio) * FITNESS_TIME_WEIGHT;
        } else {
            score -= FITNESS_OVERTIME_PENALTY;
        }
    }

    let per_meal = targets.calories / 3.0;
    if per_meal > 0.0 {
        let diff = calorie_deviation(sr.recipe.calories, per_meal);
        if diff <= FITNESS_CALORIE_WINDOW {
            score += (1.0 - diff * 2.0).max(0.0) * FITNESS_CALORIE_WEIGHT;
        } else {
            score -= FITNESS_FAR_CALORIE_PENALTY;
        }
    }

    score
}

/// Macro balance of a set of meals against the daily 30/30/40 ideal, in [0, 1].
fn macro_balance(totals: &MacroTotals) -> f64 {
    let protein = totals.protein * KCAL_PER_GRAM_PROTEIN;
    let fat = totals.fat * KCAL_PER_GRAM_FAT;
    let carbs = totals.carbs * KCAL_PER_GRAM_CARBS;
    let total = protein + fat + carbs;
    if total <= 0.0 {
        return 0.0;
    }

    let deviation = (protein / total - DAILY_IDEAL_PROTEIN_SHARE).abs()
        + (fat / total - DAILY_IDEAL_FAT_SHARE).abs()
        + (carbs / total - DAILY_IDEAL_CARB_SHARE).abs();
    (1.0 - deviation / MACRO_DEVIATION_SCALE).max(0.0)
}

fn raw_totals(meals: &[ScoredRecipe]) -> (MacroTotals, u32) {
    let mut totals = MacroTotals::default();
    let mut time = 0;
    for sr in meals {
        totals += MacroTotals::of_recipe(sr.recipe, 1.0);
        time += sr.recipe.cooking_time;
    }
    (totals, time)
}

/// Combined score of a breakfast/lunch/dinner triple, clamped to [0, 1].
pub fn combination_score(meals: &[ScoredRecipe; 3], targets: &DailyTargets) -> f64 {
    let (totals, total_time) = raw_totals(meals);
    let mut score = 0.0;

    let cal_diff = calorie_deviation(totals.calories, targets.calories).min(1.0);
    score += (1.0 - cal_diff) * SCORE_CALORIE_WEIGHT;

    match targets.max_total_time {
        Some(max_time) if total_time <= max_time => {
            score += (1.0 - total_time as f64 / max_time as f64) * SCORE_TIME_WEIGHT;
        }
        Some(max_time) => {
            let excess = (total_time - max_time) as f64 / max_time as f64;
            score -= (excess * OVERTIME_SCORE_FACTOR).min(OVERTIME_SCORE_CAP);
        }
        None => {
            if (total_time as f64 / 3.0) < QUICK_MENU_AVG_MINUTES {
                score += QUICK_MENU_BONUS;
            }
        }
    }

    if targets.pantry_weight > 0.0 {
        let mean = meals.iter().map(|m| m.score).sum::<f64>() / 3.0;
        score += mean * SCORE_PANTRY_WEIGHT * targets.pantry_weight;
    }

    score += macro_balance(&totals) * SCORE_MACRO_WEIGHT;

    let [a, b, c] = [meals[0].id(), meals[1].id(), meals[2].id()];
    if a != b && a != c && b != c {
        score += SCORE_VARIETY_BONUS;
    }

    score.clamp(0.0, 1.0)
}

/// Combined score with the time-overrun and calorie-deviation penalties applied.
pub fn penalized_score(meals: &[ScoredRecipe; 3], targets: &DailyTargets, tolerance: f64) -> f64 {
    let mut score = combination_score(meals, targets);
    let (totals, total_time) = raw_totals(meals);

    if let Some(max_time) = targets.max_total_time {
        if total_time > max_time {
            let excess = (total_time - max_time) as f64 / max_time as f64;
            score *= 1.0 - excess.min(TIME_PENALTY_CAP);
        }
    }

    let cal_diff = calorie_deviation(totals.calories, targets.calories);
    if cal_diff > tolerance {
        score *= (1.0 - cal_diff * CALORIE_PENALTY_FACTOR).max(0.0);
    }

    score
}

/// A scored triple, borrowing from the pools it was drawn from.
#[derive(Debug, Clone, Copy)]
pub struct Combination<'r> {
    pub meals: [ScoredRecipe<'r>; 3],
    pub score: f64,
    pub tier: SearchTier,
}

impl Combination<'_> {
    /// Owned plan without ingredient usage; the ledger fills that in.
    pub fn into_plan(self) -> DailyPlan {
        let (totals, total_time) = raw_totals(&self.meals);
        let meals = MealType::ALL
            .iter()
            .zip(self.meals.iter())
            .map(|(meal_type, sr)| PlannedMeal::new(*meal_type, sr.recipe, sr.score))
            .collect();

        DailyPlan {
            meals,
            totals,
            total_time,
            score: self.score,
            tier: self.tier,
            usage: Default::default(),
        }
    }
}

/// Pool sorted by descending fitness, ties keep catalog order, cut to `k`.
fn top_candidates<'r>(
    pool: &[ScoredRecipe<'r>],
    targets: &DailyTargets,
    k: usize,
) -> Vec<ScoredRecipe<'r>> {
    let mut ranked: Vec<(f64, ScoredRecipe<'r>)> = pool
        .iter()
        .map(|sr| (recipe_fitness(sr, targets), *sr))
        .collect();
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    ranked.into_iter().take(k).map(|(_, sr)| sr).collect()
}

/// Best breakfast/lunch/dinner triple for one day.
///
/// Runs an exhaustive pass over the top `top_k` of each pool, then a randomized
/// pass over the full pools when the best score is under `fallback_threshold`.
/// The first triple with the highest score wins.
pub fn find_best_combination<'r>(
    pools: &MealPools<'r>,
    targets: &DailyTargets,
    config: &PlannerConfig,
    rng: &mut dyn RandomSource,
) -> Result<Combination<'r>> {
    pools.ensure_viable()?;

    let k = config.top_k.max(1);
    let breakfasts = top_candidates(pools.pool(MealType::Breakfast), targets, k);
    let lunches = top_candidates(pools.pool(MealType::Lunch), targets, k);
    let dinners = top_candidates(pools.pool(MealType::Dinner), targets, k);

    let mut best: Option<Combination<'r>> = None;
    let mut evaluated = 0usize;

    for b in &breakfasts {
        for l in &lunches {
            for d in &dinners {
                let meals = [*b, *l, *d];
                let score = penalized_score(&meals, targets, config.calorie_tolerance);
                evaluated += 1;
                if best.is_none_or(|current| score > current.score) {
                    best = Some(Combination {
                        meals,
                        score,
                        tier: SearchTier::Exhaustive,
                    });
                }
            }
        }
    }

    debug!(
        evaluated,
        best = best.map(|c| c.score).unwrap_or(0.0),
        "exhaustive tier done"
    );

    if best.is_none_or(|c| c.score < config.fallback_threshold) {
        let full = [
            pools.pool(MealType::Breakfast),
            pools.pool(MealType::Lunch),
            pools.pool(MealType::Dinner),
        ];
        for _ in 0..config.random_samples {
            let meals = [
                full[0][rng.pick(full[0].len())],
                full[1][rng.pick(full[1].len())],
                full[2][rng.pick(full[2].len())],
            ];
            let score = penalized_score(&meals, targets, config.calorie_tolerance);
            if best.is_none_or(|current| score > current.score) {
                best = Some(Combination {
                    meals,
                    score,
                    tier: SearchTier::Randomized,
                });
            }
        }
        debug!(samples = config.random_samples, "randomized tier done");
    }

    // k >= 1 and every pool is non-empty, so the exhaustive tier always produced a triple.
    let best = best.ok_or_else(|| {
        PlannerError::InvalidInput("search evaluated no combinations".to_string())
    })?;

    info!(
        score = best.score,
        tier = ?best.tier,
        breakfast = best.meals[0].id(),
        lunch = best.meals[1].id(),
        dinner = best.meals[2].id(),
        "selected daily combination"
    );
    Ok(best)
}
