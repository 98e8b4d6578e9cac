use tracing::{debug, info};

use crate::error::{PlannerError, Result};
use crate::models::{
    Household, MacroTotals, MealType, PlannedMeal, Selection, WeeklyPlan,
};
use crate::planner::config::PlannerConfig;
use crate::planner::constants::*;
use crate::planner::daily::calorie_deviation;
use crate::planner::scoring::{MealPools, ScoredRecipe};
use crate::planner::window::RecentWindow;

/// Meals in a week, used to spread weekly macro targets per meal.
const MEALS_PER_WEEK: f64 = (DAYS_PER_WEEK * 3) as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Macro {
    Protein,
    Fat,
    Carbs,
}

impl Macro {
    pub const ALL: [Macro; 3] = [Macro::Protein, Macro::Fat, Macro::Carbs];

    /// Grams of this macro in `totals`.
    pub fn of(&self, totals: &MacroTotals) -> f64 {
        match self {
            Macro::Protein => totals.protein,
            Macro::Fat => totals.fat,
            Macro::Carbs => totals.carbs,
        }
    }
}

/// Weekly macro targets in grams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroTargets {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl MacroTargets {
    /// 25/30/45 protein/fat/carb split of the household's weekly calories.
    pub fn weekly(household: &Household) -> Self {
        let calories = household.daily_calorie_target() * DAYS_PER_WEEK as f64;
        Self {
            protein: calories * WEEKLY_PROTEIN_SHARE / KCAL_PER_GRAM_PROTEIN,
            fat: calories * WEEKLY_FAT_SHARE / KCAL_PER_GRAM_FAT,
            carbs: calories * WEEKLY_CARB_SHARE / KCAL_PER_GRAM_CARBS,
        }
    }

    pub fn get(&self, m: Macro) -> f64 {
        match m {
            Macro::Protein => self.protein,
            Macro::Fat => self.fat,
            Macro::Carbs => self.carbs,
        }
    }

    /// Fair share of one meal.
    pub fn per_meal(&self, m: Macro) -> f64 {
        self.get(m) / MEALS_PER_WEEK
    }
}

/// Relative deviation of each weekly macro total from its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroDeviation {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl MacroDeviation {
    pub fn between(actual: &MacroTotals, targets: &MacroTargets) -> Self {
        let ratio = |value: f64, target: f64| {
            if target > 0.0 { value / target - 1.0 } else { 0.0 }
        };
        Self {
            protein: ratio(actual.protein, targets.protein),
            fat: ratio(actual.fat, targets.fat),
            carbs: ratio(actual.carbs, targets.carbs),
        }
    }

    pub fn get(&self, m: Macro) -> f64 {
        match m {
            Macro::Protein => self.protein,
            Macro::Fat => self.fat,
            Macro::Carbs => self.carbs,
        }
    }

    pub fn within(&self, tolerance: f64) -> bool {
        Macro::ALL.iter().all(|m| self.get(*m).abs() <= tolerance)
    }

    pub fn out_of_band(&self, tolerance: f64) -> impl Iterator<Item = Macro> + '_ {
        Macro::ALL
            .into_iter()
            .filter(move |m| self.get(*m).abs() > tolerance)
    }

    /// The out-of-band macro with the largest deviation, first one on ties.
    pub fn dominant(&self, tolerance: f64) -> Option<Macro> {
        let mut best: Option<Macro> = None;
        for m in self.out_of_band(tolerance) {
            if best.is_none_or(|b| self.get(m).abs() > self.get(b).abs()) {
                best = Some(m);
            }
        }
        best
    }
}

/// True when a meal pushes the dominant deviation further from target.
pub fn should_replace(
    meal: &MacroTotals,
    deviation: &MacroDeviation,
    targets: &MacroTargets,
    tolerance: f64,
) -> bool {
    let Some(m) = deviation.dominant(tolerance) else {
        return false;
    };
    let share = targets.per_meal(m);
    if deviation.get(m) > 0.0 {
        m.of(meal) > share
    } else {
        m.of(meal) < share
    }
}

/// How strongly a candidate corrects every out-of-band macro.
pub fn replacement_score(candidate: &MacroTotals, deviation: &MacroDeviation, tolerance: f64) -> f64 {
    deviation
        .out_of_band(tolerance)
        .map(|m| {
            let grams = m.of(candidate) * REPLACEMENT_GRAM_WEIGHT;
            if deviation.get(m) > 0.0 { -grams } else { grams }
        })
        .sum()
}

/// Best same-slot replacement for `current`.
///
/// Candidates must differ from the current recipe, be absent from `excluded`,
/// land within `replacement_calorie_window` of the current meal's calories
/// and score strictly higher than the current meal itself.
pub fn find_alternative<'r>(
    pool: &[ScoredRecipe<'r>],
    current: &PlannedMeal,
    excluded: &RecentWindow,
    household: &Household,
    deviation: &MacroDeviation,
    config: &PlannerConfig,
) -> Option<ScoredRecipe<'r>> {
    let current_totals =
        MacroTotals::of_recipe(&current.recipe, household.serving_multiplier(&current.recipe));
    let current_score = replacement_score(&current_totals, deviation, config.macro_tolerance);

    let mut best: Option<(f64, ScoredRecipe<'r>)> = None;
    for sr in pool {
        if sr.id() == current.recipe.id || excluded.contains(sr.id()) {
            continue;
        }
        let totals = MacroTotals::of_recipe(sr.recipe, household.serving_multiplier(sr.recipe));
        if calorie_deviation(totals.calories, current_totals.calories)
            > config.replacement_calorie_window
        {
            continue;
        }
        let score = replacement_score(&totals, deviation, config.macro_tolerance);
        if score <= current_score {
            continue;
        }
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, *sr));
        }
    }
    best.map(|(_, sr)| sr)
}

/// Recipe ids planned within `days` of day index `d` on either side, day `d` excluded.
fn neighbour_window(plan: &WeeklyPlan, d: usize, days: usize) -> RecentWindow {
    let start = d.saturating_sub(days);
    let end = (d + days + 1).min(plan.days.len());
    RecentWindow::from_days(
        2 * days,
        plan.days[start..d]
            .iter()
            .chain(&plan.days[d + 1..end])
            .map(|day| day.recipe_ids().collect::<Vec<_>>()),
    )
}

/// Swap up to `max_replacements` meals to pull weekly macros back within tolerance.
///
/// Returns the number of meals replaced. A plan already in band is left untouched.
pub fn optimize_weekly_macros(
    plan: &mut WeeklyPlan,
    pools: &MealPools,
    config: &PlannerConfig,
) -> Result<usize> {
    if plan.days.len() != DAYS_PER_WEEK {
        return Err(PlannerError::InvalidInput(format!(
            "weekly plan has {} days, expected {}",
            plan.days.len(),
            DAYS_PER_WEEK
        )));
    }

    let household = plan.household;
    let targets = MacroTargets::weekly(&household);
    let tolerance = config.macro_tolerance;
    let mut deviation = MacroDeviation::between(&plan.week_totals(), &targets);

    if deviation.within(tolerance) {
        debug!("weekly macros already within tolerance");
        return Ok(0);
    }

    let mut replaced = 0;
    'days: for d in 0..plan.days.len() {
        for meal_type in MealType::ALL {
            if replaced >= config.max_replacements {
                break 'days;
            }
            let Some(current) = plan.days[d].meal(meal_type).cloned() else {
                continue;
            };
            let multiplier = household.serving_multiplier(&current.recipe);
            let meal_totals = MacroTotals::of_recipe(&current.recipe, multiplier);
            if !should_replace(&meal_totals, &deviation, &targets, tolerance) {
                continue;
            }

            let excluded = neighbour_window(plan, d, config.anti_repeat_days);
            let Some(alternative) = find_alternative(
                pools.pool(meal_type),
                &current,
                &excluded,
                &household,
                &deviation,
                config,
            ) else {
                continue;
            };

            info!(
                day = d + 1,
                meal = %meal_type,
                from = current.recipe.id,
                to = alternative.id(),
                "replaced meal to rebalance macros"
            );
            plan.days[d].replace_meal(
                PlannedMeal::new(meal_type, alternative.recipe, alternative.score)
                    .with_selection(Selection::MacroReplacement),
                &household,
            );
            replaced += 1;

            deviation = MacroDeviation::between(&plan.week_totals(), &targets);
            if deviation.within(tolerance) {
                break 'days;
            }
        }
    }

    debug!(
        replaced,
        protein = deviation.protein,
        fat = deviation.fat,
        carbs = deviation.carbs,
        "macro optimization finished"
    );
    plan.replacements += replaced;
    Ok(replaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Recipe, WeeklyDay};

    fn totals(protein: f64, fat: f64, carbs: f64) -> MacroTotals {
        MacroTotals {
            calories: protein * 4.0 + fat * 9.0 + carbs * 4.0,
            protein,
            fat,
            carbs,
        }
    }

    #[test]
    fn test_weekly_targets_single_adult() {
        let targets = MacroTargets::weekly(&Household::default());
        // 14000 kcal/week
        assert!((targets.protein - 875.0).abs() < 1e-9);
        assert!((targets.fat - 14000.0 * 0.30 / 9.0).abs() < 1e-9);
        assert!((targets.carbs - 1575.0).abs() < 1e-9);
        assert!((targets.per_meal(Macro::Protein) - 875.0 / 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_dominant_picks_largest_out_of_band() {
        let deviation = MacroDeviation {
            protein: 0.30,
            fat: -0.05,
            carbs: -0.12,
        };
        assert!(!deviation.within(0.07));
        assert_eq!(deviation.dominant(0.07), Some(Macro::Protein));
        assert_eq!(
            deviation.out_of_band(0.07).collect::<Vec<_>>(),
            vec![Macro::Protein, Macro::Carbs]
        );

        let calm = MacroDeviation {
            protein: 0.05,
            fat: -0.07,
            carbs: 0.0,
        };
        assert!(calm.within(0.07));
        assert_eq!(calm.dominant(0.07), None);
    }

    #[test]
    fn test_should_replace_wrong_side_only() {
        let targets = MacroTargets::weekly(&Household::default());
        let share = targets.per_meal(Macro::Protein);
        let too_much = MacroDeviation {
            protein: 0.3,
            fat: 0.0,
            carbs: 0.0,
        };

        assert!(should_replace(&totals(share + 10.0, 10.0, 50.0), &too_much, &targets, 0.07));
        assert!(!should_replace(&totals(share - 10.0, 10.0, 50.0), &too_much, &targets, 0.07));

        let too_little = MacroDeviation {
            protein: -0.3,
            ..too_much
        };
        assert!(should_replace(&totals(share - 10.0, 10.0, 50.0), &too_little, &targets, 0.07));
    }

    fn recipe(id: u32, protein: f64) -> Recipe {
        Recipe {
            id,
            name: format!("Lunch {}", id),
            description: String::new(),
            meal_type: MealType::Lunch,
            diet_types: vec![],
            allergens: vec![],
            calories: 800.0,
            protein,
            fat: 26.0,
            carbs: 90.0,
            cooking_time: 20,
            servings: 1,
            ingredients: vec![],
            instructions: vec![],
        }
    }

    fn scored(recipe: &Recipe) -> ScoredRecipe<'_> {
        ScoredRecipe {
            recipe,
            score: 0.0,
            available_count: 0,
            missing_count: 0,
        }
    }

    #[test]
    fn test_alternative_must_beat_current_meal() {
        let recipes = [recipe(1, 80.0), recipe(2, 80.0), recipe(3, 50.0)];
        let pool: Vec<ScoredRecipe> = recipes.iter().map(scored).collect();
        let current = PlannedMeal::new(MealType::Lunch, &recipes[0], 0.0);
        let deviation = MacroDeviation {
            protein: 0.6,
            fat: 0.0,
            carbs: 0.0,
        };
        let household = Household::default();
        let config = PlannerConfig::default();

        let found = find_alternative(
            &pool,
            &current,
            &RecentWindow::default(),
            &household,
            &deviation,
            &config,
        );
        assert_eq!(found.map(|sr| sr.id()), Some(3));

        // The identical sibling does not correct anything.
        let blocked = RecentWindow::from_days(1, [[3]]);
        let found = find_alternative(&pool, &current, &blocked, &household, &deviation, &config);
        assert!(found.is_none());
    }

    #[test]
    fn test_neighbour_window_covers_both_sides() {
        let recipes: Vec<Recipe> = (1..=7).map(|id| recipe(id, 50.0)).collect();
        let household = Household::default();
        let plan = WeeklyPlan {
            days: recipes
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    WeeklyDay::new(
                        i as u32 + 1,
                        vec![PlannedMeal::new(MealType::Lunch, r, 0.0)],
                        &household,
                    )
                })
                .collect(),
            household,
            replacements: 0,
        };

        let window = neighbour_window(&plan, 3, 2);
        let blocked: Vec<u32> = (1..=7).filter(|id| window.contains(*id)).collect();
        assert_eq!(blocked, vec![2, 3, 5, 6]);

        let window = neighbour_window(&plan, 6, 3);
        let blocked: Vec<u32> = (1..=7).filter(|id| window.contains(*id)).collect();
        assert_eq!(blocked, vec![4, 5, 6]);
    }

    #[test]
    fn test_replacement_score_is_corrective() {
        let deviation = MacroDeviation {
            protein: 0.3,
            fat: 0.0,
            carbs: -0.2,
        };
        // -0.1*40 + 0.1*80
        let score = replacement_score(&totals(40.0, 10.0, 80.0), &deviation, 0.07);
        assert!((score - 4.0).abs() < 1e-9);
    }
}
