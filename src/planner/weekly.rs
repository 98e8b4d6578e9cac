use tracing::{debug, info};

use crate::error::{PlannerError, Result};
use crate::models::{Household, MealType, PlannedMeal, WeeklyDay, WeeklyPlan};
use crate::planner::config::PlannerConfig;
use crate::planner::constants::{DAYS_PER_WEEK, meal_calorie_share};
use crate::planner::scoring::MealPools;
use crate::planner::selectors::{SelectionContext, select_meal};
use crate::planner::window::RecentWindow;

/// Plan seven days of breakfast, lunch and dinner for `household`.
///
/// Each slot goes through the selector chain against its share of the
/// household's daily calorie target. Recipes chosen in the previous
/// `anti_repeat_days` days are avoided while an alternative exists.
pub fn plan_week(
    pools: &MealPools,
    household: &Household,
    pantry_weight: f64,
    config: &PlannerConfig,
) -> Result<WeeklyPlan> {
    pools.ensure_viable()?;

    let daily_target = household.daily_calorie_target();
    let mut window = RecentWindow::new(config.anti_repeat_days);
    let mut days = Vec::with_capacity(DAYS_PER_WEEK);

    for day in 0..DAYS_PER_WEEK {
        let mut meals = Vec::with_capacity(MealType::ALL.len());

        for meal_type in MealType::ALL {
            let ctx = SelectionContext {
                pool: pools.pool(meal_type),
                target_calories: daily_target * meal_calorie_share(meal_type),
                window: &window,
                household,
                pantry_weight,
                day,
            };
            let (selection, picked) =
                select_meal(&ctx).ok_or_else(|| PlannerError::NoViablePlan(vec![meal_type]))?;

            debug!(
                day = day + 1,
                meal = %meal_type,
                recipe = picked.id(),
                ?selection,
                "selected weekly meal"
            );
            meals.push(
                PlannedMeal::new(meal_type, picked.recipe, picked.score).with_selection(selection),
            );
        }

        let planned = WeeklyDay::new(day as u32 + 1, meals, household);
        window.push_day(planned.recipe_ids().collect::<Vec<_>>());
        days.push(planned);
    }

    let plan = WeeklyPlan {
        days,
        household: *household,
        replacements: 0,
    };
    info!(
        week_calories = plan.week_totals().calories,
        target = daily_target * DAYS_PER_WEEK as f64,
        "planned week"
    );
    Ok(plan)
}
