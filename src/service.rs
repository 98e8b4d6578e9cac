//! Request orchestration: candidate fetch, scoring, planning, ingredient
//! accounting and persistence.

use tracing::{info, warn};

use crate::error::{PlannerError, Result};
use crate::models::{
    DailyPlan, MenuBody, MenuRequest, SavedShoppingList, ShoppingList, WeeklyPlan,
};
use crate::planner::constants::DEFAULT_DAILY_CALORIES;
use crate::planner::{
    DailyTargets, IngredientLedger, MealPools, PlannerConfig, RandomSource, StockMap,
    daily_shopping_list, find_best_combination, optimize_weekly_macros, plan_week, score_recipes,
    weekly_shopping_list,
};
use crate::state::{GoalStore, MenuStore, PantryStore, RecipeCatalog, RecipeFilter};

/// A generated daily menu with its derived shopping list.
#[derive(Debug, Clone)]
pub struct DailyMenu {
    pub plan: DailyPlan,
    pub shopping_list: ShoppingList,
    pub target_calories: f64,
}

/// A generated weekly menu with its derived shopping list.
#[derive(Debug, Clone)]
pub struct WeeklyMenu {
    pub plan: WeeklyPlan,
    pub shopping_list: ShoppingList,
}

/// Calorie target for a daily request: the request's own, then the user's goal, then 2000.
pub fn resolve_target_calories<S>(store: &S, request: &MenuRequest) -> Result<f64>
where
    S: GoalStore + ?Sized,
{
    match request.target_calories {
        Some(target) if target > 0.0 => Ok(target),
        Some(target) if target < 0.0 => Err(PlannerError::InvalidInput(format!(
            "target calories must be positive, got {}",
            target
        ))),
        _ => Ok(store
            .daily_calorie_goal(request.user_id)?
            .unwrap_or(DEFAULT_DAILY_CALORIES)),
    }
}

/// Pantry snapshot for the request; empty when the pantry is not considered.
fn load_stock<S>(store: &S, request: &MenuRequest) -> Result<StockMap>
where
    S: PantryStore + ?Sized,
{
    if !request.consider_pantry {
        return Ok(StockMap::default());
    }
    let items = store.pantry_items(request.user_id)?;
    Ok(StockMap::from_pantry(&items))
}

/// Generate the best single-day menu for `request`.
pub fn generate_daily_menu<S>(
    store: &S,
    request: &MenuRequest,
    config: &PlannerConfig,
    rng: &mut dyn RandomSource,
) -> Result<DailyMenu>
where
    S: RecipeCatalog + PantryStore + GoalStore + ?Sized,
{
    let target_calories = resolve_target_calories(store, request)?;
    let recipes = store.filtered_recipes(&RecipeFilter::from_request(request))?;
    let stock = load_stock(store, request)?;

    info!(
        candidates = recipes.len(),
        pantry_items = stock.len(),
        target_calories,
        "generating daily menu"
    );

    let scored = score_recipes(
        &recipes,
        &stock,
        request.effective_importance(),
        config.strict_missing_ratio,
    );
    let pools = MealPools::partition(scored);
    let targets = DailyTargets::from_request(request, target_calories);

    let mut plan = find_best_combination(&pools, &targets, config, rng)?.into_plan();
    IngredientLedger::new(stock, request.household.normalized()).fill_daily(&mut plan);
    let shopping_list = daily_shopping_list(&plan);

    Ok(DailyMenu {
        plan,
        shopping_list,
        target_calories,
    })
}

/// Generate a seven-day menu for the request's household.
///
/// A failing macro optimization is logged and the unoptimized week returned.
pub fn generate_weekly_menu<S>(
    store: &S,
    request: &MenuRequest,
    config: &PlannerConfig,
) -> Result<WeeklyMenu>
where
    S: RecipeCatalog + PantryStore + ?Sized,
{
    let household = request.household.normalized();
    let recipes = store.filtered_recipes(&RecipeFilter::from_request(request))?;
    let stock = load_stock(store, request)?;

    info!(
        candidates = recipes.len(),
        pantry_items = stock.len(),
        adults = household.adults,
        children = household.children,
        "generating weekly menu"
    );

    let scored = score_recipes(
        &recipes,
        &stock,
        request.effective_importance(),
        config.strict_missing_ratio,
    );
    let pools = MealPools::partition(scored);

    let mut plan = plan_week(&pools, &household, request.pantry_weight(), config)?;
    match optimize_weekly_macros(&mut plan, &pools, config) {
        Ok(replaced) => info!(replaced, "macro optimization done"),
        Err(e) => warn!(error = %e, "macro optimization failed, keeping unoptimized plan"),
    }

    IngredientLedger::new(stock, household).fill_weekly(&mut plan);
    let shopping_list = weekly_shopping_list(&plan);

    Ok(WeeklyMenu {
        plan,
        shopping_list,
    })
}

/// Persist a menu, then its shopping list.
///
/// The menu write is authoritative. A failed shopping-list write is logged
/// and the menu id is still returned.
pub fn save_menu<S>(
    store: &mut S,
    user_id: u32,
    body: MenuBody,
    shopping_list: ShoppingList,
) -> Result<u32>
where
    S: MenuStore + ?Sized,
{
    let kind = body.kind();
    let menu_id = store.save_menu(user_id, body)?;
    info!(menu_id, kind, "saved menu");

    let record = SavedShoppingList {
        menu_id,
        user_id,
        list: shopping_list,
    };
    if let Err(e) = store.save_shopping_list(record) {
        warn!(menu_id, error = %e, "failed to save shopping list");
    }

    Ok(menu_id)
}

/// Stored shopping list of a menu.
pub fn shopping_list_for_menu<S>(store: &S, menu_id: u32) -> Result<SavedShoppingList>
where
    S: MenuStore + ?Sized,
{
    store
        .shopping_list(menu_id)?
        .ok_or(PlannerError::MenuNotFound(menu_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserGoals;
    use crate::state::{JsonStore, PlannerData};

    #[test]
    fn test_target_calories_fallback_order() {
        let mut data = PlannerData::default();
        data.goals.push(UserGoals {
            user_id: 1,
            daily_calories: 1700.0,
        });
        let store = JsonStore::new(data);

        let explicit = MenuRequest {
            target_calories: Some(2200.0),
            ..Default::default()
        };
        assert_eq!(resolve_target_calories(&store, &explicit).unwrap(), 2200.0);

        let from_goal = MenuRequest::default();
        assert_eq!(resolve_target_calories(&store, &from_goal).unwrap(), 1700.0);

        let unknown_user = MenuRequest {
            user_id: 9,
            target_calories: Some(0.0),
            ..Default::default()
        };
        assert_eq!(
            resolve_target_calories(&store, &unknown_user).unwrap(),
            DEFAULT_DAILY_CALORIES
        );

        let negative = MenuRequest {
            target_calories: Some(-10.0),
            ..Default::default()
        };
        assert!(matches!(
            resolve_target_calories(&store, &negative),
            Err(PlannerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_shopping_list_is_menu_not_found() {
        let store = JsonStore::new(PlannerData::default());
        assert!(matches!(
            shopping_list_for_menu(&store, 42),
            Err(PlannerError::MenuNotFound(42))
        ));
    }
}
