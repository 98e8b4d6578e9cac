#[macro_use]
extern crate assert_float_eq;

use rand::rngs::mock::StepRng;

use menu_planner_rs::error::PlannerError;
use menu_planner_rs::models::{
    Ingredient, MealType, MenuRequest, PantryImportance, PantryItem, Recipe, SearchTier,
};
use menu_planner_rs::planner::{
    DailyTargets, MealPools, PlannerConfig, StockMap, combination_score, find_best_combination,
    penalized_score, score_recipe, score_recipes, seeded,
};
use menu_planner_rs::service::generate_daily_menu;
use menu_planner_rs::state::{JsonStore, PlannerData};

fn make_recipe(id: u32, meal_type: MealType, calories: f64, ingredients: &[&str]) -> Recipe {
    Recipe {
        id,
        name: format!("{} #{}", meal_type, id),
        description: String::new(),
        meal_type,
        diet_types: vec![],
        allergens: vec![],
        calories,
        protein: 0.0,
        fat: 0.0,
        carbs: 0.0,
        cooking_time: 30,
        servings: 1,
        ingredients: ingredients
            .iter()
            .map(|name| Ingredient::new(*name, 100.0, "g"))
            .collect(),
        instructions: vec![],
    }
}

fn targets(calories: f64) -> DailyTargets {
    DailyTargets::from_request(&MenuRequest::default(), calories)
}

#[test]
fn test_calorie_fit_term() {
    // 2050 kcal against 2000: calorie term 0.975 * 0.40, plus the variety bonus.
    let recipes = [
        make_recipe(1, MealType::Breakfast, 500.0, &["Oats"]),
        make_recipe(2, MealType::Lunch, 800.0, &["Rice"]),
        make_recipe(3, MealType::Dinner, 750.0, &["Beans"]),
    ];
    let stock = StockMap::default();
    let meals = [
        score_recipe(&recipes[0], &stock).unwrap(),
        score_recipe(&recipes[1], &stock).unwrap(),
        score_recipe(&recipes[2], &stock).unwrap(),
    ];

    let score = combination_score(&meals, &targets(2000.0));
    assert_float_absolute_eq!(score, 0.975 * 0.40 + 0.05, 1e-9);

    // Within the 30% tolerance nothing is penalized.
    assert_float_absolute_eq!(penalized_score(&meals, &targets(2000.0), 0.3), score, 1e-9);
}

#[test]
fn test_far_off_calories_are_penalized() {
    let recipes = [
        make_recipe(1, MealType::Breakfast, 1500.0, &["Oats"]),
        make_recipe(2, MealType::Lunch, 1500.0, &["Rice"]),
        make_recipe(3, MealType::Dinner, 1000.0, &["Beans"]),
    ];
    let stock = StockMap::default();
    let meals = [
        score_recipe(&recipes[0], &stock).unwrap(),
        score_recipe(&recipes[1], &stock).unwrap(),
        score_recipe(&recipes[2], &stock).unwrap(),
    ];

    let raw = combination_score(&meals, &targets(2000.0));
    let penalized = penalized_score(&meals, &targets(2000.0), 0.3);
    // 4000 kcal is 100% over: factor max(0, 1 - 1.0 * 0.7) = 0.3
    assert_float_absolute_eq!(penalized, raw * 0.3, 1e-9);
}

#[test]
fn test_exhaustive_search_picks_best_fit() {
    let recipes = vec![
        make_recipe(1, MealType::Breakfast, 1200.0, &["Oats"]),
        make_recipe(2, MealType::Breakfast, 500.0, &["Eggs"]),
        make_recipe(3, MealType::Lunch, 800.0, &["Rice"]),
        make_recipe(4, MealType::Dinner, 100.0, &["Salad"]),
        make_recipe(5, MealType::Dinner, 700.0, &["Beans"]),
    ];
    let scored = score_recipes(&recipes, &StockMap::default(), PantryImportance::Ignore, 0.5);
    let pools = MealPools::partition(scored);

    let mut rng = StepRng::new(0, 1);
    let best =
        find_best_combination(&pools, &targets(2000.0), &PlannerConfig::default(), &mut rng)
            .unwrap();

    let ids: Vec<u32> = best.meals.iter().map(|m| m.id()).collect();
    assert_eq!(ids, vec![2, 3, 5]);
    assert_eq!(best.tier, SearchTier::Exhaustive);

    let plan = best.into_plan();
    assert_eq!(plan.meals.len(), 3);
    assert_float_absolute_eq!(plan.totals.calories, 2000.0, 1e-9);
    assert_eq!(plan.total_time, 90);
}

#[test]
fn test_missing_meal_type_is_reported() {
    let recipes = vec![
        make_recipe(1, MealType::Breakfast, 500.0, &["Oats"]),
        make_recipe(2, MealType::Lunch, 800.0, &["Rice"]),
    ];
    let scored = score_recipes(&recipes, &StockMap::default(), PantryImportance::Ignore, 0.5);
    let pools = MealPools::partition(scored);

    let mut rng = StepRng::new(0, 1);
    let result =
        find_best_combination(&pools, &targets(2000.0), &PlannerConfig::default(), &mut rng);
    match result {
        Err(PlannerError::NoViablePlan(missing)) => assert_eq!(missing, vec![MealType::Dinner]),
        other => panic!("expected NoViablePlan, got {:?}", other.map(|c| c.score)),
    }
}

#[test]
fn test_strict_pantry_never_picks_mostly_missing_recipes() {
    let data = PlannerData {
        recipes: vec![
            make_recipe(1, MealType::Breakfast, 500.0, &["Flour", "Sugar", "Eggs"]),
            make_recipe(2, MealType::Breakfast, 350.0, &["Eggs"]),
            make_recipe(3, MealType::Lunch, 800.0, &["Eggs", "Rice"]),
            make_recipe(4, MealType::Lunch, 800.0, &["Pasta", "Cream"]),
            make_recipe(5, MealType::Dinner, 700.0, &["Rice"]),
        ],
        pantry: vec![
            PantryItem::new(1, "eggs", 500.0, "g"),
            PantryItem::new(1, "Rice", 500.0, "g"),
        ],
        ..Default::default()
    };
    let store = JsonStore::new(data);
    let request = MenuRequest {
        target_calories: Some(2000.0),
        consider_pantry: true,
        pantry_importance: PantryImportance::Strict,
        ..Default::default()
    };

    let mut rng = seeded(Some(3));
    let menu = generate_daily_menu(&store, &request, &PlannerConfig::default(), &mut rng).unwrap();

    let ids: Vec<u32> = menu.plan.meals.iter().map(|m| m.recipe.id).collect();
    assert_eq!(ids, vec![2, 3, 5]);
    for meal in &menu.plan.meals {
        assert!(meal.pantry_score >= 0.5);
    }
    // Everything was on hand.
    assert!(menu.shopping_list.is_empty());
}

#[test]
fn test_randomized_tier_is_reproducible_with_a_seed() {
    let mut recipes = Vec::new();
    for i in 0..6 {
        recipes.push(make_recipe(10 + i, MealType::Breakfast, 300.0 + 50.0 * i as f64, &["Oats"]));
        recipes.push(make_recipe(20 + i, MealType::Lunch, 600.0 + 50.0 * i as f64, &["Rice"]));
        recipes.push(make_recipe(30 + i, MealType::Dinner, 500.0 + 50.0 * i as f64, &["Beans"]));
    }
    let store = JsonStore::new(PlannerData {
        recipes,
        ..Default::default()
    });
    let request = MenuRequest {
        target_calories: Some(1800.0),
        ..Default::default()
    };
    // Unreachable threshold forces the randomized pass after the exhaustive one.
    let config = PlannerConfig {
        fallback_threshold: 1.1,
        random_samples: 200,
        ..Default::default()
    };

    let run = || {
        let mut rng = seeded(Some(42));
        let menu = generate_daily_menu(&store, &request, &config, &mut rng).unwrap();
        (
            menu.plan.meals.iter().map(|m| m.recipe.id).collect::<Vec<_>>(),
            menu.plan.score,
        )
    };

    let (first_ids, first_score) = run();
    let (second_ids, second_score) = run();
    assert_eq!(first_ids, second_ids);
    assert_eq!(first_score, second_score);
    assert_eq!(first_ids.len(), 3);
}

#[test]
fn test_randomized_tier_reaches_past_the_top_k() {
    // Breakfast 1 sits right at a third of the target and ranks first, but only
    // breakfast 2 brings the day to exactly 2000 kcal.
    let recipes = vec![
        make_recipe(1, MealType::Breakfast, 667.0, &["Oats"]),
        make_recipe(2, MealType::Breakfast, 300.0, &["Yogurt"]),
        make_recipe(3, MealType::Lunch, 900.0, &["Rice"]),
        make_recipe(4, MealType::Dinner, 800.0, &["Beans"]),
    ];
    let scored = score_recipes(&recipes, &StockMap::default(), PantryImportance::Ignore, 0.5);
    let pools = MealPools::partition(scored);
    let config = PlannerConfig {
        top_k: 1,
        fallback_threshold: 0.44,
        random_samples: 1000,
        ..Default::default()
    };

    let mut rng = seeded(Some(7));
    let best = find_best_combination(&pools, &targets(2000.0), &config, &mut rng).unwrap();

    let ids: Vec<u32> = best.meals.iter().map(|m| m.id()).collect();
    assert_eq!(ids, vec![2, 3, 4]);
    assert_eq!(best.tier, SearchTier::Randomized);
    assert_float_absolute_eq!(best.score, 0.40 + 0.05, 1e-9);

    // With a zero threshold the randomized pass never runs.
    let config = PlannerConfig {
        fallback_threshold: 0.0,
        ..config
    };
    let best = find_best_combination(&pools, &targets(2000.0), &config, &mut rng).unwrap();
    assert_eq!(best.meals[0].id(), 1);
    assert_eq!(best.tier, SearchTier::Exhaustive);
}
