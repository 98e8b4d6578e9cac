use crate::models::{
    DailyPlan, MacroTotals, PlannedMeal, SearchTier, Selection, ShoppingList, WeeklyPlan,
};

fn selection_label(selection: Option<Selection>) -> &'static str {
    match selection {
        Some(Selection::AntiRepeat) | None => "",
        Some(Selection::RepeatsAllowed) => "  [repeat]",
        Some(Selection::PantryOnly) => "  [pantry fit]",
        Some(Selection::Rotation) => "  [rotation]",
        Some(Selection::MacroReplacement) => "  [macro swap]",
    }
}

fn format_totals(totals: &MacroTotals) -> String {
    format!(
        "{:.0} kcal | P {:.0}g F {:.0}g C {:.0}g",
        totals.calories, totals.protein, totals.fat, totals.carbs
    )
}

fn print_meal(meal: &PlannedMeal, width: usize) {
    println!(
        "  {:<9} {:<width$} - {:>4.0} kcal, {:>3} min, pantry {:>3.0}%{}",
        meal.meal_type.as_str(),
        meal.recipe.name,
        meal.recipe.calories,
        meal.recipe.cooking_time,
        meal.pantry_score * 100.0,
        selection_label(meal.selection),
        width = width
    );
}

/// Column width of `text` in characters, which is what `{:<width$}` pads by.
fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn name_width<'a>(meals: impl Iterator<Item = &'a PlannedMeal>) -> usize {
    meals.map(|m| display_width(&m.recipe.name)).max().unwrap_or(10)
}

/// Display a daily menu.
pub fn display_daily_plan(plan: &DailyPlan, target_calories: f64) {
    println!();
    println!("=== Daily Menu ===");
    println!();

    let width = name_width(plan.meals.iter());
    for meal in &plan.meals {
        print_meal(meal, width);
    }

    let tier = match plan.tier {
        SearchTier::Exhaustive => "exhaustive",
        SearchTier::Randomized => "randomized",
    };

    println!();
    println!("--- Summary ---");
    println!("Target: {:.0} kcal", target_calories);
    println!("Total: {}", format_totals(&plan.totals));
    println!("Cooking time: {} min", plan.total_time);
    println!("Score: {:.3} ({} search)", plan.score, tier);
    println!();
}

/// Display a seven-day menu with per-day totals.
pub fn display_weekly_plan(plan: &WeeklyPlan) {
    println!();
    println!(
        "=== Weekly Menu ({} adults, {} children) ===",
        plan.household.adults, plan.household.children
    );

    let width = name_width(plan.days.iter().flat_map(|d| d.meals.iter()));
    for day in &plan.days {
        println!();
        println!("Day {}  ({})", day.day, format_totals(&day.totals));
        for meal in &day.meals {
            print_meal(meal, width);
        }
    }

    println!();
    println!("--- Summary ---");
    println!("Week total: {}", format_totals(&plan.week_totals()));
    println!("Cooking time: {} min", plan.total_time());
    println!("Macro swaps: {}", plan.replacements);
    println!();
}

/// Display a shopping list.
pub fn display_shopping_list(list: &ShoppingList) {
    if list.is_empty() {
        println!("Shopping list: (nothing to buy)");
        return;
    }

    println!();
    println!("=== Shopping List ({} items) ===", list.len());
    println!();

    let width = list
        .items
        .iter()
        .map(|i| display_width(&i.name))
        .max()
        .unwrap_or(10);
    for item in &list.items {
        let reasons: Vec<&str> = item.reasons.iter().map(|m| m.as_str()).collect();
        println!(
            "  {:<width$} {:>8.1} {:<6} ({})",
            item.name,
            item.quantity,
            item.unit,
            reasons.join(", "),
            width = width
        );
    }

    println!();
}
