use std::path::Path;

use crate::error::Result;
use crate::models::{ShoppingList, WeeklyPlan};

/// Write a shopping list to a CSV file.
pub fn write_shopping_csv(list: &ShoppingList, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["name", "quantity", "unit", "meals"])?;

    for item in &list.items {
        let meals: Vec<&str> = item.reasons.iter().map(|m| m.as_str()).collect();
        wtr.write_record([
            item.name.clone(),
            format!("{:.2}", item.quantity),
            item.unit.clone(),
            meals.join(";"),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write a weekly plan to a CSV file, one row per meal.
pub fn write_weekly_csv(plan: &WeeklyPlan, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "day",
        "meal",
        "recipe_id",
        "recipe",
        "calories",
        "protein",
        "fat",
        "carbs",
        "cooking_time",
        "pantry_score",
    ])?;

    for day in &plan.days {
        for meal in &day.meals {
            let recipe = &meal.recipe;
            wtr.write_record([
                day.day.to_string(),
                meal.meal_type.to_string(),
                recipe.id.to_string(),
                recipe.name.clone(),
                format!("{:.0}", recipe.calories),
                format!("{:.1}", recipe.protein),
                format!("{:.1}", recipe.fat),
                format!("{:.1}", recipe.carbs),
                recipe.cooking_time.to_string(),
                format!("{:.3}", meal.pantry_score),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
