use tracing::debug;

use crate::models::{
    DailyPlan, Household, IngredientLine, IngredientUsage, MealType, PlannedMeal, Recipe,
    ShoppingList, WeeklyPlan,
};
use crate::planner::matcher::StockMap;

/// Simulated pantry depletion over the meals of one request.
///
/// Owns its copy of the stock, so planning never touches the caller's snapshot.
#[derive(Debug, Clone)]
pub struct IngredientLedger {
    stock: StockMap,
    household: Household,
}

impl IngredientLedger {
    pub fn new(stock: StockMap, household: Household) -> Self {
        Self { stock, household }
    }

    /// Draw one recipe's household-scaled ingredients from stock.
    pub fn consume_meal(&mut self, meal_type: MealType, recipe: &Recipe) -> Vec<IngredientLine> {
        let multiplier = self.household.serving_multiplier(recipe);
        recipe
            .ingredients
            .iter()
            .map(|ing| {
                let requested = ing.quantity * multiplier;
                let used = self.stock.take(&ing.name, requested);
                IngredientLine {
                    name: ing.name.clone(),
                    unit: ing.unit.clone(),
                    meal_type,
                    requested,
                    used,
                    missing: requested - used,
                }
            })
            .collect()
    }

    /// Draw every meal in order.
    pub fn consume_meals(&mut self, meals: &[PlannedMeal]) -> IngredientUsage {
        let lines = meals
            .iter()
            .flat_map(|meal| self.consume_meal(meal.meal_type, &meal.recipe))
            .collect();
        IngredientUsage { lines }
    }

    pub fn fill_daily(&mut self, plan: &mut DailyPlan) {
        plan.usage = self.consume_meals(&plan.meals);
    }

    /// Deplete day by day, so later days only see what earlier days left.
    pub fn fill_weekly(&mut self, plan: &mut WeeklyPlan) {
        for day in &mut plan.days {
            day.usage = self.consume_meals(&day.meals);
            debug!(
                day = day.day,
                missing = day.usage.missing().len(),
                "ingredient usage computed"
            );
        }
    }

    /// Stock left for `name` after everything consumed so far.
    pub fn remaining(&self, name: &str) -> f64 {
        self.stock.available(name)
    }
}

/// Shopping list for a daily plan.
pub fn daily_shopping_list(plan: &DailyPlan) -> ShoppingList {
    ShoppingList::from_lines(&plan.usage.lines)
}

/// Shopping list for a whole week.
pub fn weekly_shopping_list(plan: &WeeklyPlan) -> ShoppingList {
    ShoppingList::from_lines(plan.ingredient_lines())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, PantryItem};

    fn omelette(servings: u32) -> Recipe {
        Recipe {
            id: 1,
            name: "Omelette".to_string(),
            description: String::new(),
            meal_type: MealType::Breakfast,
            diet_types: vec![],
            allergens: vec![],
            calories: 300.0,
            protein: 20.0,
            fat: 20.0,
            carbs: 5.0,
            cooking_time: 10,
            servings,
            ingredients: vec![
                Ingredient::new("Eggs", 3.0, "pcs"),
                Ingredient::new("Butter", 10.0, "g"),
            ],
            instructions: vec![],
        }
    }

    #[test]
    fn test_consume_meal_splits_used_and_missing() {
        let stock = StockMap::from_pantry(&[PantryItem::new(1, "eggs", 4.0, "pcs")]);
        let mut ledger = IngredientLedger::new(stock, Household::new(2, 0));

        let lines = ledger.consume_meal(MealType::Breakfast, &omelette(1));

        assert_eq!(lines.len(), 2);
        let eggs = &lines[0];
        assert_eq!(eggs.requested, 6.0);
        assert_eq!(eggs.used, 4.0);
        assert_eq!(eggs.missing, 2.0);
        let butter = &lines[1];
        assert_eq!(butter.used, 0.0);
        assert_eq!(butter.missing, 20.0);
        assert_eq!(ledger.remaining("Eggs"), 0.0);
    }

    #[test]
    fn test_depletion_carries_across_meals() {
        let stock = StockMap::from_pantry(&[PantryItem::new(1, "Eggs", 5.0, "pcs")]);
        let mut ledger = IngredientLedger::new(stock, Household::default());
        let meal = PlannedMeal::new(MealType::Breakfast, &omelette(1), 0.5);

        let usage = ledger.consume_meals(&[meal.clone(), meal]);

        let eggs: Vec<&IngredientLine> = usage.lines.iter().filter(|l| l.name == "Eggs").collect();
        assert_eq!(eggs[0].used, 3.0);
        assert_eq!(eggs[1].used, 2.0);
        assert_eq!(eggs[1].missing, 1.0);
        for line in &usage.lines {
            assert!((line.used + line.missing - line.requested).abs() < 1e-9);
        }
    }
}
