use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::models::{Household, Ingredient, MealType, Recipe};

/// Energy and macro totals, in kcal and grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl MacroTotals {
    /// Totals of a recipe scaled by `multiplier`.
    pub fn of_recipe(recipe: &Recipe, multiplier: f64) -> Self {
        Self {
            calories: recipe.calories * multiplier,
            protein: recipe.protein * multiplier,
            fat: recipe.fat * multiplier,
            carbs: recipe.carbs * multiplier,
        }
    }
}

impl AddAssign for MacroTotals {
    fn add_assign(&mut self, other: Self) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.fat += other.fat;
        self.carbs += other.carbs;
    }
}

/// Which step of the weekly fallback chain picked a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Closest to the calorie target, outside the anti-repeat window.
    AntiRepeat,
    /// Closest to the calorie target, repeats allowed.
    RepeatsAllowed,
    /// Best pantry fit, calories ignored.
    PantryOnly,
    /// Deterministic rotation through the pool.
    Rotation,
    /// Swapped in by the macro optimizer.
    MacroReplacement,
}

/// Which search tier produced a daily combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTier {
    Exhaustive,
    Randomized,
}

/// A recipe assigned to a meal slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub meal_type: MealType,
    pub recipe: Recipe,
    pub pantry_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
}

impl PlannedMeal {
    pub fn new(meal_type: MealType, recipe: &Recipe, pantry_score: f64) -> Self {
        Self {
            meal_type,
            recipe: recipe.clone(),
            pantry_score,
            selection: None,
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }
}

/// One ingredient requirement of one meal after simulated pantry depletion.
///
/// `used + missing == requested` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub unit: String,
    pub meal_type: MealType,
    pub requested: f64,
    pub used: f64,
    pub missing: f64,
}

/// Ingredient lines for a set of meals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientUsage {
    pub lines: Vec<IngredientLine>,
}

impl IngredientUsage {
    /// Quantities taken from the pantry.
    pub fn used(&self) -> Vec<Ingredient> {
        self.lines
            .iter()
            .filter(|l| l.used > 0.0)
            .map(|l| Ingredient::new(l.name.clone(), l.used, l.unit.clone()))
            .collect()
    }

    /// Quantities the pantry could not cover.
    pub fn missing(&self) -> Vec<Ingredient> {
        self.lines
            .iter()
            .filter(|l| l.missing > 0.0)
            .map(|l| Ingredient::new(l.name.clone(), l.missing, l.unit.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Best breakfast + lunch + dinner combination for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPlan {
    pub meals: Vec<PlannedMeal>,
    /// Totals of the recipes as written.
    pub totals: MacroTotals,
    pub total_time: u32,
    pub score: f64,
    pub tier: SearchTier,
    #[serde(default)]
    pub usage: IngredientUsage,
}

impl DailyPlan {
    pub fn meal(&self, meal_type: MealType) -> Option<&PlannedMeal> {
        self.meals.iter().find(|m| m.meal_type == meal_type)
    }
}

/// One day of a weekly plan, totals adjusted for the household.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyDay {
    /// 1-based day number.
    pub day: u32,
    pub meals: Vec<PlannedMeal>,
    pub totals: MacroTotals,
    pub total_time: u32,
    #[serde(default)]
    pub usage: IngredientUsage,
}

impl WeeklyDay {
    pub fn new(day: u32, meals: Vec<PlannedMeal>, household: &Household) -> Self {
        let mut planned = Self {
            day,
            meals,
            totals: MacroTotals::default(),
            total_time: 0,
            usage: IngredientUsage::default(),
        };
        planned.recompute_totals(household);
        planned
    }

    pub fn meal(&self, meal_type: MealType) -> Option<&PlannedMeal> {
        self.meals.iter().find(|m| m.meal_type == meal_type)
    }

    pub fn recipe_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.meals.iter().map(|m| m.recipe.id)
    }

    /// Swap the meal in the same slot and refresh the day totals.
    pub fn replace_meal(&mut self, meal: PlannedMeal, household: &Household) {
        match self.meals.iter_mut().find(|m| m.meal_type == meal.meal_type) {
            Some(slot) => *slot = meal,
            None => self.meals.push(meal),
        }
        self.recompute_totals(household);
    }

    pub fn recompute_totals(&mut self, household: &Household) {
        let mut totals = MacroTotals::default();
        let mut time = 0;
        for meal in &self.meals {
            let multiplier = household.serving_multiplier(&meal.recipe);
            totals += MacroTotals::of_recipe(&meal.recipe, multiplier);
            time += meal.recipe.cooking_time;
        }
        self.totals = totals;
        self.total_time = time;
    }
}

/// Seven planned days plus the household they were sized for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub days: Vec<WeeklyDay>,
    pub household: Household,
    /// Meals swapped by the macro optimizer.
    #[serde(default)]
    pub replacements: usize,
}

impl WeeklyPlan {
    pub fn week_totals(&self) -> MacroTotals {
        let mut totals = MacroTotals::default();
        for day in &self.days {
            totals += day.totals;
        }
        totals
    }

    pub fn total_time(&self) -> u32 {
        self.days.iter().map(|d| d.total_time).sum()
    }

    /// All ingredient lines of the week, in day order.
    pub fn ingredient_lines(&self) -> impl Iterator<Item = &IngredientLine> {
        self.days.iter().flat_map(|d| d.usage.lines.iter())
    }
}
