use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::models::{MealType, PantryImportance, Recipe};
use crate::planner::matcher::StockMap;

/// A candidate recipe with its pantry fit, valid for one planning call.
#[derive(Debug, Clone, Copy)]
pub struct ScoredRecipe<'a> {
    pub recipe: &'a Recipe,
    /// Share of ingredients fully covered by stock, in [0, 1].
    pub score: f64,
    pub available_count: usize,
    pub missing_count: usize,
}

impl ScoredRecipe<'_> {
    pub fn id(&self) -> u32 {
        self.recipe.id
    }

    pub fn total_ingredients(&self) -> usize {
        self.available_count + self.missing_count
    }
}

/// Score one recipe against stock. Recipes without ingredients cannot be scored.
///
/// An ingredient counts as available only when stock covers the quantity as written.
pub fn score_recipe<'a>(recipe: &'a Recipe, stock: &StockMap) -> Option<ScoredRecipe<'a>> {
    let total = recipe.ingredients.len();
    if total == 0 {
        return None;
    }

    let available_count = recipe
        .ingredients
        .iter()
        .filter(|ing| stock.covers(&ing.name, ing.quantity))
        .count();

    Some(ScoredRecipe {
        recipe,
        score: available_count as f64 / total as f64,
        available_count,
        missing_count: total - available_count,
    })
}

/// Score all candidates, dropping unscorable ones and, under `strict`,
/// those missing more than `strict_missing_ratio` of their ingredients.
pub fn score_recipes<'a>(
    recipes: &'a [Recipe],
    stock: &StockMap,
    importance: PantryImportance,
    strict_missing_ratio: f64,
) -> Vec<ScoredRecipe<'a>> {
    let scored: Vec<ScoredRecipe<'a>> = recipes
        .iter()
        .filter_map(|recipe| score_recipe(recipe, stock))
        .filter(|sr| {
            importance != PantryImportance::Strict
                || (sr.missing_count as f64 / sr.total_ingredients() as f64) <= strict_missing_ratio
        })
        .collect();

    debug!(
        candidates = recipes.len(),
        kept = scored.len(),
        %importance,
        "scored recipes against pantry"
    );
    scored
}

/// Scored candidates partitioned by meal type, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct MealPools<'a> {
    pools: BTreeMap<MealType, Vec<ScoredRecipe<'a>>>,
}

impl<'a> MealPools<'a> {
    pub fn partition(scored: Vec<ScoredRecipe<'a>>) -> Self {
        let mut pools: BTreeMap<MealType, Vec<ScoredRecipe<'a>>> = BTreeMap::new();
        for sr in scored {
            pools.entry(sr.recipe.meal_type).or_default().push(sr);
        }
        Self { pools }
    }

    pub fn pool(&self, meal_type: MealType) -> &[ScoredRecipe<'a>] {
        self.pools
            .get(&meal_type)
            .map(|p| p.as_slice())
            .unwrap_or(&[])
    }

    /// Meal types without a single candidate, in slot order.
    pub fn empty_meal_types(&self) -> Vec<MealType> {
        MealType::ALL
            .into_iter()
            .filter(|m| self.pool(*m).is_empty())
            .collect()
    }

    /// Fail with `NoViablePlan` unless every meal type has a candidate.
    pub fn ensure_viable(&self) -> Result<()> {
        let empty = self.empty_meal_types();
        if empty.is_empty() {
            Ok(())
        } else {
            Err(PlannerError::NoViablePlan(empty))
        }
    }
}
