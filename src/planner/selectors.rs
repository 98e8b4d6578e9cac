use crate::models::{Household, Selection};
use crate::planner::constants::PANTRY_TIE_BREAK_WEIGHT;
use crate::planner::daily::calorie_deviation;
use crate::planner::scoring::ScoredRecipe;
use crate::planner::window::RecentWindow;

/// Everything a selector may look at when filling one weekly slot.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    pub pool: &'a [ScoredRecipe<'a>],
    /// Household calorie target for this slot.
    pub target_calories: f64,
    pub window: &'a RecentWindow,
    pub household: &'a Household,
    pub pantry_weight: f64,
    /// 0-based day index.
    pub day: usize,
}

/// One step of the fallback chain.
pub type Selector = for<'a, 'c> fn(&'c SelectionContext<'a>) -> Option<ScoredRecipe<'a>>;

/// Selectors in the order they are tried; the first hit wins.
pub const SELECTOR_CHAIN: [(Selection, Selector); 4] = [
    (Selection::AntiRepeat, closest_outside_window),
    (Selection::RepeatsAllowed, closest_any),
    (Selection::PantryOnly, best_pantry_fit),
    (Selection::Rotation, rotation),
];

/// Lower is better: relative distance to the slot target minus a pantry tie-breaker.
fn calorie_key(sr: &ScoredRecipe, ctx: &SelectionContext) -> f64 {
    if ctx.target_calories <= 0.0 {
        return -sr.score * ctx.pantry_weight;
    }
    let calories = sr.recipe.calories * ctx.household.serving_multiplier(sr.recipe);
    calorie_deviation(calories, ctx.target_calories)
        - sr.score * PANTRY_TIE_BREAK_WEIGHT * ctx.pantry_weight
}

fn closest<'a>(
    ctx: &SelectionContext<'a>,
    allowed: impl Fn(&ScoredRecipe<'a>) -> bool,
) -> Option<ScoredRecipe<'a>> {
    let mut best: Option<(f64, ScoredRecipe<'a>)> = None;
    for sr in ctx.pool.iter().filter(|sr| allowed(*sr)) {
        let key = calorie_key(sr, ctx);
        if best.is_none_or(|(best_key, _)| key < best_key) {
            best = Some((key, *sr));
        }
    }
    best.map(|(_, sr)| sr)
}

pub fn closest_outside_window<'a>(ctx: &SelectionContext<'a>) -> Option<ScoredRecipe<'a>> {
    closest(ctx, |sr| !ctx.window.contains(sr.id()))
}

pub fn closest_any<'a>(ctx: &SelectionContext<'a>) -> Option<ScoredRecipe<'a>> {
    closest(ctx, |_| true)
}

/// Highest pantry score, first one on ties.
pub fn best_pantry_fit<'a>(ctx: &SelectionContext<'a>) -> Option<ScoredRecipe<'a>> {
    let mut best: Option<ScoredRecipe<'a>> = None;
    for sr in ctx.pool {
        if best.is_none_or(|b| sr.score > b.score) {
            best = Some(*sr);
        }
    }
    best
}

pub fn rotation<'a>(ctx: &SelectionContext<'a>) -> Option<ScoredRecipe<'a>> {
    if ctx.pool.is_empty() {
        return None;
    }
    ctx.pool.get(ctx.day % ctx.pool.len()).copied()
}

/// Run the chain and report which step answered.
pub fn select_meal<'a>(ctx: &SelectionContext<'a>) -> Option<(Selection, ScoredRecipe<'a>)> {
    SELECTOR_CHAIN
        .iter()
        .find_map(|(selection, selector)| selector(ctx).map(|sr| (*selection, sr)))
}
