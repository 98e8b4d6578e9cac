use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::{IngredientLine, MealType};
use crate::planner::matcher::normalize_name;

/// One thing to buy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// Name as first written by a recipe.
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    /// Meal types whose recipes needed this ingredient.
    #[serde(default)]
    pub reasons: BTreeSet<MealType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub items: Vec<ShoppingItem>,
}

impl ShoppingList {
    /// Aggregate the uncovered quantities of `lines`, one item per normalized
    /// name and unit. Quantities in different units are never summed.
    ///
    /// Items come out sorted by normalized name, then unit.
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a IngredientLine>,
    {
        let mut by_key: BTreeMap<(String, String), ShoppingItem> = BTreeMap::new();

        for line in lines {
            if line.missing <= 0.0 {
                continue;
            }
            let entry = by_key
                .entry((normalize_name(&line.name), normalize_name(&line.unit)))
                .or_insert_with(|| ShoppingItem {
                    name: line.name.clone(),
                    quantity: 0.0,
                    unit: line.unit.clone(),
                    reasons: BTreeSet::new(),
                });
            entry.quantity += line.missing;
            entry.reasons.insert(line.meal_type);
        }

        Self {
            items: by_key.into_values().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
