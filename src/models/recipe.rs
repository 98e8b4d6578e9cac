use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Meal slot a recipe is tagged for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    /// Slots in the order they are planned and displayed.
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            other => Err(PlannerError::InvalidInput(format!(
                "unknown meal type '{}'",
                other
            ))),
        }
    }
}

/// A single ingredient line of a recipe.
///
/// Quantity is for the recipe as written, i.e. for `Recipe::servings` portions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// A recipe with its nutrition for the whole batch (all servings).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u32,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub meal_type: MealType,

    #[serde(default)]
    pub diet_types: Vec<String>,

    #[serde(default)]
    pub allergens: Vec<String>,

    pub calories: f64,

    #[serde(default)]
    pub protein: f64,

    #[serde(default)]
    pub fat: f64,

    #[serde(default)]
    pub carbs: f64,

    /// Cooking time in minutes.
    #[serde(default)]
    pub cooking_time: u32,

    #[serde(default = "default_servings")]
    pub servings: u32,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    #[serde(default)]
    pub instructions: Vec<String>,
}

fn default_servings() -> u32 {
    1
}

impl Recipe {
    /// Basic validation: non-negative nutrition and a name.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && self.calories >= 0.0
            && self.protein >= 0.0
            && self.fat >= 0.0
            && self.carbs >= 0.0
            && self.ingredients.iter().all(|i| i.quantity >= 0.0)
    }

    pub fn has_diet_type(&self, diet_type: &str) -> bool {
        self.diet_types
            .iter()
            .any(|d| d.eq_ignore_ascii_case(diet_type.trim()))
    }

    pub fn has_allergen(&self, allergen: &str) -> bool {
        self.allergens
            .iter()
            .any(|a| a.eq_ignore_ascii_case(allergen.trim()))
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "#{} {} ({}): {} kcal, P:{} F:{} C:{}, {} min, {} servings",
            self.id,
            self.name,
            self.meal_type,
            self.calories,
            self.protein,
            self.fat,
            self.carbs,
            self.cooking_time,
            self.servings
        )
    }
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Recipe {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe() -> Recipe {
        Recipe {
            id: 7,
            name: "Oatmeal".to_string(),
            description: String::new(),
            meal_type: MealType::Breakfast,
            diet_types: vec!["Vegetarian".to_string()],
            allergens: vec!["gluten".to_string()],
            calories: 350.0,
            protein: 12.0,
            fat: 6.0,
            carbs: 60.0,
            cooking_time: 10,
            servings: 1,
            ingredients: vec![Ingredient::new("Oats", 80.0, "g")],
            instructions: vec![],
        }
    }

    #[test]
    fn test_tags_case_insensitive() {
        let recipe = sample_recipe();
        assert!(recipe.has_diet_type("vegetarian"));
        assert!(recipe.has_allergen("GLUTEN"));
        assert!(!recipe.has_allergen("nuts"));
    }

    #[test]
    fn test_meal_type_parse_and_display() {
        assert_eq!("Lunch".parse::<MealType>().unwrap(), MealType::Lunch);
        assert_eq!(MealType::Dinner.to_string(), "dinner");
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"id": 1, "name": "Soup", "meal_type": "lunch", "calories": 400}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.servings, 1);
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.meal_type, MealType::Lunch);
    }

    #[test]
    fn test_is_valid() {
        let recipe = sample_recipe();
        assert!(recipe.is_valid());

        let mut invalid = sample_recipe();
        invalid.calories = -1.0;
        assert!(!invalid.is_valid());
    }
}
