use thiserror::Error;

use crate::models::MealType;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("No viable plan: no candidate recipes for {}", format_meal_types(.0))]
    NoViablePlan(Vec<MealType>),

    #[error("Menu not found: {0}")]
    MenuNotFound(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn format_meal_types(meal_types: &[MealType]) -> String {
    meal_types
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, PlannerError>;
