use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A stock row in a user's pantry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    #[serde(default = "default_user_id")]
    pub user_id: u32,

    pub name: String,

    pub quantity: f64,

    #[serde(default)]
    pub unit: String,
}

fn default_user_id() -> u32 {
    1
}

impl PantryItem {
    pub fn new(user_id: u32, name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// How strongly pantry stock should influence recipe choice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PantryImportance {
    /// Drop recipes missing more than half of their ingredients.
    Strict,
    /// Keep everything, rank pantry-friendly recipes higher.
    #[default]
    Prefer,
    /// Keep everything, pantry fit does not affect ranking.
    Ignore,
}

impl PantryImportance {
    /// Weight applied to pantry-fit scores by the ranking heuristics.
    pub fn weight(&self) -> f64 {
        match self {
            PantryImportance::Strict | PantryImportance::Prefer => 1.0,
            PantryImportance::Ignore => 0.0,
        }
    }
}

impl fmt::Display for PantryImportance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PantryImportance::Strict => "strict",
            PantryImportance::Prefer => "prefer",
            PantryImportance::Ignore => "ignore",
        };
        f.write_str(name)
    }
}
