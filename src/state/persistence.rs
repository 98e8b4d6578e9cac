use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::Result;
use crate::models::Recipe;
use crate::planner::PlannerConfig;
use crate::state::manager::PlannerData;

/// Load planner data from a JSON file.
///
/// Deduplicates recipes by id (last occurrence wins) and skips invalid ones.
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<PlannerData> {
    let content = fs::read_to_string(path)?;
    let mut data: PlannerData = serde_json::from_str(&content)?;

    let mut seen: BTreeMap<u32, Recipe> = BTreeMap::new();
    for recipe in data.recipes.drain(..) {
        if !recipe.is_valid() {
            warn!(recipe = %recipe.debug_string(), "skipping invalid recipe");
            continue;
        }
        seen.insert(recipe.id, recipe);
    }
    data.recipes = seen.into_values().collect();

    Ok(data)
}

/// Save planner data to a JSON file.
pub fn save_data<P: AsRef<Path>>(path: P, data: &PlannerData) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load planner tuning from a JSON file; missing keys keep their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlannerConfig> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
