use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{PlannerError, Result};
use crate::models::{Household, MenuRequest, PantryImportance};

/// Minimum Jaro-Winkler similarity for an allergen suggestion.
const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

const MAX_SUGGESTIONS: usize = 5;

fn parse_number<T: std::str::FromStr>(input: &str) -> Result<T> {
    input
        .trim()
        .parse()
        .map_err(|_| PlannerError::InvalidInput(format!("Invalid number '{}'", input.trim())))
}

/// Prompt for household size.
pub fn prompt_household(current: Household) -> Result<Household> {
    let adults: String = Input::new()
        .with_prompt("How many adults are you cooking for?")
        .default(current.adults.to_string())
        .interact_text()?;
    let adults: u32 = parse_number(&adults)?;
    if adults == 0 {
        return Err(PlannerError::InvalidInput(
            "At least one adult is required".to_string(),
        ));
    }

    let children: String = Input::new()
        .with_prompt("How many children?")
        .default(current.children.to_string())
        .interact_text()?;

    Ok(Household::new(adults, parse_number(&children)?))
}

/// Prompt for the daily calorie target; empty input keeps the user's goal.
pub fn prompt_target_calories(current: Option<f64>) -> Result<Option<f64>> {
    let input: String = Input::new()
        .with_prompt("Daily calorie target (Enter to use your goal)")
        .allow_empty(true)
        .default(current.map(|c| format!("{:.0}", c)).unwrap_or_default())
        .interact_text()?;

    if input.trim().is_empty() {
        return Ok(None);
    }

    let target: f64 = parse_number(&input)?;
    if target <= 0.0 {
        return Err(PlannerError::InvalidInput(
            "Calorie target must be positive".to_string(),
        ));
    }
    Ok(Some(target))
}

/// Prompt for how strongly the pantry should steer the plan.
pub fn prompt_importance(current: PantryImportance) -> Result<PantryImportance> {
    let options = [
        PantryImportance::Strict,
        PantryImportance::Prefer,
        PantryImportance::Ignore,
    ];
    let labels = [
        "strict (only recipes mostly covered by the pantry)",
        "prefer (favor pantry ingredients)",
        "ignore (plan without the pantry)",
    ];
    let default = options.iter().position(|o| *o == current).unwrap_or(1);

    let selection = Select::new()
        .with_prompt("How much should the pantry matter?")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(options[selection])
}

/// Prompt for allergens to exclude, fuzzy-matched against the catalog's tags.
pub fn prompt_allergies(known: &[String]) -> Result<Vec<String>> {
    let mut allergies = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt("Enter an allergen to avoid (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim().to_lowercase();
        if input.is_empty() {
            break;
        }

        if let Some(tag) = known.iter().find(|k| k.to_lowercase() == input) {
            allergies.push(tag.clone());
            println!("Added: {}", tag);
            continue;
        }

        let mut candidates: Vec<(&String, f64)> = known
            .iter()
            .map(|k| (k, jaro_winkler(&k.to_lowercase(), &input)))
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        if candidates.is_empty() {
            // Not a catalog tag, keep as typed.
            println!("'{}' is not a known allergen tag, adding as typed", input);
            allergies.push(input);
            continue;
        }

        if candidates.len() == 1 {
            let tag = candidates[0].0;
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", tag))
                .default(true)
                .interact()?;

            if confirm {
                allergies.push(tag.clone());
                println!("Added: {}", tag);
            }
        } else {
            let options: Vec<String> = candidates
                .iter()
                .take(MAX_SUGGESTIONS)
                .map(|(k, _)| (*k).clone())
                .collect();

            let mut selection_options = options.clone();
            selection_options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&selection_options)
                .default(0)
                .interact()?;

            if selection < options.len() {
                allergies.push(options[selection].clone());
                println!("Added: {}", options[selection]);
            }
        }
    }

    Ok(allergies)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Walk the user through a menu request, starting from `base`.
pub fn collect_request(base: MenuRequest, known_allergens: &[String]) -> Result<MenuRequest> {
    let household = prompt_household(base.household)?;
    let target_calories = prompt_target_calories(base.target_calories)?;

    let mut allergies = base.allergies;
    for tag in prompt_allergies(known_allergens)? {
        if !allergies.iter().any(|a| a.eq_ignore_ascii_case(&tag)) {
            allergies.push(tag);
        }
    }

    let consider_pantry = prompt_yes_no("Use what is in your pantry?", base.consider_pantry)?;
    let pantry_importance = if consider_pantry {
        prompt_importance(base.pantry_importance)?
    } else {
        base.pantry_importance
    };

    Ok(MenuRequest {
        household,
        target_calories,
        allergies,
        consider_pantry,
        pantry_importance,
        ..base
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<u32>(" 3 ").unwrap(), 3);
        assert_eq!(parse_number::<f64>("1850.5").unwrap(), 1850.5);
        assert!(matches!(
            parse_number::<u32>("two"),
            Err(PlannerError::InvalidInput(_))
        ));
    }
}
