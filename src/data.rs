//! Recipe data loading and saving for AutoFact.
//!
//! Recipes are exchanged as a JSON array of
//! `{id, outputs: [{item, amount}], inputs: [{item, amount}], machine, time}`
//! objects. This module parses and writes that format, ships the built-in
//! starter recipes, and reports suspicious recipe data without rejecting it.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::log;
use crate::models::Recipe;

/// Name of the recipe group created on first start.
pub const DEFAULT_GROUP_NAME: &str = "默认配方组";

const DEFAULT_RECIPES_JSON: &str = include_str!("../data/default_recipes.json");

/// Errors that can occur while importing or exporting recipes.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The document parsed, but its top level is not an array.
    #[error("expected a JSON array of recipes")]
    NotAnArray,

    /// One array entry does not have the recipe shape.
    #[error("recipe #{index} is malformed: {source}")]
    InvalidRecipe {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The document is not valid JSON, or could not be written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Parses a recipe array from JSON text.
///
/// # Errors
///
/// * [`ImportError::Json`] if the text is not JSON
/// * [`ImportError::NotAnArray`] if the top-level value is not an array
/// * [`ImportError::InvalidRecipe`] if an entry lacks a field or has the wrong type
///
/// # Example
///
/// ```
/// use autofact::data::{parse_recipes, ImportError};
///
/// let recipes = parse_recipes(
///     r#"[{"id": "r1", "outputs": [{"item": "铁块", "amount": 1}],
///          "inputs": [{"item": "铁矿", "amount": 1}], "machine": "熔炉", "time": 2}]"#,
/// ).unwrap();
/// assert_eq!(recipes[0].machine, "熔炉");
///
/// assert!(matches!(parse_recipes(r#"{"id": "r1"}"#), Err(ImportError::NotAnArray)));
/// ```
pub fn parse_recipes(json: &str) -> Result<Vec<Recipe>, ImportError> {
    let value: Value = serde_json::from_str(json)?;
    let entries = match value {
        Value::Array(entries) => entries,
        _ => return Err(ImportError::NotAnArray),
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry).map_err(|source| ImportError::InvalidRecipe { index, source })
        })
        .collect()
}

/// Serializes recipes to pretty-printed JSON (two-space indent).
pub fn export_recipes(recipes: &[Recipe]) -> Result<String, ImportError> {
    Ok(serde_json::to_string_pretty(recipes)?)
}

/// Loads a recipe array from a JSON file.
pub fn load_recipes(path: &Path) -> Result<Vec<Recipe>, ImportError> {
    let text = fs::read_to_string(path)?;
    parse_recipes(&text)
}

/// Writes a recipe array to a JSON file, replacing any existing content.
pub fn save_recipes(path: &Path, recipes: &[Recipe]) -> Result<(), ImportError> {
    let text = export_recipes(recipes)?;
    fs::write(path, text)?;
    Ok(())
}

/// Returns the built-in starter recipes.
///
/// The set covers iron and copper smelting, gears, copper wire and basic
/// circuits, plus an alternative iron ingot recipe using the ore washer.
pub fn default_recipes() -> Vec<Recipe> {
    match parse_recipes(DEFAULT_RECIPES_JSON) {
        Ok(recipes) => recipes,
        Err(e) => {
            log::warn(&format!("built-in recipes failed to parse: {}", e));
            Vec::new()
        }
    }
}

/// A suspicious value found in recipe data.
///
/// Issues are advisory: the resolver still accepts such recipes and lets the
/// numbers propagate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecipeIssue {
    #[error("recipe #{index} has an empty id")]
    EmptyId { index: usize },

    #[error("recipe '{id}' is listed more than once")]
    DuplicateId { id: String },

    #[error("recipe '{id}' has no outputs")]
    NoOutputs { id: String },

    #[error("recipe '{id}' has an entry with an empty item name")]
    EmptyItemName { id: String },

    #[error("recipe '{id}' has time {time}; machine counts will not be finite")]
    NonPositiveTime { id: String, time: f64 },

    #[error("recipe '{id}' uses amount {amount} for '{item}'")]
    NonPositiveAmount { id: String, item: String, amount: f64 },
}

/// Checks recipes for values the resolver would turn into nonsense.
///
/// # Returns
///
/// Every issue found, in recipe order. An empty vector means the data is clean.
pub fn validate_recipes(recipes: &[Recipe]) -> Vec<RecipeIssue> {
    let mut issues = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, recipe) in recipes.iter().enumerate() {
        let id = &recipe.id;
        if id.trim().is_empty() {
            issues.push(RecipeIssue::EmptyId { index });
        } else if !seen_ids.insert(id.as_str()) {
            issues.push(RecipeIssue::DuplicateId { id: id.clone() });
        }

        if recipe.outputs.is_empty() {
            issues.push(RecipeIssue::NoOutputs { id: id.clone() });
        }

        if !(recipe.time > 0.0 && recipe.time.is_finite()) {
            issues.push(RecipeIssue::NonPositiveTime {
                id: id.clone(),
                time: recipe.time,
            });
        }

        let entries = recipe.outputs.iter().chain(recipe.inputs.iter());
        if entries.clone().any(|e| e.item.trim().is_empty()) {
            issues.push(RecipeIssue::EmptyItemName { id: id.clone() });
        }
        for entry in entries.filter(|e| !(e.amount > 0.0 && e.amount.is_finite())) {
            issues.push(RecipeIssue::NonPositiveAmount {
                id: id.clone(),
                item: entry.item.clone(),
                amount: entry.amount,
            });
        }
    }

    issues
}

/// Generates a fresh id for a user-created recipe: `custom_` followed by
/// twelve random hex digits.
pub fn generate_recipe_id() -> Result<String, getrandom::Error> {
    let mut bytes = [0u8; 6];
    getrandom::getrandom(&mut bytes)?;
    let suffix: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    Ok(format!("custom_{}", suffix))
}

/// Every item named by any recipe input or output, sorted and de-duplicated.
pub fn all_items(recipes: &[Recipe]) -> Vec<String> {
    recipes
        .iter()
        .flat_map(|r| r.inputs.iter().chain(r.outputs.iter()))
        .map(|e| e.item.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Finds recipes whose output items, input items or machine contain `term`,
/// ignoring case.
pub fn search_recipes<'a>(recipes: &'a [Recipe], term: &str) -> Vec<&'a Recipe> {
    let term = term.to_lowercase();
    let matches = |s: &str| s.to_lowercase().contains(&term);
    recipes
        .iter()
        .filter(|r| {
            r.outputs.iter().any(|o| matches(&o.item))
                || r.inputs.iter().any(|i| matches(&i.item))
                || matches(&r.machine)
        })
        .collect()
}
