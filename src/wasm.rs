//! WebAssembly bindings for AutoFact.
//!
//! This module provides JavaScript-accessible functions for the resolver.
//! Every function takes and returns JSON strings; failures are reported as
//! `{"success": false, "error": ...}` rather than thrown.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::balance::{aggregate, machine_summary};
use crate::data::{self, default_recipes, parse_recipes, validate_recipes};
use crate::log;
use crate::models::{BalanceEntry, MachineTotal, Preferences, ProductionNode, Recipe};
use crate::resolver::resolve;

/// JavaScript-friendly input for a calculation.
#[derive(Debug, Clone, Deserialize)]
pub struct JsCalculateInput {
    pub target_item: String,
    #[serde(default)]
    pub target_rate: f64,
    /// Recipe set to resolve against; the built-in recipes when omitted
    #[serde(default)]
    pub recipes: Option<Vec<Recipe>>,
    #[serde(default)]
    pub preferences: Preferences,
}

/// JavaScript-friendly calculation result.
#[derive(Debug, Clone, Serialize)]
pub struct JsCalculateResult {
    pub success: bool,
    pub error: Option<String>,
    pub tree: Option<ProductionNode>,
    pub balance: Vec<BalanceEntry>,
    pub machines: Vec<MachineTotal>,
}

impl JsCalculateResult {
    fn failure(error: String) -> Self {
        JsCalculateResult {
            success: false,
            error: Some(error),
            tree: None,
            balance: vec![],
            machines: vec![],
        }
    }
}

/// JavaScript-friendly import result.
#[derive(Debug, Clone, Serialize)]
pub struct JsImportResult {
    pub success: bool,
    pub error: Option<String>,
    pub recipes: Vec<Recipe>,
    /// Advisory problems found in otherwise well-formed recipes
    pub issues: Vec<String>,
}

/// Resolve the production chain described by the input JSON.
///
/// Takes a JSON string input and returns a JSON string result.
#[wasm_bindgen]
pub fn calculate(input_json: &str) -> String {
    let input: JsCalculateInput = match serde_json::from_str(input_json) {
        Ok(i) => i,
        Err(e) => {
            return serde_json::to_string(&JsCalculateResult::failure(format!("Invalid input: {}", e)))
                .unwrap_or_default();
        }
    };

    if input.target_item.is_empty() {
        return serde_json::to_string(&JsCalculateResult::failure("No target item selected.".to_string()))
            .unwrap_or_default();
    }

    let recipes = input.recipes.unwrap_or_else(default_recipes);
    let tree = resolve(&input.target_item, input.target_rate, &recipes, &input.preferences);
    let balance = aggregate(&tree);
    let machines = machine_summary(&tree);

    serde_json::to_string(&JsCalculateResult {
        success: true,
        error: None,
        tree: Some(tree),
        balance,
        machines,
    })
    .unwrap_or_default()
}

/// Parse and check an imported recipe file.
#[wasm_bindgen]
pub fn import_recipes(json: &str) -> String {
    let result = match parse_recipes(json) {
        Ok(recipes) => {
            let issues: Vec<String> = validate_recipes(&recipes).iter().map(ToString::to_string).collect();
            for issue in &issues {
                log::warn(issue);
            }
            JsImportResult {
                success: true,
                error: None,
                recipes,
                issues,
            }
        }
        Err(e) => JsImportResult {
            success: false,
            error: Some(e.to_string()),
            recipes: vec![],
            issues: vec![],
        },
    };
    serde_json::to_string(&result).unwrap_or_default()
}

/// Pretty-print a recipe array for download. Returns an empty string if the
/// input is not a recipe array.
#[wasm_bindgen]
pub fn export_recipes_json(recipes_json: &str) -> String {
    match parse_recipes(recipes_json).and_then(|recipes| data::export_recipes(&recipes)) {
        Ok(text) => text,
        Err(e) => {
            log::warn(&format!("export failed: {}", e));
            String::new()
        }
    }
}

/// Get the built-in recipes as a JSON array.
#[wasm_bindgen]
pub fn get_default_recipes() -> String {
    serde_json::to_string(&default_recipes()).unwrap_or_default()
}

/// Get the sorted list of item names used by a recipe array.
/// Returns an empty JSON array if the input cannot be parsed.
#[wasm_bindgen]
pub fn list_items(recipes_json: &str) -> String {
    let items = parse_recipes(recipes_json)
        .map(|recipes| data::all_items(&recipes))
        .unwrap_or_default();
    serde_json::to_string(&items).unwrap_or_default()
}

/// Generate an id for a recipe the user is creating.
#[wasm_bindgen]
pub fn new_recipe_id() -> String {
    match data::generate_recipe_id() {
        Ok(id) => id,
        Err(e) => {
            log::warn(&format!("random id generation failed: {}", e));
            String::new()
        }
    }
}

/// Get the version of the calculator.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
