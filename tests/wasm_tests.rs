//! Tests for the JSON-based browser bindings.
//!
//! The bindings are plain functions over strings, so they run natively too.

use autofact::wasm::{
    calculate, export_recipes_json, get_default_recipes, get_version, import_recipes, list_items, new_recipe_id,
};
use serde_json::Value;

fn parse(json: &str) -> Value {
    serde_json::from_str(json).expect("bindings should always return JSON")
}

#[test]
fn test_calculate_with_default_recipes() {
    let result = parse(&calculate(r#"{"target_item": "齿轮", "target_rate": 60}"#));

    assert_eq!(result["success"], true);
    assert!(result["error"].is_null());
    assert_eq!(result["tree"]["type"], "product");
    assert_eq!(result["tree"]["machine_count"], 4.0);
    assert_eq!(result["tree"]["children"][0]["children"][0]["type"], "raw");
    assert_eq!(result["balance"][0]["item"], "齿轮");
    assert_eq!(result["balance"][1]["rate"], -120.0);
    assert_eq!(result["machines"].as_array().unwrap().len(), 2);
}

#[test]
fn test_calculate_with_recipes_and_preferences() {
    let input = r#"{
        "target_item": "X",
        "target_rate": 10,
        "recipes": [
            {"id": "first", "outputs": [{"item": "X", "amount": 1}], "inputs": [{"item": "a", "amount": 1}], "machine": "m", "time": 6},
            {"id": "second", "outputs": [{"item": "X", "amount": 1}], "inputs": [{"item": "b", "amount": 1}], "machine": "m", "time": 6}
        ],
        "preferences": {"X": "second"}
    }"#;
    let result = parse(&calculate(input));

    assert_eq!(result["success"], true);
    assert_eq!(result["tree"]["recipe"]["id"], "second");
    assert_eq!(result["tree"]["available_recipes"].as_array().unwrap().len(), 2);
    assert_eq!(result["balance"][1]["item"], "b");
}

#[test]
fn test_calculate_missing_rate_defaults_to_zero() {
    let result = parse(&calculate(r#"{"target_item": "齿轮"}"#));
    assert_eq!(result["success"], true);
    assert_eq!(result["tree"]["machine_count"], 0.0);
}

#[test]
fn test_calculate_rejects_bad_input() {
    let result = parse(&calculate("{"));
    assert_eq!(result["success"], false);
    assert!(result["error"].as_str().unwrap().starts_with("Invalid input"));
    assert!(result["tree"].is_null());

    let result = parse(&calculate(r#"{"target_item": ""}"#));
    assert_eq!(result["success"], false);
}

#[test]
fn test_calculate_non_finite_numbers_serialize_as_null() {
    let input = r#"{
        "target_item": "out",
        "target_rate": 60,
        "recipes": [{"id": "r", "outputs": [{"item": "out", "amount": 1}], "inputs": [{"item": "in", "amount": 1}], "machine": "m", "time": 0}]
    }"#;
    let result = parse(&calculate(input));
    assert_eq!(result["success"], true);
    assert!(result["tree"]["children"][0]["rate"].is_null());
}

#[test]
fn test_import_recipes() {
    let result = parse(&import_recipes(&get_default_recipes()));
    assert_eq!(result["success"], true);
    assert_eq!(result["recipes"].as_array().unwrap().len(), 6);
    assert!(result["issues"].as_array().unwrap().is_empty());

    let result = parse(&import_recipes(
        r#"[{"id": "r", "outputs": [], "inputs": [], "machine": "m", "time": 1}]"#,
    ));
    assert_eq!(result["success"], true);
    assert_eq!(result["issues"][0], "recipe 'r' has no outputs");

    let result = parse(&import_recipes(r#"{"not": "an array"}"#));
    assert_eq!(result["success"], false);
    assert_eq!(result["error"], "expected a JSON array of recipes");
}

#[test]
fn test_export_recipes_json() {
    let exported = export_recipes_json(&get_default_recipes());
    assert!(exported.starts_with("[\n  {"));
    assert_eq!(parse(&exported).as_array().unwrap().len(), 6);

    assert_eq!(export_recipes_json("oops"), "");
}

#[test]
fn test_list_items() {
    let items = parse(&list_items(&get_default_recipes()));
    assert_eq!(items.as_array().unwrap().len(), 8);
    assert_eq!(parse(&list_items("oops")), Value::Array(vec![]));
}

#[test]
fn test_new_recipe_id_and_version() {
    assert!(new_recipe_id().starts_with("custom_"));
    assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
}
