//! Production chain resolution.
//!
//! This module walks the recipe graph from a target item down to raw
//! materials, computing how many machines each step needs to sustain the
//! requested rate. Resolution is a pure function of its inputs: the recipe
//! set and preferences are read-only snapshots and every call rebuilds the
//! tree from scratch.

use std::collections::HashMap;

use crate::models::{Byproduct, Preferences, ProductionNode, Recipe};

/// Nodes deeper than this are replaced by [`ProductionNode::CycleLimit`].
pub const MAX_DEPTH: usize = 15;

/// Rates are expressed per minute while recipe times are in seconds.
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Returns every recipe that lists `item` among its outputs, in recipe-set order.
///
/// # Example
///
/// ```
/// use autofact::data::default_recipes;
/// use autofact::resolver::recipes_producing;
///
/// let recipes = default_recipes();
/// let ids: Vec<&str> = recipes_producing("铁块", &recipes)
///     .iter()
///     .map(|r| r.id.as_str())
///     .collect();
///
/// assert_eq!(ids, vec!["r_iron_ingot", "r_iron_ingot_adv"]);
/// assert!(recipes_producing("铁矿", &recipes).is_empty());
/// ```
pub fn recipes_producing<'a>(item: &str, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
    recipes.iter().filter(|r| r.produces(item)).collect()
}

/// Lookup table from item name to the recipes producing it.
///
/// Built once per resolution so that sub-items shared by many branches do
/// not rescan the whole recipe set. Lookups return the same recipes, in the
/// same order, as [`recipes_producing`].
#[derive(Debug)]
pub struct RecipeIndex<'a> {
    recipes: &'a [Recipe],
    by_output: HashMap<&'a str, Vec<usize>>,
}

impl<'a> RecipeIndex<'a> {
    pub fn new(recipes: &'a [Recipe]) -> Self {
        let mut by_output: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (idx, recipe) in recipes.iter().enumerate() {
            for output in &recipe.outputs {
                let entry = by_output.entry(output.item.as_str()).or_default();
                // A recipe listing the same output twice is still one producer
                if entry.last() != Some(&idx) {
                    entry.push(idx);
                }
            }
        }
        RecipeIndex { recipes, by_output }
    }

    /// Recipes producing `item`, in recipe-set order.
    pub fn producing(&self, item: &str) -> Vec<&'a Recipe> {
        self.by_output
            .get(item)
            .map(|indices| indices.iter().map(|&i| &self.recipes[i]).collect())
            .unwrap_or_default()
    }
}

/// Picks the recipe to use for `item` among its producers.
///
/// The preferred recipe wins if it is one of `producing`; otherwise the
/// first producer is used. Returns `None` only when `producing` is empty.
pub fn select_recipe<'a>(
    item: &str,
    producing: &[&'a Recipe],
    preferences: &Preferences,
) -> Option<&'a Recipe> {
    preferences
        .get(item)
        .and_then(|id| producing.iter().find(|r| r.id == *id))
        .or_else(|| producing.first())
        .copied()
}

/// Resolves the production tree for `rate` items per minute of `item`.
///
/// Items without a recipe become [`ProductionNode::Raw`] leaves, and any
/// branch deeper than [`MAX_DEPTH`] ends in a [`ProductionNode::CycleLimit`]
/// leaf. Degenerate inputs (zero or negative rate, zero recipe time) are not
/// rejected: they propagate arithmetically into the node fields.
///
/// # Arguments
///
/// * `item` - The target item
/// * `rate` - Desired output of `item`, per minute
/// * `recipes` - The recipe set to resolve against
/// * `preferences` - Preferred recipe id per item
///
/// # Example
///
/// ```
/// use autofact::data::default_recipes;
/// use autofact::models::{Preferences, ProductionNode};
/// use autofact::resolver::resolve;
///
/// let recipes = default_recipes();
/// let tree = resolve("齿轮", 60.0, &recipes, &Preferences::new());
///
/// match tree {
///     ProductionNode::Product { machine_count, children, .. } => {
///         assert_eq!(machine_count, 4.0);
///         assert_eq!(children[0].rate(), 120.0);
///     }
///     _ => panic!("gear has a recipe"),
/// }
/// ```
pub fn resolve(
    item: &str,
    rate: f64,
    recipes: &[Recipe],
    preferences: &Preferences,
) -> ProductionNode {
    let index = RecipeIndex::new(recipes);
    resolve_node(item, rate, &index, preferences, 0)
}

fn resolve_node(
    item: &str,
    rate: f64,
    index: &RecipeIndex<'_>,
    preferences: &Preferences,
    depth: usize,
) -> ProductionNode {
    if depth > MAX_DEPTH {
        return ProductionNode::CycleLimit {
            item: item.to_string(),
            rate,
        };
    }

    let producing = index.producing(item);
    let recipe = match select_recipe(item, &producing, preferences) {
        Some(recipe) => recipe,
        None => {
            return ProductionNode::Raw {
                item: item.to_string(),
                rate,
            }
        }
    };

    let output_amount = recipe.output_amount(item).unwrap_or(1.0);
    let runs_per_machine_per_minute = SECONDS_PER_MINUTE / recipe.time;
    let items_per_machine_per_minute = runs_per_machine_per_minute * output_amount;
    let machine_count = rate / items_per_machine_per_minute;
    let crafts_per_minute = machine_count * runs_per_machine_per_minute;

    let children = recipe
        .inputs
        .iter()
        .map(|input| {
            resolve_node(
                &input.item,
                input.amount * crafts_per_minute,
                index,
                preferences,
                depth + 1,
            )
        })
        .collect();

    let byproducts = recipe
        .outputs
        .iter()
        .filter(|o| o.item != item)
        .map(|o| Byproduct {
            item: o.item.clone(),
            rate: o.amount * crafts_per_minute,
        })
        .collect();

    ProductionNode::Product {
        item: item.to_string(),
        rate,
        recipe: recipe.clone(),
        available_recipes: producing.into_iter().cloned().collect(),
        machine_count,
        children,
        byproducts,
    }
}
