//! Data models and structures for AutoFact.
//!
//! This module contains the core data structures used throughout the crate:
//! recipes as they are stored and exchanged, and the production tree and
//! balance entries produced by a resolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from item name to the id of the recipe the user prefers for it.
pub type Preferences = BTreeMap<String, String>;

/// An item together with a per-run amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAmount {
    /// Item name (e.g., "铁块")
    pub item: String,
    /// Amount consumed or produced per recipe run
    pub amount: f64,
}

impl ItemAmount {
    pub fn new(item: impl Into<String>, amount: f64) -> Self {
        ItemAmount {
            item: item.into(),
            amount,
        }
    }
}

/// A fixed conversion rule from inputs to outputs, run on one machine.
///
/// The field order matches the persisted JSON shape
/// `{id, outputs, inputs, machine, time}`.
///
/// # Example
///
/// ```
/// use autofact::models::{ItemAmount, Recipe};
///
/// let gear = Recipe {
///     id: "r_gear".to_string(),
///     outputs: vec![ItemAmount::new("齿轮", 1.0)],
///     inputs: vec![ItemAmount::new("铁块", 2.0)],
///     machine: "制造台".to_string(),
///     time: 4.0,
/// };
///
/// assert!(gear.produces("齿轮"));
/// assert_eq!(gear.output_amount("齿轮"), Some(1.0));
/// assert_eq!(gear.label(), "铁块");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe id (e.g., "r_iron_ingot", "custom_1a2b3c4d5e6f")
    pub id: String,
    /// Items produced per run, in display order
    pub outputs: Vec<ItemAmount>,
    /// Items consumed per run, in display order
    pub inputs: Vec<ItemAmount>,
    /// The facility that runs this recipe (e.g., "熔炉")
    pub machine: String,
    /// Seconds per run
    pub time: f64,
}

impl Recipe {
    /// Returns `true` if any output of this recipe is `item`.
    pub fn produces(&self, item: &str) -> bool {
        self.outputs.iter().any(|o| o.item == item)
    }

    /// Returns the per-run amount of `item` among the outputs, if present.
    pub fn output_amount(&self, item: &str) -> Option<f64> {
        self.outputs.iter().find(|o| o.item == item).map(|o| o.amount)
    }

    /// Short label used to tell alternative recipes apart: the input item
    /// names joined with `+`.
    pub fn label(&self) -> String {
        self.inputs
            .iter()
            .map(|i| i.item.as_str())
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// An extra output of a recipe, with its absolute production rate per minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Byproduct {
    pub item: String,
    pub rate: f64,
}

/// A node of a resolved production tree.
///
/// Rates are items per minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductionNode {
    /// The item has no known recipe and is supplied from outside.
    Raw { item: String, rate: f64 },
    /// The item is produced by `recipe` on `machine_count` parallel machines.
    Product {
        item: String,
        rate: f64,
        recipe: Recipe,
        /// Every recipe that could produce `item`, in recipe-set order
        available_recipes: Vec<Recipe>,
        machine_count: f64,
        /// One node per recipe input, in input order
        children: Vec<ProductionNode>,
        /// Outputs of `recipe` other than `item`
        byproducts: Vec<Byproduct>,
    },
    /// Resolution stopped because the depth limit was exceeded.
    CycleLimit { item: String, rate: f64 },
}

impl ProductionNode {
    /// The item this node resolves.
    pub fn item(&self) -> &str {
        match self {
            ProductionNode::Raw { item, .. }
            | ProductionNode::Product { item, .. }
            | ProductionNode::CycleLimit { item, .. } => item,
        }
    }

    /// The requested rate of this node's item, per minute.
    pub fn rate(&self) -> f64 {
        match self {
            ProductionNode::Raw { rate, .. }
            | ProductionNode::Product { rate, .. }
            | ProductionNode::CycleLimit { rate, .. } => *rate,
        }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[ProductionNode] {
        match self {
            ProductionNode::Product { children, .. } => children,
            ProductionNode::Raw { .. } | ProductionNode::CycleLimit { .. } => &[],
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, ProductionNode::Raw { .. })
    }

    /// Total number of nodes in the subtree rooted here.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(ProductionNode::node_count).sum::<usize>()
    }
}

/// Net rate of one item across a whole production tree.
///
/// Positive values are surplus (the root demand and byproducts), negative
/// values are raw material drawn from outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub item: String,
    pub rate: f64,
}

/// Total machines of one facility type across a production tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineTotal {
    pub machine: String,
    pub count: f64,
}
