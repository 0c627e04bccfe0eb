//! # AutoFact
//!
//! A library and command-line tool for planning production chains in
//! crafting and factory games.
//!
//! Given a target item, a desired rate per minute and a recipe set, the
//! resolver walks the recipe graph down to raw materials and reports:
//!
//! - How many machines each step needs to keep up
//! - The rate each intermediate and raw material is consumed at
//! - The byproducts every step generates
//! - The net material balance of the whole chain
//!
//! ## Modules
//!
//! - [`models`] - Recipes, production tree nodes and balance entries
//! - [`resolver`] - Recipe lookup and production tree resolution
//! - [`balance`] - Material balance and machine totals
//! - [`data`] - Recipe JSON import/export and the built-in recipes
//! - [`library`] - Recipe groups and persisted calculator settings
//! - [`display`] - Output formatting and display utilities
//! - [`wasm`] - JSON-based bindings for the browser
//! - [`log`] - Warning output for the browser console and stderr
//!
//! ## Example Usage
//!
//! ```
//! use autofact::{
//!     balance::aggregate,
//!     data::default_recipes,
//!     models::Preferences,
//!     resolver::resolve,
//! };
//!
//! let recipes = default_recipes();
//!
//! // Use the ore washer for iron ingots instead of the furnace
//! let mut preferences = Preferences::new();
//! preferences.insert("铁块".to_string(), "r_iron_ingot_adv".to_string());
//!
//! let tree = resolve("电路板", 60.0, &recipes, &preferences);
//! let balance = aggregate(&tree);
//!
//! assert_eq!(balance[0].item, "电路板");
//! assert!(balance.iter().any(|e| e.item == "纯净水" && e.rate < 0.0));
//! ```
//!
//! ## Recipe Selection
//!
//! When several recipes produce the same item, the first one in recipe-set
//! order is used unless the preferences name another producer of that item.
//! No attempt is made to pick the "best" recipe.

pub mod balance;
pub mod data;
pub mod display;
pub mod library;
pub mod log;
pub mod models;
pub mod resolver;
pub mod wasm;
