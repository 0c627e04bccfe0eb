//! Recipe library: the named recipe groups and calculator settings a front
//! end keeps between sessions.
//!
//! The library serializes to a single JSON object
//! `{groups, current, preferred, target}` suitable for a key-value store.
//! Group order is preserved, so "the first remaining group" is well defined
//! after a deletion.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data::{all_items, default_recipes, DEFAULT_GROUP_NAME};
use crate::models::{Preferences, ProductionNode, Recipe};
use crate::resolver::resolve;

/// Target item selected on first start.
pub const DEFAULT_TARGET: &str = "电路板";

/// Errors returned by library operations.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("invalid library data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("library data does not name a current group")]
    MissingCurrentGroup,

    #[error("group name must not be empty")]
    EmptyGroupName,

    #[error("a group named '{0}' already exists")]
    GroupExists(String),

    #[error("no group named '{0}'")]
    UnknownGroup(String),

    #[error("at least one recipe group must remain")]
    LastGroup,
}

/// Named recipe groups plus the calculator's persisted settings.
///
/// # Example
///
/// ```
/// use autofact::library::RecipeLibrary;
///
/// let mut library = RecipeLibrary::new();
/// library.create_group("modded").unwrap();
/// assert_eq!(library.current, "modded");
/// assert!(library.recipes().is_empty());
///
/// library.delete_group().unwrap();
/// assert_eq!(library.recipes().len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLibrary {
    /// Recipe groups by name, in creation order
    pub groups: IndexMap<String, Vec<Recipe>>,
    /// Name of the group the calculator resolves against
    pub current: String,
    /// Preferred recipe id per item
    #[serde(default)]
    pub preferred: Preferences,
    /// Item the calculator resolves
    #[serde(default = "default_target")]
    pub target: String,
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

impl Default for RecipeLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeLibrary {
    /// Creates a library holding one group with the built-in recipes.
    pub fn new() -> Self {
        let mut groups = IndexMap::new();
        groups.insert(DEFAULT_GROUP_NAME.to_string(), default_recipes());
        RecipeLibrary {
            groups,
            current: DEFAULT_GROUP_NAME.to_string(),
            preferred: Preferences::new(),
            target: default_target(),
        }
    }

    /// Restores a library from its JSON form.
    ///
    /// An empty stored target falls back to [`DEFAULT_TARGET`].
    pub fn from_json(json: &str) -> Result<Self, LibraryError> {
        let mut library: RecipeLibrary = serde_json::from_str(json)?;
        if library.current.is_empty() {
            return Err(LibraryError::MissingCurrentGroup);
        }
        if library.target.is_empty() {
            library.target = default_target();
        }
        Ok(library)
    }

    pub fn to_json(&self) -> Result<String, LibraryError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Recipes of the current group; empty if the group does not exist.
    pub fn recipes(&self) -> &[Recipe] {
        self.groups
            .get(&self.current)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every item known to the current group, sorted.
    pub fn items(&self) -> Vec<String> {
        all_items(self.recipes())
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }

    /// Appends a recipe to the current group.
    pub fn add_recipe(&mut self, recipe: Recipe) {
        self.groups
            .entry(self.current.clone())
            .or_default()
            .push(recipe);
    }

    /// Removes every recipe with `id` from the current group.
    ///
    /// Returns `true` if anything was removed.
    pub fn delete_recipe(&mut self, id: &str) -> bool {
        match self.groups.get_mut(&self.current) {
            Some(recipes) => {
                let before = recipes.len();
                recipes.retain(|r| r.id != id);
                recipes.len() != before
            }
            None => false,
        }
    }

    /// Replaces the current group's recipes, as an import does.
    pub fn replace_group(&mut self, recipes: Vec<Recipe>) {
        self.groups.insert(self.current.clone(), recipes);
    }

    /// Empties the current group.
    pub fn clear_group(&mut self) {
        self.replace_group(Vec::new());
    }

    /// Creates an empty group and makes it current.
    ///
    /// The name is stored without surrounding whitespace.
    pub fn create_group(&mut self, name: &str) -> Result<(), LibraryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::EmptyGroupName);
        }
        if self.groups.contains_key(name) {
            return Err(LibraryError::GroupExists(name.to_string()));
        }
        self.groups.insert(name.to_string(), Vec::new());
        self.current = name.to_string();
        Ok(())
    }

    /// Deletes the current group and switches to the first remaining one.
    pub fn delete_group(&mut self) -> Result<(), LibraryError> {
        if self.groups.len() <= 1 {
            return Err(LibraryError::LastGroup);
        }
        self.groups.shift_remove(&self.current);
        if let Some(first) = self.groups.keys().next() {
            self.current = first.clone();
        }
        Ok(())
    }

    pub fn switch_group(&mut self, name: &str) -> Result<(), LibraryError> {
        if !self.groups.contains_key(name) {
            return Err(LibraryError::UnknownGroup(name.to_string()));
        }
        self.current = name.to_string();
        Ok(())
    }

    /// Records `recipe_id` as the preferred recipe for `item`.
    pub fn set_preference(&mut self, item: &str, recipe_id: &str) {
        self.preferred
            .insert(item.to_string(), recipe_id.to_string());
    }

    pub fn clear_preference(&mut self, item: &str) {
        self.preferred.remove(item);
    }

    /// Resolves the target item at `rate` per minute against the current group.
    ///
    /// Returns `None` when no target is set.
    pub fn resolve(&self, rate: f64) -> Option<ProductionNode> {
        if self.target.is_empty() {
            return None;
        }
        Some(resolve(&self.target, rate, self.recipes(), &self.preferred))
    }
}
