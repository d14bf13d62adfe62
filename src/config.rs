//! # Crafting configuration
//!
//! Serde model of the JSON crafting description consumed by the planner:
//!
//! ```json
//! {
//!   "Items": ["wood", "plank"],
//!   "Initial": {"wood": 1},
//!   "Goal": {"plank": 1},
//!   "Recipes": {
//!     "craft plank": {"Consumes": {"wood": 1}, "Produces": {"plank": 4}, "Time": 1}
//!   }
//! }
//! ```
//!
//! All maps keep their file order, so recipe declaration order (which decides
//! successor order and therefore tie-breaking) is exactly what the file says.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A `Requires` entry. Data files write `{"bench": true}`, but numbers are
/// accepted too; either way only the presence of the key matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    Flag(bool),
    Amount(u32),
}

/// Declarative form of a recipe, before it is compiled against a vocabulary.
///
/// # Examples
///
/// ```
/// use craft_planner::RecipeSpec;
///
/// let spec = RecipeSpec::new(1)
///     .requires("bench")
///     .consumes("plank", 3)
///     .consumes("stick", 2)
///     .produces("wooden_pickaxe", 1);
///
/// assert_eq!(spec.time, 1);
/// assert_eq!(spec.consumes.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecipeSpec {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub requires: IndexMap<String, Requirement>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub consumes: IndexMap<String, u32>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub produces: IndexMap<String, u32>,
    pub time: u64,
}

impl RecipeSpec {
    pub fn new(time: u64) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    pub fn requires(mut self, resource: impl Into<String>) -> Self {
        self.requires.insert(resource.into(), Requirement::Flag(true));
        self
    }

    pub fn consumes(mut self, resource: impl Into<String>, quantity: u32) -> Self {
        self.consumes.insert(resource.into(), quantity);
        self
    }

    pub fn produces(mut self, resource: impl Into<String>, quantity: u32) -> Self {
        self.produces.insert(resource.into(), quantity);
        self
    }
}

/// A complete crafting problem: vocabulary, start inventory, goal and recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CraftingConfig {
    pub items: Vec<String>,
    #[serde(default)]
    pub initial: IndexMap<String, u32>,
    #[serde(default)]
    pub goal: IndexMap<String, u32>,
    pub recipes: IndexMap<String, RecipeSpec>,
}

impl CraftingConfig {
    /// Parses a crafting description from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Serialization`](crate::PlanError::Serialization) on malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        log::debug!(
            "Loaded crafting config: {} items, {} recipes, {} goal entries",
            config.items.len(),
            config.recipes.len(),
            config.goal.len()
        );
        Ok(config)
    }

    /// Reads and parses a crafting description file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Reading crafting config '{}'", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replaces the goal, keeping recipes and inventory.
    pub fn with_goal<I, S>(mut self, goal: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        self.goal = goal.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self
    }

    /// Replaces the initial inventory, keeping recipes and goal.
    pub fn with_initial<I, S>(mut self, initial: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        self.initial = initial.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlanError;

    const PLANKS: &str = r#"{
        "Items": ["bench", "wood", "plank"],
        "Initial": {"wood": 1},
        "Goal": {"plank": 1},
        "Recipes": {
            "craft plank": {"Consumes": {"wood": 1}, "Produces": {"plank": 4}, "Time": 1},
            "craft bench": {"Consumes": {"plank": 4}, "Produces": {"bench": 1}, "Time": 1},
            "punch for wood": {"Produces": {"wood": 1}, "Time": 4},
            "admire bench": {"Requires": {"bench": true}, "Time": 2}
        }
    }"#;

    #[test]
    fn test_parse_crafting_config() {
        let config = CraftingConfig::from_json_str(PLANKS).unwrap();
        assert_eq!(config.items, ["bench", "wood", "plank"]);
        assert_eq!(config.initial.get("wood"), Some(&1));
        assert_eq!(config.goal.get("plank"), Some(&1));

        let plank = &config.recipes["craft plank"];
        assert_eq!(plank.time, 1);
        assert_eq!(plank.consumes.get("wood"), Some(&1));
        assert_eq!(plank.produces.get("plank"), Some(&4));
        assert!(plank.requires.is_empty());

        let admire = &config.recipes["admire bench"];
        assert_eq!(admire.requires.get("bench"), Some(&Requirement::Flag(true)));
    }

    #[test]
    fn test_recipe_order_is_preserved() {
        let config = CraftingConfig::from_json_str(PLANKS).unwrap();
        let names: Vec<_> = config.recipes.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            ["craft plank", "craft bench", "punch for wood", "admire bench"]
        );
    }

    #[test]
    fn test_numeric_requirement() {
        let json = r#"{"Requires": {"bench": 1}, "Time": 3}"#;
        let spec: RecipeSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.requires.get("bench"), Some(&Requirement::Amount(1)));
    }

    #[test]
    fn test_missing_time_is_rejected() {
        let json = r#"{"Items": [], "Recipes": {"nothing": {}}}"#;
        let result = CraftingConfig::from_json_str(json);
        assert!(matches!(result, Err(PlanError::Serialization(_))));
    }

    #[test]
    fn test_goal_and_initial_overrides() {
        let config = CraftingConfig::from_json_str(PLANKS)
            .unwrap()
            .with_goal([("bench", 1)])
            .with_initial(Vec::<(String, u32)>::new());
        assert_eq!(config.goal.len(), 1);
        assert_eq!(config.goal.get("bench"), Some(&1));
        assert!(config.initial.is_empty());
    }

    #[test]
    fn test_json_round_trip_keeps_recipes() {
        let config = CraftingConfig::from_json_str(PLANKS).unwrap();
        let json = config.to_json_string().unwrap();
        let reparsed = CraftingConfig::from_json_str(&json).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join("craft_planner_config_test.json");
        std::fs::write(&path, PLANKS).unwrap();

        let config = CraftingConfig::from_path(&path).unwrap();
        assert_eq!(config.recipes.len(), 4);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_from_missing_path() {
        let result = CraftingConfig::from_path("/definitely/not/here/crafting.json");
        assert!(matches!(result, Err(PlanError::Io(_))));
    }
}
