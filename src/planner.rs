//! # Planner
//!
//! The planner is the entry point of the crate. It turns a [`CraftingConfig`]
//! into everything the search needs:
//! - a [`Vocabulary`] fixing the resource layout of every state
//! - a [`CraftingGraph`] of compiled recipes
//! - a compiled [`Goal`] and the initial [`ResourceState`]
//!
//! and then runs a [`SearchAlgorithm`] (A* with the crafting heuristic by
//! default) under a time budget.
//!
//! ## Basic Usage
//!
//! ```
//! use std::time::Duration;
//! use craft_planner::{CraftingConfig, Planner};
//!
//! let config = CraftingConfig::from_json_str(r#"{
//!     "Items": ["bench", "wood", "plank"],
//!     "Initial": {},
//!     "Goal": {"bench": 1},
//!     "Recipes": {
//!         "punch for wood": {"Produces": {"wood": 1}, "Time": 4},
//!         "craft plank": {"Consumes": {"wood": 1}, "Produces": {"plank": 4}, "Time": 1},
//!         "craft bench": {"Consumes": {"plank": 4}, "Produces": {"bench": 1}, "Time": 1}
//!     }
//! }"#).unwrap();
//!
//! let planner = Planner::from_config(&config).unwrap();
//! let plan = planner.plan(Duration::from_secs(5)).into_plan().unwrap();
//!
//! let actions: Vec<_> = plan.actions().collect();
//! assert_eq!(actions, ["punch for wood", "craft plank", "craft bench"]);
//! assert_eq!(plan.total_cost(), 6);
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::search::{AStarSearch, SearchAlgorithm};
use crate::{CraftingConfig, CraftingGraph, Goal, ResourceState, Result, SearchOutcome, Vocabulary};

/// Time budget used when the caller has no better idea.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

/// A compiled crafting problem together with the algorithm that solves it.
pub struct Planner {
    graph: CraftingGraph,
    goal: Goal,
    initial: ResourceState,
    /// The algorithm used to search for a plan
    search_algorithm: Box<dyn SearchAlgorithm>,
}

impl Planner {
    /// Creates a planner using A* with the default crafting heuristic.
    pub fn new(graph: CraftingGraph, goal: Goal, initial: ResourceState) -> Self {
        let search_algorithm = Box::new(AStarSearch::for_graph(&graph));
        Self {
            graph,
            goal,
            initial,
            search_algorithm,
        }
    }

    /// Compiles a crafting description.
    ///
    /// # Errors
    ///
    /// Fails fast, before any search, if the vocabulary declares a resource
    /// twice or if a recipe, the goal or the initial inventory names a
    /// resource outside it.
    pub fn from_config(config: &CraftingConfig) -> Result<Self> {
        let vocabulary = Arc::new(Vocabulary::new(config.items.iter().cloned())?);
        let graph = CraftingGraph::compile(vocabulary.clone(), &config.recipes)?;
        let goal = Goal::compile(&config.goal, &vocabulary)?;
        let initial = vocabulary.state_from(
            config
                .initial
                .iter()
                .map(|(name, &quantity)| (name.as_str(), quantity)),
        )?;
        Ok(Self::new(graph, goal, initial))
    }

    /// Replaces the search algorithm.
    ///
    /// ```
    /// use craft_planner::{CraftingConfig, DijkstraSearch, Planner};
    ///
    /// let config = CraftingConfig::from_json_str(
    ///     r#"{"Items": ["wood"], "Goal": {"wood": 1}, "Recipes": {"chop": {"Produces": {"wood": 1}, "Time": 2}}}"#,
    /// ).unwrap();
    /// let planner = Planner::from_config(&config)
    ///     .unwrap()
    ///     .with_search_algorithm(Box::new(DijkstraSearch));
    /// assert_eq!(planner.plan(craft_planner::DEFAULT_TIME_LIMIT).into_plan().unwrap().total_cost(), 2);
    /// ```
    pub fn with_search_algorithm(mut self, search_algorithm: Box<dyn SearchAlgorithm>) -> Self {
        self.search_algorithm = search_algorithm;
        self
    }

    pub fn graph(&self) -> &CraftingGraph {
        &self.graph
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        self.graph.vocabulary()
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn initial_state(&self) -> &ResourceState {
        &self.initial
    }

    /// Searches from the configured initial inventory.
    pub fn plan(&self, time_limit: Duration) -> SearchOutcome {
        self.plan_from(&self.initial, time_limit)
    }

    /// Searches from an arbitrary start state over the same recipes and goal.
    pub fn plan_from(&self, start: &ResourceState, time_limit: Duration) -> SearchOutcome {
        self.search_algorithm
            .search(&self.graph, start, &self.goal, time_limit)
    }
}
