mod config;
mod error;
mod goal;
mod graph;
mod heuristic;
mod plan;
mod planner;
mod recipe;
mod search;
mod state;
mod visualizer;

pub use config::{CraftingConfig, RecipeSpec, Requirement};
pub use error::{PlanError, Result};
pub use goal::Goal;
pub use graph::{CraftingGraph, Successor};
pub use heuristic::{
    CraftingHeuristic, DeficitHeuristic, HeuristicStrategy, ToolPruning, ZeroHeuristic,
};
pub use plan::{FailureReason, Plan, PlanStep, SearchFailure, SearchOutcome, SearchStats};
pub use planner::{Planner, DEFAULT_TIME_LIMIT};
pub use recipe::Recipe;
pub use search::{AStarSearch, DijkstraSearch, SearchAlgorithm};
pub use state::{ResourceId, ResourceState, StateDisplay, Vocabulary};
pub use visualizer::PlanVisualizer;
