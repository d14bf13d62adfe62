//! # Heuristics
//!
//! A heuristic estimates the cost still needed to reach the goal from a
//! state. Returning `None` marks the state as unreachable, which makes the
//! search drop it instead of queueing it. Estimates only ever shape the
//! expansion order; they never enter the recorded path cost.
//!
//! The planner's default, [`CraftingHeuristic`], combines two ideas:
//!
//! - [`DeficitHeuristic`]: every missing unit of a goal resource must come from
//!   some recipe that produces it, which gives an admissible lower bound;
//! - [`ToolPruning`]: holding more copies of a tool than could ever be useful
//!   is a dead end.

use crate::{CraftingGraph, Goal, ResourceId, ResourceState};

/// A trait for heuristic functions used by the best-first search.
pub trait HeuristicStrategy: Send + Sync {
    /// Lower bound on the remaining cost from `state` to `goal`, or `None`
    /// when the state should be pruned.
    fn estimate(&self, state: &ResourceState, goal: &Goal) -> Option<u64>;
}

/// Zero heuristic for Dijkstra-style uniform cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl HeuristicStrategy for ZeroHeuristic {
    fn estimate(&self, _state: &ResourceState, _goal: &Goal) -> Option<u64> {
        Some(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Producer {
    min_cost: u64,
    max_yield: u32,
}

/// Admissible and consistent bound from the missing goal quantities.
///
/// For a goal resource missing `d` units, at least `ceil(d / max_yield)`
/// producing recipes must still run, each costing at least the cheapest
/// producer. The estimate is the largest such bound over all goal resources.
/// A deficit in a resource that no recipe produces is unreachable.
#[derive(Debug, Clone)]
pub struct DeficitHeuristic {
    producers: Vec<Option<Producer>>,
}

impl DeficitHeuristic {
    pub fn new(graph: &CraftingGraph) -> Self {
        let mut producers: Vec<Option<Producer>> = vec![None; graph.vocabulary().len()];
        for recipe in graph.recipes() {
            for &(id, quantity) in recipe.produces() {
                if quantity == 0 {
                    continue;
                }
                let slot = &mut producers[id.index()];
                *slot = Some(match *slot {
                    None => Producer {
                        min_cost: recipe.cost(),
                        max_yield: quantity,
                    },
                    Some(p) => Producer {
                        min_cost: p.min_cost.min(recipe.cost()),
                        max_yield: p.max_yield.max(quantity),
                    },
                });
            }
        }
        Self { producers }
    }

    fn bound_for(&self, resource: ResourceId, deficit: u32) -> Option<u64> {
        let producer = self.producers.get(resource.index()).copied().flatten()?;
        let applications = u64::from(deficit).div_ceil(u64::from(producer.max_yield));
        Some(applications.saturating_mul(producer.min_cost))
    }
}

impl HeuristicStrategy for DeficitHeuristic {
    fn estimate(&self, state: &ResourceState, goal: &Goal) -> Option<u64> {
        let mut best = 0;
        for &(id, _) in goal.targets() {
            let deficit = goal.deficit(state, id);
            if deficit == 0 {
                continue;
            }
            best = best.max(self.bound_for(id, deficit)?);
        }
        Some(best)
    }
}

/// Prunes states that hoard tools, deferring to `inner` otherwise.
///
/// A tool is a resource some recipe requires the presence of and no recipe
/// consumes. Keeping more than `max(1, largest single production, goal
/// quantity)` of one never helps, so such states are reported unreachable.
#[derive(Debug, Clone)]
pub struct ToolPruning<H> {
    caps: Vec<(ResourceId, u32)>,
    inner: H,
}

impl<H: HeuristicStrategy> ToolPruning<H> {
    /// Treats every resource that some recipe requires and none consumes as a tool.
    pub fn new(graph: &CraftingGraph, inner: H) -> Self {
        let consumed = |tool: ResourceId| {
            graph
                .recipes()
                .iter()
                .any(|recipe| recipe.consumes().iter().any(|&(id, _)| id == tool))
        };
        let mut tools: Vec<ResourceId> = graph
            .recipes()
            .iter()
            .flat_map(|recipe| recipe.requires().iter().copied())
            .filter(|&tool| !consumed(tool))
            .collect();
        tools.sort();
        tools.dedup();
        Self::with_tools(graph, tools, inner)
    }

    /// Uses an explicit tool list. A listed tool that some recipe consumes
    /// is capped no lower than the largest quantity consumed at once.
    pub fn with_tools(graph: &CraftingGraph, tools: Vec<ResourceId>, inner: H) -> Self {
        let caps = tools
            .into_iter()
            .map(|tool| {
                let largest_batch = graph
                    .recipes()
                    .iter()
                    .map(|recipe| recipe.yield_of(tool))
                    .max()
                    .unwrap_or(0);
                let largest_use = graph
                    .recipes()
                    .iter()
                    .flat_map(|recipe| recipe.consumes().iter())
                    .filter(|&&(id, _)| id == tool)
                    .map(|&(_, quantity)| quantity)
                    .max()
                    .unwrap_or(0);
                (tool, largest_batch.max(largest_use).max(1))
            })
            .collect();
        Self { caps, inner }
    }

    pub fn tools(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.caps.iter().map(|(tool, _)| *tool)
    }
}

impl<H: HeuristicStrategy> HeuristicStrategy for ToolPruning<H> {
    fn estimate(&self, state: &ResourceState, goal: &Goal) -> Option<u64> {
        let hoarding = self
            .caps
            .iter()
            .any(|&(tool, cap)| state.get(tool) > cap.max(goal.target(tool)));
        if hoarding {
            return None;
        }
        self.inner.estimate(state, goal)
    }
}

/// The planner's default heuristic: tool pruning around the deficit bound.
pub type CraftingHeuristic = ToolPruning<DeficitHeuristic>;

impl CraftingHeuristic {
    pub fn for_graph(graph: &CraftingGraph) -> Self {
        ToolPruning::new(graph, DeficitHeuristic::new(graph))
    }
}
