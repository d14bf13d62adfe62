use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

use crate::heuristic::{CraftingHeuristic, HeuristicStrategy, ZeroHeuristic};
use crate::plan::{FailureReason, Plan, PlanStep, SearchFailure, SearchOutcome, SearchStats};
use crate::{CraftingGraph, Goal, ResourceState};

/// Trait defining the interface for search algorithms used by the planner.
///
/// A search explores the implicit graph of `graph` from `start` until it pops
/// a state satisfying `goal` or `time_limit` elapses. Running out of time or
/// states is reported through [`SearchOutcome::Exhausted`], never by panicking.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use craft_planner::{CraftingGraph, Goal, RecipeSpec, SearchAlgorithm, DijkstraSearch, Vocabulary};
///
/// let vocabulary = Arc::new(Vocabulary::new(["wood", "plank"]).unwrap());
/// let mut recipes = indexmap::IndexMap::new();
/// recipes.insert(
///     "craft plank".to_string(),
///     RecipeSpec::new(1).consumes("wood", 1).produces("plank", 4),
/// );
/// let graph = CraftingGraph::compile(vocabulary.clone(), &recipes).unwrap();
///
/// let mut targets = indexmap::IndexMap::new();
/// targets.insert("plank".to_string(), 1);
/// let goal = Goal::compile(&targets, &vocabulary).unwrap();
/// let start = vocabulary.state_from([("wood", 1)]).unwrap();
///
/// let outcome = DijkstraSearch.search(&graph, &start, &goal, Duration::from_secs(5));
/// let plan = outcome.into_plan().unwrap();
/// assert_eq!(plan.actions().collect::<Vec<_>>(), ["craft plank"]);
/// assert_eq!(plan.total_cost(), 1);
/// ```
pub trait SearchAlgorithm: Send + Sync {
    fn search(
        &self,
        graph: &CraftingGraph,
        start: &ResourceState,
        goal: &Goal,
        time_limit: Duration,
    ) -> SearchOutcome;
}

/// A queued state. Ordered by priority, then by the state itself so that
/// equal priorities always pop in the same order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct QueueEntry {
    priority: u64,
    state: ResourceState,
    /// Accumulated cost when this entry was pushed
    cost: u64,
}

/// The edge that gave a state its best known cost.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edge {
    parent: Option<ResourceState>,
    recipe: Option<usize>,
}

/// Manages the state of a single graph search.
struct SearchContext<'g> {
    graph: &'g CraftingGraph,
    open_set: BinaryHeap<Reverse<QueueEntry>>,
    cost_so_far: HashMap<ResourceState, u64>,
    came_from: HashMap<ResourceState, Edge>,
    stats: SearchStats,
}

impl<'g> SearchContext<'g> {
    fn new(graph: &'g CraftingGraph, start: &ResourceState) -> Self {
        let mut open_set = BinaryHeap::new();
        open_set.push(Reverse(QueueEntry {
            priority: 0,
            state: start.clone(),
            cost: 0,
        }));

        let mut cost_so_far = HashMap::new();
        cost_so_far.insert(start.clone(), 0);

        let mut came_from = HashMap::new();
        came_from.insert(
            start.clone(),
            Edge {
                parent: None,
                recipe: None,
            },
        );

        Self {
            graph,
            open_set,
            cost_so_far,
            came_from,
            stats: SearchStats::default(),
        }
    }

    /// Pops the cheapest entry, skipping entries superseded by a cheaper path.
    fn next_state(&mut self) -> Option<(ResourceState, u64)> {
        while let Some(Reverse(entry)) = self.open_set.pop() {
            let best = self.cost_so_far.get(&entry.state).copied();
            if best.map_or(true, |best| entry.cost <= best) {
                return Some((entry.state, entry.cost));
            }
        }
        None
    }

    /// Records and queues every successor of `state` that improves on its best known cost.
    fn expand(
        &mut self,
        state: &ResourceState,
        cost: u64,
        goal: &Goal,
        heuristic: &dyn HeuristicStrategy,
    ) {
        let graph = self.graph;
        for successor in graph.successors(state) {
            self.stats.generated += 1;

            // the heuristic only orders the queue; the ledger holds edge costs
            let candidate = cost.saturating_add(successor.cost());
            let improves = self
                .cost_so_far
                .get(&successor.state)
                .map_or(true, |&known| candidate < known);
            if !improves {
                continue;
            }

            let Some(estimate) = heuristic.estimate(&successor.state, goal) else {
                self.stats.pruned += 1;
                continue;
            };

            self.cost_so_far.insert(successor.state.clone(), candidate);
            self.came_from.insert(
                successor.state.clone(),
                Edge {
                    parent: Some(state.clone()),
                    recipe: Some(successor.index),
                },
            );
            self.open_set.push(Reverse(QueueEntry {
                priority: candidate.saturating_add(estimate),
                state: successor.state,
                cost: candidate,
            }));
        }
    }

    /// Walks `came_from` back from `state` to the start.
    fn reconstruct_path(&self, state: &ResourceState) -> Vec<PlanStep> {
        let mut path = Vec::new();
        let mut current = Some(state.clone());

        while let Some(state) = current {
            let edge = self.came_from.get(&state);
            let action = edge
                .and_then(|edge| edge.recipe)
                .and_then(|index| self.graph.recipe(index))
                .map(|recipe| recipe.name().to_string());
            let cost = self.cost_so_far.get(&state).copied().unwrap_or(0);
            current = edge.and_then(|edge| edge.parent.clone());
            path.push(PlanStep {
                state,
                action,
                cost,
            });
        }

        path.reverse();
        path
    }
}

/// Time-bounded best-first search ordered by `cost + heuristic`.
fn best_first(
    graph: &CraftingGraph,
    start: &ResourceState,
    goal: &Goal,
    time_limit: Duration,
    heuristic: &dyn HeuristicStrategy,
) -> SearchOutcome {
    let vocabulary = graph.vocabulary();
    let started = Instant::now();
    let deadline = started.checked_add(time_limit);
    log::info!(
        "Searching from {} within {:?}",
        start.display(vocabulary),
        time_limit
    );

    let mut context = SearchContext::new(graph, start);
    let mut last = (start.clone(), 0);

    let reason = loop {
        if deadline.map_or(false, |deadline| Instant::now() >= deadline) {
            break FailureReason::Deadline;
        }
        let Some((state, cost)) = context.next_state() else {
            break FailureReason::FrontierExhausted;
        };
        context.stats.expanded += 1;
        log::trace!("Expanding {} at cost {}", state.display(vocabulary), cost);

        if goal.is_satisfied(&state) {
            let steps = context.reconstruct_path(&state);
            let mut stats = context.stats;
            stats.elapsed = started.elapsed();
            log::info!(
                "Found plan: cost {}, {} actions, {} states expanded in {:.3?}",
                cost,
                steps.len().saturating_sub(1),
                stats.expanded,
                stats.elapsed
            );
            return SearchOutcome::Found(Plan::new(vocabulary.clone(), steps, stats));
        }

        context.expand(&state, cost, goal, heuristic);
        last = (state, cost);
    };

    let mut stats = context.stats;
    stats.elapsed = started.elapsed();
    let failure = SearchFailure::new(
        reason,
        time_limit,
        start.clone(),
        last.0,
        last.1,
        stats,
        vocabulary.clone(),
    );
    log::warn!("{}", failure);
    SearchOutcome::Exhausted(failure)
}

/// A* search guided by a boxed heuristic.
pub struct AStarSearch {
    heuristic: Box<dyn HeuristicStrategy>,
}

impl AStarSearch {
    /// Creates a new A* search with the given heuristic.
    pub fn new(heuristic: Box<dyn HeuristicStrategy>) -> Self {
        Self { heuristic }
    }

    /// Creates a new A* search with the default crafting heuristic for `graph`.
    pub fn for_graph(graph: &CraftingGraph) -> Self {
        Self::new(Box::new(CraftingHeuristic::for_graph(graph)))
    }
}

impl SearchAlgorithm for AStarSearch {
    fn search(
        &self,
        graph: &CraftingGraph,
        start: &ResourceState,
        goal: &Goal,
        time_limit: Duration,
    ) -> SearchOutcome {
        best_first(graph, start, goal, time_limit, self.heuristic.as_ref())
    }
}

/// Dijkstra's algorithm: A* with a zero heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraSearch;

impl SearchAlgorithm for DijkstraSearch {
    fn search(
        &self,
        graph: &CraftingGraph,
        start: &ResourceState,
        goal: &Goal,
        time_limit: Duration,
    ) -> SearchOutcome {
        best_first(graph, start, goal, time_limit, &ZeroHeuristic)
    }
}
