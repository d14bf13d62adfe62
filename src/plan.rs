//! Search results: the [`Plan`] found, or the [`SearchFailure`] explaining why
//! none was.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::{PlanError, ResourceState, Result, Vocabulary};

/// One element of a plan: the state reached and the action that reached it.
///
/// The first step of every plan holds the initial inventory and no action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub state: ResourceState,
    pub action: Option<String>,
    /// Accumulated cost from the initial inventory to `state`
    pub cost: u64,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States popped from the queue
    pub expanded: usize,
    /// Successors produced by the expanded states
    pub generated: usize,
    /// Successors dropped because the heuristic marked them unreachable
    pub pruned: usize,
    pub elapsed: Duration,
}

/// An ordered sequence of steps from the initial inventory to a goal state.
#[derive(Debug, Clone)]
pub struct Plan {
    vocabulary: Arc<Vocabulary>,
    steps: Vec<PlanStep>,
    stats: SearchStats,
}

impl Plan {
    pub(crate) fn new(vocabulary: Arc<Vocabulary>, steps: Vec<PlanStep>, stats: SearchStats) -> Self {
        Self {
            vocabulary,
            steps,
            stats,
        }
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Number of actions, not counting the initial step.
    pub fn len(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn actions(&self) -> impl Iterator<Item = &str> + '_ {
        self.steps.iter().filter_map(|step| step.action.as_deref())
    }

    pub fn total_cost(&self) -> u64 {
        self.steps.last().map_or(0, |step| step.cost)
    }

    pub fn initial_state(&self) -> Option<&ResourceState> {
        self.steps.first().map(|step| &step.state)
    }

    pub fn final_state(&self) -> Option<&ResourceState> {
        self.steps.last().map(|step| &step.state)
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            let state = step.state.display(&self.vocabulary);
            match &step.action {
                None => writeln!(f, "{:>4}. {}", i, state)?,
                Some(action) => writeln!(f, "{:>4}. {} [t={}] -> {}", i, action, step.cost, state)?,
            }
        }
        write!(f, "cost {}, len {}", self.total_cost(), self.len())
    }
}

/// Why a search stopped without a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The time budget ran out
    Deadline,
    /// Every reachable, unpruned state was expanded
    FrontierExhausted,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Deadline => write!(f, "time limit reached"),
            FailureReason::FrontierExhausted => write!(f, "search space exhausted"),
        }
    }
}

/// Diagnostics for a search that found no plan.
#[derive(Debug, Clone)]
pub struct SearchFailure {
    pub reason: FailureReason,
    pub time_limit: Duration,
    pub start: ResourceState,
    /// The most recently expanded state
    pub last_state: ResourceState,
    /// Accumulated cost of `last_state`
    pub last_cost: u64,
    pub stats: SearchStats,
    vocabulary: Arc<Vocabulary>,
}

impl SearchFailure {
    pub(crate) fn new(
        reason: FailureReason,
        time_limit: Duration,
        start: ResourceState,
        last_state: ResourceState,
        last_cost: u64,
        stats: SearchStats,
        vocabulary: Arc<Vocabulary>,
    ) -> Self {
        Self {
            reason,
            time_limit,
            start,
            last_state,
            last_cost,
            stats,
            vocabulary,
        }
    }
}

impl fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to find a path from {} within {:.3?} ({}); last state {} at cost {} after {} expansions",
            self.start.display(&self.vocabulary),
            self.time_limit,
            self.reason,
            self.last_state.display(&self.vocabulary),
            self.last_cost,
            self.stats.expanded
        )
    }
}

/// What a search returns: never an error, either a plan or a failure report.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found(Plan),
    Exhausted(SearchFailure),
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn plan(&self) -> Option<&Plan> {
        match self {
            SearchOutcome::Found(plan) => Some(plan),
            SearchOutcome::Exhausted(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&SearchFailure> {
        match self {
            SearchOutcome::Found(_) => None,
            SearchOutcome::Exhausted(failure) => Some(failure),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Found(plan) => plan.stats(),
            SearchOutcome::Exhausted(failure) => &failure.stats,
        }
    }

    /// Converts a failure into [`PlanError::NoPlanFound`].
    pub fn into_plan(self) -> Result<Plan> {
        match self {
            SearchOutcome::Found(plan) => Ok(plan),
            SearchOutcome::Exhausted(failure) => Err(PlanError::NoPlanFound(failure.to_string())),
        }
    }
}
