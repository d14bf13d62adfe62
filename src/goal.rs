use indexmap::IndexMap;

use crate::{ResourceId, ResourceState, Result, Vocabulary};

/// Minimum quantities a state must hold to count as solved.
///
/// Resources absent from the goal are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Goal {
    targets: Vec<(ResourceId, u32)>,
}

impl Goal {
    /// Compiles a goal map against a vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UnknownResource`](crate::PlanError::UnknownResource)
    /// for resources outside the vocabulary.
    pub fn compile(goal: &IndexMap<String, u32>, vocabulary: &Vocabulary) -> Result<Self> {
        let targets = goal
            .iter()
            .map(|(resource, &quantity)| Ok((vocabulary.resolve(resource, "goal")?, quantity)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { targets })
    }

    pub fn targets(&self) -> &[(ResourceId, u32)] {
        &self.targets
    }

    /// The required quantity of `resource`, 0 if the goal doesn't mention it.
    pub fn target(&self, resource: ResourceId) -> u32 {
        self.targets
            .iter()
            .filter(|(id, _)| *id == resource)
            .map(|(_, quantity)| *quantity)
            .max()
            .unwrap_or(0)
    }

    pub fn is_satisfied(&self, state: &ResourceState) -> bool {
        self.targets
            .iter()
            .all(|&(id, quantity)| state.get(id) >= quantity)
    }

    /// Units of `resource` still missing in `state`.
    pub fn deficit(&self, state: &ResourceState, resource: ResourceId) -> u32 {
        self.target(resource).saturating_sub(state.get(resource))
    }
}
