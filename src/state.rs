//! # Resource states
//!
//! Every search vertex is a [`ResourceState`]: a snapshot of how many units of
//! each resource the planner holds. The set of resources is fixed up front by a
//! [`Vocabulary`], which assigns each name a stable [`ResourceId`] in
//! declaration order. States are therefore plain fixed-layout vectors of
//! quantities that hash, compare and order structurally, which is what the
//! search engine needs for its bookkeeping maps and its deterministic
//! tie-break.
//!
//! ```
//! use craft_planner::Vocabulary;
//!
//! let vocabulary = Vocabulary::new(["wood", "plank"]).unwrap();
//! let state = vocabulary.state_from([("wood", 1)]).unwrap();
//!
//! let plank = vocabulary.id("plank").unwrap();
//! assert_eq!(state.get(plank), 0);
//! assert_eq!(state.display(&vocabulary).to_string(), "{wood: 1}");
//! ```

use std::fmt;

use indexmap::IndexSet;

use crate::{PlanError, Result};

/// Stable index of a resource inside its [`Vocabulary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(usize);

impl ResourceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The ordered set of resource names known to a crafting domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    names: IndexSet<String>,
}

impl Vocabulary {
    /// Builds a vocabulary from resource names, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::DuplicateResource`] if a name appears twice.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IndexSet::new();
        for name in names {
            let name = name.into();
            if set.contains(&name) {
                return Err(PlanError::DuplicateResource(name));
            }
            set.insert(name);
        }
        Ok(Self { names: set })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Looks up the id of a resource name.
    pub fn id(&self, name: &str) -> Option<ResourceId> {
        self.names.get_index_of(name).map(ResourceId)
    }

    /// Like [`Vocabulary::id`], but reports unknown names as an error blaming `context`.
    pub fn resolve(&self, name: &str, context: &str) -> Result<ResourceId> {
        self.id(name).ok_or_else(|| PlanError::UnknownResource {
            context: context.to_string(),
            resource: name.to_string(),
        })
    }

    pub fn name(&self, id: ResourceId) -> &str {
        self.names
            .get_index(id.0)
            .map(String::as_str)
            .unwrap_or("<unknown>")
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (ResourceId(index), name.as_str()))
    }

    /// A state holding zero of every resource.
    pub fn empty_state(&self) -> ResourceState {
        ResourceState::from_quantities(vec![0; self.len()])
    }

    /// Builds a state from named quantities; unlisted resources default to 0.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UnknownResource`] for names outside the vocabulary.
    pub fn state_from<'a, I>(&self, quantities: I) -> Result<ResourceState>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut values = vec![0; self.len()];
        for (name, quantity) in quantities {
            let id = self.resolve(name, "initial inventory")?;
            values[id.0] = quantity;
        }
        Ok(ResourceState::from_quantities(values))
    }
}

/// An immutable snapshot of resource quantities, indexed by [`ResourceId`].
///
/// Equality, hashing and ordering are structural over the vocabulary's index
/// order, so two states are the same search vertex iff all quantities match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceState {
    quantities: Box<[u32]>,
}

impl ResourceState {
    pub(crate) fn from_quantities(quantities: Vec<u32>) -> Self {
        Self {
            quantities: quantities.into_boxed_slice(),
        }
    }

    /// Quantity held of a resource. Ids from another vocabulary read as 0.
    pub fn get(&self, id: ResourceId) -> u32 {
        self.quantities.get(id.0).copied().unwrap_or(0)
    }

    pub fn quantities(&self) -> &[u32] {
        &self.quantities
    }

    /// True if this state holds at least as much of every resource as `other`.
    pub fn dominates(&self, other: &ResourceState) -> bool {
        self.quantities.len() == other.quantities.len()
            && self
                .quantities
                .iter()
                .zip(other.quantities.iter())
                .all(|(mine, theirs)| mine >= theirs)
    }

    /// Renders the non-zero quantities with their resource names.
    pub fn display<'a>(&'a self, vocabulary: &'a Vocabulary) -> StateDisplay<'a> {
        StateDisplay {
            state: self,
            vocabulary,
        }
    }
}

/// [`fmt::Display`] adapter returned by [`ResourceState::display`].
pub struct StateDisplay<'a> {
    state: &'a ResourceState,
    vocabulary: &'a Vocabulary,
}

impl fmt::Display for StateDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (id, name) in self.vocabulary.iter() {
            let quantity = self.state.get(id);
            if quantity == 0 {
                continue;
            }
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, quantity)?;
            first = false;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn vocabulary() -> Vocabulary {
        Vocabulary::new(["wood", "plank", "stick"]).unwrap()
    }

    #[test]
    fn test_vocabulary_keeps_declaration_order() {
        let vocab = vocabulary();
        let names: Vec<_> = vocab.iter().map(|(_, name)| name).collect();
        assert_eq!(names, ["wood", "plank", "stick"]);
        assert_eq!(vocab.id("plank").unwrap().index(), 1);
        assert_eq!(vocab.name(vocab.id("stick").unwrap()), "stick");
    }

    #[test]
    fn test_duplicate_resource_rejected() {
        let result = Vocabulary::new(["wood", "plank", "wood"]);
        assert!(matches!(result, Err(PlanError::DuplicateResource(name)) if name == "wood"));
    }

    #[test]
    fn test_state_from_defaults_to_zero() {
        let vocab = vocabulary();
        let state = vocab.state_from([("plank", 3)]).unwrap();
        assert_eq!(state.quantities(), &[0, 3, 0]);
    }

    #[test]
    fn test_state_from_unknown_resource() {
        let vocab = vocabulary();
        let result = vocab.state_from([("diamond", 1)]);
        assert!(matches!(
            result,
            Err(PlanError::UnknownResource { resource, .. }) if resource == "diamond"
        ));
    }

    #[test]
    fn test_states_compare_structurally() {
        let vocab = vocabulary();
        let a = vocab.state_from([("wood", 1)]).unwrap();
        let b = vocab.state_from([("wood", 1), ("plank", 0)]).unwrap();
        let c = vocab.state_from([("plank", 1)]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a.clone(), b, c.clone()].into_iter().collect();
        assert_eq!(set.len(), 2);

        // wood is the most significant index
        assert!(c < a);
    }

    #[test]
    fn test_dominates() {
        let vocab = vocabulary();
        let rich = vocab.state_from([("wood", 2), ("plank", 4)]).unwrap();
        let poor = vocab.state_from([("wood", 1)]).unwrap();
        assert!(rich.dominates(&poor));
        assert!(!poor.dominates(&rich));
        assert!(poor.dominates(&poor));
    }

    #[test]
    fn test_display_omits_zero_quantities() {
        let vocab = vocabulary();
        let state = vocab.state_from([("wood", 2), ("stick", 4)]).unwrap();
        assert_eq!(state.display(&vocab).to_string(), "{wood: 2, stick: 4}");
        assert_eq!(vocab.empty_state().display(&vocab).to_string(), "{}");
    }
}
