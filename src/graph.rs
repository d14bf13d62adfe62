//! The implicit crafting graph: vertices are [`ResourceState`]s and each
//! applicable [`Recipe`] is an outgoing edge weighted by its time cost.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{Recipe, RecipeSpec, ResourceState, Result, Vocabulary};

/// One outgoing edge produced by [`CraftingGraph::successors`].
#[derive(Debug, Clone)]
pub struct Successor<'a> {
    /// Position of the recipe in declaration order
    pub index: usize,
    pub recipe: &'a Recipe,
    pub state: ResourceState,
}

impl Successor<'_> {
    pub fn action(&self) -> &str {
        self.recipe.name()
    }

    pub fn cost(&self) -> u64 {
        self.recipe.cost()
    }
}

/// Compiled recipe set plus the vocabulary its states are laid out by.
#[derive(Debug, Clone)]
pub struct CraftingGraph {
    vocabulary: Arc<Vocabulary>,
    recipes: Vec<Recipe>,
}

impl CraftingGraph {
    pub fn new(vocabulary: Arc<Vocabulary>, recipes: Vec<Recipe>) -> Self {
        Self {
            vocabulary,
            recipes,
        }
    }

    /// Compiles every recipe spec, keeping declaration order.
    pub fn compile(vocabulary: Arc<Vocabulary>, specs: &IndexMap<String, RecipeSpec>) -> Result<Self> {
        let recipes = specs
            .iter()
            .map(|(name, spec)| Recipe::compile(name.as_str(), spec, &vocabulary))
            .collect::<Result<Vec<_>>>()?;
        log::debug!(
            "Compiled {} recipes over {} resources",
            recipes.len(),
            vocabulary.len()
        );
        Ok(Self::new(vocabulary, recipes))
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn recipe(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    /// Lazily yields one successor per applicable recipe, in declaration order.
    pub fn successors<'a>(
        &'a self,
        state: &'a ResourceState,
    ) -> impl Iterator<Item = Successor<'a>> + 'a {
        self.recipes
            .iter()
            .enumerate()
            .filter(move |(_, recipe)| recipe.is_applicable(state))
            .filter_map(move |(index, recipe)| match recipe.apply(state) {
                Ok(next) => Some(Successor {
                    index,
                    recipe,
                    state: next,
                }),
                Err(err) => {
                    log::error!("Skipping recipe '{}': {}", recipe.name(), err);
                    None
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlanError;

    fn graph() -> CraftingGraph {
        let vocabulary = Arc::new(Vocabulary::new(["bench", "wood", "plank"]).unwrap());
        let mut specs = IndexMap::new();
        specs.insert(
            "punch for wood".to_string(),
            RecipeSpec::new(4).produces("wood", 1),
        );
        specs.insert(
            "craft plank".to_string(),
            RecipeSpec::new(1).consumes("wood", 1).produces("plank", 4),
        );
        specs.insert(
            "craft bench".to_string(),
            RecipeSpec::new(1).consumes("plank", 4).produces("bench", 1),
        );
        CraftingGraph::compile(vocabulary, &specs).unwrap()
    }

    #[test]
    fn test_successors_follow_declaration_order() {
        let graph = graph();
        let state = graph.vocabulary().state_from([("wood", 1)]).unwrap();
        let actions: Vec<_> = graph
            .successors(&state)
            .map(|s| (s.index, s.action().to_string(), s.cost()))
            .collect();
        assert_eq!(
            actions,
            [
                (0, "punch for wood".to_string(), 4),
                (1, "craft plank".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_successor_states_are_effects() {
        let graph = graph();
        let vocab = graph.vocabulary().clone();
        let state = vocab.state_from([("plank", 4)]).unwrap();
        let next: Vec<_> = graph.successors(&state).map(|s| s.state).collect();
        assert_eq!(
            next,
            [
                vocab.state_from([("wood", 1), ("plank", 4)]).unwrap(),
                vocab.state_from([("bench", 1)]).unwrap(),
            ]
        );
        // input untouched
        assert_eq!(state, vocab.state_from([("plank", 4)]).unwrap());
    }

    #[test]
    fn test_compile_fails_fast_on_unknown_resource() {
        let vocabulary = Arc::new(Vocabulary::new(["wood"]).unwrap());
        let mut specs = IndexMap::new();
        specs.insert(
            "craft plank".to_string(),
            RecipeSpec::new(1).consumes("wood", 1).produces("plank", 4),
        );
        let result = CraftingGraph::compile(vocabulary, &specs);
        assert!(matches!(result, Err(PlanError::UnknownResource { .. })));
    }

    #[test]
    fn test_successors_are_lazy() {
        let graph = graph();
        let state = graph.vocabulary().empty_state();
        let mut successors = graph.successors(&state);
        assert_eq!(successors.next().map(|s| s.index), Some(0));
        assert!(successors.next().is_none());
    }
}
