//! # Recipes
//!
//! A [`Recipe`] is the compiled, executable form of a [`RecipeSpec`]: every
//! resource name is resolved against the [`Vocabulary`] once, up front, so the
//! two hot routines the search calls millions of times ([`Recipe::is_applicable`]
//! and [`Recipe::apply`]) only touch vector indices.
//!
//! ```
//! use craft_planner::{Recipe, RecipeSpec, Vocabulary};
//!
//! let vocabulary = Vocabulary::new(["wood", "plank"]).unwrap();
//! let spec = RecipeSpec::new(1).consumes("wood", 1).produces("plank", 4);
//! let recipe = Recipe::compile("craft plank", &spec, &vocabulary).unwrap();
//!
//! let state = vocabulary.state_from([("wood", 1)]).unwrap();
//! assert!(recipe.is_applicable(&state));
//!
//! let next = recipe.apply(&state).unwrap();
//! assert_eq!(next.display(&vocabulary).to_string(), "{plank: 4}");
//! ```

use crate::{PlanError, RecipeSpec, ResourceId, ResourceState, Result, Vocabulary};

/// A named transition: presence requirements, consumed and produced
/// quantities, and a time cost. Immutable once compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    name: String,
    cost: u64,
    requires: Vec<ResourceId>,
    consumes: Vec<(ResourceId, u32)>,
    produces: Vec<(ResourceId, u32)>,
}

impl Recipe {
    /// Compiles a recipe against a vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UnknownResource`] if the recipe requires, consumes
    /// or produces a resource the vocabulary does not declare.
    pub fn compile(name: impl Into<String>, spec: &RecipeSpec, vocabulary: &Vocabulary) -> Result<Self> {
        let name = name.into();
        let context = format!("recipe '{}'", name);

        let requires = spec
            .requires
            .keys()
            .map(|resource| vocabulary.resolve(resource, &context))
            .collect::<Result<Vec<_>>>()?;
        let consumes = spec
            .consumes
            .iter()
            .map(|(resource, &quantity)| Ok((vocabulary.resolve(resource, &context)?, quantity)))
            .collect::<Result<Vec<_>>>()?;
        let produces = spec
            .produces
            .iter()
            .map(|(resource, &quantity)| Ok((vocabulary.resolve(resource, &context)?, quantity)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name,
            cost: spec.time,
            requires,
            consumes,
            produces,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub fn requires(&self) -> &[ResourceId] {
        &self.requires
    }

    pub fn consumes(&self) -> &[(ResourceId, u32)] {
        &self.consumes
    }

    pub fn produces(&self) -> &[(ResourceId, u32)] {
        &self.produces
    }

    /// How many units of `resource` one application produces.
    pub fn yield_of(&self, resource: ResourceId) -> u32 {
        self.produces
            .iter()
            .filter(|(id, _)| *id == resource)
            .map(|(_, quantity)| *quantity)
            .sum()
    }

    /// True iff every required resource is held (> 0) and every consumed
    /// resource is held in at least the consumed quantity.
    pub fn is_applicable(&self, state: &ResourceState) -> bool {
        self.consumes
            .iter()
            .all(|&(id, quantity)| state.get(id) >= quantity)
            && self.requires.iter().all(|&id| state.get(id) > 0)
    }

    /// Returns a new state with the products added and the consumed
    /// quantities removed. The input state is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::PreconditionNotMet`] if the recipe is not
    /// applicable to `state`, and [`PlanError::QuantityOverflow`] if a product
    /// would not fit in a `u32`.
    pub fn apply(&self, state: &ResourceState) -> Result<ResourceState> {
        if !self.is_applicable(state) {
            return Err(PlanError::PreconditionNotMet(self.name.clone()));
        }

        let mut quantities = state.quantities().to_vec();
        for &(id, quantity) in &self.produces {
            let slot = &mut quantities[id.index()];
            *slot = slot
                .checked_add(quantity)
                .ok_or_else(|| PlanError::QuantityOverflow {
                    recipe: self.name.clone(),
                    resource: id.index(),
                })?;
        }
        for &(id, quantity) in &self.consumes {
            let slot = &mut quantities[id.index()];
            *slot = slot
                .checked_sub(quantity)
                .ok_or_else(|| PlanError::PreconditionNotMet(self.name.clone()))?;
        }

        Ok(ResourceState::from_quantities(quantities))
    }
}
