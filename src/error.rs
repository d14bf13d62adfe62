use thiserror::Error;

/// Errors raised while compiling a crafting problem or applying recipes.
///
/// Search exhaustion is not an error: the search engine reports it through
/// [`SearchOutcome::Exhausted`](crate::SearchOutcome). [`PlanError::NoPlanFound`]
/// only appears when a caller asks to turn that outcome into a `Result`.
#[derive(Error, Debug)]
pub enum PlanError {
    /// A recipe, goal or initial inventory names a resource outside the vocabulary
    #[error("Unknown resource '{resource}' referenced by {context}")]
    UnknownResource { context: String, resource: String },

    /// The same resource was declared twice in the vocabulary
    #[error("Resource declared more than once: {0}")]
    DuplicateResource(String),

    /// A recipe was applied to a state its check rejects
    #[error("Recipe precondition not met: {0}")]
    PreconditionNotMet(String),

    /// Producing a resource would exceed the representable quantity
    #[error("Quantity overflow for resource #{resource} while applying '{recipe}'")]
    QuantityOverflow { recipe: String, resource: usize },

    /// The search ended without reaching a goal state
    #[error("No valid plan found to achieve the goal: {0}")]
    NoPlanFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
