//! Argument-generation error types.

use thiserror::Error;

use crate::domain::preferences::PreferenceError;

/// Errors raised while building premises or counter-proposals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error(transparent)]
    Preference(#[from] PreferenceError),

    #[error("Item '{item}' has no supporting premise")]
    NoSupportingPremise { item: String },

    #[error("Item '{item}' has no attacking premise")]
    NoAttackingPremise { item: String },

    #[error("Catalog is empty")]
    EmptyCatalog,
}
