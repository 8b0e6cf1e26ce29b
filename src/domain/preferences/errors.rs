//! Preference-model error types.

use thiserror::Error;

use super::CriterionName;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while scoring or ranking items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    #[error("No value for item '{item}' on criterion {criterion}")]
    Lookup { item: String, criterion: CriterionName },

    #[error("Cannot rank an empty set of items")]
    EmptySet,

    #[error("Invalid criterion ranking: {reason}")]
    InvalidRanking { reason: String },
}

impl PreferenceError {
    pub fn lookup(item: impl Into<String>, criterion: CriterionName) -> Self {
        PreferenceError::Lookup {
            item: item.into(),
            criterion,
        }
    }

    pub fn invalid_ranking(reason: impl Into<String>) -> Self {
        PreferenceError::InvalidRanking {
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PreferenceError::Lookup { .. } => ErrorCode::ItemNotFound,
            PreferenceError::EmptySet => ErrorCode::ValidationFailed,
            PreferenceError::InvalidRanking { .. } => ErrorCode::InvalidFormat,
        }
    }
}

impl From<PreferenceError> for DomainError {
    fn from(err: PreferenceError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
