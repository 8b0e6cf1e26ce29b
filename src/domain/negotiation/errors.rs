//! Negotiation error types.

use thiserror::Error;

use super::{Performative, ProtocolState};
use crate::domain::argument::ArgumentError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::preferences::PreferenceError;

/// Errors raised while processing one message.
///
/// The engine never lets these escape: each one ends the dialogue as
/// `Rejected`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NegotiationError {
    #[error("{performative} is not allowed in state {state}: {detail}")]
    ProtocolViolation {
        performative: Performative,
        state: ProtocolState,
        detail: String,
    },

    #[error("Invalid dialogue: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Preference(#[from] PreferenceError),
}

impl NegotiationError {
    pub fn violation(
        performative: Performative,
        state: ProtocolState,
        detail: impl Into<String>,
    ) -> Self {
        NegotiationError::ProtocolViolation {
            performative,
            state,
            detail: detail.into(),
        }
    }

    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            NegotiationError::ProtocolViolation { .. } | NegotiationError::Invalid(_)
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            NegotiationError::ProtocolViolation { .. } => ErrorCode::InvalidStateTransition,
            NegotiationError::Invalid(_) => ErrorCode::ValidationFailed,
            NegotiationError::Argument(ArgumentError::Preference(err))
            | NegotiationError::Preference(err) => err.code(),
            NegotiationError::Argument(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<NegotiationError> for DomainError {
    fn from(err: NegotiationError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
