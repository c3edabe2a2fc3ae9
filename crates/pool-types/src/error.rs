//! Error types for the pool domain

use thiserror::Error;

/// The error type returned by pure domain operations
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PoolTypesError {
    /// The user-entered amount could not be converted into base units
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// A permit deadline is not in the future
    #[error("permit deadline {deadline} is not after the current time {now}")]
    ExpiredDeadline {
        /// The requested deadline
        deadline: u64,
        /// The time at which the permit was constructed
        now: u64,
    },
    /// A raw signature could not be decomposed
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    /// An interaction state transition that skips or reverses a step
    #[error("invalid interaction transition from {from} to {to}")]
    InvalidTransition {
        /// The current state
        from: String,
        /// The requested state
        to: String,
    },
}

impl PoolTypesError {
    /// Create a new invalid amount error
    #[allow(clippy::needless_pass_by_value)]
    pub fn invalid_amount<T: ToString>(msg: T) -> Self {
        Self::InvalidAmount(msg.to_string())
    }

    /// Create a new invalid signature error
    #[allow(clippy::needless_pass_by_value)]
    pub fn invalid_signature<T: ToString>(msg: T) -> Self {
        Self::InvalidSignature(msg.to_string())
    }
}
