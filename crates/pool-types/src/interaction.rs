//! The interaction state of a permit deposit form

use std::fmt::Display;

use crate::error::PoolTypesError;

/// Which step of the sign-then-submit deposit the user is on
///
/// The only forward path is `Idle -> Signed -> Submitted`. `Signed` and
/// `Submitted` may fall back to `Idle` when the signature is discarded or
/// the deposit completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionState {
    /// No valid signature is held; the action is "sign"
    #[default]
    Idle,
    /// A permit signature is held; the action is "deposit"
    Signed,
    /// A deposit transaction is pending inclusion
    Submitted,
}

impl Display for InteractionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InteractionState::Idle => write!(f, "idle"),
            InteractionState::Signed => write!(f, "signed"),
            InteractionState::Submitted => write!(f, "submitted"),
        }
    }
}

impl InteractionState {
    /// Whether moving to `next` is permitted
    pub fn can_transition(self, next: Self) -> bool {
        use InteractionState::*;
        matches!(
            (self, next),
            (Idle, Signed) | (Signed, Submitted) | (Signed, Idle) | (Submitted, Idle)
        )
    }

    /// Move to `next`, rejecting skipped or reversed steps
    pub fn transition(self, next: Self) -> Result<Self, PoolTypesError> {
        if !self.can_transition(next) {
            return Err(PoolTypesError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            });
        }

        Ok(next)
    }
}
