//! Error types for the simulator core.

use crate::stepper::HaltReason;
use thiserror::Error;

/// Errors raised by the registry and the stepper
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("body index {index} out of range (registry holds {count} bodies)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("simulation already halted ({0})")]
    AlreadyHalted(HaltReason),

    #[error("run started with {expected} bodies but the registry now holds {found}")]
    BodyCountChanged { expected: usize, found: usize },
}

/// Errors raised while loading a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("body {index}: {reason}")]
    InvalidBody { index: usize, reason: String },
}

impl ScenarioError {
    pub fn invalid_body(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidBody {
            index,
            reason: reason.into(),
        }
    }
}
