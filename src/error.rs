//! Error types for the simulation engine
//!
//! Algorithmic functions (rainfall, runoff, time of concentration, routing) signal
//! [`SimError::InvalidInput`]; the project model and system router signal
//! [`SimError::InvalidProject`] for conditions that only make sense at the DAG level
//! (an unknown event, a cycle, a subcatchment that can't be simulated).

use thiserror::Error;

/// Error raised anywhere in the simulation core
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimError {
    /// An individual parameter value is out of its valid range for the calculation
    /// being attempted (e.g. a curve number outside (0,100], a non-positive slope).
    #[error("invalid input for {parameter}: {message}")]
    InvalidInput {
        /// Name of the offending parameter
        parameter: String,
        /// Human-readable description of the violation
        message: String,
    },

    /// A project-level condition prevents simulation: an unknown event id, a cycle
    /// in the node graph, or a node whose data can't be resolved into usable inputs.
    #[error("invalid project: {reason}")]
    InvalidProject {
        /// Human-readable description of the violation
        reason: String,
    },
}

impl SimError {
    /// Construct an [`SimError::InvalidInput`]
    pub fn invalid_input(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        SimError::InvalidInput {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Construct an [`SimError::InvalidProject`]
    pub fn invalid_project(reason: impl Into<String>) -> Self {
        SimError::InvalidProject {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the core
pub type SimResult<T> = Result<T, SimError>;
