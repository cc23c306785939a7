//! Error types for the ActionFlow library
//!
//! Expected action failures are never errors: they travel as
//! [`Outcome::Failure`](crate::Outcome). The types here cover misuse of the
//! engine API and the ambient concerns around it (configuration, trace export).

use thiserror::Error;

/// Errors raised by the orchestrator API itself
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlowError {
    /// An iteration window whose start lies after its end
    #[error("Invalid iteration window: start index {start} is greater than end index {end}")]
    InvalidWindow {
        /// Requested first index (inclusive)
        start: usize,
        /// Requested last index (exclusive)
        end: usize,
    },

    /// Exporting a trace failed
    #[error("Trace export failed: {0}")]
    TraceExport(#[from] serde_json::Error),

    /// Configuration could not be loaded or was invalid
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Result type for orchestrator operations that can fail outside of an Outcome
pub type FlowResult<T> = Result<T, FlowError>;
