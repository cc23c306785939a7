//! Exit code constants for CLI commands
//!
//! - 0: The workflow terminated successfully
//! - 1: The workflow ran but terminated unsuccessfully
//! - 2: Usage, configuration or rendering errors

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// The workflow terminated unsuccessfully
pub const EXIT_WORKFLOW_FAILED: i32 = 1;

/// Configuration errors or other critical failures
pub const EXIT_ERROR: i32 = 2;
