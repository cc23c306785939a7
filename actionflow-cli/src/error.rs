//! Error handling for the ActionFlow CLI
//!
//! Errors keep their source chain so the full context can be printed before
//! the process exits with the code the error carries.

use crate::exit_codes::EXIT_ERROR;
use std::error::Error;
use std::fmt;

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that carries the exit code to terminate with
#[derive(Debug)]
pub struct CliError {
    /// Message printed to stderr
    pub message: String,
    /// Process exit code
    pub exit_code: i32,
    /// Underlying cause, if any
    pub source: Option<anyhow::Error>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Wrap an error with an exit code
    pub fn from_error(error: impl Into<anyhow::Error>, exit_code: i32) -> Self {
        let error = error.into();
        Self {
            message: error.to_string(),
            exit_code,
            source: Some(error),
        }
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();
        if let Some(source) = &self.source {
            for cause in source.chain().skip(1) {
                result.push_str(&format!("\n  Caused by: {cause}"));
            }
        }
        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| &**e as &(dyn Error + 'static))
    }
}

impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        Self::from_error(error, EXIT_ERROR)
    }
}

/// Convert a CliResult carrying an exit code into the code to exit with,
/// printing the full error chain on failure
pub fn handle_cli_result(result: CliResult<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e.full_chain());
            e.exit_code
        }
    }
}
