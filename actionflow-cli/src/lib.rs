//! ActionFlow CLI Library
//!
//! Command-line definitions, sample actions and the demo workflow behind the
//! `actionflow` binary.

/// Command-line interface definitions and argument parsing
pub mod cli;
/// The demo workflow run by `actionflow run`
pub mod demo;
/// CLI error type
pub mod error;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Sample actions and their stand-in collaborators
pub mod samples;
