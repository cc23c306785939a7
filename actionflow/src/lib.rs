//! # ActionFlow
//!
//! A small in-process workflow engine. Work is expressed as fallible
//! actions that return an [`Outcome`]; an [`Orchestrator`] runs them in
//! sequence, chains their results, branches and iterates, and records every
//! invocation so the run can be rendered as a trace.
//!
//! ## Features
//!
//! - **Outcome**: success/failure without errors or panics for expected failures
//! - **Actions**: no-argument and single-argument units of work with a static kind tag
//! - **Orchestration**: execute, bind, branch and lazy traced iteration
//! - **Traces**: text arrow diagrams, Mermaid flowcharts and JSON export
//!
//! ## Quick Start
//!
//! ```rust
//! use actionflow::{FnAction, Orchestrator, Outcome};
//!
//! let mut orchestrator = Orchestrator::new();
//! let greet = FnAction::new("Greet", || Outcome::success("hi".to_string()));
//!
//! let greeting = orchestrator.execute_match(Some("step1"), &greet, |s| s, || "fail".to_string());
//! assert_eq!(greeting, "hi");
//!
//! let answer = orchestrator
//!     .branch("is greeting", || greeting == "hi")
//!     .on_true(|_| "yes")
//!     .on_false(|_| "no");
//! assert_eq!(answer, "yes");
//!
//! println!("{}", orchestrator.render_history(true));
//! ```

#![warn(missing_docs)]

/// Actions: the units of work an orchestrator runs
pub mod action;

/// Configuration loading for orchestrators
pub mod config;

/// Error types
pub mod error;

/// Invocation history
pub mod history;

/// The orchestrator and its branch/iteration continuations
pub mod orchestrator;

/// The success/failure outcome type
pub mod outcome;

/// Trace rendering
pub mod render;

pub use action::{Action, FnAction, FnInputAction, InputAction, WithInput};
pub use config::{ConfigError, OrchestratorConfig, YamlConfig};
pub use error::{FlowError, FlowResult};
pub use history::{History, InvocationRecord};
pub use orchestrator::{
    Branch, ForEach, ForEachIter, Orchestrator, RunId, TrueBranchResolved, BIND_KIND,
    BRANCH_KIND,
};
pub use outcome::Outcome;
pub use render::{
    TraceExport, TraceFormat, TraceRenderer, TERMINATED_SUCCESSFULLY, TERMINATED_UNSUCCESSFULLY,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Action, FnAction, FnInputAction, InputAction, Orchestrator, OrchestratorConfig, Outcome,
        TraceFormat,
    };
}
