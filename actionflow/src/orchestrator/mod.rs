//! The execution engine
//!
//! An [`Orchestrator`] runs actions, threads their outcomes together and
//! records every invocation into its own [`History`]. All operations are
//! synchronous: each call blocks until the invoked action returns, and there
//! is no timeout or cancellation.
//!
//! An orchestrator is meant to be driven by one workflow on one thread. Every
//! operation takes `&mut self`, so sharing an instance across threads requires
//! the caller to wrap it in a lock.

mod branch;
mod iteration;

pub use branch::{Branch, TrueBranchResolved};
pub use iteration::{ForEach, ForEachIter};

use crate::{
    Action, FlowResult, History, InputAction, InvocationRecord, Outcome, OrchestratorConfig,
    TraceFormat, TraceRenderer,
};
use std::fmt;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use ulid::Ulid;

/// Kind tag recorded for [`Orchestrator::bind`]
pub const BIND_KIND: &str = "Bind";

/// Kind tag recorded for [`Orchestrator::branch`]
pub const BRANCH_KIND: &str = "If";

/// Unique identifier for one orchestrator instance, used to correlate logs
/// and exported traces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(Ulid);

impl RunId {
    /// Create a new random run ID
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Workflow execution engine
#[derive(Debug)]
pub struct Orchestrator {
    run_id: RunId,
    history: History,
    renderer: TraceRenderer,
}

impl Orchestrator {
    /// Create an orchestrator with default settings
    pub fn new() -> Self {
        Self {
            run_id: RunId::new(),
            history: History::new(),
            renderer: TraceRenderer::new(),
        }
    }

    /// Create an orchestrator with the given settings
    ///
    /// Fails if the settings do not pass [`OrchestratorConfig::validate`].
    pub fn with_config(config: OrchestratorConfig) -> FlowResult<Self> {
        config.validate()?;
        let max_history_size = config.max_history_size.and_then(NonZeroUsize::new);
        Ok(Self {
            run_id: RunId::new(),
            history: History::with_max_size(max_history_size),
            renderer: TraceRenderer {
                include_timing: config.include_timing,
            },
        })
    }

    /// Identifier of this orchestrator instance
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Run `action` once, record it and return its outcome
    pub fn execute<A: Action>(&mut self, name: Option<&str>, action: &A) -> Outcome<A::Output> {
        let kind = action.kind();
        let span = tracing::debug_span!(
            "execute",
            run_id = %self.run_id,
            name = name.unwrap_or(kind),
            kind
        );
        let _entered = span.enter();

        match name {
            Some(name) => tracing::trace!("Running {}:{}", name, kind),
            None => tracing::trace!("Running {}", kind),
        }

        let start = Instant::now();
        let outcome = action.run();
        self.record(name, kind, outcome.is_success(), start.elapsed());

        outcome
    }

    /// Run `action` once, record it, then project its outcome with
    /// `on_success` or `on_failure`
    pub fn execute_match<A, U, S, F>(
        &mut self,
        name: Option<&str>,
        action: &A,
        on_success: S,
        on_failure: F,
    ) -> U
    where
        A: Action,
        S: FnOnce(A::Output) -> U,
        F: FnOnce() -> U,
    {
        self.execute(name, action).match_with(on_success, on_failure)
    }

    /// Chain `binder` onto an outcome produced earlier
    ///
    /// Only the binder's own execution is timed. A failed `previous` skips the
    /// binder but is still recorded, as a failure, so the trace stays complete.
    pub fn bind<T, U, B>(&mut self, name: &str, previous: Outcome<T>, binder: B) -> Outcome<U>
    where
        B: FnOnce(T) -> Outcome<U>,
    {
        let span = tracing::debug_span!("bind", run_id = %self.run_id, name);
        let _entered = span.enter();

        if previous.is_failure() {
            tracing::trace!("{}: previous outcome failed, skipping binder", name);
        } else {
            tracing::trace!("Running {}", name);
        }

        let start = Instant::now();
        let outcome = previous.bind(binder);
        self.record(Some(name), BIND_KIND, outcome.is_success(), start.elapsed());

        outcome
    }

    /// Evaluate `condition` once, record the decision and return a
    /// continuation that runs exactly one of the two branches
    pub fn branch<C>(&mut self, name: &str, condition: C) -> Branch<'_>
    where
        C: FnOnce() -> bool,
    {
        let span = tracing::debug_span!("branch", run_id = %self.run_id, name);
        let _entered = span.enter();

        tracing::info!("{}: Running {}", name, BRANCH_KIND);
        let start = Instant::now();
        let decision = condition();
        self.record(Some(name), BRANCH_KIND, decision, start.elapsed());
        tracing::info!("{}: condition evaluated to {}", name, decision);

        Branch::new(self, decision)
    }

    /// Wrap `items` for traced, lazy iteration with `action`
    ///
    /// Nothing runs until the returned continuation is mapped and consumed.
    /// The item count is taken up front from the iterator's exact length.
    pub fn for_each<'a, S, A>(
        &'a mut self,
        name: &str,
        items: S,
        action: &'a A,
    ) -> ForEach<'a, S::IntoIter, A>
    where
        S: IntoIterator,
        S::IntoIter: ExactSizeIterator,
        A: InputAction<S::Item>,
    {
        let items = items.into_iter();
        tracing::debug!(
            run_id = %self.run_id,
            "{}: preparing iteration over {} items with {}",
            name,
            items.len(),
            action.kind()
        );
        ForEach::new(self, name, items, action)
    }

    /// The recorded history, oldest first
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Render the history as a text trace without clearing it
    pub fn render_history(&self, final_success: bool) -> String {
        self.renderer
            .render_text(self.history.records(), final_success)
    }

    /// Render the history in `format` without clearing it
    pub fn render_history_as(&self, format: TraceFormat, final_success: bool) -> FlowResult<String> {
        self.renderer.render(
            format,
            &self.run_id.to_string(),
            self.history.records(),
            final_success,
        )
    }

    /// Render the history as a text trace and clear it
    ///
    /// Use this in long-running workflows to keep the history from growing
    /// between reports.
    pub fn take_history(&mut self, final_success: bool) -> String {
        let records = self.history.drain();
        self.renderer.render_text(&records, final_success)
    }

    pub(crate) fn record(
        &mut self,
        name: Option<&str>,
        kind: &str,
        success: bool,
        elapsed: Duration,
    ) {
        tracing::debug!(
            "Recorded {} ({}): success={} in {:?}",
            name.unwrap_or("-"),
            kind,
            success,
            elapsed
        );
        self.history
            .record(InvocationRecord::new(name, kind, success, elapsed));
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
