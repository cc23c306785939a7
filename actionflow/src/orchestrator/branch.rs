//! Branch continuations returned by [`Orchestrator::branch`]
//!
//! `branch(..)` decides, `on_true(..)` runs the true path if the decision was
//! true, and `on_false(..)` either returns the true path's result or runs the
//! false path. Exactly one of the two caller closures is invoked.

use super::Orchestrator;

/// A decided condition waiting for its true branch
#[must_use = "a Branch does nothing until on_true and on_false are called"]
pub struct Branch<'a> {
    orchestrator: &'a mut Orchestrator,
    decision: bool,
}

impl<'a> Branch<'a> {
    pub(super) fn new(orchestrator: &'a mut Orchestrator, decision: bool) -> Self {
        Self {
            orchestrator,
            decision,
        }
    }

    /// The evaluated condition
    pub fn decision(&self) -> bool {
        self.decision
    }

    /// Run `on_true` if the condition held
    pub fn on_true<R, F>(self, on_true: F) -> TrueBranchResolved<'a, R>
    where
        F: FnOnce(&mut Orchestrator) -> R,
    {
        let Branch {
            orchestrator,
            decision,
        } = self;

        let true_result = if decision {
            tracing::trace!("Running If true branch");
            Some(on_true(&mut *orchestrator))
        } else {
            None
        };

        TrueBranchResolved {
            orchestrator,
            true_result,
        }
    }
}

/// A branch whose true path has been resolved, waiting for the false path
#[must_use = "the branch result is only available from on_false"]
pub struct TrueBranchResolved<'a, R> {
    orchestrator: &'a mut Orchestrator,
    true_result: Option<R>,
}

impl<R> TrueBranchResolved<'_, R> {
    /// Whether the true branch actually ran
    pub fn true_branch_ran(&self) -> bool {
        self.true_result.is_some()
    }

    /// Return the true branch's result, or run `on_false` if it did not run
    pub fn on_false<F>(self, on_false: F) -> R
    where
        F: FnOnce(&mut Orchestrator) -> R,
    {
        match self.true_result {
            Some(result) => result,
            None => {
                tracing::trace!("Running If false branch");
                on_false(self.orchestrator)
            }
        }
    }
}
