//! Traced iteration returned by [`Orchestrator::for_each`]

use super::Orchestrator;
use crate::{FlowError, FlowResult, InputAction, Outcome};
use std::convert::identity;
use std::ops::Range;
use std::time::Instant;

/// A sequence wrapped for traced iteration
///
/// Single pass: mapping consumes it, and iterating again requires a fresh
/// call to [`Orchestrator::for_each`].
#[must_use = "ForEach does nothing until mapped and consumed"]
pub struct ForEach<'a, It, A> {
    orchestrator: &'a mut Orchestrator,
    name: String,
    items: It,
    action: &'a A,
    len: usize,
    window: Range<usize>,
}

impl<'a, It, A> ForEach<'a, It, A>
where
    It: ExactSizeIterator,
    A: InputAction<It::Item>,
{
    pub(super) fn new(orchestrator: &'a mut Orchestrator, name: &str, items: It, action: &'a A) -> Self {
        let len = items.len();
        Self {
            orchestrator,
            name: name.to_string(),
            items,
            action,
            len,
            window: 0..len,
        }
    }

    /// Number of items in the wrapped sequence
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the wrapped sequence is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Only run the action for items whose index lies in `[start, end)`
    ///
    /// Indices keep counting from the start of the sequence, so the trace
    /// shows the same index an item would have without a window.
    pub fn window(mut self, window: Range<usize>) -> FlowResult<Self> {
        if window.start > window.end {
            return Err(FlowError::InvalidWindow {
                start: window.start,
                end: window.end,
            });
        }
        self.window = window;
        Ok(self)
    }

    /// Lazily run the action for each item and project every outcome
    pub fn map<U, P>(self, projection: P) -> ForEachIter<'a, It, A, P>
    where
        P: FnMut(Outcome<A::Output>) -> U,
    {
        ForEachIter {
            orchestrator: self.orchestrator,
            name: self.name,
            items: self.items,
            action: self.action,
            len: self.len,
            window: self.window,
            index: 0,
            projection,
        }
    }

    /// Lazily run the action for each item, yielding raw outcomes
    #[allow(clippy::type_complexity)]
    pub fn outcomes(
        self,
    ) -> ForEachIter<'a, It, A, fn(Outcome<A::Output>) -> Outcome<A::Output>> {
        self.map(identity as fn(Outcome<A::Output>) -> Outcome<A::Output>)
    }
}

/// Lazy iterator produced by [`ForEach::map`]
///
/// Each call to `next` runs the action on at most one item.
pub struct ForEachIter<'a, It, A, P> {
    orchestrator: &'a mut Orchestrator,
    name: String,
    items: It,
    action: &'a A,
    len: usize,
    window: Range<usize>,
    index: usize,
    projection: P,
}

impl<It, A, P, U> Iterator for ForEachIter<'_, It, A, P>
where
    It: Iterator,
    A: InputAction<It::Item>,
    P: FnMut(Outcome<A::Output>) -> U,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        loop {
            // Past the window there is nothing left to project
            if self.index >= self.window.end {
                return None;
            }

            let item = self.items.next()?;
            let index = self.index;
            self.index += 1;

            if index < self.window.start {
                tracing::trace!(
                    "Skipping iteration {}/{} outside window {:?}",
                    index,
                    self.len,
                    self.window
                );
                continue;
            }

            tracing::trace!("On iteration {}/{}", index, self.len);

            let kind = self.action.kind();
            let start = Instant::now();
            let outcome = self.action.run(item);
            let step_name = format!("{}[{}]", self.name, index);
            self.orchestrator
                .record(Some(&step_name), kind, outcome.is_success(), start.elapsed());

            return Some((self.projection)(outcome));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let end = self.window.end.min(self.len);
        let start = self.window.start.max(self.index);
        (0, Some(end.saturating_sub(start)))
    }
}
