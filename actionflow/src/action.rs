//! Units of work invoked by the orchestrator
//!
//! An action is anything that can be run to produce an [`Outcome`]. There are
//! two shapes: [`Action`] takes no input, [`InputAction`] takes one. Each
//! implementation declares a static `kind` tag which is used to label the
//! execution trace.

use crate::Outcome;
use std::fmt;

/// A unit of work that takes no input
///
/// Expected failures must be reported as [`Outcome::Failure`]. Panicking is
/// reserved for programmer errors such as invalid construction arguments.
pub trait Action {
    /// The value produced on success
    type Output;

    /// Get the action kind used to label trace entries
    fn kind(&self) -> &'static str;

    /// Run the action once
    fn run(&self) -> Outcome<Self::Output>;
}

/// A unit of work that takes a single input argument
pub trait InputAction<I> {
    /// The value produced on success
    type Output;

    /// Get the action kind used to label trace entries
    fn kind(&self) -> &'static str;

    /// Run the action once with `input`
    fn run(&self, input: I) -> Outcome<Self::Output>;

    /// Capture an input so this action can be run as a no-argument [`Action`]
    fn with_input(&self, input: I) -> WithInput<'_, Self, I>
    where
        Self: Sized,
        I: Clone,
    {
        WithInput {
            action: self,
            input,
        }
    }
}

impl<A: Action + ?Sized> Action for &A {
    type Output = A::Output;

    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn run(&self) -> Outcome<Self::Output> {
        (**self).run()
    }
}

impl<I, A: InputAction<I> + ?Sized> InputAction<I> for &A {
    type Output = A::Output;

    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn run(&self, input: I) -> Outcome<Self::Output> {
        (**self).run(input)
    }
}

/// An [`InputAction`] paired with the input it will be run with
///
/// Created by [`InputAction::with_input`]. The input is cloned on every run.
pub struct WithInput<'a, A, I> {
    action: &'a A,
    input: I,
}

impl<A, I> Action for WithInput<'_, A, I>
where
    A: InputAction<I>,
    I: Clone,
{
    type Output = A::Output;

    fn kind(&self) -> &'static str {
        self.action.kind()
    }

    fn run(&self) -> Outcome<Self::Output> {
        self.action.run(self.input.clone())
    }
}

impl<A, I: fmt::Debug> fmt::Debug for WithInput<'_, A, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WithInput")
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

/// A closure run as a no-argument [`Action`] under an explicit kind tag
pub struct FnAction<F> {
    kind: &'static str,
    body: F,
}

impl<F, T> FnAction<F>
where
    F: Fn() -> Outcome<T>,
{
    /// Wrap `body` as an action labelled `kind`
    pub fn new(kind: &'static str, body: F) -> Self {
        Self { kind, body }
    }
}

impl<F, T> Action for FnAction<F>
where
    F: Fn() -> Outcome<T>,
{
    type Output = T;

    fn kind(&self) -> &'static str {
        self.kind
    }

    fn run(&self) -> Outcome<T> {
        (self.body)()
    }
}

impl<F> fmt::Debug for FnAction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAction").field("kind", &self.kind).finish()
    }
}

/// A closure run as an [`InputAction`] under an explicit kind tag
pub struct FnInputAction<F> {
    kind: &'static str,
    body: F,
}

impl<F> FnInputAction<F> {
    /// Wrap `body` as an input action labelled `kind`
    pub fn new(kind: &'static str, body: F) -> Self {
        Self { kind, body }
    }
}

impl<F, I, T> InputAction<I> for FnInputAction<F>
where
    F: Fn(I) -> Outcome<T>,
{
    type Output = T;

    fn kind(&self) -> &'static str {
        self.kind
    }

    fn run(&self, input: I) -> Outcome<T> {
        (self.body)(input)
    }
}

impl<F> fmt::Debug for FnInputAction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnInputAction")
            .field("kind", &self.kind)
            .finish()
    }
}
