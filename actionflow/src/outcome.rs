//! Success/failure result type used at every engine boundary
//!
//! An [`Outcome`] is either a produced value or an explicit failure with no
//! payload. Expected failures of an action are always reported this way and
//! never as an `Err` or a panic.

/// The result of running an action: a value, or a failure without payload.
///
/// There is no sentinel encoding of failure. `Outcome::success(None::<u32>)`
/// is a successful outcome that happens to carry an `Option`, and is never
/// confused with [`Outcome::Failure`].
///
/// The payload can only be read through [`Outcome::match_with`], which forces
/// the caller to handle both states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "an Outcome may be a Failure that should be handled"]
pub enum Outcome<T> {
    /// A value was produced
    Success(T),
    /// No value could be produced
    Failure,
}

impl<T> Outcome<T> {
    /// Create a successful outcome carrying `value`
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    /// Create a failed outcome
    pub fn failure() -> Self {
        Outcome::Failure
    }

    /// True if this outcome was constructed with [`Outcome::success`]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// True if this outcome is a failure
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Apply exactly one of the two projections and return its result.
    ///
    /// `on_success` receives the payload; `on_failure` is called with no
    /// arguments. Exactly one of them runs.
    pub fn match_with<U, S, F>(self, on_success: S, on_failure: F) -> U
    where
        S: FnOnce(T) -> U,
        F: FnOnce() -> U,
    {
        match self {
            Outcome::Success(value) => on_success(value),
            Outcome::Failure => on_failure(),
        }
    }

    /// Chain a fallible computation onto a successful outcome.
    ///
    /// On failure the binder is not called and the failure propagates.
    pub fn bind<U, B>(self, binder: B) -> Outcome<U>
    where
        B: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Outcome::Success(value) => binder(value),
            Outcome::Failure => Outcome::Failure,
        }
    }

    /// Transform the payload of a successful outcome
    pub fn map<U, M>(self, mapper: M) -> Outcome<U>
    where
        M: FnOnce(T) -> U,
    {
        self.bind(|value| Outcome::Success(mapper(value)))
    }

    /// Borrow the payload without consuming the outcome
    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure => Outcome::Failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_success_and_failure_flags() {
        assert!(Outcome::success("hi").is_success());
        assert!(!Outcome::<&str>::failure().is_success());
        assert!(Outcome::<&str>::failure().is_failure());
    }

    #[test]
    fn test_success_carrying_none_is_still_success() {
        let outcome: Outcome<Option<u32>> = Outcome::success(None);
        assert!(outcome.is_success());
        let seen = outcome.match_with(|inner| inner.is_none(), || false);
        assert!(seen);
    }

    #[test]
    fn test_match_with_calls_exactly_one_projection() {
        let success_calls = Cell::new(0);
        let failure_calls = Cell::new(0);

        let value = Outcome::success(2).match_with(
            |v| {
                success_calls.set(success_calls.get() + 1);
                v * 10
            },
            || {
                failure_calls.set(failure_calls.get() + 1);
                -1
            },
        );
        assert_eq!(value, 20);
        assert_eq!((success_calls.get(), failure_calls.get()), (1, 0));

        let value = Outcome::<i32>::failure().match_with(
            |v| {
                success_calls.set(success_calls.get() + 1);
                v
            },
            || {
                failure_calls.set(failure_calls.get() + 1);
                -1
            },
        );
        assert_eq!(value, -1);
        assert_eq!((success_calls.get(), failure_calls.get()), (1, 1));
    }

    #[test]
    fn test_bind_on_failure_never_calls_binder() {
        let calls = Cell::new(0);
        let result = Outcome::<String>::failure().bind(|s| {
            calls.set(calls.get() + 1);
            Outcome::success(format!("{s}!"))
        });
        assert_eq!(result, Outcome::Failure);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_bind_on_success_chains() {
        let result = Outcome::success("hi".to_string()).bind(|s| Outcome::success(format!("{s}!")));
        assert_eq!(result, Outcome::success("hi!".to_string()));
    }

    #[test]
    fn test_map() {
        assert_eq!(Outcome::success(3).map(|v| v + 1), Outcome::success(4));
        assert_eq!(Outcome::<i32>::failure().map(|v| v + 1), Outcome::Failure);
    }

    #[test]
    fn test_as_ref_keeps_original() {
        let outcome = Outcome::success(vec![1, 2, 3]);
        let len = outcome.as_ref().match_with(|v| v.len(), || 0);
        assert_eq!(len, 3);
        assert!(outcome.is_success());
    }
}
