//! Property tests for the Outcome laws

use actionflow::Outcome;
use proptest::prelude::*;
use std::cell::Cell;

fn arb_outcome() -> impl Strategy<Value = Outcome<i64>> {
    prop_oneof![
        any::<i64>().prop_map(Outcome::success),
        Just(Outcome::failure()),
    ]
}

/// A binder that fails for values divisible by `divisor`
fn failing_on(divisor: i64) -> impl Fn(i64) -> Outcome<i64> {
    move |v| {
        if divisor != 0 && v.wrapping_rem(divisor) == 0 {
            Outcome::failure()
        } else {
            Outcome::success(v.wrapping_mul(3))
        }
    }
}

proptest! {
    #[test]
    fn test_success_is_success(value in any::<i64>()) {
        prop_assert!(Outcome::success(value).is_success());
        prop_assert!(!Outcome::<i64>::failure().is_success());
    }

    #[test]
    fn test_match_calls_exactly_one_projection(outcome in arb_outcome()) {
        let calls = Cell::new(0);
        let was_success = outcome.is_success();
        let took_success_path = outcome.match_with(
            |_| {
                calls.set(calls.get() + 1);
                true
            },
            || {
                calls.set(calls.get() + 1);
                false
            },
        );
        prop_assert_eq!(calls.get(), 1);
        prop_assert_eq!(took_success_path, was_success);
    }

    #[test]
    fn test_bind_is_associative(
        outcome in arb_outcome(),
        first_divisor in -5i64..5,
        second_divisor in -5i64..5,
    ) {
        let f = failing_on(first_divisor);
        let g = failing_on(second_divisor);

        let left = outcome.bind(&f).bind(&g);
        let right = outcome.bind(|x| f(x).bind(&g));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn test_failure_never_invokes_binder(divisor in -5i64..5) {
        let calls = Cell::new(0);
        let f = failing_on(divisor);
        let result = Outcome::<i64>::failure().bind(|x| {
            calls.set(calls.get() + 1);
            f(x)
        });
        prop_assert!(result.is_failure());
        prop_assert_eq!(calls.get(), 0);
    }
}
