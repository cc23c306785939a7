//! The demo workflow
//!
//! Walks through every orchestrator operation with the sample actions: an
//! action with input, a failing action matched to a fallback, two chained
//! binds where the second fails, a branch whose true side runs a failing
//! action, a secret lookup and an iteration over caller supplied inputs.

use crate::samples::Wiring;
use actionflow::{Action, InputAction, Orchestrator};

/// What the demo workflow produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSummary {
    /// The workflow's final verdict: whether the secret lookup matched
    pub final_success: bool,
    /// Value returned by the branch
    pub branch_answer: String,
    /// One greeting per iteration input, or the fallback for failures
    pub greetings: Vec<String>,
}

/// Run the demo workflow on `orchestrator`
pub fn run_demo(orchestrator: &mut Orchestrator, wiring: &Wiring, inputs: &[String]) -> DemoSummary {
    let greeting = wiring.greeting();
    let failing = wiring.failing();

    let first = orchestrator.execute(
        Some("Action with param"),
        &greeting.with_input("SomeString".to_string()),
    );
    tracing::info!("Action with param succeeded: {}", first.is_success());

    let matched = orchestrator
        .execute(Some("call run inside"), &failing)
        .match_with(|value| value, || "failed as expected".to_string());
    tracing::info!("call run inside matched to {:?}", matched);

    let second = orchestrator.bind("bind 1", first, |value| greeting.run(value));
    let third = orchestrator.bind("bind 2", second, |_| failing.run());
    tracing::info!("The following word should be false: {}", third.is_success());

    let fallback = orchestrator.execute_match(
        Some("Run with match"),
        &failing,
        |value| value,
        || "fallback".to_string(),
    );
    tracing::info!("Run with match produced {:?}", fallback);

    let branch_answer = orchestrator
        .branch("first if", || true)
        .on_true(|o| o.execute_match(Some("on true"), &failing, |value| value, String::new))
        .on_false(|_| "this2".to_string());
    tracing::info!("first if answered {:?}", branch_answer);

    let final_success = orchestrator.execute_match(
        Some("Run with complex"),
        &wiring.secret_lookup(),
        |record| record.prop == "shhh",
        || false,
    );
    tracing::info!("Secret matched: {}", final_success);

    let greetings = orchestrator
        .for_each("greet each", inputs.iter().cloned(), &greeting)
        .map(|outcome| outcome.match_with(|value| value, || "no greeting".to_string()))
        .collect();

    DemoSummary {
        final_success,
        branch_answer,
        greetings,
    }
}
