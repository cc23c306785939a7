use actionflow::{FnAction, FnInputAction, Orchestrator, OrchestratorConfig, Outcome, TraceFormat};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_execute(c: &mut Criterion) {
    let action = FnAction::new("Constant", || Outcome::success(42u64));

    c.bench_function("execute and record", |b| {
        b.iter(|| {
            let mut orchestrator = Orchestrator::new();
            for _ in 0..100 {
                let _ = orchestrator.execute(Some("step"), black_box(&action));
            }
            orchestrator
        });
    });
}

fn benchmark_bind_chain(c: &mut Criterion) {
    c.bench_function("bind chain of 100", |b| {
        b.iter(|| {
            let mut orchestrator = Orchestrator::new();
            let mut outcome = Outcome::success(0u64);
            for _ in 0..100 {
                outcome = orchestrator.bind("increment", outcome, |v| Outcome::success(v + 1));
            }
            black_box(outcome)
        });
    });
}

fn benchmark_iteration(c: &mut Criterion) {
    let double = FnInputAction::new("Double", |v: u64| Outcome::success(v * 2));
    let items: Vec<u64> = (0..1000).collect();

    c.bench_function("for_each over 1000 items", |b| {
        b.iter(|| {
            let mut orchestrator = Orchestrator::new();
            let total: u64 = orchestrator
                .for_each("double", items.iter().copied(), &double)
                .map(|o| o.match_with(|v| v, || 0))
                .sum();
            black_box(total)
        });
    });
}

fn benchmark_rendering(c: &mut Criterion) {
    let action = FnAction::new("Constant", || Outcome::success(()));
    let mut orchestrator = Orchestrator::with_config(OrchestratorConfig::default())
        .expect("default settings are valid");
    for _ in 0..500 {
        let _ = orchestrator.execute(Some("step"), &action);
    }

    c.bench_function("render text trace of 500 steps", |b| {
        b.iter(|| black_box(orchestrator.render_history(true)));
    });

    c.bench_function("render mermaid trace of 500 steps", |b| {
        b.iter(|| black_box(orchestrator.render_history_as(TraceFormat::Mermaid, true)));
    });
}

criterion_group!(
    benches,
    benchmark_execute,
    benchmark_bind_chain,
    benchmark_iteration,
    benchmark_rendering
);
criterion_main!(benches);
