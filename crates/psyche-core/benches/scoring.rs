use criterion::{black_box, criterion_group, criterion_main, Criterion};

use psyche_core::engine::SessionEngine;
use psyche_core::model::QUESTIONS;
use psyche_core::narrative::build_narrative;
use psyche_core::statistics::{AxisScores, Profile};

fn make_scores(ratings: [f64; 12]) -> AxisScores {
    let mut scores = AxisScores::new();
    for (question, value) in QUESTIONS.iter().zip(ratings) {
        scores.record(question.axis, value);
    }
    scores
}

fn bench_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile");

    group.bench_function("uniform", |b| {
        let scores = make_scores([4.0; 12]);
        b.iter(|| Profile::from_scores(black_box(&scores)))
    });

    group.bench_function("spread", |b| {
        let scores = make_scores([5.0, 4.0, 5.0, 1.0, 5.0, 4.0, 1.0, 5.0, 4.0, 1.0, 5.0, 4.0]);
        b.iter(|| Profile::from_scores(black_box(&scores)))
    });

    group.bench_function("narrative", |b| {
        let profile = Profile::from_scores(&make_scores([2.0; 12]));
        b.iter(|| build_narrative(black_box(&profile)))
    });

    group.finish();
}

fn bench_full_session(c: &mut Criterion) {
    let engine = SessionEngine::new();

    c.bench_function("session/start_to_complete", |b| {
        b.iter(|| {
            let id = engine.start_session().session_id;
            for _ in 0..QUESTIONS.len() {
                let _ = engine.submit_answer(&id, black_box(3.0));
            }
        })
    });
}

criterion_group!(benches, bench_profile, bench_full_session);
criterion_main!(benches);
