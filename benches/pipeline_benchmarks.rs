//! Benchmarks for the full per-tick pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use screen_punch::{
    assets::SequentialPicker,
    clock::ManualClock,
    config::Config,
    pipeline::PunchPipeline,
    skeleton::{RawBodyFrame, RawJoint, SensorFrame},
};
use std::sync::Arc;

/// Upright body with the right hand `reach` metres in front of the torso
fn body(reach: f64, jitter: f64) -> RawBodyFrame {
    let j = |x: f64, y: f64, z: f64| RawJoint::tracked(x + jitter, y + jitter, z);
    RawBodyFrame {
        tracked: true,
        neck: j(0.0, 0.5, 2.0),
        spine_base: j(0.0, -0.1, 2.0),
        shoulder_left: j(-0.2, 0.5, 2.0),
        shoulder_right: j(0.2, 0.5, 2.0),
        elbow_left: j(-0.2, 0.2, 2.0),
        elbow_right: j(0.2, 0.2, 2.0),
        wrist_left: j(-0.2, -0.05, 2.0),
        wrist_right: j(0.2, -0.05, 2.0),
        hand_left: j(-0.2, -0.1, 2.0),
        hand_right: j(0.2, 0.3, 2.0 - reach),
    }
}

fn pipeline(clock: &ManualClock) -> PunchPipeline {
    PunchPipeline::with_collaborators(
        &Config::default(),
        Arc::new(clock.clone()),
        Box::new(SequentialPicker::new(0.5)),
    )
    .unwrap()
}

fn benchmark_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_tick");
    let clock = ManualClock::new();

    let idle = SensorFrame::single(body(0.1, 0.0));
    let mut p = pipeline(&clock);
    group.bench_function("tracked_idle", |b| b.iter(|| black_box(p.process_frame(black_box(&idle)))));

    let empty = SensorFrame::empty();
    let mut p = pipeline(&clock);
    group.bench_function("no_body", |b| b.iter(|| black_box(p.process_frame(black_box(&empty)))));

    let mut crowd = vec![body(0.0, 0.01); 5];
    for ghost in &mut crowd[..4] {
        ghost.tracked = false;
    }
    let crowd = SensorFrame { bodies: crowd };
    let mut p = pipeline(&clock);
    group.bench_function("five_bodies", |b| b.iter(|| black_box(p.process_frame(black_box(&crowd)))));

    group.finish();
}

fn benchmark_punch_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("punch_sequence");

    for length in [30usize, 300] {
        // Repeated jabs with sensor noise
        let frames: Vec<SensorFrame> = (0..length)
            .map(|i| {
                let phase = (i % 10) as f64 / 10.0;
                let jitter = 0.005 * rand::random::<f64>();
                SensorFrame::single(body(0.6 * phase, jitter))
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("frames", length), &frames, |b, frames| {
            let clock = ManualClock::new();
            let mut p = pipeline(&clock);
            b.iter(|| {
                p.reset();
                for frame in frames {
                    clock.advance(std::time::Duration::from_millis(33));
                    black_box(p.process_frame(frame));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_tick, benchmark_punch_sequence);
criterion_main!(benches);
