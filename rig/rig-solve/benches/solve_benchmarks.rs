//! Benchmarks for orientation solving.
//!
//! Run with: cargo bench -p rig-solve
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p rig-solve -- --save-baseline main
//! 2. After changes: cargo bench -p rig-solve -- --baseline main

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use nalgebra::Point3;
use rig_solve::OrientationSolver;
use rig_types::Skeleton;

/// Synthesize a plausible pose by walking the hierarchy along slightly
/// perturbed rest directions.
fn synthetic_frame(skeleton: &Skeleton, phase: f64) -> Vec<Point3<f64>> {
    let mut positions = vec![Point3::origin(); skeleton.len()];
    for joint in skeleton.joints() {
        let rest = skeleton.rest_direction(joint.parent, joint.child);
        let wobble = 0.2 * (phase + joint.child as f64).sin();
        let direction = nalgebra::Vector3::new(rest.x + wobble, rest.y, rest.z - wobble);
        positions[joint.child] = positions[joint.parent] + direction * 0.1;
    }
    positions
}

fn bench_solve_frame(c: &mut Criterion) {
    let solver = OrientationSolver::new(Skeleton::metahuman());
    let frame = synthetic_frame(solver.skeleton(), 0.0);

    let mut group = c.benchmark_group("solve_frame");
    group.throughput(Throughput::Elements(solver.skeleton().joints().len() as u64));
    group.bench_function("metahuman_68", |b| {
        b.iter(|| solver.solve_frame(black_box(&frame)));
    });
    group.finish();
}

fn bench_solve_animation(c: &mut Criterion) {
    let solver = OrientationSolver::new(Skeleton::metahuman());
    let frames: Vec<Vec<Point3<f64>>> = (0..100)
        .map(|f| synthetic_frame(solver.skeleton(), f as f64 * 0.1))
        .collect();

    let mut group = c.benchmark_group("solve_animation");
    group.throughput(Throughput::Elements(frames.len() as u64));
    group.bench_function("metahuman_100_frames", |b| {
        b.iter(|| solver.solve_animation(black_box(&frames)));
    });
    group.finish();
}

criterion_group!(benches, bench_solve_frame, bench_solve_animation);
criterion_main!(benches);
