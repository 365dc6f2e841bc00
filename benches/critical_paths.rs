//! Criterion benchmarks for beatloop critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Position algebra: table-driven grid transforms
//! - Validation sets: end-position lookup
//! - Detector: LOOP classification of complete sequences
//! - Planner: closing a partial sequence

use beatloop::detect::Detector;
use beatloop::extend::{analyze_sequence, Planner};
use beatloop::loops::{validation_sets, LoopType, SliceSize};
use beatloop::models::{Beat, GridPosition, MotionType, Sequence};
use beatloop::transforms::{BeatTransform, GridTransform, Rotation};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Partial sequence of `n` beats walking clockwise around the alpha ring.
fn make_partial(n: usize) -> Sequence {
    let mut seq = Sequence::starting_at(GridPosition::Alpha1);
    let mut current = GridPosition::Alpha1;
    for _ in 0..n {
        let next = GridTransform::RotateCw.position(current);
        seq.push(Beat::between(0, current, next, MotionType::Pro, MotionType::Anti));
        current = next;
    }
    seq
}

/// Complete rotated LOOP of `2 * n` beats.
fn make_rotated_loop(n: usize) -> Sequence {
    let first = make_partial(n);
    let step = BeatTransform::rotated(Rotation::Half);
    let mut seq = first.clone();
    for beat in &first.beats {
        if let Ok(next) = step.apply(beat) {
            seq.push(next);
        }
    }
    seq
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("positions");

    group.throughput(Throughput::Elements(GridPosition::COUNT as u64));
    for transform in GridTransform::ALL {
        group.bench_function(transform.as_str(), |b| {
            b.iter(|| {
                for p in GridPosition::ALL {
                    black_box(transform.position(black_box(p)));
                }
            })
        });
    }

    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");

    // Warm the lazily built table outside the measurement
    let sets = validation_sets();

    group.bench_function("required_end_all", |b| {
        b.iter(|| {
            for loop_type in LoopType::ALL {
                for slice in [SliceSize::Halved, SliceSize::Quartered] {
                    black_box(sets.required_end(loop_type, slice, black_box(GridPosition::Gamma3)));
                }
            }
        })
    });

    group.bench_function("analyze_sequence", |b| {
        let seq = make_partial(2);
        b.iter(|| analyze_sequence(black_box(&seq)))
    });

    group.finish();
}

fn bench_detector(c: &mut Criterion) {
    let mut group = c.benchmark_group("detector");
    let detector = Detector::default();

    for half in [2, 8, 32, 128].iter() {
        let seq = make_rotated_loop(*half);
        group.throughput(Throughput::Elements(seq.len() as u64));
        group.bench_with_input(BenchmarkId::new("detect_rotated", seq.len()), &seq, |b, seq| {
            b.iter(|| detector.detect(black_box(seq)))
        });
    }

    group.finish();
}

/// Beat counts are 2 mod 4 so the partial always ends a half turn from its start.
fn bench_planner(c: &mut Criterion) {
    let mut group = c.benchmark_group("planner");
    let planner = Planner::default();

    for n in [2, 18, 66].iter() {
        let seq = make_partial(*n);
        group.bench_with_input(BenchmarkId::new("extend_rotated", n), &seq, |b, seq| {
            b.iter(|| planner.extend(black_box(seq), LoopType::StrictRotated))
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_positions, bench_validation, bench_detector, bench_planner);

criterion_main!(benches);
