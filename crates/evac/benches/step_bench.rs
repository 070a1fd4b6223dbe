//! Criterion benchmarks for one evacuation step on Manhattan grids.
//! Sizes: half-extent in {5, 10, 20} (121 to 1681 intersections).
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use evac::prelude::*;

fn seeded(half: u32) -> EvacuationState {
    let map = grid_city(half, 1.0, 4.0);
    let cfg = EvacCfg {
        seed: 42,
        ..EvacCfg::default()
    };
    let mut s = EvacuationState::from_roadmap(&map, 50 * u64::from(half * half), cfg).unwrap();
    s.set_hazard_radius(0.25 * f64::from(half));
    s
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("evac");
    for &half in &[5u32, 10, 20] {
        group.bench_with_input(BenchmarkId::new("next_state", half), &half, |b, &half| {
            b.iter_batched(
                || seeded(half),
                |mut s| {
                    let _summary = s.next_state().unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("snapshot_zero_flow", half), &half, |b, &half| {
            let s = seeded(half);
            let g = s.road_network().unwrap();
            b.iter(|| g.snapshot_zero_flow())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
