// benches/bench_bridge_monitor.rs

use bridge_traffic::bridge::lane::Lane;
use bridge_traffic::bridge::state::BridgeState;
use bridge_traffic::simulation_engine::vehicles::{Direction, Vehicle, WeightClass};
use bridge_traffic::BridgeMonitor;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

fn bench_entry_and_departure(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let monitor = BridgeMonitor::new();
    let car = Vehicle::new(1, WeightClass::Light, Direction::Forward);

    let mut group = c.benchmark_group("bridge_monitor");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("uncontended_entry_departure", |b| {
        b.iter(|| {
            rt.block_on(async {
                let admission = monitor.request_entry(black_box(car)).await;
                black_box(monitor.record_departure(admission));
            })
        });
    });

    group.bench_function("try_admit_on_busy_lanes", |b| {
        let southbound = Lane {
            direction: Some(Direction::Reverse),
            occupants: 1,
        };
        let mut state = BridgeState::with_lanes(4, southbound.clone(), southbound);
        b.iter(|| black_box(state.try_admit(black_box(&car))));
    });

    group.finish();
}

criterion_group!(benches, bench_entry_and_departure);
criterion_main!(benches);
