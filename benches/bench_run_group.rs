// benches/bench_run_group.rs

use bridge_traffic::{BridgeMonitor, Dispatcher, GroupConfig};
use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion,
    PlotConfiguration,
};
use std::sync::Arc;
use std::time::Duration;

fn bench_run_group_batches(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let batch_sizes = [10, 50, 200];

    let mut group = c.benchmark_group("run_group");
    group.sample_size(20);
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Linear));

    for &batch_size in &batch_sizes {
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &batch_size,
            |b, &size| {
                b.iter(|| {
                    rt.block_on(async {
                        // Zero crossing time so only monitor contention is measured.
                        let monitor = Arc::new(BridgeMonitor::new());
                        let mut dispatcher = Dispatcher::new(monitor, Duration::ZERO, Some(17));
                        let vehicles = dispatcher.generate_group(&GroupConfig {
                            vehicles: size,
                            forward_probability: 50,
                            delay_secs: 0,
                        });
                        let records = dispatcher.run_group(1, vehicles).await.unwrap();
                        black_box(records);
                    })
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_run_group_batches);
criterion_main!(benches);
