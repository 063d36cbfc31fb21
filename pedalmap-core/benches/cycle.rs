//! Per-cycle cost of the mapping engine
//!
//! The engine runs once per control tick, so this is the number that has to
//! fit the controller's loop budget.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pedalmap_core::{
    compute_command, CycleInput, EngineConfig, PedalMonitor, TorqueEngine,
};

fn bench_compute_command(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("compute_command");

    for (name, pedal) in [("forward", 80.0_f32), ("coast", 22.0), ("regen", 5.0)] {
        let input = CycleInput::new(pedal, pedal);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, input| {
            b.iter(|| compute_command(black_box(input), black_box(&config)))
        });
    }

    group.finish();
}

fn bench_monitor_to_controller(c: &mut Criterion) {
    let engine = TorqueEngine::new(EngineConfig::default()).expect("default config is valid");
    let mut monitor = PedalMonitor::from_config(engine.config()).expect("default calibration");
    let mut now = 0u64;

    c.bench_function("monitor_to_controller", |b| {
        b.iter(|| {
            now += 1;
            let reading = monitor.update(black_box(1500), black_box(2700), now);
            engine.cycle_controller(&reading.to_cycle_input(None))
        })
    });
}

criterion_group!(benches, bench_compute_command, bench_monitor_to_controller);
criterion_main!(benches);
