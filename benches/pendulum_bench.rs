use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ncs_lab::dynamics::{Integrator, PendulumParams};
use ncs_lab::plant::Plant;

fn rk4_step_bench(c: &mut Criterion) {
    let params = PendulumParams::new(0.2, 0.5, 0.006, 0.3);
    let integrator = Integrator::new(&params);

    c.bench_function("rk4_single_step", |b| {
        b.iter(|| {
            let mut state = [0.0, 0.0, 0.087, 0.0];
            let mut t = 0.0;
            let mut states = Vec::new();
            integrator.step(&mut state, &mut t, black_box(1.0), black_box(0.001), &mut states);
            black_box(state)
        })
    });
}

fn plant_ten_second_simulate_bench(c: &mut Criterion) {
    let params = PendulumParams::new(0.2, 0.5, 0.006, 0.3);

    c.bench_function("plant_simulate_10s_at_1ms", |b| {
        b.iter(|| {
            let mut plant = Plant::new(params, 1.0, [0.0, 0.0, 0.087, 0.0]);
            let mut states = Vec::new();
            plant.simulate(black_box(10.0), black_box(0.001), &mut states);
            black_box(states.len())
        })
    });
}

criterion_group!(benches, rk4_step_bench, plant_ten_second_simulate_bench);
criterion_main!(benches);
