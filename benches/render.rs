#[macro_use]
extern crate criterion;
extern crate histobrot;
extern crate num_cpus;

use criterion::{BenchmarkId, Criterion};
use histobrot::{PlaneMapper, RowRenderer};

fn worker_pool(criterion: &mut Criterion) {
    let plane = PlaneMapper::mandelbrot(400, 228).unwrap();
    let mut group = criterion.benchmark_group("render 400x228");
    group.sample_size(10);

    let mut threads = 1;
    while threads <= num_cpus::get() {
        group.bench_with_input(BenchmarkId::new("histogram", threads), &threads, |b, &t| {
            b.iter(|| RowRenderer::new(plane, 500, t).render().unwrap())
        });
        group.bench_with_input(BenchmarkId::new("linear", threads), &threads, |b, &t| {
            b.iter(|| {
                RowRenderer::new(plane, 500, t)
                    .with_histogram(false)
                    .render()
                    .unwrap()
            })
        });
        threads *= 2;
    }
    group.finish();
}

criterion_group!(benches, worker_pool);
criterion_main!(benches);
