use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use dot_dispatch::math::dot_product::{available_kernels, dot_product, Kernel};
use dot_dispatch::utils::random_operands;

fn dot_product_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot_product");

    for size in [64usize, 256, 1024] {
        let (a, b) = random_operands(size, 0x00d0_7d07);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("baseline", size), &size, |bench, _| {
            let kernel = Kernel::baseline();
            bench.iter(|| kernel.dot(black_box(&a), black_box(&b)))
        });

        group.bench_with_input(BenchmarkId::new("dispatched", size), &size, |bench, _| {
            bench.iter(|| dot_product(black_box(&a), black_box(&b)))
        });

        for kernel in available_kernels().into_iter().skip(1) {
            group.bench_with_input(BenchmarkId::new(kernel.name(), size), &size, |bench, _| {
                bench.iter(|| kernel.dot(black_box(&a), black_box(&b)))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, dot_product_benchmark);
criterion_main!(benches);
