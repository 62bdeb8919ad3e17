//! Benchmark utilities for dot product.

use super::code::{available_kernels, Kernel};
use crate::utils::bench::Measurement;
use crate::utils::timer::{measure_variants, TimingConfig, Variant, VariantResult};
use std::hint::black_box;

/// Name of the row that goes through the dispatcher instead of a fixed kernel.
pub const DISPATCHED: &str = "dispatched";

/// Time `calls` invocations of `kernel` and return the per-call measurement
/// together with the last result.
#[inline(never)]
fn time_calls(kernel: &Kernel, a: &[f32], b: &[f32], calls: usize) -> (Measurement, f32) {
    let calls = calls.max(1);
    let (total, result) = crate::measure!({
        let mut result = 0.0;
        for _ in 0..calls {
            result = kernel.dot(black_box(a), black_box(b));
        }
        result
    });
    (per_call(total, calls), result)
}

#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
fn per_call(total: Measurement, calls: usize) -> Measurement {
    total / calls as u64
}

#[cfg(any(not(feature = "cpu_cycles"), feature = "use_time"))]
fn per_call(total: Measurement, calls: usize) -> Measurement {
    total / calls.min(u32::MAX as usize) as u32
}

/// Build one timing variant per kernel the host can run, plus the
/// dispatched path bound to `dispatched`.
pub fn kernel_variants<'a>(
    a: &'a [f32],
    b: &'a [f32],
    calls_per_sample: usize,
    dispatched: Kernel,
) -> Vec<Variant<'a>> {
    let mut variants: Vec<Variant<'a>> = available_kernels()
        .into_iter()
        .map(|kernel| Variant {
            name: kernel.name().to_string(),
            description: format!("[{}] {}", kernel.level(), kernel.description()),
            run: Box::new(move || time_calls(&kernel, a, b, calls_per_sample)),
        })
        .collect();

    variants.push(Variant {
        name: DISPATCHED.to_string(),
        description: format!("auto-selected -> {}", dispatched.name()),
        run: Box::new(move || time_calls(&dispatched, a, b, calls_per_sample)),
    });

    variants
}

/// Measure every kernel and the dispatched path on `a` and `b`.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn run_all_benchmarks(
    a: &[f32],
    b: &[f32],
    calls_per_sample: usize,
    dispatched: Kernel,
    config: &TimingConfig,
) -> Vec<VariantResult> {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");
    measure_variants(kernel_variants(a, b, calls_per_sample, dispatched), config)
}
