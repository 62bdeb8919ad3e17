//! Unified timing system for micro-benchmarks.
//!
//! This module provides the single timing infrastructure with:
//! - Support for both CPU cycles and wall-clock time (via features)
//! - Automatic CPU core pinning for stable measurements
//! - Randomized variant execution to avoid ordering bias
//! - All raw measurements preserved for external analysis

use std::hint::black_box;

use super::bench::{shuffle, time_seed, to_units, Measurement};
use super::cpu_affinity::CpuPinGuard;

// ============================================================================
// Configuration
// ============================================================================

/// CPU pinning strategy during measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Pin once before all measurements (minimal overhead)
    Global,
    /// Pin/unpin around each sample
    #[default]
    PerExecution,
    /// Leave scheduling to the OS
    None,
}

/// Configuration for timing measurements
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Number of samples to collect per variant (default: 30)
    pub runs_per_variant: usize,
    /// Number of warmup runs before measurement (default: 10)
    pub warmup_iterations: usize,
    /// CPU pinning strategy (default: PerExecution)
    pub pin_strategy: PinStrategy,
    /// Seed for the sample schedule; random when `None`
    pub schedule_seed: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            runs_per_variant: 30,
            warmup_iterations: 10,
            pin_strategy: PinStrategy::default(),
            schedule_seed: None,
        }
    }
}

/// A variant to be measured
pub struct Variant<'a> {
    /// Unique name of the variant
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Runs one sample and returns (per-call measurement, result value).
    /// Timing happens inside the closure to eliminate Fn trait overhead.
    pub run: Box<dyn FnMut() -> (Measurement, f32) + 'a>,
}

/// Statistics for one measured variant, in measurement units
/// (cycles, ticks or nanoseconds; see `bench::unit_name`).
#[derive(Clone, Debug)]
pub struct VariantResult {
    pub name: String,
    pub description: String,
    pub avg: f64,
    pub median: u64,
    pub min: u64,
    pub max: u64,
    pub std_dev: f64,
    /// Samples that went into the statistics
    pub samples: usize,
    /// Last result value returned by the variant
    pub result_sample: Option<f32>,
}

/// Measure multiple variants with randomized execution order.
///
/// 1. Warms up all variants
/// 2. Creates a randomized task schedule interleaving every variant
/// 3. Measures each sample under the configured pinning
/// 4. Returns statistics for all variants, in input order
pub fn measure_variants(mut variants: Vec<Variant>, config: &TimingConfig) -> Vec<VariantResult> {
    if variants.is_empty() {
        return Vec::new();
    }

    let samples = config.runs_per_variant;

    for variant in &mut variants {
        for _ in 0..config.warmup_iterations {
            black_box((variant.run)());
        }
    }

    let mut tasks: Vec<usize> = (0..variants.len())
        .flat_map(|v| std::iter::repeat(v).take(samples))
        .collect();
    shuffle(&mut tasks, config.schedule_seed.unwrap_or_else(time_seed));

    let mut measurements: Vec<Vec<Measurement>> = (0..variants.len())
        .map(|_| Vec::with_capacity(samples))
        .collect();
    let mut result_samples: Vec<Option<f32>> = vec![None; variants.len()];

    let _global_pin = (config.pin_strategy == PinStrategy::Global).then(CpuPinGuard::new);

    for variant_idx in tasks {
        let variant = &mut variants[variant_idx];
        let _per_exec_pin =
            (config.pin_strategy == PinStrategy::PerExecution).then(CpuPinGuard::new);
        let (elapsed, result) = (variant.run)();

        measurements[variant_idx].push(elapsed);
        result_samples[variant_idx] = Some(result);
    }

    tracing::trace!(
        variants = variants.len(),
        samples,
        "measurement schedule finished"
    );

    variants
        .into_iter()
        .zip(measurements)
        .zip(result_samples)
        .map(|((variant, times), result)| {
            compute_variant_result(variant.name, variant.description, &times, result)
        })
        .collect()
}

/// Compute statistics from raw measurements
fn compute_variant_result(
    name: String,
    description: String,
    measurements: &[Measurement],
    result_sample: Option<f32>,
) -> VariantResult {
    if measurements.is_empty() {
        return VariantResult {
            name,
            description,
            avg: 0.0,
            median: 0,
            min: 0,
            max: 0,
            std_dev: 0.0,
            samples: 0,
            result_sample: None,
        };
    }

    let mut units: Vec<u64> = measurements.iter().map(|m| to_units(*m)).collect();
    units.sort_unstable();

    let n = units.len();
    let avg = units.iter().sum::<u64>() as f64 / n as f64;
    let variance = units
        .iter()
        .map(|&u| {
            let diff = u as f64 - avg;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1).max(1) as f64;

    VariantResult {
        name,
        description,
        avg,
        median: units[n / 2],
        min: units[0],
        max: units[n - 1],
        std_dev: variance.sqrt(),
        samples: n,
        result_sample,
    }
}
