//! Utility modules for benchmarking and reporting.

pub mod bench;
pub mod cpu_affinity;
pub mod runner;
pub mod timer;
pub mod tui;

#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub mod cycles;

// Re-export commonly used items
pub use bench::{elapsed, now, random_operands, shuffle, time_seed, unit_name, Measurement};
pub use cpu_affinity::CpuPinGuard;
pub use runner::{export_csv, RawTimingData};
pub use timer::{measure_variants, PinStrategy, TimingConfig, Variant, VariantResult};

#[cfg(all(feature = "cpu_cycles", not(feature = "use_time")))]
pub use cycles::read_cycles;
