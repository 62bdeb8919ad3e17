//! Benchmark CLI for the dot product kernels.
//!
//! Usage:
//!   dot-bench               # Measure every kernel at the default sizes
//!   dot-bench --list        # List compiled kernels
//!   dot-bench --level sse2  # Cap the dispatched row at SSE2
//!   dot-bench --help        # Show help

use dot_dispatch::math::dot_product::{self, bench, CapabilityLevel, Kernel};
use dot_dispatch::utils::{random_operands, time_seed, tui, RawTimingData, TimingConfig};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

/// Sizes checked before timing anything; odd lengths exercise every tail path.
const VERIFY_SIZES: [usize; 6] = [0, 1, 7, 33, 1023, 4099];

struct Options {
    show_list: bool,
    show_help: bool,
    sizes: Vec<usize>,
    iterations: usize,
    seed: Option<u64>,
    level: Option<CapabilityLevel>,
    csv_path: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            show_list: false,
            show_help: false,
            sizes: vec![64, 256, 1024, 4096, 16384],
            iterations: 10000,
            seed: None,
            level: None,
            csv_path: None,
        }
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--list" | "-l" => opts.show_list = true,
            "--help" | "-h" => opts.show_help = true,
            "--sizes" => {
                let value = iter.next().ok_or("--sizes needs a value")?;
                opts.sizes = value
                    .split(',')
                    .map(|s| {
                        s.trim()
                            .parse()
                            .map_err(|_| format!("invalid size '{}' in --sizes", s.trim()))
                    })
                    .collect::<Result<_, _>>()?;
            }
            "--iter" => {
                let value = iter.next().ok_or("--iter needs a value")?;
                opts.iterations = value
                    .parse()
                    .map_err(|_| format!("invalid --iter value '{}'", value))?;
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                opts.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --seed value '{}'", value))?,
                );
            }
            "--level" => {
                let value = iter.next().ok_or("--level needs a value")?;
                let level: CapabilityLevel = value.parse().map_err(|e| format!("{}", e))?;
                Kernel::best_up_to(level).map_err(|e| format!("{}", e))?;
                opts.level = Some(level);
            }
            "--csv" => {
                let value = iter.next().ok_or("--csv needs a value")?;
                opts.csv_path = Some(value.clone());
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
    }

    Ok(opts)
}

fn verify(seed: u64) -> Result<(), dot_dispatch::DotProductError> {
    for (i, &size) in VERIFY_SIZES.iter().enumerate() {
        let (a, b) = random_operands(size, seed.wrapping_add(i as u64));
        dot_product::verify_kernels(&a, &b)?;
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run with --help for usage.");
            process::exit(1);
        }
    };

    if opts.show_help {
        tui::print_help();
        return;
    }

    if opts.show_list {
        tui::print_kernel_list();
        return;
    }

    let detected = CapabilityLevel::detect();
    let dispatched = match opts.level {
        Some(max) => match Kernel::best_up_to(max) {
            Ok(kernel) => kernel,
            Err(e) => {
                eprintln!("Invalid --level: {}", e);
                process::exit(1);
            }
        },
        None => *dot_product::selected(),
    };

    tui::print_header(detected, &dispatched);

    let seed = opts.seed.unwrap_or_else(time_seed);
    tracing::info!(seed, sizes = ?opts.sizes, iterations = opts.iterations, "starting benchmark");

    match verify(seed) {
        Ok(()) => println!(
            "  Verification: all {} kernels within tolerance of baseline\n",
            dot_product::available_kernels().len()
        ),
        Err(e) => {
            eprintln!("Verification failed: {}", e);
            process::exit(1);
        }
    }

    let config = TimingConfig::default();
    let calls_per_sample = (opts.iterations / config.runs_per_variant).max(1);
    let mut csv_rows = Vec::new();

    for &size in &opts.sizes {
        let (a, b) = random_operands(size, seed);
        let results = bench::run_all_benchmarks(&a, &b, calls_per_sample, dispatched, &config);
        tui::print_results_table(&results, size, calls_per_sample);

        let levels: Vec<CapabilityLevel> = dot_product::available_kernels()
            .iter()
            .map(|k| k.level())
            .chain(std::iter::once(dispatched.level()))
            .collect();
        for (result, level) in results.iter().zip(levels) {
            csv_rows.push(RawTimingData::from_result(result, level.to_string(), size));
        }
    }

    if let Some(path) = opts.csv_path {
        match dot_dispatch::utils::export_csv(&path, &csv_rows) {
            Ok(()) => println!("Raw timings written to {}", path),
            Err(e) => {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
    }

    println!("Note: Speedup is relative to the first variant ('original').");
}
