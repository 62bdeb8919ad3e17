//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the `dot-bench` CLI.

use terminal_size::{terminal_size, Width};

use super::bench::unit_name;
use super::timer::VariantResult;
use crate::math::dot_product::{
    compiled_kernels, Accumulation, CapabilityLevel, Kernel, C_COMPILER_NAME, C_IMPL_AVAILABLE,
};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Short human-readable accumulation policy
pub fn describe_accumulation(acc: Accumulation) -> String {
    match acc {
        Accumulation::Sequential => "sequential".to_string(),
        Accumulation::Lanes {
            lanes,
            accumulators,
            fused,
        } => format!(
            "{}x{} lanes{}",
            accumulators,
            lanes,
            if fused { ", fma" } else { "" }
        ),
        Accumulation::Toolchain => "compiler".to_string(),
    }
}

/// Print the application header with the detected level and bound kernel
pub fn print_header(detected: CapabilityLevel, dispatched: &Kernel) {
    let term_width = get_term_width().min(80);
    let title = " Dot Product Dispatch Benchmarks ";
    let padding = term_width.saturating_sub(title.len()) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!("║{}{}{}║", " ".repeat(padding), title, " ".repeat(right_padding));
    println!("╚{}╝", border);
    println!();
    println!("  Detected level:  {}", detected);
    println!(
        "  Dispatched to:   {} ({}, {})",
        dispatched.name(),
        dispatched.level(),
        describe_accumulation(dispatched.accumulation())
    );
    println!("  Unit:            {} per call", unit_name());
    if C_IMPL_AVAILABLE {
        println!("  C kernel:        {}", C_COMPILER_NAME.unwrap_or("unknown compiler"));
    } else {
        println!("  C kernel:        not built");
    }
    println!();
}

/// Print every compiled kernel and whether this host can run it
pub fn print_kernel_list() {
    println!("Compiled kernels:");
    println!();
    for info in compiled_kernels() {
        println!(
            "  {:<18} {:<9} {:<18} {:<4} {}",
            info.name,
            info.level.to_string(),
            describe_accumulation(info.accumulation),
            if info.supported { "yes" } else { "no" },
            info.description
        );
    }
}

/// Print results table for one input size.
///
/// The first row is the baseline; speedup and relative error are against it.
pub fn print_results_table(results: &[VariantResult], size: usize, calls_per_sample: usize) {
    if results.is_empty() {
        return;
    }

    let term_width = get_term_width();
    let fixed_width = 72;
    let variant_col_width = term_width.saturating_sub(fixed_width).max(15);
    let table_width = variant_col_width + 64 + 6;

    let baseline_time = results.first().map(|r| r.avg).unwrap_or(1.0);
    let baseline_result = results.first().and_then(|r| r.result_sample);

    println!(
        "  Size: {} ({} samples x {} calls)",
        size,
        results[0].samples,
        calls_per_sample
    );
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<v_width$} {:>12} {:>12} {:>12} {:>9} {:>9} {:>10}",
        "Variant",
        "Average",
        "Median",
        "Min",
        "Speedup",
        "CV",
        "Rel. Error",
        v_width = variant_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for result in results {
        let speedup = if result.avg > 0.0 {
            baseline_time / result.avg
        } else {
            0.0
        };
        let cv = if result.avg > 0.0 {
            result.std_dev / result.avg
        } else {
            0.0
        };

        let relative_error = match (result.result_sample, baseline_result) {
            (Some(res), Some(base)) => {
                let diff = (res - base).abs() as f64;
                if base.abs() > 1e-9 {
                    diff / base.abs() as f64
                } else {
                    diff
                }
            }
            _ => 0.0,
        };

        let display_name = if result.name.starts_with("c-") {
            match C_COMPILER_NAME {
                Some(c) => format!("{} ({})", result.name, c),
                None => result.name.clone(),
            }
        } else {
            result.name.clone()
        };

        println!(
            "  {:<v_width$} {:>12.1} {:>12} {:>12} {:>8.2}x {:>8.2}% {:>10.2e}",
            truncate(&display_name, variant_col_width),
            result.avg,
            result.median,
            result.min,
            speedup,
            cv * 100.0,
            relative_error,
            v_width = variant_col_width
        );
    }
    println!();
}

/// Print the help message
pub fn print_help() {
    println!("Usage: dot-bench [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --list, -l     List compiled kernels and host support");
    println!("  --help, -h     Show this help message");
    println!("  --sizes SIZES  Comma-separated vector sizes (default: 64,256,1024,4096,16384)");
    println!("  --iter N       Calls per timing sample (default: 10000)");
    println!("  --seed N       Random seed for the operands (default: random)");
    println!("  --level NAME   Cap the dispatched row at this level (scalar, sse2, neon, avx, avx2-fma)");
    println!("  --csv PATH     Export average timings to CSV");
    println!();
    println!("Environment:");
    println!("  RUST_LOG       Log filter for diagnostics on stderr (default: warn)");
    println!();
    println!("Examples:");
    println!("  dot-bench                     # Measure every kernel");
    println!("  dot-bench --sizes 128,512     # Custom sizes");
    println!("  dot-bench --level sse2        # Compare against a capped dispatch");
    println!("  dot-bench --csv data.csv      # Export raw timings to CSV");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("x86_64-avx2-long-name", 10), "x86_64-...");
    }

    #[test]
    fn test_describe_accumulation() {
        assert_eq!(describe_accumulation(Accumulation::Sequential), "sequential");
        assert_eq!(
            describe_accumulation(Accumulation::Lanes {
                lanes: 8,
                accumulators: 4,
                fused: true
            }),
            "4x8 lanes, fma"
        );
    }
}
