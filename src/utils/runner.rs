//! Benchmark data export.

use std::io::Write;

use super::bench::unit_name;
use super::timer::VariantResult;

/// Raw timing data for a single variant at one input size
pub struct RawTimingData {
    pub variant_name: String,
    pub level: String,
    pub input_size: usize,
    pub avg: f64,
    pub result_sample: Option<f32>,
}

impl RawTimingData {
    pub fn from_result(result: &VariantResult, level: impl Into<String>, input_size: usize) -> Self {
        Self {
            variant_name: result.name.clone(),
            level: level.into(),
            input_size,
            avg: result.avg,
            result_sample: result.result_sample,
        }
    }
}

/// Write timing data as CSV
pub fn write_csv<W: Write>(mut out: W, data: &[RawTimingData]) -> std::io::Result<()> {
    writeln!(out, "variant,level,input_size,avg_time_{},result", unit_name())?;

    for entry in data {
        writeln!(
            out,
            "{},{},{},{:.2},{}",
            entry.variant_name,
            entry.level,
            entry.input_size,
            entry.avg,
            entry.result_sample.map(|v| v.to_string()).unwrap_or_default()
        )?;
    }

    out.flush()
}

/// Export timing data to CSV file
pub fn export_csv(path: &str, data: &[RawTimingData]) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(std::io::BufWriter::new(file), data)
}
