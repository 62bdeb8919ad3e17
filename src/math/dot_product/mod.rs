//! # Dot Product
//!
//! The dot product (also known as scalar product) computes the sum of products
//! of corresponding elements in two vectors:
//!
//! `dot(a, b) = Σ(a[i] * b[i])`
//!
//! ## Kernel selection
//!
//! Each capability level has its own kernel ([`code`]). The host is probed
//! once ([`capability`]) and the best kernel is bound for the rest of the
//! process ([`dispatch`]). The bound kernel is what [`dot_product`] calls.
//!
//! ## Numeric semantics
//!
//! Vector kernels keep partial sums per lane and reduce them at the end, so
//! they round differently from the strict left-to-right baseline. Every
//! kernel stays within [`tolerance`] of the baseline; pin to
//! [`Kernel::baseline`] when results must be identical across machines.

pub mod bench;
pub mod capability;
pub mod code;
pub mod dispatch;
#[cfg(test)]
mod test;

pub use capability::CapabilityLevel;
pub use code::*;
pub use dispatch::{dot_product, selected};

use crate::error::{DotProductError, Result};

/// Checked dot product for untrusted input.
///
/// Returns `LengthMismatch` instead of panicking when the operands differ in
/// length. With the `telemetry` feature each call runs inside a
/// `dot_product` trace span that records both lengths and the result.
pub fn try_dot_product(a: &[f32], b: &[f32]) -> Result<f32> {
    #[cfg(feature = "telemetry")]
    let _span = tracing::trace_span!("dot_product", left = a.len(), right = b.len()).entered();

    if a.len() != b.len() {
        #[cfg(feature = "telemetry")]
        tracing::trace!("length mismatch");
        return Err(DotProductError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let result = dispatch::selected().dot(a, b);

    #[cfg(feature = "telemetry")]
    tracing::trace!(result, "dot product computed");

    Ok(result)
}

/// Dot product over raw pointers, with the same contract as the C entry
/// point `float vector_dot_product(const float *a, const float *b, size_t n)`.
///
/// `n == 0` returns `0.0` without touching either pointer.
///
/// # Safety
/// For `n > 0`, `a` and `b` must each be non-null, aligned for `f32`, and
/// valid for `n` consecutive reads for the duration of the call. They may
/// alias each other. Nothing may write to them during the call.
pub unsafe fn dot_product_raw(a: *const f32, b: *const f32, n: usize) -> f32 {
    #[cfg(feature = "telemetry")]
    let _span = tracing::trace_span!("dot_product_raw", n).entered();

    if n == 0 {
        return 0.0;
    }
    let a = std::slice::from_raw_parts(a, n);
    let b = std::slice::from_raw_parts(b, n);
    let result = (dispatch::selected().function)(a, b);

    #[cfg(feature = "telemetry")]
    tracing::trace!(result, "dot product computed");

    result
}

/// Largest accepted difference between any kernel and the baseline.
///
/// Recursive summation of `n` terms errs by at most `n * ε * Σ|a[i]·b[i]|`
/// (to first order), and both sides of the comparison carry such an error,
/// hence `2 * (n + 1) * ε * Σ|a[i]·b[i]|`. The `MIN_POSITIVE` floor keeps
/// all-zero input from demanding an exact match on signed zeros.
pub fn tolerance(a: &[f32], b: &[f32]) -> f32 {
    let magnitude: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64 * *y as f64).abs())
        .sum();
    let n = a.len().min(b.len()) as f64;
    (2.0 * (n + 1.0) * f32::EPSILON as f64 * magnitude) as f32 + f32::MIN_POSITIVE
}

/// Check every kernel the host can run against the baseline on `a` and `b`.
///
/// # Errors
/// `LengthMismatch` for unequal operands, `ToleranceExceeded` for the first
/// kernel that diverges by more than [`tolerance`].
pub fn verify_kernels(a: &[f32], b: &[f32]) -> Result<()> {
    if a.len() != b.len() {
        return Err(DotProductError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let expected = Kernel::baseline().dot(a, b);
    let tolerance = tolerance(a, b);

    for kernel in available_kernels() {
        let actual = kernel.dot(a, b);
        if actual == expected || (actual.is_nan() && expected.is_nan()) {
            continue;
        }
        let diff = (actual - expected).abs();
        if diff.is_nan() || diff > tolerance {
            return Err(DotProductError::ToleranceExceeded {
                kernel: kernel.name(),
                expected,
                actual,
                tolerance,
            });
        }
    }

    Ok(())
}
