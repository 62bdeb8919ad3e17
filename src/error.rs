//! Error types for the checked entry points and kernel selection.

use thiserror::Error;

use crate::math::dot_product::CapabilityLevel;

/// Errors returned by the checked dot product API.
///
/// The kernels themselves never fail; these cover caller input that the
/// checked paths reject and kernel lookups the host cannot satisfy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DotProductError {
    /// Operands of different lengths.
    #[error("vectors must have the same length (left: {left}, right: {right})")]
    LengthMismatch { left: usize, right: usize },

    /// The host does not support the requested capability level.
    #[error("capability level '{0}' is not supported on this host")]
    UnsupportedLevel(CapabilityLevel),

    /// Level name that does not parse.
    #[error("unknown capability level '{0}' (expected one of: scalar, sse2, neon, avx, avx2-fma)")]
    UnknownLevel(String),

    /// A kernel diverged from the baseline beyond the accepted rounding bound.
    #[error("kernel '{kernel}' diverged from baseline: expected {expected}, got {actual} (tolerance {tolerance})")]
    ToleranceExceeded {
        kernel: &'static str,
        expected: f32,
        actual: f32,
        tolerance: f32,
    },
}

/// Result type for checked dot product operations.
pub type Result<T> = std::result::Result<T, DotProductError>;
