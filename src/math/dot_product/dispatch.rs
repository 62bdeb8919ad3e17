//! Runtime kernel selection.
//!
//! The host is probed once, the best kernel is bound in a process-wide
//! `OnceLock`, and every later call is one atomic load plus an indirect
//! call. Callers that need a specific variant (typically the baseline, for
//! bit-reproducible results) ask for it explicitly instead.

use std::sync::OnceLock;

use super::capability::CapabilityLevel;
use super::code::{primary_kernel, Kernel, BASELINE};
use crate::error::{DotProductError, Result};

/// Kernel bound on first use.
static SELECTED: OnceLock<Kernel> = OnceLock::new();

impl Kernel {
    /// The strict left-to-right scalar kernel. Pin to this one when results
    /// must match across machines.
    pub const fn baseline() -> Kernel {
        BASELINE
    }

    /// The kernel the dispatcher uses for `level`.
    ///
    /// Fails with `UnsupportedLevel` if the host cannot run it.
    pub fn for_level(level: CapabilityLevel) -> Result<Kernel> {
        if !level.is_supported() {
            return Err(DotProductError::UnsupportedLevel(level));
        }
        primary_kernel(level).ok_or(DotProductError::UnsupportedLevel(level))
    }

    /// The kernel for the most capable level the host supports.
    pub fn best() -> Kernel {
        Self::for_level(CapabilityLevel::detect()).unwrap_or(BASELINE)
    }

    /// The kernel for the most capable supported level not above `max`.
    ///
    /// Fails with `UnsupportedLevel` when `max` is not a level of this
    /// target architecture.
    pub fn best_up_to(max: CapabilityLevel) -> Result<Kernel> {
        let level = CapabilityLevel::detect_up_to(max)?;
        Ok(Self::for_level(level).unwrap_or(BASELINE))
    }
}

/// The kernel bound for this process, detecting it on the first call.
///
/// Concurrent first callers wait for a single initialization; nobody sees a
/// partially written binding.
#[inline]
pub fn selected() -> &'static Kernel {
    SELECTED.get_or_init(|| {
        let kernel = Kernel::best();
        tracing::debug!(
            level = %kernel.level(),
            kernel = kernel.name(),
            accumulation = ?kernel.accumulation(),
            "dot product dispatch bound"
        );
        kernel
    })
}

/// Compute the dot product with the kernel bound for this process.
///
/// # Panics
/// Panics if the vectors have different lengths.
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    selected().dot(a, b)
}
