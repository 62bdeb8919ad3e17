//! Dot product implementations.
//!
//! This module contains all implementation variants of the dot product
//! algorithm and the table describing them. Vector variants are `unsafe`
//! because they require a CPU feature; the table wraps each in a safe entry
//! point and only hands it out once the feature has been detected.

pub mod c_impl;
mod original;
mod scalar_opt;

#[cfg(target_arch = "aarch64")]
mod aarch64_neon;
#[cfg(target_arch = "x86_64")]
mod x86_64_avx;
#[cfg(target_arch = "x86_64")]
mod x86_64_avx2;
#[cfg(target_arch = "x86_64")]
mod x86_64_sse2;

#[cfg(target_arch = "aarch64")]
pub use aarch64_neon::dot_product_aarch64_neon;
#[cfg(c_implementation_active)]
pub use c_impl::dot_product_c_target_clones;
pub use c_impl::{C_COMPILER_NAME, C_IMPL_AVAILABLE};
pub use original::dot_product_original;
pub use scalar_opt::dot_product_scalar_opt;
#[cfg(target_arch = "x86_64")]
pub use x86_64_avx::dot_product_x86_64_avx;
#[cfg(target_arch = "x86_64")]
pub use x86_64_avx2::dot_product_x86_64_avx2;
#[cfg(target_arch = "x86_64")]
pub use x86_64_sse2::dot_product_x86_64_sse2;

use super::capability::CapabilityLevel;

/// Type alias for dot product function signature
pub type DotProductFn = fn(&[f32], &[f32]) -> f32;

/// How a variant orders its floating-point additions.
///
/// Addition is not associative, so two policies can round differently on
/// the same input. Only `Sequential` matches the baseline bit for bit.
///
/// The [`tolerance`](super::tolerance) bound holds only while no partial sum
/// overflows. Near `f32::MAX` one order may reach `inf` where another gets
/// `NaN` or a finite value, and [`verify_kernels`](super::verify_kernels)
/// reports that as a divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accumulation {
    /// One running sum, strictly left-to-right in index order
    Sequential,
    /// Interleaved partial sums reduced at the end
    Lanes {
        /// f32 lanes per accumulator
        lanes: usize,
        /// Independent accumulators
        accumulators: usize,
        /// Multiply and add rounded once (FMA)
        fused: bool,
    },
    /// Chosen by the C compiler for whichever clone the loader picked
    Toolchain,
}

impl Accumulation {
    /// Elements consumed per main-loop step; the rest go through the tail.
    pub const fn block_width(self) -> usize {
        match self {
            Accumulation::Sequential | Accumulation::Toolchain => 1,
            Accumulation::Lanes {
                lanes,
                accumulators,
                ..
            } => lanes * accumulators,
        }
    }

    /// Whether results are bit-identical to the baseline on every host.
    pub const fn is_reproducible(self) -> bool {
        matches!(self, Accumulation::Sequential)
    }
}

/// One dot product variant, ready to call.
///
/// A `Kernel` for a vector level can only be obtained on a host that
/// supports that level, so calling it is always safe.
#[derive(Clone, Copy)]
pub struct Kernel {
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) level: CapabilityLevel,
    pub(crate) accumulation: Accumulation,
    pub(crate) function: DotProductFn,
}

impl Kernel {
    /// Unique identifier (e.g. "original", "x86_64-avx2")
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable description
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Capability level the variant is compiled for
    pub const fn level(&self) -> CapabilityLevel {
        self.level
    }

    /// Accumulation order policy
    pub const fn accumulation(&self) -> Accumulation {
        self.accumulation
    }

    /// Compute the dot product of `a` and `b` with this variant.
    ///
    /// # Panics
    /// Panics if the vectors have different lengths.
    #[inline]
    pub fn dot(&self, a: &[f32], b: &[f32]) -> f32 {
        assert_eq!(a.len(), b.len(), "Vectors must have the same length");
        (self.function)(a, b)
    }
}

impl std::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("accumulation", &self.accumulation)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Kernel {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Kernel {}

// Safe entry points for the feature-gated variants. Each is only reachable
// through a `Kernel` built after its level was detected, and every caller
// has checked that the lengths match.

#[cfg(target_arch = "x86_64")]
fn sse2_entry(a: &[f32], b: &[f32]) -> f32 {
    // SAFETY: table invariant above.
    unsafe { dot_product_x86_64_sse2(a, b) }
}

#[cfg(target_arch = "x86_64")]
fn avx_entry(a: &[f32], b: &[f32]) -> f32 {
    // SAFETY: table invariant above.
    unsafe { dot_product_x86_64_avx(a, b) }
}

#[cfg(target_arch = "x86_64")]
fn avx2_entry(a: &[f32], b: &[f32]) -> f32 {
    // SAFETY: table invariant above.
    unsafe { dot_product_x86_64_avx2(a, b) }
}

#[cfg(target_arch = "aarch64")]
fn neon_entry(a: &[f32], b: &[f32]) -> f32 {
    // SAFETY: table invariant above.
    unsafe { dot_product_aarch64_neon(a, b) }
}

pub(crate) const BASELINE: Kernel = Kernel {
    name: "original",
    description: "Strict left-to-right scalar loop (baseline)",
    level: CapabilityLevel::Scalar,
    accumulation: Accumulation::Sequential,
    function: dot_product_original,
};

const SCALAR_OPT: Kernel = Kernel {
    name: "scalar_opt",
    description: "Scalar loop unrolled over 4 accumulators",
    level: CapabilityLevel::Scalar,
    accumulation: Accumulation::Lanes {
        lanes: 1,
        accumulators: 4,
        fused: false,
    },
    function: dot_product_scalar_opt,
};

#[cfg(target_arch = "x86_64")]
const SSE2: Kernel = Kernel {
    name: "x86_64-sse2",
    description: "x86_64 with SSE2 SIMD intrinsics",
    level: CapabilityLevel::Sse2,
    accumulation: Accumulation::Lanes {
        lanes: 4,
        accumulators: 1,
        fused: false,
    },
    function: sse2_entry,
};

#[cfg(target_arch = "x86_64")]
const AVX: Kernel = Kernel {
    name: "x86_64-avx",
    description: "x86_64 with AVX SIMD intrinsics",
    level: CapabilityLevel::Avx,
    accumulation: Accumulation::Lanes {
        lanes: 8,
        accumulators: 1,
        fused: false,
    },
    function: avx_entry,
};

#[cfg(target_arch = "x86_64")]
const AVX2_FMA: Kernel = Kernel {
    name: "x86_64-avx2",
    description: "x86_64 with AVX2 + FMA intrinsics, 4 accumulators",
    level: CapabilityLevel::Avx2Fma,
    accumulation: Accumulation::Lanes {
        lanes: 8,
        accumulators: 4,
        fused: true,
    },
    function: avx2_entry,
};

#[cfg(target_arch = "aarch64")]
const NEON: Kernel = Kernel {
    name: "aarch64-neon",
    description: "aarch64 with NEON FMA intrinsics, 2 accumulators",
    level: CapabilityLevel::Neon,
    accumulation: Accumulation::Lanes {
        lanes: 4,
        accumulators: 2,
        fused: true,
    },
    function: neon_entry,
};

#[cfg(c_implementation_active)]
const C_TARGET_CLONES: Kernel = Kernel {
    name: "c-target-clones",
    description: "C loop multi-versioned by the compiler (target_clones)",
    level: CapabilityLevel::Scalar,
    accumulation: Accumulation::Toolchain,
    function: dot_product_c_target_clones,
};

/// The kernel the dispatcher binds for `level`, ignoring host support.
pub(crate) fn primary_kernel(level: CapabilityLevel) -> Option<Kernel> {
    match level {
        CapabilityLevel::Scalar => Some(BASELINE),
        #[cfg(target_arch = "x86_64")]
        CapabilityLevel::Sse2 => Some(SSE2),
        #[cfg(target_arch = "x86_64")]
        CapabilityLevel::Avx => Some(AVX),
        #[cfg(target_arch = "x86_64")]
        CapabilityLevel::Avx2Fma => Some(AVX2_FMA),
        #[cfg(target_arch = "aarch64")]
        CapabilityLevel::Neon => Some(NEON),
        _ => None,
    }
}

/// Get all variants compiled for this target that the current CPU can run.
///
/// The baseline comes first; the rest follow in increasing capability.
pub fn available_kernels() -> Vec<Kernel> {
    let mut kernels = vec![BASELINE, SCALAR_OPT];

    kernels.extend(
        CapabilityLevel::ALL
            .iter()
            .copied()
            .filter(|level| *level != CapabilityLevel::Scalar && level.is_supported())
            .filter_map(primary_kernel),
    );

    #[cfg(c_implementation_active)]
    kernels.push(C_TARGET_CLONES);

    kernels
}

/// Description of a compiled variant, callable or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub level: CapabilityLevel,
    pub accumulation: Accumulation,
    /// Whether the current CPU can run it
    pub supported: bool,
}

impl KernelInfo {
    fn new(kernel: Kernel, supported: bool) -> Self {
        Self {
            name: kernel.name,
            description: kernel.description,
            level: kernel.level,
            accumulation: kernel.accumulation,
            supported,
        }
    }
}

/// Every variant compiled for this target, including the ones the current
/// CPU cannot run.
pub fn compiled_kernels() -> Vec<KernelInfo> {
    let mut kernels = vec![KernelInfo::new(BASELINE, true), KernelInfo::new(SCALAR_OPT, true)];

    kernels.extend(
        CapabilityLevel::ALL
            .iter()
            .copied()
            .filter(|level| *level != CapabilityLevel::Scalar)
            .filter_map(|level| primary_kernel(level).map(|k| KernelInfo::new(k, level.is_supported()))),
    );

    #[cfg(c_implementation_active)]
    kernels.push(KernelInfo::new(C_TARGET_CLONES, true));

    kernels
}
