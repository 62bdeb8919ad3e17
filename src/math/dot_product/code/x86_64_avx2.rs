//! x86_64 AVX2 + FMA implementation.
//!
//! The widest level dispatched on x86_64. Four independent 8-lane
//! accumulators hide the FMA latency on long vectors.

use std::arch::x86_64::*;

use super::x86_64_sse2::horizontal_sum_128;

/// Compute the dot product using AVX2 and FMA3 instructions.
///
/// Accumulation order:
/// 1. 32-element blocks feed four 8-lane FMA accumulators, one per 8-element
///    quarter of the block.
/// 2. Remaining whole 8-element blocks feed the first accumulator.
/// 3. Accumulators combine as `(acc0 + acc1) + (acc2 + acc3)`, then the
///    register is reduced like the AVX kernel.
/// 4. The `n % 8` tail is added left-to-right.
///
/// Each product is fused with its addition, so there is one rounding per
/// element instead of two.
///
/// # Safety
/// The host must support AVX2 and FMA and `a` and `b` must have the same
/// length.
#[target_feature(enable = "avx2,fma")]
pub unsafe fn dot_product_x86_64_avx2(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let len = a.len();
    let pa = a.as_ptr();
    let pb = b.as_ptr();

    let mut acc0 = _mm256_setzero_ps();
    let mut acc1 = _mm256_setzero_ps();
    let mut acc2 = _mm256_setzero_ps();
    let mut acc3 = _mm256_setzero_ps();

    let blocks = len / 32;
    for i in 0..blocks {
        let idx = i * 32;
        acc0 = _mm256_fmadd_ps(
            _mm256_loadu_ps(pa.add(idx)),
            _mm256_loadu_ps(pb.add(idx)),
            acc0,
        );
        acc1 = _mm256_fmadd_ps(
            _mm256_loadu_ps(pa.add(idx + 8)),
            _mm256_loadu_ps(pb.add(idx + 8)),
            acc1,
        );
        acc2 = _mm256_fmadd_ps(
            _mm256_loadu_ps(pa.add(idx + 16)),
            _mm256_loadu_ps(pb.add(idx + 16)),
            acc2,
        );
        acc3 = _mm256_fmadd_ps(
            _mm256_loadu_ps(pa.add(idx + 24)),
            _mm256_loadu_ps(pb.add(idx + 24)),
            acc3,
        );
    }

    let chunks = len / 8;
    for i in (blocks * 4)..chunks {
        let idx = i * 8;
        acc0 = _mm256_fmadd_ps(_mm256_loadu_ps(pa.add(idx)), _mm256_loadu_ps(pb.add(idx)), acc0);
    }

    let sum_vec = _mm256_add_ps(_mm256_add_ps(acc0, acc1), _mm256_add_ps(acc2, acc3));
    let hi = _mm256_extractf128_ps(sum_vec, 1);
    let lo = _mm256_castps256_ps128(sum_vec);
    let mut result = horizontal_sum_128(_mm_add_ps(lo, hi));

    for i in (chunks * 8)..len {
        result += a[i] * b[i];
    }

    result
}
