//! x86_64 AVX implementation.
//!
//! 256-bit registers, 8 f32 values per iteration, no fused multiply-add.
//! Selected on AVX hosts that lack AVX2/FMA (Sandy Bridge, Ivy Bridge).

use std::arch::x86_64::*;

use super::x86_64_sse2::horizontal_sum_128;

/// Compute the dot product using AVX instructions.
///
/// One 8-lane accumulator; lane `k` sums the elements with `i % 8 == k`.
/// The high half is folded onto the low half (`lane k + lane k+4`), the
/// remaining 4 lanes are reduced pairwise, then the `n % 8` tail is added
/// left-to-right.
///
/// # Safety
/// The host must support AVX and `a` and `b` must have the same length.
#[target_feature(enable = "avx")]
pub unsafe fn dot_product_x86_64_avx(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let len = a.len();
    let chunks = len / 8;

    let mut sum_vec = _mm256_setzero_ps();

    for i in 0..chunks {
        let idx = i * 8;
        let a_vec = _mm256_loadu_ps(a.as_ptr().add(idx));
        let b_vec = _mm256_loadu_ps(b.as_ptr().add(idx));
        sum_vec = _mm256_add_ps(sum_vec, _mm256_mul_ps(a_vec, b_vec));
    }

    let hi = _mm256_extractf128_ps(sum_vec, 1);
    let lo = _mm256_castps256_ps128(sum_vec);
    let mut result = horizontal_sum_128(_mm_add_ps(lo, hi));

    for i in (chunks * 8)..len {
        result += a[i] * b[i];
    }

    result
}
