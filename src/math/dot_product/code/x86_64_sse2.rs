//! x86_64 SSE2 SIMD implementation.
//!
//! SSE2 is part of the x86_64 baseline, so this level is present on every
//! x86_64 host. Processes 4 f32 values per iteration.

use std::arch::x86_64::*;

/// Sum the four lanes of a 128-bit register.
///
/// Pairwise: `(v0 + v2) + (v1 + v3)`. Uses only SSE instructions, so it is
/// valid inside any x86_64 kernel.
#[inline(always)]
pub(super) unsafe fn horizontal_sum_128(v: __m128) -> f32 {
    let high = _mm_movehl_ps(v, v); // [v2, v3, v2, v3]
    let pairs = _mm_add_ps(v, high); // [v0+v2, v1+v3, _, _]
    let odd = _mm_shuffle_ps(pairs, pairs, 0b01); // [v1+v3, _, _, _]
    _mm_cvtss_f32(_mm_add_ss(pairs, odd))
}

/// Compute the dot product using SSE2 SIMD instructions.
///
/// One 4-lane accumulator of separate multiply and add; lane `k` sums the
/// elements with `i % 4 == k`. The lanes are reduced pairwise, then the
/// remaining `n % 4` elements are added left-to-right.
///
/// # Safety
/// The host must support SSE2 and `a` and `b` must have the same length.
#[target_feature(enable = "sse2")]
pub unsafe fn dot_product_x86_64_sse2(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let len = a.len();
    let chunks = len / 4;

    let mut sum_vec = _mm_setzero_ps();

    for i in 0..chunks {
        let idx = i * 4;
        let a_vec = _mm_loadu_ps(a.as_ptr().add(idx));
        let b_vec = _mm_loadu_ps(b.as_ptr().add(idx));
        sum_vec = _mm_add_ps(sum_vec, _mm_mul_ps(a_vec, b_vec));
    }

    let mut result = horizontal_sum_128(sum_vec);

    for i in (chunks * 4)..len {
        result += a[i] * b[i];
    }

    result
}
