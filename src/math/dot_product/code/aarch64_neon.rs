//! aarch64 NEON implementation.

use std::arch::aarch64::*;

/// Compute the dot product using NEON fused multiply-add.
///
/// Two 4-lane accumulators alternate over 8-element blocks, a leftover
/// 4-element block goes into the first, they are added together and reduced
/// with `vaddvq_f32`, and the `n % 4` tail is added left-to-right.
///
/// # Safety
/// The host must support NEON and `a` and `b` must have the same length.
#[target_feature(enable = "neon")]
pub unsafe fn dot_product_aarch64_neon(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let len = a.len();
    let pa = a.as_ptr();
    let pb = b.as_ptr();

    let mut acc0 = vdupq_n_f32(0.0);
    let mut acc1 = vdupq_n_f32(0.0);

    let blocks = len / 8;
    for i in 0..blocks {
        let idx = i * 8;
        acc0 = vfmaq_f32(acc0, vld1q_f32(pa.add(idx)), vld1q_f32(pb.add(idx)));
        acc1 = vfmaq_f32(acc1, vld1q_f32(pa.add(idx + 4)), vld1q_f32(pb.add(idx + 4)));
    }

    let chunks = len / 4;
    if chunks > blocks * 2 {
        let idx = blocks * 8;
        acc0 = vfmaq_f32(acc0, vld1q_f32(pa.add(idx)), vld1q_f32(pb.add(idx)));
    }

    let mut result = vaddvq_f32(vaddq_f32(acc0, acc1));

    for i in (chunks * 4)..len {
        result += a[i] * b[i];
    }

    result
}
