//! Unrolled scalar implementation.
//!
//! Portable, no instruction-set prerequisite. Four independent accumulators
//! break the loop-carried dependency on a single sum, so the reduction order
//! differs from the baseline.

/// Compute the dot product with 4x loop unrolling.
///
/// Element `i` goes into accumulator `i % 4`; the tail joins accumulator 0.
/// The partial sums combine as `(s0 + s1) + (s2 + s3)`.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn dot_product_scalar_opt(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let mut sum0 = 0.0f32;
    let mut sum1 = 0.0f32;
    let mut sum2 = 0.0f32;
    let mut sum3 = 0.0f32;

    let a_chunks = a.chunks_exact(4);
    let b_chunks = b.chunks_exact(4);
    let a_tail = a_chunks.remainder();
    let b_tail = b_chunks.remainder();

    for (x, y) in a_chunks.zip(b_chunks) {
        sum0 += x[0] * y[0];
        sum1 += x[1] * y[1];
        sum2 += x[2] * y[2];
        sum3 += x[3] * y[3];
    }

    for (x, y) in a_tail.iter().zip(b_tail.iter()) {
        sum0 += x * y;
    }

    (sum0 + sum1) + (sum2 + sum3)
}
