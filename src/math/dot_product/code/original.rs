//! Baseline scalar implementation of the dot product.
//!
//! This is the reference every other variant is checked against, and the
//! kernel to pin when results must be bit-identical across machines.

/// Compute the dot product of two vectors, accumulating strictly
/// left-to-right in index order.
///
/// The accumulator starts at `+0.0`, so empty input yields exactly `0.0`.
///
/// # Panics
/// Panics if the vectors have different lengths.
///
/// # Example
/// ```
/// use dot_dispatch::math::dot_product::dot_product_original;
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let b = [4.0, 3.0, 2.0, 1.0];
/// assert_eq!(dot_product_original(&a, &b), 20.0);
/// ```
pub fn dot_product_original(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let mut sum = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        sum += x * y;
    }
    sum
}
