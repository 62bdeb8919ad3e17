//! Property-based tests for the dot product kernels using proptest.
//!
//! Validates invariants that must hold for all inputs and every kernel the
//! host can run:
//! - Commutativity is exact per kernel
//! - A zero operand gives zero
//! - Self dot product is non-negative
//! - Every kernel stays within the rounding bound of the baseline

use dot_dispatch::{available_kernels, dot_product, tolerance, Kernel};
use proptest::prelude::*;

/// Two equal-length vectors of moderate magnitude.
fn operand_pair(max_len: usize) -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    (0..=max_len).prop_flat_map(|len| {
        (
            prop::collection::vec(-1000.0f32..1000.0, len),
            prop::collection::vec(-1000.0f32..1000.0, len),
        )
    })
}

proptest! {
    #[test]
    fn commutative_for_every_kernel((a, b) in operand_pair(300)) {
        for kernel in available_kernels() {
            let ab = kernel.dot(&a, &b);
            let ba = kernel.dot(&b, &a);
            prop_assert_eq!(ab.to_bits(), ba.to_bits(), "{}", kernel.name());
        }
    }

    #[test]
    fn zero_operand_gives_zero((a, _) in operand_pair(300)) {
        let zeros = vec![0.0f32; a.len()];
        for kernel in available_kernels() {
            prop_assert_eq!(kernel.dot(&a, &zeros), 0.0, "{}", kernel.name());
        }
        prop_assert_eq!(dot_product(&zeros, &a), 0.0);
    }

    #[test]
    fn self_dot_is_non_negative((a, _) in operand_pair(300)) {
        for kernel in available_kernels() {
            prop_assert!(kernel.dot(&a, &a) >= 0.0, "{}", kernel.name());
        }
    }

    #[test]
    fn kernels_within_tolerance_of_baseline((a, b) in operand_pair(4096)) {
        let expected = Kernel::baseline().dot(&a, &b);
        let bound = tolerance(&a, &b);
        for kernel in available_kernels() {
            let actual = kernel.dot(&a, &b);
            prop_assert!(
                (actual - expected).abs() <= bound,
                "{} len {}: expected {}, got {}, bound {}",
                kernel.name(), a.len(), expected, actual, bound
            );
        }
    }

    #[test]
    fn dispatched_matches_selected_kernel((a, b) in operand_pair(600)) {
        let expected = dot_dispatch::selected().dot(&a, &b);
        prop_assert_eq!(dot_product(&a, &b).to_bits(), expected.to_bits());
    }
}

#[test]
fn tail_lengths_match_baseline() {
    for len in [1usize, 3, 5, 7, 9, 13, 31, 33, 1023] {
        let a: Vec<f32> = (0..len).map(|i| ((i * 37 % 101) as f32 - 50.0) / 7.0).collect();
        let b: Vec<f32> = (0..len).map(|i| ((i * 53 % 97) as f32 - 48.0) / 3.0).collect();
        let expected = Kernel::baseline().dot(&a, &b);
        let bound = tolerance(&a, &b);
        for kernel in available_kernels() {
            let actual = kernel.dot(&a, &b);
            assert!(
                (actual - expected).abs() <= bound,
                "{} len {}: expected {}, got {}",
                kernel.name(),
                len,
                expected,
                actual
            );
        }
    }
}
