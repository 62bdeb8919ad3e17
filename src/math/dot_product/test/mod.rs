//! Tests for the dot product kernels.

use crate::math::dot_product::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_vec(rng: &mut StdRng, len: usize) -> Vec<f32> {
    (0..len).map(|_| rng.random_range(-1.0f32..1.0)).collect()
}

fn assert_within_tolerance(kernel: &Kernel, a: &[f32], b: &[f32]) {
    let expected = Kernel::baseline().dot(a, b);
    let actual = kernel.dot(a, b);
    let tol = tolerance(a, b);
    assert!(
        (actual - expected).abs() <= tol,
        "{} (len {}): expected {}, got {}, tolerance {}",
        kernel.name(),
        a.len(),
        expected,
        actual,
        tol
    );
}

#[test]
fn test_original_basic() {
    let a = [1.0, 2.0, 3.0, 4.0];
    let b = [5.0, 6.0, 7.0, 8.0];
    // 1*5 + 2*6 + 3*7 + 4*8 = 5 + 12 + 21 + 32 = 70
    assert_eq!(dot_product_original(&a, &b), 70.0);
}

#[test]
fn test_original_single() {
    assert_eq!(dot_product_original(&[3.0], &[4.0]), 12.0);
}

#[test]
fn test_original_is_left_to_right() {
    // 1e8 + 1 - 1e8: left-to-right loses the 1 (1e8 + 1 rounds to 1e8).
    let a = [1.0e8, 1.0, -1.0e8];
    let b = [1.0, 1.0, 1.0];
    assert_eq!(dot_product_original(&a, &b), 0.0);
}

#[test]
#[should_panic(expected = "Vectors must have the same length")]
fn test_original_length_mismatch_panics() {
    dot_product_original(&[1.0, 2.0], &[1.0]);
}

#[test]
fn test_every_kernel_empty_is_positive_zero() {
    for kernel in available_kernels() {
        let result = kernel.dot(&[], &[]);
        assert_eq!(result, 0.0, "{}", kernel.name());
        assert!(result.is_sign_positive(), "{} returned -0.0", kernel.name());
    }
}

#[test]
fn test_every_kernel_concrete_scenario() {
    let a = [1.0, 2.0, 3.0, 4.0];
    let b = [4.0, 3.0, 2.0, 1.0];
    for kernel in available_kernels() {
        assert_eq!(kernel.dot(&a, &b), 20.0, "{}", kernel.name());
    }
}

#[test]
fn test_every_kernel_tail_lengths() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for len in [1, 2, 3, 5, 7, 8, 9, 13, 15, 17, 31, 32, 33, 63, 65, 1023] {
        let a = random_vec(&mut rng, len);
        let b = random_vec(&mut rng, len);
        for kernel in available_kernels() {
            assert_within_tolerance(&kernel, &a, &b);
        }
    }
}

#[test]
fn test_every_kernel_exact_on_integers() {
    // Small integers keep every partial sum exact, so every order agrees.
    for len in [5, 8, 13, 40, 77] {
        let a: Vec<f32> = (0..len).map(|i| (i % 7) as f32 - 3.0).collect();
        let b: Vec<f32> = (0..len).map(|i| (i % 5) as f32).collect();
        let expected: f32 = (0..len)
            .map(|i| ((i % 7) as f32 - 3.0) * (i % 5) as f32)
            .fold(0.0, |acc, p| acc + p);
        for kernel in available_kernels() {
            assert_eq!(kernel.dot(&a, &b), expected, "{} len {}", kernel.name(), len);
        }
    }
}

#[test]
fn test_kernels_do_not_read_past_len() {
    // Sub-slices of a larger buffer: trailing NaNs would poison the result
    // if any kernel read beyond the slice.
    let mut buf = vec![f32::NAN; 64];
    for (i, x) in buf.iter_mut().take(21).enumerate() {
        *x = i as f32;
    }
    let a = &buf[..21];
    let b = &buf[..21];
    for kernel in available_kernels() {
        assert!(!kernel.dot(a, b).is_nan(), "{} read past the end", kernel.name());
    }
}

#[test]
fn test_available_kernels_baseline_first_and_unique() {
    let kernels = available_kernels();
    assert_eq!(kernels[0], Kernel::baseline());
    for (i, k) in kernels.iter().enumerate() {
        assert!(k.level().is_supported());
        assert!(
            kernels[i + 1..].iter().all(|other| other.name() != k.name()),
            "duplicate kernel {}",
            k.name()
        );
    }
}

#[test]
fn test_compiled_kernels_cover_available() {
    let compiled = compiled_kernels();
    for kernel in available_kernels() {
        let info = compiled
            .iter()
            .find(|info| info.name == kernel.name())
            .expect("available kernel missing from compiled list");
        assert!(info.supported);
        assert_eq!(info.level, kernel.level());
    }
}

#[test]
fn test_block_width_matches_policy() {
    assert_eq!(Kernel::baseline().accumulation().block_width(), 1);
    for kernel in available_kernels() {
        if let Accumulation::Lanes { lanes, .. } = kernel.accumulation() {
            if kernel.level() != CapabilityLevel::Scalar {
                assert_eq!(lanes, kernel.level().lanes(), "{}", kernel.name());
            }
        }
    }
}

#[test]
fn test_try_dot_product() {
    assert_eq!(try_dot_product(&[1.0, 2.0], &[3.0, 4.0]), Ok(11.0));
    assert_eq!(
        try_dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0]),
        Err(crate::DotProductError::LengthMismatch { left: 3, right: 2 })
    );
}

#[test]
fn test_checked_entry_unchanged_under_trace_subscriber() {
    let mut rng = StdRng::seed_from_u64(11);
    let a = random_vec(&mut rng, 333);
    let b = random_vec(&mut rng, 333);
    let plain = try_dot_product(&a, &b).unwrap();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(std::io::sink)
        .finish();
    let (traced, raw) = tracing::subscriber::with_default(subscriber, || {
        let traced = try_dot_product(&a, &b).unwrap();
        let raw = unsafe { dot_product_raw(a.as_ptr(), b.as_ptr(), a.len()) };
        (traced, raw)
    });

    assert_eq!(traced.to_bits(), plain.to_bits());
    assert_eq!(raw.to_bits(), plain.to_bits());
}

#[test]
fn test_length_mismatch_message() {
    let err = try_dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "vectors must have the same length (left: 3, right: 2)"
    );
}

#[test]
fn test_raw_entry() {
    let a = [1.0f32, 2.0, 3.0];
    let b = [4.0f32, 5.0, 6.0];
    let raw = unsafe { dot_product_raw(a.as_ptr(), b.as_ptr(), a.len()) };
    assert_eq!(raw, 32.0);
    assert_eq!(raw, dot_product(&a, &b));

    let empty = unsafe { dot_product_raw(std::ptr::null(), std::ptr::null(), 0) };
    assert_eq!(empty, 0.0);

    // Aliasing operands are fine: both are read-only.
    let self_dot = unsafe { dot_product_raw(a.as_ptr(), a.as_ptr(), a.len()) };
    assert_eq!(self_dot, 14.0);
}

#[test]
fn test_verify_kernels_random() {
    let mut rng = StdRng::seed_from_u64(42);
    for len in [0, 1, 7, 100, 1023, 4096] {
        let a = random_vec(&mut rng, len);
        let b = random_vec(&mut rng, len);
        verify_kernels(&a, &b).unwrap();
    }
}

#[test]
fn test_verify_kernels_rejects_mismatch() {
    assert!(matches!(
        verify_kernels(&[1.0], &[]),
        Err(crate::DotProductError::LengthMismatch { left: 1, right: 0 })
    ));
}

#[test]
fn test_verify_kernels_reports_overflowing_partial_sums() {
    // Sequential order overflows to inf; paired accumulators hit inf - inf.
    let a = [3e38f32, 3e38, -3e38, -3e38];
    let b = [1.0f32; 4];
    assert_eq!(Kernel::baseline().dot(&a, &b), f32::INFINITY);
    assert!(dot_product_scalar_opt(&a, &b).is_nan());
    assert!(matches!(
        verify_kernels(&a, &b),
        Err(crate::DotProductError::ToleranceExceeded { .. })
    ));
}

#[test]
fn test_tolerance_scales_with_len_and_magnitude() {
    let small = tolerance(&[1.0; 4], &[1.0; 4]);
    let long = tolerance(&[1.0; 400], &[1.0; 400]);
    let big = tolerance(&[100.0; 4], &[100.0; 4]);
    assert!(long > small);
    assert!(big > small);
    assert!(tolerance(&[], &[]) > 0.0);
}
