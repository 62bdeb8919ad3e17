//! FFI binding for the C `target_clones` kernel.
//!
//! The C loop is compiled once per ISA by GCC and the dynamic loader picks a
//! clone at startup. It is only built when `build.rs` finds a compatible
//! compiler and the `c_impl` feature is on.

#[cfg(c_implementation_active)]
mod ffi {
    use libc::size_t;
    use std::os::raw::c_float;

    extern "C" {
        pub fn dot_product_c_target_clones(a: *const c_float, b: *const c_float, n: size_t) -> c_float;
    }
}

/// Check if the C kernel was compiled in
#[cfg(c_implementation_active)]
pub const C_IMPL_AVAILABLE: bool = true;

#[cfg(not(c_implementation_active))]
pub const C_IMPL_AVAILABLE: bool = false;

/// C compiler name detected at build time
pub const C_COMPILER_NAME: Option<&str> = option_env!("C_COMPILER_NAME");

/// C `target_clones` implementation wrapper.
///
/// # Panics
/// Panics if the vectors have different lengths.
#[cfg(c_implementation_active)]
pub fn dot_product_c_target_clones(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");
    if a.is_empty() {
        return 0.0;
    }
    // SAFETY: both slices are valid for `a.len()` reads and the C side only reads.
    unsafe { ffi::dot_product_c_target_clones(a.as_ptr(), b.as_ptr(), a.len()) }
}
