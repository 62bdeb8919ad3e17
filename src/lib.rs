//! # dot-dispatch
//!
//! Single-precision dot product that runs the fastest kernel the executing
//! CPU supports. Kernels for each instruction-set level are compiled into
//! one binary; the host is probed on first use and the choice is cached for
//! the rest of the process.
//!
//! ```
//! let a = [1.0, 2.0, 3.0, 4.0];
//! let b = [4.0, 3.0, 2.0, 1.0];
//! assert_eq!(dot_dispatch::dot_product(&a, &b), 20.0);
//!
//! // Bit-reproducible across machines:
//! let pinned = dot_dispatch::Kernel::baseline();
//! assert_eq!(pinned.dot(&a, &b), 20.0);
//! ```

pub mod error;
pub mod math;
pub mod utils;

pub use error::{DotProductError, Result};
pub use math::dot_product::{
    available_kernels, dot_product, dot_product_raw, selected, tolerance, try_dot_product,
    verify_kernels, Accumulation, CapabilityLevel, Kernel,
};

/// Re-export commonly used items
pub mod prelude {
    pub use crate::math::dot_product::{self, dot_product, try_dot_product, CapabilityLevel, Kernel};
}
