//! CPU cycle counter for the benchmark harness.
//!
//! x86/x86_64 read the TSC, aarch64 reads the virtual timer.

/// Read the current CPU cycle counter / timer.
///
/// On x86_64: RDTSC fenced by LFENCE on both sides.
/// On aarch64: CNTVCT_EL0, a fixed-frequency counter readable from userspace.
#[inline(always)]
pub fn read_cycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        use core::arch::x86_64::{_mm_lfence, _rdtsc};
        // SAFETY: LFENCE and RDTSC are available on every x86_64 CPU.
        unsafe {
            _mm_lfence();
            let cycles = _rdtsc();
            _mm_lfence();
            cycles
        }
    }

    #[cfg(target_arch = "x86")]
    {
        use core::arch::x86::{_mm_lfence, _rdtsc};
        // SAFETY: the cpu_cycles feature is only meaningful on SSE2-class x86.
        unsafe {
            _mm_lfence();
            let cycles = _rdtsc();
            _mm_lfence();
            cycles
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        let val: u64;
        // SAFETY: CNTVCT_EL0 is readable at EL0 on every aarch64 OS we target.
        unsafe {
            core::arch::asm!("isb", "mrs {}, cntvct_el0", out(reg) val, options(nomem, nostack));
        }
        val
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
    {
        compile_error!("cpu_cycles feature requires x86, x86_64, or aarch64; build with --features use_time");
    }
}
