//! Host instruction-set capability levels and their runtime probe.

use std::fmt;
use std::str::FromStr;

use crate::error::DotProductError;

/// A tier of processor instruction-set support.
///
/// Ordered from least to most capable. Only the ordering between levels of
/// the same architecture means anything: `Neon` and `Avx` never coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CapabilityLevel {
    /// Portable scalar code, no hardware prerequisite
    Scalar,
    /// x86_64 SSE2 (128-bit, 4 lanes)
    Sse2,
    /// aarch64 Advanced SIMD (128-bit, 4 lanes, FMA)
    Neon,
    /// x86_64 AVX (256-bit, 8 lanes)
    Avx,
    /// x86_64 AVX2 with FMA3 (256-bit, 8 lanes, fused multiply-add)
    Avx2Fma,
}

impl CapabilityLevel {
    /// Every level, least capable first.
    pub const ALL: [CapabilityLevel; 5] = [
        CapabilityLevel::Scalar,
        CapabilityLevel::Sse2,
        CapabilityLevel::Neon,
        CapabilityLevel::Avx,
        CapabilityLevel::Avx2Fma,
    ];

    /// Levels this target can ever run, most capable first. Always ends
    /// with `Scalar`.
    pub fn candidates() -> &'static [CapabilityLevel] {
        #[cfg(target_arch = "x86_64")]
        {
            &[
                CapabilityLevel::Avx2Fma,
                CapabilityLevel::Avx,
                CapabilityLevel::Sse2,
                CapabilityLevel::Scalar,
            ]
        }
        #[cfg(target_arch = "aarch64")]
        {
            &[CapabilityLevel::Neon, CapabilityLevel::Scalar]
        }
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            &[CapabilityLevel::Scalar]
        }
    }

    /// Stable lowercase name, also accepted by `from_str`.
    pub const fn name(self) -> &'static str {
        match self {
            CapabilityLevel::Scalar => "scalar",
            CapabilityLevel::Sse2 => "sse2",
            CapabilityLevel::Neon => "neon",
            CapabilityLevel::Avx => "avx",
            CapabilityLevel::Avx2Fma => "avx2-fma",
        }
    }

    /// Number of f32 lanes in one register at this level.
    pub const fn lanes(self) -> usize {
        match self {
            CapabilityLevel::Scalar => 1,
            CapabilityLevel::Sse2 | CapabilityLevel::Neon => 4,
            CapabilityLevel::Avx | CapabilityLevel::Avx2Fma => 8,
        }
    }

    /// Ask the host whether it can execute code compiled for this level.
    ///
    /// The standard library caches the underlying CPUID / HWCAP reads, but
    /// callers on a hot path should go through the dispatch binding instead.
    pub fn is_supported(self) -> bool {
        match self {
            CapabilityLevel::Scalar => true,
            #[cfg(target_arch = "x86_64")]
            CapabilityLevel::Sse2 => is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "x86_64")]
            CapabilityLevel::Avx => is_x86_feature_detected!("avx"),
            #[cfg(target_arch = "x86_64")]
            CapabilityLevel::Avx2Fma => {
                is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")
            }
            #[cfg(target_arch = "aarch64")]
            CapabilityLevel::Neon => std::arch::is_aarch64_feature_detected!("neon"),
            _ => false,
        }
    }

    /// The most capable level the host supports. Never fails: `Scalar` is
    /// always the last candidate.
    pub fn detect() -> CapabilityLevel {
        Self::candidates()
            .iter()
            .copied()
            .find(|level| level.is_supported())
            .unwrap_or(CapabilityLevel::Scalar)
    }

    /// The most capable supported level that is not above `max`.
    ///
    /// Fails with `UnsupportedLevel` when `max` belongs to another
    /// architecture, since ordering across architectures is meaningless.
    pub fn detect_up_to(max: CapabilityLevel) -> Result<CapabilityLevel, DotProductError> {
        if !Self::candidates().contains(&max) {
            return Err(DotProductError::UnsupportedLevel(max));
        }
        Ok(Self::candidates()
            .iter()
            .copied()
            .filter(|level| *level <= max)
            .find(|level| level.is_supported())
            .unwrap_or(CapabilityLevel::Scalar))
    }
}

impl fmt::Display for CapabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CapabilityLevel {
    type Err = DotProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        match wanted.as_str() {
            "avx2" | "fma" => return Ok(CapabilityLevel::Avx2Fma),
            "baseline" | "default" => return Ok(CapabilityLevel::Scalar),
            _ => {}
        }
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.name() == wanted)
            .ok_or_else(|| DotProductError::UnknownLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_always_supported() {
        assert!(CapabilityLevel::Scalar.is_supported());
        assert_eq!(
            CapabilityLevel::detect_up_to(CapabilityLevel::Scalar),
            Ok(CapabilityLevel::Scalar)
        );
    }

    #[test]
    fn test_candidates_descending_and_end_with_scalar() {
        let candidates = CapabilityLevel::candidates();
        assert_eq!(candidates.last(), Some(&CapabilityLevel::Scalar));
        for pair in candidates.windows(2) {
            assert!(pair[0] > pair[1], "{} should outrank {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_detect_picks_first_supported_candidate() {
        let detected = CapabilityLevel::detect();
        assert!(detected.is_supported());
        for level in CapabilityLevel::candidates() {
            if *level == detected {
                break;
            }
            assert!(
                !level.is_supported(),
                "{} is supported but {} was picked",
                level,
                detected
            );
        }
    }

    #[test]
    fn test_foreign_levels_unsupported() {
        for level in CapabilityLevel::ALL {
            if !CapabilityLevel::candidates().contains(&level) {
                assert!(!level.is_supported(), "{} should not be available", level);
            }
        }
    }

    #[test]
    fn test_cap_from_other_architecture_rejected() {
        for level in CapabilityLevel::ALL {
            let capped = CapabilityLevel::detect_up_to(level);
            if CapabilityLevel::candidates().contains(&level) {
                let capped = capped.unwrap();
                assert!(capped <= level);
                assert!(capped.is_supported());
            } else {
                assert_eq!(capped, Err(DotProductError::UnsupportedLevel(level)));
            }
        }
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_neon_cap_rejected_on_x86_64() {
        assert_eq!(
            CapabilityLevel::detect_up_to(CapabilityLevel::Neon),
            Err(DotProductError::UnsupportedLevel(CapabilityLevel::Neon))
        );
    }

    #[test]
    fn test_name_round_trip_and_aliases() {
        for level in CapabilityLevel::ALL {
            assert_eq!(level.to_string().parse::<CapabilityLevel>(), Ok(level));
        }
        assert_eq!("AVX2".parse::<CapabilityLevel>(), Ok(CapabilityLevel::Avx2Fma));
        assert_eq!("avx2_fma".parse::<CapabilityLevel>(), Ok(CapabilityLevel::Avx2Fma));
        assert_eq!("baseline".parse::<CapabilityLevel>(), Ok(CapabilityLevel::Scalar));
        assert_eq!(
            "avx512".parse::<CapabilityLevel>(),
            Err(DotProductError::UnknownLevel("avx512".to_string()))
        );
    }
}
