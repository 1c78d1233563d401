//! Host Feature Detection
//!
//! [`CpuFeatures`] probes the individual SIMD extensions; [`detect_level`]
//! folds them into a single [`InstructionSet`] and caches the result for the
//! lifetime of the process.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::config::DispatchConfig;
use crate::instrset::InstructionSet;

/// CPU Feature Detection Results
///
/// Represents the SIMD capabilities detected on the current CPU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuFeatures {
    /// SSE
    pub has_sse: bool,
    /// SSE2
    pub has_sse2: bool,
    /// SSE3
    pub has_sse3: bool,
    /// Supplementary SSE3
    pub has_ssse3: bool,
    /// SSE4.1
    pub has_sse4_1: bool,
    /// SSE4.2
    pub has_sse4_2: bool,
    /// AVX (with OS support for YMM state)
    pub has_avx: bool,
    /// AVX2
    pub has_avx2: bool,
    /// Fused multiply-add (FMA3). Reported, not part of the tier ladder.
    pub has_fma: bool,
    /// AVX-512 Foundation
    pub has_avx512_f: bool,
    /// AVX-512 Byte & Word operations
    pub has_avx512_bw: bool,
    /// AVX-512 Doubleword & Quadword operations
    pub has_avx512_dq: bool,
    /// AVX-512 Vector Length extensions
    pub has_avx512_vl: bool,
}

impl CpuFeatures {
    /// Detect CPU features at runtime
    ///
    /// # Platform Behavior
    /// - **x86/x86_64**: CPUID (and XGETBV for AVX state) through `cpufeatures`
    /// - **other targets**: every field is `false`
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            cpufeatures::new!(cpuid_sse, "sse");
            cpufeatures::new!(cpuid_sse2, "sse2");
            cpufeatures::new!(cpuid_sse3, "sse3");
            cpufeatures::new!(cpuid_ssse3, "ssse3");
            cpufeatures::new!(cpuid_sse41, "sse4.1");
            cpufeatures::new!(cpuid_sse42, "sse4.2");
            cpufeatures::new!(cpuid_avx, "avx");
            cpufeatures::new!(cpuid_avx2, "avx2");
            cpufeatures::new!(cpuid_fma, "fma");
            cpufeatures::new!(cpuid_avx512f, "avx512f");
            cpufeatures::new!(cpuid_avx512bw, "avx512bw");
            cpufeatures::new!(cpuid_avx512dq, "avx512dq");
            cpufeatures::new!(cpuid_avx512vl, "avx512vl");

            Self {
                has_sse: cpuid_sse::get(),
                has_sse2: cpuid_sse2::get(),
                has_sse3: cpuid_sse3::get(),
                has_ssse3: cpuid_ssse3::get(),
                has_sse4_1: cpuid_sse41::get(),
                has_sse4_2: cpuid_sse42::get(),
                has_avx: cpuid_avx::get(),
                has_avx2: cpuid_avx2::get(),
                has_fma: cpuid_fma::get(),
                has_avx512_f: cpuid_avx512f::get(),
                has_avx512_bw: cpuid_avx512bw::get(),
                has_avx512_dq: cpuid_avx512dq::get(),
                has_avx512_vl: cpuid_avx512vl::get(),
            }
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        {
            Self::default()
        }
    }

    /// Check if full AVX-512 support is available
    ///
    /// Full AVX-512 requires Foundation + common extensions (BW, DQ, VL).
    pub fn has_avx512_full(&self) -> bool {
        self.has_avx512_f && self.has_avx512_bw && self.has_avx512_dq && self.has_avx512_vl
    }

    /// Highest tier whose features, and those of every lower tier, are present.
    ///
    /// The ladder stops at the first missing rung, so a CPU advertising AVX2
    /// without SSE4.2 ranks as SSE4.1.
    pub fn instruction_set(&self) -> InstructionSet {
        let ladder = [
            self.has_sse,
            self.has_sse2,
            self.has_sse3,
            self.has_ssse3,
            self.has_sse4_1,
            self.has_sse4_2,
            self.has_avx,
            self.has_avx2,
            self.has_avx512_f,
            self.has_avx512_full(),
        ];
        let level = ladder.iter().take_while(|present| **present).count();
        InstructionSet::from_level(level as u8)
    }
}

const UNDETECTED: u8 = u8::MAX;

static DETECTED: AtomicU8 = AtomicU8::new(UNDETECTED);

/// Tier of the host, detected on first use and cached.
///
/// Concurrent first callers may each run the probe; they all store the same
/// value, so the race is harmless and no lock is taken.
pub fn detect_level() -> InstructionSet {
    let cached = DETECTED.load(Ordering::Relaxed);
    if cached != UNDETECTED {
        return InstructionSet::from_level(cached);
    }

    let level = probe();
    DETECTED.store(level.level(), Ordering::Relaxed);
    level
}

#[cold]
fn probe() -> InstructionSet {
    let raw = raw_level();
    let config = DispatchConfig::from_env();
    let level = config.apply(raw);

    tracing::debug!(
        raw = %raw,
        cap = ?config.max_instruction_set,
        level = %level,
        compiled = %InstructionSet::compiled(),
        "detected host instruction set"
    );

    level
}

fn raw_level() -> InstructionSet {
    if cfg!(feature = "force-baseline") {
        return InstructionSet::compiled();
    }

    #[cfg(feature = "runtime-dispatch")]
    {
        CpuFeatures::detect().instruction_set()
    }

    #[cfg(not(feature = "runtime-dispatch"))]
    {
        InstructionSet::compiled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_features() -> CpuFeatures {
        CpuFeatures {
            has_sse: true,
            has_sse2: true,
            has_sse3: true,
            has_ssse3: true,
            has_sse4_1: true,
            has_sse4_2: true,
            has_avx: true,
            has_avx2: true,
            has_fma: true,
            has_avx512_f: true,
            has_avx512_bw: true,
            has_avx512_dq: true,
            has_avx512_vl: true,
        }
    }

    #[test]
    fn test_ladder_ranks_full_feature_set_at_top() {
        assert_eq!(all_features().instruction_set(), InstructionSet::AVX512VL);
        assert_eq!(CpuFeatures::default().instruction_set(), InstructionSet::X386);
    }

    #[test]
    fn test_ladder_stops_at_first_gap() {
        let features = CpuFeatures {
            has_sse4_2: false,
            ..all_features()
        };
        assert_eq!(features.instruction_set(), InstructionSet::SSE4_1);
    }

    #[test]
    fn test_partial_avx512_ranks_as_foundation() {
        let features = CpuFeatures {
            has_avx512_vl: false,
            ..all_features()
        };
        assert!(!features.has_avx512_full());
        assert_eq!(features.instruction_set(), InstructionSet::AVX512F);
    }

    #[test]
    fn test_detect_level_is_stable() {
        let first = detect_level();
        let second = detect_level();
        assert_eq!(first, second);

        #[cfg(all(target_arch = "x86_64", not(feature = "force-baseline")))]
        {
            // Every x86_64 CPU has SSE2; only an explicit cap can lower it.
            if std::env::var(crate::config::MAX_ISA_ENV).is_err() {
                assert!(first >= InstructionSet::SSE2);
            }
        }
    }

    #[test]
    fn test_runtime_detection_never_below_compiled_tier() {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            let features = CpuFeatures::detect();
            println!("Detected CPU features: {features:?}");
            assert!(features.instruction_set() >= InstructionSet::compiled());
        }
    }
}
