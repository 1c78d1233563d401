//! Dispatched demo kernels
//!
//! `sum16` adds sixteen floats through a 512-bit lane container. The body is
//! written once; each x86 variant recompiles it with a wider feature set and
//! the `SUM16` dispatcher picks one on the first call.

use tier_dispatch::{dispatch, InstructionSet};
use tier_lanes::Vec16f;

#[inline(always)]
fn sum16_body(values: &[f32; 16]) -> f32 {
    Vec16f::from_array(*values).horizontal_add()
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86 {
    use super::sum16_body;

    #[target_feature(enable = "sse2")]
    unsafe fn sse2(values: &[f32; 16]) -> f32 {
        sum16_body(values)
    }

    #[target_feature(enable = "sse4.1")]
    unsafe fn sse4_1(values: &[f32; 16]) -> f32 {
        sum16_body(values)
    }

    #[target_feature(enable = "avx2")]
    unsafe fn avx2(values: &[f32; 16]) -> f32 {
        sum16_body(values)
    }

    #[target_feature(enable = "avx512f,avx512vl,avx512bw,avx512dq")]
    unsafe fn avx512(values: &[f32; 16]) -> f32 {
        sum16_body(values)
    }

    // SAFETY (all four): only referenced from the `SUM16` table, which selects
    // a variant no higher than the detected host tier.

    pub(super) fn sum16_sse2(values: &[f32; 16]) -> f32 {
        unsafe { sse2(values) }
    }

    pub(super) fn sum16_sse4_1(values: &[f32; 16]) -> f32 {
        unsafe { sse4_1(values) }
    }

    pub(super) fn sum16_avx2(values: &[f32; 16]) -> f32 {
        unsafe { avx2(values) }
    }

    pub(super) fn sum16_avx512(values: &[f32; 16]) -> f32 {
        unsafe { avx512(values) }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
dispatch! {
    /// Sum sixteen floats with the widest variant this host supports.
    pub fn sum16(values: &[f32; 16]) -> f32;
    static SUM16 = [
        InstructionSet::SSE2 => x86::sum16_sse2,
        InstructionSet::SSE4_1 => x86::sum16_sse4_1,
        InstructionSet::AVX2 => x86::sum16_avx2,
        InstructionSet::AVX512VL => x86::sum16_avx512,
    ];
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn sum16_portable(values: &[f32; 16]) -> f32 {
    sum16_body(values)
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
dispatch! {
    /// Sum sixteen floats.
    pub fn sum16(values: &[f32; 16]) -> f32;
    static SUM16 = [InstructionSet::X386 => sum16_portable];
}
