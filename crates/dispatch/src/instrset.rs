//! Instruction-Set Tiers
//!
//! A tier is a small integer ranking of x86 SIMD capability. Every tier is a
//! superset of the tiers below it, so "can this host run code compiled for
//! tier `t`" reduces to `host >= t`.
//!
//! | level | tier      | `#[target_feature]` names                  |
//! |-------|-----------|--------------------------------------------|
//! | 0     | x386      | -                                          |
//! | 1     | SSE       | `sse`                                      |
//! | 2     | SSE2      | `sse2`                                     |
//! | 3     | SSE3      | `sse3`                                     |
//! | 4     | SSSE3     | `ssse3`                                    |
//! | 5     | SSE4.1    | `sse4.1`                                   |
//! | 6     | SSE4.2    | `sse4.2`                                   |
//! | 7     | AVX       | `avx`                                      |
//! | 8     | AVX2      | `avx2`                                     |
//! | 9     | AVX-512F  | `avx512f`                                  |
//! | 10    | AVX-512   | `avx512f`, `avx512vl`, `avx512bw`, `avx512dq` |
//!
//! Levels above 10 are representable so that binaries built against a newer
//! tier table still order correctly; they have no name.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseInstructionSetError;

/// Ranked CPU capability tier.
///
/// Ordering follows the level: `InstructionSet::AVX2 > InstructionSet::SSE4_2`.
/// The AVX-512 VL/BW/DQ aliases share level 10.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct InstructionSet(u8);

impl InstructionSet {
    /// 80386 instruction set, no SIMD.
    pub const X386: Self = Self(0);
    /// SSE (XMM registers, single precision).
    pub const SSE: Self = Self(1);
    /// SSE2 (baseline on every x86_64 CPU).
    pub const SSE2: Self = Self(2);
    /// SSE3.
    pub const SSE3: Self = Self(3);
    /// Supplementary SSE3.
    pub const SSSE3: Self = Self(4);
    /// SSE4.1.
    pub const SSE4_1: Self = Self(5);
    /// SSE4.2.
    pub const SSE4_2: Self = Self(6);
    /// AVX (YMM registers).
    pub const AVX: Self = Self(7);
    /// AVX2.
    pub const AVX2: Self = Self(8);
    /// AVX-512 Foundation.
    pub const AVX512F: Self = Self(9);
    /// AVX-512 with VL, BW and DQ extensions.
    pub const AVX512VL: Self = Self(10);
    /// Alias of [`InstructionSet::AVX512VL`].
    pub const AVX512BW: Self = Self(10);
    /// Alias of [`InstructionSet::AVX512VL`].
    pub const AVX512DQ: Self = Self(10);

    /// Highest tier with a known name and feature set.
    pub const MAX_KNOWN: Self = Self::AVX512VL;

    /// Build a tier from its raw level.
    #[inline]
    pub const fn from_level(level: u8) -> Self {
        Self(level)
    }

    /// Raw level of this tier.
    #[inline]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Short lowercase name, `None` for levels above [`InstructionSet::MAX_KNOWN`].
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("x386"),
            1 => Some("sse"),
            2 => Some("sse2"),
            3 => Some("sse3"),
            4 => Some("ssse3"),
            5 => Some("sse4.1"),
            6 => Some("sse4.2"),
            7 => Some("avx"),
            8 => Some("avx2"),
            9 => Some("avx512f"),
            10 => Some("avx512"),
            _ => None,
        }
    }

    /// Target features a variant compiled for this tier enables.
    ///
    /// Rust's `target_feature` implies the lower SSE/AVX features, so only the
    /// features this tier adds are listed.
    pub const fn target_features(self) -> &'static [&'static str] {
        match self.0 {
            0 => &[],
            1 => &["sse"],
            2 => &["sse2"],
            3 => &["sse3"],
            4 => &["ssse3"],
            5 => &["sse4.1"],
            6 => &["sse4.2"],
            7 => &["avx"],
            8 => &["avx2"],
            9 => &["avx512f"],
            _ => &["avx512f", "avx512vl", "avx512bw", "avx512dq"],
        }
    }

    /// Tier the current binary was compiled for.
    ///
    /// Derived from the `target_feature` configuration of this crate's build,
    /// e.g. `SSE2` for a default `x86_64-unknown-linux-gnu` build and `AVX2`
    /// under `-C target-cpu=haswell`. Non-x86 targets report `X386`.
    pub const fn compiled() -> Self {
        if cfg!(all(
            target_feature = "avx512f",
            target_feature = "avx512vl",
            target_feature = "avx512bw",
            target_feature = "avx512dq"
        )) {
            Self::AVX512VL
        } else if cfg!(target_feature = "avx512f") {
            Self::AVX512F
        } else if cfg!(target_feature = "avx2") {
            Self::AVX2
        } else if cfg!(target_feature = "avx") {
            Self::AVX
        } else if cfg!(target_feature = "sse4.2") {
            Self::SSE4_2
        } else if cfg!(target_feature = "sse4.1") {
            Self::SSE4_1
        } else if cfg!(target_feature = "ssse3") {
            Self::SSSE3
        } else if cfg!(target_feature = "sse3") {
            Self::SSE3
        } else if cfg!(target_feature = "sse2") {
            Self::SSE2
        } else if cfg!(target_feature = "sse") {
            Self::SSE
        } else {
            Self::X386
        }
    }
}

impl fmt::Display for InstructionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "level {}", self.0),
        }
    }
}

impl fmt::Debug for InstructionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstructionSet({self})")
    }
}

impl From<InstructionSet> for u8 {
    fn from(isa: InstructionSet) -> Self {
        isa.0
    }
}

impl FromStr for InstructionSet {
    type Err = ParseInstructionSetError;

    /// Parse a tier name (`"avx2"`, `"SSE4_1"`, `"sse4.1"`) or a bare level (`"8"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if let Ok(level) = name.parse::<u8>() {
            return Ok(Self(level));
        }

        let isa = match name.replace('_', ".").as_str() {
            "x386" | "none" => Self::X386,
            "sse" => Self::SSE,
            "sse2" => Self::SSE2,
            "sse3" => Self::SSE3,
            "ssse3" => Self::SSSE3,
            "sse4.1" | "sse41" => Self::SSE4_1,
            "sse4.2" | "sse42" => Self::SSE4_2,
            "avx" => Self::AVX,
            "avx2" => Self::AVX2,
            "avx512f" => Self::AVX512F,
            "avx512" | "avx512vl" | "avx512bw" | "avx512dq" => Self::AVX512VL,
            _ => return Err(ParseInstructionSetError(s.to_owned())),
        };
        Ok(isa)
    }
}
