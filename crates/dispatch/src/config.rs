//! Detection Configuration
//!
//! Cargo features pick the detection strategy at build time:
//!
//! - `runtime-dispatch` (default): probe the host CPU with CPUID.
//! - `force-baseline`: report [`InstructionSet::compiled()`] regardless of the
//!   host, so every logical function resolves to its baseline variant.
//!
//! At run time the `TIER_DISPATCH_MAX_ISA` environment variable caps the
//! detected tier. The cap only ever lowers the result: asking for a tier the
//! host lacks would select variants that fault on the first instruction.

use crate::instrset::InstructionSet;

/// Environment variable holding the tier cap.
pub const MAX_ISA_ENV: &str = "TIER_DISPATCH_MAX_ISA";

/// Runtime adjustments applied to the raw detection result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Highest tier the detector may report.
    pub max_instruction_set: Option<InstructionSet>,
}

impl DispatchConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(MAX_ISA_ENV).ok().as_deref())
    }

    /// Build the configuration from a raw `TIER_DISPATCH_MAX_ISA` value.
    ///
    /// Empty values mean "no cap". Unparseable values are logged and ignored.
    pub fn from_value(value: Option<&str>) -> Self {
        let max_instruction_set = match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => None,
            Some(raw) => match raw.parse::<InstructionSet>() {
                Ok(isa) => Some(isa),
                Err(err) => {
                    tracing::warn!(env = MAX_ISA_ENV, %err, "ignoring invalid instruction-set cap");
                    None
                }
            },
        };

        Self {
            max_instruction_set,
        }
    }

    /// Clamp a detected tier to the configured cap.
    pub fn apply(&self, detected: InstructionSet) -> InstructionSet {
        match self.max_instruction_set {
            Some(cap) => detected.min(cap),
            None => detected,
        }
    }
}
