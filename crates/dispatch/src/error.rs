//! Error types

use thiserror::Error;

use crate::instrset::InstructionSet;

/// The host cannot run even the lowest compiled variant of a logical function.
///
/// Raised on the first call of the function. There is no lower tier to fall
/// back to, so callers should treat it as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "processor does not support least required instruction set for `{function}`: \
     requires {required}, detected {detected}"
)]
pub struct UnsupportedInstructionSetError {
    /// Logical function that failed to resolve.
    pub function: &'static str,
    /// Lowest variant tier, or the binary's compiled tier if higher.
    pub required: InstructionSet,
    /// Tier reported by the detector.
    pub detected: InstructionSet,
}

/// A variant list that violates the ordering contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VariantListError {
    /// No variants were supplied.
    #[error("variant list is empty")]
    Empty,

    /// Levels are not strictly ascending.
    #[error("variant levels must be strictly ascending: {previous} is followed by {next} at index {index}")]
    NotAscending {
        /// Index of the offending entry.
        index: usize,
        /// Level of the entry before it.
        previous: InstructionSet,
        /// Level of the offending entry.
        next: InstructionSet,
    },
}

/// A string that names no known instruction-set tier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown instruction set `{0}`")]
pub struct ParseInstructionSetError(pub String);
