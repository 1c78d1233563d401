#![warn(missing_docs)]
#![warn(clippy::all)]

//! tier-dispatch: Runtime instruction-set dispatch for x86 SIMD code
//!
//! A function compiled several times, once per instruction-set tier, runs the
//! best compiled copy the host supports. The host is probed once per process;
//! each logical function resolves on its first call and afterwards costs one
//! atomic load and an indirect call.
//!
//! # Architecture
//!
//! - `instrset`: `InstructionSet` tier ranking (x386 → AVX-512)
//! - `detect`: CPU feature detection and the cached host tier
//! - `config`: environment cap on the detected tier
//! - `variant`: `Variant`, `VariantList` and the `select` rule
//! - `slot`: `DispatchSlot`, the atomically swapped entry point
//! - `dispatcher`: `Dispatcher`, tying the three together per function
//! - `dispatch!`: declaration macro generating wrapper, dispatcher and trampoline
//!
//! # Selection Rule
//!
//! Variants are ordered by ascending tier. The selected variant is the one
//! with the highest tier not above the host tier. A host below the lowest
//! tier, or below the tier the binary itself was compiled for, cannot run the
//! function at all and gets an [`UnsupportedInstructionSetError`].
//!
//! # Feature Flags
//!
//! - `runtime-dispatch` (default): probe the host with CPUID
//! - `force-baseline`: report the tier the binary was compiled for, so every
//!   function resolves to its baseline variant (deterministic testing)
//!
//! # Example Usage
//!
//! ```rust
//! use tier_dispatch::{dispatch, InstructionSet};
//!
//! fn dot_portable(a: &[f32; 4], b: &[f32; 4]) -> f32 {
//!     a.iter().zip(b).map(|(x, y)| x * y).sum()
//! }
//!
//! fn dot_sse2(a: &[f32; 4], b: &[f32; 4]) -> f32 {
//!     // A real variant would be a `#[target_feature(enable = "sse2")]` body.
//!     dot_portable(a, b)
//! }
//!
//! dispatch! {
//!     pub fn dot(a: &[f32; 4], b: &[f32; 4]) -> f32;
//!     static DOT = [
//!         InstructionSet::X386 => dot_portable,
//!         InstructionSet::SSE2 => dot_sse2,
//!     ];
//! }
//!
//! assert_eq!(dot(&[1.0; 4], &[2.0; 4]), 8.0);
//! println!("dot runs the {} variant", DOT.selected().unwrap());
//! ```

pub mod config;
pub mod detect;
pub mod dispatcher;
pub mod error;
pub mod instrset;
mod macros;
pub mod slot;
pub mod variant;

pub use config::{DispatchConfig, MAX_ISA_ENV};
pub use detect::{detect_level, CpuFeatures};
pub use dispatcher::{Detector, Dispatcher};
pub use error::{ParseInstructionSetError, UnsupportedInstructionSetError, VariantListError};
pub use instrset::InstructionSet;
pub use slot::{DispatchSlot, SlotState};
pub use variant::{select, Variant, VariantList};
