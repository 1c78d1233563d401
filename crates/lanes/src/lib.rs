#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! tier-lanes: Register-sized vector types addressed by lane count and element type
//!
//! Kernels written against `Vector<T, N>` pick up the right 128-, 256- or
//! 512-bit container at compile time; the same kernel body is then compiled
//! once per instruction-set tier and dispatched at run time by
//! `tier-dispatch`.
//!
//! # Architecture
//!
//! - `element`: `Element`, the sealed set of lane types
//! - `register`: `V128`/`V256`/`V512` vectors and their masks
//! - `mapping`: `VectorOf<N>`, the `(N, T)` table and its aliases
//!
//! # Example Usage
//!
//! ```rust
//! use tier_lanes::{Vec16f, Vector};
//!
//! let values: [f32; 16] = core::array::from_fn(|i| (i + 1) as f32);
//! let vector: Vector<f32, 16> = Vec16f::load(&values);
//! assert_eq!(vector.horizontal_add(), 136.0);
//! ```

#[cfg(test)]
extern crate std;

pub mod element;
pub mod mapping;
pub mod register;

pub use element::Element;
pub use mapping::*;
pub use register::{Mask128, Mask256, Mask512, V128, V256, V512};
