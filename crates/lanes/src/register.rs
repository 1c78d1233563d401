//! Register-sized lane containers
//!
//! One vector type and one mask type per register width. A vector holds
//! exactly one register's worth of lanes; any other `(T, N)` combination is
//! rejected when the type is first constructed. A mask takes one flag per
//! lane of some vector of the same width, so its lane count is a power of two
//! between `BITS / 64` and `BITS / 8`:
//!
//! ```compile_fail
//! // No 128-bit vector has three lanes.
//! let mask = tier_lanes::Mask128::<3>::splat(true);
//! ```
//!
//! ```text
//! V256<i32, 8>: 32-byte aligned, 8 lanes of 32 bits
//! [0  1  2  3  4  5  6  7]
//!  └───────── ymm ───────┘
//! ```

use core::fmt;
use core::ops::{Index, IndexMut};

use crate::element::Element;

macro_rules! register {
    ($(#[$vector_meta:meta])* $vector:ident, $(#[$mask_meta:meta])* $mask:ident, $bits:literal, $align:literal) => {
        $(#[$vector_meta])*
        #[derive(Clone, Copy, PartialEq)]
        #[repr(C, align($align))]
        pub struct $vector<T: Element, const N: usize> {
            lanes: [T; N],
        }

        impl<T: Element, const N: usize> $vector<T, N> {
            /// Register width in bits.
            pub const BITS: usize = $bits;

            /// Number of lanes.
            pub const LANES: usize = N;

            const FILLS_REGISTER: () = assert!(
                N * T::BITS == $bits,
                concat!("lane count times element width must equal ", stringify!($bits), " bits")
            );

            /// All lanes set to `value`.
            #[inline]
            pub fn splat(value: T) -> Self {
                Self::from_array([value; N])
            }

            /// Wrap an array of lanes.
            #[inline]
            pub fn from_array(lanes: [T; N]) -> Self {
                #[allow(clippy::let_unit_value)]
                let () = Self::FILLS_REGISTER;
                Self { lanes }
            }

            /// Load the first `N` values of `values`.
            ///
            /// # Panics
            ///
            /// Panics if `values` holds fewer than `N` elements.
            #[inline]
            pub fn load(values: &[T]) -> Self {
                assert!(
                    values.len() >= N,
                    "slice of {} elements is shorter than {} lanes",
                    values.len(),
                    N
                );
                let mut lanes = [T::default(); N];
                lanes.copy_from_slice(&values[..N]);
                Self::from_array(lanes)
            }

            /// Load exactly `N` values, `None` on a length mismatch.
            #[inline]
            pub fn from_slice(values: &[T]) -> Option<Self> {
                (values.len() == N).then(|| Self::load(values))
            }

            /// Store the lanes into the first `N` slots of `out`.
            ///
            /// # Panics
            ///
            /// Panics if `out` holds fewer than `N` elements.
            #[inline]
            pub fn store(&self, out: &mut [T]) {
                out[..N].copy_from_slice(&self.lanes);
            }

            /// Lanes as an array.
            #[inline]
            pub fn as_array(&self) -> &[T; N] {
                &self.lanes
            }

            /// Consume into the lane array.
            #[inline]
            pub fn to_array(self) -> [T; N] {
                self.lanes
            }

            /// Sum of all lanes, reduced pairwise.
            ///
            /// Integer lanes wrap on overflow.
            #[inline]
            pub fn horizontal_add(&self) -> T {
                let mut acc = self.lanes;
                let mut width = N;
                while width > 1 {
                    let half = width / 2;
                    for i in 0..half {
                        acc[i] = acc[i].lane_add(acc[i + half]);
                    }
                    width = half;
                }
                acc[0]
            }
        }

        impl<T: Element, const N: usize> Default for $vector<T, N> {
            fn default() -> Self {
                Self::splat(T::default())
            }
        }

        impl<T: Element, const N: usize> Index<usize> for $vector<T, N> {
            type Output = T;

            #[inline]
            fn index(&self, index: usize) -> &Self::Output {
                &self.lanes[index]
            }
        }

        impl<T: Element, const N: usize> IndexMut<usize> for $vector<T, N> {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                &mut self.lanes[index]
            }
        }

        impl<T: Element, const N: usize> fmt::Debug for $vector<T, N> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}<{}, {}>", stringify!($vector), T::NAME, N)?;
                f.debug_list().entries(self.lanes.iter()).finish()
            }
        }

        $(#[$mask_meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(C, align($align))]
        pub struct $mask<const N: usize> {
            lanes: [bool; N],
        }

        impl<const N: usize> $mask<N> {
            /// Number of lanes.
            pub const LANES: usize = N;

            const FILLS_REGISTER: () = assert!(
                N.is_power_of_two() && N >= $bits / 64 && N <= $bits / 8,
                concat!("mask lane count must match a ", stringify!($bits), "-bit vector")
            );

            /// All lanes set to `value`.
            #[inline]
            pub const fn splat(value: bool) -> Self {
                Self::from_array([value; N])
            }

            /// Wrap an array of lane flags.
            #[inline]
            pub const fn from_array(lanes: [bool; N]) -> Self {
                #[allow(clippy::let_unit_value)]
                let () = Self::FILLS_REGISTER;
                Self { lanes }
            }

            /// Lane flags as an array.
            #[inline]
            pub const fn as_array(&self) -> &[bool; N] {
                &self.lanes
            }

            /// True if any lane is set.
            #[inline]
            pub fn any(&self) -> bool {
                self.lanes.iter().any(|lane| *lane)
            }

            /// True if every lane is set.
            #[inline]
            pub fn all(&self) -> bool {
                self.lanes.iter().all(|lane| *lane)
            }

            /// Number of set lanes.
            #[inline]
            pub fn count(&self) -> usize {
                self.lanes.iter().filter(|lane| **lane).count()
            }
        }

        impl<const N: usize> Default for $mask<N> {
            fn default() -> Self {
                Self::splat(false)
            }
        }

        impl<const N: usize> fmt::Debug for $mask<N> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}<{}>", stringify!($mask), N)?;
                f.debug_list().entries(self.lanes.iter()).finish()
            }
        }
    };
}

register!(
    /// 128-bit vector (XMM), 16-byte aligned.
    V128,
    /// Lane mask for [`V128`] vectors.
    Mask128,
    128,
    16
);

register!(
    /// 256-bit vector (YMM), 32-byte aligned.
    V256,
    /// Lane mask for [`V256`] vectors.
    Mask256,
    256,
    32
);

register!(
    /// 512-bit vector (ZMM), 64-byte aligned.
    V512,
    /// Lane mask for [`V512`] vectors.
    Mask512,
    512,
    64
);

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::{align_of, size_of};
    use std::format;

    #[test]
    fn test_layout_matches_register() {
        assert_eq!(size_of::<V128<i32, 4>>(), 16);
        assert_eq!(align_of::<V128<i32, 4>>(), 16);
        assert_eq!(size_of::<V256<u8, 32>>(), 32);
        assert_eq!(align_of::<V256<u8, 32>>(), 32);
        assert_eq!(size_of::<V512<f64, 8>>(), 64);
        assert_eq!(align_of::<V512<f64, 8>>(), 64);
    }

    #[test]
    fn test_load_store() {
        let values = [1i16, 2, 3, 4, 5, 6, 7, 8, 9];
        let vector = V128::<i16, 8>::load(&values);
        assert_eq!(vector.as_array(), &[1, 2, 3, 4, 5, 6, 7, 8]);

        let mut out = [0i16; 8];
        vector.store(&mut out);
        assert_eq!(out, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(vector[3], 4);
    }

    #[test]
    fn test_from_slice_requires_exact_length() {
        assert!(V128::<u32, 4>::from_slice(&[1, 2, 3]).is_none());
        assert!(V128::<u32, 4>::from_slice(&[1, 2, 3, 4, 5]).is_none());
        assert_eq!(
            V128::<u32, 4>::from_slice(&[1, 2, 3, 4]).map(|v| v.to_array()),
            Some([1, 2, 3, 4])
        );
    }

    #[test]
    #[should_panic(expected = "shorter than 16 lanes")]
    fn test_short_load_panics() {
        let _ = V512::<f32, 16>::load(&[0.0; 4]);
    }

    #[test]
    fn test_horizontal_add() {
        let floats = V512::<f32, 16>::from_array(core::array::from_fn(|i| (i + 1) as f32));
        assert_eq!(floats.horizontal_add(), 136.0);

        let bytes = V128::<u8, 16>::splat(200);
        assert_eq!(bytes.horizontal_add(), 200u8.wrapping_mul(16));

        let doubles = V128::<f64, 2>::from_array([0.5, 0.25]);
        assert_eq!(doubles.horizontal_add(), 0.75);
    }

    #[test]
    fn test_mask_queries() {
        let mask = Mask256::<8>::from_array([true, false, true, false, false, false, false, true]);
        assert!(mask.any());
        assert!(!mask.all());
        assert_eq!(mask.count(), 3);

        assert!(Mask128::<4>::splat(true).all());
        assert!(!Mask512::<16>::default().any());
    }

    #[test]
    fn test_mask_lane_count_bounds() {
        assert_eq!(Mask128::<2>::splat(true).count(), 2);
        assert_eq!(Mask128::<16>::splat(true).count(), 16);
        assert_eq!(Mask256::<4>::default().count(), 0);
        assert_eq!(Mask256::<32>::splat(true).count(), 32);
        assert_eq!(Mask512::<8>::splat(true).count(), 8);
        assert_eq!(Mask512::<64>::splat(true).count(), 64);
    }

    #[test]
    fn test_debug_names_element() {
        let vector = V128::<i32, 4>::splat(7);
        let debug = format!("{vector:?}");
        assert!(debug.starts_with("V128<i32, 4>"));
    }
}
