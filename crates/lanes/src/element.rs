//! Lane element types
//!
//! [`Element`] is implemented for the ten primitive types a vector lane can
//! hold and is sealed against further implementations.

use core::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// A primitive that can occupy one vector lane.
pub trait Element: sealed::Sealed + Copy + Default + PartialEq + Debug + 'static {
    /// Width of one lane in bits.
    const BITS: usize;

    /// Rust name of the type, e.g. `"u16"`.
    const NAME: &'static str;

    /// Lane-wise addition. Integers wrap; floats follow IEEE 754.
    fn lane_add(self, other: Self) -> Self;
}

macro_rules! integer_element {
    ($($ty:ty),+) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const BITS: usize = <$ty>::BITS as usize;
                const NAME: &'static str = stringify!($ty);

                #[inline(always)]
                fn lane_add(self, other: Self) -> Self {
                    self.wrapping_add(other)
                }
            }
        )+
    };
}

macro_rules! float_element {
    ($($ty:ty => $bits:literal),+) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const BITS: usize = $bits;
                const NAME: &'static str = stringify!($ty);

                #[inline(always)]
                fn lane_add(self, other: Self) -> Self {
                    self + other
                }
            }
        )+
    };
}

integer_element!(i8, u8, i16, u16, i32, u32, i64, u64);
float_element!(f32 => 32, f64 => 64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(<i8 as Element>::BITS, 8);
        assert_eq!(<u16 as Element>::BITS, 16);
        assert_eq!(<f32 as Element>::BITS, 32);
        assert_eq!(<u64 as Element>::BITS, 64);
        assert_eq!(<f64 as Element>::BITS, 64);
    }

    #[test]
    fn test_integer_addition_wraps() {
        assert_eq!(250u8.lane_add(10), 4);
        assert_eq!(i16::MAX.lane_add(1), i16::MIN);
    }

    #[test]
    fn test_names() {
        assert_eq!(<u32 as Element>::NAME, "u32");
        assert_eq!(<f64 as Element>::NAME, "f64");
    }
}
