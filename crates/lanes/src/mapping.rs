//! `(N, T)` to vector type mapping
//!
//! [`VectorOf<N>`] is implemented for an element type `T` exactly when `N`
//! lanes of `T` fill a 128-, 256- or 512-bit register. Generic code names the
//! vector as [`Vector<T, N>`] and its mask as [`Mask<T, N>`]; unsupported
//! pairs fail to compile:
//!
//! ```compile_fail
//! use tier_lanes::Vector;
//!
//! // 3 x f32 is 96 bits: no register of that width.
//! let v = Vector::<f32, 3>::splat(1.0);
//! ```
//!
//! Signed and unsigned elements of the same width share a mask type, and so
//! do integer and float elements with the same lane count.
//!
//! | bits | 8-bit | 16-bit | 32-bit         | 64-bit         |
//! |------|-------|--------|----------------|----------------|
//! | 128  | 16    | 8      | 4 (`i`,`ui`,`f`) | 2 (`q`,`uq`,`d`) |
//! | 256  | 32    | 16     | 8              | 4              |
//! | 512  | 64    | 32     | 16             | 8              |

use crate::element::Element;
use crate::register::{Mask128, Mask256, Mask512, V128, V256, V512};

/// Register-sized vector of `N` lanes of `Self`.
pub trait VectorOf<const N: usize>: Element {
    /// Vector type holding `N` lanes of `Self`.
    type Vector: Copy + Default;
    /// Mask type with one flag per lane.
    type Mask: Copy + Default;
    /// Register width in bits.
    const TOTAL_BITS: usize;
}

/// Vector of `N` lanes of `T`, e.g. `Vector<i32, 8>` is [`Vec8i`].
pub type Vector<T, const N: usize> = <T as VectorOf<N>>::Vector;

/// Mask for [`Vector<T, N>`].
pub type Mask<T, const N: usize> = <T as VectorOf<N>>::Mask;

/// `N` lanes of `i8`.
pub type VecC<const N: usize> = Vector<i8, N>;
/// `N` lanes of `u8`.
pub type VecUc<const N: usize> = Vector<u8, N>;
/// `N` lanes of `i16`.
pub type VecS<const N: usize> = Vector<i16, N>;
/// `N` lanes of `u16`.
pub type VecUs<const N: usize> = Vector<u16, N>;
/// `N` lanes of `i32`.
pub type VecI<const N: usize> = Vector<i32, N>;
/// `N` lanes of `u32`.
pub type VecUi<const N: usize> = Vector<u32, N>;
/// `N` lanes of `i64`.
pub type VecQ<const N: usize> = Vector<i64, N>;
/// `N` lanes of `u64`.
pub type VecUq<const N: usize> = Vector<u64, N>;
/// `N` lanes of `f32`.
pub type VecF<const N: usize> = Vector<f32, N>;
/// `N` lanes of `f64`.
pub type VecD<const N: usize> = Vector<f64, N>;

/// 64 lanes of `T`.
pub type Vec64<T> = Vector<T, 64>;
/// 32 lanes of `T`.
pub type Vec32<T> = Vector<T, 32>;
/// 16 lanes of `T`.
pub type Vec16<T> = Vector<T, 16>;
/// 8 lanes of `T`.
pub type Vec8<T> = Vector<T, 8>;
/// 4 lanes of `T`.
pub type Vec4<T> = Vector<T, 4>;
/// 2 lanes of `T`.
pub type Vec2<T> = Vector<T, 2>;

/// One row of the mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingRow {
    /// Lane count.
    pub lanes: usize,
    /// Element type name.
    pub element: &'static str,
    /// Register width in bits.
    pub total_bits: usize,
    /// Named vector alias.
    pub vector: &'static str,
    /// Named mask alias.
    pub mask: &'static str,
}

macro_rules! map {
    ($($lanes:literal x $elem:ty => $vector:ident: $register:ident, $mask:ident: $mask_register:ident, $bits:literal;)+) => {
        $(
            impl VectorOf<$lanes> for $elem {
                type Vector = $register<$elem, $lanes>;
                type Mask = $mask_register<$lanes>;
                const TOTAL_BITS: usize = $bits;
            }

            #[doc = concat!("`", stringify!($lanes), "` lanes of `", stringify!($elem), "` in ", stringify!($bits), " bits.")]
            pub type $vector = $register<$elem, $lanes>;
        )+

        /// Every supported `(N, T)` pair with its named aliases.
        pub const MAPPING: &[MappingRow] = &[
            $(
                MappingRow {
                    lanes: $lanes,
                    element: stringify!($elem),
                    total_bits: $bits,
                    vector: stringify!($vector),
                    mask: stringify!($mask),
                },
            )+
        ];
    };
}

map! {
    // 128 bits
    16 x i8 => Vec16c: V128, Vec16cb: Mask128, 128;
    16 x u8 => Vec16uc: V128, Vec16cb: Mask128, 128;
    8 x i16 => Vec8s: V128, Vec8sb: Mask128, 128;
    8 x u16 => Vec8us: V128, Vec8sb: Mask128, 128;
    4 x i32 => Vec4i: V128, Vec4ib: Mask128, 128;
    4 x u32 => Vec4ui: V128, Vec4ib: Mask128, 128;
    2 x i64 => Vec2q: V128, Vec2qb: Mask128, 128;
    2 x u64 => Vec2uq: V128, Vec2qb: Mask128, 128;
    4 x f32 => Vec4f: V128, Vec4fb: Mask128, 128;
    2 x f64 => Vec2d: V128, Vec2db: Mask128, 128;
    // 256 bits
    32 x i8 => Vec32c: V256, Vec32cb: Mask256, 256;
    32 x u8 => Vec32uc: V256, Vec32cb: Mask256, 256;
    16 x i16 => Vec16s: V256, Vec16sb: Mask256, 256;
    16 x u16 => Vec16us: V256, Vec16sb: Mask256, 256;
    8 x i32 => Vec8i: V256, Vec8ib: Mask256, 256;
    8 x u32 => Vec8ui: V256, Vec8ib: Mask256, 256;
    4 x i64 => Vec4q: V256, Vec4qb: Mask256, 256;
    4 x u64 => Vec4uq: V256, Vec4qb: Mask256, 256;
    8 x f32 => Vec8f: V256, Vec8fb: Mask256, 256;
    4 x f64 => Vec4d: V256, Vec4db: Mask256, 256;
    // 512 bits
    64 x i8 => Vec64c: V512, Vec64cb: Mask512, 512;
    64 x u8 => Vec64uc: V512, Vec64cb: Mask512, 512;
    32 x i16 => Vec32s: V512, Vec32sb: Mask512, 512;
    32 x u16 => Vec32us: V512, Vec32sb: Mask512, 512;
    16 x i32 => Vec16i: V512, Vec16ib: Mask512, 512;
    16 x u32 => Vec16ui: V512, Vec16ib: Mask512, 512;
    8 x i64 => Vec8q: V512, Vec8qb: Mask512, 512;
    8 x u64 => Vec8uq: V512, Vec8qb: Mask512, 512;
    16 x f32 => Vec16f: V512, Vec16fb: Mask512, 512;
    8 x f64 => Vec8d: V512, Vec8db: Mask512, 512;
}

macro_rules! mask_alias {
    ($($name:ident = $mask:ident<$lanes:literal>;)+) => {
        $(
            #[doc = concat!("Mask of ", stringify!($lanes), " lanes in a ", stringify!($mask), ".")]
            pub type $name = $mask<$lanes>;
        )+
    };
}

mask_alias! {
    Vec16cb = Mask128<16>;
    Vec8sb = Mask128<8>;
    Vec4ib = Mask128<4>;
    Vec2qb = Mask128<2>;
    Vec4fb = Mask128<4>;
    Vec2db = Mask128<2>;
    Vec32cb = Mask256<32>;
    Vec16sb = Mask256<16>;
    Vec8ib = Mask256<8>;
    Vec4qb = Mask256<4>;
    Vec8fb = Mask256<8>;
    Vec4db = Mask256<4>;
    Vec64cb = Mask512<64>;
    Vec32sb = Mask512<32>;
    Vec16ib = Mask512<16>;
    Vec8qb = Mask512<8>;
    Vec16fb = Mask512<16>;
    Vec8db = Mask512<8>;
}

/// Register width of `N` lanes of `T`.
pub const fn total_bits<T: VectorOf<N>, const N: usize>() -> usize {
    T::TOTAL_BITS
}
