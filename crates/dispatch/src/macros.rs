//! Declaration Macro
//!
//! [`dispatch!`](crate::dispatch) writes the three pieces a dispatched
//! function needs: the public wrapper, the `static` [`Dispatcher`](crate::Dispatcher)
//! behind it, and the trampoline the slot starts out pointing at.

/// Declare a runtime-dispatched function.
///
/// ```rust
/// use tier_dispatch::{dispatch, InstructionSet};
///
/// fn sum_scalar(values: &[u32]) -> u32 {
///     values.iter().sum()
/// }
///
/// fn sum_wide(values: &[u32]) -> u32 {
///     values.chunks(4).map(|chunk| chunk.iter().sum::<u32>()).sum()
/// }
///
/// dispatch! {
///     /// Sum a slice with the widest variant this host supports.
///     pub fn sum(values: &[u32]) -> u32;
///     static SUM = [
///         InstructionSet::X386 => sum_scalar,
///         InstructionSet::SSE4_1 => sum_wide,
///     ];
/// }
///
/// assert_eq!(sum(&[1, 2, 3, 4, 5]), 15);
/// assert!(SUM.selected().is_some());
/// ```
///
/// The generated pieces:
///
/// - `fn sum(..)`: loads the slot and calls through it.
/// - `static SUM: Dispatcher<fn(..) -> ..>`: the variant table, the slot and
///   the selection bookkeeping, with the same visibility as the function.
/// - a private trampoline that resolves `SUM` on the first call and forwards
///   the arguments to the selected variant.
///
/// Tiers must be listed in strictly ascending order; an empty or unordered
/// table fails to compile. An optional `detect = path;` line replaces
/// [`detect_level`](crate::detect_level) with any `fn() -> InstructionSet`.
///
/// Calling the function on a host below
/// [`Dispatcher::minimum`](crate::Dispatcher::minimum) panics with an
/// [`UnsupportedInstructionSetError`](crate::UnsupportedInstructionSetError)
/// message. Use `SUM.try_entry()` to handle that case instead.
#[macro_export]
macro_rules! dispatch {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)?;
        static $slot:ident = [$($level:expr => $entry:path),+ $(,)?];
        $(detect = $detect:path;)?
    ) => {
        $(#[$meta])*
        #[inline]
        $vis fn $name($($arg: $ty),*) $(-> $ret)? {
            ($slot.entry())($($arg),*)
        }

        $vis static $slot: $crate::Dispatcher<fn($($ty),*) $(-> $ret)?> = {
            // Named once so the variant repetition below never nests the
            // argument repetition.
            #[allow(non_camel_case_types)]
            type __dispatch_entry = fn($($ty),*) $(-> $ret)?;

            const VARIANTS: &[$crate::Variant<__dispatch_entry>] = &[
                $($crate::Variant::new($level, $entry as __dispatch_entry)),+
            ];

            fn trampoline($($arg: $ty),*) $(-> $ret)? {
                ($slot.resolve_or_abort())($($arg),*)
            }

            $crate::Dispatcher::with_detector(
                ::core::stringify!($name),
                $crate::VariantList::new(VARIANTS),
                trampoline as __dispatch_entry,
                $crate::__dispatch_detector!($($detect)?),
            )
        };
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __dispatch_detector {
    () => {
        $crate::detect_level
    };
    ($detect:path) => {
        $detect
    };
}
