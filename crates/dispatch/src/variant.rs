//! Variant Lists and Selection
//!
//! A logical function is compiled once per tier; each compiled body is a
//! [`Variant`]. The variants of one function form a [`VariantList`], sorted
//! strictly ascending by tier.

use core::fmt;

use crate::error::VariantListError;
use crate::instrset::InstructionSet;

/// One compiled body of a logical function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant<F> {
    /// Tier the body was compiled for.
    pub level: InstructionSet,
    /// Entry point, normally a function pointer.
    pub entry: F,
}

impl<F> Variant<F> {
    /// Pair an entry point with its tier.
    pub const fn new(level: InstructionSet, entry: F) -> Self {
        Self { level, entry }
    }
}

/// Non-empty, strictly ascending list of variants.
///
/// Lists declared in a `static` or `const` through [`VariantList::new`] are
/// validated at compile time.
pub struct VariantList<F: 'static> {
    entries: &'static [Variant<F>],
}

impl<F: 'static> VariantList<F> {
    /// Wrap a variant table, panicking if it is empty or out of order.
    ///
    /// In a `const`/`static` initializer the panic becomes a build error.
    pub const fn new(entries: &'static [Variant<F>]) -> Self {
        match Self::try_new(entries) {
            Ok(list) => list,
            Err(VariantListError::Empty) => panic!("variant list must not be empty"),
            Err(VariantListError::NotAscending { .. }) => {
                panic!("variant levels must be strictly ascending")
            }
        }
    }

    /// Wrap a variant table, reporting contract violations as errors.
    pub const fn try_new(entries: &'static [Variant<F>]) -> Result<Self, VariantListError> {
        if entries.is_empty() {
            return Err(VariantListError::Empty);
        }

        let mut index = 1;
        while index < entries.len() {
            let previous = entries[index - 1].level;
            let next = entries[index].level;
            if next.level() <= previous.level() {
                return Err(VariantListError::NotAscending {
                    index,
                    previous,
                    next,
                });
            }
            index += 1;
        }

        Ok(Self { entries })
    }

    /// Variants in ascending tier order.
    #[inline]
    pub const fn as_slice(&self) -> &'static [Variant<F>] {
        self.entries
    }

    /// Number of variants, always at least one.
    #[allow(clippy::len_without_is_empty)]
    #[inline]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate variants in ascending tier order.
    pub fn iter(&self) -> core::slice::Iter<'static, Variant<F>> {
        self.entries.iter()
    }

    /// Lowest-tier variant, the correctness backstop.
    #[inline]
    pub const fn lowest(&self) -> &'static Variant<F> {
        &self.entries[0]
    }

    /// Highest-tier variant.
    #[inline]
    pub const fn highest(&self) -> &'static Variant<F> {
        &self.entries[self.entries.len() - 1]
    }

    /// Least tier a host must support to run any variant.
    #[inline]
    pub const fn minimum(&self) -> InstructionSet {
        self.lowest().level
    }

    /// Tiers present in the list, ascending.
    pub fn levels(&self) -> impl Iterator<Item = InstructionSet> + 'static {
        self.entries.iter().map(|variant| variant.level)
    }
}

impl<F: 'static> Clone for VariantList<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: 'static> Copy for VariantList<F> {}

impl<F: 'static> fmt::Debug for VariantList<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.levels()).finish()
    }
}

/// Pick the variant that best fits a host at `level`.
///
/// Walks the list from the highest tier down and returns the first variant
/// whose tier is `<= level`. A host below every tier gets the lowest variant;
/// [`Dispatcher`](crate::Dispatcher) refuses that case before calling here.
pub fn select<F: 'static>(level: InstructionSet, variants: &VariantList<F>) -> &'static Variant<F> {
    variants
        .entries
        .iter()
        .rev()
        .find(|variant| variant.level <= level)
        .unwrap_or_else(|| variants.lowest())
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn level(n: u8) -> InstructionSet {
        InstructionSet::from_level(n)
    }

    const TABLE: &[Variant<char>] = &[
        Variant::new(level(2), 'A'),
        Variant::new(level(5), 'B'),
        Variant::new(level(8), 'C'),
        Variant::new(level(10), 'D'),
    ];

    static TIERS: VariantList<char> = VariantList::new(TABLE);

    #[test]
    fn test_select_picks_highest_supported() {
        assert_eq!(select(level(7), &TIERS).entry, 'B');
        assert_eq!(select(level(8), &TIERS).entry, 'C');
        assert_eq!(select(level(10), &TIERS).entry, 'D');
    }

    #[test]
    fn test_select_above_max_known_uses_top_variant() {
        assert_eq!(select(level(11), &TIERS).entry, 'D');
        assert_eq!(select(level(u8::MAX), &TIERS).entry, 'D');
    }

    #[test]
    fn test_select_below_minimum_falls_back_to_lowest() {
        assert_eq!(select(level(0), &TIERS).entry, 'A');
        assert_eq!(select(level(1), &TIERS).entry, 'A');
    }

    #[test]
    fn test_list_accessors() {
        assert_eq!(TIERS.len(), 4);
        assert_eq!(TIERS.minimum(), level(2));
        assert_eq!(TIERS.highest().entry, 'D');
        assert_eq!(
            TIERS.levels().collect::<Vec<_>>(),
            vec![level(2), level(5), level(8), level(10)]
        );
    }

    #[test]
    fn test_try_new_rejects_empty() {
        static EMPTY: [Variant<char>; 0] = [];
        assert_eq!(
            VariantList::try_new(&EMPTY).unwrap_err(),
            VariantListError::Empty
        );
    }

    #[test]
    fn test_try_new_rejects_duplicates_and_descending() {
        static DUPLICATE: [Variant<char>; 2] =
            [Variant::new(level(5), 'A'), Variant::new(level(5), 'B')];
        static DESCENDING: [Variant<char>; 3] = [
            Variant::new(level(2), 'A'),
            Variant::new(level(8), 'B'),
            Variant::new(level(5), 'C'),
        ];

        assert_eq!(
            VariantList::try_new(&DUPLICATE).unwrap_err(),
            VariantListError::NotAscending {
                index: 1,
                previous: level(5),
                next: level(5),
            }
        );
        assert!(matches!(
            VariantList::try_new(&DESCENDING),
            Err(VariantListError::NotAscending { index: 2, .. })
        ));
    }
}
