//! Property-based tests for variant selection
//!
//! Generates arbitrary strictly ascending variant lists and host tiers and
//! checks the selection rule against a direct restatement of it.

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use tier_dispatch::{select, InstructionSet, Variant, VariantList};

fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 2_000,
        ..ProptestConfig::default()
    }
}

/// Strictly ascending, non-empty tier levels.
fn ascending_levels() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::btree_set(0u8..=16, 1..8).prop_map(|set| set.into_iter().collect())
}

/// Leak a list whose entries are the positions of the variants.
fn leak_list(levels: &[u8]) -> VariantList<usize> {
    let entries: Vec<Variant<usize>> = levels
        .iter()
        .enumerate()
        .map(|(index, level)| Variant::new(InstructionSet::from_level(*level), index))
        .collect();
    VariantList::new(Box::leak(entries.into_boxed_slice()))
}

#[test]
fn test_selects_greatest_level_not_above_host() {
    proptest!(proptest_config(), |(levels in ascending_levels(), host in 0u8..=20)| {
        let list = leak_list(&levels);
        let chosen = select(InstructionSet::from_level(host), &list);

        match levels.iter().rposition(|level| *level <= host) {
            Some(expected) => {
                prop_assert_eq!(chosen.entry, expected);
                prop_assert!(chosen.level.level() <= host);
                // Nothing between the chosen tier and the host was skipped.
                if let Some(next) = levels.get(expected + 1) {
                    prop_assert!(*next > host);
                }
            }
            None => {
                prop_assert_eq!(chosen.entry, 0);
                prop_assert_eq!(chosen.level, list.minimum());
            }
        }
    });
}

#[test]
fn test_selection_is_monotone_in_host_level() {
    proptest!(proptest_config(), |(levels in ascending_levels(), a in 0u8..=20, b in 0u8..=20)| {
        let list = leak_list(&levels);
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let at_low = select(InstructionSet::from_level(low), &list);
        let at_high = select(InstructionSet::from_level(high), &list);
        prop_assert!(at_low.level <= at_high.level);
    });
}

#[test]
fn test_single_variant_is_always_selected() {
    proptest!(proptest_config(), |(level in 0u8..=16, host in 0u8..=u8::MAX)| {
        let list = leak_list(&[level]);
        prop_assert_eq!(select(InstructionSet::from_level(host), &list).entry, 0);
    });
}

#[test]
fn test_unordered_lists_are_rejected() {
    proptest!(proptest_config(), |(mut levels in prop::collection::vec(0u8..=16, 2..8))| {
        // Force a violation somewhere in the list.
        let at = levels.len() / 2;
        levels[at] = levels[at - 1];

        let entries: Vec<Variant<usize>> = levels
            .iter()
            .map(|level| Variant::new(InstructionSet::from_level(*level), 0))
            .collect();
        prop_assert!(VariantList::try_new(Box::leak(entries.into_boxed_slice())).is_err());
    });
}

#[test]
fn test_reference_scenario() {
    let list = leak_list(&[2, 5, 8, 10]);
    let pick = |host: u8| select(InstructionSet::from_level(host), &list).entry;

    assert_eq!(pick(7), 1);
    assert_eq!(pick(10), 3);
    assert_eq!(pick(0), 0);
    assert_eq!(pick(11), 3);
}
