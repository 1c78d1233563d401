//! Dispatcher
//!
//! Ties a [`VariantList`] to a [`DispatchSlot`] and a detector. The
//! [`dispatch!`](crate::dispatch) macro declares one `static Dispatcher` per
//! logical function; code can also build one by hand:
//!
//! ```rust
//! use tier_dispatch::{Dispatcher, InstructionSet, Variant, VariantList};
//!
//! fn scalar(x: u32) -> u32 { x + 1 }
//! fn fast(x: u32) -> u32 { x + 1 }
//!
//! const VARIANTS: &[Variant<fn(u32) -> u32>] = &[
//!     Variant::new(InstructionSet::X386, scalar),
//!     Variant::new(InstructionSet::AVX2, fast),
//! ];
//!
//! static INCREMENT: Dispatcher<fn(u32) -> u32> =
//!     Dispatcher::new("increment", VariantList::new(VARIANTS), trampoline);
//!
//! fn trampoline(x: u32) -> u32 {
//!     (INCREMENT.resolve_or_abort())(x)
//! }
//!
//! fn increment(x: u32) -> u32 {
//!     (INCREMENT.entry())(x)
//! }
//!
//! assert_eq!(increment(1), 2);
//! assert!(INCREMENT.selected().is_some());
//! ```

use core::fmt;
use core::sync::atomic::{AtomicU16, AtomicUsize, Ordering};

use crate::detect::detect_level;
use crate::error::UnsupportedInstructionSetError;
use crate::instrset::InstructionSet;
use crate::slot::{DispatchSlot, SlotState};
use crate::variant::{select, VariantList};

/// Source of the host tier.
///
/// The default is [`detect_level`]; tests inject fixed tiers.
pub type Detector = fn() -> InstructionSet;

const UNSELECTED: u16 = u16::MAX;

/// Runtime dispatcher for one logical function.
pub struct Dispatcher<F: Copy + 'static> {
    name: &'static str,
    variants: VariantList<F>,
    slot: DispatchSlot<F>,
    detect: Detector,
    selected: AtomicU16,
    selections: AtomicUsize,
}

impl<F: Copy + 'static> Dispatcher<F> {
    /// Create a dispatcher that detects the host with [`detect_level`].
    ///
    /// `trampoline` must forward its arguments to
    /// [`resolve_or_abort`](Self::resolve_or_abort) (or [`dispatch`](Self::dispatch))
    /// of this same dispatcher.
    pub const fn new(name: &'static str, variants: VariantList<F>, trampoline: F) -> Self {
        Self::with_detector(name, variants, trampoline, detect_level)
    }

    /// Create a dispatcher with a custom detector.
    pub const fn with_detector(
        name: &'static str,
        variants: VariantList<F>,
        trampoline: F,
        detect: Detector,
    ) -> Self {
        Self {
            name,
            variants,
            slot: DispatchSlot::new(trampoline),
            detect,
            selected: AtomicU16::new(UNSELECTED),
            selections: AtomicUsize::new(0),
        }
    }

    /// Entry point for the next call: the trampoline until resolved, the
    /// selected variant afterwards.
    #[inline(always)]
    pub fn entry(&self) -> F {
        self.slot.load()
    }

    /// Detect, select and publish the best variant for this host.
    ///
    /// # Errors
    ///
    /// [`UnsupportedInstructionSetError`] when the host is below
    /// [`minimum`](Self::minimum). The slot is left unresolved, so every
    /// later call reports the same error.
    pub fn dispatch(&self) -> Result<F, UnsupportedInstructionSetError> {
        let detected = (self.detect)();
        let required = self.minimum();

        if detected < required {
            tracing::error!(
                function = self.name,
                %required,
                %detected,
                "processor does not support least required instruction set"
            );
            return Err(UnsupportedInstructionSetError {
                function: self.name,
                required,
                detected,
            });
        }

        let variant = select(detected, &self.variants);

        self.selections.fetch_add(1, Ordering::Relaxed);
        self.selected
            .store(u16::from(variant.level.level()), Ordering::Relaxed);
        self.slot.resolve(variant.entry);

        tracing::debug!(
            function = self.name,
            %detected,
            selected = %variant.level,
            "resolved dispatch slot"
        );

        Ok(variant.entry)
    }

    /// Entry point for the next call, resolving first if needed.
    ///
    /// Unlike calling through [`entry`](Self::entry), this surfaces an
    /// unsupported host as an error instead of a panic.
    pub fn try_entry(&self) -> Result<F, UnsupportedInstructionSetError> {
        match self.slot.state() {
            SlotState::Resolved => Ok(self.slot.load()),
            SlotState::Uninitialized => self.dispatch(),
        }
    }

    /// Resolve for a trampoline, panicking if the host is unsupported.
    ///
    /// # Panics
    ///
    /// With the [`UnsupportedInstructionSetError`] message when no variant
    /// can run on this host.
    #[cold]
    #[inline(never)]
    pub fn resolve_or_abort(&self) -> F {
        match self.dispatch() {
            Ok(entry) => entry,
            Err(err) => panic!("{err}"),
        }
    }

    /// Routing state of the slot.
    pub fn state(&self) -> SlotState {
        self.slot.state()
    }

    /// Tier of the variant most recently selected, `None` before the first
    /// successful dispatch.
    pub fn selected(&self) -> Option<InstructionSet> {
        match self.selected.load(Ordering::Relaxed) {
            UNSELECTED => None,
            level => Some(InstructionSet::from_level(level as u8)),
        }
    }

    /// Number of completed selections.
    ///
    /// One after the first call in single-threaded use. Threads racing on the
    /// first call may each select, all arriving at the same variant.
    pub fn selections(&self) -> usize {
        self.selections.load(Ordering::Relaxed)
    }

    /// Name of the logical function.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Variants this dispatcher chooses from.
    pub fn variants(&self) -> &VariantList<F> {
        &self.variants
    }

    /// Least tier a host needs to run this function: the lowest variant's
    /// tier, or the tier the binary itself was compiled for if that is higher.
    pub fn minimum(&self) -> InstructionSet {
        self.variants.minimum().max(InstructionSet::compiled())
    }
}

impl<F: Copy + 'static> fmt::Debug for Dispatcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("name", &self.name)
            .field("variants", &self.variants)
            .field("state", &self.state())
            .field("selected", &self.selected())
            .finish()
    }
}
