//! Self-Resolving Function Slot
//!
//! A [`DispatchSlot`] holds the entry point a call site jumps through. It
//! starts out pointing at a trampoline; the trampoline resolves the real
//! variant, stores it with [`DispatchSlot::resolve`], and every later call
//! goes straight to the stored variant with a single atomic load.
//!
//! # Memory Ordering
//!
//! `resolve` stores with `Release` and `load` reads with `Acquire`. A reader
//! that observes the resolved entry therefore also observes everything the
//! resolving thread wrote before publishing it (the selection bookkeeping in
//! [`Dispatcher`](crate::Dispatcher)). A reader that still sees the trampoline
//! simply resolves again. Every resolution of the same slot must store the
//! same entry, and a resolved slot never goes back to its trampoline.

use core::fmt;
use core::mem::size_of;
use core::sync::atomic::{AtomicPtr, Ordering};

/// Whether a slot still routes through its trampoline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
    /// Calls go through the trampoline, which will resolve the slot.
    Uninitialized,
    /// Calls go directly to the selected variant.
    Resolved,
}

/// Bit-for-bit view of a pointer-sized entry as an untyped pointer.
///
/// Only values that started life as an `F` are ever read back as an `F`.
union RawEntry<F: Copy> {
    entry: F,
    raw: *mut (),
}

/// Atomically updatable entry point for one logical function.
///
/// `F` is normally a function-pointer type such as `fn(&[f32]) -> f32`. Any
/// `Copy` type the size of a pointer is accepted; other sizes are rejected
/// when the slot is constructed.
pub struct DispatchSlot<F: Copy> {
    current: AtomicPtr<()>,
    trampoline: F,
}

impl<F: Copy> DispatchSlot<F> {
    const POINTER_SIZED: () = assert!(
        size_of::<F>() == size_of::<*mut ()>(),
        "dispatch slot entries must be pointer-sized"
    );

    /// Create a slot whose first call goes to `trampoline`.
    pub const fn new(trampoline: F) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::POINTER_SIZED;

        Self {
            current: AtomicPtr::new(to_raw(trampoline)),
            trampoline,
        }
    }

    /// Entry point to call right now.
    #[inline(always)]
    pub fn load(&self) -> F {
        from_raw(self.current.load(Ordering::Acquire))
    }

    /// Publish the selected variant. Later [`load`](Self::load)s return it.
    ///
    /// Callers resolving the same slot more than once must pass the same
    /// entry. Passing the slot's own trampoline is ignored.
    #[inline]
    pub fn resolve(&self, entry: F) {
        let raw = to_raw(entry);
        if raw == to_raw(self.trampoline) {
            return;
        }
        self.current.store(raw, Ordering::Release);
    }

    /// The entry point the slot was created with.
    pub fn trampoline(&self) -> F {
        self.trampoline
    }

    /// Current routing state.
    pub fn state(&self) -> SlotState {
        if self.current.load(Ordering::Acquire) == to_raw(self.trampoline) {
            SlotState::Uninitialized
        } else {
            SlotState::Resolved
        }
    }

    /// Shorthand for `state() == SlotState::Resolved`.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.state() == SlotState::Resolved
    }
}

impl<F: Copy> fmt::Debug for DispatchSlot<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchSlot")
            .field("current", &self.current.load(Ordering::Relaxed))
            .field("state", &self.state())
            .finish()
    }
}

#[inline(always)]
const fn to_raw<F: Copy>(entry: F) -> *mut () {
    // SAFETY: `DispatchSlot::POINTER_SIZED` guarantees both fields have the
    // same size, so every bit of `entry` lands in `raw`.
    unsafe { RawEntry { entry }.raw }
}

#[inline(always)]
fn from_raw<F: Copy>(raw: *mut ()) -> F {
    // SAFETY: the slot only stores values produced by `to_raw` from an `F`,
    // so reading them back as `F` restores the original value.
    unsafe { RawEntry::<F> { raw }.entry }
}
