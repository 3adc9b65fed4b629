//! Fixed-capacity slot storage used as the unit of allocation by [`BlockDeque`].
//!
//! A `Block` never knows which of its slots hold a value. The owning deque tracks
//! the occupied range (`head..tail` for the boundary blocks, `0..B` for every block
//! in between) and is responsible for only touching initialised slots.
//!
//! [`BlockDeque`]: crate::BlockDeque

use core::mem::MaybeUninit;
use core::ops::Range;
use core::ptr;

/// A contiguous run of `B` possibly-uninitialised slots.
///
/// The stack side is just memory with no drop glue, exactly like the raw
/// `[MaybeUninit<T>; N]` ring buffer of a small deque. Dropping a `Block` never
/// drops elements; the deque does that through [`drop_range`](Block::drop_range).
pub(crate) struct Block<T, const B: usize> {
    slots: [MaybeUninit<T>; B],
}

impl<T, const B: usize> Block<T, B> {
    /// Allocates a fresh block on the heap with every slot uninitialised.
    #[inline(never)]
    pub(crate) fn alloc() -> Box<Self> {
        Box::new(Self {
            slots: [const { MaybeUninit::uninit() }; B],
        })
    }

    /// Writes `value` into slot `idx`.
    ///
    /// # Safety
    /// `idx < B` and the slot must be uninitialised (or its old value already
    /// moved out), otherwise the previous value is leaked.
    #[inline(always)]
    pub(crate) unsafe fn write(&mut self, idx: usize, value: T) {
        debug_assert!(idx < B);
        unsafe {
            ptr::write(self.slots.as_mut_ptr().add(idx) as *mut T, value);
        }
    }

    /// Moves the value out of slot `idx`, leaving it logically uninitialised.
    ///
    /// # Safety
    /// `idx < B` and the slot must be initialised.
    #[inline(always)]
    pub(crate) unsafe fn read(&mut self, idx: usize) -> T {
        debug_assert!(idx < B);
        unsafe { ptr::read(self.slots.as_ptr().add(idx) as *const T) }
    }

    /// # Safety
    /// `idx < B` and the slot must be initialised.
    #[inline(always)]
    pub(crate) unsafe fn get(&self, idx: usize) -> &T {
        debug_assert!(idx < B);
        unsafe { &*(self.slots.as_ptr().add(idx) as *const T) }
    }

    /// # Safety
    /// `idx < B` and the slot must be initialised.
    #[inline(always)]
    pub(crate) unsafe fn get_mut(&mut self, idx: usize) -> &mut T {
        debug_assert!(idx < B);
        unsafe { &mut *(self.slots.as_mut_ptr().add(idx) as *mut T) }
    }

    /// Drops every value in `range` in place.
    ///
    /// # Safety
    /// `range` must lie within `0..B` and every slot in it must be initialised.
    /// The slots are uninitialised afterwards.
    pub(crate) unsafe fn drop_range(&mut self, range: Range<usize>) {
        debug_assert!(range.start <= range.end && range.end <= B);
        unsafe {
            let base = self.slots.as_mut_ptr().add(range.start) as *mut T;
            let live = ptr::slice_from_raw_parts_mut(base, range.end - range.start);
            ptr::drop_in_place(live);
        }
    }
}
