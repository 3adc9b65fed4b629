//! Double-ended queue built from fixed-size heap blocks.
//!
//! # Layout
//! A [`BlockDeque`] owns a ring of block pointers (`VecDeque<Box<Block<T, B>>>`).
//! Only the two boundary blocks can be partially filled:
//!
//! ```text
//!            head                                            tail
//!             v                                               v
//!  [ . . . x x ] [ x x x x x x ] [ x x x x x x ] [ x x x . . . ]
//!    front block      full            full          back block
//! ```
//!
//! * `head` is the first occupied slot of the front block.
//! * `tail` is one past the last occupied slot of the back block.
//! * Every block strictly between the two is fully occupied.
//!
//! Pushing past the edge of a boundary block links a new block into the ring;
//! popping the last value out of a boundary block unlinks it. The ring always holds
//! at least one block, so an empty deque never has to allocate on the next push.
//!
//! # Why blocks and not `VecDeque<T>`?
//! A single growable ring buffer has to copy every element when it grows. Blocks
//! never move their elements: growth only touches the ring of pointers, which is
//! `B` times smaller. Compared to a node-per-element list, a block amortises one
//! allocation over `B` elements and keeps neighbours in the same cache lines.
//!
//! # Recycling
//! The most recently released block is parked in a one-block spare slot instead
//! of being freed. A deque oscillating across a block edge (push, pop, push, ...)
//! therefore stops allocating after the first crossing.

use core::fmt;
use core::iter::FusedIterator;
use std::collections::VecDeque;

use tracing::trace;

use crate::block::Block;

/// Default number of slots per block.
pub const DEFAULT_BLOCK_LEN: usize = 64;

// ─── AnyDeque ─────────────────────────────────────────────────────────────────

/// An object-safe abstraction over double-ended queue types.
///
/// Implemented by both `VecDeque<T>` and `BlockDeque<T, B>` so that code can
/// operate on a deque without knowing which storage strategy backs it.
pub trait AnyDeque<T> {
    /// Returns the number of elements in the deque.
    fn len(&self) -> usize;
    /// Returns `true` if the deque contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Appends an element to the back.
    fn push_back(&mut self, item: T);
    /// Prepends an element to the front.
    fn push_front(&mut self, item: T);
    /// Removes and returns the element from the back, or `None` if empty.
    fn pop_back(&mut self) -> Option<T>;
    /// Removes and returns the element from the front, or `None` if empty.
    fn pop_front(&mut self) -> Option<T>;
    /// Removes all elements.
    fn clear(&mut self);
    /// Returns a shared reference to the front element, or `None` if empty.
    fn front(&self) -> Option<&T>;
    /// Returns a shared reference to the back element, or `None` if empty.
    fn back(&self) -> Option<&T>;
}

impl<T> AnyDeque<T> for VecDeque<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn push_back(&mut self, item: T) {
        self.push_back(item);
    }
    fn push_front(&mut self, item: T) {
        self.push_front(item);
    }
    fn pop_back(&mut self) -> Option<T> {
        self.pop_back()
    }
    fn pop_front(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn clear(&mut self) {
        self.clear();
    }
    fn front(&self) -> Option<&T> {
        self.front()
    }
    fn back(&self) -> Option<&T> {
        self.back()
    }
}

impl<T, const B: usize> AnyDeque<T> for BlockDeque<T, B> {
    fn len(&self) -> usize {
        self.len
    }
    fn push_back(&mut self, item: T) {
        self.push_back(item);
    }
    fn push_front(&mut self, item: T) {
        self.push_front(item);
    }
    fn pop_back(&mut self) -> Option<T> {
        self.pop_back()
    }
    fn pop_front(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn clear(&mut self) {
        self.clear();
    }
    fn front(&self) -> Option<&T> {
        self.front()
    }
    fn back(&self) -> Option<&T> {
        self.back()
    }
}

// ─── BlockDeque ───────────────────────────────────────────────────────────────

/// A double-ended queue storing its elements in fixed-size blocks of `B` slots.
///
/// All push and pop operations are amortised O(1); `len`, `front` and `back` are O(1).
///
/// # Bounded mode
/// A deque built with [`with_max_len`](BlockDeque::with_max_len) never holds more than
/// `max_len` elements. A push that would exceed the bound evicts (drops) the element at
/// the *opposite* end, so the oldest survivor is discarded.
///
/// # Generic parameters
/// | Parameter | Meaning |
/// |-----------|--------|
/// | `T` | Element type |
/// | `B` | Slots per block, defaults to [`DEFAULT_BLOCK_LEN`]; **must be at least 2** |
pub struct BlockDeque<T, const B: usize = DEFAULT_BLOCK_LEN> {
    blocks: VecDeque<Box<Block<T, B>>>,
    spare: Option<Box<Block<T, B>>>,
    head: usize,
    tail: usize,
    len: usize,
    max_len: Option<usize>,
}

impl<T, const B: usize> BlockDeque<T, B> {
    /// Creates an empty, unbounded deque holding a single allocated block.
    ///
    /// # Panics (compile-time)
    /// Asserts that `B >= 2`.
    pub fn new() -> Self {
        const {
            assert!(B >= 2, "BlockDeque block length B must be at least 2");
        }
        let mut blocks = VecDeque::with_capacity(1);
        blocks.push_back(Block::alloc());
        Self {
            blocks,
            spare: None,
            head: B / 2,
            tail: B / 2,
            len: 0,
            max_len: None,
        }
    }

    /// Creates an empty deque that holds at most `max_len` elements.
    ///
    /// A `max_len` of zero is honoured literally: every pushed value is evicted
    /// immediately and the deque stays empty.
    pub fn with_max_len(max_len: usize) -> Self {
        let mut deque = Self::new();
        deque.max_len = Some(max_len);
        deque
    }

    /// Returns the bound set by [`with_max_len`](BlockDeque::with_max_len), if any.
    #[inline(always)]
    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    /// Returns the number of elements currently in the deque.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of blocks linked into the ring.
    ///
    /// This is a diagnostic: it counts blocks holding elements plus the one block kept
    /// by an empty deque, but not the parked spare. It is always at least 1 and at most
    /// `len.div_ceil(B) + 1`.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Appends `item` to the back of the deque.
    ///
    /// In bounded mode, evicts from the front until `len() <= max_len`.
    pub fn push_back(&mut self, item: T) {
        if self.tail == B {
            let block = self.acquire_block();
            self.blocks.push_back(block);
            self.tail = 0;
        }
        let tail = self.tail;
        unsafe { self.back_block_mut().write(tail, item) };
        self.tail += 1;
        self.len += 1;

        if let Some(max_len) = self.max_len {
            while self.len > max_len {
                trace!(max_len, "evicting front element");
                drop(self.pop_front());
            }
        }
    }

    /// Prepends `item` to the front of the deque.
    ///
    /// In bounded mode, evicts from the back until `len() <= max_len`.
    pub fn push_front(&mut self, item: T) {
        if self.head == 0 {
            let block = self.acquire_block();
            self.blocks.push_front(block);
            self.head = B;
        }
        self.head -= 1;
        let head = self.head;
        unsafe { self.blocks[0].write(head, item) };
        self.len += 1;

        if let Some(max_len) = self.max_len {
            while self.len > max_len {
                trace!(max_len, "evicting back element");
                drop(self.pop_back());
            }
        }
    }

    /// Removes and returns the last element, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.tail -= 1;
        self.len -= 1;
        let tail = self.tail;
        let item = unsafe { self.back_block_mut().read(tail) };

        if self.tail == 0 {
            if self.len == 0 {
                self.recenter();
            } else if let Some(block) = self.blocks.pop_back() {
                self.release_block(block);
                self.tail = B;
            }
        }
        Some(item)
    }

    /// Removes and returns the first element, or `None` if empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let head = self.head;
        let item = unsafe { self.blocks[0].read(head) };
        self.head += 1;
        self.len -= 1;

        if self.head == B {
            if self.len == 0 {
                self.recenter();
            } else if let Some(block) = self.blocks.pop_front() {
                self.release_block(block);
                self.head = 0;
            }
        }
        Some(item)
    }

    /// Returns a shared reference to the front element, or `None` if empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            Some(unsafe { self.blocks[0].get(self.head) })
        }
    }

    /// Returns a shared reference to the back element, or `None` if empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            Some(unsafe { self.back_block().get(self.tail - 1) })
        }
    }

    /// Returns an exclusive reference to the front element, or `None` if empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            None
        } else {
            let head = self.head;
            Some(unsafe { self.blocks[0].get_mut(head) })
        }
    }

    /// Returns an exclusive reference to the back element, or `None` if empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            None
        } else {
            let last = self.tail - 1;
            Some(unsafe { self.back_block_mut().get_mut(last) })
        }
    }

    /// Drops every element, keeping one block allocated for reuse.
    pub fn clear(&mut self) {
        self.drop_elements();
        self.len = 0;
        while self.blocks.len() > 1 {
            if let Some(block) = self.blocks.pop_back() {
                self.release_block(block);
            }
        }
        self.recenter();
    }

    /// Returns a front-to-back iterator over shared references.
    ///
    /// The iterator borrows the deque, so the deque cannot be mutated while it is live.
    pub fn iter(&self) -> Iter<'_, T, B> {
        Iter {
            blocks: &self.blocks,
            block: 0,
            slot: self.head,
            remaining: self.len,
        }
    }

    #[inline(always)]
    fn back_block(&self) -> &Block<T, B> {
        &self.blocks[self.blocks.len() - 1]
    }

    #[inline(always)]
    fn back_block_mut(&mut self) -> &mut Block<T, B> {
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }

    /// Drops every live element in place. Leaves `head`, `tail` and `len` stale.
    fn drop_elements(&mut self) {
        if self.len == 0 {
            return;
        }
        let last = self.blocks.len() - 1;
        for (i, block) in self.blocks.iter_mut().enumerate() {
            let start = if i == 0 { self.head } else { 0 };
            let end = if i == last { self.tail } else { B };
            unsafe { block.drop_range(start..end) };
        }
    }

    /// Resets an empty deque so both ends grow from the middle of the retained block.
    ///
    /// An empty deque always has `0 < head == tail < B`, so a push at either end
    /// lands in the retained block.
    #[inline]
    fn recenter(&mut self) {
        debug_assert_eq!(self.len, 0);
        debug_assert_eq!(self.blocks.len(), 1);
        self.head = B / 2;
        self.tail = B / 2;
    }

    /// Cold path: hands out the parked spare block, or allocates a new one.
    #[inline(never)]
    fn acquire_block(&mut self) -> Box<Block<T, B>> {
        match self.spare.take() {
            Some(block) => {
                trace!(blocks = self.blocks.len(), "reusing spare block");
                block
            }
            None => {
                trace!(blocks = self.blocks.len(), block_len = B, "allocating block");
                Block::alloc()
            }
        }
    }

    /// Parks an emptied block as the spare, or frees it if a spare is already held.
    #[inline(never)]
    fn release_block(&mut self, block: Box<Block<T, B>>) {
        if self.spare.is_none() {
            trace!(blocks = self.blocks.len(), "parking released block");
            self.spare = Some(block);
        } else {
            trace!(blocks = self.blocks.len(), "freeing released block");
        }
    }
}

impl<T, const B: usize> Drop for BlockDeque<T, B> {
    fn drop(&mut self) {
        self.drop_elements();
    }
}

// ─── Iterators ────────────────────────────────────────────────────────────────

/// Front-to-back iterator over `&T`, created by [`BlockDeque::iter`].
///
/// A cursor of (block, slot, remaining). Each step advances the slot and rolls over
/// to the next block at the block edge; it stops after `len` items.
pub struct Iter<'a, T, const B: usize> {
    blocks: &'a VecDeque<Box<Block<T, B>>>,
    block: usize,
    slot: usize,
    remaining: usize,
}

impl<'a, T, const B: usize> Iterator for Iter<'a, T, B> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let blocks: &'a VecDeque<Box<Block<T, B>>> = self.blocks;
        let item = unsafe { blocks[self.block].get(self.slot) };
        self.remaining -= 1;
        self.slot += 1;
        if self.slot == B {
            self.slot = 0;
            self.block += 1;
        }
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const B: usize> ExactSizeIterator for Iter<'_, T, B> {}
impl<T, const B: usize> FusedIterator for Iter<'_, T, B> {}

impl<T, const B: usize> Clone for Iter<'_, T, B> {
    fn clone(&self) -> Self {
        Self {
            blocks: self.blocks,
            block: self.block,
            slot: self.slot,
            remaining: self.remaining,
        }
    }
}

/// Owning iterator, created by `BlockDeque::into_iter`. Yields front to back.
pub struct IntoIter<T, const B: usize> {
    inner: BlockDeque<T, B>,
}

impl<T, const B: usize> Iterator for IntoIter<T, B> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.inner.len, Some(self.inner.len))
    }
}

impl<T, const B: usize> DoubleEndedIterator for IntoIter<T, B> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop_back()
    }
}

impl<T, const B: usize> ExactSizeIterator for IntoIter<T, B> {}
impl<T, const B: usize> FusedIterator for IntoIter<T, B> {}

impl<T, const B: usize> IntoIterator for BlockDeque<T, B> {
    type Item = T;
    type IntoIter = IntoIter<T, B>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { inner: self }
    }
}

impl<'a, T, const B: usize> IntoIterator for &'a BlockDeque<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ─── Trait impls ──────────────────────────────────────────────────────────────

impl<T, const B: usize> Default for BlockDeque<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const B: usize> Clone for BlockDeque<T, B> {
    fn clone(&self) -> Self {
        let mut cloned = Self::new();
        cloned.max_len = self.max_len;
        for item in self {
            cloned.push_back(item.clone());
        }
        cloned
    }
}

impl<T: fmt::Debug, const B: usize> fmt::Debug for BlockDeque<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const B: usize> PartialEq for BlockDeque<T, B> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}
impl<T: Eq, const B: usize> Eq for BlockDeque<T, B> {}

impl<T, const B: usize> Extend<T> for BlockDeque<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T, const B: usize> FromIterator<T> for BlockDeque<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}
