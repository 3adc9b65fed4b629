//! # Block Deque
//!
//! A double-ended queue that stores its elements in fixed-size heap blocks, plus a small
//! hash set type for unique values.
//!
//! This crate provides `BlockDeque` and `Set`. `BlockDeque` is an alternative to
//! `VecDeque` for queues that grow and shrink a lot: it never copies elements when it
//! grows, and it can be bounded so that pushing past the limit evicts the oldest element
//! from the opposite end.
//!
//! ## Key Features
//!
//! * **O(1) Ends:** `push_back`, `push_front`, `pop_back` and `pop_front` are amortised
//!   O(1). `len`, `front` and `back` are O(1).
//! * **Block Storage:** Elements live in blocks of `B` slots (default 64). Only the two
//!   boundary blocks are ever partially filled.
//! * **Block Recycling:** An emptied deque keeps one block, and the most recently released
//!   block is parked for reuse, so churn around a block edge does not allocate.
//! * **Bounded Mode:** `BlockDeque::with_max_len(n)` keeps at most `n` elements.
//! * **Interoperability:** `BlockDeque` and `VecDeque` both implement `AnyDeque`; `Set`,
//!   `HashSet` and `BTreeSet` all implement `AnySet`.
//!
//! ## Block Length (`B`)
//!
//! * `B` is a const generic defaulting to [`DEFAULT_BLOCK_LEN`] (64).
//! * `B` must be **at least 2**. *Compilation will fail otherwise.*
//! * Larger blocks allocate less often but leave more unused slots in the two boundary
//!   blocks.
//!
//! ## Examples
//!
//! ### BlockDeque
//!
//! ```rust
//! use block_deque::BlockDeque;
//!
//! let mut d: BlockDeque<i32> = BlockDeque::new();
//! d.push_front(2);
//! d.push_back(3);
//! d.push_front(1);
//!
//! assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//! assert_eq!(d.pop_back(), Some(3));
//! assert_eq!(d.front(), Some(&1));
//! ```
//!
//! ### Bounded BlockDeque
//!
//! ```rust
//! use block_deque::BlockDeque;
//!
//! let mut d: BlockDeque<i32> = BlockDeque::with_max_len(5);
//! for i in 0..7 {
//!     d.push_front(i);
//! }
//!
//! // 0 and 1 were evicted from the back.
//! assert_eq!(d.len(), 5);
//! assert_eq!(d.pop_back(), Some(2));
//! ```
//!
//! ### Set
//!
//! ```rust
//! use block_deque::Set;
//!
//! let a = Set::from_values([1, 2]);
//! let b = Set::from_values([1, 3, 4]);
//!
//! assert_eq!(a.union(&b).sorted_values(), vec![1, 2, 3, 4]);
//! assert_eq!(a.intersection(&b).sorted_values(), vec![1]);
//! assert_eq!(b.difference(&a).sorted_values(), vec![3, 4]);
//! ```

// --- Module Declarations ---

mod block;
pub mod deque;
pub mod set;

// --- Re-exports ---

pub use deque::{AnyDeque, BlockDeque, DEFAULT_BLOCK_LEN, IntoIter, Iter};
pub use set::{AnySet, Set};
