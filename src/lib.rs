//! Rangetree - an array-backed segment tree over any associative operator.
//!
//! # Quick Start
//!
//! ```
//! use rangetree::RangeTree;
//!
//! // Range sums over six leaves
//! let mut tree = RangeTree::sum([1, 2, 3, 4, 5, 6]).unwrap();
//! assert_eq!(tree.query(0, 2).unwrap(), 6);
//! assert_eq!(tree.query(3, 5).unwrap(), 15);
//!
//! // Point update, then query again
//! tree.update(2, 10).unwrap();
//! assert_eq!(tree.query(0, 5).unwrap(), 28);
//! ```
//!
//! Any closure `Fn(&T, &T) -> T` can serve as the operator, as long as it
//! is associative and paired with its identity:
//!
//! ```
//! use rangetree::RangeTree;
//!
//! let concat = |a: &String, b: &String| format!("{a}{b}");
//! let words = ["ab", "cd", "ef"].map(String::from);
//! let tree = RangeTree::build(words, String::new(), concat).unwrap();
//! assert_eq!(tree.query(1, 2).unwrap(), "cdef");
//! ```

pub mod batch;
pub mod combine;
pub mod cover;
pub mod error;
pub mod shared;
pub mod slot;
pub mod tree;

pub use combine::Combine;
pub use combine::Max;
pub use combine::Min;
pub use combine::Natural;
pub use combine::Sum;
pub use cover::Cover;
pub use error::Error;
pub use error::Result;
pub use shared::SharedRangeTree;
pub use slot::SlotState;
pub use slot::TreeSlot;
pub use tree::RangeTree;
