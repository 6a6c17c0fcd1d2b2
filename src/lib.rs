//! An ordered multimap built on a skip list whose links remember how many
//! elements they jump over. The same descent that finds a key also yields its
//! rank, and the spans let a descent stop at the n-th element, so lookup,
//! insertion and removal by key as well as access by rank are all expected
//! O(log n).
//!
//! ```
//! use ranked_skiplist::SkipListMap;
//!
//! let mut list = SkipListMap::new();
//! list.insert(5, "a");
//! list.insert(3, "b");
//! list.insert(8, "c");
//!
//! assert_eq!(list.key_at(1), Some(&3));
//! assert_eq!(list.rank_of(&8), Some(3));
//! assert_eq!(list.remove(&3), 1);
//! assert_eq!(list.key_at(1), Some(&5));
//! ```

mod arena;
mod compare;
mod config;
mod error;
mod height_control;
mod iter;
mod map;
mod node;
mod search;

pub use compare::{Comparator, Discard, Disposer, Natural};
pub use config::{Config, DEFAULT_MAX_HEIGHT, DEFAULT_UPGRADE_PROBABILITY, MAX_HEIGHT_LIMIT};
pub use error::Error;
pub use height_control::{CounterGenerator, GeometricalGenerator, HeightControl};
pub use iter::Iter;
pub use map::SkipListMap;
