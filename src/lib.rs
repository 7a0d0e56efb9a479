//! # skiplog
//!
//! An in-memory index from log offsets to serialized records, the indexing
//! core of a sequential commit log.
//!
//! ## Core idea
//! A skip list keeps offsets in order with O(log n) expected insert,
//! lookup, ceiling lookup and removal, and a plain linked list at level 0
//! for cheap range scans. Nodes live in an arena and link to each other by
//! index, so removal never leaves a dangling reference behind.
//!
//! ```
//! use skiplog::{LogIterator, SkipLog};
//!
//! let log = SkipLog::new();
//! for offset in [12, 67, 123, 124, 222] {
//!     log.insert(offset, format!("{offset} - entry"));
//! }
//!
//! let mut range = log.range(100, 200).unwrap();
//! assert!(range.next());
//! assert_eq!(range.offset(), Some(123));
//! assert!(range.next());
//! assert_eq!(range.offset(), Some(124));
//! assert!(!range.next());
//! ```

pub mod boolgen;
pub mod error;
pub mod iterator;
pub mod options;
pub mod skiplog;
pub mod types;

// Public re-exports for the top-level API
pub use boolgen::{BitSource, BoolGen};
pub use error::{Error, Result};
pub use iterator::{BoundIterator, Entries, LogIterator, UnboundIterator};
pub use options::Options;
pub use skiplog::{SkipList, SkipLog, Stats};
pub use types::{Entry, MAX_LEVEL, Offset};
