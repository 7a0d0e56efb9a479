pub(crate) mod arena;
pub(crate) mod node;
pub mod skiplist;

use log::debug;
use parking_lot::{RwLock, RwLockReadGuard};

use crate::boolgen::{BitSource, BoolGen};
use crate::error::{Error, Result};
use crate::iterator::{BoundIterator, Cursor, UnboundIterator};
use crate::options::Options;
use crate::types::{Entry, Offset};

pub use skiplist::{SkipList, Stats};

/// Thread-safe offset index. Wraps a [`SkipList`] in a reader/writer lock.
///
/// Mutations hold the write lock for the whole splice, lookups hold the
/// read lock for the whole descent. Iterators take the read lock once per
/// step, so a long scan never starves writers; the flip side is that a
/// scan sees concurrent inserts and removes as they happen rather than a
/// snapshot.
///
/// ```
/// use skiplog::SkipLog;
///
/// let log = SkipLog::new();
/// log.insert(7, "seven");
/// log.insert(3, "three");
///
/// assert_eq!(log.find(3).unwrap(), b"three");
/// assert_eq!(log.first_gte(4).unwrap(), (7, b"seven".to_vec()));
/// ```
#[derive(Debug)]
pub struct SkipLog<B = BoolGen> {
    inner: RwLock<SkipList<B>>,
}

impl SkipLog<BoolGen> {
    /// Create an empty log with default options.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create an empty log configured by `options`.
    pub fn with_options(options: Options) -> Self {
        SkipLog {
            inner: RwLock::new(SkipList::with_options(&options)),
        }
    }
}

impl Default for SkipLog<BoolGen> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BitSource> SkipLog<B> {
    /// Create an empty log drawing node levels from `bits`.
    pub fn with_bit_source(options: Options, bits: B) -> Self {
        SkipLog {
            inner: RwLock::new(SkipList::with_bit_source(&options, bits)),
        }
    }

    /// Insert an entry. Returns the previous entry if `offset` was taken.
    pub fn insert(&self, offset: Offset, entry: impl Into<Entry>) -> Option<Entry> {
        self.inner.write().insert(offset, entry.into())
    }

    /// Entry stored under exactly `offset`.
    pub fn find(&self, offset: Offset) -> Result<Entry> {
        self.inner.read().get(offset).map(<[u8]>::to_vec)
    }

    /// Offset and entry of the first record at or after `offset`.
    pub fn first_gte(&self, offset: Offset) -> Result<(Offset, Entry)> {
        self.inner
            .read()
            .first_gte(offset)
            .map(|(found, entry)| (found, entry.to_vec()))
    }

    /// Offset and entry of the last record at or before `offset`.
    pub fn last_lte(&self, offset: Offset) -> Result<(Offset, Entry)> {
        self.inner
            .read()
            .last_lte(offset)
            .map(|(found, entry)| (found, entry.to_vec()))
    }

    /// Remove the entry under `offset` and return it.
    ///
    /// Fails with [`Error::OffsetNotFound`] if nothing is stored there.
    pub fn remove(&self, offset: Offset) -> Result<Entry> {
        self.inner.write().remove(offset)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the log holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Lowest stored offset, if any.
    pub fn first_offset(&self) -> Option<Offset> {
        self.inner.read().first_offset()
    }

    /// Highest stored offset, if any.
    pub fn last_offset(&self) -> Option<Offset> {
        self.inner.read().last_offset()
    }

    /// Point-in-time counters for diagnostics.
    pub fn stats(&self) -> Stats {
        self.inner.read().stats()
    }

    /// Iterate every entry from the lowest offset up.
    ///
    /// Reaching the end does not exhaust the iterator: a later `next()`
    /// picks up offsets appended in the meantime.
    pub fn iter(&self) -> UnboundIterator<'_, B> {
        UnboundIterator::new(self, Cursor::Before { from: Offset::MIN })
    }

    /// Iterate entries with offsets in `lower..=upper`.
    ///
    /// The start is resolved on the first `next()`, so it is the first
    /// offset `>= lower` live at that moment.
    pub fn range(&self, lower: Offset, upper: Offset) -> Result<BoundIterator<'_, B>> {
        let list = self.read();
        if list.is_empty() {
            return Err(Error::EmptyLog);
        }

        debug!("range {lower}..={upper} over {} entries", list.len());

        Ok(BoundIterator::new(
            UnboundIterator::new(self, Cursor::Before { from: lower }),
            upper,
        ))
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, SkipList<B>> {
        self.inner.read()
    }
}
