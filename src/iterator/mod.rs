pub mod bound;
pub mod unbound;

pub use bound::BoundIterator;
pub use unbound::UnboundIterator;

use crate::boolgen::BitSource;
use crate::skiplog::SkipList;
use crate::skiplog::arena::{Handle, NodeId};
use crate::types::{Entry, Offset};

/// Sequential read-only cursor over a skip log.
///
/// A fresh iterator sits *before* its first entry: call [`next`] once to
/// land on it. `offset()` and `entry()` are `None` until then.
///
/// [`next`]: LogIterator::next
pub trait LogIterator {
    /// Advances to the next entry. Returns false if there is none.
    fn next(&mut self) -> bool;

    /// Offset of the current entry.
    fn offset(&self) -> Option<Offset>;

    /// Payload of the current entry.
    fn entry(&self) -> Option<&[u8]>;

    /// Adapts this cursor into a standard [`Iterator`] of `(offset, entry)`.
    fn entries(self) -> Entries<Self>
    where
        Self: Sized,
    {
        Entries { inner: self }
    }
}

/// [`Iterator`] adapter returned by [`LogIterator::entries`].
#[derive(Debug)]
pub struct Entries<I> {
    inner: I,
}

impl<I: LogIterator> Iterator for Entries<I> {
    type Item = (Offset, Entry);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.inner.next() {
            return None;
        }
        Some((self.inner.offset()?, self.inner.entry()?.to_vec()))
    }
}

/// Where an iterator stands between two steps.
///
/// Only a handle and an offset survive between steps, never a borrow, so
/// the log can change underneath. The first step always seeks the first
/// live offset `>= from`. Later steps follow the last yielded node's
/// forward link; if that node was removed in the meantime its handle goes
/// stale and the step re-seeks the first offset strictly after the one
/// last yielded.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Cursor {
    /// Nothing yielded yet.
    Before { from: Offset },
    /// Last yielded node.
    At { handle: Handle, offset: Offset },
}

impl Cursor {
    /// Node the next step lands on, if any.
    pub(crate) fn peek<B: BitSource>(&self, list: &SkipList<B>) -> Option<NodeId> {
        match *self {
            Cursor::Before { from } => list.seek(from),
            Cursor::At { handle, offset } => {
                if list.is_live(handle) {
                    list.node(handle.index()).next_at(0)
                } else {
                    list.seek_after(offset)
                }
            }
        }
    }
}
