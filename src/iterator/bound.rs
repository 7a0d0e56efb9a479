use crate::boolgen::{BitSource, BoolGen};
use crate::types::Offset;

use super::{LogIterator, UnboundIterator};

/// Walks level 0 up to an inclusive upper offset.
///
/// Stepping stops in place once the next entry lies past `upper`; the
/// iterator keeps reporting its last entry.
pub struct BoundIterator<'a, B = BoolGen> {
    inner: UnboundIterator<'a, B>,
    upper: Offset,
}

impl<'a, B: BitSource> BoundIterator<'a, B> {
    pub(crate) fn new(inner: UnboundIterator<'a, B>, upper: Offset) -> Self {
        BoundIterator { inner, upper }
    }

    /// Inclusive upper bound.
    pub fn upper(&self) -> Offset {
        self.upper
    }
}

impl<B: BitSource> LogIterator for BoundIterator<'_, B> {
    fn next(&mut self) -> bool {
        let log = self.inner.log();
        let list = log.read();

        match self.inner.cursor().peek(&list) {
            Some(id) if list.node(id).offset <= self.upper => {
                self.inner.land(&list, id);
                true
            }
            _ => false,
        }
    }

    fn offset(&self) -> Option<Offset> {
        self.inner.offset()
    }

    fn entry(&self) -> Option<&[u8]> {
        self.inner.entry()
    }
}
