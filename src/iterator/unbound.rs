use crate::boolgen::{BitSource, BoolGen};
use crate::skiplog::arena::NodeId;
use crate::skiplog::{SkipList, SkipLog};
use crate::types::{Entry, Offset};

use super::{Cursor, LogIterator};

/// Walks level 0 to the end of the log.
///
/// Each step copies the landed entry out, so nothing borrowed from the
/// node graph outlives the read lock.
pub struct UnboundIterator<'a, B = BoolGen> {
    log: &'a SkipLog<B>,
    cursor: Cursor,
    current: Option<(Offset, Entry)>,
}

impl<'a, B: BitSource> UnboundIterator<'a, B> {
    pub(crate) fn new(log: &'a SkipLog<B>, cursor: Cursor) -> Self {
        UnboundIterator {
            log,
            cursor,
            current: None,
        }
    }

    pub(crate) fn log(&self) -> &'a SkipLog<B> {
        self.log
    }

    pub(crate) fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Move onto `id` and copy its offset and entry out.
    pub(crate) fn land(&mut self, list: &SkipList<B>, id: NodeId) {
        let node = list.node(id);
        self.cursor = Cursor::At {
            handle: list.handle(id),
            offset: node.offset,
        };
        self.current = Some((node.offset, node.entry.clone()));
    }
}

impl<B: BitSource> LogIterator for UnboundIterator<'_, B> {
    fn next(&mut self) -> bool {
        let log = self.log;
        let list = log.read();

        match self.cursor.peek(&list) {
            Some(id) => {
                self.land(&list, id);
                true
            }
            None => false,
        }
    }

    fn offset(&self) -> Option<Offset> {
        self.current.as_ref().map(|(offset, _)| *offset)
    }

    fn entry(&self) -> Option<&[u8]> {
        self.current.as_ref().map(|(_, entry)| entry.as_slice())
    }
}
