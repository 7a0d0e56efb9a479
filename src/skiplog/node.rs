use crate::types::{Entry, Offset};

use super::arena::{Arena, NodeId};

/// A single indexed entry.
///
/// A node of level `L` owns `L + 1` forward links and is present on every
/// level `0..=L`. Only level 0 is doubly linked.
///
/// There is no "next offset <= x" predicate: the bound iterator checks its
/// upper offset against the node a step resolves to, which may come from a
/// re-seek rather than a forward link.
///
/// ```text
/// Level 2:  head ──────────────► 50 ─────────────────► nil
/// Level 1:  head ──► 10 ───────► 50 ──► 60 ──────────► nil
/// Level 0:  head ──► 10 ◄─► 20 ◄─► 50 ◄─► 60 ◄─► 70 ─► nil
/// ```
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) offset: Offset,
    pub(crate) entry: Entry,
    pub(crate) prev: Option<NodeId>,
    next: Vec<Option<NodeId>>,
}

impl Node {
    pub(crate) fn new(offset: Offset, entry: Entry, level: usize) -> Self {
        Node {
            offset,
            entry,
            prev: None,
            next: vec![None; level + 1],
        }
    }

    /// Highest level this node is linked into.
    pub(crate) fn level(&self) -> usize {
        self.next.len() - 1
    }

    /// Forward neighbour at `level`. Levels above the node's own are `None`.
    pub(crate) fn next_at(&self, level: usize) -> Option<NodeId> {
        self.next.get(level).copied().flatten()
    }

    pub(crate) fn has_next_at(&self, level: usize) -> bool {
        self.next_at(level).is_some()
    }

    /// Writes to levels above the node's own are ignored.
    pub(crate) fn set_next(&mut self, level: usize, next: Option<NodeId>) {
        if let Some(link) = self.next.get_mut(level) {
            *link = next;
        }
    }

    pub(crate) fn next_offset_eq(&self, arena: &Arena, level: usize, offset: Offset) -> bool {
        self.next_offset(arena, level).is_some_and(|o| o == offset)
    }

    pub(crate) fn next_offset_lt(&self, arena: &Arena, level: usize, offset: Offset) -> bool {
        self.next_offset(arena, level).is_some_and(|o| o < offset)
    }

    pub(crate) fn next_offset_gte(&self, arena: &Arena, level: usize, offset: Offset) -> bool {
        self.next_offset(arena, level).is_some_and(|o| o >= offset)
    }

    fn next_offset(&self, arena: &Arena, level: usize) -> Option<Offset> {
        let next = self.next_at(level)?;
        arena.get(next).map(|node| node.offset)
    }

    pub(crate) fn into_entry(self) -> Entry {
        self.entry
    }
}
