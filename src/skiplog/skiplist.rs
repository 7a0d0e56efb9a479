use log::{debug, trace};

use crate::boolgen::{BitSource, BoolGen};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::types::{Entry, MAX_LEVEL, Offset};

use super::arena::{Arena, Handle, NodeId};
use super::node::Node;

/// Where a new offset lands relative to the current contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Below every stored offset, or the list is empty.
    NewHead,
    /// Above every stored offset.
    NewTail,
    Interior,
}

/// Point-in-time counters, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Live entries.
    pub len: usize,
    /// Levels currently in use.
    pub height: usize,
    /// Node slots ever allocated, live or free.
    pub allocated_nodes: usize,
    /// Slots waiting for reuse.
    pub free_slots: usize,
}

/// Single-threaded skip list keyed by offset.
///
/// Each level keeps its own head and tail, so appends past the current
/// maximum and prepends below the current minimum never walk the list.
/// Synchronization is the caller's job; [`SkipLog`](crate::SkipLog) wraps
/// this in a lock.
///
/// Average case: O(log n) insert, lookup and removal. Worst case O(n) if the
/// coin flips degenerate.
#[derive(Debug)]
pub struct SkipList<B = BoolGen> {
    arena: Arena,
    heads: [Option<NodeId>; MAX_LEVEL],
    tails: [Option<NodeId>; MAX_LEVEL],
    /// Levels in use; 0 when empty. Node levels never exceed `height - 1`.
    height: usize,
    len: usize,
    max_level: usize,
    bits: B,
}

impl SkipList<BoolGen> {
    /// Create an empty list with default options.
    pub fn new() -> Self {
        Self::with_options(&Options::default())
    }

    /// Create an empty list configured by `options`.
    pub fn with_options(options: &Options) -> Self {
        let bits = match options.seed {
            Some(seed) => BoolGen::seeded(seed),
            None => BoolGen::new(),
        };
        Self::with_bit_source(options, bits)
    }
}

impl Default for SkipList<BoolGen> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BitSource> SkipList<B> {
    /// Create an empty list drawing levels from `bits`. `options.seed` is
    /// ignored since the caller supplies the source.
    pub fn with_bit_source(options: &Options, bits: B) -> Self {
        SkipList {
            arena: Arena::default(),
            heads: [None; MAX_LEVEL],
            tails: [None; MAX_LEVEL],
            height: 0,
            len: 0,
            max_level: options.effective_max_level(),
            bits,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.heads[0].is_none()
    }

    /// Levels currently in use.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Lowest stored offset.
    pub fn first_offset(&self) -> Option<Offset> {
        self.heads[0].map(|id| self.arena[id].offset)
    }

    /// Highest stored offset.
    pub fn last_offset(&self) -> Option<Offset> {
        self.tails[0].map(|id| self.arena[id].offset)
    }

    /// Point-in-time counters for diagnostics.
    pub fn stats(&self) -> Stats {
        Stats {
            len: self.len,
            height: self.height,
            allocated_nodes: self.arena.capacity(),
            free_slots: self.arena.free_slots(),
        }
    }

    /// Insert an entry under `offset`.
    ///
    /// An existing offset keeps its node and gets the new entry; the old
    /// one is returned and the length is unchanged.
    pub fn insert(&mut self, offset: Offset, entry: Entry) -> Option<Entry> {
        let mut preds = [None; MAX_LEVEL];

        match self.classify(offset) {
            Placement::NewHead => {}
            Placement::NewTail => {
                preds[..self.height].copy_from_slice(&self.tails[..self.height]);
            }
            Placement::Interior => {
                preds = self.predecessors(offset);

                if let Some(existing) = self.next_of(preds[0], 0) {
                    if self.arena[existing].offset == offset {
                        trace!("overwriting entry at offset {offset}");
                        return Some(std::mem::replace(&mut self.arena[existing].entry, entry));
                    }
                }
            }
        }

        let level = self.random_level();
        if level >= self.height {
            self.height = level + 1;
            debug!("skip list height grew to {}", self.height);
        }

        let id = self.arena.alloc(Node::new(offset, entry, level));

        // Levels the list did not reach before have no predecessor, which
        // `preds` already says: the new node becomes head and tail there.
        for (lane, &pred) in preds.iter().enumerate().take(level + 1) {
            let succ = self.next_of(pred, lane);
            self.arena[id].set_next(lane, succ);
            self.set_next_of(pred, lane, Some(id));

            if !self.arena[id].has_next_at(lane) {
                self.tails[lane] = Some(id);
            }
        }

        self.arena[id].prev = preds[0];
        if let Some(succ) = self.arena[id].next_at(0) {
            self.arena[succ].prev = Some(id);
        }

        self.len += 1;
        trace!("inserted offset {offset} at level {level}");

        None
    }

    /// Look up the entry stored under exactly `offset`.
    pub fn get(&self, offset: Offset) -> Result<&[u8]> {
        if self.is_empty() {
            return Err(Error::EmptyLog);
        }

        match self.seek(offset) {
            Some(id) if self.arena[id].offset == offset => Ok(&self.arena[id].entry),
            _ => Err(Error::OffsetNotFound(offset)),
        }
    }

    /// Ceiling lookup: the entry with the smallest offset `>= offset`.
    pub fn first_gte(&self, offset: Offset) -> Result<(Offset, &[u8])> {
        if self.is_empty() {
            return Err(Error::EmptyLog);
        }

        let id = self.seek(offset).ok_or(Error::OffsetNotFound(offset))?;
        let node = &self.arena[id];

        Ok((node.offset, &node.entry))
    }

    /// Floor lookup: the entry with the largest offset `<= offset`.
    ///
    /// One back-link hop from the ceiling node.
    pub fn last_lte(&self, offset: Offset) -> Result<(Offset, &[u8])> {
        if self.is_empty() {
            return Err(Error::EmptyLog);
        }

        let floor = match self.seek(offset) {
            Some(id) if self.arena[id].offset == offset => Some(id),
            Some(id) => self.arena[id].prev,
            None => self.tails[0],
        };
        let node = &self.arena[floor.ok_or(Error::OffsetNotFound(offset))?];

        Ok((node.offset, &node.entry))
    }

    /// Unlink the node stored under `offset` and return its entry.
    pub fn remove(&mut self, offset: Offset) -> Result<Entry> {
        if self.is_empty() {
            return Err(Error::EmptyLog);
        }

        let preds = self.predecessors(offset);
        let target = match self.next_of(preds[0], 0) {
            Some(id) if self.arena[id].offset == offset => id,
            _ => return Err(Error::OffsetNotFound(offset)),
        };

        for level in (0..=self.arena[target].level()).rev() {
            let pred = preds[level];
            let succ = self.arena[target].next_at(level);

            self.set_next_of(pred, level, succ);
            if succ.is_none() {
                self.tails[level] = pred;
            }
        }

        if let Some(succ) = self.arena[target].next_at(0) {
            self.arena[succ].prev = preds[0];
        }

        let height = self.height;
        while self.height > 0 && self.heads[self.height - 1].is_none() {
            self.height -= 1;
        }
        if self.height < height {
            debug!("skip list height shrank to {}", self.height);
        }

        self.len -= 1;
        trace!("removed offset {offset}");

        self.arena
            .release(target)
            .map(Node::into_entry)
            .ok_or(Error::OffsetNotFound(offset))
    }

    /// Node with the smallest offset `>= offset`.
    ///
    /// Descends from the top level, stopping early when an express lane
    /// lands exactly on the target.
    pub(crate) fn seek(&self, offset: Offset) -> Option<NodeId> {
        let mut current: Option<NodeId> = None;

        for level in (0..self.height).rev() {
            loop {
                let Some(id) = current else {
                    match self.heads[level] {
                        Some(head) if self.arena[head].offset == offset => return Some(head),
                        Some(head) if self.arena[head].offset < offset => {
                            current = Some(head);
                            continue;
                        }
                        _ => break,
                    }
                };

                let node = &self.arena[id];
                if node.next_offset_eq(&self.arena, level, offset) {
                    return node.next_at(level);
                }
                if !node.next_offset_lt(&self.arena, level, offset) {
                    break;
                }
                current = node.next_at(level);
            }
        }

        match current {
            Some(id) if self.arena[id].next_offset_gte(&self.arena, 0, offset) => {
                self.arena[id].next_at(0)
            }
            Some(_) => None,
            None => self.heads[0],
        }
    }

    /// Node with the smallest offset `> offset`.
    pub(crate) fn seek_after(&self, offset: Offset) -> Option<NodeId> {
        offset.checked_add(1).and_then(|from| self.seek(from))
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.arena[id]
    }

    pub(crate) fn handle(&self, id: NodeId) -> Handle {
        self.arena.handle(id)
    }

    pub(crate) fn is_live(&self, handle: Handle) -> bool {
        self.arena.is_live(handle)
    }

    /// For each level in use, the last node with offset `< offset`, or
    /// `None` if the target would sit before that level's head.
    fn predecessors(&self, offset: Offset) -> [Option<NodeId>; MAX_LEVEL] {
        let mut preds = [None; MAX_LEVEL];
        let mut current: Option<NodeId> = None;

        for level in (0..self.height).rev() {
            if current.is_none() {
                current = self.heads[level].filter(|&head| self.arena[head].offset < offset);
            }

            while let Some(id) = current {
                let node = &self.arena[id];
                if !node.next_offset_lt(&self.arena, level, offset) {
                    break;
                }
                current = node.next_at(level);
            }

            preds[level] = current;
        }

        preds
    }

    fn classify(&self, offset: Offset) -> Placement {
        match (self.heads[0], self.tails[0]) {
            (Some(head), Some(tail)) => {
                if offset < self.arena[head].offset {
                    Placement::NewHead
                } else if offset > self.arena[tail].offset {
                    Placement::NewTail
                } else {
                    Placement::Interior
                }
            }
            _ => Placement::NewHead,
        }
    }

    /// Coin flips until tails, capped so the list grows at most one level
    /// per insert and never past `max_level`.
    fn random_level(&mut self) -> usize {
        let mut level = 0;
        while level < self.height && level + 1 < self.max_level && self.bits.next_bool() {
            level += 1;
        }
        level
    }

    /// Forward link of `at` on `level`, where `None` is the level's head slot.
    fn next_of(&self, at: Option<NodeId>, level: usize) -> Option<NodeId> {
        match at {
            Some(id) => self.arena[id].next_at(level),
            None => self.heads[level],
        }
    }

    fn set_next_of(&mut self, at: Option<NodeId>, level: usize, next: Option<NodeId>) {
        match at {
            Some(id) => self.arena[id].set_next(level, next),
            None => self.heads[level] = next,
        }
    }

    /// Panics with a description of the first broken invariant.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut max_node_level = None;
        let mut level_zero = Vec::new();

        let mut prev: Option<NodeId> = None;
        let mut cursor = self.heads[0];
        while let Some(id) = cursor {
            let node = &self.arena[id];
            assert_eq!(node.prev, prev, "bad back-link at offset {}", node.offset);
            if let Some(p) = prev {
                assert!(self.arena[p].offset < node.offset, "level 0 not ascending");
            }
            max_node_level = max_node_level.max(Some(node.level()));
            level_zero.push(id);
            prev = Some(id);
            cursor = node.next_at(0);
        }

        assert_eq!(level_zero.len(), self.len, "len mismatch");
        assert_eq!(self.tails[0], prev, "level 0 tail mismatch");
        assert_eq!(
            self.height,
            max_node_level.map_or(0, |l| l + 1),
            "height mismatch"
        );

        for level in 0..MAX_LEVEL {
            let expected = level_zero
                .iter()
                .filter(|&&id| self.arena[id].level() >= level)
                .count();

            let mut seen = 0;
            let mut last: Option<NodeId> = None;
            let mut cursor = self.heads[level];
            while let Some(id) = cursor {
                let node = &self.arena[id];
                assert!(node.level() >= level, "node linked above its level");
                if let Some(l) = last {
                    assert!(self.arena[l].offset < node.offset, "level {level} not ascending");
                }
                seen += 1;
                last = Some(id);
                cursor = node.next_at(level);
            }

            assert_eq!(seen, expected, "level {level} misses nodes");
            assert_eq!(self.tails[level], last, "level {level} tail mismatch");
        }
    }
}
