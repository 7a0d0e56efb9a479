use std::ops::{Index, IndexMut};

use super::node::Node;

/// Index of a node slot in the [`Arena`].
pub(crate) type NodeId = usize;

/// A node id plus the generation it was read at.
///
/// Removing a node bumps its slot's generation, so a handle taken before
/// the removal no longer matches, even after the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Handle {
    index: NodeId,
    generation: u64,
}

impl Handle {
    pub(crate) fn index(self) -> NodeId {
        self.index
    }
}

#[derive(Debug)]
struct Slot {
    generation: u64,
    node: Option<Node>,
}

/// Node storage. Links between nodes are slot indices, never references.
///
/// Freed slots go on a free list and are handed out again by `alloc`.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    slots: Vec<Slot>,
    free: Vec<NodeId>,
}

impl Arena {
    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id].node = Some(node);
                id
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        }
    }

    /// Take the node out of its slot. Returns `None` for a vacant slot.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<Node> {
        let slot = self.slots.get_mut(id)?;
        let node = slot.node.take()?;
        slot.generation += 1;
        self.free.push(id);
        Some(node)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id).and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn handle(&self, id: NodeId) -> Handle {
        let generation = self.slots.get(id).map_or(0, |slot| slot.generation);
        Handle {
            index: id,
            generation,
        }
    }

    /// Whether the node the handle was taken from is still linked in.
    pub(crate) fn is_live(&self, handle: Handle) -> bool {
        self.slots
            .get(handle.index)
            .is_some_and(|slot| slot.generation == handle.generation && slot.node.is_some())
    }

    /// Slots ever allocated, live or free.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn free_slots(&self) -> usize {
        self.free.len()
    }
}

// Ids stored in heads/tails/forward links always point at occupied slots,
// so indexing a vacant one means the graph itself is broken.
impl Index<NodeId> for Arena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        match self.slots[id].node.as_ref() {
            Some(node) => node,
            None => panic!("dangling node id {id}"),
        }
    }
}

impl IndexMut<NodeId> for Arena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match self.slots[id].node.as_mut() {
            Some(node) => node,
            None => panic!("dangling node id {id}"),
        }
    }
}
