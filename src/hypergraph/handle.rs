use core::fmt;
use std::collections::BTreeMap;

/// Graph-unique identity of a node.
///
/// Handles are plain integers so that pattern graphs can assign them densely from zero and
/// productions can refer to the roles of a pattern (corner, hanging vertex, center) by handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeHandle(pub usize);

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for NodeHandle {
    fn from(value: usize) -> Self {
        NodeHandle(value)
    }
}

/// Allocates node handles that never collide with occupied ones.
///
/// The allocator is a monotonic counter. Explicitly chosen handles are accepted through
/// [`HandleAllocator::reserve_if_free`] without moving the counter; if the counter later runs into
/// an occupied handle it is rebased past the largest occupied handle.
#[derive(Debug, Clone, Default)]
pub struct HandleAllocator {
    next: usize,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle that is not a key of `occupied`, advancing the counter.
    pub fn next_free<V>(&mut self, occupied: &BTreeMap<NodeHandle, V>) -> NodeHandle {
        let mut candidate = self.next;
        if occupied.contains_key(&NodeHandle(candidate)) {
            // Keys are ordered, so the last one is the maximum.
            let max = occupied.keys().next_back().map_or(0, |h| h.0);
            candidate = max + 1;
        }
        self.next = candidate + 1;
        NodeHandle(candidate)
    }

    /// Accepts `handle` if it is not a key of `occupied`.
    ///
    /// The counter is left untouched: collisions are resolved lazily by [`Self::next_free`].
    pub fn reserve_if_free<V>(
        &self,
        handle: NodeHandle,
        occupied: &BTreeMap<NodeHandle, V>,
    ) -> Option<NodeHandle> {
        if occupied.contains_key(&handle) {
            None
        } else {
            Some(handle)
        }
    }

    /// The handle the counter will try next.
    pub fn peek(&self) -> NodeHandle {
        NodeHandle(self.next)
    }
}
