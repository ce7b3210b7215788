//! The hypergraph store.
//!
//! A [`Graph`] is a simple undirected graph whose nodes and edges carry [`NodeAttrs`] and
//! [`EdgeAttrs`]. Hyperedges are not stored separately: a `k`-ary hyperedge is a center node of
//! kind [`NodeKind::QCenter`] or [`NodeKind::PCenter`] together with `k` spoke edges, one per
//! member. See [`Graph::add_hyperedge`] and the [`Hyperedge`] view.
//!
//! All mutation primitives validate their preconditions before touching the graph, so an `Err`
//! leaves the graph unchanged.
pub mod attrs;
pub mod handle;
pub mod hyperedge;

pub use attrs::*;
pub use handle::*;
pub use hyperedge::*;

use crate::error::{GraphError, GraphResult};
use std::collections::BTreeMap;

/// Where and how [`Graph::split_edge_with_vertex`] creates the new vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SplitOptions {
    /// Flag of the new vertex. Defaults to the negation of the split edge's flag.
    pub flag: Option<bool>,
    /// Handle of the new vertex. Defaults to a freshly allocated handle.
    pub handle: Option<NodeHandle>,
    /// Position of the new vertex. Defaults to the midpoint of the endpoints.
    pub position: Option<Point>,
}

impl SplitOptions {
    pub fn with_flag(flag: bool) -> Self {
        SplitOptions {
            flag: Some(flag),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<NodeHandle, NodeAttrs>,
    // Symmetric: every edge is stored under both endpoints.
    adjacency: BTreeMap<NodeHandle, BTreeMap<NodeHandle, EdgeAttrs>>,
    allocator: HandleAllocator,
}

/// Structural equality: same nodes and edges with the same attributes.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.adjacency == other.adjacency
    }
}

impl Graph {
    /// The empty graph.
    pub fn empty() -> Self {
        Self::default()
    }

    ////////////////////////////////////////
    // Nodes

    /// Add a node with a freshly allocated handle.
    pub fn add_node(&mut self, attrs: NodeAttrs) -> NodeHandle {
        let handle = self.allocator.next_free(&self.nodes);
        self.insert_node(handle, attrs);
        handle
    }

    /// Add a node under an explicitly chosen handle.
    pub fn add_node_with_handle(
        &mut self,
        handle: NodeHandle,
        attrs: NodeAttrs,
    ) -> GraphResult<NodeHandle> {
        let handle = self
            .allocator
            .reserve_if_free(handle, &self.nodes)
            .ok_or(GraphError::DuplicateNode(handle))?;
        self.insert_node(handle, attrs);
        Ok(handle)
    }

    /// Add a vertex with the given position and flag.
    pub fn add_vertex(&mut self, position: impl Into<Point>, flag: Option<bool>) -> NodeHandle {
        self.add_node(NodeAttrs::vertex(position, flag))
    }

    fn insert_node(&mut self, handle: NodeHandle, attrs: NodeAttrs) {
        self.nodes.insert(handle, attrs);
        self.adjacency.insert(handle, BTreeMap::new());
    }

    /// Remove a node together with all incident edges.
    pub fn remove_node(&mut self, handle: NodeHandle) -> GraphResult<NodeAttrs> {
        let attrs = self
            .nodes
            .remove(&handle)
            .ok_or(GraphError::NodeNotFound(handle))?;
        let incident = self.adjacency.remove(&handle).unwrap_or_default();
        for neighbor in incident.keys() {
            if let Some(row) = self.adjacency.get_mut(neighbor) {
                row.remove(&handle);
            }
        }
        Ok(attrs)
    }

    pub fn contains_node(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(&handle)
    }

    pub fn node(&self, handle: NodeHandle) -> GraphResult<&NodeAttrs> {
        self.nodes
            .get(&handle)
            .ok_or(GraphError::NodeNotFound(handle))
    }

    /// Set the flag of a vertex.
    ///
    /// Hyperedge centers are rejected: their flag is shared with their spokes and must be changed
    /// through [`Graph::update_hyperedge_flag`].
    pub fn set_node_flag(&mut self, handle: NodeHandle, flag: Option<bool>) -> GraphResult<()> {
        let attrs = self
            .nodes
            .get_mut(&handle)
            .ok_or(GraphError::NodeNotFound(handle))?;
        if attrs.kind != NodeKind::Vertex {
            return Err(GraphError::KindMismatch {
                handle,
                expected: NodeKind::Vertex,
                actual: attrs.kind,
            });
        }
        attrs.flag = flag;
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in handle order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &NodeAttrs)> + '_ {
        self.nodes.iter().map(|(h, a)| (*h, a))
    }

    /// Nodes of kind [`NodeKind::Vertex`].
    pub fn vertices(&self) -> impl Iterator<Item = (NodeHandle, &NodeAttrs)> + '_ {
        self.nodes().filter(|(_, a)| a.kind == NodeKind::Vertex)
    }

    /// Nodes standing for hyperedges.
    pub fn hyperedge_centers(&self) -> impl Iterator<Item = (NodeHandle, &NodeAttrs)> + '_ {
        self.nodes().filter(|(_, a)| a.kind.is_hyperedge_center())
    }

    ////////////////////////////////////////
    // Edges

    /// Insert the edge `u -- v`. An existing edge between the same endpoints is overwritten.
    pub fn add_edge(&mut self, u: NodeHandle, v: NodeHandle, attrs: EdgeAttrs) -> GraphResult<()> {
        if u == v {
            return Err(GraphError::SelfLoop(u));
        }
        for h in [u, v] {
            if !self.contains_node(h) {
                return Err(GraphError::NodeNotFound(h));
            }
        }
        self.insert_edge(u, v, attrs);
        Ok(())
    }

    fn insert_edge(&mut self, u: NodeHandle, v: NodeHandle, attrs: EdgeAttrs) {
        self.adjacency.entry(u).or_default().insert(v, attrs);
        self.adjacency.entry(v).or_default().insert(u, attrs);
    }

    pub fn remove_edge(&mut self, u: NodeHandle, v: NodeHandle) -> GraphResult<EdgeAttrs> {
        let attrs = self
            .adjacency
            .get_mut(&u)
            .and_then(|row| row.remove(&v))
            .ok_or(GraphError::EdgeNotFound(u, v))?;
        if let Some(row) = self.adjacency.get_mut(&v) {
            row.remove(&u);
        }
        Ok(attrs)
    }

    pub fn has_edge(&self, u: NodeHandle, v: NodeHandle) -> bool {
        self.edge_attrs(u, v).is_some()
    }

    /// Attributes of `u -- v`, if that edge exists.
    pub fn edge_attrs(&self, u: NodeHandle, v: NodeHandle) -> Option<&EdgeAttrs> {
        self.adjacency.get(&u).and_then(|row| row.get(&v))
    }

    pub fn edge(&self, u: NodeHandle, v: NodeHandle) -> GraphResult<&EdgeAttrs> {
        self.edge_attrs(u, v).ok_or(GraphError::EdgeNotFound(u, v))
    }

    /// Overwrite the flag of an existing edge.
    pub fn set_edge_flag(&mut self, u: NodeHandle, v: NodeHandle, flag: bool) -> GraphResult<()> {
        let mut attrs = *self.edge(u, v)?;
        attrs.flag = flag;
        self.insert_edge(u, v, attrs);
        Ok(())
    }

    /// Every edge once, as `(u, v, attrs)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeHandle, NodeHandle, &EdgeAttrs)> + '_ {
        self.adjacency.iter().flat_map(|(u, row)| {
            row.range(*u..)
                .filter(move |(v, _)| *v != u)
                .map(move |(v, a)| (*u, *v, a))
        })
    }

    /// Edges of kind [`EdgeKind::Plain`].
    pub fn plain_edges(&self) -> impl Iterator<Item = (NodeHandle, NodeHandle, &EdgeAttrs)> + '_ {
        self.edges().filter(|(_, _, a)| a.kind == EdgeKind::Plain)
    }

    /// Spoke edges of hyperedges.
    pub fn spoke_edges(&self) -> impl Iterator<Item = (NodeHandle, NodeHandle, &EdgeAttrs)> + '_ {
        self.edges().filter(|(_, _, a)| a.kind.is_spoke())
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    ////////////////////////////////////////
    // Adjacency

    /// Neighbors of `handle` with the attributes of the connecting edge.
    ///
    /// Empty if `handle` is not in the graph.
    pub fn neighbors(
        &self,
        handle: NodeHandle,
    ) -> impl Iterator<Item = (NodeHandle, &EdgeAttrs)> + '_ {
        self.adjacency
            .get(&handle)
            .into_iter()
            .flat_map(|row| row.iter().map(|(h, a)| (*h, a)))
    }

    pub fn degree(&self, handle: NodeHandle) -> usize {
        self.adjacency.get(&handle).map_or(0, BTreeMap::len)
    }

    /// The unique vertex joined to both `a` and `b` by plain edges.
    ///
    /// This is the vertex sitting on the mesh edge between two corners once that edge has been
    /// split. Fails if `a` and `b` are directly adjacent, or if there is no such vertex or more
    /// than one.
    pub fn node_between(&self, a: NodeHandle, b: NodeHandle) -> GraphResult<NodeHandle> {
        self.node(a)?;
        self.node(b)?;
        if self.has_edge(a, b) {
            return Err(GraphError::NoUniqueIntermediate(a, b));
        }
        let mut common = self.neighbors(a).filter(|(h, attrs)| {
            attrs.kind == EdgeKind::Plain
                && self
                    .edge_attrs(*h, b)
                    .is_some_and(|e| e.kind == EdgeKind::Plain)
        });
        match (common.next(), common.next()) {
            (Some((h, _)), None) => Ok(h),
            _ => Err(GraphError::NoUniqueIntermediate(a, b)),
        }
    }

    ////////////////////////////////////////
    // Splitting

    /// Replace the edge `u -- v` by `u -- w -- v` for a new vertex `w`.
    ///
    /// Both new edges are plain and carry the flag of the original edge. Unless overridden in
    /// `options`, `w` is placed at the midpoint of `u` and `v` and its flag is the negation of the
    /// original edge's flag: splitting a boundary edge yields a regular vertex, splitting an
    /// interior edge yields a hanging one.
    pub fn split_edge_with_vertex(
        &mut self,
        u: NodeHandle,
        v: NodeHandle,
        options: SplitOptions,
    ) -> GraphResult<NodeHandle> {
        let edge = *self.edge(u, v)?;
        if let Some(h) = options.handle {
            if self.contains_node(h) {
                return Err(GraphError::DuplicateNode(h));
            }
        }
        let position = match options.position {
            Some(p) => p,
            None => self.node(u)?.position.midpoint(self.node(v)?.position),
        };
        let flag = options.flag.unwrap_or(!edge.flag);

        self.remove_edge(u, v)?;
        let attrs = NodeAttrs::vertex(position, Some(flag));
        let w = match options.handle {
            Some(h) => self.add_node_with_handle(h, attrs)?,
            None => self.add_node(attrs),
        };
        let halves = EdgeAttrs::plain(edge.flag);
        self.insert_edge(u, w, halves);
        self.insert_edge(w, v, halves);
        tracing::trace!(%u, %v, %w, flag, "split edge");
        Ok(w)
    }
}
