//! Subgraph matching of pattern graphs in host graphs.
//!
//! An [`Occurrence`] of a pattern `P` in a host `H` is an injective map from the nodes of `P` to
//! the nodes of `H` such that
//!
//! - every pattern node maps to a host node of the same kind, and with the same flag unless the
//!   pattern node's flag is unset (a wildcard),
//! - every pattern edge `u -- v` maps to a host edge of the same kind. Edge flags are *not*
//!   compared; productions inspect them in their feasibility checks.
//!
//! In [`MatchMode::Isomorphic`] the host subgraph induced by the image must have no other edges,
//! while [`MatchMode::Monomorphic`] tolerates extra host edges between mapped nodes.
//!
//! Occurrences are produced lazily by [`Occurrences`], in no particular order.
pub mod search;
pub mod trace;

pub use search::Occurrences;
pub use trace::*;

use crate::hypergraph::{EdgeAttrs, Graph, NodeAttrs, NodeHandle};
use core::ops::Index;
use std::collections::BTreeMap;

/// How adjacency between mapped nodes is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Exact: mapped nodes are adjacent in the host iff they are adjacent in the pattern.
    #[default]
    Isomorphic,
    /// Superset: every pattern edge must be present, additional host edges are allowed.
    Monomorphic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchOptions {
    pub mode: MatchMode,
}

impl From<MatchMode> for MatchOptions {
    fn from(mode: MatchMode) -> Self {
        MatchOptions { mode }
    }
}

/// A match of a pattern in a host, with lookups in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Occurrence {
    forward: BTreeMap<NodeHandle, NodeHandle>,
    reverse: BTreeMap<NodeHandle, NodeHandle>,
}

impl Occurrence {
    pub(crate) fn from_pairs<I: IntoIterator<Item = (NodeHandle, NodeHandle)>>(pairs: I) -> Self {
        let mut occurrence = Occurrence::default();
        for (p, h) in pairs {
            occurrence.forward.insert(p, h);
            occurrence.reverse.insert(h, p);
        }
        occurrence
    }

    /// Host node playing the role of pattern node `pattern`.
    pub fn host(&self, pattern: NodeHandle) -> Option<NodeHandle> {
        self.forward.get(&pattern).copied()
    }

    /// Pattern node whose role is played by host node `host`.
    pub fn pattern(&self, host: NodeHandle) -> Option<NodeHandle> {
        self.reverse.get(&host).copied()
    }

    pub fn contains_host(&self, host: NodeHandle) -> bool {
        self.reverse.contains_key(&host)
    }

    /// `(pattern, host)` pairs in pattern-handle order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, NodeHandle)> + '_ {
        self.forward.iter().map(|(p, h)| (*p, *h))
    }

    /// Host nodes for a sequence of pattern roles.
    pub fn hosts<const N: usize>(&self, roles: [NodeHandle; N]) -> [NodeHandle; N] {
        roles.map(|role| self[role])
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Look up the host node for a pattern role.
///
/// # Panics
///
/// If `pattern` is not a node of the matched pattern.
impl Index<NodeHandle> for Occurrence {
    type Output = NodeHandle;

    fn index(&self, pattern: NodeHandle) -> &NodeHandle {
        self.forward
            .get(&pattern)
            .unwrap_or_else(|| panic!("pattern node {} is not part of the occurrence", pattern))
    }
}

/// Default node compatibility: equal kinds, and equal flags unless the pattern flag is unset.
pub fn node_compatible(pattern: &NodeAttrs, host: &NodeAttrs) -> bool {
    if pattern.kind != host.kind {
        return false;
    }
    match pattern.flag {
        Some(flag) => host.flag == Some(flag),
        None => true,
    }
}

/// Default edge compatibility: equal kinds.
pub fn edge_compatible(pattern: &EdgeAttrs, host: &EdgeAttrs) -> bool {
    pattern.kind == host.kind
}

pub type NodeEq = fn(&NodeAttrs, &NodeAttrs) -> bool;
pub type EdgeEq = fn(&EdgeAttrs, &EdgeAttrs) -> bool;

impl Graph {
    /// Lazily enumerate occurrences of `pattern` in `self` using custom compatibility predicates.
    pub fn find_occurrences_by<'a, FN, FE>(
        &'a self,
        pattern: &'a Graph,
        options: MatchOptions,
        node_eq: FN,
        edge_eq: FE,
        trace: Option<&'a dyn MatchTrace>,
    ) -> Occurrences<'a, FN, FE>
    where
        FN: Fn(&NodeAttrs, &NodeAttrs) -> bool,
        FE: Fn(&EdgeAttrs, &EdgeAttrs) -> bool,
    {
        let trace = trace.unwrap_or(&NOOP_TRACE);
        Occurrences::new(self, pattern, options, node_eq, edge_eq, trace)
    }

    /// Lazily enumerate occurrences of `pattern` in `self` using [`node_compatible`] and
    /// [`edge_compatible`].
    pub fn find_occurrences<'a>(
        &'a self,
        pattern: &'a Graph,
        options: impl Into<MatchOptions>,
        trace: Option<&'a dyn MatchTrace>,
    ) -> Occurrences<'a, NodeEq, EdgeEq> {
        self.find_occurrences_by(
            pattern,
            options.into(),
            node_compatible as NodeEq,
            edge_compatible as EdgeEq,
            trace,
        )
    }

    /// All induced (exact edge set) occurrences of `pattern`.
    pub fn find_isomorphisms(&self, pattern: &Graph) -> Vec<Occurrence> {
        self.find_occurrences(pattern, MatchMode::Isomorphic, None)
            .collect()
    }

    /// All occurrences of `pattern` that tolerate extra host edges.
    pub fn find_monomorphisms(&self, pattern: &Graph) -> Vec<Occurrence> {
        self.find_occurrences(pattern, MatchMode::Monomorphic, None)
            .collect()
    }
}
