use super::{EdgeAttrs, EdgeKind, Graph, NodeAttrs, NodeHandle, NodeKind, Point};
use crate::error::{GraphError, GraphResult};

/// A hyperedge reconstructed from its center node and spokes.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperedge {
    pub center: NodeHandle,
    /// Kind of the spokes: [`EdgeKind::Q`] or [`EdgeKind::P`].
    pub kind: EdgeKind,
    pub flag: Option<bool>,
    /// Member nodes in handle order.
    pub members: Vec<NodeHandle>,
}

impl Graph {
    /// Add a hyperedge over `members`, returning the handle of its center.
    ///
    /// `attrs.kind` selects the hyperedge type and must be a spoke kind whose arity equals the
    /// number of members, which must be distinct vertices. The center is placed at the centroid of the members and receives
    /// `attrs.flag`; every spoke carries `attrs`.
    pub fn add_hyperedge(
        &mut self,
        members: &[NodeHandle],
        attrs: EdgeAttrs,
    ) -> GraphResult<NodeHandle> {
        self.add_hyperedge_with(members, attrs, None, None)
    }

    /// Like [`Graph::add_hyperedge`], with an explicit center handle and/or position.
    pub fn add_hyperedge_with(
        &mut self,
        members: &[NodeHandle],
        attrs: EdgeAttrs,
        center: Option<NodeHandle>,
        position: Option<Point>,
    ) -> GraphResult<NodeHandle> {
        let (arity, center_kind) = match (attrs.kind.arity(), attrs.kind.center_kind()) {
            (Some(arity), Some(center_kind)) => (arity, center_kind),
            _ => return Err(GraphError::NotAHyperedgeKind(attrs.kind)),
        };
        if members.len() != arity {
            return Err(GraphError::ArityMismatch {
                kind: attrs.kind,
                expected: arity,
                actual: members.len(),
            });
        }
        let mut positions = Vec::with_capacity(arity);
        for (i, member) in members.iter().enumerate() {
            if members[..i].contains(member) {
                return Err(GraphError::DuplicateMember(*member));
            }
            let attrs = self.node(*member)?;
            if attrs.kind != NodeKind::Vertex {
                return Err(GraphError::KindMismatch {
                    handle: *member,
                    expected: NodeKind::Vertex,
                    actual: attrs.kind,
                });
            }
            positions.push(attrs.position);
        }
        if let Some(h) = center {
            if self.contains_node(h) {
                return Err(GraphError::DuplicateNode(h));
            }
        }

        let position = position
            .or_else(|| Point::centroid(positions))
            .unwrap_or_default();
        let center_attrs = NodeAttrs {
            kind: center_kind,
            position,
            flag: Some(attrs.flag),
        };
        let center = match center {
            Some(h) => self.add_node_with_handle(h, center_attrs)?,
            None => self.add_node(center_attrs),
        };
        for member in members {
            self.add_edge(*member, center, attrs)?;
        }
        tracing::trace!(%center, kind = %attrs.kind, flag = attrs.flag, "added hyperedge");
        Ok(center)
    }

    /// The hyperedge whose center is `center`.
    pub fn hyperedge(&self, center: NodeHandle) -> GraphResult<Hyperedge> {
        let attrs = self.node(center)?;
        let kind = attrs
            .kind
            .spoke_kind()
            .ok_or(GraphError::NotAHyperedge(center))?;
        let members = self
            .neighbors(center)
            .filter(|(_, e)| e.kind == kind)
            .map(|(h, _)| h)
            .collect();
        Ok(Hyperedge {
            center,
            kind,
            flag: attrs.flag,
            members,
        })
    }

    /// All hyperedges in center-handle order.
    pub fn hyperedges(&self) -> impl Iterator<Item = Hyperedge> + '_ {
        self.hyperedge_centers()
            .filter_map(|(center, _)| self.hyperedge(center).ok())
    }

    /// Remove the hyperedge centered at `center`, which must have spokes of kind `kind`.
    ///
    /// Spokes disappear together with the center node. Returns the removed hyperedge.
    pub fn remove_hyperedge(
        &mut self,
        center: NodeHandle,
        kind: EdgeKind,
    ) -> GraphResult<Hyperedge> {
        let expected = kind
            .center_kind()
            .ok_or(GraphError::NotAHyperedgeKind(kind))?;
        let actual = self.node(center)?.kind;
        if actual != expected {
            return Err(GraphError::KindMismatch {
                handle: center,
                expected,
                actual,
            });
        }
        let removed = self.hyperedge(center)?;
        self.remove_node(center)?;
        tracing::trace!(%center, %kind, "removed hyperedge");
        Ok(removed)
    }

    /// Set the flag of a hyperedge: its center and every spoke change together.
    pub fn update_hyperedge_flag(&mut self, center: NodeHandle, flag: bool) -> GraphResult<()> {
        let hyperedge = self.hyperedge(center)?;
        for member in &hyperedge.members {
            self.set_edge_flag(*member, center, flag)?;
        }
        if let Some(attrs) = self.nodes.get_mut(&center) {
            attrs.flag = Some(flag);
        }
        tracing::trace!(%center, flag, "updated hyperedge flag");
        Ok(())
    }
}

/// Kind of hyperedge with `arity` members, if any.
pub fn hyperedge_kind_for_arity(arity: usize) -> Option<EdgeKind> {
    [EdgeKind::Q, EdgeKind::P]
        .into_iter()
        .find(|kind| kind.arity() == Some(arity))
}
