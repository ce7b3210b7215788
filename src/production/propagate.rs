use super::cell::{cell_pattern, CellPatternSpec, CellRoles};
use super::Production;
use crate::error::{GraphError, GraphResult};
use crate::hypergraph::{EdgeAttrs, EdgeKind, Graph, NodeHandle};
use crate::matching::{MatchMode, Occurrence};

/// Propagate a refinement mark across a hanging vertex.
///
/// An unmarked `Q` or `P` cell whose side `1 -- 2` carries a hanging vertex is marked when the
/// smaller, already refined neighbor quad touching that vertex and corner `2` is itself marked.
/// Refining the big cell afterwards removes the hanging vertex before the small one is refined,
/// which would otherwise leave two levels of hanging vertices on one side.
///
/// ```text
///   3 ------- 2 ---- s1
///   |         |      |
///   |    c    h -- s0 |    c: big cell, unmarked
///   |         |   q  |    q: small Q, marked
///   0 ------- 1      |
/// ```
///
/// The pattern leaves out the rest of the neighborhood, so matching is monomorphic and the
/// feasibility check confirms that the hanging vertex really sits on the side `1 -- 2`.
#[derive(Debug, Clone)]
pub struct PropagateMark {
    name: String,
    pattern: Graph,
    roles: CellRoles,
    hanging: NodeHandle,
    small_center: NodeHandle,
}

impl PropagateMark {
    /// Propagate into an unmarked cell of the given kind.
    pub fn new(kind: EdgeKind) -> GraphResult<Self> {
        let arity = kind.arity().ok_or(GraphError::NotAHyperedgeKind(kind))?;
        let (mut pattern, roles) = cell_pattern(&CellPatternSpec {
            kind,
            corner_flag: None,
            center_flag: false,
            hanging_sides: &vec![false; arity],
            boundary: false,
        })?;

        let (a, b) = (roles.corners[1], roles.corners[2]);
        let pa = pattern.node(a)?.position;
        let pb = pattern.node(b)?.position;
        let ph = pa.midpoint(pb);
        let hanging = pattern.add_vertex(ph, Some(true));
        let s0 = pattern.add_vertex(ph + ph, None);
        let s1 = pattern.add_vertex(pb + pb, None);
        let small_center =
            pattern.add_hyperedge(&[hanging, s0, s1, b], EdgeAttrs::new(EdgeKind::Q, true))?;

        pattern.add_edge(b, hanging, EdgeAttrs::plain(false))?;
        pattern.add_edge(hanging, a, EdgeAttrs::plain(false))?;

        Ok(PropagateMark {
            name: format!("propagate-mark-{}", kind),
            pattern,
            roles,
            hanging,
            small_center,
        })
    }

    pub fn quad() -> Self {
        Self::build(EdgeKind::Q)
    }

    pub fn pentagon() -> Self {
        Self::build(EdgeKind::P)
    }

    fn build(kind: EdgeKind) -> Self {
        match Self::new(kind) {
            Ok(production) => production,
            Err(err) => unreachable!("fixed propagation pattern is valid: {err}"),
        }
    }

    pub fn roles(&self) -> &CellRoles {
        &self.roles
    }
}

impl Default for PropagateMark {
    fn default() -> Self {
        Self::quad()
    }
}

impl Production for PropagateMark {
    fn name(&self) -> &str {
        &self.name
    }

    fn pattern(&self) -> &Graph {
        &self.pattern
    }

    fn match_mode(&self) -> MatchMode {
        MatchMode::Monomorphic
    }

    fn is_feasible(&self, host: &Graph, occurrence: &Occurrence) -> bool {
        let [a, b, hanging] =
            occurrence.hosts([self.roles.corners[1], self.roles.corners[2], self.hanging]);
        matches!(host.node_between(a, b), Ok(between) if between == hanging)
    }

    fn rewrite(&self, host: &mut Graph, occurrence: &Occurrence) -> GraphResult<()> {
        host.update_hyperedge_flag(occurrence[self.roles.center], true)
    }
}
