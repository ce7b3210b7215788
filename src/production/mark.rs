use super::cell::{cell_pattern, CellPatternSpec, CellRoles};
use super::Production;
use crate::error::{GraphError, GraphResult};
use crate::hypergraph::{EdgeKind, Graph, NodeHandle};
use crate::matching::{MatchMode, Occurrence};

/// Mark an unflagged cell for refinement.
///
/// The pattern is a bare `Q` or `P` hyperedge flagged `false` over corners with any flag. It
/// says nothing about the boundary, so matching is monomorphic: the corners of a real cell are
/// also joined by plain edges. Optionally restricted to a single hyperedge.
#[derive(Debug, Clone)]
pub struct MarkCell {
    name: String,
    pattern: Graph,
    roles: CellRoles,
    target: Option<NodeHandle>,
}

impl MarkCell {
    /// Mark any unflagged cell of the given kind.
    pub fn new(kind: EdgeKind) -> GraphResult<Self> {
        let arity = kind.arity().ok_or(GraphError::NotAHyperedgeKind(kind))?;
        let (pattern, roles) = cell_pattern(&CellPatternSpec {
            kind,
            corner_flag: None,
            center_flag: false,
            hanging_sides: &vec![false; arity],
            boundary: false,
        })?;
        Ok(MarkCell {
            name: format!("mark-{}", kind),
            pattern,
            roles,
            target: None,
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
            Err(err) => unreachable!("fixed cell pattern is valid: {err}"),
        }
    }

    /// Only mark the hyperedge centered at `center`.
    pub fn at(mut self, center: NodeHandle) -> Self {
        self.name = format!("{}@{}", self.name, center);
        self.target = Some(center);
        self
    }
}

impl Production for MarkCell {
    fn name(&self) -> &str {
        &self.name
    }

    fn pattern(&self) -> &Graph {
        &self.pattern
    }

    fn match_mode(&self) -> MatchMode {
        MatchMode::Monomorphic
    }

    fn is_feasible(&self, _host: &Graph, occurrence: &Occurrence) -> bool {
        match self.target {
            Some(target) => occurrence[self.roles.center] == target,
            None => true,
        }
    }

    fn rewrite(&self, host: &mut Graph, occurrence: &Occurrence) -> GraphResult<()> {
        host.update_hyperedge_flag(occurrence[self.roles.center], true)
    }
}
