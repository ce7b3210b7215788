//! Pattern graphs for mesh cells and helpers shared by the cell productions.
use crate::error::{GraphError, GraphResult};
use crate::hypergraph::{EdgeAttrs, EdgeKind, Graph, NodeAttrs, NodeHandle, Point};

/// Node roles of a cell pattern built by [`cell_pattern`].
///
/// Handles are dense: corners come first, then hanging vertices in side order, then the center.
#[derive(Debug, Clone)]
pub struct CellRoles {
    pub kind: EdgeKind,
    pub corners: Vec<NodeHandle>,
    /// Per side `i` (from corner `i` to corner `i + 1`), the hanging vertex on it, if any.
    pub hanging: Vec<Option<NodeHandle>>,
    pub center: NodeHandle,
}

impl CellRoles {
    pub fn sides(&self) -> usize {
        self.corners.len()
    }
}

/// How to build a cell pattern.
#[derive(Debug, Clone)]
pub struct CellPatternSpec<'a> {
    pub kind: EdgeKind,
    /// Required flag of every corner; `None` matches any.
    pub corner_flag: Option<bool>,
    pub center_flag: bool,
    /// Which sides carry a hanging vertex. Must have one entry per side.
    pub hanging_sides: &'a [bool],
    /// Whether the pattern includes the plain boundary edges.
    pub boundary: bool,
}

/// Build the pattern of a `Q` or `P` cell.
///
/// Corners sit on the unit circle (positions only matter for display). The boundary, if
/// requested, runs through the hanging vertices.
pub fn cell_pattern(spec: &CellPatternSpec<'_>) -> GraphResult<(Graph, CellRoles)> {
    let n = spec
        .kind
        .arity()
        .ok_or(GraphError::NotAHyperedgeKind(spec.kind))?;
    if spec.hanging_sides.len() != n {
        return Err(GraphError::SideMaskMismatch {
            kind: spec.kind,
            expected: n,
            actual: spec.hanging_sides.len(),
        });
    }

    let mut graph = Graph::empty();
    let positions = regular_polygon(n);
    let mut next = 0;
    let mut fresh = || {
        next += 1;
        NodeHandle(next - 1)
    };

    let mut corners = Vec::with_capacity(n);
    for p in &positions {
        corners.push(graph.add_node_with_handle(fresh(), NodeAttrs::vertex(*p, spec.corner_flag))?);
    }

    let mut hanging = Vec::with_capacity(n);
    for (i, (a, b)) in cycle_pairs(&positions).enumerate() {
        if spec.hanging_sides[i] {
            let attrs = NodeAttrs::vertex(a.midpoint(b), Some(true));
            hanging.push(Some(graph.add_node_with_handle(fresh(), attrs)?));
        } else {
            hanging.push(None);
        }
    }

    let center = graph.add_hyperedge_with(
        &corners,
        EdgeAttrs::new(spec.kind, spec.center_flag),
        Some(fresh()),
        None,
    )?;

    if spec.boundary {
        let boundary = EdgeAttrs::plain(false);
        for (i, (a, b)) in cycle_pairs(&corners).enumerate() {
            match hanging[i] {
                Some(h) => {
                    graph.add_edge(a, h, boundary)?;
                    graph.add_edge(h, b, boundary)?;
                }
                None => graph.add_edge(a, b, boundary)?,
            }
        }
    }

    let roles = CellRoles {
        kind: spec.kind,
        corners,
        hanging,
        center,
    };
    Ok((graph, roles))
}

/// `(items[i], items[i + 1])` for every `i`, wrapping around at the end.
pub fn cycle_pairs<T: Copy>(items: &[T]) -> impl Iterator<Item = (T, T)> + '_ {
    let n = items.len();
    (0..n).map(move |i| (items[i], items[(i + 1) % n]))
}

/// `n` points on the unit circle, counter-clockwise.
pub fn regular_polygon(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let angle = core::f64::consts::TAU * i as f64 / n as f64;
            Point::new(angle.cos(), angle.sin())
        })
        .collect()
}
