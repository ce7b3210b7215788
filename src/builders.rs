//! Small host meshes for demos and tests.
//!
//! Every builder lays out unflagged vertices, joins each cell's corners in a cycle of plain edges,
//! and covers each cell with a `Q` or `P` hyperedge chosen by its number of corners. A mesh edge
//! is flagged `true` iff it lies on the boundary, i.e. belongs to exactly one cell.
use crate::error::{GraphError, GraphResult};
use crate::hypergraph::{hyperedge_kind_for_arity, EdgeAttrs, Graph, NodeHandle, Point};
use crate::production::cell::cycle_pairs;
use std::collections::BTreeMap;

/// A single cell.
#[derive(Debug, Clone)]
pub struct Cell {
    pub graph: Graph,
    /// Corners in boundary order.
    pub corners: Vec<NodeHandle>,
    pub center: NodeHandle,
}

/// A mesh of several cells sharing vertices.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub graph: Graph,
    /// Vertex handles, indexed like the input points.
    pub vertices: Vec<NodeHandle>,
    /// Hyperedge centers, indexed like the input cells.
    pub centers: Vec<NodeHandle>,
}

/// The unit square. `marked` is the flag of its hyperedge.
pub fn square(marked: bool) -> GraphResult<Cell> {
    polygon(
        &[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ],
        marked,
    )
}

/// A unit square with a fifth corner pushed out of its right side.
pub fn pentagon(marked: bool) -> GraphResult<Cell> {
    polygon(
        &[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.5, 0.5),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ],
        marked,
    )
}

/// A single cell with the given corners, in boundary order.
pub fn polygon(corners: &[Point], marked: bool) -> GraphResult<Cell> {
    let indices: Vec<usize> = (0..corners.len()).collect();
    let mut mesh = mesh(corners, &[indices], marked)?;
    Ok(Cell {
        graph: mesh.graph,
        corners: mesh.vertices,
        center: mesh.centers.remove(0),
    })
}

/// A mesh with vertices at `points` and one cell per entry of `cells`, each listing indices into
/// `points` in boundary order. Every hyperedge gets flag `marked`.
///
/// Fails if a cell has neither 4 nor 5 corners or repeats a corner.
///
/// # Panics
///
/// If a cell refers to a point index out of range.
pub fn mesh(points: &[Point], cells: &[Vec<usize>], marked: bool) -> GraphResult<Mesh> {
    let mut graph = Graph::empty();
    let vertices: Vec<NodeHandle> = points
        .iter()
        .map(|p| graph.add_vertex(*p, Some(false)))
        .collect();

    let lookup = |idx: usize| {
        *vertices
            .get(idx)
            .unwrap_or_else(|| panic!("cell corner index {} out of range", idx))
    };

    // How many cells each mesh edge borders.
    let mut sides: BTreeMap<(NodeHandle, NodeHandle), usize> = BTreeMap::new();
    let mut centers = Vec::with_capacity(cells.len());
    for cell in cells {
        let corners: Vec<NodeHandle> = cell.iter().map(|idx| lookup(*idx)).collect();
        let kind = hyperedge_kind_for_arity(corners.len())
            .ok_or(GraphError::UnsupportedCellSize(corners.len()))?;
        centers.push(graph.add_hyperedge(&corners, EdgeAttrs::new(kind, marked))?);
        for (a, b) in cycle_pairs(&corners) {
            *sides.entry((a.min(b), a.max(b))).or_default() += 1;
        }
    }

    for ((a, b), count) in sides {
        graph.add_edge(a, b, EdgeAttrs::plain(count == 1))?;
    }

    Ok(Mesh {
        graph,
        vertices,
        centers,
    })
}
