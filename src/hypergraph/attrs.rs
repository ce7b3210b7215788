use core::fmt;
use core::ops::{Add, Div};
use num_traits::Zero;

/// A position in the plane.
///
/// Positions are opaque payload: they never influence matching, and are only used to place newly
/// created nodes (as averages of existing ones) and for display.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        (self + other) / 2.0
    }

    /// Mean of a collection of points, or `None` if it is empty.
    pub fn centroid<I: IntoIterator<Item = Point>>(points: I) -> Option<Point> {
        let (sum, n) = points
            .into_iter()
            .fold((Point::zero(), 0usize), |(sum, n), p| (sum + p, n + 1));
        if n == 0 {
            None
        } else {
            Some(sum / n as f64)
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl Zero for Point {
    fn zero() -> Self {
        Point::new(0.0, 0.0)
    }

    fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A mesh vertex.
    Vertex,
    /// The center of a 4-ary `Q` hyperedge.
    QCenter,
    /// The center of a 5-ary `P` hyperedge.
    PCenter,
}

impl NodeKind {
    pub fn is_hyperedge_center(self) -> bool {
        !matches!(self, NodeKind::Vertex)
    }

    /// Kind of the spoke edges incident to a hyperedge center of this kind.
    pub fn spoke_kind(self) -> Option<EdgeKind> {
        match self {
            NodeKind::Vertex => None,
            NodeKind::QCenter => Some(EdgeKind::Q),
            NodeKind::PCenter => Some(EdgeKind::P),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeKind::Vertex => "v",
            NodeKind::QCenter => "q",
            NodeKind::PCenter => "p",
        };
        f.write_str(label)
    }
}

/// What an edge stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// A mesh edge between two vertices.
    Plain,
    /// A spoke of a `Q` hyperedge.
    Q,
    /// A spoke of a `P` hyperedge.
    P,
}

impl EdgeKind {
    /// Number of members of a hyperedge whose spokes have this kind.
    pub fn arity(self) -> Option<usize> {
        match self {
            EdgeKind::Plain => None,
            EdgeKind::Q => Some(4),
            EdgeKind::P => Some(5),
        }
    }

    /// Kind of the center node of a hyperedge whose spokes have this kind.
    pub fn center_kind(self) -> Option<NodeKind> {
        match self {
            EdgeKind::Plain => None,
            EdgeKind::Q => Some(NodeKind::QCenter),
            EdgeKind::P => Some(NodeKind::PCenter),
        }
    }

    pub fn is_spoke(self) -> bool {
        !matches!(self, EdgeKind::Plain)
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EdgeKind::Plain => "e",
            EdgeKind::Q => "q",
            EdgeKind::P => "p",
        };
        f.write_str(label)
    }
}

/// Node payload.
///
/// `flag` is tri-state: `Some(true)` marks a vertex as hanging (or a hyperedge as selected for
/// refinement). In a pattern graph `None` acts as a wildcard during matching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeAttrs {
    pub kind: NodeKind,
    pub position: Point,
    pub flag: Option<bool>,
}

impl NodeAttrs {
    pub fn vertex(position: impl Into<Point>, flag: Option<bool>) -> Self {
        NodeAttrs {
            kind: NodeKind::Vertex,
            position: position.into(),
            flag,
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.flag == Some(true)
    }
}

/// Edge payload.
///
/// For plain edges the flag records whether the edge lies on the mesh boundary; for spokes it
/// mirrors the flag of the hyperedge center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeAttrs {
    pub kind: EdgeKind,
    pub flag: bool,
}

impl EdgeAttrs {
    pub const fn new(kind: EdgeKind, flag: bool) -> Self {
        EdgeAttrs { kind, flag }
    }

    pub const fn plain(flag: bool) -> Self {
        EdgeAttrs::new(EdgeKind::Plain, flag)
    }
}
