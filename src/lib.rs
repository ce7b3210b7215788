//! # Mesh Grammar
//!
//! Adaptive refinement of 2D meshes by graph-grammar rewriting.
//!
//! A mesh is stored as a [Graph](crate::hypergraph::Graph): mesh vertices are nodes, mesh
//! edges are plain edges, and each quadrilateral or pentagonal cell is a hyperedge, represented by
//! a center node joined by spoke edges to its corners:
//!
//! ```text
//!   v ───────── v
//!   │ ╲       ╱ │
//!   │   ╲   ╱   │        v: vertex
//!   │     q     │        q: Q hyperedge center
//!   │   ╱   ╲   │        ─: plain edge, ╲ ╱: spokes
//!   │ ╱       ╲ │
//!   v ───────── v
//! ```
//!
//! Every node and edge carries a flag. Vertex flags mark hanging vertices, plain edge flags mark
//! the boundary, and hyperedge flags mark cells selected for refinement.
//!
//! The mesh is changed only through [productions](crate::production::Production): a pattern
//! graph, a feasibility check, and a rewrite. Applying a production searches the host for an
//! occurrence of its pattern with the [matcher](crate::matching) and rewrites the first feasible
//! one.
//!
//! ```rust
//! use mesh_grammar::prelude::*;
//!
//! // The unit square, already marked for refinement.
//! let mut cell = builders::square(true).unwrap();
//!
//! assert!(RefineCell::quad().apply(&mut cell.graph).unwrap());
//!
//! // Four unmarked quadrilaterals around a new center vertex.
//! let quads: Vec<_> = cell.graph.hyperedges().collect();
//! assert_eq!(quads.len(), 4);
//! assert!(quads.iter().all(|q| q.flag == Some(false)));
//!
//! // Nothing left to refine.
//! assert!(!RefineCell::quad().apply(&mut cell.graph).unwrap());
//! ```
//!
//! A [Derivation](crate::derivation::Derivation) runs a fixed sequence of productions and manual
//! marks, failing if a production does not apply.
//!
//! # Logging
//!
//! The crate logs through [`tracing`]: productions report applications at `INFO` and rejected
//! occurrences at `DEBUG`, and the matcher's search tree is emitted at `TRACE` by
//! [LogTrace](crate::matching::LogTrace). No subscriber is installed by the library.

pub mod builders;
pub mod derivation;
pub mod error;
pub mod hypergraph;
pub mod matching;
pub mod production;

pub mod prelude {
    //! Commonly used types.
    pub use crate::builders;
    pub use crate::derivation::{Derivation, DerivationError, Step};
    pub use crate::error::{GraphError, GraphResult};
    pub use crate::hypergraph::{
        EdgeAttrs, EdgeKind, Graph, Hyperedge, NodeAttrs, NodeHandle, NodeKind, Point,
        SplitOptions,
    };
    pub use crate::matching::{MatchMode, MatchOptions, Occurrence};
    pub use crate::production::{MarkCell, Production, PropagateMark, RefineCell};
}
