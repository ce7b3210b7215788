//! Refine one of two adjacent squares, then propagate a mark across the hanging vertex this
//! leaves and refine again.
//!
//! Run with `RUST_LOG=mesh_grammar=debug` to see which occurrences the productions reject, or
//! `RUST_LOG=trace` to see the matcher's search.
use mesh_grammar::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), DerivationError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    //  5 ---- 4 ---- 3
    //  |  c0  |  c1  |
    //  0 ---- 1 ---- 2
    let points: Vec<Point> = [
        (0.0, 0.0),
        (1.0, 0.0),
        (2.0, 0.0),
        (2.0, 1.0),
        (1.0, 1.0),
        (0.0, 1.0),
    ]
    .into_iter()
    .map(Point::from)
    .collect();
    let mut mesh = builders::mesh(&points, &[vec![0, 1, 4, 5], vec![1, 2, 3, 4]], false)?;

    // Refining c0 leaves a hanging vertex on the shared side.
    Derivation::new()
        .mark(mesh.centers[0])
        .apply(RefineCell::quad())
        .run(&mut mesh.graph)?;

    // Marking the new quad in the corner at vertex 4 forces c1 to be refined first, which
    // removes the hanging vertex before the small quad is refined in turn.
    let corner = mesh.vertices[4];
    let small = mesh
        .graph
        .hyperedges()
        .find(|q| q.center != mesh.centers[1] && q.members.contains(&corner))
        .map(|q| q.center)
        .ok_or(GraphError::NotAHyperedge(corner))?;
    Derivation::new()
        .mark(small)
        .apply(PropagateMark::quad())
        .apply(RefineCell::with_hanging_sides(
            EdgeKind::Q,
            &[false, false, true, false],
        )?)
        .apply(RefineCell::quad())
        .run(&mut mesh.graph)?;

    println!("nodes: {}", mesh.graph.node_count());
    for q in mesh.graph.hyperedges() {
        println!("{} {} {:?} {:?}", q.kind, q.center, q.flag, q.members);
    }
    let hanging = mesh.graph.vertices().filter(|(_, a)| a.is_flagged()).count();
    println!("hanging vertices: {hanging}");
    Ok(())
}
