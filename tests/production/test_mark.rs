use super::test_refine::{assert_hyperedges_consistent, two_squares};
use mesh_grammar::prelude::*;

#[test]
fn test_mark_square() {
    let mut cell = builders::square(false).unwrap();
    let mark = MarkCell::quad();
    assert_eq!(mark.match_mode(), MatchMode::Monomorphic);

    assert!(mark.apply(&mut cell.graph).unwrap());
    let q = cell.graph.hyperedge(cell.center).unwrap();
    assert_eq!(q.flag, Some(true));
    assert_hyperedges_consistent(&cell.graph);

    // Nothing unmarked is left.
    let before = cell.graph.clone();
    assert!(!mark.apply(&mut cell.graph).unwrap());
    assert_eq!(cell.graph, before);
}

#[test]
fn test_mark_ignores_corner_flags() {
    let mut cell = builders::pentagon(false).unwrap();
    cell.graph.set_node_flag(cell.corners[0], Some(true)).unwrap();
    cell.graph.set_node_flag(cell.corners[3], None).unwrap();

    assert!(!MarkCell::quad().apply(&mut cell.graph).unwrap());
    assert!(MarkCell::pentagon().apply(&mut cell.graph).unwrap());
    assert_eq!(cell.graph.node(cell.center).unwrap().flag, Some(true));
}

#[test]
fn test_mark_selected_cell() {
    let mut mesh = two_squares();
    let mark = MarkCell::quad().at(mesh.centers[1]);
    assert!(mark.name().ends_with(&mesh.centers[1].to_string()));

    assert!(mark.apply(&mut mesh.graph).unwrap());
    assert_eq!(
        mesh.graph.node(mesh.centers[0]).unwrap().flag,
        Some(false)
    );
    assert_eq!(mesh.graph.node(mesh.centers[1]).unwrap().flag, Some(true));

    // The target is marked now, so there is nothing left to do.
    assert!(!mark.apply(&mut mesh.graph).unwrap());
}

#[test]
fn test_mark_then_refine() {
    let mut cell = builders::square(false).unwrap();
    assert!(!RefineCell::quad().apply(&mut cell.graph).unwrap());
    assert!(MarkCell::quad().apply(&mut cell.graph).unwrap());
    assert!(RefineCell::quad().apply(&mut cell.graph).unwrap());
    assert_eq!(cell.graph.hyperedges().count(), 4);
}
