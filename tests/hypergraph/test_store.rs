use super::strategy::{apply_op, arb_graph, arb_script};
use mesh_grammar::prelude::*;

use proptest::prelude::*;
use std::collections::BTreeSet;

fn unit_square_vertices(g: &mut Graph) -> Vec<NodeHandle> {
    [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
        .into_iter()
        .map(|p| g.add_vertex(p, Some(false)))
        .collect()
}

fn assert_well_formed(g: &Graph) {
    // Adjacency is symmetric and never refers to missing nodes.
    for (u, v, attrs) in g.edges() {
        assert!(g.contains_node(u) && g.contains_node(v));
        assert_eq!(g.edge_attrs(v, u), Some(attrs));
        assert_ne!(u, v);
    }

    // Every hyperedge has the right number of spokes, all carrying the center's flag.
    for q in g.hyperedges() {
        assert_eq!(Some(q.members.len()), q.kind.arity(), "{:?}", q);
        for m in &q.members {
            let spoke = g.edge(*m, q.center).unwrap();
            assert_eq!(Some(spoke.flag), q.flag);
            assert_eq!(g.node(*m).unwrap().kind, NodeKind::Vertex);
        }
        // Spokes are the only edges of a center.
        assert_eq!(g.degree(q.center), q.members.len());
    }
}

proptest! {
    #[test]
    fn test_scripts_keep_graph_well_formed(g in arb_graph(40)) {
        assert_well_formed(&g);
    }

    #[test]
    fn test_new_handles_are_fresh(script in arb_script(40)) {
        let mut g = Graph::empty();
        for op in &script {
            let before: BTreeSet<NodeHandle> = g.nodes().map(|(h, _)| h).collect();
            apply_op(&mut g, op);
            let fresh = g.add_vertex((0.0, 0.0), None);
            prop_assert!(!before.contains(&fresh));
            prop_assert_eq!(g.node_count(), g.nodes().map(|(h, _)| h).collect::<BTreeSet<_>>().len());
        }
    }

    #[test]
    fn test_split_alternates_flags(g in arb_graph(40), idx in any::<usize>()) {
        let plain: Vec<_> = g.plain_edges().map(|(u, v, a)| (u, v, *a)).collect();
        prop_assume!(!plain.is_empty());
        let (u, v, edge) = plain[idx % plain.len()];

        let mut g = g;
        let w = g.split_edge_with_vertex(u, v, SplitOptions::default()).unwrap();

        prop_assert!(!g.has_edge(u, v));
        prop_assert_eq!(g.node(w).unwrap().flag, Some(!edge.flag));
        prop_assert_eq!(g.edge(u, w).unwrap(), &EdgeAttrs::plain(edge.flag));
        prop_assert_eq!(g.edge(w, v).unwrap(), &EdgeAttrs::plain(edge.flag));
        prop_assert_eq!(g.degree(w), 2);
        assert_well_formed(&g);
    }
}

#[test]
fn test_explicit_handle_collision() {
    let mut g = Graph::empty();
    let a = g.add_vertex((0.0, 0.0), None);
    let err = g
        .add_node_with_handle(a, NodeAttrs::vertex((1.0, 1.0), None))
        .unwrap_err();
    assert_eq!(err, GraphError::DuplicateNode(a));
    assert_eq!(g.node_count(), 1);

    // The allocator skips handles claimed explicitly.
    g.add_node_with_handle(NodeHandle(1), NodeAttrs::vertex((1.0, 1.0), None))
        .unwrap();
    let c = g.add_vertex((2.0, 2.0), None);
    assert_eq!(c, NodeHandle(2));
}

#[test]
fn test_add_hyperedge() {
    let mut g = Graph::empty();
    let corners = unit_square_vertices(&mut g);
    let center = g
        .add_hyperedge(&corners, EdgeAttrs::new(EdgeKind::Q, true))
        .unwrap();

    let attrs = g.node(center).unwrap();
    assert_eq!(attrs.kind, NodeKind::QCenter);
    assert_eq!(attrs.flag, Some(true));
    assert_eq!(attrs.position, Point::new(0.5, 0.5));

    let q = g.hyperedge(center).unwrap();
    assert_eq!(q.kind, EdgeKind::Q);
    assert_eq!(q.members, corners);
    assert_eq!(g.spoke_edges().count(), 4);
    assert_well_formed(&g);
}

#[test]
fn test_add_hyperedge_with_center_and_position() {
    let mut g = Graph::empty();
    let corners = unit_square_vertices(&mut g);
    let center = g
        .add_hyperedge_with(
            &corners,
            EdgeAttrs::new(EdgeKind::Q, false),
            Some(NodeHandle(10)),
            Some(Point::new(0.25, 0.75)),
        )
        .unwrap();
    assert_eq!(center, NodeHandle(10));
    assert_eq!(g.node(center).unwrap().position, Point::new(0.25, 0.75));

    let err = g
        .add_hyperedge_with(
            &corners,
            EdgeAttrs::new(EdgeKind::Q, false),
            Some(center),
            None,
        )
        .unwrap_err();
    assert_eq!(err, GraphError::DuplicateNode(center));
}

#[test]
fn test_add_hyperedge_rejects_bad_input() {
    let mut g = Graph::empty();
    let corners = unit_square_vertices(&mut g);
    let before = g.clone();

    assert_eq!(
        g.add_hyperedge(&corners, EdgeAttrs::new(EdgeKind::P, false)),
        Err(GraphError::ArityMismatch {
            kind: EdgeKind::P,
            expected: 5,
            actual: 4
        })
    );
    assert_eq!(
        g.add_hyperedge(&corners, EdgeAttrs::plain(false)),
        Err(GraphError::NotAHyperedgeKind(EdgeKind::Plain))
    );
    let repeated = [corners[0], corners[1], corners[2], corners[0]];
    assert_eq!(
        g.add_hyperedge(&repeated, EdgeAttrs::new(EdgeKind::Q, false)),
        Err(GraphError::DuplicateMember(corners[0]))
    );
    let missing = [corners[0], corners[1], corners[2], NodeHandle(99)];
    assert_eq!(
        g.add_hyperedge(&missing, EdgeAttrs::new(EdgeKind::Q, false)),
        Err(GraphError::NodeNotFound(NodeHandle(99)))
    );
    assert_eq!(g, before);
}

#[test]
fn test_add_hyperedge_rejects_center_member() {
    let mut g = Graph::empty();
    let corners = unit_square_vertices(&mut g);
    let center = g
        .add_hyperedge(&corners, EdgeAttrs::new(EdgeKind::Q, false))
        .unwrap();
    let before = g.clone();

    let members = [corners[0], corners[1], corners[2], center];
    assert_eq!(
        g.add_hyperedge(&members, EdgeAttrs::new(EdgeKind::Q, false)),
        Err(GraphError::KindMismatch {
            handle: center,
            expected: NodeKind::Vertex,
            actual: NodeKind::QCenter,
        })
    );
    assert_eq!(g, before);
    assert_well_formed(&g);
}

#[test]
fn test_update_hyperedge_flag() {
    let mut g = Graph::empty();
    let corners = unit_square_vertices(&mut g);
    let center = g
        .add_hyperedge(&corners, EdgeAttrs::new(EdgeKind::Q, false))
        .unwrap();

    g.update_hyperedge_flag(center, true).unwrap();
    assert_eq!(g.node(center).unwrap().flag, Some(true));
    assert!(g.spoke_edges().all(|(_, _, e)| e.flag));

    // Center flags only change together with their spokes.
    assert!(matches!(
        g.set_node_flag(center, Some(false)),
        Err(GraphError::KindMismatch { .. })
    ));
    assert_eq!(
        g.update_hyperedge_flag(corners[0], true),
        Err(GraphError::NotAHyperedge(corners[0]))
    );
    assert_well_formed(&g);
}

#[test]
fn test_remove_hyperedge() {
    let mut g = Graph::empty();
    let corners = unit_square_vertices(&mut g);
    for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
        g.add_edge(corners[a], corners[b], EdgeAttrs::plain(true))
            .unwrap();
    }
    let center = g
        .add_hyperedge(&corners, EdgeAttrs::new(EdgeKind::Q, true))
        .unwrap();

    let removed = g.remove_hyperedge(center, EdgeKind::Q).unwrap();
    assert_eq!(removed.members, corners);
    assert_eq!(removed.flag, Some(true));
    assert!(!g.contains_node(center));
    assert_eq!(g.edge_count(), 4);
    assert_eq!(g.spoke_edges().count(), 0);
}

#[test]
fn test_split_with_options() {
    let mut g = Graph::empty();
    let a = g.add_vertex((0.0, 0.0), Some(false));
    let b = g.add_vertex((2.0, 0.0), Some(false));
    g.add_edge(a, b, EdgeAttrs::plain(false)).unwrap();

    let options = SplitOptions {
        flag: Some(false),
        handle: Some(NodeHandle(7)),
        position: Some(Point::new(0.5, 0.0)),
    };
    let w = g.split_edge_with_vertex(a, b, options).unwrap();
    assert_eq!(w, NodeHandle(7));
    let attrs = g.node(w).unwrap();
    assert_eq!(attrs.flag, Some(false));
    assert_eq!(attrs.position, Point::new(0.5, 0.0));

    // The edge is gone now.
    assert_eq!(
        g.split_edge_with_vertex(a, b, SplitOptions::default()),
        Err(GraphError::EdgeNotFound(a, b))
    );
}

#[test]
fn test_split_default_position_and_flag() {
    let mut g = Graph::empty();
    let a = g.add_vertex((0.0, 0.0), Some(false));
    let b = g.add_vertex((2.0, 2.0), Some(false));
    g.add_edge(a, b, EdgeAttrs::plain(false)).unwrap();

    let w = g.split_edge_with_vertex(a, b, SplitOptions::default()).unwrap();
    let attrs = g.node(w).unwrap();
    assert_eq!(attrs.position, Point::new(1.0, 1.0));
    // Splitting an interior edge yields a hanging vertex.
    assert_eq!(attrs.flag, Some(true));
}

#[test]
fn test_node_between() {
    let mut g = Graph::empty();
    let a = g.add_vertex((0.0, 0.0), Some(false));
    let b = g.add_vertex((2.0, 0.0), Some(false));
    g.add_edge(a, b, EdgeAttrs::plain(false)).unwrap();

    // Directly adjacent.
    assert_eq!(
        g.node_between(a, b),
        Err(GraphError::NoUniqueIntermediate(a, b))
    );

    let w = g.split_edge_with_vertex(a, b, SplitOptions::default()).unwrap();
    assert_eq!(g.node_between(a, b), Ok(w));
    assert_eq!(g.node_between(b, a), Ok(w));

    // A second common neighbor makes the answer ambiguous.
    let x = g.add_vertex((1.0, 1.0), Some(false));
    g.add_edge(a, x, EdgeAttrs::plain(false)).unwrap();
    g.add_edge(x, b, EdgeAttrs::plain(false)).unwrap();
    assert_eq!(
        g.node_between(a, b),
        Err(GraphError::NoUniqueIntermediate(a, b))
    );
}

#[test]
fn test_node_between_ignores_hyperedge_centers() {
    let mut g = Graph::empty();
    let corners = unit_square_vertices(&mut g);
    g.add_hyperedge(&corners, EdgeAttrs::new(EdgeKind::Q, false))
        .unwrap();

    // Opposite corners share only the center, which is joined by spokes.
    assert_eq!(
        g.node_between(corners[0], corners[2]),
        Err(GraphError::NoUniqueIntermediate(corners[0], corners[2]))
    );
}

#[test]
fn test_equality_ignores_allocator() {
    let mut g = Graph::empty();
    let a = g.add_vertex((0.0, 0.0), None);
    let snapshot = g.clone();

    let b = g.add_vertex((1.0, 0.0), None);
    g.remove_node(b).unwrap();
    assert_eq!(g, snapshot);

    // ... but the removed handle is not handed out again.
    let c = g.add_vertex((1.0, 0.0), None);
    assert_ne!(c, b);
    assert_ne!(c, a);
}
