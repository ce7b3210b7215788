use mesh_grammar::prelude::*;

use proptest::collection::vec;
use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Strategy};

/// One mutation of a graph. Indices refer to the nodes present when the operation runs, taken
/// modulo their number, so every script is applicable to every graph.
#[derive(Debug, Clone)]
pub enum Op {
    AddVertex(Point, Option<bool>),
    AddVertexAt(usize),
    AddEdge(usize, usize, bool),
    RemoveNode(usize),
    Split(usize),
    AddHyperedge(Vec<usize>, bool),
    FlagHyperedge(usize, bool),
}

pub fn arb_point() -> BoxedStrategy<Point> {
    (-10.0..10.0f64, -10.0..10.0f64)
        .prop_map(Point::from)
        .boxed()
}

pub fn arb_flag() -> BoxedStrategy<Option<bool>> {
    prop_oneof![Just(None), Just(Some(false)), Just(Some(true))].boxed()
}

pub fn arb_op() -> BoxedStrategy<Op> {
    prop_oneof![
        3 => (arb_point(), arb_flag()).prop_map(|(p, f)| Op::AddVertex(p, f)),
        1 => (0..32usize).prop_map(Op::AddVertexAt),
        3 => (any::<usize>(), any::<usize>(), any::<bool>()).prop_map(|(u, v, f)| Op::AddEdge(u, v, f)),
        1 => any::<usize>().prop_map(Op::RemoveNode),
        2 => any::<usize>().prop_map(Op::Split),
        2 => (vec(any::<usize>(), 4..=5), any::<bool>()).prop_map(|(m, f)| Op::AddHyperedge(m, f)),
        1 => (any::<usize>(), any::<bool>()).prop_map(|(c, f)| Op::FlagHyperedge(c, f)),
    ]
    .boxed()
}

pub fn arb_script(max_len: usize) -> BoxedStrategy<Vec<Op>> {
    vec(arb_op(), 0..=max_len).boxed()
}

fn pick<T: Copy>(items: &[T], idx: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[idx % items.len()])
    }
}

/// Run `op` against `g`. Rejected operations must leave `g` unchanged, which is asserted here.
pub fn apply_op(g: &mut Graph, op: &Op) {
    let before = g.clone();
    let nodes: Vec<NodeHandle> = g.nodes().map(|(h, _)| h).collect();
    let result: GraphResult<()> = match op {
        Op::AddVertex(p, f) => {
            g.add_vertex(*p, *f);
            Ok(())
        }
        Op::AddVertexAt(h) => g
            .add_node_with_handle(NodeHandle(*h), NodeAttrs::vertex((0.0, 0.0), None))
            .map(|_| ()),
        Op::AddEdge(u, v, f) => match (pick(&nodes, *u), pick(&nodes, *v)) {
            (Some(u), Some(v)) => {
                // Plain edges never touch a hyperedge center.
                let center = |h| g.node(h).map(|a| a.kind.is_hyperedge_center());
                if center(u) == Ok(false) && center(v) == Ok(false) {
                    g.add_edge(u, v, EdgeAttrs::plain(*f))
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        },
        Op::RemoveNode(h) => match pick(&nodes, *h) {
            // Removing a member would leave a hyperedge with too few spokes.
            Some(h)
                if g.node(h).map(|a| a.kind) == Ok(NodeKind::Vertex)
                    && g.neighbors(h).all(|(_, e)| !e.kind.is_spoke()) =>
            {
                g.remove_node(h).map(|_| ())
            }
            _ => Ok(()),
        },
        Op::Split(idx) => {
            let plain: Vec<(NodeHandle, NodeHandle)> =
                g.plain_edges().map(|(u, v, _)| (u, v)).collect();
            match pick(&plain, *idx) {
                Some((u, v)) => g
                    .split_edge_with_vertex(u, v, SplitOptions::default())
                    .map(|_| ()),
                None => Ok(()),
            }
        }
        Op::AddHyperedge(members, f) => {
            let vertices: Vec<NodeHandle> = g.vertices().map(|(h, _)| h).collect();
            let members: Vec<NodeHandle> =
                members.iter().filter_map(|m| pick(&vertices, *m)).collect();
            let kind = if members.len() == 4 { EdgeKind::Q } else { EdgeKind::P };
            g.add_hyperedge(&members, EdgeAttrs::new(kind, *f))
                .map(|_| ())
        }
        Op::FlagHyperedge(c, f) => {
            let centers: Vec<NodeHandle> = g.hyperedge_centers().map(|(h, _)| h).collect();
            match pick(&centers, *c) {
                Some(c) => g.update_hyperedge_flag(c, *f),
                None => Ok(()),
            }
        }
    };
    if result.is_err() {
        assert_eq!(*g, before, "rejected {:?} modified the graph", op);
    }
}

/// A random graph built by running a script from the empty graph.
pub fn arb_graph(max_ops: usize) -> BoxedStrategy<Graph> {
    arb_script(max_ops)
        .prop_map(|script| {
            let mut g = Graph::empty();
            for op in &script {
                apply_op(&mut g, op);
            }
            g
        })
        .boxed()
}
