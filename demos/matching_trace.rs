use mesh_grammar::matching::{MatchEvent, MatchTrace};
use mesh_grammar::prelude::*;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Prints the search tree, indented by depth, with the partial assignment at each solution.
struct PrintTrace {
    indent: Cell<usize>,
    // Pattern node decided at each depth.
    decision: RefCell<BTreeMap<usize, NodeHandle>>,
    assign: RefCell<BTreeMap<usize, (NodeHandle, NodeHandle)>>,
}

impl PrintTrace {
    fn new() -> Self {
        Self {
            indent: Cell::new(0),
            decision: RefCell::new(BTreeMap::new()),
            assign: RefCell::new(BTreeMap::new()),
        }
    }

    fn indent(&self) -> usize {
        self.indent.get() * 2
    }

    fn print_solution(&self) {
        let parts: Vec<String> = self
            .assign
            .borrow()
            .values()
            .map(|(p, h)| format!("{p}->{h}"))
            .collect();
        println!(
            "{:indent$}solution [{}]",
            "",
            parts.join(", "),
            indent = self.indent()
        );
    }
}

impl MatchTrace for PrintTrace {
    fn on_event(&self, event: MatchEvent) {
        match event {
            MatchEvent::EnterFrame { depth: _, frame_id } => {
                println!(
                    "{:indent$}enter frame #{frame_id}",
                    "",
                    indent = self.indent()
                );
                self.indent.set(self.indent.get() + 1);
            }
            MatchEvent::ExitFrame { depth, frame_id } => {
                self.indent.set(self.indent.get().saturating_sub(1));
                println!(
                    "{:indent$}exit frame #{frame_id}",
                    "",
                    indent = self.indent()
                );
                self.decision.borrow_mut().remove(&depth);
                self.assign.borrow_mut().remove(&depth);
            }
            MatchEvent::Decision {
                pattern_node,
                candidate_count,
                heuristic_tag,
                depth,
            } => {
                self.decision.borrow_mut().insert(depth, pattern_node);
                println!(
                    "{:indent$}decision pattern_node={pattern_node} candidates={candidate_count} heuristic={heuristic_tag}",
                    "",
                    indent = self.indent()
                );
            }
            MatchEvent::Branch { host_node, depth } => {
                if let Some(p) = self.decision.borrow().get(&depth) {
                    self.assign.borrow_mut().insert(depth, (*p, host_node));
                }
                println!(
                    "{:indent$}branch host_node={host_node}",
                    "",
                    indent = self.indent()
                );
            }
            MatchEvent::Prune { reason, depth: _ } => {
                println!("{:indent$}prune: {reason}", "", indent = self.indent());
            }
            MatchEvent::Solution => {
                self.print_solution();
            }
        }
    }
}

/// A path `a -- b -- c`.
fn path() -> Graph {
    let mut g = Graph::empty();
    let a = g.add_vertex((0.0, 0.0), None);
    let b = g.add_vertex((1.0, 0.0), None);
    let c = g.add_vertex((2.0, 0.0), None);
    g.add_edge(a, b, EdgeAttrs::plain(false)).unwrap();
    g.add_edge(b, c, EdgeAttrs::plain(false)).unwrap();
    g
}

/// A triangle of unflagged vertices.
fn triangle() -> Graph {
    let mut g = Graph::empty();
    let v: Vec<_> = [(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)]
        .into_iter()
        .map(|p| g.add_vertex(p, Some(false)))
        .collect();
    for (u, w) in [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])] {
        g.add_edge(u, w, EdgeAttrs::plain(false)).unwrap();
    }
    g
}

fn main() {
    let pattern = path();
    let host = triangle();

    for mode in [MatchMode::Isomorphic, MatchMode::Monomorphic] {
        println!("== {mode:?} ==");
        let trace = PrintTrace::new();
        let count = host
            .find_occurrences(&pattern, mode, Some(&trace))
            .count();
        println!("{count} occurrence(s)\n");
    }
}
