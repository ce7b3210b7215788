use super::{MatchEvent, MatchMode, MatchOptions, MatchTrace, Occurrence};
use crate::hypergraph::{EdgeAttrs, Graph, NodeAttrs, NodeHandle};
use core::iter::FusedIterator;
use std::collections::BTreeSet;

/// Lazy enumeration of the occurrences of a pattern in a host graph.
///
/// This is a depth-first backtracking search that assigns one pattern node per level. A candidate
/// host node is accepted at a level only if it is unused (injectivity), node-compatible, has
/// enough incident edges, and agrees with every earlier assignment on adjacency: each pattern
/// edge must be present and edge-compatible, and in [`MatchMode::Isomorphic`] each pattern
/// non-edge must be a host non-edge too.
///
/// The search keeps an explicit stack of frames, so each call to `next` resumes where the previous
/// solution was found. Once exhausted the iterator keeps returning `None`.
pub struct Occurrences<'a, FN, FE> {
    host: &'a Graph,
    node_eq: FN,
    edge_eq: FE,
    mode: MatchMode,
    trace: &'a dyn MatchTrace,
    plan: Vec<Level<'a>>,
    frames: Vec<Frame>,
    assignment: Vec<NodeHandle>,
    used: BTreeSet<NodeHandle>,
    next_frame_id: usize,
    started: bool,
    done: bool,
}

/// Static information about one level of the search.
struct Level<'a> {
    pattern_node: NodeHandle,
    attrs: &'a NodeAttrs,
    degree: usize,
    /// An earlier level adjacent to this one; candidates are drawn from its image's neighbors.
    parent: Option<usize>,
    /// Pattern adjacency to every earlier level: `Some` for an edge, `None` for a non-edge.
    earlier: Vec<(usize, Option<&'a EdgeAttrs>)>,
}

struct Frame {
    id: usize,
    candidates: Vec<NodeHandle>,
    cursor: usize,
}

impl<'a, FN, FE> Occurrences<'a, FN, FE>
where
    FN: Fn(&NodeAttrs, &NodeAttrs) -> bool,
    FE: Fn(&EdgeAttrs, &EdgeAttrs) -> bool,
{
    pub(crate) fn new(
        host: &'a Graph,
        pattern: &'a Graph,
        options: MatchOptions,
        node_eq: FN,
        edge_eq: FE,
        trace: &'a dyn MatchTrace,
    ) -> Self {
        let plan = plan_levels(pattern);
        // More pattern nodes than host nodes can never be matched injectively.
        let done = plan.len() > host.node_count();
        Occurrences {
            host,
            node_eq,
            edge_eq,
            mode: options.mode,
            trace,
            plan,
            frames: Vec::new(),
            assignment: Vec::new(),
            used: BTreeSet::new(),
            next_frame_id: 0,
            started: false,
            done,
        }
    }

    fn push_frame(&mut self, depth: usize) {
        let level = &self.plan[depth];
        let candidates: Vec<NodeHandle> = match level.parent {
            Some(parent) => self
                .host
                .neighbors(self.assignment[parent])
                .map(|(h, _)| h)
                .collect(),
            None => self.host.nodes().map(|(h, _)| h).collect(),
        };
        let id = self.next_frame_id;
        self.next_frame_id += 1;
        self.trace.on_event(MatchEvent::EnterFrame {
            depth,
            frame_id: id,
        });
        self.trace.on_event(MatchEvent::Decision {
            pattern_node: level.pattern_node,
            candidate_count: candidates.len(),
            heuristic_tag: if level.parent.is_some() {
                "neighbors_of_parent"
            } else {
                "all_host_nodes"
            },
            depth,
        });
        self.frames.push(Frame {
            id,
            candidates,
            cursor: 0,
        });
    }

    fn pop_frame(&mut self) {
        if let Some(frame) = self.frames.pop() {
            self.trace.on_event(MatchEvent::ExitFrame {
                depth: self.frames.len(),
                frame_id: frame.id,
            });
        }
    }

    fn assign(&mut self, host_node: NodeHandle) {
        self.assignment.push(host_node);
        self.used.insert(host_node);
    }

    fn unassign_last(&mut self) {
        if let Some(host_node) = self.assignment.pop() {
            self.used.remove(&host_node);
        }
    }

    /// Advance the top frame to its next feasible candidate.
    fn next_candidate(&mut self) -> Option<NodeHandle> {
        let depth = self.frames.len() - 1;
        loop {
            let frame = &mut self.frames[depth];
            let candidate = *frame.candidates.get(frame.cursor)?;
            frame.cursor += 1;
            match self.reject_reason(depth, candidate) {
                None => {
                    self.trace.on_event(MatchEvent::Branch {
                        host_node: candidate,
                        depth,
                    });
                    return Some(candidate);
                }
                Some(reason) => self.trace.on_event(MatchEvent::Prune { reason, depth }),
            }
        }
    }

    /// Why `candidate` cannot be assigned at `depth`, or `None` if it can.
    fn reject_reason(&self, depth: usize, candidate: NodeHandle) -> Option<&'static str> {
        let level = &self.plan[depth];
        if self.used.contains(&candidate) {
            return Some("node_used");
        }
        let Ok(host_attrs) = self.host.node(candidate) else {
            return Some("node_missing");
        };
        if !(self.node_eq)(level.attrs, host_attrs) {
            return Some("label_mismatch");
        }
        // A pattern node cannot map to a host node with fewer incident edges, in either mode.
        if level.degree > self.host.degree(candidate) {
            return Some("degree_infeasible");
        }
        for (earlier, pattern_edge) in &level.earlier {
            let host_edge = self.host.edge_attrs(candidate, self.assignment[*earlier]);
            match (*pattern_edge, host_edge) {
                (Some(p), Some(h)) => {
                    if !(self.edge_eq)(p, h) {
                        return Some("edge_mismatch");
                    }
                }
                (Some(_), None) => return Some("edge_missing"),
                (None, Some(_)) if self.mode == MatchMode::Isomorphic => {
                    return Some("extra_edge");
                }
                (None, _) => {}
            }
        }
        None
    }

    fn current_occurrence(&self) -> Occurrence {
        Occurrence::from_pairs(
            self.plan
                .iter()
                .zip(self.assignment.iter())
                .map(|(level, host_node)| (level.pattern_node, *host_node)),
        )
    }
}

impl<FN, FE> Iterator for Occurrences<'_, FN, FE>
where
    FN: Fn(&NodeAttrs, &NodeAttrs) -> bool,
    FE: Fn(&EdgeAttrs, &EdgeAttrs) -> bool,
{
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            if self.plan.is_empty() {
                // The empty pattern occurs exactly once, everywhere.
                self.done = true;
                self.trace.on_event(MatchEvent::Solution);
                return Some(Occurrence::default());
            }
            self.push_frame(0);
        } else {
            // Resume below the previously reported solution.
            self.unassign_last();
        }

        while !self.frames.is_empty() {
            match self.next_candidate() {
                Some(host_node) => {
                    self.assign(host_node);
                    let depth = self.assignment.len();
                    if depth == self.plan.len() {
                        self.trace.on_event(MatchEvent::Solution);
                        return Some(self.current_occurrence());
                    }
                    self.push_frame(depth);
                }
                None => {
                    self.pop_frame();
                    self.unassign_last();
                }
            }
        }
        self.done = true;
        None
    }
}

impl<FN, FE> FusedIterator for Occurrences<'_, FN, FE>
where
    FN: Fn(&NodeAttrs, &NodeAttrs) -> bool,
    FE: Fn(&EdgeAttrs, &EdgeAttrs) -> bool,
{
}

/// Order the pattern nodes for the search and precompute per-level adjacency.
///
/// Hyperedge centers come first (they are rare in a mesh), then nodes are taken greedily by the
/// number of already ordered neighbors, so that most levels draw candidates from a neighbor list
/// and are checked against many earlier assignments. Ties go to higher degree, then lower handle.
fn plan_levels(pattern: &Graph) -> Vec<Level<'_>> {
    let mut remaining: Vec<(NodeHandle, &NodeAttrs)> = pattern.nodes().collect();
    let mut order: Vec<(NodeHandle, &NodeAttrs)> = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let best = remaining
            .iter()
            .enumerate()
            .max_by_key(|(_, (handle, attrs))| {
                let connected = order
                    .iter()
                    .filter(|(placed, _)| pattern.has_edge(*handle, *placed))
                    .count();
                (
                    connected,
                    attrs.kind.is_hyperedge_center(),
                    pattern.degree(*handle),
                    core::cmp::Reverse(*handle),
                )
            })
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        order.push(remaining.remove(best));
    }

    order
        .iter()
        .enumerate()
        .map(|(depth, (handle, attrs))| {
            let earlier: Vec<(usize, Option<&EdgeAttrs>)> = order[..depth]
                .iter()
                .enumerate()
                .map(|(j, (other, _))| (j, pattern.edge_attrs(*handle, *other)))
                .collect();
            let parent = earlier
                .iter()
                .find(|(_, edge)| edge.is_some())
                .map(|(j, _)| *j);
            Level {
                pattern_node: *handle,
                attrs: *attrs,
                degree: pattern.degree(*handle),
                parent,
                earlier,
            }
        })
        .collect()
}
