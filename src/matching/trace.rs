use crate::hypergraph::NodeHandle;

/// Observer of the matcher's search tree.
///
/// The default implementation ignores every event.
pub trait MatchTrace {
    fn on_event(&self, _event: MatchEvent) {}
}

pub struct NoopTrace;

impl MatchTrace for NoopTrace {}

pub(crate) static NOOP_TRACE: NoopTrace = NoopTrace;

/// Forwards search events to `tracing` at `TRACE` level.
pub struct LogTrace;

impl MatchTrace for LogTrace {
    fn on_event(&self, event: MatchEvent) {
        match event {
            MatchEvent::EnterFrame { depth, frame_id } => {
                tracing::trace!(depth, frame_id, "enter frame")
            }
            MatchEvent::Decision {
                pattern_node,
                candidate_count,
                heuristic_tag,
                depth,
            } => tracing::trace!(
                depth,
                %pattern_node,
                candidate_count,
                heuristic = heuristic_tag,
                "decision"
            ),
            MatchEvent::Branch { host_node, depth } => {
                tracing::trace!(depth, %host_node, "branch")
            }
            MatchEvent::Prune { reason, depth } => tracing::trace!(depth, reason, "prune"),
            MatchEvent::Solution => tracing::trace!("solution"),
            MatchEvent::ExitFrame { depth, frame_id } => {
                tracing::trace!(depth, frame_id, "exit frame")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    EnterFrame {
        depth: usize,
        frame_id: usize,
    },
    /// The pattern node to be assigned at `depth` and how many host nodes are tried for it.
    Decision {
        pattern_node: NodeHandle,
        candidate_count: usize,
        heuristic_tag: &'static str,
        depth: usize,
    },
    /// A host node passed every check and was assigned.
    Branch {
        host_node: NodeHandle,
        depth: usize,
    },
    Prune {
        reason: &'static str,
        depth: usize,
    },
    Solution,
    ExitFrame {
        depth: usize,
        frame_id: usize,
    },
}
