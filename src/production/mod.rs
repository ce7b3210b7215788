//! Productions: rewrite rules over a host [`Graph`].
//!
//! A production is a pattern graph (its left-hand side), a feasibility predicate over occurrences
//! of that pattern, and a rewrite. Applying it searches the host for the first feasible
//! occurrence and rewrites there:
//!
//! ```text
//! SEARCHING --(no more occurrences)--> FAILED
//! SEARCHING --(occurrence)--> FEASIBILITY --(reject)--> SEARCHING
//!                                         --(accept)--> REWRITE --> SUCCEEDED
//! ```
//!
//! The search borrows the host immutably and ends before the rewrite borrows it mutably, so a
//! rewrite never runs while occurrences are being enumerated, and a failed application leaves the
//! host untouched.
pub mod cell;
pub mod mark;
pub mod propagate;
pub mod refine;

pub use mark::MarkCell;
pub use propagate::PropagateMark;
pub use refine::RefineCell;

use crate::error::GraphResult;
use crate::hypergraph::Graph;
use crate::matching::{LogTrace, MatchMode, Occurrence};

pub trait Production {
    /// Human-readable rule name, used in logs and errors.
    fn name(&self) -> &str;

    /// The left-hand side. Built once when the production is constructed.
    fn pattern(&self) -> &Graph;

    /// Isomorphic unless the pattern deliberately leaves out adjacency that may exist in the
    /// host.
    fn match_mode(&self) -> MatchMode {
        MatchMode::Isomorphic
    }

    /// Semantic guard on top of the structural match. Must not mutate anything.
    fn is_feasible(&self, _host: &Graph, _occurrence: &Occurrence) -> bool {
        true
    }

    /// Rewrite the host at `occurrence`.
    ///
    /// Only called after [`Production::is_feasible`] accepted the same occurrence. Must leave
    /// the host consistent: no half-built hyperedges, no dangling spokes.
    fn rewrite(&self, host: &mut Graph, occurrence: &Occurrence) -> GraphResult<()>;

    /// The first occurrence of the pattern in `host` that passes the feasibility check.
    fn find_feasible(&self, host: &Graph) -> Option<Occurrence> {
        host.find_occurrences(self.pattern(), self.match_mode(), Some(&LogTrace))
            .find(|occurrence| {
                let feasible = self.is_feasible(host, occurrence);
                if !feasible {
                    tracing::debug!(production = self.name(), ?occurrence, "infeasible occurrence");
                }
                feasible
            })
    }

    /// Apply the production once.
    ///
    /// Returns `Ok(false)` if no feasible occurrence exists, in which case `host` is unchanged.
    /// An `Err` means the rewrite hit a violated precondition.
    fn apply(&self, host: &mut Graph) -> GraphResult<bool> {
        let Some(occurrence) = self.find_feasible(host) else {
            tracing::debug!(production = self.name(), "no feasible occurrence");
            return Ok(false);
        };
        self.rewrite(host, &occurrence)?;
        tracing::info!(
            production = self.name(),
            nodes = host.node_count(),
            edges = host.edge_count(),
            "applied production"
        );
        Ok(true)
    }
}
