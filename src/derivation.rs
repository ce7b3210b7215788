//! Running a fixed sequence of productions and manual marks against a graph.
use crate::error::GraphError;
use crate::hypergraph::{Graph, NodeHandle};
use crate::production::Production;
use thiserror::Error;

/// One step of a [`Derivation`].
pub enum Step {
    /// Apply a production once; it must find a feasible occurrence.
    Apply(Box<dyn Production>),
    /// Flag the hyperedge centered at the given node for refinement.
    Mark(NodeHandle),
}

impl Step {
    pub fn describe(&self) -> String {
        match self {
            Step::Apply(production) => production.name().to_string(),
            Step::Mark(center) => format!("mark {}", center),
        }
    }
}

impl core::fmt::Debug for Step {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Step::Apply(production) => f.debug_tuple("Apply").field(&production.name()).finish(),
            Step::Mark(center) => f.debug_tuple("Mark").field(center).finish(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DerivationError {
    #[error("step {step}: production `{name}` has no feasible occurrence")]
    ProductionFailed { step: usize, name: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// An ordered list of [`Step`]s.
///
/// ```
/// use mesh_grammar::prelude::*;
///
/// let mut cell = builders::square(false).unwrap();
/// let steps = Derivation::new()
///     .mark(cell.center)
///     .apply(RefineCell::quad());
/// assert_eq!(steps.run(&mut cell.graph), Ok(2));
/// assert_eq!(cell.graph.hyperedges().count(), 4);
/// ```
#[derive(Debug, Default)]
pub struct Derivation {
    steps: Vec<Step>,
}

impl Derivation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(mut self, production: impl Production + 'static) -> Self {
        self.steps.push(Step::Apply(Box::new(production)));
        self
    }

    pub fn mark(mut self, center: NodeHandle) -> Self {
        self.steps.push(Step::Mark(center));
        self
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Execute every step in order.
    ///
    /// Stops at the first production that does not apply. Steps executed before the failure
    /// stay applied. Returns the number of steps executed.
    pub fn run(&self, graph: &mut Graph) -> Result<usize, DerivationError> {
        for (step, item) in self.steps.iter().enumerate() {
            let _span = tracing::debug_span!("step", step, what = %item.describe()).entered();
            match item {
                Step::Apply(production) => {
                    if !production.apply(graph)? {
                        tracing::warn!(step, production = production.name(), "derivation stuck");
                        return Err(DerivationError::ProductionFailed {
                            step,
                            name: production.name().to_string(),
                        });
                    }
                }
                Step::Mark(center) => graph.update_hyperedge_flag(*center, true)?,
            }
        }
        tracing::info!(steps = self.steps.len(), "derivation finished");
        Ok(self.steps.len())
    }
}

impl FromIterator<Step> for Derivation {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Derivation {
            steps: iter.into_iter().collect(),
        }
    }
}
