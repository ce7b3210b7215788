use super::cell::{cell_pattern, cycle_pairs, CellPatternSpec, CellRoles};
use super::Production;
use crate::error::GraphResult;
use crate::hypergraph::{EdgeAttrs, EdgeKind, Graph, NodeHandle, SplitOptions};
use crate::matching::Occurrence;

/// Refine a cell that is marked for refinement.
///
/// The left-hand side is a `Q` (quadrilateral) or `P` (pentagon) hyperedge flagged `true` whose
/// corners are joined in a cycle by plain boundary edges and are not flagged (an unset flag counts
/// as unflagged). Any subset of the sides may already have been split by a refined neighbor,
/// leaving a flagged hanging vertex on them; the production is configured with exactly which
/// sides do.
///
/// The rewrite
///
/// 1. splits every side without a hanging vertex (the new vertex hangs iff the side is interior),
/// 2. un-flags every hanging vertex of the cell,
/// 3. replaces the hyperedge center by an unflagged vertex joined to all side vertices,
/// 4. covers the cell with one unflagged `Q` hyperedge per corner: the corner, its two adjacent
///    side vertices and the new center.
#[derive(Debug, Clone)]
pub struct RefineCell {
    name: String,
    pattern: Graph,
    roles: CellRoles,
}

impl RefineCell {
    /// Refine a quadrilateral with no hanging vertices.
    pub fn quad() -> Self {
        Self::build(EdgeKind::Q, &[false; 4])
    }

    /// Refine a pentagon with no hanging vertices.
    pub fn pentagon() -> Self {
        Self::build(EdgeKind::P, &[false; 5])
    }

    /// Refine a `kind` cell where side `i` (from corner `i` to corner `i + 1`) carries a hanging
    /// vertex iff `hanging_sides[i]`.
    ///
    /// Fails if `kind` is not a hyperedge kind or the mask length differs from its arity.
    pub fn with_hanging_sides(kind: EdgeKind, hanging_sides: &[bool]) -> GraphResult<Self> {
        let (pattern, roles) = cell_pattern(&CellPatternSpec {
            kind,
            corner_flag: None,
            center_flag: true,
            hanging_sides,
            boundary: true,
        })?;
        let mask: String = hanging_sides
            .iter()
            .map(|h| if *h { 'h' } else { '-' })
            .collect();
        Ok(RefineCell {
            name: format!("refine-{}[{}]", kind, mask),
            pattern,
            roles,
        })
    }

    fn build(kind: EdgeKind, hanging_sides: &[bool]) -> Self {
        match Self::with_hanging_sides(kind, hanging_sides) {
            Ok(production) => production,
            Err(err) => unreachable!("fixed cell pattern is valid: {err}"),
        }
    }

    pub fn roles(&self) -> &CellRoles {
        &self.roles
    }

    fn check(&self, host: &Graph, occurrence: &Occurrence) -> GraphResult<bool> {
        let center = occurrence[self.roles.center];
        if host.node(center)?.flag != Some(true) {
            return Ok(false);
        }

        let corners: Vec<NodeHandle> = self.roles.corners.iter().map(|r| occurrence[*r]).collect();
        let mut members = host.hyperedge(center)?.members;
        let mut expected = corners.clone();
        members.sort();
        expected.sort();
        if members != expected {
            return Ok(false);
        }

        for corner in &corners {
            if host.node(*corner)?.is_flagged() {
                return Ok(false);
            }
        }

        for (side, (a, b)) in cycle_pairs(&corners).enumerate() {
            match self.roles.hanging[side] {
                Some(role) => {
                    let hanging = occurrence[role];
                    if !host.node(hanging)?.is_flagged() {
                        return Ok(false);
                    }
                    match host.node_between(a, b) {
                        Ok(between) if between == hanging => {}
                        _ => return Ok(false),
                    }
                }
                None => {
                    if host.edge(a, b)?.kind != EdgeKind::Plain {
                        return Ok(false);
                    }
                }
            }
        }
        Ok(true)
    }
}

impl Production for RefineCell {
    fn name(&self) -> &str {
        &self.name
    }

    fn pattern(&self) -> &Graph {
        &self.pattern
    }

    fn is_feasible(&self, host: &Graph, occurrence: &Occurrence) -> bool {
        self.check(host, occurrence).unwrap_or(false)
    }

    fn rewrite(&self, host: &mut Graph, occurrence: &Occurrence) -> GraphResult<()> {
        let corners: Vec<NodeHandle> = self.roles.corners.iter().map(|r| occurrence[*r]).collect();
        let center = occurrence[self.roles.center];
        let position = host.node(center)?.position;

        let mut sides = Vec::with_capacity(corners.len());
        for (side, (a, b)) in cycle_pairs(&corners).enumerate() {
            let vertex = match self.roles.hanging[side] {
                Some(role) => {
                    let hanging = occurrence[role];
                    host.set_node_flag(hanging, Some(false))?;
                    hanging
                }
                None => host.split_edge_with_vertex(a, b, SplitOptions::default())?,
            };
            sides.push(vertex);
        }

        host.remove_hyperedge(center, self.roles.kind)?;
        let middle = host.add_vertex(position, Some(false));
        for side in &sides {
            host.add_edge(*side, middle, EdgeAttrs::plain(false))?;
        }

        let n = corners.len();
        for (i, corner) in corners.iter().enumerate() {
            let before = sides[(i + n - 1) % n];
            let after = sides[i];
            host.add_hyperedge(
                &[*corner, before, after, middle],
                EdgeAttrs::new(EdgeKind::Q, false),
            )?;
        }
        Ok(())
    }
}
