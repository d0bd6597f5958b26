//! Initial placement of containers
//!
//! The engine never decides where a container starts: an oracle hands out
//! one anchor (the container center) per sort, optionally with a size.
//! [`FixedOracle`] serves explicit records; [`RowOracle`] lines sorts up
//! left to right with the kasuari constraint solver, far enough apart that
//! the collision validator accepts every neighbour.

use std::collections::HashMap;

use kasuari::{Expression, Solver, Strength, Variable, WeightedRelation::*};
use log::debug;
use thiserror::Error;

use super::types::{Point, Size};

/// Placement record for one sort
#[derive(Debug, Clone, PartialEq)]
pub struct OracleNode {
    pub name: String,
    /// Center of the container
    pub anchor: Point,
    /// Explicit container size; inferred from the process count when absent
    pub size: Option<Size>,
}

impl OracleNode {
    pub fn new(name: impl Into<String>, anchor: Point) -> Self {
        Self {
            name: name.into(),
            anchor,
            size: None,
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }
}

/// Source of initial container placements
pub trait LayoutOracle {
    /// Placement for the sort named `sort_name`, if the oracle knows it
    fn node(&self, sort_name: &str) -> Option<OracleNode>;
}

/// Oracle answering from a fixed table of records
#[derive(Debug, Clone, Default)]
pub struct FixedOracle {
    nodes: HashMap<String, OracleNode>,
}

impl FixedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the record for `node.name`
    pub fn insert(&mut self, node: OracleNode) {
        self.nodes.insert(node.name.clone(), node);
    }

    pub fn with_node(mut self, node: OracleNode) -> Self {
        self.insert(node);
        self
    }

    /// Copy every record of `other` into this oracle
    pub fn extend(&mut self, other: impl IntoIterator<Item = OracleNode>) {
        for node in other {
            self.insert(node);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl LayoutOracle for FixedOracle {
    fn node(&self, sort_name: &str) -> Option<OracleNode> {
        self.nodes.get(sort_name).cloned()
    }
}

/// Errors from the row placement solver
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("cannot place '{name}': {reason}")]
    Unsatisfiable { name: String, reason: String },
}

/// Oracle placing sorts in one row, top edges aligned on an origin
#[derive(Debug, Clone)]
pub struct RowOracle {
    nodes: Vec<OracleNode>,
}

impl RowOracle {
    /// Solve the row for `(name, size)` items, in order
    ///
    /// Consecutive centers are kept at least `max(w_i, w_i+1) + gap` apart,
    /// while a weak pull towards the origin keeps the row compact.
    pub fn place(items: &[(String, Size)], origin: Point, gap: f64) -> Result<Self, OracleError> {
        let mut solver = Solver::new();
        let vars: Vec<Variable> = items.iter().map(|_| Variable::new()).collect();

        let unsatisfiable = |name: &str, e: kasuari::AddConstraintError| OracleError::Unsatisfiable {
            name: name.to_string(),
            reason: format!("{:?}", e),
        };

        if let (Some(&first), Some((name, size))) = (vars.first(), items.first()) {
            solver
                .add_constraint(
                    Expression::from(first) | EQ(Strength::REQUIRED) | origin.x + size.width / 2.0,
                )
                .map_err(|e| unsatisfiable(name, e))?;
        }

        for i in 1..items.len() {
            let (name, size) = &items[i];
            let min_distance = items[i - 1].1.width.max(size.width) + gap;
            solver
                .add_constraint(vars[i] - vars[i - 1] | GE(Strength::REQUIRED) | min_distance)
                .map_err(|e| unsatisfiable(name, e))?;
            solver
                .add_constraint(Expression::from(vars[i]) | EQ(Strength::WEAK) | origin.x)
                .map_err(|e| unsatisfiable(name, e))?;
        }

        // Variables the solver left at zero are not reported as changes.
        let changes = solver.fetch_changes();
        let value_of = |var: Variable| {
            changes
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| *v)
                .unwrap_or(0.0)
        };

        let nodes = items
            .iter()
            .zip(&vars)
            .map(|((name, size), &var)| {
                let anchor = Point::new(value_of(var), origin.y + size.height / 2.0);
                debug!(sort = name.as_str(), x = anchor.x, y = anchor.y; "row oracle placed sort");
                OracleNode::new(name.clone(), anchor).with_size(*size)
            })
            .collect();

        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[OracleNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<OracleNode> {
        self.nodes
    }
}

impl LayoutOracle for RowOracle {
    fn node(&self, sort_name: &str) -> Option<OracleNode> {
        self.nodes.iter().find(|n| n.name == sort_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_fixed_oracle_lookup() {
        let oracle = FixedOracle::new()
            .with_node(OracleNode::new("a", Point::new(1.0, 2.0)))
            .with_node(OracleNode::new("b", Point::new(3.0, 4.0)).with_size(Size::new(5.0, 6.0)));

        assert_eq!(oracle.len(), 2);
        assert_eq!(oracle.node("a").map(|n| n.anchor), Some(Point::new(1.0, 2.0)));
        assert_eq!(oracle.node("b").and_then(|n| n.size), Some(Size::new(5.0, 6.0)));
        assert!(oracle.node("c").is_none());
    }

    #[test]
    fn test_row_oracle_spacing() {
        let items = vec![
            ("a".to_string(), Size::new(60.0, 120.0)),
            ("b".to_string(), Size::new(100.0, 60.0)),
            ("c".to_string(), Size::new(60.0, 60.0)),
        ];
        let oracle = RowOracle::place(&items, Point::new(0.0, 0.0), 15.0).expect("should solve");
        let nodes = oracle.nodes();

        assert!(approx(nodes[0].anchor.x, 30.0));
        assert!(approx(nodes[1].anchor.x, 30.0 + 115.0));
        assert!(approx(nodes[2].anchor.x, 30.0 + 115.0 + 115.0));
        assert!(approx(nodes[0].anchor.y, 60.0));
        assert!(approx(nodes[1].anchor.y, 30.0));
        assert_eq!(nodes[1].size, Some(Size::new(100.0, 60.0)));
    }

    #[test]
    fn test_row_oracle_empty() {
        let oracle = RowOracle::place(&[], Point::origin(), 15.0).expect("should solve");
        assert!(oracle.nodes().is_empty());
        assert!(oracle.node("anything").is_none());
    }
}
