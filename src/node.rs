//! Circular nodes (the states of a diagram).

use std::fmt;

use crate::edge::EdgeId;
use crate::types::{Circle, Point};

/// Stable handle to a node in a [`crate::Diagram`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A node and the edges incident to it, in creation order.
///
/// A self-loop is listed in both `out_edges` and `in_edges`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    circle: Circle,
    out_edges: Vec<EdgeId>,
    in_edges: Vec<EdgeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, circle: Circle) -> Self {
        Node {
            id,
            circle,
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn circle(&self) -> &Circle {
        &self.circle
    }

    pub fn center(&self) -> Point {
        self.circle.center
    }

    pub fn radius(&self) -> f64 {
        self.circle.radius
    }

    pub fn contains(&self, p: Point) -> bool {
        self.circle.contains(p)
    }

    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }

    pub fn in_edges(&self) -> &[EdgeId] {
        &self.in_edges
    }

    /// Every incident edge once, outgoing first
    pub fn incident_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.out_edges.iter().copied().chain(
            self.in_edges
                .iter()
                .copied()
                .filter(|id| !self.out_edges.contains(id)),
        )
    }

    pub(crate) fn set_center(&mut self, center: Point) {
        self.circle.center = center;
    }

    pub(crate) fn push_out_edge(&mut self, edge: EdgeId) {
        self.out_edges.push(edge);
    }

    pub(crate) fn push_in_edge(&mut self, edge: EdgeId) {
        self.in_edges.push(edge);
    }
}
