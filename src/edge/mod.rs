//! Directed edges between nodes.
//!
//! An [`Edge`] pairs its endpoint node ids and label with an [`EdgeShape`],
//! the closed set of curve geometries: [`PlainEdge`] for two distinct nodes
//! and [`SelfLoopEdge`] for a node connected to itself. Both implement
//! [`EdgeGeometry`]; calls are dispatched over the enum with `enum_dispatch`.
//!
//! Edges never hold references to their nodes. Every operation that needs a
//! node's position takes the node's [`Circle`] from the caller.

mod plain;
mod self_loop;

use std::fmt;

use enum_dispatch::enum_dispatch;

pub use plain::PlainEdge;
pub use self_loop::SelfLoopEdge;

use crate::curve::Curve;
use crate::geometry::Arrowhead;
use crate::label::EdgeLabel;
use crate::node::NodeId;
use crate::render::{Font, TextMetrics};
use crate::types::{Circle, Point};

/// Stable handle to an edge in a [`crate::Diagram`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Derived geometry shared by both edge shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePath {
    pub control: Point,
    /// Where the curve leaves the source rim
    pub start: Point,
    /// Where the curve meets the destination rim; also the arrow tip
    pub end: Point,
    pub arrowhead: Arrowhead,
}

impl EdgePath {
    /// A path whose endpoints have not been computed yet
    fn unresolved(control: Point) -> Self {
        EdgePath {
            control,
            start: control,
            end: control,
            arrowhead: Arrowhead {
                tip: control,
                corner1: control,
                corner2: control,
            },
        }
    }

    /// The visible rim-to-rim curve
    pub fn curve(&self) -> Curve {
        Curve::new(self.start, self.control, self.end)
    }

    /// The draggable curvature handle (visible curve at t = 0.5)
    pub fn vertex(&self) -> Point {
        self.curve().vertex()
    }

    fn set_endpoints(&mut self, start: Point, end: Point) {
        self.start = start;
        self.end = end;
        self.arrowhead = Arrowhead::for_curve(&self.curve());
    }
}

/// Operations every edge shape provides.
///
/// `source` and `destination` are the current circles of the edge's nodes.
/// A self-loop receives the same circle twice.
#[enum_dispatch]
pub trait EdgeGeometry {
    fn path(&self) -> &EdgePath;

    /// Recompute the rim endpoints and arrowhead from the current control point
    fn recompute_endpoints(&mut self, source: &Circle, destination: &Circle);

    /// Re-derive the control point after a node moved, then the endpoints
    fn on_endpoint_moved(&mut self, source: &Circle, destination: &Circle);

    /// Move the curvature handle toward `target`
    fn drag_vertex(&mut self, target: Point, source: &Circle, destination: &Circle);
}

/// The closed set of edge geometries
#[enum_dispatch(EdgeGeometry)]
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeShape {
    Plain(PlainEdge),
    SelfLoop(SelfLoopEdge),
}

/// A directed edge with its label
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    destination: NodeId,
    shape: EdgeShape,
    label: EdgeLabel,
}

impl Edge {
    /// Build an edge and place its (empty) label.
    pub(crate) fn new(
        id: EdgeId,
        source: NodeId,
        destination: NodeId,
        shape: EdgeShape,
        source_circle: &Circle,
        destination_circle: &Circle,
    ) -> Self {
        let mut edge = Edge {
            id,
            source,
            destination,
            shape,
            label: EdgeLabel::new(),
        };
        edge.reposition_label(source_circle, destination_circle);
        edge
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.destination
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.destination == node
    }

    pub fn shape(&self) -> &EdgeShape {
        &self.shape
    }

    pub fn path(&self) -> &EdgePath {
        self.shape.path()
    }

    pub fn curve(&self) -> Curve {
        self.path().curve()
    }

    pub fn vertex(&self) -> Point {
        self.path().vertex()
    }

    pub fn label(&self) -> &EdgeLabel {
        &self.label
    }

    /// Is `p` on the vertex handle?
    pub fn vertex_contains(&self, p: Point, handle_radius: f64) -> bool {
        self.vertex().is_within(p, handle_radius)
    }

    /// Is `p` on the visible curve?
    pub fn body_contains(&self, p: Point) -> bool {
        self.curve().contains(p)
    }

    pub fn label_contains(&self, p: Point) -> bool {
        self.label.contains(p)
    }

    pub(crate) fn endpoint_moved(&mut self, source: &Circle, destination: &Circle) {
        self.shape.on_endpoint_moved(source, destination);
        self.reposition_label(source, destination);
    }

    pub(crate) fn drag_vertex(&mut self, target: Point, source: &Circle, destination: &Circle) {
        self.shape.drag_vertex(target, source, destination);
        self.reposition_label(source, destination);
    }

    /// Returns false when the label stayed where it was
    pub(crate) fn slide_label(&mut self, drag: Point, source: &Circle, destination: &Circle) -> bool {
        let curve = self.curve();
        self.label.slide_to(drag, &curve, source.center, destination.center)
    }

    pub(crate) fn set_label_text(
        &mut self,
        text: impl Into<String>,
        metrics: &dyn TextMetrics,
        font: &Font,
        source: &Circle,
        destination: &Circle,
    ) {
        self.label.set_text(text, metrics, font);
        self.reposition_label(source, destination);
    }

    fn reposition_label(&mut self, source: &Circle, destination: &Circle) {
        let curve = self.curve();
        self.label.reposition(&curve, source.center, destination.center);
    }
}
