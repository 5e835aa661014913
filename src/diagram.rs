//! The node/edge collection: hit testing, z-order and layered drawing.

use crate::defaults;
use crate::edge::{Edge, EdgeId, EdgePath, EdgeShape, PlainEdge, SelfLoopEdge};
use crate::errors::{DiagramError, DiagramResult};
use crate::label::EdgeLabel;
use crate::log::debug;
use crate::node::{Node, NodeId};
use crate::render::{Color, Font, Style, Surface, TextMetrics};
use crate::types::{BBox, Circle, Offset, Point, positive};

/// What a pointer position landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The curvature handle of an edge
    EdgeVertex(EdgeId),
    /// The curve of an edge, away from its handle
    EdgeBody(EdgeId),
    Label(EdgeId),
    Node(NodeId),
}

/// A single drawable element, used to split drawing into layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Node(NodeId),
    Edge(EdgeId),
    Label(EdgeId),
}

impl From<Hit> for Element {
    fn from(hit: Hit) -> Self {
        match hit {
            Hit::EdgeVertex(id) | Hit::EdgeBody(id) => Element::Edge(id),
            Hit::Label(id) => Element::Label(id),
            Hit::Node(id) => Element::Node(id),
        }
    }
}

/// A directed graph drawn as circles and curved arrows.
///
/// Nodes and edges live in arenas indexed by their ids; nothing is ever
/// removed. `z_order` lists nodes bottom to top.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    z_order: Vec<NodeId>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node on top of the z-order
    pub fn add_node(&mut self, center: Point, radius: f64) -> DiagramResult<NodeId> {
        let center = Point::try_new(center.x, center.y).map_err(|_| {
            DiagramError::InvalidPosition {
                x: center.x,
                y: center.y,
            }
        })?;
        let radius = positive(radius).map_err(|source| DiagramError::InvalidRadius {
            value: radius,
            source,
        })?;

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, Circle::new(center, radius)));
        self.z_order.push(id);
        debug!(%id, %center, radius, "node added");
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> DiagramResult<&Node> {
        self.nodes.get(id.0).ok_or(DiagramError::UnknownNode { id })
    }

    pub fn edge(&self, id: EdgeId) -> DiagramResult<&Edge> {
        self.edges.get(id.0).ok_or(DiagramError::UnknownEdge { id })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes bottom to top
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.z_order.iter().map(|id| &self.nodes[id.0])
    }

    /// Every edge, reached through its source node's out-edges in z-order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.nodes()
            .flat_map(|node| node.out_edges().iter().map(|id| &self.edges[id.0]))
    }

    /// Move a node and rebuild every edge touching it
    pub fn set_node_center(&mut self, id: NodeId, center: Point) -> DiagramResult<()> {
        let center = Point::try_new(center.x, center.y).map_err(|_| {
            DiagramError::InvalidPosition {
                x: center.x,
                y: center.y,
            }
        })?;
        self.node(id)?;
        self.nodes[id.0].set_center(center);

        let incident: Vec<EdgeId> = self.nodes[id.0].incident_edges().collect();
        for edge_id in incident {
            let (source, destination) = self.circles(&self.edges[edge_id.0]);
            self.edges[edge_id.0].endpoint_moved(&source, &destination);
        }
        Ok(())
    }

    pub fn translate_node(&mut self, id: NodeId, delta: Offset) -> DiagramResult<()> {
        let center = self.node(id)?.center();
        self.set_node_center(id, center + delta)
    }

    /// Connect `from` to `to` with a default-shaped edge. Connecting a node to
    /// itself makes a self-loop.
    pub fn make_outgoing_edge(&mut self, from: NodeId, to: NodeId) -> DiagramResult<EdgeId> {
        let source = *self.node(from)?.circle();
        let destination = *self.node(to)?.circle();
        let shape: EdgeShape = if from == to {
            SelfLoopEdge::new(&source).into()
        } else {
            PlainEdge::new(&source, &destination).into()
        };
        Ok(self.insert_edge(from, to, shape))
    }

    /// Add a self-loop on `node` with its control point at `control`
    pub fn make_self_loop_with_control(
        &mut self,
        node: NodeId,
        control: Point,
    ) -> DiagramResult<EdgeId> {
        let circle = *self.node(node)?.circle();
        let shape = SelfLoopEdge::with_control(&circle, control).into();
        Ok(self.insert_edge(node, node, shape))
    }

    fn insert_edge(&mut self, from: NodeId, to: NodeId, shape: EdgeShape) -> EdgeId {
        let id = EdgeId(self.edges.len());
        let source = *self.nodes[from.0].circle();
        let destination = *self.nodes[to.0].circle();
        self.edges
            .push(Edge::new(id, from, to, shape, &source, &destination));
        self.nodes[from.0].push_out_edge(id);
        self.nodes[to.0].push_in_edge(id);
        debug!(%id, %from, %to, "edge added");
        id
    }

    pub fn drag_vertex(&mut self, id: EdgeId, target: Point) -> DiagramResult<()> {
        let (source, destination) = self.circles(self.edge(id)?);
        self.edges[id.0].drag_vertex(target, &source, &destination);
        Ok(())
    }

    /// Slide an edge's label toward `drag`. Returns false if it did not move.
    pub fn slide_label(&mut self, id: EdgeId, drag: Point) -> DiagramResult<bool> {
        let (source, destination) = self.circles(self.edge(id)?);
        Ok(self.edges[id.0].slide_label(drag, &source, &destination))
    }

    pub fn set_label_text(
        &mut self,
        id: EdgeId,
        text: impl Into<String>,
        metrics: &dyn TextMetrics,
        font: &Font,
    ) -> DiagramResult<()> {
        let (source, destination) = self.circles(self.edge(id)?);
        self.edges[id.0].set_label_text(text, metrics, font, &source, &destination);
        Ok(())
    }

    /// Find what is under `p`, topmost node first.
    ///
    /// For each node its outgoing edges are checked (vertex handle, then
    /// curve, then label) before the node itself. A node hit is raised to the
    /// top of the z-order.
    pub fn hit_test(&mut self, p: Point) -> Option<Hit> {
        let hit = self.z_order.iter().rev().find_map(|&id| {
            let node = &self.nodes[id.0];
            node.out_edges()
                .iter()
                .find_map(|&edge_id| {
                    let edge = &self.edges[edge_id.0];
                    if edge.vertex_contains(p, defaults::VERTEX_HIT_RADIUS) {
                        Some(Hit::EdgeVertex(edge_id))
                    } else if edge.body_contains(p) {
                        Some(Hit::EdgeBody(edge_id))
                    } else if edge.label_contains(p) {
                        Some(Hit::Label(edge_id))
                    } else {
                        None
                    }
                })
                .or_else(|| node.contains(p).then_some(Hit::Node(id)))
        })?;

        if let Hit::Node(id) = hit {
            self.raise(id);
        }
        Some(hit)
    }

    /// The topmost node containing `p`, without touching the z-order
    pub fn node_at(&self, p: Point) -> Option<NodeId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| self.nodes[id.0].contains(p))
    }

    pub fn bring_to_front(&mut self, id: NodeId) -> DiagramResult<()> {
        self.node(id)?;
        self.raise(id);
        Ok(())
    }

    fn raise(&mut self, id: NodeId) {
        if let Some(pos) = self.z_order.iter().position(|&n| n == id) {
            self.z_order.remove(pos);
            self.z_order.push(id);
        }
    }

    fn circles(&self, edge: &Edge) -> (Circle, Circle) {
        (
            *self.nodes[edge.source().0].circle(),
            *self.nodes[edge.destination().0].circle(),
        )
    }

    /// Paint the static layer: every node, then every edge, leaving out
    /// `except` (a node also takes its edges with it).
    pub fn draw_static<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        style: &Style,
        except: Option<Element>,
    ) {
        surface.clear();
        for node in self.nodes() {
            if except != Some(Element::Node(node.id())) {
                draw_node(surface, node.circle(), &style.stroke, style);
            }
        }

        for edge in self.edges() {
            let skipped = match except {
                Some(Element::Node(id)) => edge.touches(id),
                Some(Element::Edge(id)) => edge.id() == id,
                _ => false,
            };
            if skipped {
                continue;
            }
            let label = (except != Some(Element::Label(edge.id()))).then(|| edge.label());
            draw_edge(surface, edge.path(), label, &style.stroke, style, false);
        }
    }

    /// Paint the dynamic layer: only `element`, in the selected colour
    pub fn draw_dynamic<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        style: &Style,
        element: Element,
    ) -> DiagramResult<()> {
        surface.clear();
        let color = &style.selected;
        match element {
            Element::Node(id) => {
                let node = self.node(id)?;
                draw_node(surface, node.circle(), color, style);
                for edge_id in node.incident_edges() {
                    let edge = &self.edges[edge_id.0];
                    draw_edge(surface, edge.path(), Some(edge.label()), color, style, false);
                }
            }
            Element::Edge(id) => {
                let edge = self.edge(id)?;
                draw_edge(surface, edge.path(), Some(edge.label()), color, style, true);
            }
            Element::Label(id) => {
                draw_label(surface, self.edge(id)?.label(), color, style);
            }
        }
        Ok(())
    }

    /// Static layer with nothing held back
    pub fn draw_all<S: Surface + ?Sized>(&self, surface: &mut S, style: &Style) {
        self.draw_static(surface, style, None);
    }

    /// Extent of everything drawn: nodes, edge curves and arrowheads, and
    /// non-empty labels.
    pub fn bounds(&self) -> BBox {
        let mut bounds = BBox::new();
        for node in &self.nodes {
            bounds.expand_circle(node.circle());
        }
        for edge in &self.edges {
            let curve = edge.curve();
            for i in 0..=BOUNDS_SAMPLES {
                bounds.expand_point(curve.evaluate(i as f64 / BOUNDS_SAMPLES as f64));
            }
            let head = edge.path().arrowhead;
            bounds.expand_point(head.corner1);
            bounds.expand_point(head.corner2);

            let label = edge.label();
            if !label.text().is_empty() {
                let b = label.bounds();
                bounds.expand_point(b.min);
                bounds.expand_point(b.max);
            }
        }
        bounds
    }
}

const BOUNDS_SAMPLES: u32 = 16;

fn draw_node<S: Surface + ?Sized>(surface: &mut S, circle: &Circle, color: &Color, style: &Style) {
    surface.draw_circle(circle.center, circle.radius, color, Some(&style.node_fill));
}

/// Paint an edge's curve, arrowhead, optional label and optional vertex handle
pub(crate) fn draw_edge<S: Surface + ?Sized>(
    surface: &mut S,
    path: &EdgePath,
    label: Option<&EdgeLabel>,
    color: &Color,
    style: &Style,
    with_vertex: bool,
) {
    surface.draw_quadratic_curve(path.start, path.control, path.end, color);
    let head = path.arrowhead;
    surface.draw_line(head.tip, head.corner1, color);
    surface.draw_line(head.tip, head.corner2, color);
    if with_vertex {
        surface.draw_circle(path.vertex(), style.vertex_radius, color, None);
    }
    if let Some(label) = label {
        draw_label(surface, label, color, style);
    }
}

fn draw_label<S: Surface + ?Sized>(surface: &mut S, label: &EdgeLabel, color: &Color, style: &Style) {
    if !label.text().is_empty() {
        surface.draw_text(label.text(), label.origin(), &style.font, color);
    }
}
