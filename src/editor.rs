//! Pointer-driven editing.
//!
//! The [`Editor`] turns a stream of pointer events into diagram mutations and
//! keeps two drawing layers current:
//!
//! ```text
//! Idle -> (down on a target) -> Dragging(target) -> (up) -> Idle
//! ```
//!
//! While dragging, the static layer holds everything except the dragged
//! element, and the dynamic layer is repainted with just that element on
//! every move.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::defaults;
use crate::diagram::{Diagram, Element, Hit, draw_edge};
use crate::edge::{EdgeGeometry, EdgeId, EdgeShape, PlainEdge, SelfLoopEdge};
use crate::errors::DiagramResult;
use crate::log::debug;
use crate::node::NodeId;
use crate::render::{ProportionalMetrics, Style, Surface, TextMetrics};
use crate::types::{Circle, Offset, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// One pointer event, in the same coordinates as the drawing surfaces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        PointerEvent {
            kind,
            position: Point::new(x, y),
        }
    }
}

/// What dragging a node does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Drag nodes around
    #[default]
    Move,
    /// Drag from a node to another (or back onto itself) to add an edge
    Connect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Idle,
    Dragging(Hit),
}

/// Result of handling one pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Nothing changed
    Ignored,
    /// A drag started on this target
    Selected(Hit),
    /// The dragged element changed
    Updated,
    /// A connect drag ended on a node and added this edge
    EdgeCreated(EdgeId),
    /// A drag ended
    Released,
}

/// The edge a connect drag would create if released now
#[derive(Debug, Clone)]
struct ConnectPreview {
    shape: EdgeShape,
    target: Option<NodeId>,
}

/// Places newly spawned nodes on a ring around an anchor.
///
/// Successive positions step a quarter turn; after four they shift by an
/// eighth of a turn, so eight spawns fill the ring before it repeats.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRing {
    anchor: Point,
    distance: f64,
    angle: f64,
}

impl SpawnRing {
    const FIRST_ANGLE: f64 = -FRAC_PI_2;

    pub fn new(anchor: Point, distance: f64) -> Self {
        SpawnRing {
            anchor,
            distance,
            angle: Self::FIRST_ANGLE,
        }
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// The next spawn position
    pub fn next_position(&mut self) -> Point {
        let step = Offset::new(self.angle.cos(), self.angle.sin()) * self.distance;
        let position = self.anchor.translate(step);

        self.angle += FRAC_PI_2;
        if (self.angle - 3.0 * FRAC_PI_2).abs() < 0.01 {
            self.angle = -FRAC_PI_4;
        } else if (self.angle - 7.0 * FRAC_PI_4).abs() < 0.01 {
            self.angle = Self::FIRST_ANGLE;
        }
        position
    }
}

/// Editor settings
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub node_radius: f64,
    pub style: Style,
    /// Centre of the ring new nodes are spawned on
    pub spawn_anchor: Point,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            node_radius: defaults::NODE_RADIUS,
            style: Style::default(),
            spawn_anchor: Point::new(400.0, 300.0),
        }
    }
}

impl EditorConfig {
    pub fn with_node_radius(mut self, radius: f64) -> Self {
        self.node_radius = radius;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_spawn_anchor(mut self, anchor: Point) -> Self {
        self.spawn_anchor = anchor;
        self
    }
}

/// Interactive editing session over a [`Diagram`]
pub struct Editor {
    diagram: Diagram,
    config: EditorConfig,
    tool: Tool,
    state: DragState,
    preview: Option<ConnectPreview>,
    spawn: SpawnRing,
    metrics: Box<dyn TextMetrics>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_diagram(Diagram::new(), config)
    }

    pub fn with_diagram(diagram: Diagram, config: EditorConfig) -> Self {
        let spawn = SpawnRing::new(
            config.spawn_anchor,
            defaults::SPAWN_RING_FACTOR * config.node_radius,
        );
        Editor {
            diagram,
            config,
            tool: Tool::default(),
            state: DragState::Idle,
            preview: None,
            spawn,
            metrics: Box::new(ProportionalMetrics),
        }
    }

    /// Measure label text with `metrics` instead of the built-in table
    pub fn with_metrics(mut self, metrics: impl TextMetrics + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn diagram_mut(&mut self) -> &mut Diagram {
        &mut self.diagram
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.preview = None;
    }

    /// The target of the drag in progress, if any
    pub fn dragging(&self) -> Option<Hit> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging(hit) => Some(hit),
        }
    }

    /// Add a node at the next position on the spawn ring
    pub fn spawn_node(&mut self) -> DiagramResult<NodeId> {
        let position = self.spawn.next_position();
        self.diagram.add_node(position, self.config.node_radius)
    }

    /// Replace a label's text, measured with the editor's metrics and font
    pub fn set_label_text(&mut self, edge: EdgeId, text: impl Into<String>) -> DiagramResult<()> {
        self.diagram
            .set_label_text(edge, text, self.metrics.as_ref(), &self.config.style.font)
    }

    /// Repaint the whole diagram on one surface
    pub fn redraw<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.diagram.draw_all(surface, &self.config.style);
    }

    /// Handle one pointer event, updating both layers as needed.
    ///
    /// # Arguments
    /// * `event` - The pointer event
    /// * `static_layer` - Surface holding everything not being dragged
    /// * `dynamic_layer` - Surface holding the dragged element
    pub fn handle<A, B>(
        &mut self,
        event: PointerEvent,
        static_layer: &mut A,
        dynamic_layer: &mut B,
    ) -> DiagramResult<Response>
    where
        A: Surface + ?Sized,
        B: Surface + ?Sized,
    {
        let p = event.position;
        match (event.kind, self.state) {
            (PointerKind::Down, DragState::Idle) => {
                let Some(hit) = self.diagram.hit_test(p) else {
                    self.redraw(static_layer);
                    dynamic_layer.clear();
                    return Ok(Response::Ignored);
                };
                debug!(?hit, tool = ?self.tool, "drag started");
                self.state = DragState::Dragging(hit);
                self.draw_layers(hit, static_layer, dynamic_layer)?;
                Ok(Response::Selected(hit))
            }
            (PointerKind::Down, DragState::Dragging(_)) => Ok(Response::Ignored),
            (PointerKind::Move, DragState::Idle) => Ok(Response::Ignored),
            (PointerKind::Move, DragState::Dragging(hit)) => self.drag(hit, p, dynamic_layer),
            (PointerKind::Up, DragState::Idle) => Ok(Response::Ignored),
            (PointerKind::Up, DragState::Dragging(hit)) => {
                self.state = DragState::Idle;
                let created = match (hit, self.preview.take()) {
                    (Hit::Node(source), Some(_)) => {
                        let preview = self.connect_preview(source, p)?;
                        self.commit(source, preview)?
                    }
                    _ => None,
                };
                debug!(?hit, ?created, "drag ended");
                self.redraw(static_layer);
                dynamic_layer.clear();
                Ok(created.map_or(Response::Released, Response::EdgeCreated))
            }
        }
    }

    fn draw_layers<A, B>(&self, hit: Hit, static_layer: &mut A, dynamic_layer: &mut B) -> DiagramResult<()>
    where
        A: Surface + ?Sized,
        B: Surface + ?Sized,
    {
        let element = Element::from(hit);
        let style = &self.config.style;
        self.diagram.draw_static(static_layer, style, Some(element));
        self.diagram.draw_dynamic(dynamic_layer, style, element)
    }

    fn drag<B: Surface + ?Sized>(
        &mut self,
        hit: Hit,
        p: Point,
        dynamic_layer: &mut B,
    ) -> DiagramResult<Response> {
        let style = &self.config.style;
        match hit {
            Hit::Node(id) if self.tool == Tool::Connect => {
                let preview = self.connect_preview(id, p)?;
                self.diagram.draw_dynamic(dynamic_layer, style, Element::Node(id))?;
                if let Some(target) = preview.target.filter(|&t| t != id) {
                    let circle = self.diagram.node(target)?.circle();
                    dynamic_layer.draw_circle(
                        circle.center,
                        circle.radius,
                        &style.selected,
                        Some(&style.node_fill),
                    );
                }
                draw_edge(dynamic_layer, preview.shape.path(), None, &style.selected, style, false);
                self.preview = Some(preview);
            }
            Hit::Node(id) => {
                self.diagram.set_node_center(id, p)?;
                self.diagram.draw_dynamic(dynamic_layer, style, Element::Node(id))?;
            }
            Hit::EdgeVertex(id) => {
                self.diagram.drag_vertex(id, p)?;
                self.diagram.draw_dynamic(dynamic_layer, style, Element::Edge(id))?;
            }
            Hit::EdgeBody(_) => return Ok(Response::Ignored),
            Hit::Label(id) => {
                if !self.diagram.slide_label(id, p)? {
                    return Ok(Response::Ignored);
                }
                self.diagram.draw_dynamic(dynamic_layer, style, Element::Label(id))?;
            }
        }
        Ok(Response::Updated)
    }

    /// The edge that releasing at `p` would create: a plain edge to the
    /// pointer or to the node under it, or a self-loop whose control point is
    /// three radii out along the centre-pointer line.
    fn connect_preview(&self, source: NodeId, p: Point) -> DiagramResult<ConnectPreview> {
        let from = *self.diagram.node(source)?.circle();
        let target = self.diagram.node_at(p);
        let shape = match target {
            None => PlainEdge::new(&from, &Circle::point(p)).into(),
            Some(t) if t == source => {
                let slope = from.center.slope_to(p);
                let reach = defaults::LOOP_PREVIEW_FACTOR * from.radius;
                let ahead = from.center.point_along_slope(slope, reach);
                let behind = from.center.point_along_slope(slope, -reach);
                let control = if p.distance_to(ahead) <= p.distance_to(behind) {
                    ahead
                } else {
                    behind
                };
                SelfLoopEdge::with_control(&from, control).into()
            }
            Some(t) => PlainEdge::new(&from, self.diagram.node(t)?.circle()).into(),
        };
        Ok(ConnectPreview { shape, target })
    }

    fn commit(&mut self, source: NodeId, preview: ConnectPreview) -> DiagramResult<Option<EdgeId>> {
        let Some(target) = preview.target else {
            return Ok(None);
        };
        let id = match preview.shape {
            EdgeShape::SelfLoop(shape) => self
                .diagram
                .make_self_loop_with_control(source, shape.path().control)?,
            EdgeShape::Plain(_) => self.diagram.make_outgoing_edge(source, target)?,
        };
        Ok(Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn spawn_ring_cycles_through_eight_positions() {
        let mut ring = SpawnRing::new(Point::new(0.0, 0.0), 10.0);
        let positions: Vec<Point> = (0..9).map(|_| ring.next_position()).collect();

        let expect = |angle: f64| Point::new(10.0 * angle.cos(), 10.0 * angle.sin());
        let angles = [
            -FRAC_PI_2,
            0.0,
            FRAC_PI_2,
            PI,
            -FRAC_PI_4,
            FRAC_PI_4,
            3.0 * FRAC_PI_4,
            5.0 * FRAC_PI_4,
            -FRAC_PI_2,
        ];
        for (got, angle) in positions.iter().zip(angles) {
            assert!(got.distance_to(expect(angle)) < 1e-9, "{got} at angle {angle}");
        }
    }

    #[test]
    fn spawn_node_uses_configured_radius() {
        let mut editor = Editor::new(
            EditorConfig::default()
                .with_node_radius(20.0)
                .with_spawn_anchor(Point::new(100.0, 100.0)),
        );
        let id = editor.spawn_node().unwrap();
        let node = editor.diagram().node(id).unwrap();
        assert_eq!(node.radius(), 20.0);
        // First spawn goes straight up, three radii out
        assert!(node.center().distance_to(Point::new(100.0, 40.0)) < 1e-9);
    }

    #[test]
    fn set_tool_drops_preview() {
        let mut editor = Editor::default();
        editor.set_tool(Tool::Connect);
        assert_eq!(editor.tool(), Tool::Connect);
        assert!(editor.dragging().is_none());
    }
}
