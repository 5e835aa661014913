//! Geometry engine for drawing directed state graphs.
//!
//! Nodes are circles; edges are quadratic Bézier curves pinned to the rims of
//! the nodes they connect, with an arrowhead at the destination and a
//! draggable text label. Dragging an edge's vertex bends it along its axis of
//! symmetry, and the bend is kept as the nodes move.
//!
//! ```
//! use statesketch::{Diagram, Point, Style};
//!
//! let mut diagram = Diagram::new();
//! let a = diagram.add_node(Point::new(150.0, 200.0), 30.0)?;
//! let b = diagram.add_node(Point::new(350.0, 200.0), 30.0)?;
//! let edge = diagram.make_outgoing_edge(a, b)?;
//! diagram.drag_vertex(edge, Point::new(250.0, 150.0))?;
//!
//! let svg = statesketch::render_svg(&diagram, &Style::default());
//! assert!(svg.contains("<path"));
//! # Ok::<(), statesketch::DiagramError>(())
//! ```

pub mod curve;
pub mod defaults;
pub mod diagram;
pub mod edge;
pub mod editor;
pub mod errors;
pub mod geometry;
pub mod label;
mod log;
pub mod node;
pub mod render;
pub mod types;

pub use curve::Curve;
pub use diagram::{Diagram, Element, Hit};
pub use edge::{Edge, EdgeGeometry, EdgeId, EdgePath, EdgeShape, PlainEdge, SelfLoopEdge};
pub use editor::{Editor, EditorConfig, PointerEvent, PointerKind, Response, SpawnRing, Tool};
pub use errors::{DiagramError, DiagramResult};
pub use geometry::Arrowhead;
pub use label::{EdgeLabel, HorizontalAnchor, VerticalAnchor};
pub use node::{Node, NodeId};
pub use render::{Color, Font, ProportionalMetrics, RecordingSurface, Style, Surface, SvgSurface, TextMetrics};
pub use types::{BBox, Circle, NumericError, Offset, Point, Size};

/// Render a whole diagram as a standalone SVG document sized to its bounds.
pub fn render_svg(diagram: &Diagram, style: &Style) -> String {
    let mut surface = SvgSurface::new();
    diagram.draw_all(&mut surface, style);
    surface.finish(&diagram.bounds())
}
