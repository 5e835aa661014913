//! Edges between two distinct nodes.

use crate::curve::Curve;
use crate::defaults;
use crate::geometry::{Approach, rim_crossing, straight_chord};
use crate::log::{debug, warn};
use crate::types::{Circle, Point};

use super::{EdgeGeometry, EdgePath};

/// The line through the midpoint of the node centres, perpendicular to the
/// source-destination segment. An edge's vertex only moves along it.
#[derive(Debug, Clone, Copy)]
struct Axis {
    source: Point,
    mid: Point,
    /// Non-finite for a horizontal node pair (vertical axis) and for
    /// coincident centres.
    slope: f64,
}

impl Axis {
    fn between(source: Point, destination: Point) -> Self {
        let slope = if source == destination {
            f64::INFINITY
        } else {
            (source.x - destination.x) / (destination.y - source.y)
        };
        Axis {
            source,
            mid: source.midpoint(destination),
            slope,
        }
    }

    /// Project `p` onto the axis, along x when the axis is closer to
    /// horizontal and along y otherwise.
    fn project(&self, p: Point) -> Point {
        if !self.slope.is_finite() {
            Point::new(self.mid.x, p.y)
        } else if self.slope.abs() < 1.0 {
            Point::new(p.x, self.source.perpendicular_line(p.x, self.mid, false))
        } else {
            Point::new(self.source.perpendicular_line(p.y, self.mid, true), p.y)
        }
    }
}

/// A curved edge between two different nodes.
///
/// The control point is not stored as a position but as a distance from the
/// midpoint of the node centres plus a side flag, so it can be rebuilt on the
/// axis of symmetry whenever either node moves.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainEdge {
    path: EdgePath,
    control_distance: f64,
    control_is_forward: bool,
}

impl PlainEdge {
    /// A straight-looking edge: the control point sits midway between the centres.
    pub fn new(source: &Circle, destination: &Circle) -> Self {
        let control = source.center.midpoint(destination.center);
        let mut edge = PlainEdge {
            path: EdgePath::unresolved(control),
            control_distance: 0.0,
            control_is_forward: true,
        };
        edge.recompute_endpoints(source, destination);
        edge
    }

    /// Distance of the control point from the midpoint of the node centres
    pub fn control_distance(&self) -> f64 {
        self.control_distance
    }

    /// Which side of the source-destination line the control point is on
    pub fn control_is_forward(&self) -> bool {
        self.control_is_forward
    }

    fn capture_side(&mut self, source: Point, destination: Point) {
        let mid = source.midpoint(destination);
        let control = self.path.control;
        self.control_distance = control.distance_to(mid);
        self.control_is_forward = if source.y < destination.y {
            control.x >= mid.x
        } else if source.y == destination.y && source.x >= destination.x {
            control.y >= mid.y
        } else if source.y == destination.y {
            control.y < mid.y
        } else {
            control.x <= mid.x
        };
    }
}

impl EdgeGeometry for PlainEdge {
    fn path(&self) -> &EdgePath {
        &self.path
    }

    fn recompute_endpoints(&mut self, source: &Circle, destination: &Circle) {
        let search = Curve::new(source.center, self.path.control, destination.center);
        let end = rim_crossing(&search, destination, Approach::FromEnd);
        let start = rim_crossing(&search, source, Approach::FromStart);

        let (start, end) = match (start, end) {
            (Some(ts), Some(te)) => (search.evaluate(ts), search.evaluate(te)),
            _ => {
                warn!(
                    control = %self.path.control,
                    "rim search did not leave a node, using a straight chord"
                );
                straight_chord(source, destination)
            }
        };
        self.path.set_endpoints(start, end);
    }

    fn on_endpoint_moved(&mut self, source: &Circle, destination: &Circle) {
        let (src, dst) = (source.center, destination.center);
        let axis = Axis::between(src, dst);

        let tail_is_above_head = src.y > dst.y || (src.y == dst.y && src.x < dst.x);
        let mut distance = self.control_distance;
        if self.control_is_forward == tail_is_above_head {
            distance = -distance;
        }

        self.path.control = axis.mid.point_along_slope(axis.slope, distance);
        self.recompute_endpoints(source, destination);
    }

    fn drag_vertex(&mut self, target: Point, source: &Circle, destination: &Circle) {
        let axis = Axis::between(source.center, destination.center);
        let vertex = axis.project(target);

        // The vertex sits halfway between the rim-endpoint midpoint and the
        // control point, so the control point is twice as far out. Moving the
        // control point moves the rim endpoints too, so repeat until it settles.
        for _ in 0..defaults::VERTEX_SETTLE_ITERATIONS {
            let base = axis.project(self.path.start.midpoint(self.path.end));
            let reach = 2.0 * base.distance_to(vertex);
            let ahead = base.point_along_slope(axis.slope, reach);
            let behind = base.point_along_slope(axis.slope, -reach);
            let control = if ahead.distance_to(vertex) <= behind.distance_to(vertex) {
                ahead
            } else {
                behind
            };

            let shift = control.distance_to(self.path.control);
            self.path.control = control;
            self.recompute_endpoints(source, destination);
            if shift <= defaults::VERTEX_SETTLE_TOLERANCE {
                break;
            }
        }

        self.capture_side(source.center, destination.center);
        debug!(
            distance = self.control_distance,
            forward = self.control_is_forward,
            "edge vertex dragged"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Offset;

    fn circle(x: f64, y: f64) -> Circle {
        Circle::new(Point::new(x, y), defaults::NODE_RADIUS)
    }

    fn assert_close(a: Point, b: Point, tol: f64) {
        assert!(a.distance_to(b) <= tol, "{a} is not within {tol} of {b}");
    }

    // ==================== Construction tests ====================

    #[test]
    fn default_edge_meets_rims() {
        let a = circle(150.0, 200.0);
        let b = circle(350.0, 200.0);
        let edge = PlainEdge::new(&a, &b);

        assert_eq!(edge.path().control, Point::new(250.0, 200.0));
        assert_close(edge.path().start, Point::new(180.0, 200.0), 1e-6);
        assert_close(edge.path().end, Point::new(320.0, 200.0), 1e-6);
        assert_eq!(edge.path().arrowhead.tip, edge.path().end);
    }

    #[test]
    fn overlapping_nodes_fall_back_to_chord() {
        let a = circle(100.0, 100.0);
        let b = circle(120.0, 100.0);
        let edge = PlainEdge::new(&a, &b);

        assert_eq!(edge.path().start, Point::new(130.0, 100.0));
        assert_eq!(edge.path().end, Point::new(90.0, 100.0));
    }

    // ==================== Axis tests ====================

    #[test]
    fn axis_of_horizontal_pair_is_vertical() {
        let axis = Axis::between(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(!axis.slope.is_finite());
        assert_eq!(axis.project(Point::new(10.0, 40.0)), Point::new(50.0, 40.0));
    }

    #[test]
    fn axis_of_vertical_pair_is_horizontal() {
        let axis = Axis::between(Point::new(0.0, 0.0), Point::new(0.0, 100.0));
        assert_eq!(axis.slope, 0.0);
        assert_eq!(axis.project(Point::new(-30.0, 10.0)), Point::new(-30.0, 50.0));
    }

    #[test]
    fn axis_of_diagonal_pair_projects_by_y() {
        let axis = Axis::between(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert_eq!(axis.slope, -1.0);
        let p = axis.project(Point::new(0.0, 30.0));
        assert!((p.x - 70.0).abs() < 1e-9 && p.y == 30.0);
    }

    // ==================== Drag tests ====================

    #[test]
    fn drag_moves_vertex_along_axis() {
        let a = circle(150.0, 200.0);
        let b = circle(350.0, 200.0);
        let mut edge = PlainEdge::new(&a, &b);

        edge.drag_vertex(Point::new(230.0, 150.0), &a, &b);
        assert_close(edge.path().vertex(), Point::new(250.0, 150.0), 1e-6);

        let control = edge.path().control;
        assert!((control.x - 250.0).abs() < 1e-9);
        assert!(control.y < 150.0);
        assert!((edge.control_distance() - (200.0 - control.y)).abs() < 1e-9);
        assert!(edge.control_is_forward());
    }

    #[test]
    fn drag_back_to_midpoint_straightens() {
        let a = circle(150.0, 200.0);
        let b = circle(350.0, 200.0);
        let mut edge = PlainEdge::new(&a, &b);
        edge.drag_vertex(Point::new(250.0, 60.0), &a, &b);
        edge.drag_vertex(Point::new(250.0, 200.0), &a, &b);

        assert!(edge.control_distance() < 1e-6);
        assert_close(edge.path().start, Point::new(180.0, 200.0), 1e-4);
    }

    #[test]
    fn drag_to_current_vertex_is_idempotent() {
        let a = circle(120.0, 90.0);
        let b = circle(300.0, 260.0);
        let mut edge = PlainEdge::new(&a, &b);
        edge.drag_vertex(Point::new(140.0, 240.0), &a, &b);

        let before = edge.path().control;
        let vertex = edge.path().vertex();
        edge.drag_vertex(vertex, &a, &b);
        assert_close(edge.path().control, before, 1e-6);
    }

    #[test]
    fn endpoint_move_keeps_side_of_curve() {
        let a = circle(150.0, 200.0);
        let mut b = circle(350.0, 200.0);
        let mut edge = PlainEdge::new(&a, &b);
        edge.drag_vertex(Point::new(250.0, 150.0), &a, &b);
        let control_before = edge.path().control;
        let distance = edge.control_distance();

        // Rebuilding from the stored distance without moving anything
        edge.on_endpoint_moved(&a, &b);
        assert_close(edge.path().control, control_before, 1e-9);

        b.center = b.center.translate(Offset::new(0.0, 40.0));
        edge.on_endpoint_moved(&a, &b);
        let mid = a.center.midpoint(b.center);
        assert!((edge.path().control.distance_to(mid) - distance).abs() < 1e-9);
        // Still above the source-destination line
        assert!(edge.path().control.y < mid.y);
    }

    #[test]
    fn side_flag_survives_every_orientation() {
        let a = circle(200.0, 200.0);
        let targets = [
            Point::new(400.0, 200.0),
            Point::new(0.0, 200.0),
            Point::new(200.0, 400.0),
            Point::new(200.0, 0.0),
            Point::new(380.0, 340.0),
            Point::new(30.0, 60.0),
        ];
        for dst in targets {
            let b = Circle::new(dst, defaults::NODE_RADIUS);
            for bend in [-60.0, 60.0] {
                let mut edge = PlainEdge::new(&a, &b);
                let axis = Axis::between(a.center, b.center);
                let pull = axis.mid.point_along_slope(axis.slope, bend);
                edge.drag_vertex(pull, &a, &b);

                let placed = edge.path().control;
                edge.on_endpoint_moved(&a, &b);
                assert_close(edge.path().control, placed, 1e-6);
            }
        }
    }
}
