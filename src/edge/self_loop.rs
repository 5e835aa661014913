//! Edges from a node back to itself.

use glam::DVec2;

use crate::curve::Curve;
use crate::defaults;
use crate::geometry::{Approach, rim_crossing};
use crate::log::warn;
use crate::types::{Circle, Offset, Point};

use super::{EdgeGeometry, EdgePath};

/// Loop geometry relative to the node centre
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct LoopOffset {
    start: Offset,
    end: Offset,
    control: Offset,
}

/// A loop that leaves and re-enters the same node.
///
/// The rim endpoints are found once per control point; moving the node only
/// translates the stored offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfLoopEdge {
    path: EdgePath,
    offset: LoopOffset,
}

impl SelfLoopEdge {
    /// A loop standing straight up from the node, its control point four
    /// radii above the centre.
    pub fn new(node: &Circle) -> Self {
        let control = Point::new(
            node.center.x,
            node.center.y - defaults::LOOP_CONTROL_FACTOR * node.radius,
        );
        Self::with_control(node, control)
    }

    pub fn with_control(node: &Circle, control: Point) -> Self {
        let mut edge = SelfLoopEdge {
            path: EdgePath::unresolved(control),
            offset: LoopOffset::default(),
        };
        edge.recompute_endpoints(node, node);
        edge
    }

    /// The chord through the node centre, perpendicular to the centre-control
    /// line, with its ends half a radius out. The second point is where the
    /// loop comes back in.
    fn chord(node: &Circle, control: Point) -> (Point, Point) {
        let center = node.center;
        let slope = -1.0 / center.slope_to(control);
        let half = node.radius / 2.0;
        let left = center.point_along_slope(slope, -half);
        let right = center.point_along_slope(slope, half);
        if control.y < center.y {
            (left, right)
        } else {
            (right, left)
        }
    }
}

impl EdgeGeometry for SelfLoopEdge {
    fn path(&self) -> &EdgePath {
        &self.path
    }

    fn recompute_endpoints(&mut self, node: &Circle, _: &Circle) {
        let control = self.path.control;
        let (leave, enter) = Self::chord(node, control);
        let search = Curve::new(leave, control, enter);

        let (start, end) = match rim_crossing(&search, node, Approach::FromEnd) {
            // The search curve is symmetric about the centre-control line,
            // so the outgoing crossing mirrors the incoming one.
            Some(t) => (search.evaluate(1.0 - t), search.evaluate(t)),
            None => {
                warn!(control = %control, "self-loop never leaves its node, clamping to the rim");
                (
                    node.rim_toward(leave).unwrap_or(leave),
                    node.rim_toward(enter).unwrap_or(enter),
                )
            }
        };
        self.path.set_endpoints(start, end);

        let center = node.center;
        self.offset = LoopOffset {
            start: start - center,
            end: end - center,
            control: control - center,
        };
    }

    fn on_endpoint_moved(&mut self, node: &Circle, _: &Circle) {
        let center = node.center;
        self.path.control = center + self.offset.control;
        self.path
            .set_endpoints(center + self.offset.start, center + self.offset.end);
    }

    fn drag_vertex(&mut self, target: Point, node: &Circle, _: &Circle) {
        let center = DVec2::from(node.center);
        let toward = DVec2::from(target) - center;
        let Some(unit) = toward.try_normalize() else {
            return;
        };
        let reach = toward.length();

        // First guess: slide the target along the centre line by its overhang
        // past the rim and keep whichever candidate lies farther out.
        let overhang = reach - node.radius;
        let mut along = reach + overhang.abs();

        // The vertex sits halfway between the rim-endpoint midpoint and the
        // control point. The endpoints follow the control point, so repeat
        // until the control point settles with the vertex on the target.
        for _ in 0..defaults::VERTEX_SETTLE_ITERATIONS {
            self.path.control = Point::from(center + unit * along);
            self.recompute_endpoints(node, node);

            let base = (DVec2::from(self.path.start.midpoint(self.path.end)) - center).dot(unit);
            let next = 2.0 * reach - base;
            let shift = (next - along).abs();
            along = next;
            if shift <= defaults::VERTEX_SETTLE_TOLERANCE {
                break;
            }
        }

        self.path.control = Point::from(center + unit * along);
        self.recompute_endpoints(node, node);
    }
}
