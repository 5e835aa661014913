//! Geometry shared by both edge shapes: rim crossings, the straight-chord
//! fallback, and arrowheads.

use glam::{DVec2, dvec2};

use crate::curve::Curve;
use crate::defaults;
use crate::log::trace;
use crate::types::{Circle, Point};

/// Which end of a curve the rim search starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    /// Scan t upward from 0 (the source end)
    FromStart,
    /// Scan t downward from 1 (the destination end)
    FromEnd,
}

impl Approach {
    fn t(self, s: f64) -> f64 {
        match self {
            Approach::FromStart => s,
            Approach::FromEnd => 1.0 - s,
        }
    }
}

/// Find where `curve` leaves `circle`, scanning from one end toward the middle.
///
/// The scan walks t in coarse-to-fine steps ([`defaults::RIM_SEARCH_STEPS`]).
/// Each pass resumes from the last sample still inside the circle, and the
/// final bracket is polished by bisection so the returned point sits on the
/// rim. Samples at or past the curve midpoint are never taken.
///
/// # Arguments
/// * `curve` - The curve to scan; the scanned end should lie inside `circle`
/// * `circle` - The node whose rim is being crossed
/// * `approach` - Which end the scan starts from
///
/// Returns the crossing parameter (in the curve's own t), or None if the
/// coarse pass reaches the midpoint without leaving the circle.
pub fn rim_crossing(curve: &Curve, circle: &Circle, approach: Approach) -> Option<f64> {
    let inside = |s: f64| circle.contains(curve.evaluate(approach.t(s)));

    // `lo` is the last distance (from the scanned end) known inside,
    // `hi` the first known outside.
    let mut lo = 0.0;
    let mut hi: Option<f64> = None;
    for (pass, &step) in defaults::RIM_SEARCH_STEPS.iter().enumerate() {
        loop {
            let next = lo + step;
            if next >= 0.5 || hi.is_some_and(|h| next >= h) {
                break;
            }
            if inside(next) {
                lo = next;
            } else {
                hi = Some(next);
                break;
            }
        }
        if pass == 0 && hi.is_none() {
            return None;
        }
    }

    let mut hi = hi?;
    for _ in 0..defaults::RIM_REFINE_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        if inside(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let t = approach.t((lo + hi) / 2.0);
    trace!(?approach, t, "rim crossing");
    Some(t)
}

/// Straight segment between two circles, clipped at each rim.
///
/// Used when the curved rim search cannot leave a node. Coincident centres
/// use the +x direction.
pub fn straight_chord(from: &Circle, to: &Circle) -> (Point, Point) {
    let a = DVec2::from(from.center);
    let b = DVec2::from(to.center);
    let dir = (b - a).try_normalize().unwrap_or(DVec2::X);
    (
        Point::from(a + dir * from.radius),
        Point::from(b - dir * to.radius),
    )
}

/// The two-segment arrowhead at the destination end of an edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    pub tip: Point,
    pub corner1: Point,
    pub corner2: Point,
}

impl Arrowhead {
    /// Build the arrowhead for a visible (rim-to-rim) curve.
    ///
    /// The direction is sampled just short of the tip and spread by ±45°;
    /// both corners sit `7 / cos(45°)` from the tip.
    pub fn for_curve(curve: &Curve) -> Self {
        let tip = DVec2::from(curve.end);
        let back = DVec2::from(curve.evaluate(defaults::ARROW_SAMPLE_T)) - tip;
        let angle = back.y.atan2(back.x);
        let side = defaults::ARROW_SIDE / defaults::ARROW_SPREAD.cos();

        let corner = |theta: f64| Point::from(tip + dvec2(theta.cos(), theta.sin()) * side);
        Arrowhead {
            tip: curve.end,
            corner1: corner(angle + defaults::ARROW_SPREAD),
            corner2: corner(angle - defaults::ARROW_SPREAD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(x: f64, y: f64, r: f64) -> Circle {
        Circle::new(Point::new(x, y), r)
    }

    // ==================== Rim crossing tests ====================

    #[test]
    fn straight_curve_crosses_both_rims() {
        let src = circle(150.0, 200.0, 30.0);
        let dst = circle(350.0, 200.0, 30.0);
        let curve = Curve::new(src.center, Point::new(250.0, 200.0), dst.center);

        let t_end = rim_crossing(&curve, &dst, Approach::FromEnd).unwrap();
        let t_start = rim_crossing(&curve, &src, Approach::FromStart).unwrap();
        let end = curve.evaluate(t_end);
        let start = curve.evaluate(t_start);

        assert!((end.x - 320.0).abs() < 1e-6 && (end.y - 200.0).abs() < 1e-9);
        assert!((start.x - 180.0).abs() < 1e-6 && (start.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn crossing_lies_on_rim_for_bent_curve() {
        let src = circle(100.0, 100.0, 20.0);
        let dst = circle(300.0, 180.0, 45.0);
        let curve = Curve::new(src.center, Point::new(140.0, 320.0), dst.center);

        let end = curve.evaluate(rim_crossing(&curve, &dst, Approach::FromEnd).unwrap());
        let start = curve.evaluate(rim_crossing(&curve, &src, Approach::FromStart).unwrap());
        assert!((end.distance_to(dst.center) - 45.0).abs() < 1e-6);
        assert!((start.distance_to(src.center) - 20.0).abs() < 1e-6);
    }

    #[test]
    fn overlapping_nodes_have_no_crossing() {
        let src = circle(100.0, 100.0, 30.0);
        let dst = circle(120.0, 100.0, 30.0);
        let curve = Curve::new(src.center, src.center.midpoint(dst.center), dst.center);
        assert_eq!(rim_crossing(&curve, &dst, Approach::FromEnd), None);
    }

    // ==================== Fallback tests ====================

    #[test]
    fn straight_chord_clips_at_radii() {
        let (start, end) = straight_chord(&circle(0.0, 0.0, 10.0), &circle(0.0, 100.0, 20.0));
        assert_eq!(start, Point::new(0.0, 10.0));
        assert_eq!(end, Point::new(0.0, 80.0));
    }

    #[test]
    fn straight_chord_coincident_centres_use_x_axis() {
        let (start, end) = straight_chord(&circle(5.0, 5.0, 10.0), &circle(5.0, 5.0, 10.0));
        assert_eq!(start, Point::new(15.0, 5.0));
        assert_eq!(end, Point::new(-5.0, 5.0));
    }

    // ==================== Arrowhead tests ====================

    #[test]
    fn arrowhead_on_horizontal_edge() {
        let curve = Curve::new(
            Point::new(180.0, 200.0),
            Point::new(250.0, 200.0),
            Point::new(320.0, 200.0),
        );
        let head = Arrowhead::for_curve(&curve);
        assert_eq!(head.tip, Point::new(320.0, 200.0));

        let mut corners = [head.corner1, head.corner2];
        corners.sort_by(|a, b| a.y.total_cmp(&b.y));
        assert!((corners[0].x - 313.0).abs() < 1e-9 && (corners[0].y - 193.0).abs() < 1e-9);
        assert!((corners[1].x - 313.0).abs() < 1e-9 && (corners[1].y - 207.0).abs() < 1e-9);
    }

    #[test]
    fn arrowhead_sides_have_fixed_length() {
        let curve = Curve::new(
            Point::new(0.0, 0.0),
            Point::new(80.0, -60.0),
            Point::new(120.0, 40.0),
        );
        let head = Arrowhead::for_curve(&curve);
        let side = defaults::ARROW_SIDE / defaults::ARROW_SPREAD.cos();
        assert!((head.tip.distance_to(head.corner1) - side).abs() < 1e-9);
        assert!((head.tip.distance_to(head.corner2) - side).abs() < 1e-9);
    }
}
