//! Quadratic Bézier curves.
//!
//! Every curve in the crate runs from t=0 at the source end to t=1 at the
//! destination end.

use glam::DVec2;

use crate::defaults;
use crate::types::{Offset, Point};

/// A quadratic Bézier curve defined by its two ends and one control point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Curve {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl Curve {
    pub const fn new(start: Point, control: Point, end: Point) -> Self {
        Curve { start, control, end }
    }

    /// Position at parameter `t`
    pub fn evaluate(&self, t: f64) -> Point {
        let (p0, p1, p2) = self.points();
        let u = 1.0 - t;
        Point::from(p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t))
    }

    /// Tangent vector at parameter `t`, pointing from source toward destination
    pub fn derivative(&self, t: f64) -> Offset {
        let (p0, p1, p2) = self.points();
        Offset::from((p1 - p0) * (2.0 * (1.0 - t)) + (p2 - p1) * (2.0 * t))
    }

    /// The curve's midpoint (t = 0.5), the draggable vertex of an edge
    pub fn vertex(&self) -> Point {
        self.evaluate(0.5)
    }

    /// All parameters in [0, 1] whose curve point lies within the hit
    /// tolerance of `target`.
    ///
    /// Each axis contributes up to two roots of
    /// `a·t² + b·t + c = 0`, so at most four candidates come back.
    pub fn solve_t_for_point(&self, target: Point) -> Vec<f64> {
        let axes = [
            (self.start.x, self.control.x, self.end.x, target.x),
            (self.start.y, self.control.y, self.end.y, target.y),
        ];

        let mut found = Vec::with_capacity(4);
        for (p0, p1, p2, want) in axes {
            let a = p0 - 2.0 * p1 + p2;
            let b = 2.0 * (p1 - p0);
            let c = p0 - want;
            for t in quadratic_roots(a, b, c).into_iter().flatten() {
                if (0.0..=1.0).contains(&t)
                    && self.evaluate(t).is_within(target, defaults::CURVE_HIT_TOLERANCE)
                {
                    found.push(t);
                }
            }
        }
        found
    }

    /// The conforming parameter whose curve point is nearest to `target`
    pub fn t_for_point(&self, target: Point) -> Option<f64> {
        self.solve_t_for_point(target).into_iter().min_by(|a, b| {
            let da = self.evaluate(*a).distance_to(target);
            let db = self.evaluate(*b).distance_to(target);
            da.total_cmp(&db)
        })
    }

    /// Hit test: does `p` lie on the curve (within the tolerance)?
    pub fn contains(&self, p: Point) -> bool {
        !self.solve_t_for_point(p).is_empty()
    }

    fn points(&self) -> (DVec2, DVec2, DVec2) {
        (self.start.into(), self.control.into(), self.end.into())
    }
}

/// Real roots of `a·t² + b·t + c`, using the cancellation-free form.
///
/// A vanishing `a` falls back to the linear root; a vanishing `b` as well
/// yields nothing.
fn quadratic_roots(a: f64, b: f64, c: f64) -> [Option<f64>; 2] {
    if a == 0.0 {
        if b == 0.0 {
            return [None, None];
        }
        return [Some(-c / b), None];
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return [None, None];
    }

    let q = -0.5 * (b + b.signum() * disc.sqrt());
    if q == 0.0 {
        // b == 0 and c == 0: double root at zero
        return [Some(0.0), None];
    }
    [Some(q / a), Some(c / q)]
}
