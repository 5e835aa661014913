//! Edge labels: text boxes that ride along an edge's curve.

use std::cmp::Ordering::{Greater, Less};

use crate::curve::Curve;
use crate::defaults;
use crate::log::debug;
use crate::render::{Font, TextMetrics};
use crate::types::{BBox, Point, Size};

/// Which edge of the text box touches the anchor point vertically
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Bottom,
}

/// Which edge of the text box touches the anchor point horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAnchor {
    Left,
    Right,
}

/// A text label anchored to a parameter on its edge's curve.
///
/// Only `text`, `anchor_t` and the anchors are state; the box's top-left
/// corner is derived by [`EdgeLabel::reposition`].
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    text: String,
    anchor_t: f64,
    vertical: VerticalAnchor,
    horizontal: HorizontalAnchor,
    size: Size,
    origin: Point,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeLabel {
    pub fn new() -> Self {
        EdgeLabel {
            text: String::new(),
            anchor_t: defaults::LABEL_DEFAULT_T,
            vertical: VerticalAnchor::Bottom,
            horizontal: HorizontalAnchor::Left,
            size: Size::ZERO,
            origin: Point::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn anchor_t(&self) -> f64 {
        self.anchor_t
    }

    pub fn vertical_anchor(&self) -> VerticalAnchor {
        self.vertical
    }

    pub fn horizontal_anchor(&self) -> HorizontalAnchor {
        self.horizontal
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Top-left corner of the text box
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn bounds(&self) -> BBox {
        BBox::from_origin_size(self.origin, self.size)
    }

    /// Replace the text and re-measure it. Call [`EdgeLabel::reposition`]
    /// afterwards, since the box size feeds into placement.
    pub fn set_text(&mut self, text: impl Into<String>, metrics: &dyn TextMetrics, font: &Font) {
        self.text = text.into();
        self.size = metrics.measure(&self.text, font);
    }

    /// Strict hit test against the text box. Empty labels are never hit.
    pub fn contains(&self, p: Point) -> bool {
        !self.text.is_empty() && self.bounds().contains_strict(p)
    }

    /// Place the box next to `curve(anchor_t)` on the side named by the
    /// anchors.
    ///
    /// Where the curve is fairly flat the box is centred on the point and
    /// leans in proportion to the tangent; on steep stretches it is pushed
    /// fully to one side so it does not cross the curve.
    pub fn reposition(&mut self, curve: &Curve, source: Point, destination: Point) {
        let at = curve.evaluate(self.anchor_t);
        let d = curve.derivative(self.anchor_t);
        let Size { w, h } = self.size;
        let span = defaults::LABEL_MID_ANCHOR_SPAN;

        let (left, top);
        if d.dx.abs() > d.dy.abs() {
            top = match self.vertical {
                VerticalAnchor::Top => at.y,
                VerticalAnchor::Bottom => at.y - h,
            };
            left = if d.dy.abs() < span {
                let mut lean = -d.dy;
                if source.x > destination.x {
                    lean = -lean;
                }
                if self.vertical == VerticalAnchor::Top {
                    lean = -lean;
                }
                at.x - (w / 2.0) * (lean / span + 1.0)
            } else {
                let rising = d.dx * d.dy > 0.0;
                match (rising, self.vertical) {
                    (true, VerticalAnchor::Top) | (false, VerticalAnchor::Bottom) => at.x - w,
                    _ => at.x,
                }
            };
        } else {
            left = match self.horizontal {
                HorizontalAnchor::Left => at.x,
                HorizontalAnchor::Right => at.x - w,
            };
            top = if d.dx.abs() < span {
                let mut lean = -d.dx;
                if source.y > destination.y {
                    lean = -lean;
                }
                if self.horizontal == HorizontalAnchor::Left {
                    lean = -lean;
                }
                at.y - (h / 2.0) * (lean / span + 1.0)
            } else {
                let rising = d.dx * d.dy > 0.0;
                match (rising, self.horizontal) {
                    (true, HorizontalAnchor::Right) | (false, HorizontalAnchor::Left) => at.y,
                    _ => at.y - h,
                }
            };
        }
        self.origin = Point::new(left, top);
    }

    /// Slide the anchor along `curve` to the point nearest `drag`.
    ///
    /// Hill-climbs from the current parameter in fixed steps. If the climb
    /// would leave the open interval (0, 1) nothing changes and false is
    /// returned. On success the anchors are re-chosen from the quadrant of
    /// the curve point relative to the pointer, and the box is repositioned.
    pub fn slide_to(
        &mut self,
        drag: Point,
        curve: &Curve,
        source: Point,
        destination: Point,
    ) -> bool {
        if self.text.is_empty() {
            return false;
        }

        let step = defaults::LABEL_SLIDE_STEP;
        let distance = |t: f64| drag.distance_to(curve.evaluate(t));
        let step = if distance(self.anchor_t + step) < distance(self.anchor_t - step) {
            step
        } else {
            -step
        };

        let mut t = self.anchor_t;
        let mut best = distance(t);
        loop {
            let next = t + step;
            if next <= 0.0 || next >= 1.0 {
                debug!(t = next, "label slide left the curve, ignoring");
                return false;
            }
            let here = distance(next);
            if here > best {
                break;
            }
            t = next;
            best = here;
        }

        let toward = curve.evaluate(t) - drag;
        match (toward.dx.partial_cmp(&0.0), toward.dy.partial_cmp(&0.0)) {
            (Some(Greater), Some(Less)) => self.set_anchors(VerticalAnchor::Top, HorizontalAnchor::Right),
            (Some(Less), Some(Less)) => self.set_anchors(VerticalAnchor::Top, HorizontalAnchor::Left),
            (Some(Less), Some(Greater)) => self.set_anchors(VerticalAnchor::Bottom, HorizontalAnchor::Left),
            (Some(Greater), Some(Greater)) => {
                self.set_anchors(VerticalAnchor::Bottom, HorizontalAnchor::Right)
            }
            // On an axis: keep the current corner
            _ => {}
        }

        self.anchor_t = t;
        self.reposition(curve, source, destination);
        true
    }

    fn set_anchors(&mut self, vertical: VerticalAnchor, horizontal: HorizontalAnchor) {
        self.vertical = vertical;
        self.horizontal = horizontal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ProportionalMetrics;

    fn flat() -> (Curve, Point, Point) {
        let curve = Curve::new(
            Point::new(180.0, 200.0),
            Point::new(250.0, 200.0),
            Point::new(320.0, 200.0),
        );
        (curve, Point::new(150.0, 200.0), Point::new(350.0, 200.0))
    }

    fn labelled(text: &str) -> EdgeLabel {
        let mut label = EdgeLabel::new();
        label.set_text(text, &ProportionalMetrics, &Font::default());
        label
    }

    // ==================== Placement tests ====================

    #[test]
    fn flat_curve_centres_label_above() {
        let (curve, src, dst) = flat();
        let mut label = labelled("a");
        label.reposition(&curve, src, dst);

        let Size { w, h } = label.size();
        assert!((label.origin().x - (250.0 - w / 2.0)).abs() < 1e-9);
        assert!((label.origin().y - (200.0 - h)).abs() < 1e-9);
    }

    #[test]
    fn steep_curve_pushes_label_aside() {
        // Straight diagonal: derivative (200, 200) at every t
        let curve = Curve::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(200.0, 200.0),
        );
        let mut label = labelled("abc");
        label.reposition(&curve, curve.start, curve.end);

        // |dx| == |dy| takes the vertical branch; a rising curve with a Left
        // anchor puts the box above the point
        let h = label.size().h;
        assert_eq!(label.origin(), Point::new(100.0, 100.0 - h));
    }

    #[test]
    fn vertical_curve_leans_with_tangent() {
        let curve = Curve::new(
            Point::new(100.0, 0.0),
            Point::new(130.0, 100.0),
            Point::new(100.0, 200.0),
        );
        let mut label = labelled("x");
        label.reposition(&curve, curve.start, curve.end);
        // derivative at 0.5 is (0, 200): no lean, box centred vertically
        let h = label.size().h;
        assert!((label.origin().y - (100.0 - h / 2.0)).abs() < 1e-9);
        assert!((label.origin().x - 115.0).abs() < 1e-9);
    }

    #[test]
    fn empty_label_is_not_hit() {
        let (curve, src, dst) = flat();
        let mut label = EdgeLabel::new();
        label.reposition(&curve, src, dst);
        assert!(!label.contains(Point::new(250.0, 200.0)));
    }

    #[test]
    fn hit_test_is_strict() {
        let (curve, src, dst) = flat();
        let mut label = labelled("hello");
        label.reposition(&curve, src, dst);
        let b = label.bounds();

        assert!(label.contains(b.min.midpoint(b.max)));
        assert!(!label.contains(b.min));
        assert!(!label.contains(Point::new(b.max.x, b.min.y + 1.0)));
    }

    // ==================== Slide tests ====================

    #[test]
    fn slide_follows_pointer_and_flips_anchor() {
        let (curve, src, dst) = flat();
        let mut label = labelled("a");
        label.reposition(&curve, src, dst);

        // Pointer below the curve: the box hangs from it
        assert!(label.slide_to(Point::new(200.0, 230.0), &curve, src, dst));
        assert!((label.anchor_t() - 20.0 / 140.0).abs() < 2e-4);
        assert_eq!(label.vertical_anchor(), VerticalAnchor::Top);
        assert!((label.origin().y - 200.0).abs() < 1e-9);

        // Pointer above the curve: the box sits on it
        assert!(label.slide_to(Point::new(230.0, 180.0), &curve, src, dst));
        assert!((label.anchor_t() - 50.0 / 140.0).abs() < 2e-4);
        assert_eq!(label.vertical_anchor(), VerticalAnchor::Bottom);
        assert!((label.origin().y - (200.0 - label.size().h)).abs() < 1e-9);
    }

    #[test]
    fn slide_past_end_is_ignored() {
        let (curve, src, dst) = flat();
        let mut label = labelled("a");
        label.reposition(&curve, src, dst);
        let before = label.clone();

        assert!(!label.slide_to(Point::new(500.0, 200.0), &curve, src, dst));
        assert_eq!(label, before);
    }

    #[test]
    fn slide_keeps_climbing_over_equal_distances() {
        // Collapsed curve: every t is exactly as far from the pointer, so the
        // climb never meets a strict increase and runs off the end
        let origin = Point::new(0.0, 0.0);
        let curve = Curve::new(origin, origin, origin);
        let mut label = labelled("a");
        label.reposition(&curve, origin, origin);
        let before = label.clone();

        assert!(!label.slide_to(Point::new(10.0, 0.0), &curve, origin, origin));
        assert_eq!(label, before);
    }

    #[test]
    fn empty_label_does_not_slide() {
        let (curve, src, dst) = flat();
        let mut label = EdgeLabel::new();
        assert!(!label.slide_to(Point::new(200.0, 200.0), &curve, src, dst));
        assert_eq!(label.anchor_t(), 0.5);
    }
}
