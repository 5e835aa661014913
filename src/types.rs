//! Value types for diagram geometry (screen pixels, y grows downward).
//!
//! Design goals:
//! - Points and offsets are distinct: `Point + Offset = Point`, `Point - Point = Offset`
//! - Every operation returns a new value; nothing here mutates in place
//! - User-supplied numbers go through `try_new` validation

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::{DVec2, dvec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Validate a coordinate (rejects NaN/infinite)
#[inline]
pub fn finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Validate a radius (rejects NaN, infinite, zero, negative)
pub fn positive(val: f64) -> Result<f64, NumericError> {
    let val = finite(val)?;
    if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// A position on the canvas
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Create a point with validation (rejects NaN/infinite)
    pub fn try_new(x: f64, y: f64) -> Result<Self, NumericError> {
        Ok(Point { x: finite(x)?, y: finite(y)? })
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance_to(self, other: Point) -> f64 {
        DVec2::from(self).distance(other.into())
    }

    /// Slope of the line from `self` to `other`.
    ///
    /// Vertical lines yield `±INFINITY` (and coincident points NaN); callers
    /// route those through the infinite-slope branch of [`Point::point_along_slope`].
    pub fn slope_to(self, other: Point) -> f64 {
        (other.y - self.y) / (other.x - self.x)
    }

    pub fn translate(self, delta: Offset) -> Point {
        self + delta
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// The point `distance` away from `self` on the line of the given slope.
    ///
    /// Positive distances move toward +x. A non-finite slope means a vertical
    /// line, and the step is `(0, distance)`.
    pub fn point_along_slope(self, slope: f64, distance: f64) -> Point {
        if !slope.is_finite() {
            return Point::new(self.x, self.y + distance);
        }
        let k = (1.0 / (1.0 + slope * slope)).sqrt();
        Point::new(self.x + distance * k, self.y + slope * distance * k)
    }

    /// Evaluate the line through `through` whose slope is perpendicular to the
    /// segment `self -> through`.
    ///
    /// Returns y for the given x, or x for the given y when `inverse` is set.
    pub fn perpendicular_line(self, x: f64, through: Point, inverse: bool) -> f64 {
        let slope = (self.x - through.x) / (through.y - self.y);
        if inverse {
            (x - through.y) / slope + through.x
        } else {
            slope * (x - through.x) + through.y
        }
    }

    pub fn is_within(self, other: Point, radius: f64) -> bool {
        self.distance_to(other) <= radius
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> DVec2 {
        dvec2(p.x, p.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Point {
        Point::new(v.x, v.y)
    }
}

/// A displacement vector (not an absolute position)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Offset { dx, dy }
    }

    pub fn length(self) -> f64 {
        DVec2::from(self).length()
    }
}

impl From<Offset> for DVec2 {
    fn from(o: Offset) -> DVec2 {
        dvec2(o.dx, o.dy)
    }
}

impl From<DVec2> for Offset {
    fn from(v: DVec2) -> Offset {
        Offset::new(v.x, v.y)
    }
}

impl Add<Offset> for Point {
    type Output = Point;
    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub<Offset> for Point {
    type Output = Point;
    fn sub(self, rhs: Offset) -> Point {
        Point::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

impl Sub<Point> for Point {
    type Output = Offset;
    fn sub(self, rhs: Point) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Offset {
    type Output = Offset;
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl Mul<f64> for Offset {
    type Output = Offset;
    fn mul(self, rhs: f64) -> Offset {
        Offset::new(self.dx * rhs, self.dy * rhs)
    }
}

impl Neg for Offset {
    type Output = Offset;
    fn neg(self) -> Offset {
        Offset::new(-self.dx, -self.dy)
    }
}

/// A circle; the shape of every node
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    /// Create a circle (unchecked). Use `try_new` for user-provided values.
    pub const fn new(center: Point, radius: f64) -> Self {
        Circle { center, radius }
    }

    /// A zero-radius circle, used as a stand-in node at a bare pointer position
    pub const fn point(center: Point) -> Self {
        Circle { center, radius: 0.0 }
    }

    pub fn try_new(center: Point, radius: f64) -> Result<Self, NumericError> {
        Ok(Circle {
            center: Point::try_new(center.x, center.y)?,
            radius: positive(radius)?,
        })
    }

    /// True iff `p` is on or inside the boundary
    pub fn contains(&self, p: Point) -> bool {
        self.center.is_within(p, self.radius)
    }

    /// Project `toward` radially onto the rim.
    ///
    /// Returns None when `toward` is the center itself.
    pub fn rim_toward(&self, toward: Point) -> Option<Point> {
        let delta = DVec2::from(toward - self.center);
        let len = delta.length();
        if len == 0.0 || !len.is_finite() {
            return None;
        }
        Some(self.center + Offset::from(delta * (self.radius / len)))
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const ZERO: Size = Size { w: 0.0, h: 0.0 };

    pub const fn new(w: f64, h: f64) -> Self {
        Size { w, h }
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: Point::new(f64::MAX, f64::MAX),
            max: Point::new(f64::MIN, f64::MIN),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        BBox {
            min: origin,
            max: Point::new(origin.x + size.w, origin.y + size.h),
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Expand to include a circle
    pub fn expand_circle(&mut self, circle: &Circle) {
        let r = Offset::new(circle.radius, circle.radius);
        self.expand_point(circle.center - r);
        self.expand_point(circle.center + r);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Strict containment: points on the border are outside
    pub fn contains_strict(&self, p: Point) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }
}
