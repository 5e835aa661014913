//! Drawing the diagram.
//!
//! This module is organized into submodules:
//! - `text`: Text measurement for label sizing
//! - `svg`: A surface that writes a standalone SVG document
//! - `recording`: A surface that logs draw calls, for tests and debugging
//!
//! The diagram never owns a drawing context. Every draw call takes the
//! [`Surface`] to paint on as a parameter.

pub mod recording;
pub mod svg;
pub mod text;

pub use recording::RecordingSurface;
pub use svg::SvgSurface;
pub use text::{ProportionalMetrics, TextMetrics};

use std::borrow::Cow;
use std::fmt;

use crate::defaults;
use crate::types::Point;

/// Something the diagram can be painted on
pub trait Surface {
    /// Erase everything drawn so far
    fn clear(&mut self);

    /// Stroke a circle outline, optionally filling it first
    fn draw_circle(&mut self, center: Point, radius: f64, stroke: &Color, fill: Option<&Color>);

    fn draw_quadratic_curve(&mut self, start: Point, control: Point, end: Point, stroke: &Color);

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Color);

    /// Draw `text` with the top-left corner of its box at `origin`
    fn draw_text(&mut self, text: &str, origin: Point, font: &Font, color: &Color);
}

/// A CSS colour value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(Cow<'static, str>);

impl Color {
    pub const BLACK: Color = Color(Cow::Borrowed(defaults::STROKE_COLOR));
    pub const RED: Color = Color(Cow::Borrowed(defaults::SELECTED_COLOR));
    pub const NODE_FILL: Color = Color(Cow::Borrowed(defaults::NODE_FILL));

    pub fn new(css: impl Into<Cow<'static, str>>) -> Self {
        Color(css.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Font used for label text
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: Cow<'static, str>,
    /// Size in pixels
    pub size: f64,
}

impl Default for Font {
    fn default() -> Self {
        Font {
            family: Cow::Borrowed(defaults::FONT_FAMILY),
            size: defaults::FONT_SIZE,
        }
    }
}

impl Font {
    pub fn new(family: impl Into<Cow<'static, str>>, size: f64) -> Self {
        Font {
            family: family.into(),
            size,
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size, self.family)
    }
}

/// Colours and sizes used when painting a diagram
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub stroke: Color,
    /// Colour of the element being dragged
    pub selected: Color,
    pub node_fill: Color,
    pub font: Font,
    /// Radius of the handle drawn on a selected edge's vertex
    pub vertex_radius: f64,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            stroke: Color::BLACK,
            selected: Color::RED,
            node_fill: Color::NODE_FILL,
            font: Font::default(),
            vertex_radius: defaults::VERTEX_HIT_RADIUS,
        }
    }
}

impl Style {
    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke = color;
        self
    }

    pub fn with_selected(mut self, color: Color) -> Self {
        self.selected = color;
        self
    }

    pub fn with_node_fill(mut self, color: Color) -> Self {
        self.node_fill = color;
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }
}
