//! SVG output

use std::fmt::Write;

use crate::types::{BBox, Point};

use super::{Color, Font, Surface};

/// Margin added around the drawing's bounds
const MARGIN: f64 = 10.0;

/// A surface that accumulates SVG elements and wraps them in a document.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    body: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The elements drawn so far, without the enclosing `<svg>`
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Wrap the drawn elements in a standalone document sized to `bounds`
    /// plus a margin. An empty `bounds` yields a zero-sized canvas.
    pub fn finish(&self, bounds: &BBox) -> String {
        let (min, width, height) = if bounds.is_empty() {
            (Point::new(0.0, 0.0), 0.0, 0.0)
        } else {
            (
                Point::new(bounds.min.x - MARGIN, bounds.min.y - MARGIN),
                bounds.width() + 2.0 * MARGIN,
                bounds.height() + 2.0 * MARGIN,
            )
        };

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            fmt_num(width),
            fmt_num(height),
            fmt_num(min.x),
            fmt_num(min.y),
            fmt_num(width),
            fmt_num(height),
        );
        svg.push('\n');
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        self.body.clear();
    }

    fn draw_circle(&mut self, center: Point, radius: f64, stroke: &Color, fill: Option<&Color>) {
        let fill = fill.map_or("none", Color::as_str);
        let _ = writeln!(
            self.body,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" />"#,
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(radius),
            escape_xml(fill),
            escape_xml(stroke.as_str()),
        );
    }

    fn draw_quadratic_curve(&mut self, start: Point, control: Point, end: Point, stroke: &Color) {
        let _ = writeln!(
            self.body,
            r#"  <path d="M{},{} Q{},{} {},{}" fill="none" stroke="{}" />"#,
            fmt_num(start.x),
            fmt_num(start.y),
            fmt_num(control.x),
            fmt_num(control.y),
            fmt_num(end.x),
            fmt_num(end.y),
            escape_xml(stroke.as_str()),
        );
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Color) {
        let _ = writeln!(
            self.body,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" />"#,
            fmt_num(from.x),
            fmt_num(from.y),
            fmt_num(to.x),
            fmt_num(to.y),
            escape_xml(stroke.as_str()),
        );
    }

    fn draw_text(&mut self, text: &str, origin: Point, font: &Font, color: &Color) {
        let _ = writeln!(
            self.body,
            r#"  <text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" dominant-baseline="text-before-edge">{}</text>"#,
            fmt_num(origin.x),
            fmt_num(origin.y),
            escape_xml(&font.family),
            fmt_num(font.size),
            escape_xml(color.as_str()),
            escape_xml(text),
        );
    }
}

/// Format a number to 6 significant figures with trailing zeros trimmed,
/// like C's `%g`.
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (5 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", value, prec = decimals);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
