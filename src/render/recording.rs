//! A surface that records draw calls as text

use crate::types::Point;

use super::{Color, Font, Surface};

/// Records every draw call as one line of text.
///
/// Coordinates are printed with one decimal, which keeps logs stable across
/// the last-bit noise of the geometry code.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<String>,
    clears: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// How many times the surface has been cleared
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// All recorded commands, one per line
    pub fn log(&self) -> String {
        self.commands.join("\n")
    }
}

fn pt(p: Point) -> String {
    format!("({:.1}, {:.1})", p.x, p.y)
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn draw_circle(&mut self, center: Point, radius: f64, stroke: &Color, fill: Option<&Color>) {
        let fill = fill.map_or_else(String::new, |c| format!(" fill {c}"));
        self.commands
            .push(format!("circle {} r={:.1} {stroke}{fill}", pt(center), radius));
    }

    fn draw_quadratic_curve(&mut self, start: Point, control: Point, end: Point, stroke: &Color) {
        self.commands.push(format!(
            "curve {} {} {} {stroke}",
            pt(start),
            pt(control),
            pt(end)
        ));
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Color) {
        self.commands
            .push(format!("line {} {} {stroke}", pt(from), pt(to)));
    }

    fn draw_text(&mut self, text: &str, origin: Point, font: &Font, color: &Color) {
        self.commands
            .push(format!("text {text:?} {} {font} {color}", pt(origin)));
    }
}
