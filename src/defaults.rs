//! Default sizes and tuning constants (all in screen pixels)

use std::f64::consts::FRAC_PI_4;

/// Step sizes for the rim-crossing scan along t, coarsest first
pub const RIM_SEARCH_STEPS: [f64; 4] = [0.05, 0.01, 0.005, 0.001];
/// Bisection passes that polish the last rim-crossing bracket
pub const RIM_REFINE_ITERATIONS: u32 = 40;

/// Upper bound on passes that settle a dragged edge vertex onto the pointer
pub const VERTEX_SETTLE_ITERATIONS: u32 = 64;
/// Control point movement below which a vertex drag counts as settled
pub const VERTEX_SETTLE_TOLERANCE: f64 = 1e-9;

/// How far a point may be from a curve and still count as on it
pub const CURVE_HIT_TOLERANCE: f64 = 5.0;
/// Radius of the draggable handle drawn at an edge's vertex
pub const VERTEX_HIT_RADIUS: f64 = 5.0;

/// Length of the arrowhead's projected side before the 45 degree spread
pub const ARROW_SIDE: f64 = 7.0;
pub const ARROW_SPREAD: f64 = FRAC_PI_4;
/// Where along the visible curve the arrow direction is sampled
pub const ARROW_SAMPLE_T: f64 = 0.99;

/// Self-loop control point distance, in node radii
pub const LOOP_CONTROL_FACTOR: f64 = 4.0;
/// Self-loop control distance for the connect-tool preview, in node radii
pub const LOOP_PREVIEW_FACTOR: f64 = 3.0;

pub const LABEL_DEFAULT_T: f64 = 0.5;
pub const LABEL_SLIDE_STEP: f64 = 0.0001;
/// Derivative magnitude below which a label is centred with a lean
pub const LABEL_MID_ANCHOR_SPAN: f64 = 60.0;

pub const NODE_RADIUS: f64 = 30.0;
pub const FONT_SIZE: f64 = 14.0;
pub const FONT_FAMILY: &str = "sans-serif";
/// Line height as a multiple of the font size
pub const LINE_HEIGHT: f64 = 1.25;
/// Average character width relative to font size
pub const CHARWID_RATIO: f64 = 0.08 / 0.14;

pub const STROKE_COLOR: &str = "black";
pub const SELECTED_COLOR: &str = "red";
pub const NODE_FILL: &str = "#ebe9e9";

/// Distance of spawned nodes from the spawn anchor, in node radii
pub const SPAWN_RING_FACTOR: f64 = 3.0;
