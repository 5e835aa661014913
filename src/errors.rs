//! Error types with diagnostic codes using miette
//!
//! Geometry never fails: degenerate shapes are resolved locally by the edge
//! code. These errors cover the diagram's public surface, where callers pass
//! ids and user-supplied numbers.

use miette::Diagnostic;
use thiserror::Error;

use crate::edge::EdgeId;
use crate::node::NodeId;
use crate::types::NumericError;

/// Errors returned by [`crate::Diagram`] and [`crate::Editor`] operations
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum DiagramError {
    #[error("unknown node: {id}")]
    #[diagnostic(
        code(statesketch::diagram::unknown_node),
        help("node ids are only valid for the diagram that created them")
    )]
    UnknownNode { id: NodeId },

    #[error("unknown edge: {id}")]
    #[diagnostic(
        code(statesketch::diagram::unknown_edge),
        help("edge ids are only valid for the diagram that created them")
    )]
    UnknownEdge { id: EdgeId },

    #[error("invalid node radius {value}")]
    #[diagnostic(
        code(statesketch::diagram::invalid_radius),
        help("a node radius must be a finite number greater than zero")
    )]
    InvalidRadius {
        value: f64,
        #[source]
        source: NumericError,
    },

    #[error("invalid position ({x}, {y})")]
    #[diagnostic(
        code(statesketch::diagram::invalid_position),
        help("coordinates must be finite")
    )]
    InvalidPosition { x: f64, y: f64 },
}

/// Result type alias for diagram operations
pub type DiagramResult<T> = Result<T, DiagramError>;
