//! Error types, one enum per concern.

use thiserror::Error;

/// Precondition violations on a single cell.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CellError {
    #[error("cell has no boundary segments")]
    NoSegments,
    #[error("cell geometry is not finite")]
    NonFinite,
    #[error("cell is degenerate (zero area or fewer than 3 usable edges)")]
    Degenerate,
}

/// Invalid lattice parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatticeError {
    #[error("invalid lattice params: {reason}")]
    InvalidParams { reason: String },
}

impl LatticeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

/// Failures of the diagram-builder adapter.
#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("invalid bounding region {0:?}")]
    InvalidRegion(crate::geom::BoundingRegion),
    #[error("site {index} is not finite")]
    NonFiniteSite { index: usize },
    #[error("triangulation failed: {0:?}")]
    Triangulation(spade::InsertionError),
}

/// Errors from the end-to-end lattice → diagram → analysis pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Lattice(#[from] LatticeError),
    #[error(transparent)]
    Diagram(#[from] DiagramError),
}
