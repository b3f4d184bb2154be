//! Error types raised by the pipeline stages.
//!
//! Per-image failures ([`GeometryError`], undersized rectifications,
//! unsupported layouts) are recoverable at the batch level: the orchestrator
//! logs them and keeps going. [`DehighlightError::EmptyInput`] is the only
//! failure that aborts a whole run.

use crate::image::ChannelLayout;
use thiserror::Error;

/// Failures of the line → quadrilateral stage.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("expected {expected} boundary lines, found {found}")]
    NotEnoughLines { expected: usize, found: usize },

    #[error("could not find quadrangle (found {found} in-bounds corners)")]
    CornerCount { found: usize },

    #[error("corners do not form a convex quadrangle")]
    NonConvex,

    #[error("projective system is singular")]
    SingularHomography,
}

/// Top-level error type for the dehighlight pipeline.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DehighlightError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("found rect is too small: {width}x{height} covers less than half of {source_pixels} pixels")]
    UndersizedRectification {
        width: usize,
        height: usize,
        source_pixels: usize,
    },

    #[error("nothing to merge, no images extracted")]
    EmptyInput,

    #[error("{operation} does not support {layout:?} images")]
    UnsupportedImageType {
        operation: &'static str,
        layout: ChannelLayout,
    },

    #[error("parameter {name} = {value} is out of range, expected {expected}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("images differ in shape: expected {expected:?}, got {actual:?}")]
    MismatchedImages {
        expected: (usize, usize, ChannelLayout),
        actual: (usize, usize, ChannelLayout),
    },
}

/// Accept `value` when it is finite and inside `(0, max]`.
pub(crate) fn positive_at_most(
    name: &'static str,
    value: f64,
    max: f64,
    expected: &'static str,
) -> Result<f64, DehighlightError> {
    if value.is_finite() && value > 0.0 && value <= max {
        Ok(value)
    } else {
        Err(DehighlightError::InvalidParameter {
            name,
            value,
            expected,
        })
    }
}
