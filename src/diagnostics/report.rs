use super::TimingBreakdown;
use crate::image::Raster;
use crate::types::{Line, Quad};
use serde::Serialize;

/// Result of [`Dehighlighter::run`](crate::Dehighlighter::run).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DehighlightReport {
    /// Fused glare-free composite
    #[serde(skip)]
    pub output: Raster,
    pub width: usize,
    pub height: usize,
    pub images: Vec<ImageOutcome>,
    pub timings: TimingBreakdown,
}

impl DehighlightReport {
    /// Indices of the inputs that made it into the composite.
    pub fn merged_indices(&self) -> Vec<usize> {
        self.images
            .iter()
            .filter(|o| o.status.is_rectified())
            .map(|o| o.index)
            .collect()
    }
}

/// What happened to one input image.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOutcome {
    pub index: usize,
    pub status: ImageStatus,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ImageStatus {
    /// Boundary found; `width × height` is the size the quad asked for before
    /// all survivors were resampled to the common size.
    Rectified {
        corners: Quad,
        lines: Vec<Line>,
        width: usize,
        height: usize,
    },
    Rejected {
        reason: String,
    },
}

impl ImageStatus {
    pub fn is_rectified(&self) -> bool {
        matches!(self, ImageStatus::Rectified { .. })
    }
}
