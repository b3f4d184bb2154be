//! Canny edge detection and edge-map post-processing.
//!
//! This module provides the edge stage of the pipeline:
//!
//! - Gradient computation from separable Gaussian derivatives returning
//!   `gx`, `gy`, magnitude and direction ([`grad`]).
//! - Non‑maximum suppression along the gradient direction snapped to four
//!   buckets ([`nms`]).
//! - Double thresholding and stack-based hysteresis tracking ([`hysteresis`]).
//! - Removal of dense textured clusters that cannot be document borders
//!   ([`density`]).
//!
//! Design goals
//! - Outputs are single-channel rasters holding the surviving normalized
//!   magnitude, zero elsewhere, so they can be fed to the Hough stage as
//!   weights and dumped for inspection as-is.
//! - Borders replicate in the convolution and read as zero in NMS.

pub mod density;
pub mod grad;
pub mod hysteresis;
pub mod nms;

pub use density::{default_fullness, remove_edgy_regions};
pub use grad::{gaussian_gradients, gradient_magnitude, Grad};
pub use hysteresis::{double_threshold, track_edges};
pub use nms::non_maximum_suppression;

use crate::image::Raster;
use log::debug;
use serde::Deserialize;

/// Parameters of the Canny detector.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct CannyOptions {
    /// Gaussian scale; values below 1 are treated as 1.
    pub sigma: f32,
    /// Lower hysteresis threshold on the normalized response.
    pub low_threshold: f32,
    /// Upper hysteresis threshold on the normalized response.
    pub high_threshold: f32,
}

impl Default for CannyOptions {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            low_threshold: 0.1,
            high_threshold: 0.2,
        }
    }
}

/// Run Canny on the luma of `src`.
///
/// Returns a single-channel raster with the normalized magnitude of every
/// surviving edge pixel and zero elsewhere.
pub fn detect_edges(src: &Raster, options: &CannyOptions) -> Raster {
    let grad = gaussian_gradients(src, options.sigma);
    let mut thin = non_maximum_suppression(&grad);
    // Gray by construction, normalize cannot fail here.
    if thin.normalize().is_err() {
        return Raster::gray(src.w, src.h);
    }
    let (weak, mut strong) =
        double_threshold(&thin, options.low_threshold, options.high_threshold);
    track_edges(&weak, &mut strong);
    debug!(
        "Canny {}x{} sigma={:.2} edges={}",
        src.w,
        src.h,
        options.sigma,
        strong.data.iter().filter(|&&v| v > 0.0).count()
    );
    strong
}
