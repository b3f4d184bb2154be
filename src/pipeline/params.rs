use crate::edges::CannyOptions;
use crate::error::{positive_at_most, DehighlightError};
use crate::histogram::DEFAULT_RESOLUTION;
use crate::hough::HoughOptions;
use serde::Deserialize;

/// Parameters of a dehighlight run.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DehighlightParams {
    /// Resize factor applied before boundary detection.
    pub downscale: f64,
    pub canny: CannyOptions,
    /// Window half-size for dense edge removal.
    pub edgy_radius: usize,
    /// Maximum edge share in the window; `None` picks `1/(2r+1) + 0.001`.
    pub edgy_fullness: Option<f32>,
    pub hough: HoughOptions,
    /// Buckets per channel for histogram matching.
    pub histogram_resolution: usize,
    /// Extract and rectify images on the rayon pool. Ignored without the
    /// `parallel` feature.
    pub parallel: bool,
}

impl Default for DehighlightParams {
    fn default() -> Self {
        Self {
            downscale: 0.5,
            canny: CannyOptions::default(),
            edgy_radius: 5,
            edgy_fullness: None,
            hough: HoughOptions::default(),
            histogram_resolution: DEFAULT_RESOLUTION,
            parallel: true,
        }
    }
}

impl DehighlightParams {
    /// Check every numeric field against the range the stages accept.
    ///
    /// Fails with [`DehighlightError::InvalidParameter`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), DehighlightError> {
        positive_at_most("downscale", self.downscale, 1.0, "a factor in (0, 1]")?;
        positive_at_most(
            "hough.theta_scale",
            self.hough.theta_scale,
            180.0,
            "degrees in (0, 180]",
        )?;
        positive_at_most(
            "hough.rho_scale",
            self.hough.rho_scale,
            f64::MAX,
            "a finite positive pixel count",
        )?;
        finite("hough.mask_factor", self.hough.mask_factor)?;
        if !(0.0..=1.0).contains(&self.hough.min_peak_weight) {
            return Err(DehighlightError::InvalidParameter {
                name: "hough.min_peak_weight",
                value: self.hough.min_peak_weight as f64,
                expected: "a weight in [0, 1]",
            });
        }
        finite("canny.sigma", self.canny.sigma)?;
        finite("canny.low_threshold", self.canny.low_threshold)?;
        finite("canny.high_threshold", self.canny.high_threshold)?;
        if let Some(fullness) = self.edgy_fullness {
            finite("edgy_fullness", fullness)?;
        }
        if self.histogram_resolution < 2 {
            return Err(DehighlightError::InvalidParameter {
                name: "histogram_resolution",
                value: self.histogram_resolution as f64,
                expected: "at least 2 buckets",
            });
        }
        Ok(())
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), DehighlightError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DehighlightError::InvalidParameter {
            name,
            value: value as f64,
            expected: "a finite number",
        })
    }
}
