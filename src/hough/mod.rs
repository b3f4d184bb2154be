//! Line voting in `(θ, ρ)` space and its helpers.
//!
//! - [`hough_forward`] accumulates weighted votes from an edge raster.
//! - [`mask_peaks`] keeps only cells that dominate their window.
//! - [`extract_peaks`] pulls the strongest cells out as [`Line`]s.
//! - [`hough_inverse`] redraws peaks as lines for inspection.
//!
//! The accumulator is a single-channel [`Raster`] whose x axis is the angle
//! bucket and whose y axis is the offset bucket. Bucket `i` stands for
//! `θ = (i·theta_scale − 90)°`, bucket `j` for `ρ = j·rho_scale − max_dist`.

mod accumulator;
mod inverse;
mod peaks;

pub use accumulator::hough_forward;
pub use inverse::hough_inverse;
pub use peaks::{extract_peaks, mask_peaks, HoughPeak};

use crate::image::Raster;
use crate::types::Line;
use serde::Deserialize;

/// Accumulator resolution and peak masking parameters.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct HoughOptions {
    /// Degrees per angle bucket.
    pub theta_scale: f64,
    /// Pixels per offset bucket.
    pub rho_scale: f64,
    /// Half-size of the peak masking window, in buckets.
    pub mask_radius: usize,
    /// A cell is masked when a window neighbour exceeds `value · mask_factor`.
    pub mask_factor: f32,
    /// Peaks below this normalized weight do not count as boundary lines.
    /// The strongest line always has weight 1.
    pub min_peak_weight: f32,
}

impl Default for HoughOptions {
    fn default() -> Self {
        Self {
            theta_scale: 1.0,
            rho_scale: 1.0,
            mask_radius: 30,
            mask_factor: 1.0,
            min_peak_weight: 0.1,
        }
    }
}

/// Vote accumulator together with the geometry it was built with.
#[derive(Clone, Debug)]
pub struct HoughSpace {
    /// Normalized votes, `theta buckets × rho buckets`
    pub votes: Raster,
    pub theta_scale: f64,
    pub rho_scale: f64,
    /// Diagonal of the voting image; offsets range over `[-max_dist, max_dist]`
    pub max_dist: f64,
}

impl HoughSpace {
    /// Number of angle buckets.
    #[inline]
    pub fn theta_buckets(&self) -> usize {
        self.votes.w
    }

    /// Number of offset buckets.
    #[inline]
    pub fn rho_buckets(&self) -> usize {
        self.votes.h
    }

    /// Angle of bucket `i` in radians.
    #[inline]
    pub fn theta_at(&self, i: usize) -> f64 {
        (i as f64 * self.theta_scale - 90.0).to_radians()
    }

    /// Line represented by cell `(i, j)`.
    pub fn line_at(&self, i: usize, j: usize) -> Line {
        Line {
            theta: self.theta_at(i),
            rho: j as f64 * self.rho_scale - self.max_dist,
        }
    }

    /// Same geometry with a fresh vote raster.
    pub(crate) fn with_votes(&self, votes: Raster) -> Self {
        Self {
            votes,
            theta_scale: self.theta_scale,
            rho_scale: self.rho_scale,
            max_dist: self.max_dist,
        }
    }

    /// Every non-zero cell as a peak, in row-major order.
    pub fn cells(&self) -> Vec<HoughPeak> {
        self.votes
            .coords()
            .filter_map(|(i, j)| {
                let weight = self.votes.get(i, j);
                (weight > 0.0).then(|| HoughPeak {
                    theta_idx: i,
                    rho_idx: j,
                    weight,
                    line: self.line_at(i, j),
                })
            })
            .collect()
    }
}
