//! Image gradients from separable Gaussian-derivative filters.
//!
//! - Converts the input to luma.
//! - `gx = (g' along x) ∘ (g along y)`, `gy = (g along x) ∘ (g' along y)`,
//!   both with radius `round(3·max(σ, 1))` and replicated borders.
//! - Outputs per‑pixel `gx`, `gy`, `mag = hypot(gx, gy)` and the continuous
//!   direction `atan2(gy, gx)` in (−π, π].
//!
//! Complexity: O(W·H·r) per derivative; memory: four float buffers.
use crate::convolution::{convolve_separable, gaussian_kernel, GaussianOrder};
use crate::error::DehighlightError;
use crate::image::Raster;

/// Per‑pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative of the smoothed luma
    pub gx: Raster,
    /// Vertical derivative of the smoothed luma
    pub gy: Raster,
    /// Euclidean magnitude per pixel: `hypot(gx, gy)`
    pub mag: Raster,
    /// Gradient direction in radians, `atan2(gy, gx)`
    pub dir: Raster,
}

/// Compute Gaussian-derivative gradients of the luma of `src`.
pub fn gaussian_gradients(src: &Raster, sigma: f32) -> Grad {
    let gray = src.to_grayscale();
    let smooth = gaussian_kernel(sigma, GaussianOrder::Smooth);
    let deriv = gaussian_kernel(sigma, GaussianOrder::FirstDerivative);

    let gx = convolve_separable(&gray, &deriv, &smooth);
    let gy = convolve_separable(&gray, &smooth, &deriv);

    let mut mag = Raster::gray(gray.w, gray.h);
    let mut dir = Raster::gray(gray.w, gray.h);
    for (i, (&dx, &dy)) in gx.data.iter().zip(&gy.data).enumerate() {
        mag.data[i] = dx.hypot(dy);
        dir.data[i] = dy.atan2(dx);
    }

    Grad { gx, gy, mag, dir }
}

/// Normalized gradient magnitude of the luma of `src`.
pub fn gradient_magnitude(src: &Raster, sigma: f32) -> Result<Raster, DehighlightError> {
    let mut mag = gaussian_gradients(src, sigma).mag;
    mag.normalize()?;
    Ok(mag)
}
