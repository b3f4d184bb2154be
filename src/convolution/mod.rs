//! Full 2D and separable convolution with clamped (replicate) borders.
//!
//! Both entry points work on any channel layout and convolve each channel
//! independently. The separable path runs a horizontal pass into a scratch
//! raster followed by a vertical pass; per-axis clamped index tables are built
//! once per call.
//!
//! Complexity: O(W·H·C·(Kx+Ky)) for the separable path, O(W·H·C·Kx·Ky) for
//! the dense one.

pub mod kernels;

pub use kernels::{
    gaussian_kernel, gaussian_radius, GaussianOrder, Kernel1D, Kernel2D, SeparableFilter,
};

use crate::image::{ImageView, ImageViewMut, Raster};
use crate::resample::BorderLut;

/// Convolve rows with `kernel_x`, then columns with `kernel_y`.
pub fn convolve_separable<KX, KY>(src: &Raster, kernel_x: &KX, kernel_y: &KY) -> Raster
where
    KX: SeparableFilter + ?Sized,
    KY: SeparableFilter + ?Sized,
{
    if src.is_empty() {
        return src.clone();
    }
    let channels = src.channels();
    let (taps_x, anchor_x) = (kernel_x.taps(), kernel_x.anchor() as isize);
    let (taps_y, anchor_y) = (kernel_y.taps(), kernel_y.anchor() as isize);
    let lut_x = BorderLut::clamped(src.w, taps_x.len());
    let lut_y = BorderLut::clamped(src.h, taps_y.len());

    let mut horiz = Raster::new(src.w, src.h, src.layout);
    for y in 0..src.h {
        let src_row = src.row(y);
        let dst_row = horiz.row_mut(y);
        for x in 0..src.w {
            let out = &mut dst_row[x * channels..(x + 1) * channels];
            for (j, &tap) in taps_x.iter().enumerate() {
                if tap == 0.0 {
                    continue;
                }
                let sx = lut_x.get(x as isize + j as isize - anchor_x);
                let px = &src_row[sx * channels..(sx + 1) * channels];
                for (o, &v) in out.iter_mut().zip(px) {
                    *o += tap * v;
                }
            }
        }
    }

    let mut out = Raster::new(src.w, src.h, src.layout);
    for y in 0..src.h {
        let dst_row = out.row_mut(y);
        for (j, &tap) in taps_y.iter().enumerate() {
            if tap == 0.0 {
                continue;
            }
            let sy = lut_y.get(y as isize + j as isize - anchor_y);
            for (o, &v) in dst_row.iter_mut().zip(horiz.row(sy)) {
                *o += tap * v;
            }
        }
    }
    out
}

/// Dense 2D convolution.
///
/// Tap `(i, j)` weights the sample at `(x + i − anchor_x, y + j − anchor_y)`,
/// using the same anchor rule as the separable path.
pub fn convolve_2d(src: &Raster, kernel: &Kernel2D) -> Raster {
    if src.is_empty() {
        return src.clone();
    }
    let channels = src.channels();
    let anchor_x = (kernel.w - 1 - kernel.w / 2) as isize;
    let anchor_y = (kernel.h - 1 - kernel.h / 2) as isize;
    let lut_x = BorderLut::clamped(src.w, kernel.w);
    let lut_y = BorderLut::clamped(src.h, kernel.h);

    let mut out = Raster::new(src.w, src.h, src.layout);
    for y in 0..src.h {
        let dst_row = out.row_mut(y);
        for j in 0..kernel.h {
            let src_row = src.row(lut_y.get(y as isize + j as isize - anchor_y));
            for i in 0..kernel.w {
                let tap = kernel.at(i, j);
                if tap == 0.0 {
                    continue;
                }
                for x in 0..src.w {
                    let sx = lut_x.get(x as isize + i as isize - anchor_x);
                    let px = &src_row[sx * channels..(sx + 1) * channels];
                    let dst = &mut dst_row[x * channels..(x + 1) * channels];
                    for (o, &v) in dst.iter_mut().zip(px) {
                        *o += tap * v;
                    }
                }
            }
        }
    }
    out
}

/// Gaussian blur with radius `round(3·max(sigma, 1))`.
pub fn gaussian_blur(src: &Raster, sigma: f32) -> Raster {
    let kernel = gaussian_kernel(sigma, GaussianOrder::Smooth);
    convolve_separable(src, &kernel, &kernel)
}
