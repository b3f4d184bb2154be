//! Bilinear lookup and rescaling with clamped borders.
//!
//! The sampler weights the four pixels around a fractional coordinate by the
//! opposite-corner areas. Coordinates follow the pixel-centre convention where
//! integer positions hit samples exactly.
use super::border::BorderLut;
use crate::image::{ImageViewMut, Raster};

/// Bilinear sampler bound to one source raster for one resampling pass.
pub struct BilinearSampler<'a> {
    src: &'a Raster,
    xs: BorderLut,
    ys: BorderLut,
}

impl<'a> BilinearSampler<'a> {
    pub fn new(src: &'a Raster) -> Self {
        Self {
            src,
            xs: BorderLut::clamped(src.w, 1),
            ys: BorderLut::clamped(src.h, 1),
        }
    }

    /// Write the interpolated pixel at `(fx, fy)` into `out`.
    ///
    /// Non-finite coordinates and empty sources produce a zero pixel.
    pub fn sample(&self, fx: f64, fy: f64, out: &mut [f32]) {
        out.fill(0.0);
        if !fx.is_finite() || !fy.is_finite() || self.src.is_empty() {
            return;
        }
        let x0 = fx.floor();
        let y0 = fy.floor();
        let (tx, ty) = (fx - x0, fy - y0);
        let (x0, y0) = (x0 as isize, y0 as isize);

        let taps = [
            (x0, y0, (1.0 - tx) * (1.0 - ty)),
            (x0 + 1, y0, tx * (1.0 - ty)),
            (x0, y0 + 1, (1.0 - tx) * ty),
            (x0 + 1, y0 + 1, tx * ty),
        ];
        for (x, y, weight) in taps {
            if weight == 0.0 {
                continue;
            }
            let px = self.src.pixel(self.xs.get(x), self.ys.get(y));
            for (o, &v) in out.iter_mut().zip(px) {
                *o += (weight as f32) * v;
            }
        }
    }
}

/// Resize by `factor` (e.g. `0.5` halves each side) with bilinear lookup.
///
/// The output is `round(w·factor) × round(h·factor)` (at least 1×1) and the
/// corner pixels of input and output are aligned: output `x` reads input
/// `x · (w − 1) / (w' − 1)`.
pub fn rescale_bilinear(src: &Raster, factor: f64) -> Raster {
    if src.is_empty() {
        return src.clone();
    }
    let nw = ((src.w as f64 * factor).round() as usize).max(1);
    let nh = ((src.h as f64 * factor).round() as usize).max(1);
    if nw == src.w && nh == src.h {
        return src.clone();
    }
    let scale_x = if nw > 1 {
        (src.w - 1) as f64 / (nw - 1) as f64
    } else {
        0.0
    };
    let scale_y = if nh > 1 {
        (src.h - 1) as f64 / (nh - 1) as f64
    } else {
        0.0
    };

    let sampler = BilinearSampler::new(src);
    let channels = src.channels();
    let mut out = Raster::new(nw, nh, src.layout);
    for y in 0..nh {
        let row = out.row_mut(y);
        for (x, px) in row.chunks_exact_mut(channels).enumerate() {
            sampler.sample(x as f64 * scale_x, y as f64 * scale_y, px);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ChannelLayout;

    fn ramp(w: usize, h: usize) -> Raster {
        Raster::from_fn(w, h, ChannelLayout::Gray, |x, y, px| {
            px[0] = (x + 10 * y) as f32 / 100.0
        })
    }

    #[test]
    fn integer_coordinates_hit_samples() {
        let img = ramp(5, 4);
        let sampler = BilinearSampler::new(&img);
        let mut out = [0.0f32];
        sampler.sample(3.0, 2.0, &mut out);
        assert!((out[0] - img.get(3, 2)).abs() < 1e-6);
    }

    #[test]
    fn midpoint_averages_neighbours() {
        let img = ramp(5, 4);
        let sampler = BilinearSampler::new(&img);
        let mut out = [0.0f32];
        sampler.sample(1.5, 1.5, &mut out);
        let expected = (img.get(1, 1) + img.get(2, 1) + img.get(1, 2) + img.get(2, 2)) / 4.0;
        assert!((out[0] - expected).abs() < 1e-6);
    }

    #[test]
    fn outside_reads_clamp() {
        let img = ramp(5, 4);
        let sampler = BilinearSampler::new(&img);
        let mut out = [0.0f32];
        sampler.sample(-3.0, 10.0, &mut out);
        assert!((out[0] - img.get(0, 3)).abs() < 1e-6);
    }

    #[test]
    fn halving_odd_sizes_picks_even_pixels() {
        let img = ramp(9, 7);
        let half = rescale_bilinear(&img, 0.5);
        // round(4.5) = 5, round(3.5) = 4 → scale 2
        assert_eq!((half.w, half.h), (5, 4));
        assert!((half.get(2, 1) - img.get(4, 2)).abs() < 1e-6);
    }
}
