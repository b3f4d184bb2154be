use super::HoughPeak;
use crate::image::Raster;

/// Draw each peak as a full line over a `width × height` canvas.
///
/// Steep lines (`|cos θ| ≥ 0.5`) are walked along y, the rest along x, so
/// consecutive cells stay connected. Weights add up where lines cross.
pub fn hough_inverse(peaks: &[HoughPeak], width: usize, height: usize) -> Raster {
    let mut out = Raster::gray(width, height);
    for peak in peaks {
        let (s, c) = peak.line.theta.sin_cos();
        let rho = peak.line.rho;
        if c.abs() >= 0.5 {
            for y in 0..height {
                let x = ((rho - y as f64 * s) / c).round() as isize;
                if out.contains(x, y as isize) {
                    let v = out.get(x as usize, y);
                    out.set(x as usize, y, v + peak.weight);
                }
            }
        } else {
            for x in 0..width {
                let y = ((rho - x as f64 * c) / s).round() as isize;
                if out.contains(x as isize, y) {
                    let v = out.get(x, y as usize);
                    out.set(x, y as usize, v + peak.weight);
                }
            }
        }
    }
    out
}
