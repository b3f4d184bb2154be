//! Four-point homographies and projective rectification.
//!
//! A homography is a `Matrix3<f64>` normalized so that `H[(2,2)] = 1`. It is
//! solved from four correspondences with the direct linear transform, which
//! for exactly four points reduces to an 8×8 linear system.
use crate::error::{DehighlightError, GeometryError};
use crate::image::{ImageViewMut, Raster};
use crate::resample::BilinearSampler;
use crate::types::{Point, Quad};
use log::debug;
use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

const EPS: f64 = 1e-12;

/// Solve `H` with `H · from[i] ~ to[i]`, `None` when the system is singular.
pub fn solve_homography(from: &[Point; 4], to: &[Point; 4]) -> Option<Matrix3<f64>> {
    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();
    for (k, (p, q)) in from.iter().zip(to).enumerate() {
        let (r0, r1) = (2 * k, 2 * k + 1);
        a[(r0, 0)] = p.x;
        a[(r0, 1)] = p.y;
        a[(r0, 2)] = 1.0;
        a[(r0, 6)] = -p.x * q.x;
        a[(r0, 7)] = -p.y * q.x;
        b[r0] = q.x;

        a[(r1, 3)] = p.x;
        a[(r1, 4)] = p.y;
        a[(r1, 5)] = 1.0;
        a[(r1, 6)] = -p.x * q.y;
        a[(r1, 7)] = -p.y * q.y;
        b[r1] = q.y;
    }
    let h = a.lu().solve(&b)?;
    if h.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(Matrix3::new(
        h[0], h[1], h[2], //
        h[3], h[4], h[5], //
        h[6], h[7], 1.0,
    ))
}

/// Map a point through `h`, `None` at the line at infinity.
pub fn apply_homography(h: &Matrix3<f64>, p: &Point) -> Option<Point> {
    let v = h * Vector3::new(p.x, p.y, 1.0);
    let w = v[2];
    if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
        return None;
    }
    Some(Point::new(v[0] / w, v[1] / w))
}

/// Output size for a quad: rounded mean lengths of opposite edges.
pub fn target_size(quad: &Quad) -> (usize, usize) {
    let [p0, p1, p2, p3] = quad.corners();
    let w = ((p0.distance(p1) + p2.distance(p3)) / 2.0).round();
    let h = ((p0.distance(p3) + p1.distance(p2)) / 2.0).round();
    (w as usize, h as usize)
}

/// A rectification is kept when it covers at least half the source pixels.
#[inline]
pub fn passes_quality_gate(width: usize, height: usize, source_pixels: usize) -> bool {
    2 * width * height >= source_pixels
}

/// Resample the region bounded by `quad` into an upright `width × height`
/// raster with the same channel layout as `src`.
///
/// Output corners map onto the quad corners in order; every output pixel
/// samples the source bilinearly with clamped borders.
pub fn rectify(
    src: &Raster,
    quad: &Quad,
    width: usize,
    height: usize,
) -> Result<Raster, DehighlightError> {
    let target = Quad::rectangle(width, height);
    let h = solve_homography(target.corners(), quad.corners())
        .ok_or(GeometryError::SingularHomography)?;

    let sampler = BilinearSampler::new(src);
    let channels = src.channels();
    let mut out = Raster::new(width, height, src.layout);
    for y in 0..height {
        let row = out.row_mut(y);
        for (x, px) in row.chunks_exact_mut(channels).enumerate() {
            match apply_homography(&h, &Point::new(x as f64, y as f64)) {
                Some(p) => sampler.sample(p.x, p.y, px),
                None => px.fill(0.0),
            }
        }
    }
    debug!("rectified {}x{} -> {}x{}", src.w, src.h, width, height);
    Ok(out)
}
