//! Non‑maximum suppression on gradient magnitude with direction alignment.
//!
//! The continuous direction `atan2(gy, gx)` is snapped to the nearest of
//! 0°, 45°, 90° and 135° (modulo 180°). A pixel survives when its magnitude is
//! at least as large as both neighbours along that snapped direction:
//!
//! | bucket | neighbours                 |
//! |--------|----------------------------|
//! | 0°     | (x−1, y), (x+1, y)         |
//! | 45°    | (x+1, y+1), (x−1, y−1)     |
//! | 90°    | (x, y−1), (x, y+1)         |
//! | 135°   | (x+1, y−1), (x−1, y+1)     |
//!
//! Neighbours outside the image read as zero. Magnitudes below
//! [`MIN_MAGNITUDE`] never survive, so flat regions stay empty even when
//! floating-point residue leaves a tiny non-zero response.
use super::grad::Grad;
use crate::image::Raster;

/// Responses at or below this are treated as "no gradient".
pub const MIN_MAGNITUDE: f32 = 1e-6;

const DIRECTION_BUCKETS: [u8; 9] = [0, 1, 2, 3, 0, 1, 2, 3, 0];

/// Snap a direction in (−π, π] to 0 (0°), 1 (45°), 2 (90°) or 3 (135°).
#[inline]
pub fn quantize_direction(angle: f32) -> u8 {
    let k = (angle / std::f32::consts::PI * 4.0).round() as i32 + 4;
    DIRECTION_BUCKETS[k.clamp(0, 8) as usize]
}

#[inline]
fn neighbour_offsets(bucket: u8) -> [(isize, isize); 2] {
    match bucket {
        0 => [(-1, 0), (1, 0)],
        1 => [(1, 1), (-1, -1)],
        2 => [(0, -1), (0, 1)],
        _ => [(1, -1), (-1, 1)],
    }
}

/// Thin the gradient magnitude, returning a raster of surviving magnitudes.
pub fn non_maximum_suppression(grad: &Grad) -> Raster {
    let mag = &grad.mag;
    let (w, h) = (mag.w, mag.h);
    let mut out = Raster::gray(w, h);
    let read = |x: isize, y: isize| -> f32 {
        if mag.contains(x, y) {
            mag.get(x as usize, y as usize)
        } else {
            0.0
        }
    };

    for y in 0..h {
        for x in 0..w {
            let m = mag.get(x, y);
            if m <= MIN_MAGNITUDE {
                continue;
            }
            let bucket = quantize_direction(grad.dir.get(x, y));
            let keep = neighbour_offsets(bucket)
                .iter()
                .all(|&(dx, dy)| m >= read(x as isize + dx, y as isize + dy));
            if keep {
                out.set(x, y, m);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn quantization_folds_opposite_directions() {
        assert_eq!(quantize_direction(0.0), 0);
        assert_eq!(quantize_direction(PI), 0);
        assert_eq!(quantize_direction(-PI), 0);
        assert_eq!(quantize_direction(FRAC_PI_4), 1);
        assert_eq!(quantize_direction(-3.0 * FRAC_PI_4), 1);
        assert_eq!(quantize_direction(FRAC_PI_2), 2);
        assert_eq!(quantize_direction(-FRAC_PI_2), 2);
        assert_eq!(quantize_direction(3.0 * FRAC_PI_4), 3);
        assert_eq!(quantize_direction(0.3), 0);
    }

    #[test]
    fn ridge_keeps_only_its_crest() {
        // Horizontal gradient whose magnitude peaks at x = 3.
        let profile = [0.1f32, 0.3, 0.6, 1.0, 0.6, 0.3, 0.1];
        let w = profile.len();
        let mut grad = Grad {
            gx: Raster::gray(w, 3),
            gy: Raster::gray(w, 3),
            mag: Raster::gray(w, 3),
            dir: Raster::gray(w, 3),
        };
        for y in 0..3 {
            for (x, &m) in profile.iter().enumerate() {
                grad.gx.set(x, y, m);
                grad.mag.set(x, y, m);
            }
        }
        let out = non_maximum_suppression(&grad);
        for y in 0..3 {
            for x in 0..w {
                let expected = if x == 3 { 1.0 } else { 0.0 };
                assert_eq!(out.get(x, y), expected, "x={x} y={y}");
            }
        }
    }
}
