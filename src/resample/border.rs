//! Out-of-bounds policies and call-local index tables.
use serde::{Deserialize, Serialize};

/// How reads outside the raster extent are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Border {
    /// Outside pixels read as zero.
    Zero,
    /// Coordinates clamp to the nearest edge pixel (replicate).
    Clamp,
    /// Both axes wrap; when exactly one axis wraps the y coordinate mirrors
    /// to `h - 1 - y`. Matches the `(θ, ρ)` → `(θ ± 180°, −ρ)` identity of a
    /// Hough accumulator whose x axis is the angle.
    CyclicMirror,
}

/// Map `(x, y)` to an in-bounds coordinate, `None` when the read is zero-filled.
#[inline]
pub fn resolve(x: isize, y: isize, w: usize, h: usize, border: Border) -> Option<(usize, usize)> {
    if w == 0 || h == 0 {
        return None;
    }
    let (wi, hi) = (w as isize, h as isize);
    let inside_x = (0..wi).contains(&x);
    let inside_y = (0..hi).contains(&y);
    match border {
        Border::Zero => (inside_x && inside_y).then_some((x as usize, y as usize)),
        Border::Clamp => Some((x.clamp(0, wi - 1) as usize, y.clamp(0, hi - 1) as usize)),
        Border::CyclicMirror => {
            let cx = x.rem_euclid(wi);
            let mut cy = y.rem_euclid(hi);
            if inside_x != inside_y {
                cy = hi - 1 - cy;
            }
            Some((cx as usize, cy as usize))
        }
    }
}

/// Clamped coordinate table for one axis, owned by the pass that builds it.
///
/// Covers `[-pad, len + pad)`; lookups further out saturate to the first or
/// last entry, which is the clamped answer anyway.
#[derive(Clone, Debug)]
pub struct BorderLut {
    pad: usize,
    table: Vec<usize>,
}

impl BorderLut {
    pub fn clamped(len: usize, pad: usize) -> Self {
        let max = len.saturating_sub(1) as isize;
        let table = (0..len + 2 * pad)
            .map(|i| (i as isize - pad as isize).clamp(0, max) as usize)
            .collect();
        Self { pad, table }
    }

    #[inline]
    pub fn get(&self, i: isize) -> usize {
        let last = self.table.len().saturating_sub(1) as isize;
        let k = (i + self.pad as isize).clamp(0, last);
        self.table[k as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_border_rejects_outside() {
        assert_eq!(resolve(-1, 0, 4, 4, Border::Zero), None);
        assert_eq!(resolve(3, 3, 4, 4, Border::Zero), Some((3, 3)));
    }

    #[test]
    fn clamp_border_replicates_edges() {
        assert_eq!(resolve(-5, 9, 4, 4, Border::Clamp), Some((0, 3)));
    }

    #[test]
    fn cyclic_mirror_flips_y_when_only_x_wraps() {
        // x wraps, y inside: y mirrors
        assert_eq!(resolve(-1, 1, 10, 5, Border::CyclicMirror), Some((9, 3)));
        assert_eq!(resolve(10, 0, 10, 5, Border::CyclicMirror), Some((0, 4)));
        // y wraps, x inside: wrapped y mirrors too
        assert_eq!(resolve(2, -1, 10, 5, Border::CyclicMirror), Some((2, 0)));
        // both wrap: plain torus
        assert_eq!(resolve(-1, -1, 10, 5, Border::CyclicMirror), Some((9, 4)));
    }

    #[test]
    fn lut_matches_clamp() {
        let lut = BorderLut::clamped(5, 2);
        for i in -10..15 {
            assert_eq!(lut.get(i), i.clamp(0, 4) as usize);
        }
    }
}
