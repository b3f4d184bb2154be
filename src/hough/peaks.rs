use super::HoughSpace;
use crate::image::Raster;
use crate::resample::{resolve, Border};
use crate::types::Line;
use serde::Serialize;

/// One accumulator maximum and the line it stands for.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoughPeak {
    pub theta_idx: usize,
    pub rho_idx: usize,
    pub weight: f32,
    pub line: Line,
}

fn dominated(votes: &Raster, x: usize, y: usize, radius: usize, limit: f32) -> bool {
    let r = radius as isize;
    let (cx, cy) = (x as isize, y as isize);
    for j in cy - r..=cy + r {
        for i in cx - r..=cx + r {
            if let Some((sx, sy)) = resolve(i, j, votes.w, votes.h, Border::CyclicMirror) {
                if votes.get(sx, sy) > limit {
                    return true;
                }
            }
        }
    }
    false
}

/// Keep only cells that no window neighbour exceeds by `mask_factor`.
///
/// The window wraps around the angle axis and mirrors the offset axis, since
/// `(θ + 180°, −ρ)` is the same line as `(θ, ρ)`.
pub fn mask_peaks(space: &HoughSpace, radius: usize, mask_factor: f32) -> HoughSpace {
    let votes = &space.votes;
    let mut out = Raster::gray(votes.w, votes.h);
    for (x, y) in votes.coords() {
        let v = votes.get(x, y);
        if v > 0.0 && !dominated(votes, x, y, radius, v * mask_factor) {
            out.set(x, y, v);
        }
    }
    space.with_votes(out)
}

/// Take up to `count` global maxima, zeroing each one after it is taken.
///
/// Stops early once the remaining maximum is zero.
pub fn extract_peaks(space: &HoughSpace, count: usize) -> Vec<HoughPeak> {
    let mut votes = space.votes.clone();
    let mut peaks = Vec::with_capacity(count);
    while peaks.len() < count {
        let Some((k, weight)) = votes.argmax() else {
            break;
        };
        if weight <= 0.0 {
            break;
        }
        votes.data[k] = 0.0;
        let (i, j) = (k % votes.w, k / votes.w);
        peaks.push(HoughPeak {
            theta_idx: i,
            rho_idx: j,
            weight,
            line: space.line_at(i, j),
        });
    }
    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(w: usize, h: usize) -> HoughSpace {
        HoughSpace {
            votes: Raster::gray(w, h),
            theta_scale: 1.0,
            rho_scale: 1.0,
            max_dist: 50.0,
        }
    }

    #[test]
    fn weaker_neighbour_is_masked() {
        let mut s = space(180, 100);
        s.votes.set(40, 40, 1.0);
        s.votes.set(42, 41, 0.8);
        s.votes.set(120, 60, 0.3);
        let masked = mask_peaks(&s, 3, 1.0);
        assert_eq!(masked.votes.get(40, 40), 1.0);
        assert_eq!(masked.votes.get(42, 41), 0.0);
        assert_eq!(masked.votes.get(120, 60), 0.3);
    }

    #[test]
    fn masking_wraps_and_mirrors_across_angle_seam() {
        let mut s = space(180, 100);
        s.votes.set(0, 30, 0.5);
        s.votes.set(179, 69, 1.0);
        let masked = mask_peaks(&s, 2, 1.0);
        assert_eq!(masked.votes.get(0, 30), 0.0);
        assert_eq!(masked.votes.get(179, 69), 1.0);
    }

    #[test]
    fn extraction_is_ordered_and_stops_at_zero() {
        let mut s = space(180, 100);
        s.votes.set(10, 70, 0.4);
        s.votes.set(100, 20, 0.9);
        let peaks = extract_peaks(&s, 4);
        assert_eq!(peaks.len(), 2);
        assert_eq!((peaks[0].theta_idx, peaks[0].rho_idx), (100, 20));
        assert_eq!(peaks[0].weight, 0.9);
        assert_eq!((peaks[1].theta_idx, peaks[1].rho_idx), (10, 70));
        assert!((peaks[0].line.rho - (20.0 - 50.0)).abs() < 1e-12);
        assert!((peaks[0].line.theta - 10f64.to_radians()).abs() < 1e-12);
        // source untouched
        assert_eq!(s.votes.get(100, 20), 0.9);
    }

    #[test]
    fn cells_list_mask_survivors_row_major() {
        let mut s = space(180, 100);
        s.votes.set(40, 40, 1.0);
        s.votes.set(42, 41, 0.8);
        s.votes.set(120, 60, 0.3);
        s.votes.set(5, 10, 0.6);
        let survivors = mask_peaks(&s, 3, 1.0).cells();
        let at: Vec<_> = survivors.iter().map(|p| (p.theta_idx, p.rho_idx)).collect();
        assert_eq!(at, vec![(5, 10), (40, 40), (120, 60)]);
        assert_eq!(survivors[2].weight, 0.3);
        assert!((survivors[2].line.theta - 30f64.to_radians()).abs() < 1e-12);
        assert!((survivors[2].line.rho - 10.0).abs() < 1e-12);
        assert!(space(8, 8).cells().is_empty());
    }
}
