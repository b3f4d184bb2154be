//! From four boundary lines to an ordered quadrilateral.
//!
//! The four lines are intersected pairwise; the intersections that fall inside
//! the detection image are the corners. Corners are put into
//! top-left, top-right, bottom-right, bottom-left order, checked for
//! convexity, and mapped back to full input resolution.
use crate::error::GeometryError;
use crate::types::{Line, Point, Quad};
use log::debug;

/// Determinants below this are treated as parallel lines.
pub const PARALLEL_EPS: f64 = 1e-4;

/// Intersection of two lines in normal form.
///
/// Parallel (or nearly parallel) lines yield a point at infinity, which
/// fails any bounds check downstream.
pub fn intersect(l1: &Line, l2: &Line) -> Point {
    let (b1, a1) = l1.theta.sin_cos();
    let (b2, a2) = l2.theta.sin_cos();
    let (c1, c2) = (l1.rho, l2.rho);

    let det = a2 * b1 - a1 * b2;
    if det.abs() < PARALLEL_EPS {
        return Point::new(f64::INFINITY, f64::INFINITY);
    }
    Point::new((b1 * c2 - b2 * c1) / det, (a2 * c1 - a1 * c2) / det)
}

fn cross(o: &Point, a: &Point, b: &Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// True when the corners, taken in order, turn the same way at every vertex.
pub fn is_convex(corners: &[Point; 4]) -> bool {
    let turns: Vec<f64> = (0..4)
        .map(|i| cross(&corners[i], &corners[(i + 1) % 4], &corners[(i + 2) % 4]))
        .collect();
    turns.iter().all(|&t| t > 0.0) || turns.iter().all(|&t| t < 0.0)
}

/// Order four points as top-left, top-right, bottom-right, bottom-left.
///
/// The point nearest the origin is taken as top-left and the farthest as
/// bottom-right; of the two in between, the upper one is top-right.
pub fn order_corners(mut pts: [Point; 4]) -> [Point; 4] {
    pts.sort_by(|a, b| a.x.hypot(a.y).total_cmp(&b.x.hypot(b.y)));
    if pts[1].y > pts[2].y {
        pts.swap(1, 2);
    }
    pts.swap(2, 3);
    pts
}

/// Build the quadrilateral bounded by four lines detected on a
/// `width × height` image, scaled by `scale = (sx, sy)` to the input size.
pub fn extract_quad(
    lines: &[Line],
    width: usize,
    height: usize,
    scale: (f64, f64),
) -> Result<Quad, GeometryError> {
    if lines.len() != 4 {
        return Err(GeometryError::NotEnoughLines {
            expected: 4,
            found: lines.len(),
        });
    }
    let mut sorted = lines.to_vec();
    sorted.sort_by(|a, b| a.theta.total_cmp(&b.theta));

    let (max_x, max_y) = (
        width.saturating_sub(1) as f64,
        height.saturating_sub(1) as f64,
    );
    let corners: Vec<Point> = (0..4)
        .flat_map(|i| (i + 1..4).map(move |j| (i, j)))
        .map(|(i, j)| intersect(&sorted[i], &sorted[j]))
        .filter(|p| p.is_finite() && (0.0..=max_x).contains(&p.x) && (0.0..=max_y).contains(&p.y))
        .collect();

    let corners: [Point; 4] = corners
        .try_into()
        .map_err(|found: Vec<Point>| GeometryError::CornerCount { found: found.len() })?;
    let ordered = order_corners(corners);
    if !is_convex(&ordered) {
        return Err(GeometryError::NonConvex);
    }
    debug!("quad corners at detection scale: {:?}", ordered);
    Ok(Quad(ordered).scaled(scale.0, scale.1))
}

/// Factors mapping detection-image coordinates onto the input image.
pub fn rescale_factors(full: (usize, usize), small: (usize, usize)) -> (f64, f64) {
    let ratio = |big: usize, little: usize| {
        if little > 1 {
            (big.saturating_sub(1)) as f64 / (little - 1) as f64
        } else {
            1.0
        }
    };
    (ratio(full.0, small.0), ratio(full.1, small.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(theta_deg: f64, rho: f64) -> Line {
        Line {
            theta: theta_deg.to_radians(),
            rho,
        }
    }

    fn rectangle_lines() -> Vec<Line> {
        // x = 8, x = 72, y = 6, y = 54
        vec![
            line(0.0, 72.0),
            line(-90.0, -6.0),
            line(0.0, 8.0),
            line(-90.0, -54.0),
        ]
    }

    #[test]
    fn intersect_axis_lines() {
        let p = intersect(&line(0.0, 8.0), &line(-90.0, -6.0));
        assert!((p.x - 8.0).abs() < 1e-9 && (p.y - 6.0).abs() < 1e-9);
    }

    #[test]
    fn intersect_oblique_lines_is_exact() {
        let (l1, l2) = (line(30.0, 20.0), line(100.0, 15.0));
        let p = intersect(&l1, &l2);
        for l in [l1, l2] {
            let (s, c) = l.theta.sin_cos();
            assert!((p.x * c + p.y * s - l.rho).abs() < 1e-9);
        }
    }

    #[test]
    fn parallel_lines_meet_at_infinity() {
        let p = intersect(&line(0.0, 8.0), &line(0.0, 72.0));
        assert!(!p.is_finite());
    }

    #[test]
    fn rectangle_corners_are_ordered_and_scaled() {
        let quad = extract_quad(&rectangle_lines(), 81, 61, (2.0, 2.0)).unwrap();
        let expected = [(16.0, 12.0), (144.0, 12.0), (144.0, 108.0), (16.0, 108.0)];
        for (p, (ex, ey)) in quad.corners().iter().zip(expected) {
            assert!((p.x - ex).abs() < 1e-6 && (p.y - ey).abs() < 1e-6, "{p:?}");
        }
    }

    #[test]
    fn wrong_line_count_is_rejected() {
        let err = extract_quad(&rectangle_lines()[..3], 81, 61, (1.0, 1.0)).unwrap_err();
        assert_eq!(
            err,
            GeometryError::NotEnoughLines {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn parallel_fourth_line_leaves_three_corners() {
        let mut lines = rectangle_lines();
        lines[3] = line(0.0, 40.0);
        let err = extract_quad(&lines, 81, 61, (1.0, 1.0)).unwrap_err();
        assert_eq!(err, GeometryError::CornerCount { found: 3 });
    }

    #[test]
    fn crossing_corners_are_not_convex() {
        let bowtie = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ];
        assert!(!is_convex(&bowtie));
        assert!(is_convex(&Quad::rectangle(11, 11).0));
    }

    #[test]
    fn rescale_maps_last_pixel_to_last_pixel() {
        assert_eq!(rescale_factors((161, 121), (81, 61)), (2.0, 2.0));
        assert_eq!(rescale_factors((5, 5), (1, 1)), (1.0, 1.0));
    }
}
