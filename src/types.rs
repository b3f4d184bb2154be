use serde::{Deserialize, Serialize};

/// 2D point in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Line in normal form: `x·cos θ + y·sin θ = ρ`, `theta` in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub theta: f64,
    pub rho: f64,
}

/// Quadrilateral with corners ordered top-left, top-right, bottom-right,
/// bottom-left.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quad(pub [Point; 4]);

impl Quad {
    #[inline]
    pub fn corners(&self) -> &[Point; 4] {
        &self.0
    }

    /// Axis-aligned rectangle `(0,0)…(w−1,h−1)` in canonical order.
    pub fn rectangle(w: usize, h: usize) -> Self {
        let (r, b) = (w.saturating_sub(1) as f64, h.saturating_sub(1) as f64);
        Quad([
            Point::new(0.0, 0.0),
            Point::new(r, 0.0),
            Point::new(r, b),
            Point::new(0.0, b),
        ])
    }

    /// Multiply x and y of every corner by the given factors.
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Quad(self.0.map(|p| Point::new(p.x * sx, p.y * sy)))
    }
}
