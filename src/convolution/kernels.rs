//! 1D and 2D kernels, including the sampled Gaussian family.
//!
//! Taps are stored in left-to-right order and applied as correlation weights:
//! tap `j` multiplies the sample at offset `j - anchor`, with
//! `anchor = len - 1 - len / 2` (the centre for odd lengths). This equals a
//! true convolution with the reversed kernel, so derivative kernels are built
//! already reversed and respond positively to rising intensity.

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order).
    fn taps(&self) -> &[f32];

    /// Offset of the output sample inside the tap window.
    fn anchor(&self) -> usize {
        let len = self.taps().len();
        len.saturating_sub(1) - len / 2
    }
}

/// Owned 1D kernel.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel1D {
    taps: Vec<f32>,
}

impl Kernel1D {
    pub fn new(taps: Vec<f32>) -> Self {
        Self { taps }
    }

    pub fn radius(&self) -> usize {
        self.taps.len() / 2
    }
}

impl SeparableFilter for Kernel1D {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

impl SeparableFilter for [f32] {
    #[inline]
    fn taps(&self) -> &[f32] {
        self
    }
}

/// Dense 2D kernel in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel2D {
    pub w: usize,
    pub h: usize,
    pub taps: Vec<f32>,
}

impl Kernel2D {
    pub fn new(w: usize, h: usize, taps: Vec<f32>) -> Option<Self> {
        (taps.len() == w * h && w > 0 && h > 0).then_some(Self { w, h, taps })
    }

    /// Outer product `column ⊗ row`.
    pub fn outer(row: &[f32], column: &[f32]) -> Self {
        let taps = column
            .iter()
            .flat_map(|&c| row.iter().map(move |&r| r * c))
            .collect();
        Self {
            w: row.len(),
            h: column.len(),
            taps,
        }
    }

    #[inline]
    pub fn at(&self, i: usize, j: usize) -> f32 {
        self.taps[j * self.w + i]
    }
}

/// Which member of the Gaussian family to sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GaussianOrder {
    Smooth,
    FirstDerivative,
    SecondDerivative,
}

/// Kernel radius used for a given sigma: `round(3·max(sigma, 1))`.
pub fn gaussian_radius(sigma: f32) -> usize {
    (3.0 * sigma.max(1.0)).round() as usize
}

/// Sampled (unnormalized) Gaussian or derivative on `[-r, r]`.
///
/// Sigma is clamped to at least 1 so small values never produce a degenerate
/// one-tap kernel.
pub fn gaussian_kernel(sigma: f32, order: GaussianOrder) -> Kernel1D {
    let sigma = sigma.max(1.0);
    let radius = gaussian_radius(sigma) as isize;
    let norm = 1.0 / (sigma * (2.0 * std::f32::consts::PI).sqrt());
    let s2 = sigma * sigma;
    let taps = (-radius..=radius)
        .map(|d| {
            let d = d as f32;
            let g = norm * (-(d * d) / (2.0 * s2)).exp();
            match order {
                GaussianOrder::Smooth => g,
                GaussianOrder::FirstDerivative => g * d / s2,
                GaussianOrder::SecondDerivative => g * (d * d - s2) / (s2 * s2),
            }
        })
        .collect();
    Kernel1D::new(taps)
}
