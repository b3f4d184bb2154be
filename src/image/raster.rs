//! Owned multi-channel f32 raster in row-major, interleaved layout.
//!
//! Samples are normalized to `[0, 1]`. Pixel `(x, y)` occupies
//! `data[(y * w + x) * channels..][..channels]` and rows are tightly packed,
//! so a row is a contiguous slice of `w * channels` samples.
use super::layout::{luma, ChannelLayout};
use crate::error::DehighlightError;

#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Channel arrangement of every pixel
    pub layout: ChannelLayout,
    /// Backing storage, `w * h * channels` samples
    pub data: Vec<f32>,
}

impl Raster {
    /// Construct a zero-initialized raster of size `w × h`.
    pub fn new(w: usize, h: usize, layout: ChannelLayout) -> Self {
        Self {
            w,
            h,
            layout,
            data: vec![0.0; w * h * layout.channels()],
        }
    }

    /// Single-channel zero raster.
    pub fn gray(w: usize, h: usize) -> Self {
        Self::new(w, h, ChannelLayout::Gray)
    }

    /// Wrap an existing buffer, `None` when its length does not match.
    pub fn from_raw(w: usize, h: usize, layout: ChannelLayout, data: Vec<f32>) -> Option<Self> {
        (data.len() == w * h * layout.channels()).then_some(Self { w, h, layout, data })
    }

    /// Build a raster by filling every pixel in row-major order.
    pub fn from_fn<F>(w: usize, h: usize, layout: ChannelLayout, mut f: F) -> Self
    where
        F: FnMut(usize, usize, &mut [f32]),
    {
        let mut out = Self::new(w, h, layout);
        let channels = layout.channels();
        if channels == 0 || w == 0 {
            return out;
        }
        for (i, px) in out.data.chunks_exact_mut(channels).enumerate() {
            f(i % w, i / w, px);
        }
        out
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.w * self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h
    }

    #[inline]
    /// Convert (x, y) to the index of the pixel's first sample.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        (y * self.w + x) * self.channels()
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[f32] {
        let i = self.idx(x, y);
        &self.data[i..i + self.channels()]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [f32] {
        let i = self.idx(x, y);
        let c = self.channels();
        &mut self.data[i..i + c]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, px: &[f32]) {
        self.pixel_mut(x, y).copy_from_slice(px);
    }

    #[inline]
    /// First-channel sample at (x, y); the natural accessor for gray rasters.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// `(w, h, layout)`, the part of a raster two images must share to be
    /// combined pixel by pixel.
    #[inline]
    pub fn shape(&self) -> (usize, usize, ChannelLayout) {
        (self.w, self.h, self.layout)
    }

    /// All `(x, y)` pairs in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> {
        let (w, h) = (self.w, self.h);
        (0..h).flat_map(move |y| (0..w).map(move |x| (x, y)))
    }

    /// Luma conversion; gray inputs are copied unchanged.
    pub fn to_grayscale(&self) -> Raster {
        if self.layout == ChannelLayout::Gray {
            return self.clone();
        }
        let data = self.data.chunks_exact(self.channels()).map(luma).collect();
        Raster {
            w: self.w,
            h: self.h,
            layout: ChannelLayout::Gray,
            data,
        }
    }

    /// Stretch a single-channel raster to `[0, 1]` by its min/max.
    ///
    /// A constant raster becomes all zeros.
    pub fn normalize(&mut self) -> Result<(), DehighlightError> {
        if self.layout != ChannelLayout::Gray {
            return Err(DehighlightError::UnsupportedImageType {
                operation: "normalize",
                layout: self.layout,
            });
        }
        let (min, max) = self
            .data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let range = max - min;
        if !range.is_finite() || range <= 0.0 {
            self.data.fill(0.0);
            return Ok(());
        }
        for v in &mut self.data {
            *v = (*v - min) / range;
        }
        Ok(())
    }

    /// Largest sample and its flat index, `None` for an empty raster.
    pub fn argmax(&self) -> Option<(usize, f32)> {
        self.data
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((i, v)),
            })
    }
}

/// Check that every raster has the shape of the first one.
pub fn ensure_same_shape(images: &[Raster]) -> Result<(), DehighlightError> {
    let Some(first) = images.first() else {
        return Ok(());
    };
    let expected = first.shape();
    match images.iter().map(Raster::shape).find(|s| *s != expected) {
        Some(actual) => Err(DehighlightError::MismatchedImages { expected, actual }),
        None => Ok(()),
    }
}

impl crate::image::traits::ImageView for Raster {
    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn layout(&self) -> ChannelLayout {
        self.layout
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let len = self.w * self.channels();
        let start = y * len;
        &self.data[start..start + len]
    }
}

impl crate::image::traits::ImageViewMut for Raster {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let len = self.w * self.channels();
        let start = y * len;
        &mut self.data[start..start + len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_layout_is_interleaved() {
        let mut img = Raster::new(3, 2, ChannelLayout::Rgb);
        img.set_pixel(2, 1, &[0.1, 0.2, 0.3]);
        assert_eq!(img.data.len(), 18);
        assert_eq!(&img.data[15..18], &[0.1, 0.2, 0.3]);
        assert_eq!(img.pixel(2, 1), &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        assert!(Raster::from_raw(2, 2, ChannelLayout::Rgba, vec![0.0; 15]).is_none());
        assert!(Raster::from_raw(2, 2, ChannelLayout::Rgba, vec![0.0; 16]).is_some());
    }

    #[test]
    fn grayscale_uses_luma_weights() {
        let img = Raster::from_fn(1, 1, ChannelLayout::Rgb, |_, _, px| {
            px.copy_from_slice(&[1.0, 0.0, 0.0])
        });
        let gray = img.to_grayscale();
        assert_eq!(gray.layout, ChannelLayout::Gray);
        assert!((gray.get(0, 0) - 0.21).abs() < 1e-6);
    }

    #[test]
    fn normalize_rejects_color_and_zeroes_constant() {
        let mut rgb = Raster::new(2, 2, ChannelLayout::Rgb);
        assert!(matches!(
            rgb.normalize(),
            Err(DehighlightError::UnsupportedImageType { .. })
        ));

        let mut flat = Raster::from_fn(4, 4, ChannelLayout::Gray, |_, _, px| px[0] = 0.4);
        flat.normalize().unwrap();
        assert!(flat.data.iter().all(|&v| v == 0.0));

        let mut ramp = Raster::from_fn(5, 1, ChannelLayout::Gray, |x, _, px| {
            px[0] = 2.0 + x as f32
        });
        ramp.normalize().unwrap();
        assert_eq!(ramp.get(0, 0), 0.0);
        assert_eq!(ramp.get(4, 0), 1.0);
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let images = [
            Raster::gray(2, 2),
            Raster::gray(2, 2),
            Raster::new(2, 2, ChannelLayout::Rgb),
        ];
        assert_eq!(
            ensure_same_shape(&images),
            Err(DehighlightError::MismatchedImages {
                expected: (2, 2, ChannelLayout::Gray),
                actual: (2, 2, ChannelLayout::Rgb),
            })
        );
        assert!(ensure_same_shape(&images[..2]).is_ok());
    }

    #[test]
    fn coords_are_row_major() {
        let img = Raster::gray(2, 2);
        let coords: Vec<_> = img.coords().collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
