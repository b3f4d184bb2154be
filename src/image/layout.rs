use serde::{Deserialize, Serialize};

/// Interleaved channel arrangement of a [`Raster`](super::Raster).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelLayout {
    Gray,
    Rgb,
    Rgba,
}

impl ChannelLayout {
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }
}

/// Luma weights applied to the R, G and B samples.
pub const LUMA_WEIGHTS: [f32; 3] = [0.21, 0.72, 0.07];

#[inline]
pub fn luma(px: &[f32]) -> f32 {
    LUMA_WEIGHTS[0] * px[0] + LUMA_WEIGHTS[1] * px[1] + LUMA_WEIGHTS[2] * px[2]
}
