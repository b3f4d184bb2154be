//! Cross-image tone alignment by histogram matching.
//!
//! All images are pooled into one reference distribution per channel. Each
//! image is then remapped through its own CDF followed by the inverse of the
//! pooled CDF, so equally ranked samples end up with equal values in every
//! image.
//!
//! CDFs are quantized: `resolution` buckets, counts scaled so the full CDF
//! spans `[0, resolution − 1]` and rounded to integers. The rounded count then
//! indexes the inverse table directly.
use crate::error::DehighlightError;
use crate::image::{ensure_same_shape, Raster};
use log::debug;

/// Default number of histogram buckets.
pub const DEFAULT_RESOLUTION: usize = 300;

/// Rounded cumulative counts of one channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelCdf {
    pub counts: Vec<usize>,
}

/// Bucket of a sample in `[0, 1]`; out-of-range and NaN samples clamp.
#[inline]
pub fn bucket_of(v: f32, resolution: usize) -> usize {
    let top = resolution.saturating_sub(1);
    let b = (v.clamp(0.0, 1.0) * top as f32).round();
    if b.is_nan() {
        0
    } else {
        (b as usize).min(top)
    }
}

/// Per-channel CDFs of the pooled samples of `images`.
///
/// Every image must have the channel count and pixel count of the first.
pub fn channel_cdfs(images: &[Raster], resolution: usize) -> Vec<ChannelCdf> {
    let Some(first) = images.first() else {
        return Vec::new();
    };
    let channels = first.channels();
    let mut hist = vec![vec![0f64; resolution]; channels];
    for img in images {
        for px in img.data.chunks_exact(channels) {
            for (c, &v) in px.iter().enumerate() {
                hist[c][bucket_of(v, resolution)] += 1.0;
            }
        }
    }

    let samples = (images.len() * first.pixel_count()).max(1);
    let scale = resolution.saturating_sub(1) as f64 / samples as f64;
    hist.into_iter()
        .map(|h| {
            let mut running = 0.0;
            let counts = h
                .iter()
                .enumerate()
                .map(|(i, &n)| {
                    // bucket 0 never contributes
                    if i > 0 {
                        running += n * scale;
                    }
                    running.round() as usize
                })
                .collect();
            ChannelCdf { counts }
        })
        .collect()
}

/// Inverse lookup: for each count, the smallest bucket `i ≥ 1` reaching it.
///
/// Counts no bucket reaches inherit the previous entry; entry 0 is 0.
pub fn invert_cdf(cdf: &ChannelCdf) -> Vec<usize> {
    let len = cdf.counts.len();
    let mut inverse: Vec<Option<usize>> = vec![None; len];
    for (i, &count) in cdf.counts.iter().enumerate().skip(1) {
        if let Some(slot) = inverse.get_mut(count) {
            slot.get_or_insert(i);
        }
    }
    let mut out = Vec::with_capacity(len);
    let mut prev = 0;
    for (c, slot) in inverse.into_iter().enumerate() {
        let v = if c == 0 { 0 } else { slot.unwrap_or(prev) };
        out.push(v);
        prev = v;
    }
    out
}

/// Remap every image in place onto the pooled tone distribution.
pub fn match_histograms(images: &mut [Raster], resolution: usize) -> Result<(), DehighlightError> {
    ensure_same_shape(images)?;
    if images.is_empty() {
        return Ok(());
    }
    let resolution = resolution.max(2);
    let top = (resolution - 1) as f32;

    let inverse: Vec<Vec<usize>> = channel_cdfs(images, resolution)
        .iter()
        .map(invert_cdf)
        .collect();

    for (k, img) in images.iter_mut().enumerate() {
        let own = channel_cdfs(std::slice::from_ref(img), resolution);
        let channels = img.channels();
        for px in img.data.chunks_exact_mut(channels) {
            for (c, v) in px.iter_mut().enumerate() {
                let count = own[c].counts[bucket_of(*v, resolution)].min(resolution - 1);
                *v = inverse[c][count] as f32 / top;
            }
        }
        debug!("histogram matched image #{k}");
    }
    Ok(())
}
