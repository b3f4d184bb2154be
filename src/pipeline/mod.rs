//! Multi-capture glare removal.
//!
//! Pipeline stages:
//! - Extraction: each input independently yields its photo boundary and the
//!   size that boundary rectifies to ([`extract`]). Failures are recorded per
//!   image and never stop the batch.
//! - Common size: rounded mean of the surviving target sizes.
//! - Rectification of every survivor to the common size.
//! - Histogram matching across survivors when there is more than one.
//! - Per-pixel minimum fusion ([`merge`]).
//!
//! With the `parallel` feature, extraction and rectification run on the
//! rayon pool; the common size is only computed once all extractions are in.

pub mod extract;
pub mod merge;
pub mod params;

pub use extract::{boundary_peaks, extract_photo_rect, Extraction, BOUNDARY_LINES};
pub use merge::fuse_minimum;
pub use params::DehighlightParams;

use crate::diagnostics::{
    elapsed_ms, DehighlightReport, DiagnosticSink, DiagnosticStage, ImageOutcome, ImageStatus,
    TimingBreakdown,
};
use crate::error::DehighlightError;
use crate::histogram::match_histograms;
use crate::homography::rectify;
use crate::image::{ChannelLayout, Raster};
use log::{info, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::time::Instant;

/// Runs the glare-removal pipeline over a batch of captures of one photo.
pub struct Dehighlighter<'a> {
    params: DehighlightParams,
    sink: Option<&'a dyn DiagnosticSink>,
}

impl<'a> Dehighlighter<'a> {
    pub fn new(params: DehighlightParams) -> Self {
        Self { params, sink: None }
    }

    /// Attach a receiver for intermediate rasters.
    pub fn with_sink(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn params(&self) -> &DehighlightParams {
        &self.params
    }

    /// Fuse `images` into one glare-free raster.
    ///
    /// Fails with [`DehighlightError::InvalidParameter`] before touching any
    /// image when the parameters are out of range, and with
    /// [`DehighlightError::EmptyInput`] when no image yields a usable
    /// boundary. All inputs must share the channel layout of the first
    /// one; others are rejected individually.
    pub fn run(&self, images: &[Raster]) -> Result<DehighlightReport, DehighlightError> {
        let total_start = Instant::now();
        self.params.validate()?;
        let layout = images.first().ok_or(DehighlightError::EmptyInput)?.layout;
        let mut timings = TimingBreakdown::default();

        let start = Instant::now();
        let attempts = self.extract_all(images, layout);
        timings.push("extract", elapsed_ms(start));

        let mut outcomes = Vec::with_capacity(images.len());
        let mut survivors = Vec::new();
        for (index, attempt) in attempts.into_iter().enumerate() {
            match attempt {
                Ok(extraction) => {
                    for stage in &extraction.timings {
                        timings.push(format!("image{index}.{}", stage.label), stage.elapsed_ms);
                    }
                    survivors.push((index, extraction));
                }
                Err(err) => {
                    warn!("Image #{index}: {err}");
                    outcomes.push(rejected(index, &err));
                }
            }
        }
        if survivors.is_empty() {
            return Err(DehighlightError::EmptyInput);
        }

        let (width, height) = common_size(&survivors);
        info!(
            "Rectifying {} of {} images to {width}x{height}",
            survivors.len(),
            images.len()
        );

        let start = Instant::now();
        let crops = self.rectify_all(images, &survivors, width, height);
        timings.push("rectify", elapsed_ms(start));

        let mut rectified = Vec::with_capacity(crops.len());
        for ((index, extraction), crop) in survivors.into_iter().zip(crops) {
            match crop {
                Ok(raster) => {
                    if let Some(sink) = self.sink {
                        sink.emit(index, DiagnosticStage::Rectified, &raster);
                    }
                    outcomes.push(ImageOutcome {
                        index,
                        status: ImageStatus::Rectified {
                            corners: extraction.quad,
                            lines: extraction.lines,
                            width: extraction.width,
                            height: extraction.height,
                        },
                    });
                    rectified.push(raster);
                }
                Err(err) => {
                    warn!("Image #{index}: {err}");
                    outcomes.push(rejected(index, &err));
                }
            }
        }
        outcomes.sort_by_key(|o| o.index);

        if rectified.len() > 1 {
            let start = Instant::now();
            match_histograms(&mut rectified, self.params.histogram_resolution)?;
            timings.push("histogram", elapsed_ms(start));
        }

        let start = Instant::now();
        let output = fuse_minimum(&rectified)?;
        timings.push("merge", elapsed_ms(start));
        timings.total_ms = elapsed_ms(total_start);
        info!(
            "Merged {} images into {width}x{height} in {:.1} ms",
            rectified.len(),
            timings.total_ms
        );

        Ok(DehighlightReport {
            output,
            width,
            height,
            images: outcomes,
            timings,
        })
    }

    fn attempt(
        &self,
        index: usize,
        image: &Raster,
        layout: ChannelLayout,
    ) -> Result<Extraction, DehighlightError> {
        if image.layout != layout {
            return Err(DehighlightError::UnsupportedImageType {
                operation: "dehighlight",
                layout: image.layout,
            });
        }
        extract_photo_rect(image, index, &self.params, self.sink)
    }

    fn extract_all(
        &self,
        images: &[Raster],
        layout: ChannelLayout,
    ) -> Vec<Result<Extraction, DehighlightError>> {
        #[cfg(feature = "parallel")]
        {
            if self.params.parallel {
                return images
                    .par_iter()
                    .enumerate()
                    .map(|(index, image)| self.attempt(index, image, layout))
                    .collect();
            }
        }
        images
            .iter()
            .enumerate()
            .map(|(index, image)| self.attempt(index, image, layout))
            .collect()
    }

    fn rectify_all(
        &self,
        images: &[Raster],
        survivors: &[(usize, Extraction)],
        width: usize,
        height: usize,
    ) -> Vec<Result<Raster, DehighlightError>> {
        let one = |(index, extraction): &(usize, Extraction)| {
            rectify(&images[*index], &extraction.quad, width, height)
        };
        #[cfg(feature = "parallel")]
        {
            if self.params.parallel {
                return survivors.par_iter().map(one).collect();
            }
        }
        survivors.iter().map(one).collect()
    }
}

fn rejected(index: usize, err: &DehighlightError) -> ImageOutcome {
    ImageOutcome {
        index,
        status: ImageStatus::Rejected {
            reason: err.to_string(),
        },
    }
}

/// Rounded mean of the target sizes.
fn common_size(survivors: &[(usize, Extraction)]) -> (usize, usize) {
    let n = survivors.len().max(1) as f64;
    let (sw, sh) = survivors
        .iter()
        .fold((0usize, 0usize), |(w, h), (_, e)| (w + e.width, h + e.height));
    ((sw as f64 / n).round() as usize, (sh as f64 / n).round() as usize)
}
