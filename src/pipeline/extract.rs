//! Per-image boundary extraction.
//!
//! downscale → Canny → dense edge removal → Hough → peak masking → 4 lines
//! → quad at full resolution → target size → quality gate.
//!
//! Everything here is private to one image, so extractions for different
//! images can run on different threads.
use super::DehighlightParams;
use crate::diagnostics::{elapsed_ms, DiagnosticSink, DiagnosticStage, StageTiming};
use crate::edges::{detect_edges, remove_edgy_regions};
use crate::error::{DehighlightError, GeometryError};
use crate::homography::{passes_quality_gate, target_size};
use crate::hough::{
    extract_peaks, hough_forward, hough_inverse, mask_peaks, HoughOptions, HoughPeak, HoughSpace,
};
use crate::image::Raster;
use crate::quad::{extract_quad, rescale_factors};
use crate::resample::rescale_bilinear;
use crate::types::{Line, Quad};
use log::{debug, info};
use std::time::Instant;

/// Number of boundary lines a photo is expected to have.
pub const BOUNDARY_LINES: usize = 4;

/// Boundary of one input image.
#[derive(Clone, Debug)]
pub struct Extraction {
    /// Corners in input-image coordinates
    pub quad: Quad,
    /// Lines at detection scale, in peak order
    pub lines: Vec<Line>,
    pub width: usize,
    pub height: usize,
    pub timings: Vec<StageTiming>,
}

/// Up to [`BOUNDARY_LINES`] masked peaks of `space`, strongest first.
///
/// Peaks weaker than `options.min_peak_weight` are dropped, so a photo with
/// a side missing yields three lines instead of a stray fourth one.
pub fn boundary_peaks(space: &HoughSpace, options: &HoughOptions) -> Vec<HoughPeak> {
    let masked = mask_peaks(space, options.mask_radius, options.mask_factor);
    extract_peaks(&masked, BOUNDARY_LINES)
        .into_iter()
        .take_while(|p| p.weight >= options.min_peak_weight)
        .collect()
}

/// Locate the photo in `image` and the size it rectifies to.
pub fn extract_photo_rect(
    image: &Raster,
    index: usize,
    params: &DehighlightParams,
    sink: Option<&dyn DiagnosticSink>,
) -> Result<Extraction, DehighlightError> {
    params.validate()?;
    if image.is_empty() {
        return Err(GeometryError::NotEnoughLines {
            expected: BOUNDARY_LINES,
            found: 0,
        }
        .into());
    }
    let mut timings = Vec::new();

    let start = Instant::now();
    let small = rescale_bilinear(image, params.downscale);
    timings.push(StageTiming::new("downscale", elapsed_ms(start)));

    let start = Instant::now();
    let edges = detect_edges(&small, &params.canny);
    let edges = remove_edgy_regions(&edges, params.edgy_radius, params.edgy_fullness);
    timings.push(StageTiming::new("edges", elapsed_ms(start)));
    info!("Image #{index}: computed Canny");
    if let Some(sink) = sink {
        sink.emit(index, DiagnosticStage::EdgeMap, &edges);
    }

    let start = Instant::now();
    let hough = &params.hough;
    let space = hough_forward(&edges, hough.theta_scale, hough.rho_scale)?;
    if let Some(sink) = sink {
        sink.emit(index, DiagnosticStage::HoughSpace, &space.votes);
    }
    let peaks = boundary_peaks(&space, hough);
    timings.push(StageTiming::new("hough", elapsed_ms(start)));
    debug!(
        "Image #{index}: peaks {:?}",
        peaks
            .iter()
            .map(|p| (p.theta_idx, p.rho_idx, p.weight))
            .collect::<Vec<_>>()
    );
    if let Some(sink) = sink {
        let unit: Vec<HoughPeak> = peaks
            .iter()
            .map(|p| HoughPeak { weight: 1.0, ..*p })
            .collect();
        sink.emit(
            index,
            DiagnosticStage::ReprojectedLines,
            &hough_inverse(&unit, small.w, small.h),
        );
    }
    if peaks.len() < BOUNDARY_LINES {
        return Err(GeometryError::NotEnoughLines {
            expected: BOUNDARY_LINES,
            found: peaks.len(),
        }
        .into());
    }

    let start = Instant::now();
    let lines: Vec<Line> = peaks.iter().map(|p| p.line).collect();
    let scale = rescale_factors((image.w, image.h), (small.w, small.h));
    let quad = extract_quad(&lines, small.w, small.h, scale)?;
    let (width, height) = target_size(&quad);
    timings.push(StageTiming::new("quad", elapsed_ms(start)));

    if !passes_quality_gate(width, height, image.pixel_count()) {
        return Err(DehighlightError::UndersizedRectification {
            width,
            height,
            source_pixels: image.pixel_count(),
        });
    }
    info!("Image #{index}: found rect {width}x{height}");
    Ok(Extraction {
        quad,
        lines,
        width,
        height,
        timings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faint_peaks_are_not_boundary_lines() {
        let mut votes = Raster::gray(180, 200);
        votes.set(0, 50, 1.0);
        votes.set(90, 120, 0.8);
        votes.set(45, 100, 0.6);
        votes.set(135, 20, 0.03);
        let space = HoughSpace {
            votes,
            theta_scale: 1.0,
            rho_scale: 1.0,
            max_dist: 100.0,
        };

        let weights: Vec<f32> = boundary_peaks(&space, &HoughOptions::default())
            .iter()
            .map(|p| p.weight)
            .collect();
        assert_eq!(weights, vec![1.0, 0.8, 0.6]);

        let everything = HoughOptions {
            min_peak_weight: 0.0,
            ..HoughOptions::default()
        };
        assert_eq!(boundary_peaks(&space, &everything).len(), 4);
    }
}
