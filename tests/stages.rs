mod common;

use common::synthetic_image::default_photo;
use dehighlight::edges::{detect_edges, remove_edgy_regions, CannyOptions};
use dehighlight::histogram::match_histograms;
use dehighlight::homography::{rectify, target_size};
use dehighlight::hough::{extract_peaks, hough_forward, hough_inverse, mask_peaks};
use dehighlight::image::{ChannelLayout, Raster};
use dehighlight::quad::{extract_quad, rescale_factors};
use dehighlight::resample::rescale_bilinear;
use dehighlight::types::Line;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn detection_edges() -> (Raster, Raster) {
    let small = rescale_bilinear(&default_photo(), 0.5);
    let edges = detect_edges(&small, &CannyOptions::default());
    (small, remove_edgy_regions(&edges, 5, None))
}

#[test]
fn edges_hug_the_outline() {
    init_logger();
    let (small, edges) = detection_edges();
    assert_eq!((small.w, small.h), (161, 121));

    let mut count = 0;
    for (x, y) in edges.coords() {
        if edges.get(x, y) <= 0.0 {
            continue;
        }
        count += 1;
        let near = |v: usize, target: usize| v.abs_diff(target) <= 1;
        assert!(
            near(x, 16) || near(x, 144) || near(y, 12) || near(y, 108),
            "stray edge at ({x}, {y})"
        );
    }
    // Four sides minus the dense corner neighbourhoods.
    assert!(count > 300, "only {count} edge pixels");
}

#[test]
fn four_strongest_lines_are_the_sides() {
    init_logger();
    let (small, edges) = detection_edges();
    let space = hough_forward(&edges, 1.0, 1.0).unwrap();
    let masked = mask_peaks(&space, 30, 1.0);
    let peaks = extract_peaks(&masked, 4);
    assert_eq!(peaks.len(), 4);

    let mut lines: Vec<Line> = peaks.iter().map(|p| p.line).collect();
    lines.sort_by(|a, b| a.theta.total_cmp(&b.theta).then(a.rho.total_cmp(&b.rho)));
    let expected = [(-90.0, -108.0), (-90.0, -12.0), (0.0, 16.0), (0.0, 144.0)];
    for (line, (theta, rho)) in lines.iter().zip(expected) {
        assert!((line.theta.to_degrees() - theta).abs() < 1e-9, "{line:?}");
        assert!((line.rho - rho).abs() <= 0.5, "{line:?}");
    }

    let drawn = hough_inverse(&peaks, small.w, small.h);
    assert!(drawn.get(16, 60) > 0.0);
    assert!(drawn.get(80, 108) > 0.0);
    assert_eq!(drawn.get(80, 60), 0.0);
}

#[test]
fn lines_to_rectified_photo() {
    init_logger();
    let img = default_photo();
    let (small, edges) = detection_edges();
    let space = hough_forward(&edges, 1.0, 1.0).unwrap();
    let peaks = extract_peaks(&mask_peaks(&space, 30, 1.0), 4);
    let lines: Vec<Line> = peaks.iter().map(|p| p.line).collect();

    let scale = rescale_factors((img.w, img.h), (small.w, small.h));
    let quad = extract_quad(&lines, small.w, small.h, scale).unwrap();
    let (w, h) = target_size(&quad);
    let crop = rectify(&img, &quad, w, h).unwrap();

    // Away from the outline the crop is pure photo body.
    for y in 4..h - 4 {
        for x in 4..w - 4 {
            assert!((crop.get(x, y) - 0.9).abs() < 1e-5, "({x}, {y})");
        }
    }
}

#[test]
fn tone_matching_pulls_captures_together() {
    init_logger();
    let ramp = |gain: f32| {
        Raster::from_fn(64, 8, ChannelLayout::Rgb, move |x, _, px| {
            px.fill(gain * x as f32 / 63.0)
        })
    };
    let mut images = vec![ramp(0.6), ramp(1.0)];
    let before = (images[1].get(63, 0) - images[0].get(63, 0)).abs();
    match_histograms(&mut images, 300).unwrap();
    let after = (images[1].get(63, 0) - images[0].get(63, 0)).abs();
    assert!(after < before, "{after} >= {before}");
    // Order is preserved within each image.
    for img in &images {
        for x in 1..64 {
            assert!(img.get(x, 0) >= img.get(x - 1, 0));
        }
    }
}
