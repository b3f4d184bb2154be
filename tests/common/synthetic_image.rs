#![allow(dead_code)]

use dehighlight::image::{ChannelLayout, Raster};

pub const BACKGROUND: f32 = 0.1;
pub const BORDER: f32 = 0.5;
pub const PHOTO: f32 = 0.9;

/// Canvas and photo geometry used by most tests: a 256×192 photo on a
/// 321×241 canvas, corners on even coordinates so a 0.5 downscale lands
/// them exactly on detection pixels.
pub const CANVAS: (usize, usize) = (321, 241);
pub const PHOTO_RECT: (usize, usize, usize, usize) = (32, 24, 288, 216);

/// Expected corners of [`PHOTO_RECT`] in TL, TR, BR, BL order.
pub fn photo_corners() -> [(f64, f64); 4] {
    let (l, t, r, b) = PHOTO_RECT;
    [
        (l as f64, t as f64),
        (r as f64, t as f64),
        (r as f64, b as f64),
        (l as f64, b as f64),
    ]
}

/// Bright axis-aligned photo on a dark background.
///
/// The outline itself is mid-grey so the step is centred on one pixel and
/// the edge detector answers with a single-pixel line.
pub fn photo_on_background(
    width: usize,
    height: usize,
    rect: (usize, usize, usize, usize),
) -> Raster {
    photo_with_glare(width, height, rect, None)
}

/// Like [`photo_on_background`], plus a soft Gaussian highlight of height
/// `0.1` and sigma 15 px centred at `glare` inside the photo.
pub fn photo_with_glare(
    width: usize,
    height: usize,
    rect: (usize, usize, usize, usize),
    glare: Option<(f32, f32)>,
) -> Raster {
    let (l, t, r, b) = rect;
    Raster::from_fn(width, height, ChannelLayout::Rgb, |x, y, px| {
        let inside = l < x && x < r && t < y && y < b;
        let on_outline = ((x == l || x == r) && (t..=b).contains(&y))
            || ((y == t || y == b) && (l..=r).contains(&x));
        let mut v = if inside {
            PHOTO
        } else if on_outline {
            BORDER
        } else {
            BACKGROUND
        };
        if let (true, Some((cx, cy))) = (inside, glare) {
            let d2 = (x as f32 - cx).powi(2) + (y as f32 - cy).powi(2);
            v = (v + 0.1 * (-d2 / (2.0 * 15.0 * 15.0)).exp()).min(1.0);
        }
        px.fill(v);
    })
}

/// Corners of a `w × h` rectangle centred on `center` and rotated clockwise
/// on screen by `degrees`, in TL, TR, BR, BL order of the unrotated photo.
pub fn rotated_rect(center: (f64, f64), w: f64, h: f64, degrees: f64) -> [(f64, f64); 4] {
    let (s, c) = degrees.to_radians().sin_cos();
    [(-w, -h), (w, -h), (w, h), (-w, h)].map(|(dx, dy)| {
        let (dx, dy) = (dx / 2.0, dy / 2.0);
        (center.0 + c * dx - s * dy, center.1 + s * dx + c * dy)
    })
}

fn inside_convex(corners: &[(f64, f64); 4], x: f64, y: f64) -> bool {
    (0..4).all(|k| {
        let (ax, ay) = corners[k];
        let (bx, by) = corners[(k + 1) % 4];
        (bx - ax) * (y - ay) - (by - ay) * (x - ax) >= 0.0
    })
}

/// Photo bounded by the convex quad `corners` (TL, TR, BR, BL, clockwise on
/// screen) with no outline. Pixels are 4×4 supersampled, so slanted sides
/// blend over about one pixel the way a camera would blur them. Corners may
/// lie outside the canvas.
pub fn quad_photo(width: usize, height: usize, corners: [(f64, f64); 4]) -> Raster {
    const SUB: usize = 4;
    Raster::from_fn(width, height, ChannelLayout::Rgb, |x, y, px| {
        let mut covered = 0;
        for j in 0..SUB {
            for i in 0..SUB {
                let sx = x as f64 - 0.5 + (i as f64 + 0.5) / SUB as f64;
                let sy = y as f64 - 0.5 + (j as f64 + 0.5) / SUB as f64;
                if inside_convex(&corners, sx, sy) {
                    covered += 1;
                }
            }
        }
        let coverage = covered as f32 / (SUB * SUB) as f32;
        px.fill(BACKGROUND + coverage * (PHOTO - BACKGROUND));
    })
}

/// The default test photo.
pub fn default_photo() -> Raster {
    photo_on_background(CANVAS.0, CANVAS.1, PHOTO_RECT)
}

/// A canvas with nothing on it.
pub fn uniform(width: usize, height: usize, value: f32) -> Raster {
    Raster::from_fn(width, height, ChannelLayout::Rgb, |_, _, px| px.fill(value))
}
