//! Suppression of dense edge clusters.
//!
//! Document borders are thin isolated lines; textured regions (print, foliage,
//! fabric) produce edge maps that fill their neighbourhood. An edge pixel is
//! dropped when the share of edge pixels in its `(2r+1)²` window, counted
//! over the in-bounds part only, exceeds `fullness`. Counts come from a
//! summed-area table so each window costs O(1).
use crate::image::Raster;

/// Default fullness for a radius: a single straight line through the window
/// stays just below it.
///
/// Only one-pixel lines fit. A perfectly sharp step leaves a two-pixel NMS
/// ridge (both pixels of a symmetric pair tie), which lands above this limit
/// and is removed. Boundaries need at least a pixel of blur or antialiasing
/// to survive with the default.
pub fn default_fullness(radius: usize) -> f32 {
    1.0 / (2 * radius + 1) as f32 + 0.001
}

fn occupancy_table(edges: &Raster) -> Vec<u32> {
    let (w, h) = (edges.w, edges.h);
    let stride = w + 1;
    let mut table = vec![0u32; stride * (h + 1)];
    for y in 0..h {
        let mut row_sum = 0u32;
        for x in 0..w {
            if edges.get(x, y) > 0.0 {
                row_sum += 1;
            }
            table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + row_sum;
        }
    }
    table
}

/// Zero out edge pixels sitting in overly dense neighbourhoods.
pub fn remove_edgy_regions(edges: &Raster, radius: usize, fullness: Option<f32>) -> Raster {
    let fullness = fullness.unwrap_or_else(|| default_fullness(radius));
    let (w, h) = (edges.w, edges.h);
    let mut out = Raster::gray(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    let table = occupancy_table(edges);
    let stride = w + 1;

    for y in 0..h {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius).min(h - 1) + 1;
        for x in 0..w {
            let v = edges.get(x, y);
            if v <= 0.0 {
                continue;
            }
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius).min(w - 1) + 1;
            let count = table[y1 * stride + x1] + table[y0 * stride + x0]
                - table[y0 * stride + x1]
                - table[y1 * stride + x0];
            let pixels = ((x1 - x0) * (y1 - y0)) as f32;
            if count as f32 / pixels <= fullness {
                out.set(x, y, v);
            }
        }
    }
    out
}
