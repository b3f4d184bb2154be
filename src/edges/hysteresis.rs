//! Double thresholding and hysteresis edge tracking.
//!
//! Weak responses (`low ≤ v < high`) survive only when they are 8-connected,
//! possibly through other weak pixels, to a strong response (`v ≥ high`).
//! Tracking uses an explicit work stack and a visited bitmap, so long edge
//! chains never grow the call stack.
use crate::image::Raster;

const NEIGHBOURS_8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Split a normalized response into `(weak, strong)` rasters.
pub fn double_threshold(response: &Raster, low: f32, high: f32) -> (Raster, Raster) {
    let mut weak = Raster::gray(response.w, response.h);
    let mut strong = Raster::gray(response.w, response.h);
    for (i, &v) in response.data.iter().enumerate() {
        if v >= high {
            strong.data[i] = v;
        } else if v >= low {
            weak.data[i] = v;
        }
    }
    (weak, strong)
}

/// Promote weak pixels connected to strong ones; `strong` is updated in place.
pub fn track_edges(weak: &Raster, strong: &mut Raster) {
    let (w, h) = (strong.w, strong.h);
    let mut visited = vec![false; w * h];
    let mut stack: Vec<usize> = Vec::new();

    for seed in 0..w * h {
        if visited[seed] || strong.data[seed] <= 0.0 {
            continue;
        }
        visited[seed] = true;
        stack.push(seed);

        while let Some(i) = stack.pop() {
            let (x, y) = ((i % w) as isize, (i / w) as isize);
            for (dx, dy) in NEIGHBOURS_8 {
                let (nx, ny) = (x + dx, y + dy);
                if !strong.contains(nx, ny) {
                    continue;
                }
                let j = ny as usize * w + nx as usize;
                if visited[j] {
                    continue;
                }
                if strong.data[j] <= 0.0 && weak.data[j] > 0.0 {
                    strong.data[j] = weak.data[j];
                    visited[j] = true;
                    stack.push(j);
                }
            }
        }
    }
}
