use crate::error::DehighlightError;
use crate::image::{ensure_same_shape, Raster};

/// Per-pixel, per-channel minimum over equally shaped rasters.
///
/// Glare only ever brightens a capture, so the darkest observation of each
/// sample is the one least affected by it.
pub fn fuse_minimum(images: &[Raster]) -> Result<Raster, DehighlightError> {
    let (first, rest) = images.split_first().ok_or(DehighlightError::EmptyInput)?;
    ensure_same_shape(images)?;
    let mut out = first.clone();
    for img in rest {
        for (o, &v) in out.data.iter_mut().zip(&img.data) {
            *o = o.min(v);
        }
    }
    Ok(out)
}
