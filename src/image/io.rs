//! I/O helpers for rasters and JSON.
//!
//! - `load_raster`: read a PNG/JPEG/BMP into an RGB raster with samples in `[0, 1]`.
//! - `save_raster`: write any raster view to disk, gray/RGB/RGBA by layout.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! The pipeline itself never touches the file system; these are used by the
//! binaries and the directory diagnostic sink.
use super::{ChannelLayout, ImageView, Raster};
use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk as an RGB raster.
pub fn load_raster(path: &Path) -> Result<Raster, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let (width, height) = (img.width() as usize, img.height() as usize);
    let data = img.into_raw().into_iter().map(|v| v as f32 / 255.0).collect();
    Raster::from_raw(width, height, ChannelLayout::Rgb, data)
        .ok_or_else(|| format!("Decoded buffer of {} has unexpected size", path.display()))
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Save a raster, clamping samples to `[0, 255]`.
pub fn save_raster<I: ImageView>(image: &I, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let (w, h) = (image.width() as u32, image.height() as u32);
    let bytes: Vec<u8> = image.rows().flat_map(|row| row.iter().map(|&v| to_u8(v))).collect();
    let dynamic = match image.layout() {
        ChannelLayout::Gray => ImageBuffer::<Luma<u8>, _>::from_raw(w, h, bytes)
            .map(DynamicImage::ImageLuma8),
        ChannelLayout::Rgb => {
            ImageBuffer::<Rgb<u8>, _>::from_raw(w, h, bytes).map(DynamicImage::ImageRgb8)
        }
        ChannelLayout::Rgba => {
            ImageBuffer::<Rgba<u8>, _>::from_raw(w, h, bytes).map(DynamicImage::ImageRgba8)
        }
    }
    .ok_or_else(|| "Failed to create image buffer".to_string())?;
    dynamic
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
