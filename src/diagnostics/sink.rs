use crate::image::io::save_raster;
use crate::image::Raster;
use log::warn;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Intermediate rasters a run can hand out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticStage {
    /// Canny output after dense-region removal, at detection scale
    EdgeMap,
    /// Normalized Hough accumulator before peak masking
    HoughSpace,
    /// The four selected lines drawn back onto the detection image
    ReprojectedLines,
    /// Per-image crop at the common output size, before tone matching
    Rectified,
}

impl DiagnosticStage {
    pub fn label(self) -> &'static str {
        match self {
            DiagnosticStage::EdgeMap => "canny",
            DiagnosticStage::HoughSpace => "hough",
            DiagnosticStage::ReprojectedLines => "reverse",
            DiagnosticStage::Rectified => "rectified",
        }
    }
}

impl fmt::Display for DiagnosticStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receiver for intermediate rasters. Called from worker threads.
pub trait DiagnosticSink: Sync {
    fn emit(&self, image_index: usize, stage: DiagnosticStage, raster: &Raster);
}

/// Writes every diagnostic raster as `<stage>-<index>.png` into a directory.
///
/// Write failures are logged and otherwise ignored.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, String> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create debug dir {}: {e}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, image_index: usize, stage: DiagnosticStage) -> PathBuf {
        self.dir.join(format!("{}-{}.png", stage.label(), image_index))
    }
}

impl DiagnosticSink for DirectorySink {
    fn emit(&self, image_index: usize, stage: DiagnosticStage, raster: &Raster) {
        let path = self.path_for(image_index, stage);
        if let Err(err) = save_raster(raster, &path) {
            warn!("Image #{image_index}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_stage_and_index() {
        let sink = DirectorySink {
            dir: PathBuf::from("debug"),
        };
        assert_eq!(
            sink.path_for(3, DiagnosticStage::HoughSpace),
            PathBuf::from("debug").join("hough-3.png")
        );
        assert_eq!(DiagnosticStage::EdgeMap.to_string(), "canny");
    }
}
