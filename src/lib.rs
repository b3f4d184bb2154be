#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod types;

// Stage engines, public for tools and experiments.
pub mod convolution;
pub mod edges;
pub mod histogram;
pub mod homography;
pub mod hough;
pub mod quad;
pub mod resample;

// --- High-level re-exports -------------------------------------------------

// Main entry points: pipeline + results.
pub use crate::error::{DehighlightError, GeometryError};
pub use crate::pipeline::{DehighlightParams, Dehighlighter};
pub use crate::types::{Line, Point, Quad};

// Diagnostics returned by a run.
pub use crate::diagnostics::{DehighlightReport, DiagnosticSink, DiagnosticStage};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use dehighlight::prelude::*;
///
/// # fn main() -> Result<(), DehighlightError> {
/// let captures: Vec<Raster> = Vec::new(); // decoded elsewhere
/// let report = Dehighlighter::new(DehighlightParams::default()).run(&captures)?;
/// println!("{}x{} from {:?}", report.width, report.height, report.merged_indices());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ChannelLayout, Raster};
    pub use crate::{DehighlightError, DehighlightParams, DehighlightReport, Dehighlighter};
}
