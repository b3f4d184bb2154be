//! Diagnostics data model returned by a dehighlight run.
//!
//! `DehighlightReport` is the main entry point returned by
//! [`Dehighlighter::run`](crate::Dehighlighter::run). It carries the fused
//! raster, what happened to every input and a timing trace. Intermediate
//! rasters are handed to an optional [`DiagnosticSink`] as they are produced.

pub mod report;
pub mod sink;
pub mod timing;

pub use report::{DehighlightReport, ImageOutcome, ImageStatus};
pub use sink::{DiagnosticSink, DiagnosticStage, DirectorySink};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
