//! Pixel lookup primitives shared by the filters.
//!
//! - [`border`]: out-of-bounds policies (zero, clamp, cyclic-with-mirror) and
//!   the call-local [`BorderLut`] index tables.
//! - [`bilinear`]: fractional lookup and corner-aligned rescaling.

pub mod bilinear;
pub mod border;

pub use bilinear::{rescale_bilinear, BilinearSampler};
pub use border::{resolve, Border, BorderLut};
