//! Raster storage, channel layouts, row views and file I/O helpers.

pub mod io;
pub mod layout;
pub mod raster;
pub mod traits;

pub use self::layout::ChannelLayout;
pub use self::raster::{ensure_same_shape, Raster};
pub use self::traits::{ImageView, ImageViewMut, Rows};
