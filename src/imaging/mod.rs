//! Logo image cleanup in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` → RGBA8 |
//! | **Mask** | in-place alpha edit over `RgbaImage::pixels_mut` |
//! | **Bounding box** | full scan of `enumerate_pixels` |
//! | **Crop + pad** | `GenericImageView::view` + `imageops::replace` |
//! | **Encode** | `PngEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop geometry (unit testable)
//! - **Parameters**: Threshold, kept height share and padding
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Pixel passes and the best-effort [`trim_logo`]

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{BoundingBox, MAX_CANVAS_PIXELS, calculate_canvas, calculate_crop};
pub(crate) use operations::is_same_file;
pub use operations::{
    TrimOutcome, TrimSkip, compose_trimmed, find_bounding_box, mask_near_black, trim_image,
    trim_logo,
};
pub use params::TrimParams;
pub use rust_backend::RustBackend;
