//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the two operations that touch encoded
//! bytes: decode a file into an RGBA buffer and encode a buffer as PNG.
//! Everything in between is pure pixel work on [`RgbaImage`].
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image backends.
pub trait ImageBackend: Sync {
    /// Decode an image file into 8-bit RGBA, whatever its source format.
    fn decode(&self, path: &Path) -> Result<RgbaImage, BackendError>;

    /// Write `image` as a lossless PNG.
    fn encode_png(&self, image: &RgbaImage, path: &Path) -> Result<(), BackendError>;
}
