//! Parameter types for the logo trim.
//!
//! [`TrimParams`] describes *what* the trim does; the pixel work lives in
//! [`operations`](super::operations). The defaults reproduce the cleanup the
//! storefront logo was designed around and can be overridden from the
//! `[logo]` config section.

/// Tunables for [`trim_image`](super::operations::trim_image).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimParams {
    /// Pixels whose red, green and blue are all at or below this become
    /// fully transparent.
    pub threshold: u8,
    /// Share of the bounding box height kept, measured from the top.
    pub keep_fraction: f64,
    /// Transparent margin added on every side of the crop.
    pub padding: u32,
}

impl Default for TrimParams {
    fn default() -> Self {
        Self {
            threshold: 36,
            keep_fraction: 0.63,
            padding: 12,
        }
    }
}
