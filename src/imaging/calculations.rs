//! Pure geometry for the logo trim.
//!
//! All functions here are pure and testable without any I/O or images.

/// Smallest axis-aligned rectangle enclosing the visible pixels.
///
/// Bounds are inclusive: a box with `left == right` is one pixel wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }

    /// A box collapsed to a single row or column is not worth cropping to.
    pub fn is_degenerate(&self) -> bool {
        self.top >= self.bottom || self.left >= self.right
    }
}

/// Calculate the crop region taken from a bounding box.
///
/// Width is the full box width. Height is `floor(box_height × keep_fraction)`,
/// never less than one pixel and never more than the box.
///
/// # Examples
/// ```
/// # use shopwindow::imaging::{BoundingBox, calculate_crop};
/// let bbox = BoundingBox { left: 10, top: 10, right: 109, bottom: 109 };
/// assert_eq!(calculate_crop(&bbox, 0.63), (100, 63));
/// ```
pub fn calculate_crop(bbox: &BoundingBox, keep_fraction: f64) -> (u32, u32) {
    let kept = (bbox.height() as f64 * keep_fraction).floor() as u32;
    (bbox.width(), kept.clamp(1, bbox.height()))
}

/// Largest canvas the trim will allocate, in pixels.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 26;

/// Output canvas size for a crop with `padding` on all four sides.
///
/// `None` when the size overflows `u32` or exceeds [`MAX_CANVAS_PIXELS`].
///
/// # Examples
/// ```
/// # use shopwindow::imaging::calculate_canvas;
/// assert_eq!(calculate_canvas((50, 63), 12), Some((74, 87)));
/// assert_eq!(calculate_canvas((50, 63), u32::MAX), None);
/// ```
pub fn calculate_canvas(crop: (u32, u32), padding: u32) -> Option<(u32, u32)> {
    let margin = padding.checked_mul(2)?;
    let width = crop.0.checked_add(margin)?;
    let height = crop.1.checked_add(margin)?;
    (u64::from(width) * u64::from(height) <= MAX_CANVAS_PIXELS).then_some((width, height))
}
