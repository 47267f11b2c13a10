//! Logo trim operations.
//!
//! The trim runs in passes over one owned RGBA buffer:
//!
//! 1. [`mask_near_black`] clears alpha on near-black pixels (in place).
//! 2. [`find_bounding_box`] scans the masked buffer for visible pixels.
//! 3. [`compose_trimmed`] copies the top share of the box onto a padded,
//!    transparent canvas.
//!
//! [`trim_image`] chains the passes; [`trim_logo`] adds decoding and PNG
//! output through an [`ImageBackend`] and never fails: anything that goes
//! wrong leaves the original logo in place.

use super::backend::ImageBackend;
use super::calculations::{BoundingBox, calculate_canvas, calculate_crop};
use super::params::TrimParams;
use image::{GenericImageView, RgbaImage, imageops};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Make every pixel whose red, green and blue are all `<= threshold` fully
/// transparent. Other pixels are left untouched.
pub fn mask_near_black(image: &mut RgbaImage, threshold: u8) {
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if r <= threshold && g <= threshold && b <= threshold {
            pixel.0[3] = 0;
        }
    }
}

/// Bounding box of all pixels with non-zero alpha.
///
/// Returns `None` when nothing is visible or the visible area collapses to
/// a single row or column.
pub fn find_bounding_box(image: &RgbaImage) -> Option<BoundingBox> {
    let mut found: Option<BoundingBox> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] == 0 {
            continue;
        }
        found = Some(match found {
            None => BoundingBox {
                left: x,
                top: y,
                right: x,
                bottom: y,
            },
            Some(b) => BoundingBox {
                left: b.left.min(x),
                top: b.top.min(y),
                right: b.right.max(x),
                bottom: b.bottom.max(y),
            },
        });
    }
    found.filter(|b| !b.is_degenerate())
}

/// Copy the kept part of `bbox` onto a transparent canvas, offset by the
/// padding.
///
/// `None` when the padded canvas would be too large to allocate.
pub fn compose_trimmed(
    source: &RgbaImage,
    bbox: &BoundingBox,
    params: &TrimParams,
) -> Option<RgbaImage> {
    let (crop_w, crop_h) = calculate_crop(bbox, params.keep_fraction);
    let (canvas_w, canvas_h) = calculate_canvas((crop_w, crop_h), params.padding)?;

    let region = source.view(bbox.left, bbox.top, crop_w, crop_h).to_image();
    let mut canvas = RgbaImage::new(canvas_w, canvas_h);
    imageops::replace(
        &mut canvas,
        &region,
        i64::from(params.padding),
        i64::from(params.padding),
    );
    Some(canvas)
}

/// Why [`trim_image`] produced nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrimSkip {
    #[error("no visible content after masking")]
    NothingVisible,
    #[error("{padding}px padding makes the canvas too large")]
    CanvasTooLarge { padding: u32 },
}

/// Run the whole trim on a decoded image.
///
/// On error the caller keeps the original.
pub fn trim_image(mut image: RgbaImage, params: &TrimParams) -> Result<RgbaImage, TrimSkip> {
    mask_near_black(&mut image, params.threshold);
    let bbox = find_bounding_box(&image).ok_or(TrimSkip::NothingVisible)?;
    tracing::debug!(?bbox, "logo bounding box");
    compose_trimmed(&image, &bbox, params).ok_or(TrimSkip::CanvasTooLarge {
        padding: params.padding,
    })
}

/// Whether both paths resolve to the same existing file.
pub(crate) fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Result of a best-effort [`trim_logo`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrimOutcome {
    /// The trimmed PNG was written.
    Trimmed { width: u32, height: u32 },
    /// Nothing was written; the original should be displayed.
    Unchanged { reason: String },
}

/// Decode `source`, trim it and write the result to `output` as PNG.
///
/// Never returns an error or panics: decode failures, images with no visible
/// content, oversized padding and write failures are logged and reported as
/// [`TrimOutcome::Unchanged`]. An `output` that resolves to `source` is
/// refused so the original is never overwritten.
pub fn trim_logo(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    params: &TrimParams,
) -> TrimOutcome {
    let unchanged = |reason: String| {
        tracing::warn!(source = %source.display(), %reason, "failed to process logo image");
        TrimOutcome::Unchanged { reason }
    };

    if is_same_file(source, output) {
        return unchanged("output path is the source logo itself".to_string());
    }

    let image = match backend.decode(source) {
        Ok(image) => image,
        Err(e) => return unchanged(e.to_string()),
    };

    let trimmed = match trim_image(image, params) {
        Ok(trimmed) => trimmed,
        Err(skip) => return unchanged(skip.to_string()),
    };

    if let Err(e) = backend.encode_png(&trimmed, output) {
        return unchanged(e.to_string());
    }

    tracing::info!(
        output = %output.display(),
        width = trimmed.width(),
        height = trimmed.height(),
        "logo trimmed"
    );
    TrimOutcome::Trimmed {
        width: trimmed.width(),
        height: trimmed.height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::{BLACK, NEAR_BLACK, WHITE, framed_image};
    use image::Rgba;

    // =========================================================================
    // mask_near_black
    // =========================================================================

    #[test]
    fn mask_clears_alpha_at_threshold() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([36, 36, 36, 255]));
        mask_near_black(&mut image, 36);
        assert_eq!(image.get_pixel(0, 0).0, [36, 36, 36, 0]);
    }

    #[test]
    fn mask_keeps_pixel_with_one_bright_channel() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([10, 37, 10, 255]));
        mask_near_black(&mut image, 36);
        assert_eq!(image.get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn mask_leaves_color_channels_alone() {
        let mut image = RgbaImage::from_pixel(2, 1, NEAR_BLACK);
        mask_near_black(&mut image, 36);
        assert_eq!(image.get_pixel(1, 0).0, [30, 36, 12, 0]);
    }

    #[test]
    fn mask_respects_custom_threshold() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([50, 50, 50, 255]));
        mask_near_black(&mut image, 36);
        assert_eq!(image.get_pixel(0, 0).0[3], 255);
        mask_near_black(&mut image, 50);
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
    }

    // =========================================================================
    // find_bounding_box
    // =========================================================================

    #[test]
    fn bounding_box_of_visible_region() {
        let mut image = framed_image((20, 10), BLACK, (3, 2, 5, 4), WHITE);
        mask_near_black(&mut image, 36);
        assert_eq!(
            find_bounding_box(&image),
            Some(BoundingBox {
                left: 3,
                top: 2,
                right: 7,
                bottom: 5,
            })
        );
    }

    #[test]
    fn bounding_box_spans_scattered_pixels() {
        let mut image = RgbaImage::new(10, 10);
        image.put_pixel(2, 8, WHITE);
        image.put_pixel(7, 1, WHITE);
        assert_eq!(
            find_bounding_box(&image),
            Some(BoundingBox {
                left: 2,
                top: 1,
                right: 7,
                bottom: 8,
            })
        );
    }

    #[test]
    fn bounding_box_none_when_fully_transparent() {
        assert_eq!(find_bounding_box(&RgbaImage::new(8, 8)), None);
    }

    #[test]
    fn bounding_box_none_for_single_row() {
        let image = framed_image((10, 10), Rgba([0, 0, 0, 0]), (1, 4, 6, 1), WHITE);
        assert_eq!(find_bounding_box(&image), None);
    }

    // =========================================================================
    // trim_image
    // =========================================================================

    #[test]
    fn trim_crops_to_interior_with_padding() {
        // 100x100 interior inside a near-black frame
        let image = framed_image((140, 160), NEAR_BLACK, (20, 30, 100, 100), WHITE);
        let params = TrimParams::default();

        let out = trim_image(image, &params).unwrap();

        // 100 wide, floor(100 * 0.63) = 63 tall, plus 12px each side
        assert_eq!(out.dimensions(), (124, 87));

        // Padding is transparent
        for x in 0..124 {
            assert_eq!(out.get_pixel(x, 0).0[3], 0);
            assert_eq!(out.get_pixel(x, 86).0[3], 0);
        }
        for y in 0..87 {
            assert_eq!(out.get_pixel(11, y).0[3], 0);
            assert_eq!(out.get_pixel(112, y).0[3], 0);
        }

        // Interior copied at the padding offset
        assert_eq!(*out.get_pixel(12, 12), WHITE);
        assert_eq!(*out.get_pixel(111, 74), WHITE);
    }

    #[test]
    fn trim_keeps_only_top_share() {
        // Top half red, bottom half blue: 63% keeps all red and a strip of blue
        let red = Rgba([220, 0, 0, 255]);
        let blue = Rgba([0, 0, 220, 255]);
        let image = RgbaImage::from_fn(10, 100, |_, y| if y < 50 { red } else { blue });
        let params = TrimParams {
            padding: 0,
            ..TrimParams::default()
        };

        let out = trim_image(image, &params).unwrap();
        assert_eq!(out.dimensions(), (10, 63));
        assert_eq!(*out.get_pixel(0, 49), red);
        assert_eq!(*out.get_pixel(0, 62), blue);
    }

    #[test]
    fn trim_border_ends_up_transparent() {
        // Dark pixels inside the bounding box are masked too
        let mut image = framed_image((30, 30), BLACK, (5, 5, 20, 20), WHITE);
        image.put_pixel(10, 10, BLACK);
        let out = trim_image(image, &TrimParams::default()).unwrap();
        // (10,10) lands at (10-5+12, 10-5+12)
        assert_eq!(out.get_pixel(17, 17).0[3], 0);
        assert_eq!(*out.get_pixel(18, 17), WHITE);
    }

    #[test]
    fn trim_all_black_is_none() {
        let image = RgbaImage::from_pixel(50, 50, BLACK);
        assert_eq!(
            trim_image(image, &TrimParams::default()),
            Err(TrimSkip::NothingVisible)
        );
    }

    // =========================================================================
    // trim_logo
    // =========================================================================

    #[test]
    fn trim_logo_writes_png() {
        let image = framed_image((40, 40), BLACK, (10, 10, 20, 20), WHITE);
        let backend = MockBackend::with_image(image);

        let outcome = trim_logo(
            &backend,
            Path::new("/in/logo.jpg"),
            Path::new("/out/logo.png"),
            &TrimParams::default(),
        );

        // 20 wide, floor(20 * 0.63) = 12 tall, + 24
        assert_eq!(
            outcome,
            TrimOutcome::Trimmed {
                width: 44,
                height: 36
            }
        );
        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(
            &ops[1],
            RecordedOp::EncodePng { output, width: 44, height: 36 } if output == "/out/logo.png"
        ));
    }

    #[test]
    fn trim_logo_all_black_writes_nothing() {
        let backend = MockBackend::with_image(RgbaImage::from_pixel(20, 20, BLACK));
        let outcome = trim_logo(
            &backend,
            Path::new("/logo.png"),
            Path::new("/out.png"),
            &TrimParams::default(),
        );
        assert!(matches!(outcome, TrimOutcome::Unchanged { .. }));
        assert_eq!(backend.get_operations().len(), 1);
    }

    #[test]
    fn trim_logo_swallows_decode_error() {
        let backend = MockBackend::with_decode_error("truncated file");
        let outcome = trim_logo(
            &backend,
            Path::new("/logo.png"),
            Path::new("/out.png"),
            &TrimParams::default(),
        );
        assert!(
            matches!(outcome, TrimOutcome::Unchanged { reason } if reason.contains("truncated file"))
        );
    }

    #[test]
    fn trim_logo_swallows_encode_error() {
        let backend = MockBackend {
            fail_encode: true,
            ..MockBackend::with_image(framed_image((10, 10), BLACK, (2, 2, 5, 5), WHITE))
        };
        let outcome = trim_logo(
            &backend,
            Path::new("/logo.png"),
            Path::new("/out.png"),
            &TrimParams::default(),
        );
        assert!(matches!(outcome, TrimOutcome::Unchanged { reason } if reason.contains("disk full")));
    }

    #[test]
    fn trim_image_rejects_oversized_padding() {
        let image = framed_image((10, 10), BLACK, (2, 2, 5, 5), WHITE);
        let params = TrimParams {
            padding: u32::MAX / 2 + 1,
            ..TrimParams::default()
        };
        assert_eq!(
            trim_image(image, &params),
            Err(TrimSkip::CanvasTooLarge {
                padding: u32::MAX / 2 + 1
            })
        );
    }

    #[test]
    fn trim_logo_oversized_padding_writes_nothing() {
        let backend =
            MockBackend::with_image(framed_image((10, 10), BLACK, (2, 2, 5, 5), WHITE));
        let params = TrimParams {
            padding: 100_000,
            ..TrimParams::default()
        };
        let outcome = trim_logo(
            &backend,
            Path::new("/logo.png"),
            Path::new("/out.png"),
            &params,
        );
        assert!(
            matches!(outcome, TrimOutcome::Unchanged { reason } if reason.contains("too large"))
        );
        assert_eq!(backend.get_operations().len(), 1);
    }

    #[test]
    fn trim_logo_refuses_to_overwrite_source() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("logo.png");
        std::fs::write(&source, b"original").unwrap();
        let backend =
            MockBackend::with_image(framed_image((10, 10), BLACK, (2, 2, 5, 5), WHITE));

        let outcome = trim_logo(
            &backend,
            &source,
            &tmp.path().join(".").join("logo.png"),
            &TrimParams::default(),
        );

        assert!(matches!(outcome, TrimOutcome::Unchanged { .. }));
        assert!(backend.get_operations().is_empty());
        assert_eq!(std::fs::read(&source).unwrap(), b"original");
    }
}
