//! Shared test utilities: product builders and synthetic images.

use crate::types::{Product, Rating};
use image::{Rgba, RgbaImage};

// =========================================================================
// Products
// =========================================================================

/// Build a product with predictable derived fields.
///
/// Category is always `bags`, image is `https://img.example/{id}.png`, and
/// the description is `Description of {title}`.
pub fn product(id: u64, title: &str, price: f64, rating: Option<(f64, u64)>) -> Product {
    Product {
        id: Some(id),
        title: title.to_string(),
        category: "bags".to_string(),
        price,
        image: format!("https://img.example/{id}.png"),
        description: format!("Description of {title}"),
        rating: rating.map(|(rate, count)| Rating {
            rate: Some(rate),
            count: Some(count),
        }),
    }
}

/// `n` distinct products with ids 1..=n.
pub fn sample_products(n: u64) -> Vec<Product> {
    (1..=n)
        .map(|i| product(i, &format!("Product {i}"), i as f64 * 10.5, Some((4.1, i * 3))))
        .collect()
}

// =========================================================================
// Images
// =========================================================================

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const NEAR_BLACK: Rgba<u8> = Rgba([30, 36, 12, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Opaque image filled with `border`, with an inner rectangle of `fill` at
/// `(x, y)` of size `w`×`h`.
pub fn framed_image(
    size: (u32, u32),
    border: Rgba<u8>,
    inner: (u32, u32, u32, u32),
    fill: Rgba<u8>,
) -> RgbaImage {
    let (x0, y0, w, h) = inner;
    RgbaImage::from_fn(size.0, size.1, |x, y| {
        if x >= x0 && x < x0 + w && y >= y0 && y < y0 + h {
            fill
        } else {
            border
        }
    })
}
