//! Display text for prices and ratings.
//!
//! Prices follow the en-US / USD convention: `$` prefix, two decimals,
//! comma thousands separators, leading minus for negatives.

use crate::types::Product;

/// Format a price as US dollars.
///
/// ```
/// # use shopwindow::format::format_price;
/// assert_eq!(format_price(9.5), "$9.50");
/// assert_eq!(format_price(1234.5), "$1,234.50");
/// ```
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return "$NaN".to_string();
    }
    let scaled = (value.abs() * 100.0).round();
    // Integer-valued floats print exactly with `{:.0}`, at any magnitude.
    let cents = if scaled.is_finite() {
        format!("{scaled:.0}")
    } else {
        format!("{:.0}00", value.abs())
    };
    let cents = format!("{cents:0>3}");
    let (whole, fraction) = cents.split_at(cents.len() - 2);
    let sign = if value < 0.0 && cents.bytes().any(|b| b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}${}.{fraction}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn rate_text(product: &Product) -> String {
    match product.rate() {
        Some(rate) => rate.to_string(),
        None => "N/A".to_string(),
    }
}

/// Compact rating for table cells: `3.9 (120)`.
pub fn rating_short(product: &Product) -> String {
    format!("{} ({})", rate_text(product), product.review_count())
}

/// Rating line for the detail popup: `3.9 / 5 (120 reviews)`.
pub fn rating_detail(product: &Product) -> String {
    format!(
        "{} / 5 ({} reviews)",
        rate_text(product),
        product.review_count()
    )
}
