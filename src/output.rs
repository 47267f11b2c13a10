//! CLI output formatting for every command.
//!
//! Output is information-first: each product leads with its identifier and
//! title, secondary facts are indented underneath. Diagnostics go through
//! `tracing` on stderr; this module only writes the user-facing summary on
//! stdout.
//!
//! # Output Format
//!
//! ## Fetch
//!
//! ```text
//! Catalog: 3 products loaded
//! 001 Fjallraven Backpack
//!     $109.95 · men's clothing · 3.9 (120)
//! 002 Mens Casual Slim Fit
//!     $15.99 · men's clothing · 2.1 (430)
//! ```
//!
//! ## Trim
//!
//! ```text
//! Logo: assets/logo.png → dist/logo.png (124x87)
//! Logo: assets/logo.png unchanged (no visible content after masking)
//! ```
//!
//! ## Show
//!
//! ```text
//! Fjallraven Backpack
//!     Category: men's clothing
//!     Price: $109.95
//!     Rating: 3.9 / 5 (120 reviews)
//!     Image: https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg
//!
//!     Your perfect pack for everyday use and walks in the forest.
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::detail::{DetailSurface, DetailView};
use crate::generate::GenerateSummary;
use crate::imaging::TrimOutcome;
use crate::render::{ProductRow, STATUS_EMPTY, STATUS_FAILED, loaded_status};
use crate::types::CatalogState;
use std::path::Path;

/// Zero-pad numeric ids to three digits; anything else is shown as-is.
fn format_index(id: &str) -> String {
    if id.chars().all(|c| c.is_ascii_digit()) {
        format!("{:0>3}", id)
    } else {
        id.to_string()
    }
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// Fetch
// ============================================================================

pub fn format_fetch_output(state: &CatalogState) -> Vec<String> {
    match state {
        CatalogState::Loaded { products } if !products.is_empty() => {
            let mut lines = vec![format!("Catalog: {}", loaded_status(products.len()))];
            for product in products {
                let row = ProductRow::from_product(product);
                lines.push(format!("{} {}", format_index(&row.id), row.title));
                let mut facts = vec![row.price];
                if !row.category.is_empty() {
                    facts.push(row.category);
                }
                facts.push(row.rating);
                lines.push(format!("{}{}", indent(1), facts.join(" · ")));
            }
            lines
        }
        CatalogState::Loaded { .. } | CatalogState::NoData => {
            vec![format!("Catalog: {STATUS_EMPTY}")]
        }
        CatalogState::Failed { reason } => vec![
            format!("Catalog: {STATUS_FAILED}"),
            format!("{}Reason: {reason}", indent(1)),
        ],
    }
}

pub fn print_fetch_output(state: &CatalogState) {
    for line in format_fetch_output(state) {
        println!("{line}");
    }
}

// ============================================================================
// Trim
// ============================================================================

pub fn format_trim_output(source: &Path, output: &Path, outcome: &TrimOutcome) -> Vec<String> {
    match outcome {
        TrimOutcome::Trimmed { width, height } => vec![format!(
            "Logo: {} → {} ({width}x{height})",
            source.display(),
            output.display()
        )],
        TrimOutcome::Unchanged { reason } => {
            vec![format!("Logo: {} unchanged ({reason})", source.display())]
        }
    }
}

pub fn print_trim_output(source: &Path, output: &Path, outcome: &TrimOutcome) {
    for line in format_trim_output(source, output, outcome) {
        println!("{line}");
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = vec![format!("Page → {}", summary.page.display())];
    lines.push(format!("{}Status: {}", indent(1), summary.status));
    if let Some(logo) = &summary.logo {
        lines.push(format!("{}Logo: {logo}", indent(1)));
    }
    lines
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{line}");
    }
}

// ============================================================================
// Show
// ============================================================================

pub fn format_detail(detail: &DetailView) -> Vec<String> {
    let mut lines = vec![detail.title.clone()];
    if !detail.category.is_empty() {
        lines.push(format!("{}Category: {}", indent(1), detail.category));
    }
    lines.push(format!("{}Price: {}", indent(1), detail.price));
    lines.push(format!("{}Rating: {}", indent(1), detail.rating));
    if !detail.image.is_empty() {
        lines.push(format!("{}Image: {}", indent(1), detail.image));
    }
    if !detail.description.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}{}", indent(1), detail.description));
    }
    lines
}

/// Detail surface that prints the popup fields to stdout.
#[derive(Default)]
pub struct TerminalSurface {
    shown: usize,
}

impl TerminalSurface {
    pub fn shown(&self) -> usize {
        self.shown
    }
}

impl DetailSurface for TerminalSurface {
    fn show(&mut self, detail: &DetailView) {
        self.shown += 1;
        for line in format_detail(detail) {
            println!("{line}");
        }
    }

    fn hide(&mut self) {}
}
