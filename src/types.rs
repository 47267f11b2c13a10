//! Shared types used across all stages.
//!
//! [`CatalogState`] is serialized to JSON between the fetch stage and the
//! generate / show stages, so the shape here is the on-disk contract.

use serde::{Deserialize, Deserializer, Serialize};

/// A single product record as returned by the catalog API.
///
/// Every field is optional on the wire, and an explicit `null` counts as
/// missing. Records with missing fields still render; see
/// [`Product::display_id`] and [`Product::display_title`] for the fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
    /// Image URI, used verbatim as `src`.
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Average score and review count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rating {
    pub rate: Option<f64>,
    pub count: Option<u64>,
}

impl Product {
    /// Identifier as display text, `—` when absent.
    pub fn display_id(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => "—".to_string(),
        }
    }

    /// Title as display text, `Untitled product` when blank.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled product"
        } else {
            &self.title
        }
    }

    pub fn rate(&self) -> Option<f64> {
        self.rating.and_then(|r| r.rate)
    }

    pub fn review_count(&self) -> u64 {
        self.rating.and_then(|r| r.count).unwrap_or(0)
    }
}

/// Outcome of one catalog fetch.
///
/// `NoData` and `Failed` are kept apart because the page words them
/// differently on every surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CatalogState {
    Loaded { products: Vec<Product> },
    NoData,
    Failed { reason: String },
}

impl CatalogState {
    /// Products to render; empty for `NoData` and `Failed`.
    pub fn products(&self) -> &[Product] {
        match self {
            CatalogState::Loaded { products } => products,
            _ => &[],
        }
    }

    /// Find a loaded product by identifier.
    pub fn find(&self, id: u64) -> Option<(usize, &Product)> {
        self.products()
            .iter()
            .enumerate()
            .find(|(_, p)| p.id == Some(id))
    }
}
