//! Catalog fetching.
//!
//! One request, no retries. The transport sits behind [`CatalogSource`] so the
//! parsing and state-folding logic can be exercised without a network:
//!
//! ```text
//! CatalogSource::get ──body──▶ parse_catalog ──▶ CatalogState
//!        │                          │
//!        └──── FetchError ──────────┴──▶ CatalogState::Failed
//! ```
//!
//! An empty array or any JSON value that is not an array means "no data",
//! which is not an error. A body that is not JSON at all is a failure, the
//! same as a transport error or a non-2xx status.

use crate::types::{CatalogState, Product};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Something that can produce the raw catalog body.
///
/// Implementations perform exactly one request per call and only return
/// `Ok` for a successful (2xx) response.
pub trait CatalogSource {
    fn get(&self) -> Result<Vec<u8>, FetchError>;

    /// Human-readable location, used in log lines.
    fn describe(&self) -> String;
}

/// HTTP source backed by a blocking reqwest client.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("shopwindow/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl CatalogSource for HttpSource {
    fn get(&self) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Parse a response body into a catalog state.
///
/// Array elements that are not objects are skipped. If nothing usable is
/// left, the result is [`CatalogState::NoData`].
pub fn parse_catalog(body: &[u8]) -> Result<CatalogState, FetchError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;

    let serde_json::Value::Array(items) = value else {
        tracing::debug!("response body is not a JSON array");
        return Ok(CatalogState::NoData);
    };

    let mut products = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            tracing::warn!(position, "skipping catalog entry that is not an object");
            continue;
        }
        match serde_json::from_value::<Product>(item) {
            Ok(product) => products.push(product),
            Err(e) => tracing::warn!(position, error = %e, "skipping malformed catalog entry"),
        }
    }

    if products.is_empty() {
        Ok(CatalogState::NoData)
    } else {
        Ok(CatalogState::Loaded { products })
    }
}

/// Fetch once and fold every failure into [`CatalogState::Failed`].
pub fn fetch_catalog(source: &impl CatalogSource) -> CatalogState {
    tracing::info!(source = %source.describe(), "fetching catalog");
    match source.get().and_then(|body| parse_catalog(&body)) {
        Ok(state) => {
            match &state {
                CatalogState::Loaded { products } => {
                    tracing::info!(count = products.len(), "catalog loaded")
                }
                _ => tracing::info!("catalog returned no data"),
            }
            state
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch products");
            CatalogState::Failed {
                reason: e.to_string(),
            }
        }
    }
}
