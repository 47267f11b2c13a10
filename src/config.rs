//! Configuration module.
//!
//! Handles loading, validating, and merging `shopwindow.toml`. Stock defaults
//! are overridden by whatever the user file specifies.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [api]
//! endpoint = "https://fakestoreapi.com/products"
//! timeout_secs = 10
//!
//! [logo]
//! source = "assets/logo.png" # Omit to render the page without a logo
//! threshold = 36             # Channels at or below this count as background
//! keep_fraction = 0.63       # Share of the content height kept, from the top
//! padding = 12               # Transparent margin in pixels
//!
//! [page]
//! title = "Product Catalog"
//!
//! [colors.light]
//! background = "#f6f6f4"
//! surface = "#ffffff"
//! text = "#1b1b1b"
//! text_muted = "#6b6b6b"
//! border = "#e2e2dd"
//! accent = "#0a6cff"
//!
//! [colors.dark]
//! background = "#111214"
//! surface = "#1b1c1f"
//! text = "#ececec"
//! text_muted = "#9a9a9a"
//! border = "#2e2f33"
//! accent = "#5c9dff"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [logo]
//! threshold = 20
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::TrimParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Upper bound for `logo.padding`, in pixels.
pub const MAX_PADDING: u32 = 1024;

/// Configuration loaded from `shopwindow.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Catalog endpoint settings.
    pub api: ApiConfig,
    /// Logo source and trim tunables.
    pub logo: LogoConfig,
    /// Page text.
    pub page: PageConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api.endpoint.starts_with("http://") || self.api.endpoint.starts_with("https://"))
        {
            return Err(ConfigError::Validation(
                "api.endpoint must be an http:// or https:// URL".into(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than 0".into(),
            ));
        }
        if !(self.logo.keep_fraction > 0.0 && self.logo.keep_fraction <= 1.0) {
            return Err(ConfigError::Validation(
                "logo.keep_fraction must be in (0, 1]".into(),
            ));
        }
        if self.logo.padding > MAX_PADDING {
            return Err(ConfigError::Validation(format!(
                "logo.padding must be at most {MAX_PADDING}"
            )));
        }
        Ok(())
    }
}

/// Remote catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// URL answering GET with a JSON array of products.
    pub endpoint: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://fakestoreapi.com/products".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Logo source and trim settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoConfig {
    /// Logo image file. Relative paths resolve against the config file's
    /// directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    pub threshold: u8,
    pub keep_fraction: f64,
    pub padding: u32,
}

impl LogoConfig {
    pub fn trim_params(&self) -> TrimParams {
        TrimParams {
            threshold: self.threshold,
            keep_fraction: self.keep_fraction,
            padding: self.padding,
        }
    }
}

impl Default for LogoConfig {
    fn default() -> Self {
        let trim = TrimParams::default();
        Self {
            source: None,
            threshold: trim.threshold,
            keep_fraction: trim.keep_fraction,
            padding: trim.padding,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Document title and main heading.
    pub title: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Product Catalog".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Table, card and popup background.
    pub surface: String,
    pub text: String,
    /// Status line, categories, captions.
    pub text_muted: String,
    pub border: String,
    /// Prices and hover highlights.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f6f6f4".to_string(),
            surface: "#ffffff".to_string(),
            text: "#1b1b1b".to_string(),
            text_muted: "#6b6b6b".to_string(),
            border: "#e2e2dd".to_string(),
            accent: "#0a6cff".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111214".to_string(),
            surface: "#1b1c1f".to_string(),
            text: "#ececec".to_string(),
            text_muted: "#9a9a9a".to_string(),
            border: "#2e2f33".to_string(),
            accent: "#5c9dff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
///
/// Merging values rather than relying on `#[serde(default)]` alone keeps
/// defaults that depend on position: a partial `[colors.dark]` falls back to
/// the dark scheme, not to `ColorScheme::default()`.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`.
///
/// A missing file yields the stock defaults. A relative `logo.source` is
/// resolved against the directory containing the file.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return resolve_config(None);
    }
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    let mut config = resolve_config(Some(overlay))?;

    if let Some(source) = config.logo.source.take() {
        let base = path.parent().unwrap_or(Path::new(""));
        config.logo.source = Some(if source.is_relative() {
            base.join(source)
        } else {
            source
        });
    }
    Ok(config)
}

/// Returns a fully-commented stock `shopwindow.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Shopwindow Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Catalog API
# ---------------------------------------------------------------------------
[api]
# Answers GET with a JSON array of products.
endpoint = "https://fakestoreapi.com/products"

# Whole-request timeout in seconds. There are no retries.
timeout_secs = 10

# ---------------------------------------------------------------------------
# Logo cleanup
# ---------------------------------------------------------------------------
[logo]
# Logo image, relative to this file. Without it the page has no logo.
# source = "assets/logo.png"

# Pixels whose red, green and blue are all at or below this value are made
# transparent (removes a solid dark background).
threshold = 36

# Share of the visible content height kept, measured from the top.
keep_fraction = 0.63

# Transparent margin added around the crop, in pixels (at most 1024).
padding = 12

# ---------------------------------------------------------------------------
# Page
# ---------------------------------------------------------------------------
[page]
title = "Product Catalog"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f6f6f4"
surface = "#ffffff"       # Table, cards, popup
text = "#1b1b1b"
text_muted = "#6b6b6b"    # Status line, categories, captions
border = "#e2e2dd"
accent = "#0a6cff"        # Prices, hover

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#111214"
surface = "#1b1c1f"
text = "#ececec"
text_muted = "#9a9a9a"
border = "#2e2f33"
accent = "#5c9dff"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n{}}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}    }}\n}}",
        scheme_vars(&colors.light, "    "),
        scheme_vars(&colors.dark, "        "),
    )
}

/// One `--color-*` declaration per line, each prefixed with `indent`.
fn scheme_vars(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("bg", &scheme.background),
        ("surface", &scheme.surface),
        ("text", &scheme.text),
        ("text-muted", &scheme.text_muted),
        ("border", &scheme.border),
        ("accent", &scheme.accent),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}--color-{name}: {value};\n"))
    .collect()
}
