//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the site directory (`--site`, default `.`) and is entirely optional: stock
//! defaults reproduce the original LogiFlow Pro landing page, served on port
//! 3000 with `launch.html` as the default document.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//! root = "."                   # Document root, relative to the site directory
//! default_document = "launch.html"
//! log_level = "info"           # Used when RUST_LOG is not set
//!
//! [site]
//! name = "LogiFlow Pro"
//! tagline = "Professional logistics management"
//! contact_email = "soporte@logiflowpro.com"
//! app_url = "http://localhost:57563"
//! pages_base = "paqueteria-julio"
//!
//! [timings]
//! notification_display_ms = 5000
//! notification_exit_ms = 300
//! submit_latency_ms = 1500
//! image_fade_ms = 150
//!
//! [layout]
//! header_offset = 80.0
//! header_shadow_threshold = 100.0
//! reveal_threshold = 0.1
//! reveal_bottom_margin = 50.0
//!
//! [colors]
//! brand = "#5170FF"
//! success = "#10B981"
//! error = "#DC2626"
//! text = "#111827"
//! text_muted = "#6B7280"
//! background = "#ffffff"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [server]
//! port = 8080
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
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

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Static asset server settings.
    pub server: ServerConfig,
    /// Product identity and outbound links.
    pub site: SiteInfo,
    /// Durations of the page's transient effects.
    pub timings: TimingConfig,
    /// Scroll geometry used by the interaction controller.
    pub layout: LayoutConfig,
    /// Palette injected as CSS custom properties.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let doc = &self.server.default_document;
        if doc.is_empty() || doc.contains('/') || doc.contains('\\') {
            return Err(ConfigError::Validation(
                "server.default_document must be a plain file name".into(),
            ));
        }
        if self.timings.notification_display_ms == 0 {
            return Err(ConfigError::Validation(
                "timings.notification_display_ms must be non-zero".into(),
            ));
        }
        if !(self.layout.reveal_threshold > 0.0 && self.layout.reveal_threshold <= 1.0) {
            return Err(ConfigError::Validation(
                "layout.reveal_threshold must be in (0, 1]".into(),
            ));
        }
        if self.layout.header_offset < 0.0 || self.layout.reveal_bottom_margin < 0.0 {
            return Err(ConfigError::Validation(
                "layout offsets must not be negative".into(),
            ));
        }
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        Ok(())
    }
}

/// Static asset server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
    /// Document root, resolved against the site directory when relative.
    pub root: String,
    /// File served for `/`.
    pub default_document: String,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            root: ".".to_string(),
            default_document: "launch.html".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Product identity shown on the page and in the startup banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
    pub contact_email: String,
    /// Where the login link points when not hosted on GitHub Pages.
    pub app_url: String,
    /// Repository path segment used by the GitHub Pages deployment.
    pub pages_base: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "LogiFlow Pro".to_string(),
            tagline: "Professional logistics management".to_string(),
            contact_email: "soporte@logiflowpro.com".to_string(),
            app_url: "http://localhost:57563".to_string(),
            pages_base: "paqueteria-julio".to_string(),
        }
    }
}

/// Durations of transient page effects, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// How long a notification stays before its exit transition.
    pub notification_display_ms: u64,
    /// Exit transition length before the notification is detached.
    pub notification_exit_ms: u64,
    /// Simulated latency of the request form submission.
    pub submit_latency_ms: u64,
    /// Dimmed interval before a gallery swaps its main image.
    pub image_fade_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            notification_display_ms: 5000,
            notification_exit_ms: 300,
            submit_latency_ms: 1500,
            image_fade_ms: 150,
        }
    }
}

impl TimingConfig {
    pub fn notification_display(&self) -> Duration {
        Duration::from_millis(self.notification_display_ms)
    }

    pub fn notification_exit(&self) -> Duration {
        Duration::from_millis(self.notification_exit_ms)
    }

    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }

    pub fn image_fade(&self) -> Duration {
        Duration::from_millis(self.image_fade_ms)
    }
}

/// Scroll geometry, in CSS pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Height of the fixed header subtracted from anchor scroll targets.
    pub header_offset: f64,
    /// Scroll offset past which the header gets its elevated shadow.
    pub header_shadow_threshold: f64,
    /// Fraction of a reveal target that must be in view to reveal it.
    pub reveal_threshold: f64,
    /// Bottom margin trimmed from the viewport for reveal checks.
    pub reveal_bottom_margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
            header_shadow_threshold: 100.0,
            reveal_threshold: 0.1,
            reveal_bottom_margin: 50.0,
        }
    }
}

/// Page palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub brand: String,
    /// Accent of success notifications.
    pub success: String,
    /// Accent of error notifications.
    pub error: String,
    pub text: String,
    pub text_muted: String,
    pub background: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            brand: "#5170FF".to_string(),
            success: "#10B981".to_string(),
            error: "#DC2626".to_string(),
            text: "#111827".to_string(),
            text_muted: "#6B7280".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(site_dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(site_dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# LogiFlow Landing Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Static asset server
# ---------------------------------------------------------------------------
[server]
host = "127.0.0.1"
port = 3000

# Document root, relative to the site directory.
root = "."

# File served for "/".
default_document = "launch.html"

# Log filter used when RUST_LOG is not set (error, warn, info, debug, trace).
log_level = "info"

# ---------------------------------------------------------------------------
# Product identity
# ---------------------------------------------------------------------------
[site]
name = "LogiFlow Pro"
tagline = "Professional logistics management"
contact_email = "soporte@logiflowpro.com"

# Login link target outside GitHub Pages.
app_url = "http://localhost:57563"

# Repository path segment of the GitHub Pages deployment.
pages_base = "paqueteria-julio"

# ---------------------------------------------------------------------------
# Transient effects (milliseconds)
# ---------------------------------------------------------------------------
[timings]
notification_display_ms = 5000
notification_exit_ms = 300
submit_latency_ms = 1500
image_fade_ms = 150

# ---------------------------------------------------------------------------
# Scroll geometry (CSS pixels)
# ---------------------------------------------------------------------------
[layout]
# Fixed header height subtracted from anchor scroll targets.
header_offset = 80.0

# Scroll offset past which the header shadow is elevated.
header_shadow_threshold = 100.0

# Fraction of a card that must be visible before it is revealed.
reveal_threshold = 0.1

# Bottom viewport margin ignored by reveal checks.
reveal_bottom_margin = 50.0

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
brand = "#5170FF"
success = "#10B981"
error = "#DC2626"
text = "#111827"
text_muted = "#6B7280"
background = "#ffffff"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-brand: {brand};
    --color-success: {success};
    --color-error: {error};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-bg: {background};
}}"#,
        brand = colors.brand,
        success = colors.success,
        error = colors.error,
        text = colors.text,
        text_muted = colors.text_muted,
        background = colors.background,
    )
}

/// Settings object read by `landing.js`, so the browser script and the
/// interaction controller share one source of timings and geometry.
pub fn generate_settings_js(config: &SiteConfig) -> String {
    let settings = serde_json::json!({
        "notificationDisplayMs": config.timings.notification_display_ms,
        "notificationExitMs": config.timings.notification_exit_ms,
        "submitLatencyMs": config.timings.submit_latency_ms,
        "imageFadeMs": config.timings.image_fade_ms,
        "headerOffset": config.layout.header_offset,
        "headerShadowThreshold": config.layout.header_shadow_threshold,
        "revealThreshold": config.layout.reveal_threshold,
        "revealBottomMargin": config.layout.reveal_bottom_margin,
        "appUrl": config.site.app_url,
        "pagesBase": config.site.pages_base,
    });
    format!("window.LANDING_SETTINGS = {settings};")
}
