//! Application configuration.
//!
//! The configuration is loaded from `$XDG_CONFIG_HOME/deskzones/config.json`.
//! Every section and every key is optional; a missing file or an empty `{}`
//! gives the compiled-in defaults.
//!
//! # Example
//!
//! ```json
//! {
//!   "defaults": {
//!     "color": "#ff9500",
//!     "border_width": 3.0,
//!     "fill_opacity": 0.3,
//!     "font_size": 14.0,
//!     "show_fill": true
//!   },
//!   "overlay": {
//!     "namespace": "deskzones",
//!     "start_in_edit_mode": false,
//!     "double_click_ms": 400,
//!     "double_click_distance": 5.0
//!   }
//! }
//! ```

use crate::geometry::SerializableColor;
use crate::rectangle::Style;
use crate::surface::Surface;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Style given to new rectangles, and initial fill visibility.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Overlay window and input settings.
    #[serde(default)]
    pub overlay: OverlayConfig,
}

/// Initial drawing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub color: SerializableColor,
    pub border_width: f64,
    /// Clamped to `[0.0, 1.0]` when the surface is built.
    pub fill_opacity: f64,
    pub font_size: f64,
    pub show_fill: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let style = Style::default();
        Self {
            color: style.color,
            border_width: style.border_width,
            fill_opacity: style.fill_opacity,
            font_size: style.font_size,
            show_fill: true,
        }
    }
}

impl DefaultsConfig {
    /// The style for new rectangles.  Out-of-range values fall back to the
    /// built-in default for that field.
    pub fn style(&self) -> Style {
        let fallback = Style::default();
        Style {
            color: self.color,
            border_width: if self.border_width.is_finite() && self.border_width > 0.0 {
                self.border_width
            } else {
                fallback.border_width
            },
            fill_opacity: if self.fill_opacity.is_nan() {
                fallback.fill_opacity
            } else {
                self.fill_opacity.clamp(0.0, 1.0)
            },
            font_size: if self.font_size.is_finite() && self.font_size > 0.0 {
                self.font_size
            } else {
                fallback.font_size
            },
        }
    }
}

/// Overlay window and input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Layer-shell namespace of the overlay window.
    pub namespace: String,
    /// Start in edit mode instead of the click-through lock mode.
    pub start_in_edit_mode: bool,
    /// Longest gap between two presses of a double-click (ms).
    pub double_click_ms: u32,
    /// Furthest two presses of a double-click may be apart (px).
    pub double_click_distance: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            namespace: "deskzones".into(),
            start_in_edit_mode: false,
            double_click_ms: 400,
            double_click_distance: 5.0,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// An empty surface set up from this configuration.
    pub fn surface(&self) -> Surface {
        let mut surface = Surface::new(self.defaults.style(), self.defaults.show_fill);
        surface.set_edit_mode(self.overlay.start_in_edit_mode);
        surface
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
