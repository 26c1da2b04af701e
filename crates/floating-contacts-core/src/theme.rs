//! Widget colors.
//!
//! `WidgetTheme` holds the background and the derived hover color and
//! generates the CSS custom properties set inline on the widget container.

use serde::Serialize;

use crate::color::{HOVER_LIGHTEN_PERCENT, adjust_brightness};
use crate::settings::{ContactSettings, DEFAULT_BG_COLOR};

/// Colors applied to the widget container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetTheme {
    pub bg_color: String,
    pub hover_color: String,
}

impl WidgetTheme {
    /// Build the theme from a background color; the hover color is the
    /// background lightened by [`HOVER_LIGHTEN_PERCENT`].
    pub fn from_bg_color(bg_color: &str) -> Self {
        Self {
            bg_color: bg_color.to_string(),
            hover_color: adjust_brightness(bg_color, HOVER_LIGHTEN_PERCENT),
        }
    }

    pub fn from_settings(settings: &ContactSettings) -> Self {
        Self::from_bg_color(&settings.bg_color)
    }

    /// CSS custom properties for the container's `style` attribute.
    pub fn inline_style(&self) -> String {
        format!(
            "--fc-bg-color: {}; --fc-hover-color: {};",
            self.bg_color, self.hover_color
        )
    }
}

impl Default for WidgetTheme {
    fn default() -> Self {
        Self::from_bg_color(DEFAULT_BG_COLOR)
    }
}
