//! Hex color arithmetic.
//!
//! Everything here is pure: same input, same output. The hover color of the
//! widget is derived from the configured background with [`adjust_brightness`].

/// Percentage used to derive the hover color from the background color.
pub const HOVER_LIGHTEN_PERCENT: i32 = 20;

/// Expand a 3-digit hex body (`abc`) to 6 digits (`aabbcc`).
fn expand_shorthand(hex: &str) -> String {
    if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    }
}

/// Parse a hex color string to an RGB tuple. Returns None if invalid.
///
/// Accepts `#rrggbb`, `#rgb`, and the same forms without the leading `#`.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = expand_shorthand(color.trim().trim_start_matches('#'));

    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

/// Convert an RGB tuple to a lowercase `#rrggbb` string.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Strictly validate a CSS hex color and return its canonical form.
///
/// Unlike [`parse_hex_color`], the `#` is mandatory and surrounding
/// whitespace is rejected. `#ABC` becomes `#aabbcc`.
pub fn normalize_hex_color(color: &str) -> Option<String> {
    let body = color.strip_prefix('#')?;
    if !matches!(body.len(), 3 | 6) || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let (r, g, b) = parse_hex_color(body)?;
    Some(rgb_to_hex(r, g, b))
}

/// Scale one channel by `percent`, rounding and clamping to a byte.
fn scale_channel(channel: u8, percent: i32) -> u8 {
    let channel = f64::from(channel);
    let value = channel + channel * f64::from(percent) / 100.0;
    value.round().clamp(0.0, 255.0) as u8
}

/// Lighten (positive `percent`) or darken (negative) a hex color.
///
/// Each channel becomes `clamp(0, 255, round(c + c * percent / 100))`.
/// The result is always a lowercase 6-digit `#rrggbb`. Input that is not a
/// hex color is returned unchanged.
pub fn adjust_brightness(hex: &str, percent: i32) -> String {
    let Some((r, g, b)) = parse_hex_color(hex) else {
        tracing::warn!("Cannot adjust brightness of '{}': not a hex color", hex);
        return hex.to_string();
    };

    rgb_to_hex(
        scale_channel(r, percent),
        scale_channel(g, percent),
        scale_channel(b, percent),
    )
}
