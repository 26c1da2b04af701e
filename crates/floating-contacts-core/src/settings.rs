//! Contact settings schema and normalization.
//!
//! `ContactSettings` is the canonical record the renderer consumes. It is
//! produced from whatever the settings store holds by [`normalize`], which
//! never fails: malformed values fall back to defaults and malformed custom
//! links are dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::normalize_hex_color;
use crate::sanitize;

/// Default widget background color.
pub const DEFAULT_BG_COLOR: &str = "#1e88e5";

/// Screen corner the widget is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
}

impl Position {
    /// All accepted positions, in the order an admin form lists them.
    pub const ALL: [Position; 2] = [Position::BottomRight, Position::BottomLeft];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::BottomRight => "bottom-right",
            Position::BottomLeft => "bottom-left",
        }
    }

    /// Parse an exact position name. No trimming, no case folding.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

/// A user-defined link shown after the built-in contact methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLink {
    pub label: String,
    pub url: String,
    /// Icon class; empty means "use the fallback link icon".
    #[serde(default)]
    pub icon: String,
}

/// Canonical, fully-populated widget settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    pub phone_enabled: bool,
    pub phone_number: String,

    pub email_enabled: bool,
    /// Either empty or a syntactically valid address.
    pub email_address: String,

    pub whatsapp_enabled: bool,
    pub whatsapp_number: String,
    pub whatsapp_message: String,

    /// Lowercase `#rrggbb`.
    pub bg_color: String,

    pub position: Position,

    /// Render order is insertion order.
    pub custom_links: Vec<CustomLink>,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            phone_enabled: false,
            phone_number: String::new(),
            email_enabled: false,
            email_address: String::new(),
            whatsapp_enabled: false,
            whatsapp_number: String::new(),
            whatsapp_message: String::new(),
            bg_color: DEFAULT_BG_COLOR.to_string(),
            position: Position::default(),
            custom_links: Vec::new(),
        }
    }
}

impl ContactSettings {
    /// Phone entry is usable: flag set and a number present.
    pub fn phone_active(&self) -> bool {
        self.phone_enabled && !self.phone_number.is_empty()
    }

    pub fn email_active(&self) -> bool {
        self.email_enabled && !self.email_address.is_empty()
    }

    pub fn whatsapp_active(&self) -> bool {
        self.whatsapp_enabled && !self.whatsapp_number.is_empty()
    }

    /// Number of standard contact methods whose flag is set, regardless of
    /// whether a value was entered.
    pub fn enabled_method_count(&self) -> usize {
        [self.phone_enabled, self.email_enabled, self.whatsapp_enabled]
            .into_iter()
            .filter(|enabled| *enabled)
            .count()
    }
}

/// Loose truthiness of a raw value. Absent, null, false, zero, `""`, `"0"`
/// and empty collections are falsy.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty() && s != "0",
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

/// Text view of a scalar. Numbers become their decimal text; anything that is
/// not a string or number counts as absent.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field(raw: &Map<String, Value>, key: &str) -> String {
    scalar_text(raw.get(key))
        .map(|s| sanitize::text_line(&s))
        .unwrap_or_default()
}

fn normalize_email(raw: &Map<String, Value>) -> String {
    let Some(value) = scalar_text(raw.get("email_address")) else {
        return String::new();
    };
    let email = sanitize::email(&value);
    if email.is_empty() && !value.trim().is_empty() {
        tracing::debug!("Dropping invalid email address '{}'", value);
    }
    email
}

fn normalize_bg_color(raw: &Map<String, Value>) -> String {
    match raw.get("bg_color").and_then(Value::as_str) {
        Some(color) if !color.is_empty() => normalize_hex_color(color).unwrap_or_else(|| {
            tracing::debug!(
                "Invalid bg_color '{}', using default {}",
                color,
                DEFAULT_BG_COLOR
            );
            DEFAULT_BG_COLOR.to_string()
        }),
        _ => DEFAULT_BG_COLOR.to_string(),
    }
}

fn normalize_position(raw: &Map<String, Value>) -> Position {
    match raw.get("position") {
        None => Position::default(),
        Some(value) => value.as_str().and_then(Position::parse).unwrap_or_else(|| {
            tracing::debug!("Invalid position {}, using default", value);
            Position::default()
        }),
    }
}

/// Sanitize one raw link. Returns None when label or url is missing or empty,
/// before or after sanitization.
fn normalize_link(index: usize, raw: &Value) -> Option<CustomLink> {
    let Some(link) = raw.as_object() else {
        tracing::debug!("Dropping custom link #{}: not an object", index);
        return None;
    };

    let raw_label = scalar_text(link.get("label")).filter(|s| !s.is_empty());
    let raw_url = scalar_text(link.get("url")).filter(|s| !s.is_empty());
    let (Some(raw_label), Some(raw_url)) = (raw_label, raw_url) else {
        tracing::debug!("Dropping custom link #{}: missing label or url", index);
        return None;
    };

    let label = sanitize::text_line(&raw_label);
    let url = sanitize::url(&raw_url);
    if label.is_empty() || url.is_empty() {
        tracing::debug!(
            "Dropping custom link #{}: label or url empty after sanitizing",
            index
        );
        return None;
    }

    let icon = scalar_text(link.get("icon"))
        .map(|s| sanitize::text_line(&s))
        .unwrap_or_default();

    Some(CustomLink { label, url, icon })
}

fn normalize_links(raw: &Map<String, Value>) -> Vec<CustomLink> {
    // Form submissions key links by index ("0", "1", ...); JSON stores use
    // arrays. Both iterate in stored order.
    let items: Vec<&Value> = match raw.get("custom_links") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(map)) => map.values().collect(),
        _ => return Vec::new(),
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| normalize_link(index, item))
        .collect()
}

/// Convert a raw settings mapping into canonical settings.
///
/// Total: a non-object value is treated as an empty mapping, and an empty
/// mapping yields `ContactSettings::default()`.
pub fn normalize(raw: &Value) -> ContactSettings {
    let empty = Map::new();
    let raw = match raw {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            tracing::debug!("Settings snapshot is not an object ({}), using defaults", other);
            &empty
        }
    };

    ContactSettings {
        phone_enabled: is_truthy(raw.get("phone_enabled")),
        phone_number: text_field(raw, "phone_number"),
        email_enabled: is_truthy(raw.get("email_enabled")),
        email_address: normalize_email(raw),
        whatsapp_enabled: is_truthy(raw.get("whatsapp_enabled")),
        whatsapp_number: text_field(raw, "whatsapp_number"),
        whatsapp_message: scalar_text(raw.get("whatsapp_message"))
            .map(|s| sanitize::text_block(&s))
            .unwrap_or_default(),
        bg_color: normalize_bg_color(raw),
        position: normalize_position(raw),
        custom_links: normalize_links(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_mapping_is_all_defaults() {
        assert_eq!(normalize(&json!({})), ContactSettings::default());
    }

    #[test]
    fn test_non_object_is_all_defaults() {
        for raw in [json!(null), json!("settings"), json!(42), json!([1, 2])] {
            assert_eq!(normalize(&raw), ContactSettings::default());
        }
    }

    #[test]
    fn test_default_values() {
        let settings = ContactSettings::default();
        assert!(!settings.phone_enabled);
        assert!(!settings.email_enabled);
        assert!(!settings.whatsapp_enabled);
        assert_eq!(settings.bg_color, "#1e88e5");
        assert_eq!(settings.position, Position::BottomRight);
        assert!(settings.custom_links.is_empty());
    }

    #[test]
    fn test_boolean_truthiness() {
        let truthy = [
            json!(true),
            json!(1),
            json!("1"),
            json!("on"),
            json!("yes"),
            json!([0]),
        ];
        for value in truthy {
            let settings = normalize(&json!({ "phone_enabled": value.clone() }));
            assert!(settings.phone_enabled, "{} should be truthy", value);
        }

        let falsy = [
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!("0"),
            json!(null),
            json!([]),
            json!({}),
        ];
        for value in falsy {
            let settings = normalize(&json!({ "phone_enabled": value.clone() }));
            assert!(!settings.phone_enabled, "{} should be falsy", value);
        }
    }

    #[test]
    fn test_text_fields_are_sanitized() {
        let settings = normalize(&json!({
            "phone_number": "  <b>+1 555</b>\n123 ",
            "whatsapp_number": 15551234567u64,
            "whatsapp_message": "Hi there!\n<script>x</script>How can we help?",
        }));
        assert_eq!(settings.phone_number, "+1 555 123");
        assert_eq!(settings.whatsapp_number, "15551234567");
        assert_eq!(settings.whatsapp_message, "Hi there!\nxHow can we help?");
    }

    #[test]
    fn test_non_scalar_text_is_absent() {
        let settings = normalize(&json!({ "phone_number": ["+1"], "whatsapp_number": true }));
        assert_eq!(settings.phone_number, "");
        assert_eq!(settings.whatsapp_number, "");
    }

    #[test]
    fn test_invalid_email_becomes_empty() {
        let settings = normalize(&json!({
            "email_enabled": true,
            "email_address": "not-an-email",
        }));
        assert!(settings.email_enabled);
        assert_eq!(settings.email_address, "");
        assert!(!settings.email_active());
    }

    #[test]
    fn test_valid_email_is_kept() {
        let settings = normalize(&json!({ "email_address": " hello@example.com " }));
        assert_eq!(settings.email_address, "hello@example.com");
    }

    #[test]
    fn test_bg_color_validation() {
        assert_eq!(normalize(&json!({ "bg_color": "#FF0000" })).bg_color, "#ff0000");
        assert_eq!(normalize(&json!({ "bg_color": "#abc" })).bg_color, "#aabbcc");
        assert_eq!(normalize(&json!({ "bg_color": "red" })).bg_color, DEFAULT_BG_COLOR);
        assert_eq!(normalize(&json!({ "bg_color": "ff0000" })).bg_color, DEFAULT_BG_COLOR);
        assert_eq!(normalize(&json!({ "bg_color": "" })).bg_color, DEFAULT_BG_COLOR);
        assert_eq!(normalize(&json!({ "bg_color": 123 })).bg_color, DEFAULT_BG_COLOR);
    }

    #[test]
    fn test_position_validation() {
        assert_eq!(
            normalize(&json!({ "position": "bottom-left" })).position,
            Position::BottomLeft
        );
        assert_eq!(
            normalize(&json!({ "position": "top-left" })).position,
            Position::BottomRight
        );
        assert_eq!(
            normalize(&json!({ "position": "Bottom-Left" })).position,
            Position::BottomRight
        );
        assert_eq!(normalize(&json!({ "position": 1 })).position, Position::BottomRight);
    }

    #[test]
    fn test_custom_links_drop_incomplete_and_keep_order() {
        let settings = normalize(&json!({
            "custom_links": [
                { "label": "Facebook", "url": "https://facebook.com/acme", "icon": "fab fa-facebook" },
                { "label": "No URL", "url": "" },
                { "label": "", "url": "https://example.com" },
                { "url": "https://example.com/missing-label" },
                "not an object",
                { "label": "Blog", "url": "blog.example.com" },
            ]
        }));

        let labels: Vec<_> = settings.custom_links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["Facebook", "Blog"]);
        assert_eq!(settings.custom_links[0].icon, "fab fa-facebook");
        assert_eq!(settings.custom_links[1].url, "http://blog.example.com");
        assert_eq!(settings.custom_links[1].icon, "");
    }

    #[test]
    fn test_custom_links_keyed_by_index() {
        let settings = normalize(&json!({
            "custom_links": {
                "0": { "label": "First", "url": "https://one.example" },
                "1": { "label": "Second", "url": "https://two.example" },
            }
        }));
        let labels: Vec<_> = settings.custom_links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["First", "Second"]);
    }

    #[test]
    fn test_custom_link_with_rejected_scheme_is_dropped() {
        let settings = normalize(&json!({
            "custom_links": [{ "label": "Evil", "url": "javascript:alert(1)" }]
        }));
        assert!(settings.custom_links.is_empty());
    }

    #[test]
    fn test_custom_link_label_only_tags_is_dropped() {
        let settings = normalize(&json!({
            "custom_links": [{ "label": "<br>", "url": "https://example.com" }]
        }));
        assert!(settings.custom_links.is_empty());
    }

    #[test]
    fn test_custom_links_wrong_type_is_empty() {
        let settings = normalize(&json!({ "custom_links": "https://example.com" }));
        assert!(settings.custom_links.is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = json!({
            "phone_enabled": "1",
            "phone_number": "+1 555 0100",
            "email_enabled": true,
            "email_address": "a@example.com",
            "bg_color": "#ABC",
            "position": "bottom-left",
            "custom_links": [{ "label": "Site", "url": "example.com" }],
        });
        let once = normalize(&raw);
        let again = normalize(&serde_json::to_value(&once).unwrap());
        assert_eq!(once, again);
    }

    #[test]
    fn test_enabled_method_count_ignores_values() {
        let settings = normalize(&json!({ "phone_enabled": true, "whatsapp_enabled": true }));
        assert_eq!(settings.enabled_method_count(), 2);
        assert!(!settings.phone_active());
    }

    #[test]
    fn test_position_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(Position::BottomLeft).unwrap(),
            json!("bottom-left")
        );
    }
}
