//! Widget rendering.
//!
//! Turns normalized [`ContactSettings`] into a [`WidgetDescription`]: the
//! ordered contact entries plus the display metadata the markup needs.
//! Rendering has no failure mode other than "render nothing", decided by
//! [`should_render`].

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::config::{Config, parse_version};
use crate::settings::{self, ContactSettings, CustomLink};
use crate::theme::WidgetTheme;

const WHATSAPP_SEND_URL: &str = "https://api.whatsapp.com/send/";

const REL_NOFOLLOW: &str = "nofollow";
const REL_NOFOLLOW_NOOPENER: &str = "nofollow noopener";

/// FontAwesome major version that introduced per-style prefixes.
const FA_STYLE_PREFIX_VERSION: (u32, u32, u32) = (5, 0, 0);

/// Inputs to rendering that come from app configuration rather than from
/// the admin-edited settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Loaded FontAwesome version; None when unknown.
    pub font_awesome_version: Option<(u32, u32, u32)>,
    pub fallback_icon: String,
    pub email_label: String,
    pub whatsapp_label: String,
    pub container_label: String,
    pub list_label: String,
    pub list_id: String,
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            font_awesome_version: parse_version(&config.icons.font_awesome_version),
            fallback_icon: config.icons.fallback.clone(),
            email_label: config.labels.email.clone(),
            whatsapp_label: config.labels.whatsapp.clone(),
            container_label: config.labels.container.clone(),
            list_label: config.labels.list.clone(),
            list_id: config.markup.list_id.clone(),
        }
    }

    /// Resolve a custom link icon to the class to emit.
    ///
    /// FontAwesome 5+ takes the class verbatim. Older or unknown versions
    /// only understand the `fa` prefix, so `fab `/`fas ` are rewritten.
    pub fn icon_class(&self, icon: &str) -> String {
        let icon = if icon.is_empty() {
            self.fallback_icon.as_str()
        } else {
            icon
        };

        if self
            .font_awesome_version
            .is_some_and(|v| v >= FA_STYLE_PREFIX_VERSION)
        {
            icon.to_string()
        } else {
            icon.replace("fab ", "fa ").replace("fas ", "fa ")
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Which contact method an entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Phone,
    Email,
    Whatsapp,
    Custom,
}

impl EntryKind {
    /// `data-icon` identifier for built-in methods.
    pub fn builtin_icon(self) -> Option<&'static str> {
        match self {
            EntryKind::Phone => Some("phone"),
            EntryKind::Email => Some("email"),
            EntryKind::Whatsapp => Some("whatsapp"),
            EntryKind::Custom => None,
        }
    }
}

/// One renderable contact option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub kind: EntryKind,
    pub href: String,
    pub display_label: String,
    /// `data-icon` name for built-in methods, icon class for custom links.
    pub icon: String,
    pub rel: &'static str,
    pub opens_new_tab: bool,
}

/// Everything needed to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetDescription {
    /// `"bottom-right"` or `"bottom-left"`.
    pub position_class: &'static str,
    #[serde(flatten)]
    pub theme: WidgetTheme,
    /// Layout hint for the toggle button's icon stack.
    pub toggle_icon_count: usize,
    /// Icons stacked inside the toggle button, in display order.
    pub toggle_icons: Vec<String>,
    pub entries: Vec<Entry>,
}

/// True iff at least one contact method is usable.
pub fn should_render(settings: &ContactSettings) -> bool {
    settings.phone_active()
        || settings.email_active()
        || settings.whatsapp_active()
        || !settings.custom_links.is_empty()
}

/// Build the WhatsApp click-to-chat URL.
///
/// Only the digits of `number` are kept. The message, when present, is
/// form-urlencoded and appended after `app_absent`.
pub fn whatsapp_href(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    let mut href = format!("{}?phone={}&app_absent=0", WHATSAPP_SEND_URL, digits);

    if !message.is_empty() {
        href.push_str("&text=");
        href.extend(form_urlencoded::byte_serialize(message.as_bytes()));
    }

    href
}

fn phone_entry(settings: &ContactSettings) -> Entry {
    Entry {
        kind: EntryKind::Phone,
        href: format!("tel:{}", settings.phone_number),
        display_label: settings.phone_number.clone(),
        icon: "phone".to_string(),
        rel: REL_NOFOLLOW,
        opens_new_tab: false,
    }
}

fn email_entry(settings: &ContactSettings, options: &RenderOptions) -> Entry {
    Entry {
        kind: EntryKind::Email,
        href: format!("mailto:{}", settings.email_address),
        display_label: options.email_label.clone(),
        icon: "email".to_string(),
        rel: REL_NOFOLLOW,
        opens_new_tab: false,
    }
}

fn whatsapp_entry(settings: &ContactSettings, options: &RenderOptions) -> Entry {
    Entry {
        kind: EntryKind::Whatsapp,
        href: whatsapp_href(&settings.whatsapp_number, &settings.whatsapp_message),
        display_label: options.whatsapp_label.clone(),
        icon: "whatsapp".to_string(),
        rel: REL_NOFOLLOW_NOOPENER,
        opens_new_tab: true,
    }
}

fn custom_entry(link: &CustomLink, options: &RenderOptions) -> Entry {
    Entry {
        kind: EntryKind::Custom,
        href: link.url.clone(),
        display_label: link.label.clone(),
        icon: options.icon_class(&link.icon),
        rel: REL_NOFOLLOW_NOOPENER,
        opens_new_tab: true,
    }
}

/// Icons shown inside the toggle button: one per enabled method flag, then
/// one per custom link.
fn toggle_icons(settings: &ContactSettings, options: &RenderOptions) -> Vec<String> {
    let builtin = [
        (settings.phone_enabled, "phone"),
        (settings.email_enabled, "email"),
        (settings.whatsapp_enabled, "whatsapp"),
    ];

    builtin
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, icon)| icon.to_string())
        .chain(
            settings
                .custom_links
                .iter()
                .map(|link| options.icon_class(&link.icon)),
        )
        .collect()
}

/// Render normalized settings.
///
/// Entries follow a fixed precedence: phone, email, WhatsApp, then custom
/// links in stored order. Callers decide visibility with [`should_render`].
pub fn render(settings: &ContactSettings, options: &RenderOptions) -> WidgetDescription {
    let mut entries = Vec::with_capacity(3 + settings.custom_links.len());

    if settings.phone_active() {
        entries.push(phone_entry(settings));
    }
    if settings.email_active() {
        entries.push(email_entry(settings, options));
    }
    if settings.whatsapp_active() {
        entries.push(whatsapp_entry(settings, options));
    }
    entries.extend(
        settings
            .custom_links
            .iter()
            .map(|link| custom_entry(link, options)),
    );

    let toggle_icons = toggle_icons(settings, options);

    WidgetDescription {
        position_class: settings.position.as_str(),
        theme: WidgetTheme::from_settings(settings),
        toggle_icon_count: settings.enabled_method_count() + settings.custom_links.len(),
        toggle_icons,
        entries,
    }
}

/// Single entry point for a page view: normalize the raw snapshot and render
/// it, or return None when no contact method is usable.
pub fn render_widget(raw: &Value, options: &RenderOptions) -> Option<WidgetDescription> {
    let settings = settings::normalize(raw);

    if !should_render(&settings) {
        tracing::debug!("No usable contact method configured, widget not rendered");
        return None;
    }

    let widget = render(&settings, options);
    tracing::debug!(
        "Rendered widget with {} entries at {}",
        widget.entries.len(),
        widget.position_class
    );
    Some(widget)
}
