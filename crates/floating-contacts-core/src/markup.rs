//! HTML serialization of a rendered widget.

use std::fmt::Write;

use crate::render::{Entry, EntryKind, RenderOptions, WidgetDescription};
use crate::styles::class;

/// Three-dot glyph used both as the close icon and the first stacked icon.
const DOTS: &str = r#"<span data-icon="dots"><i></i><i></i><i></i></span>"#;

/// Escape text for use in HTML content or a quoted attribute value.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_button(out: &mut String, widget: &WidgetDescription, options: &RenderOptions) {
    let _ = writeln!(
        out,
        r#"<button type="button" class="{}" aria-expanded="false" aria-controls="{}">"#,
        class::BUTTON,
        escape_html(&options.list_id)
    );
    let _ = writeln!(
        out,
        r#"<span class="{}">{}</span>"#,
        class::BUTTON_CLOSE,
        DOTS
    );
    let _ = write!(
        out,
        r#"<span class="{}" data-icons-number="{}">{}"#,
        class::BUTTON_ICONS,
        widget.toggle_icon_count,
        DOTS
    );
    for icon in &widget.toggle_icons {
        let _ = write!(out, r#"<span data-icon="{}"></span>"#, escape_html(icon));
    }
    out.push_str("</span>\n</button>\n");
}

fn write_entry(out: &mut String, entry: &Entry) {
    let _ = write!(
        out,
        r#"<a href="{}" class="{}""#,
        escape_html(&entry.href),
        class::LIST_ITEM
    );
    if let Some(icon) = entry.kind.builtin_icon() {
        let _ = write!(out, r#" data-icon="{}""#, icon);
    }
    let _ = write!(out, r#" rel="{}""#, entry.rel);
    if entry.opens_new_tab {
        out.push_str(r#" target="_blank""#);
    }
    out.push('>');

    match entry.kind {
        EntryKind::Custom => {
            let _ = write!(
                out,
                r#"<i class="{} {}" aria-hidden="true"></i><span class="{}">{}</span>"#,
                class::LINK_ICON,
                escape_html(&entry.icon),
                class::LINK_LABEL,
                escape_html(&entry.display_label)
            );
        }
        _ => out.push_str(&escape_html(&entry.display_label)),
    }

    out.push_str("</a>\n");
}

impl WidgetDescription {
    /// Serialize the widget to HTML.
    pub fn to_html(&self, options: &RenderOptions) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            r#"<div class="{} {}{}" style="{}" aria-label="{}">"#,
            class::CONTAINER,
            class::POSITION_PREFIX,
            self.position_class,
            escape_html(&self.theme.inline_style()),
            escape_html(&options.container_label)
        );

        write_button(&mut out, self, options);

        let _ = writeln!(
            out,
            r#"<div id="{}" class="{}" aria-label="{}">"#,
            escape_html(&options.list_id),
            class::LIST,
            escape_html(&options.list_label)
        );
        for entry in &self.entries {
            write_entry(&mut out, entry);
        }
        out.push_str("</div>\n</div>\n");

        out
    }
}
