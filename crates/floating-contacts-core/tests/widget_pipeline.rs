//! End-to-end tests: raw settings snapshot in, widget out.

use floating_contacts_core::{
    Capabilities, EntryKind, InteractionController, InteractionEvent, MemoryStore,
    RenderOptions, SettingsStore, TapTarget, normalize, render_widget,
};
use serde_json::json;

#[test]
fn test_empty_store_renders_nothing() {
    let store = MemoryStore::default();
    let raw = store.get().unwrap();
    assert!(render_widget(&raw, &RenderOptions::default()).is_none());
}

#[test]
fn test_form_submission_to_html() {
    // Shape of an admin form post: string flags, links keyed by index.
    let raw = json!({
        "phone_enabled": "on",
        "phone_number": "+1 555 0100",
        "email_enabled": "on",
        "email_address": "sales@example.com",
        "whatsapp_enabled": "on",
        "whatsapp_number": "+1 (555) 123-4567",
        "whatsapp_message": "Hello from the website",
        "bg_color": "#0073AA",
        "position": "bottom-left",
        "custom_links": {
            "0": { "label": "Facebook", "url": "https://facebook.com/acme", "icon": "fab fa-facebook" },
            "1": { "label": "Broken", "url": "" },
            "2": { "label": "Docs", "url": "docs.example.com", "icon": "" },
        }
    });

    let options = RenderOptions::default();
    let widget = render_widget(&raw, &options).expect("widget should render");

    let kinds: Vec<_> = widget.entries.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        [
            EntryKind::Phone,
            EntryKind::Email,
            EntryKind::Whatsapp,
            EntryKind::Custom,
            EntryKind::Custom
        ]
    );
    assert_eq!(widget.position_class, "bottom-left");
    assert_eq!(widget.theme.bg_color, "#0073aa");
    assert_eq!(widget.toggle_icon_count, 5);
    assert_eq!(
        widget.entries[2].href,
        "https://api.whatsapp.com/send/?phone=15551234567&app_absent=0&text=Hello+from+the+website"
    );
    assert_eq!(widget.entries[4].href, "http://docs.example.com");
    assert_eq!(widget.entries[4].icon, "link");

    let html = widget.to_html(&options);
    assert!(html.contains("FloatingContacts--bottom-left"));
    assert!(html.contains("--fc-bg-color: #0073aa;"));
    assert!(!html.contains("Broken"));
}

#[test]
fn test_save_flow_normalizes_before_persisting() {
    let mut store = MemoryStore::default();
    let submitted = json!({
        "email_enabled": "1",
        "email_address": "not valid",
        "bg_color": "blue",
        "position": "middle",
    });

    store.save(&normalize(&submitted)).unwrap();
    let persisted = store.get().unwrap();

    assert_eq!(persisted["email_address"], "");
    assert_eq!(persisted["bg_color"], "#1e88e5");
    assert_eq!(persisted["position"], "bottom-right");
    // Flag without a usable address: nothing to show.
    assert!(render_widget(&persisted, &RenderOptions::default()).is_none());
}

#[test]
fn test_touch_session() {
    let mut controller = InteractionController::new(Capabilities {
        touch_events: true,
        max_touch_points: 10,
    });

    assert!(!controller.is_open());
    controller.handle(InteractionEvent::Tap(TapTarget::Trigger));
    assert!(controller.is_open());
    controller.handle(InteractionEvent::Tap(TapTarget::List));
    assert!(controller.is_open());
    controller.handle(InteractionEvent::SelectEntry);
    assert!(!controller.is_open());
    controller.handle(InteractionEvent::Tap(TapTarget::Trigger));
    controller.handle(InteractionEvent::Tap(TapTarget::Outside));
    assert!(!controller.is_open());
}
