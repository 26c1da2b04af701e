//! floating-contacts-core: settings normalization and widget rendering for
//! the floating contact button.
//!
//! Pipeline: raw settings -> [`normalize`] -> [`ContactSettings`] ->
//! [`render`] -> [`WidgetDescription`] -> HTML via
//! [`WidgetDescription::to_html`]. [`render_widget`] runs the whole thing
//! for one page view. [`InteractionController`] models the widget's
//! open/close behavior on the page.

pub mod color;
pub mod config;
pub mod error;
pub mod interaction;
pub mod logging;
pub mod markup;
pub mod render;
pub mod sanitize;
pub mod settings;
pub mod store;
pub mod styles;
pub mod theme;

pub use color::adjust_brightness;
pub use config::{Config, ConfigLoadResult};
pub use error::{Error, Result};
pub use interaction::{
    Capabilities, DeviceMode, InteractionController, InteractionEvent, TapTarget, WidgetState,
};
pub use render::{
    Entry, EntryKind, RenderOptions, WidgetDescription, render, render_widget, should_render,
};
pub use settings::{ContactSettings, CustomLink, Position, normalize};
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
pub use theme::WidgetTheme;
