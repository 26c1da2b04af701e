//! Shared CSS class constants for the widget markup.
//!
//! The stylesheet and the client script key off these names, so the markup
//! writer and the interaction controller both take them from here.

/// Structural classes.
pub mod class {
    /// Widget container (`.FloatingContacts`).
    pub const CONTAINER: &str = "FloatingContacts";

    /// Position modifier prefix; the position name is appended
    /// (`.FloatingContacts--bottom-right`).
    pub const POSITION_PREFIX: &str = "FloatingContacts--";

    /// Added once the client script has initialized (`.FloatingContacts_loaded`).
    pub const LOADED: &str = "FloatingContacts_loaded";

    /// Toggle/trigger button (`.FloatingContacts__button`).
    pub const BUTTON: &str = "FloatingContacts__button";

    /// Close glyph inside the button (`.FloatingContacts__button-close`).
    pub const BUTTON_CLOSE: &str = "FloatingContacts__button-close";

    /// Icon stack inside the button (`.FloatingContacts__button-icons`).
    pub const BUTTON_ICONS: &str = "FloatingContacts__button-icons";

    /// Contact list (`.FloatingContacts__list`).
    pub const LIST: &str = "FloatingContacts__list";

    /// One entry in the list (`.FloatingContacts__list-item`).
    pub const LIST_ITEM: &str = "FloatingContacts__list-item";

    /// Custom link icon (`.FloatingContacts__link-icon`).
    pub const LINK_ICON: &str = "FloatingContacts__link-icon";

    /// Custom link text (`.FloatingContacts__link-label`).
    pub const LINK_LABEL: &str = "FloatingContacts__link-label";
}

/// State classes toggled at runtime.
pub mod state {
    /// Container is open (`.show`).
    pub const SHOW: &str = "show";

    /// Button while the list is open (`.FloatingContacts__button_dialog-open`).
    pub const BUTTON_OPEN: &str = "FloatingContacts__button_dialog-open";
}
