//! Open/close state of the widget on the page.
//!
//! The controller is a two-state machine driven by discrete input events.
//! Whether it listens to hover or to taps is decided once, at construction,
//! from the device's capabilities.

use crate::styles::{class, state};

/// Input capabilities reported by the page at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// The window exposes a touch-start handler.
    pub touch_events: bool,
    /// Maximum simultaneous touch points the device reports.
    pub max_touch_points: u32,
}

impl Capabilities {
    pub fn supports_touch(&self) -> bool {
        self.touch_events || self.max_touch_points > 0
    }
}

/// How the user opens the widget. Fixed for the controller's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceMode {
    /// Hover opens, leaving the container closes.
    Pointer,
    /// Tap the trigger to open, tap elsewhere to close.
    Touch,
}

impl DeviceMode {
    pub fn detect(capabilities: Capabilities) -> Self {
        if capabilities.supports_touch() {
            DeviceMode::Touch
        } else {
            DeviceMode::Pointer
        }
    }

    /// Value of the container's `data-device` attribute.
    pub fn device_attr(self) -> &'static str {
        match self {
            DeviceMode::Pointer => "desktop",
            DeviceMode::Touch => "mobile",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidgetState {
    #[default]
    Closed,
    Open,
}

/// Where a tap landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapTarget {
    /// The toggle button.
    Trigger,
    /// Inside the contact list.
    List,
    /// Anywhere else on the page.
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    PointerEnterTrigger,
    PointerLeaveContainer,
    Tap(TapTarget),
    /// A list entry was activated; its navigation proceeds on its own.
    SelectEntry,
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    mode: DeviceMode,
    state: WidgetState,
}

impl InteractionController {
    pub fn new(capabilities: Capabilities) -> Self {
        Self::with_mode(DeviceMode::detect(capabilities))
    }

    pub fn with_mode(mode: DeviceMode) -> Self {
        tracing::debug!("Widget interaction in {:?} mode", mode);
        Self {
            mode,
            state: WidgetState::Closed,
        }
    }

    pub fn mode(&self) -> DeviceMode {
        self.mode
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == WidgetState::Open
    }

    /// Next state for `event`, or None if the event is ignored.
    fn transition(&self, event: InteractionEvent) -> Option<WidgetState> {
        use InteractionEvent::*;

        match (self.mode, event) {
            (_, SelectEntry) => Some(WidgetState::Closed),

            (DeviceMode::Pointer, PointerEnterTrigger) => Some(WidgetState::Open),
            (DeviceMode::Pointer, PointerLeaveContainer) => Some(WidgetState::Closed),
            (DeviceMode::Pointer, Tap(_)) => None,

            (DeviceMode::Touch, Tap(TapTarget::Trigger)) if self.state == WidgetState::Closed => {
                Some(WidgetState::Open)
            }
            (DeviceMode::Touch, Tap(TapTarget::List)) => None,
            (DeviceMode::Touch, Tap(_)) => Some(WidgetState::Closed),
            (DeviceMode::Touch, PointerEnterTrigger | PointerLeaveContainer) => None,
        }
    }

    /// Apply an event. Returns true if the state changed.
    pub fn handle(&mut self, event: InteractionEvent) -> bool {
        let Some(next) = self.transition(event) else {
            return false;
        };

        let changed = next != self.state;
        if changed {
            tracing::trace!("{:?} -> {:?} on {:?}", self.state, next, event);
        }
        self.state = next;
        changed
    }

    /// `aria-expanded` value for the trigger button.
    pub fn aria_expanded(&self) -> &'static str {
        if self.is_open() { "true" } else { "false" }
    }

    /// Classes on the container for the current state.
    pub fn container_classes(&self) -> Vec<&'static str> {
        let mut classes = vec![class::CONTAINER, class::LOADED];
        if self.is_open() {
            classes.push(state::SHOW);
        }
        classes
    }

    /// Classes on the trigger button for the current state.
    pub fn trigger_classes(&self) -> Vec<&'static str> {
        let mut classes = vec![class::BUTTON];
        if self.is_open() {
            classes.push(state::BUTTON_OPEN);
        }
        classes
    }

    pub fn device_attr(&self) -> &'static str {
        self.mode.device_attr()
    }
}
