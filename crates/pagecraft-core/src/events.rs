// crates/pagecraft-core/src/events.rs
use glam::DVec2;

use crate::ComponentId;

/// Host input, already hit-tested against the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { position: DVec2, button: MouseButton, target: HitTarget },
    PointerMove { position: DVec2, modifiers: KeyModifiers },
    /// Delivered wherever the pointer is released, including outside the canvas.
    PointerUp { position: DVec2 },
    Click { target: HitTarget },
    DoubleClick { target: HitTarget },
    ContextMenu { position: DVec2, target: HitTarget },
    KeyDown { key: KeyCode, modifiers: KeyModifiers, focus: FocusTarget },
    KeyUp { key: KeyCode, modifiers: KeyModifiers },
    /// New content typed into the inline editor of `id`.
    TextInput { id: ComponentId, text: String },
    /// The inline edit field lost focus.
    EditFieldBlur,
    /// Display refresh; pointer moves are applied at most once per frame.
    AnimationFrame,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HitTarget {
    /// Empty canvas surface.
    Canvas,
    Component { id: ComponentId, region: HitRegion },
    /// Anything outside the editing surface (toolbars, property panels, ...).
    Outside,
}

impl HitTarget {
    pub fn body(id: impl Into<ComponentId>) -> Self {
        HitTarget::Component {
            id: id.into(),
            region: HitRegion::Body,
        }
    }

    pub fn component_id(&self) -> Option<&ComponentId> {
        match self {
            HitTarget::Component { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Which part of a component was hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitRegion {
    Body,
    /// The rendered text content of a heading, text or button.
    TextContent,
    /// An interactive form control inside the component.
    Interactive,
    /// Anything explicitly marked non-draggable.
    NoDrag,
    /// A resize handle. `measured_size` is the on-screen size for components
    /// whose stored width/height is `auto`.
    ResizeHandle { handle: ResizeHandle, measured_size: Option<DVec2> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    Corner(Corner),
    Edge(EdgeAxis),
    /// Legacy handle: width follows the pointer, height keeps the aspect ratio.
    AspectLocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::NorthWest,
        Corner::NorthEast,
        Corner::SouthWest,
        Corner::SouthEast,
    ];

    /// True when dragging this corner moves the left edge.
    pub fn moves_left(&self) -> bool {
        matches!(self, Corner::NorthWest | Corner::SouthWest)
    }

    /// True when dragging this corner moves the top edge.
    pub fn moves_top(&self) -> bool {
        matches!(self, Corner::NorthWest | Corner::NorthEast)
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Corner::NorthWest => "nw",
            Corner::NorthEast => "ne",
            Corner::SouthWest => "sw",
            Corner::SouthEast => "se",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeAxis {
    Width,
    Height,
    /// Legacy free handle: both dimensions follow the pointer, origin stays put.
    Both,
}

/// Where keyboard focus was when a key went down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    Canvas,
    /// The inline text editor of a component.
    EditField(ComponentId),
    /// An input or textarea elsewhere in the UI (property panels).
    ExternalInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Enter,
    Escape,
    Space,
    Backspace,
    Delete,
    Tab,
    Alt,
    Shift,
    Control,
    Meta,
    Character(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::default()
        }
    }
}
