//=========================================================================
// Input Events
//=========================================================================
//
// Platform-independent input vocabulary.
//
// The platform layer translates window-system events into these types;
// the frame loop feeds them to the `StateTracker` that scenes query.
//
// Event Flow:
// ```text
// winit WindowEvent → InputProcessor → InputEvent → StateTracker → Scene
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Side, thumb and any other extra buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key (location, not produced character).
///
/// Covers what scenes typically poll: letters, digits, arrows and the
/// usual confirm/cancel keys. Everything else maps to `Unidentified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown, ArrowLeft, ArrowRight, ArrowUp,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    //--- Fallback ---------------------------------------------------------
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier keys held when an event was produced.
///
/// Left and right variants are not distinguished. On macOS, Command also
/// sets `ctrl` and Option maps to `alt`; elsewhere the Super key is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    /// Whether no modifier is held.
    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

//=== InputEvent ==========================================================

/// One normalized input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },
    KeyUp { key: KeyCode, modifiers: Modifiers },
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },

    /// Cursor position in window pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },
}

impl InputEvent {
    /// Shorthand for a key press without modifiers.
    pub fn key_down(key: KeyCode) -> Self {
        Self::KeyDown { key, modifiers: Modifiers::NONE }
    }

    /// Shorthand for a key release without modifiers.
    pub fn key_up(key: KeyCode) -> Self {
        Self::KeyUp { key, modifiers: Modifiers::NONE }
    }

    /// Modifier state carried by the event, if it carries one.
    pub fn modifiers(&self) -> Option<Modifiers> {
        match *self {
            Self::KeyDown { modifiers, .. }
            | Self::KeyUp { modifiers, .. }
            | Self::MouseButtonDown { modifiers, .. }
            | Self::MouseButtonUp { modifiers, .. } => Some(modifiers),
            Self::MouseMoved { .. } => None,
        }
    }

    /// Whether this is a positional (coalescable) event.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved { .. })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
