//=========================================================================
// Input Processor
//=========================================================================
//
// winit window events → engine `InputEvent`s.
//
// Modifier state arrives as its own event (`ModifiersChanged`), so it is
// cached here and stamped onto every key and button event that follows.
// Keys outside the engine's `KeyCode` set are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::event::{ElementState, KeyEvent, MouseButton as WinitMouseButton};
use winit::keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

#[derive(Debug, Default)]
pub(crate) struct InputProcessor {
    modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers::from(state);
    }

    //--- Conversion -------------------------------------------------------

    /// `None` for keys the engine does not know.
    pub(crate) fn key(&self, event: &KeyEvent) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };

        match KeyCode::from(code) {
            KeyCode::Unidentified => None,
            key => Some(self.key_transition(key, event.state)),
        }
    }

    pub(crate) fn mouse_button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = MouseButton::from(button);
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }

    pub(crate) fn cursor(&self, x: f64, y: f64) -> InputEvent {
        InputEvent::MouseMoved {
            x: x as f32,
            y: y as f32,
        }
    }

    fn key_transition(&self, key: KeyCode, state: ElementState) -> InputEvent {
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        }
    }
}

//=========================================================================
// winit Conversions
//=========================================================================

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key() || (cfg!(target_os = "macos") && state.super_key()),
            alt: state.alt_key(),
        }
    }
}

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            W::Digit0 => Self::Digit0, W::Digit1 => Self::Digit1,
            W::Digit2 => Self::Digit2, W::Digit3 => Self::Digit3,
            W::Digit4 => Self::Digit4, W::Digit5 => Self::Digit5,
            W::Digit6 => Self::Digit6, W::Digit7 => Self::Digit7,
            W::Digit8 => Self::Digit8, W::Digit9 => Self::Digit9,

            W::KeyA => Self::KeyA, W::KeyB => Self::KeyB, W::KeyC => Self::KeyC,
            W::KeyD => Self::KeyD, W::KeyE => Self::KeyE, W::KeyF => Self::KeyF,
            W::KeyG => Self::KeyG, W::KeyH => Self::KeyH, W::KeyI => Self::KeyI,
            W::KeyJ => Self::KeyJ, W::KeyK => Self::KeyK, W::KeyL => Self::KeyL,
            W::KeyM => Self::KeyM, W::KeyN => Self::KeyN, W::KeyO => Self::KeyO,
            W::KeyP => Self::KeyP, W::KeyQ => Self::KeyQ, W::KeyR => Self::KeyR,
            W::KeyS => Self::KeyS, W::KeyT => Self::KeyT, W::KeyU => Self::KeyU,
            W::KeyV => Self::KeyV, W::KeyW => Self::KeyW, W::KeyX => Self::KeyX,
            W::KeyY => Self::KeyY, W::KeyZ => Self::KeyZ,

            W::ArrowUp => Self::ArrowUp, W::ArrowDown => Self::ArrowDown,
            W::ArrowLeft => Self::ArrowLeft, W::ArrowRight => Self::ArrowRight,

            W::Space => Self::Space,
            W::Enter | W::NumpadEnter => Self::Enter,
            W::Escape => Self::Escape,
            W::Tab => Self::Tab,
            W::Backspace => Self::Backspace,
            W::Delete => Self::Delete,

            _ => Self::Unidentified,
        }
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => Self::Left,
            WinitMouseButton::Right => Self::Right,
            WinitMouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
