//=========================================================================
// State Tracker
//=========================================================================
//
// Per-frame input snapshot handed to scenes as a read-only reference.
//
// Frame lifecycle (driven by the frame loop, never by scenes):
//   begin_frame() → process_events() → finalize_frame() → scene queries
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== StateTracker ========================================================

/// Held keys/buttons plus the transitions that happened this frame.
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State ------------------------------------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,

    //--- Frame Deltas ----------------------------------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    mouse_delta: (f32, f32),
    frame_start_position: (f32, f32),
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Forgets last frame's transitions. Held state survives.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.frame_start_position = self.mouse_position;
    }

    /// Applies a batch of events in order.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.apply(event);
        }
    }

    /// Computes values derived from the whole frame (mouse delta).
    pub fn finalize_frame(&mut self) {
        self.mouse_delta = (
            self.mouse_position.0 - self.frame_start_position.0,
            self.mouse_position.1 - self.frame_start_position.1,
        );
    }

    fn apply(&mut self, event: &InputEvent) {
        if let Some(modifiers) = event.modifiers() {
            self.modifiers = modifiers;
        }

        match *event {
            // A repeat KeyDown for a held key is not a new press.
            InputEvent::KeyDown { key, .. } => {
                if self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            InputEvent::KeyUp { key, .. } => {
                if self.keys_down.remove(&key) {
                    self.keys_released.insert(key);
                }
            }
            InputEvent::MouseButtonDown { button, .. } => {
                if self.buttons_down.insert(button) {
                    self.buttons_pressed.insert(button);
                }
            }
            InputEvent::MouseButtonUp { button, .. } => {
                if self.buttons_down.remove(&button) {
                    self.buttons_released.insert(button);
                }
            }
            InputEvent::MouseMoved { x, y } => self.mouse_position = (x, y),
        }
    }

    //--- Keyboard Queries -------------------------------------------------

    /// Key went down during this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Key is currently held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Key went up during this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    //--- Mouse Queries ----------------------------------------------------

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Movement since the start of the frame.
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    //--- Modifiers --------------------------------------------------------

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
