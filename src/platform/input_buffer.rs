//=========================================================================
// Input Buffer
//=========================================================================
//
// Per-redraw accumulator for converted input.
//
// - discrete: key and button transitions, in order; OS key repeat
//   (identical consecutive events) collapses to one entry
// - continuous: cursor motion, coalesced to the latest position
//
// Drained once per redraw into a single `PlatformEvent::Inputs`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    cursor: Option<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            cursor: None,
        }
    }

    /// Replaces the pending cursor position.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        debug_assert!(event.is_continuous(), "{:?} is not continuous", event);
        self.cursor = Some(event);
    }

    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    /// Takes everything buffered, or `None` if nothing arrived.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = self.discrete.drain(..).collect();
        let continuous = self.cursor.take().into_iter().collect();
        Some((discrete, continuous))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.cursor.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
