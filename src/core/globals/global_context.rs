//=========================================================================
// Global Context
//=========================================================================
//
// Process-wide data that scenes reach through their `SceneContext`.
//
// Contains:
// - input: the frame's input snapshot (read-only to scenes)
// - shared_assets: the long-lived resource scope (fonts, shared textures)
// - toggles: runtime switches scenes may flip (exit on cancel, ...)
// - viewport: drawable size in pixels, for layout
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::assets::ResourceScope;
use crate::core::input::{KeyCode, StateTracker};

//=== RuntimeToggles ======================================================

/// Global switches read by the frame loop and writable by any scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeToggles {
    /// When set, pressing `cancel_key` ends the frame loop.
    pub exit_on_cancel: bool,

    /// The designated cancel input.
    pub cancel_key: KeyCode,
}

impl Default for RuntimeToggles {
    fn default() -> Self {
        Self {
            exit_on_cancel: true,
            cancel_key: KeyCode::Escape,
        }
    }
}

//=== GlobalContext =======================================================

/// Shared state owned by the frame loop for the life of the process.
///
/// Scenes never hold on to it; they borrow pieces of it for the duration
/// of one lifecycle call.
#[derive(Debug)]
pub struct GlobalContext {
    pub input: StateTracker,
    pub shared_assets: ResourceScope,
    pub toggles: RuntimeToggles,
    pub viewport: (u32, u32),
}

impl GlobalContext {
    /// Creates a context around the process-wide asset scope.
    pub fn new(shared_assets: ResourceScope, viewport: (u32, u32)) -> Self {
        Self {
            input: StateTracker::new(),
            shared_assets,
            toggles: RuntimeToggles::default(),
            viewport,
        }
    }

    pub fn with_toggles(mut self, toggles: RuntimeToggles) -> Self {
        self.toggles = toggles;
        self
    }

    /// Whether the cancel input should end the loop this frame.
    pub fn cancel_requested(&self) -> bool {
        self.toggles.exit_on_cancel && self.input.is_key_pressed(self.toggles.cancel_key)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
