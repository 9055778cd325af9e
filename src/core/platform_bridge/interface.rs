//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages and errors exchanged between the platform (main) thread and
// the core (frame) thread.
//
//   platform ──PlatformEvent──> core
//   platform <──CoreSignal───── core
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Platform → core.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Input collected since the previous redraw.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// The window was closed; the core thread should stop.
    WindowClosed,
}

//=== CoreSignal ==========================================================

/// Core → platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CoreSignal {
    /// The frame loop ended on its own (cancel input); close the window.
    Exit,
}

//=== PlatformError =======================================================

/// Fatal windowing failures.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}

//=== WindowConfig ========================================================

/// Window attributes chosen through the engine builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Proscenium".to_owned(),
            width: 800,
            height: 600,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
