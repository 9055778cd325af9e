//=========================================================================
// Core Systems
//=========================================================================
//
// Everything that runs on the core (logic) thread.
//
// Architecture:
//   FrameLoop
//     ├─ GlobalContext   input snapshot, shared assets, runtime toggles
//     ├─ SceneHost       active scene + pending transition
//     └─ RenderBackend   presents the DrawSurface each frame
//
// The platform layer only talks to this module through `platform_bridge`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod assets;
pub mod error;
pub mod globals;
pub mod input;
pub mod render;
pub mod scene;

mod frame_loop;
pub(crate) mod platform_bridge;

//=== Public API ==========================================================

pub use error::{AssetError, SceneError, TransitionError};
pub use frame_loop::{FrameLoop, TickControl};
