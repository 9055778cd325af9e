//=========================================================================
// Input
//=========================================================================
//
// Read-only input snapshot for scenes.
//
// The frame loop owns the `StateTracker` (inside `GlobalContext`) and
// refreshes it at the top of every frame; scenes see it only through
// `SceneContext::input`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::StateTracker;
