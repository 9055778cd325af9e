//=========================================================================
// Prelude
//=========================================================================
//
// Re-exports what a scene implementation usually needs.
//
// Usage:
//   use proscenium::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Scenes
pub use crate::core::scene::{HostState, Scene, SceneContext, SceneHost};

// Assets
pub use crate::core::assets::{AssetHandle, AssetLoader, ResourceScope};
pub use crate::core::error::{AssetError, SceneError};

// Globals
pub use crate::core::globals::{GlobalContext, RuntimeToggles};

// Input
pub use crate::core::input::{KeyCode, Modifiers, MouseButton, StateTracker};

// Rendering
pub use crate::core::render::{Color, DrawSurface};
