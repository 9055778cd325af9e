//=========================================================================
// Scene System
//=========================================================================
//
// Scene contract and the host that switches between scenes.
//
// Architecture:
//   SceneHost
//     ├─ active:  Option<SceneInstance>   (Box<dyn Scene> + own ResourceScope)
//     └─ pending: TransitionSlot          (last request wins)
//
// Flow per frame:
//   commit_if_pending() → active.update() → active.draw()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::assets::ResourceScope;
use crate::core::error::SceneError;
use crate::core::globals::{GlobalContext, RuntimeToggles};
use crate::core::input::StateTracker;
use crate::core::render::DrawSurface;

//=== Module Declarations =================================================

mod instance;
mod scene_host;
mod transition_slot;

//=== Public API ==========================================================

pub use instance::{SceneInstance, ScenePhase};
pub use scene_host::{HostState, SceneHost};
pub use transition_slot::{SceneTransition, TransitionSlot};

//=== Scene Trait =========================================================

/// A mutually-exclusive unit of application state with its own lifecycle.
///
/// The host drives every call; a scene never switches itself, it only
/// requests a change through [`SceneContext::request_change`].
///
/// # Lifecycle
///
/// ```text
/// constructed → initialize (→ load_content) → { update, draw }* → unload_content → disposed
/// ```
///
/// Construction must stay cheap and side-effect free: a scene that is
/// requested and then superseded before the next frame is dropped without
/// any lifecycle call.
///
/// # Minimal Implementation
///
/// ```rust
/// # use std::time::Duration;
/// # use proscenium::prelude::*;
/// struct Blank;
///
/// impl Scene for Blank {
///     fn update(&mut self, _ctx: &mut SceneContext<'_>, _elapsed: Duration) {}
///
///     fn draw(&self, surface: &mut DrawSurface, _elapsed: Duration) {
///         surface.clear(Color::BLACK);
///     }
/// }
/// ```
pub trait Scene: Send {
    /// Diagnostic name used in logs and scope labels.
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        let path = full.split('<').next().unwrap_or(full);
        path.rsplit("::").next().unwrap_or(path)
    }

    /// One-time setup, run when the scene first becomes active.
    ///
    /// The default only calls [`load_content`](Self::load_content).
    /// Overrides must end by calling it themselves.
    fn initialize(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
        self.load_content(ctx)
    }

    /// Acquires assets. Runs once, as the last step of `initialize`.
    fn load_content(&mut self, _ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
        Ok(())
    }

    /// Advances scene state by one frame.
    fn update(&mut self, ctx: &mut SceneContext<'_>, elapsed: Duration);

    /// Records this frame's draw commands. Scene state is read-only here.
    fn draw(&self, surface: &mut DrawSurface, elapsed: Duration);

    /// Releases anything the scene scope does not cover. Runs once, on retirement.
    fn unload_content(&mut self, _ctx: &mut SceneContext<'_>) {}
}

//=== SceneContext ========================================================

/// Everything a scene may touch during one lifecycle call.
///
/// Built by the host for each call and dropped right after, so a scene can
/// never keep a reference to shared state across frames.
pub struct SceneContext<'a> {
    /// This frame's input snapshot.
    pub input: &'a StateTracker,

    /// The scene's own scope, released when the scene is disposed.
    pub assets: &'a mut ResourceScope,

    /// The process-wide scope; cached across scenes.
    pub shared_assets: &'a mut ResourceScope,

    pub toggles: &'a mut RuntimeToggles,

    /// Drawable size in pixels.
    pub viewport: (u32, u32),

    transitions: &'a mut TransitionSlot,
}

impl<'a> SceneContext<'a> {
    pub(crate) fn new(
        assets: &'a mut ResourceScope,
        globals: &'a mut GlobalContext,
        transitions: &'a mut TransitionSlot,
    ) -> Self {
        let GlobalContext {
            input,
            shared_assets,
            toggles,
            viewport,
        } = globals;

        Self {
            input,
            assets,
            shared_assets,
            toggles,
            viewport: *viewport,
            transitions,
        }
    }

    /// Asks the host to switch to `scene` at the start of the next frame.
    pub fn request_change<T: Scene + 'static>(&mut self, scene: T) {
        self.transitions.request(SceneTransition::Switch(Box::new(scene)));
    }

    /// Asks the host to retire the active scene and run with none.
    pub fn request_clear(&mut self) {
        self.transitions.request(SceneTransition::Clear);
    }

    /// Whether a transition is already queued for the next commit.
    pub fn has_pending_transition(&self) -> bool {
        self.transitions.is_pending()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
