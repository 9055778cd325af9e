//=========================================================================
// Scene Instance
//=========================================================================
//
// A mounted scene: the boxed `Scene`, its private `ResourceScope`, and the
// phase that guards the lifecycle order.
//
// Phases (monotonic):
//   Mounted ──initialize ok──> Active ──unload──> Unloaded ──dispose──> Disposed
//      └──────────────────────────── dispose ────────────────────────────┘
//
// Any lifecycle call after `Disposed` is a programming error and panics.
// Disposal itself is idempotent and also runs from `Drop`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneContext, TransitionSlot};
use crate::core::assets::ResourceScope;
use crate::core::error::SceneError;
use crate::core::globals::GlobalContext;
use crate::core::render::DrawSurface;

//=== ScenePhase ==========================================================

/// Where a mounted scene is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    /// Constructed and given a scope; not yet initialized.
    Mounted,
    /// Initialized and content loaded; may be updated and drawn.
    Active,
    /// `unload_content` has run.
    Unloaded,
    /// Scope released. Terminal.
    Disposed,
}

//=== SceneInstance =======================================================

/// Exclusive owner of one scene and its scene-local assets.
pub struct SceneInstance {
    scene: Box<dyn Scene>,
    resources: ResourceScope,
    phase: ScenePhase,
    name: String,
}

impl SceneInstance {
    //--- Construction -----------------------------------------------------

    pub fn new(scene: Box<dyn Scene>, resources: ResourceScope) -> Self {
        let name = scene.name().to_owned();
        Self {
            scene,
            resources,
            phase: ScenePhase::Mounted,
            name,
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Runs `Scene::initialize` (and through it `load_content`).
    ///
    /// On error the instance stays `Mounted`; the caller is expected to
    /// dispose it.
    ///
    /// # Panics
    ///
    /// If the scene was already initialized or disposed.
    pub fn initialize(
        &mut self,
        globals: &mut GlobalContext,
        transitions: &mut TransitionSlot,
    ) -> Result<(), SceneError> {
        self.expect_phase(ScenePhase::Mounted, "initialize");

        let mut ctx = SceneContext::new(&mut self.resources, globals, transitions);
        self.scene.initialize(&mut ctx)?;

        self.phase = ScenePhase::Active;
        debug!(
            target: "scene",
            "Scene '{}' initialized ({} local asset(s))",
            self.name,
            self.resources.len()
        );
        Ok(())
    }

    /// # Panics
    ///
    /// If the scene is not `Active`.
    pub fn update(
        &mut self,
        globals: &mut GlobalContext,
        transitions: &mut TransitionSlot,
        elapsed: Duration,
    ) {
        self.expect_phase(ScenePhase::Active, "update");

        let mut ctx = SceneContext::new(&mut self.resources, globals, transitions);
        self.scene.update(&mut ctx, elapsed);
    }

    /// # Panics
    ///
    /// If the scene is not `Active`.
    pub fn draw(&self, surface: &mut DrawSurface, elapsed: Duration) {
        self.expect_phase(ScenePhase::Active, "draw");
        self.scene.draw(surface, elapsed);
    }

    /// Runs `Scene::unload_content`.
    ///
    /// # Panics
    ///
    /// If the scene is not `Active`.
    pub fn unload(&mut self, globals: &mut GlobalContext, transitions: &mut TransitionSlot) {
        self.expect_phase(ScenePhase::Active, "unload");

        let mut ctx = SceneContext::new(&mut self.resources, globals, transitions);
        self.scene.unload_content(&mut ctx);

        self.phase = ScenePhase::Unloaded;
        trace!(target: "scene", "Scene '{}' unloaded", self.name);
    }

    /// Releases the scene scope. Safe to call any number of times.
    pub fn dispose(&mut self) {
        if self.phase == ScenePhase::Disposed {
            return;
        }

        self.resources.release();
        self.phase = ScenePhase::Disposed;
        debug!(target: "scene", "Scene '{}' disposed", self.name);
    }

    //--- Queries ----------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == ScenePhase::Disposed
    }

    /// The scene-local scope.
    pub fn resources(&self) -> &ResourceScope {
        &self.resources
    }

    //--- Internal Helpers -------------------------------------------------

    fn expect_phase(&self, expected: ScenePhase, call: &str) {
        assert!(
            self.phase != ScenePhase::Disposed,
            "lifecycle violation: `{}` called on disposed scene '{}'",
            call,
            self.name
        );
        assert!(
            self.phase == expected,
            "lifecycle violation: `{}` called on scene '{}' in phase {:?} (expected {:?})",
            call,
            self.name,
            self.phase,
            expected
        );
    }
}

impl Drop for SceneInstance {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for SceneInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneInstance")
            .field("name", &self.name)
            .field("phase", &self.phase)
            .field("resources", &self.resources)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
