//=========================================================================
// Scene Host
//=========================================================================
//
// Owns the active scene and applies requested transitions.
//
// States:
//   Empty             no active scene, nothing pending
//   Active            a scene is live, nothing pending
//   TransitionPending a request waits for the next commit point
//
// Commit order (top of frame, at most once):
//   1. unload + dispose the outgoing scene
//   2. mount the incoming scene with a fresh child scope
//   3. initialize it; on failure dispose it and stay Empty
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneInstance, SceneTransition, TransitionSlot};
use crate::core::error::TransitionError;
use crate::core::globals::GlobalContext;
use crate::core::render::DrawSurface;

//=== HostState ===========================================================

/// Observable state of a [`SceneHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Empty,
    Active,
    TransitionPending,
}

//=== SceneHost ===========================================================

/// Single-active-scene manager driven by the frame loop.
///
/// Requests are cheap and can come from anywhere; the switch itself only
/// happens in [`commit_if_pending`](Self::commit_if_pending), so a scene
/// is never retired while one of its own methods is running.
#[derive(Debug, Default)]
pub struct SceneHost {
    active: Option<SceneInstance>,
    pending: TransitionSlot,
    commits: u64,
}

impl SceneHost {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    //--- Requests ---------------------------------------------------------

    /// Queues `scene` to replace the active one at the next commit.
    ///
    /// A request that is still pending is discarded; its scene is dropped
    /// without any lifecycle call.
    pub fn request_change<T: Scene + 'static>(&mut self, scene: T) {
        self.request_boxed(Box::new(scene));
    }

    pub fn request_boxed(&mut self, scene: Box<dyn Scene>) {
        self.pending.request(SceneTransition::Switch(scene));
    }

    /// Queues retirement of the active scene with no replacement.
    pub fn request_clear(&mut self) {
        self.pending.request(SceneTransition::Clear);
    }

    //--- Commit -----------------------------------------------------------

    /// Applies the pending transition, if any.
    ///
    /// Returns `Ok(true)` when a transition was applied and `Ok(false)`
    /// when nothing was pending.
    ///
    /// # Errors
    ///
    /// [`TransitionError`] when the incoming scene fails to initialize.
    /// The outgoing scene is already retired at that point, so the host
    /// is left [`HostState::Empty`].
    pub fn commit_if_pending(
        &mut self,
        globals: &mut GlobalContext,
    ) -> Result<bool, TransitionError> {
        let Some(transition) = self.pending.take() else {
            return Ok(false);
        };

        self.retire_active(globals);
        self.commits += 1;

        let incoming = match transition {
            SceneTransition::Switch(scene) => scene,
            SceneTransition::Clear => {
                info!(target: "scene", "Scene host cleared");
                return Ok(true);
            }
        };

        let label = format!("scene:{}", incoming.name());
        let mut instance = SceneInstance::new(incoming, globals.shared_assets.child(label));

        match instance.initialize(globals, &mut self.pending) {
            Ok(()) => {
                info!(target: "scene", "Scene '{}' is now active", instance.name());
                self.active = Some(instance);
                Ok(true)
            }
            Err(source) => {
                let scene = instance.name().to_owned();
                instance.dispose();
                error!(target: "scene", "Scene '{}' failed to initialize: {}", scene, source);
                Err(TransitionError { scene, source })
            }
        }
    }

    //--- Frame ------------------------------------------------------------

    /// Commits any pending transition, then updates the active scene.
    ///
    /// # Errors
    ///
    /// Propagates a failed commit; no scene is updated that frame.
    pub fn update(
        &mut self,
        globals: &mut GlobalContext,
        elapsed: Duration,
    ) -> Result<(), TransitionError> {
        self.commit_if_pending(globals)?;

        if let Some(active) = self.active.as_mut() {
            active.update(globals, &mut self.pending, elapsed);
        }
        Ok(())
    }

    /// Draws the active scene. A no-op while empty.
    pub fn draw(&self, surface: &mut DrawSurface, elapsed: Duration) {
        if let Some(active) = &self.active {
            active.draw(surface, elapsed);
        }
    }

    /// Retires the active scene and drops any pending request.
    pub fn shutdown(&mut self, globals: &mut GlobalContext) {
        self.retire_active(globals);
        self.pending.clear();
        debug!(target: "scene", "Scene host shut down after {} commit(s)", self.commits);
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> HostState {
        if self.pending.is_pending() {
            HostState::TransitionPending
        } else if self.active.is_some() {
            HostState::Active
        } else {
            HostState::Empty
        }
    }

    pub fn active(&self) -> Option<&SceneInstance> {
        self.active.as_ref()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_ref().map(SceneInstance::name)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Number of transitions applied so far, failed ones included.
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    //--- Internal Helpers -------------------------------------------------

    fn retire_active(&mut self, globals: &mut GlobalContext) {
        if let Some(mut outgoing) = self.active.take() {
            debug!(target: "scene", "Retiring scene '{}'", outgoing.name());
            outgoing.unload(globals, &mut self.pending);
            outgoing.dispose();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::{MemoryAssetLoader, ResourceScope};
    use crate::core::error::{AssetError, SceneError};
    use crate::core::scene::SceneContext;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    //--- Recording Scene --------------------------------------------------

    struct Recorder {
        name: &'static str,
        log: Log,
        fail_load: bool,
        request_on_update: Option<&'static str>,
        request_on_init: Option<&'static str>,
        request_on_unload: Option<&'static str>,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: Arc::clone(log),
                fail_load: false,
                request_on_update: None,
                request_on_init: None,
                request_on_unload: None,
            }
        }

        fn failing(mut self) -> Self {
            self.fail_load = true;
            self
        }

        fn requesting(mut self, target: &'static str) -> Self {
            self.request_on_update = Some(target);
            self
        }

        fn requesting_on_init(mut self, target: &'static str) -> Self {
            self.request_on_init = Some(target);
            self
        }

        fn requesting_on_unload(mut self, target: &'static str) -> Self {
            self.request_on_unload = Some(target);
            self
        }

        fn record(&self, call: &str) {
            self.log.lock().unwrap().push(format!("{}.{}", self.name, call));
        }
    }

    impl Scene for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn initialize(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
            self.record("initialize");
            if let Some(target) = self.request_on_init.take() {
                ctx.request_change(Recorder::new(target, &self.log));
            }
            self.load_content(ctx)
        }

        fn load_content(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
            self.record("load_content");
            ctx.assets.acquire("sprite.png")?;
            if self.fail_load {
                ctx.assets.acquire("missing.png")?;
            }
            Ok(())
        }

        fn update(&mut self, ctx: &mut SceneContext<'_>, _elapsed: Duration) {
            self.record("update");
            if let Some(target) = self.request_on_update.take() {
                ctx.request_change(Recorder::new(target, &self.log));
            }
        }

        fn draw(&self, _surface: &mut DrawSurface, _elapsed: Duration) {
            self.record("draw");
        }

        fn unload_content(&mut self, ctx: &mut SceneContext<'_>) {
            self.record("unload_content");
            if let Some(target) = self.request_on_unload.take() {
                ctx.request_change(Recorder::new(target, &self.log));
            }
        }
    }

    impl Drop for Recorder {
        fn drop(&mut self) {
            self.record("drop");
        }
    }

    //--- Fixture ----------------------------------------------------------

    const FRAME: Duration = Duration::from_millis(16);

    struct Fixture {
        host: SceneHost,
        globals: GlobalContext,
        surface: DrawSurface,
        loader: Arc<MemoryAssetLoader>,
        log: Log,
    }

    impl Fixture {
        fn new() -> Self {
            let loader = MemoryAssetLoader::new()
                .with_asset("content/sprite.png", b"sprite".to_vec())
                .into_shared();
            let shared = ResourceScope::new("shared", "content", loader.clone());
            Self {
                host: SceneHost::new(),
                globals: GlobalContext::new(shared, (320, 240)),
                surface: DrawSurface::new(320, 240),
                loader,
                log: Log::default(),
            }
        }

        fn frame(&mut self) -> Result<(), TransitionError> {
            let result = self.host.update(&mut self.globals, FRAME);
            self.surface.begin_frame();
            self.host.draw(&mut self.surface, FRAME);
            result
        }

        /// Recorded calls, without drop notifications.
        fn lifecycle(&self) -> Vec<String> {
            self.log
                .lock()
                .unwrap()
                .iter()
                .filter(|entry| !entry.ends_with(".drop"))
                .cloned()
                .collect()
        }

        fn entries_for(&self, name: &str) -> Vec<String> {
            let prefix = format!("{}.", name);
            self.log
                .lock()
                .unwrap()
                .iter()
                .filter(|entry| entry.starts_with(&prefix))
                .cloned()
                .collect()
        }

        fn clear_log(&self) {
            self.log.lock().unwrap().clear();
        }
    }

    //--- Empty Host -------------------------------------------------------

    #[test]
    fn empty_host_tolerates_frames() {
        let mut fx = Fixture::new();

        assert_eq!(fx.host.state(), HostState::Empty);
        fx.frame().unwrap();

        assert_eq!(fx.host.state(), HostState::Empty);
        assert!(fx.surface.is_empty());
        assert_eq!(fx.host.commit_count(), 0);
    }

    #[test]
    fn commit_without_request_is_noop() {
        let mut fx = Fixture::new();
        assert!(!fx.host.commit_if_pending(&mut fx.globals).unwrap());
    }

    //--- Activation -------------------------------------------------------

    #[test]
    fn first_request_activates_on_next_frame() {
        let mut fx = Fixture::new();
        fx.host.request_change(Recorder::new("A", &fx.log));

        assert_eq!(fx.host.state(), HostState::TransitionPending);
        assert!(fx.lifecycle().is_empty(), "request alone runs nothing");

        fx.frame().unwrap();

        assert_eq!(
            fx.lifecycle(),
            vec!["A.initialize", "A.load_content", "A.update", "A.draw"]
        );
        assert_eq!(fx.host.state(), HostState::Active);
        assert_eq!(fx.host.active_name(), Some("A"));
        assert_eq!(fx.host.active().map(|a| a.resources().label()), Some("scene:A"));
    }

    #[test]
    fn last_request_wins() {
        let mut fx = Fixture::new();
        fx.host.request_change(Recorder::new("B", &fx.log));
        fx.host.request_change(Recorder::new("C", &fx.log));

        fx.frame().unwrap();

        assert_eq!(fx.entries_for("B"), vec!["B.drop"], "B never sees a lifecycle call");
        assert_eq!(fx.host.active_name(), Some("C"));
        assert_eq!(fx.loader.load_count(), 1);
    }

    //--- Transitions ------------------------------------------------------

    #[test]
    fn request_during_update_switches_on_following_frame() {
        let mut fx = Fixture::new();
        fx.host.request_change(Recorder::new("A", &fx.log).requesting("B"));

        fx.frame().unwrap();
        assert_eq!(
            fx.lifecycle(),
            vec!["A.initialize", "A.load_content", "A.update", "A.draw"],
            "same frame still draws A"
        );
        assert_eq!(fx.host.state(), HostState::TransitionPending);
        assert_eq!(fx.host.active_name(), Some("A"));

        fx.clear_log();
        fx.frame().unwrap();

        assert_eq!(
            fx.lifecycle(),
            vec![
                "A.unload_content",
                "B.initialize",
                "B.load_content",
                "B.update",
                "B.draw",
            ]
        );
        assert_eq!(fx.host.active_name(), Some("B"));
        assert_eq!(fx.loader.unload_count(), 1, "A's scope released");
    }

    #[test]
    fn failed_initialize_leaves_host_empty() {
        let mut fx = Fixture::new();
        fx.host.request_change(Recorder::new("A", &fx.log));
        fx.frame().unwrap();
        fx.clear_log();

        fx.host.request_change(Recorder::new("F", &fx.log).failing());
        let err = fx.frame().unwrap_err();

        assert_eq!(err.scene, "F");
        assert!(matches!(
            err.source,
            SceneError::Asset(AssetError::NotFound { .. })
        ));
        assert_eq!(
            fx.lifecycle(),
            vec!["A.unload_content", "F.initialize", "F.load_content"]
        );
        assert_eq!(fx.host.state(), HostState::Empty);
        assert_eq!(fx.loader.unload_count(), 2, "both scopes released");
    }

    #[test]
    fn host_recovers_after_failed_commit() {
        let mut fx = Fixture::new();
        fx.host.request_change(Recorder::new("F", &fx.log).failing());
        assert!(fx.frame().is_err());

        fx.host.request_change(Recorder::new("A", &fx.log));
        fx.frame().unwrap();

        assert_eq!(fx.host.active_name(), Some("A"));
        assert_eq!(fx.host.commit_count(), 2);
    }

    #[test]
    fn clear_request_retires_active() {
        let mut fx = Fixture::new();
        fx.host.request_change(Recorder::new("A", &fx.log));
        fx.frame().unwrap();
        fx.clear_log();

        fx.host.request_clear();
        assert!(fx.host.has_pending());
        fx.frame().unwrap();

        assert_eq!(fx.lifecycle(), vec!["A.unload_content"]);
        assert_eq!(fx.host.state(), HostState::Empty);
    }

    #[test]
    fn request_during_unload_commits_on_next_frame() {
        let mut fx = Fixture::new();
        fx.host.request_change(Recorder::new("A", &fx.log).requesting_on_unload("B"));
        fx.frame().unwrap();

        fx.host.request_clear();
        assert!(fx.host.commit_if_pending(&mut fx.globals).unwrap());

        assert_eq!(fx.host.state(), HostState::TransitionPending);
        assert_eq!(fx.host.active_name(), None);
        assert!(fx.entries_for("B").is_empty(), "B waits for the next commit");

        fx.frame().unwrap();

        assert_eq!(fx.host.state(), HostState::Active);
        assert_eq!(fx.host.active_name(), Some("B"));
        assert_eq!(fx.host.commit_count(), 3);
    }

    #[test]
    fn request_during_initialize_commits_on_next_frame() {
        let mut fx = Fixture::new();
        fx.host.request_change(Recorder::new("A", &fx.log).requesting_on_init("B"));

        assert!(fx.host.commit_if_pending(&mut fx.globals).unwrap());

        assert_eq!(fx.host.state(), HostState::TransitionPending);
        assert_eq!(fx.host.active_name(), Some("A"));
        assert!(fx.entries_for("B").is_empty(), "B waits for the next commit");

        fx.clear_log();
        fx.frame().unwrap();

        assert_eq!(
            fx.lifecycle(),
            vec!["A.unload_content", "B.initialize", "B.load_content", "B.update", "B.draw"]
        );
        assert_eq!(fx.host.state(), HostState::Active);
        assert_eq!(fx.host.active_name(), Some("B"));
    }

    //--- Shutdown ---------------------------------------------------------

    #[test]
    fn shutdown_retires_active_and_drops_pending() {
        let mut fx = Fixture::new();
        fx.host.request_change(Recorder::new("A", &fx.log));
        fx.frame().unwrap();
        fx.host.request_change(Recorder::new("B", &fx.log));
        fx.clear_log();

        fx.host.shutdown(&mut fx.globals);

        assert_eq!(fx.lifecycle(), vec!["A.unload_content"]);
        assert_eq!(fx.entries_for("B"), vec!["B.drop"]);
        assert_eq!(fx.host.state(), HostState::Empty);
        assert_eq!(fx.loader.unload_count(), 1);
    }
}
