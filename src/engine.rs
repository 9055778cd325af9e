//=========================================================================
// Engine
//=========================================================================
//
// Process-level entry point.
//
// Architecture:
// ```text
//     EngineBuilder ──build()──> Engine ──init()──> Engine ──run()──> [Runtime]
//         │                        │                                  │
//         ├─ with_tps()            └─ holds the RuntimeClaim          ├─ core thread: FrameLoop
//         ├─ with_loader()                                            └─ main thread: Platform
//         └─ with_window_*()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::bounded;
use log::{error, info};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::assets::{AssetLoader, FsAssetLoader, ResourceScope};
use crate::core::globals::{GlobalContext, RuntimeClaim, RuntimeToggles};
use crate::core::input::KeyCode;
use crate::core::platform_bridge::{EventCollector, PlatformError, WindowConfig};
use crate::core::render::{LogBackend, RenderBackend};
use crate::core::scene::SceneHost;
use crate::core::FrameLoop;
use crate::platform::Platform;

//=== EngineError =========================================================

#[derive(Debug, Error)]
pub enum EngineError {
    /// An engine was already built in this process.
    #[error("a runtime already exists in this process")]
    AlreadyRunning,

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

//=== EngineBuilder =======================================================

/// Configures and builds the process's [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0
/// - **Channel capacity**: 128 messages
/// - **Content root**: `content`, read through [`FsAssetLoader`]
/// - **Exit on cancel**: enabled, cancel key `Escape`
/// - **Max frame delta**: 250 ms
/// - **Window**: "Proscenium", 800x600
/// - **Backend**: [`LogBackend`]
///
/// # Examples
///
/// ```no_run
/// use proscenium::EngineBuilder;
/// use proscenium::scenes::TitleScene;
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_window_title("Demo")
///     .build()?
///     .init(|host, _globals| host.request_change(TitleScene::new()))
///     .run()?;
/// # Ok::<(), proscenium::EngineError>(())
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    content_root: PathBuf,
    loader: Option<Arc<dyn AssetLoader>>,
    toggles: RuntimeToggles,
    max_frame_delta: Duration,
    window: WindowConfig,
    backend: Option<Box<dyn RenderBackend>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            content_root: PathBuf::from("content"),
            loader: None,
            toggles: RuntimeToggles::default(),
            max_frame_delta: FrameLoop::DEFAULT_MAX_FRAME_DELTA,
            window: WindowConfig::default(),
            backend: None,
        }
    }

    //--- Timing -----------------------------------------------------------

    /// Sets the frame rate of the core thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Caps the elapsed time passed to scenes after a stall.
    ///
    /// # Panics
    ///
    /// Panics if `max` is zero.
    pub fn with_max_frame_delta(mut self, max: Duration) -> Self {
        assert!(!max.is_zero(), "Max frame delta must be positive");
        self.max_frame_delta = max;
        self
    }

    /// Sets the platform → core channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    //--- Assets -----------------------------------------------------------

    /// Directory every logical asset name is resolved under.
    pub fn with_content_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.content_root = root.into();
        self
    }

    pub fn with_loader(mut self, loader: Arc<dyn AssetLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    //--- Runtime Toggles --------------------------------------------------

    /// Initial value of the exit-on-cancel toggle. Scenes may change it.
    pub fn with_exit_on_cancel(mut self, enabled: bool) -> Self {
        self.toggles.exit_on_cancel = enabled;
        self
    }

    pub fn with_cancel_key(mut self, key: KeyCode) -> Self {
        self.toggles.cancel_key = key;
        self
    }

    //--- Window & Rendering -----------------------------------------------

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Window size in logical pixels; also the scenes' viewport.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero, got {}x{}", width, height);
        self.window.width = width;
        self.window.height = height;
        self
    }

    pub fn with_backend(mut self, backend: impl RenderBackend + 'static) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    //--- Build ------------------------------------------------------------

    /// Claims the process runtime and assembles the engine.
    ///
    /// # Errors
    ///
    /// [`EngineError::AlreadyRunning`] if an engine was already built in
    /// this process, even if that engine has since finished.
    pub fn build(self) -> Result<Engine, EngineError> {
        let claim = RuntimeClaim::try_acquire().ok_or(EngineError::AlreadyRunning)?;

        info!(
            target: "engine",
            "Building engine (TPS: {}, channel: {}, content: {})",
            self.tps,
            self.channel_capacity,
            self.content_root.display()
        );

        let loader = self.loader.unwrap_or_else(|| Arc::new(FsAssetLoader));
        let shared = ResourceScope::new("shared", self.content_root, loader);
        let viewport = (self.window.width, self.window.height);
        let globals = GlobalContext::new(shared, viewport).with_toggles(self.toggles);

        let backend = self.backend.unwrap_or_else(|| Box::new(LogBackend::new()));
        let frame_loop = FrameLoop::new(globals, backend).with_max_frame_delta(self.max_frame_delta);

        Ok(Engine {
            _claim: claim,
            frame_loop,
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// The process's single runtime.
///
/// # Architecture
///
/// ```text
/// Engine
///   ├─► FrameLoop (core thread @ TPS)
///   │     └─► SceneHost → active Scene
///   │
///   └─► Platform (main thread, winit)
///
/// platform → core: PlatformEvent (bounded channel)
/// core → platform: CoreSignal::Exit
/// ```
pub struct Engine {
    _claim: RuntimeClaim,
    frame_loop: FrameLoop,
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Gives setup code access to the host and global context before the
    /// first frame, typically to request the first scene.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut SceneHost, &mut GlobalContext),
    {
        let (host, globals) = self.frame_loop.parts_mut();
        init_fn(host, globals);
        info!(target: "engine", "Engine initialized (host: {:?})", self.frame_loop.host().state());
        self
    }

    //--- Execution --------------------------------------------------------

    /// Runs until the window closes or the active scene's cancel input
    /// ends the loop. Blocks the calling (main) thread.
    ///
    /// # Errors
    ///
    /// [`EngineError::Platform`] if the window system fails. The core
    /// thread is still joined and its scenes retired first.
    pub fn run(self) -> Result<(), EngineError> {
        info!(target: "engine", "Starting runtime (TPS: {})", self.tps);

        let (event_tx, event_rx) = bounded(self.channel_capacity);
        let (signal_tx, signal_rx) = bounded(1);

        let core = self
            .frame_loop
            .spawn(EventCollector::new(event_rx), signal_tx, self.tps);

        let result = Platform::new(event_tx, signal_rx, self.window).run();
        info!(target: "engine", "Platform event loop exited");

        if core.join().is_err() {
            error!(target: "engine", "Core thread panicked");
        }

        info!(target: "engine", "Shutdown complete");
        result.map_err(EngineError::from)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
