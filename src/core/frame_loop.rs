//=========================================================================
// Frame Loop
//=========================================================================
//
// Per-frame driver for the scene host on the core (logic) thread.
//
// Each tick:
//   1. Refresh the input snapshot from the frame's event batches
//   2. Clamp elapsed time
//   3. SceneHost::update (commit pending, then update active)
//   4. Reset surface, SceneHost::draw, backend present
//   5. Exit if the cancel input fired while exit-on-cancel is set
//
// `spawn` runs ticks at a fixed rate until the platform closes or a tick
// asks to exit, then retires the active scene and releases shared assets.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use crate::core::error::TransitionError;
use crate::core::globals::GlobalContext;
use crate::core::input::InputEvent;
use crate::core::platform_bridge::{CoreSignal, EventCollector};
use crate::core::render::{DrawSurface, RenderBackend};
use crate::core::scene::SceneHost;

//=== TickControl =========================================================

/// Whether the loop keeps running after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== FrameLoop ===========================================================

/// Owns the scene host, the global context and the render target.
pub struct FrameLoop {
    host: SceneHost,
    globals: GlobalContext,
    backend: Box<dyn RenderBackend>,
    surface: DrawSurface,
    max_frame_delta: Duration,
    frame: u64,
}

impl FrameLoop {
    /// Longest elapsed time handed to a scene in one frame.
    pub const DEFAULT_MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

    //--- Construction -----------------------------------------------------

    /// Creates a loop with an empty host. The surface takes the viewport size.
    pub fn new(globals: GlobalContext, backend: Box<dyn RenderBackend>) -> Self {
        let (width, height) = globals.viewport;
        Self {
            host: SceneHost::new(),
            globals,
            backend,
            surface: DrawSurface::new(width, height),
            max_frame_delta: Self::DEFAULT_MAX_FRAME_DELTA,
            frame: 0,
        }
    }

    /// # Panics
    ///
    /// Panics if `max` is zero.
    pub fn with_max_frame_delta(mut self, max: Duration) -> Self {
        assert!(!max.is_zero(), "Max frame delta must be positive");
        self.max_frame_delta = max;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn host(&self) -> &SceneHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut SceneHost {
        &mut self.host
    }

    pub fn globals(&self) -> &GlobalContext {
        &self.globals
    }

    pub fn globals_mut(&mut self) -> &mut GlobalContext {
        &mut self.globals
    }

    /// Host and context together, for setup code that needs both.
    pub fn parts_mut(&mut self) -> (&mut SceneHost, &mut GlobalContext) {
        (&mut self.host, &mut self.globals)
    }

    /// The surface as drawn by the last tick.
    pub fn surface(&self) -> &DrawSurface {
        &self.surface
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    //--- Frame ------------------------------------------------------------

    /// Runs one frame.
    ///
    /// The frame is always drawn and presented, even when the commit at
    /// its start failed and the host is empty.
    ///
    /// # Errors
    ///
    /// The [`TransitionError`] of a failed commit, after presenting.
    pub fn tick(
        &mut self,
        batches: &[Vec<InputEvent>],
        elapsed: Duration,
    ) -> Result<TickControl, TransitionError> {
        self.frame += 1;

        let input = &mut self.globals.input;
        input.begin_frame();
        for batch in batches {
            input.process_events(batch);
        }
        input.finalize_frame();

        let elapsed = elapsed.min(self.max_frame_delta);
        let updated = self.host.update(&mut self.globals, elapsed);

        self.surface.begin_frame();
        self.host.draw(&mut self.surface, elapsed);
        self.backend.present(&self.surface);

        updated?;

        if self.globals.cancel_requested() {
            info!(target: "engine", "Cancel input received on frame {}, exiting", self.frame);
            return Ok(TickControl::Exit);
        }
        Ok(TickControl::Continue)
    }

    /// Retires the active scene and releases the shared scope.
    pub fn shutdown(&mut self) {
        self.host.shutdown(&mut self.globals);
        self.globals.shared_assets.release();
        info!(target: "engine", "Frame loop stopped after {} frame(s)", self.frame);
    }

    //--- Threading --------------------------------------------------------

    /// Moves the loop onto its own thread, ticking at `tps`.
    ///
    /// Stops when the platform closes (or disconnects) or when a tick
    /// returns [`TickControl::Exit`]; the latter is reported back through
    /// `signals` so the platform can close its window. The loop is shut
    /// down before the thread hands it back.
    pub(crate) fn spawn(
        mut self,
        mut collector: EventCollector,
        signals: Sender<CoreSignal>,
        tps: f64,
    ) -> thread::JoinHandle<Self> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut last_frame = Instant::now();

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events --------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!(target: "engine", "Platform closed, core thread exiting");
                    break;
                }

                //--- Step 2: Run the frame -----------------------------
                let elapsed = frame_start.duration_since(last_frame);
                last_frame = frame_start;

                match self.tick(collector.batches(), elapsed) {
                    Ok(TickControl::Continue) => {}
                    Ok(TickControl::Exit) => {
                        if signals.send(CoreSignal::Exit).is_err() {
                            debug!(target: "engine", "Platform already gone, exit signal dropped");
                        }
                        break;
                    }
                    Err(e) => error!(target: "scene", "{}", e),
                }

                //--- Step 3: Maintain pacing ---------------------------
                let spent = frame_start.elapsed();
                if spent < frame_duration {
                    thread::sleep(frame_duration - spent);
                }
            }

            self.shutdown();
            self
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
