//=========================================================================
// Platform Subsystem
//=========================================================================
//
// winit window and input collection on the main thread.
//
// Architecture:
// ```text
//  Main Thread                         Core Thread
//  ┌──────────────────────────┐        ┌──────────────────────┐
//  │ winit event loop         │        │ FrameLoop            │
//  │   ↓                      │        │   EventCollector     │
//  │ InputProcessor           │        │   ↓                  │
//  │   ↓                      │        │   SceneHost          │
//  │ InputBuffer              │        │   ↓                  │
//  │   ↓ RedrawRequested      │ Inputs │   RenderBackend      │
//  │ flush ───────────────────┼───────>│                      │
//  │                          │  Exit  │                      │
//  │ about_to_wait <──────────┼────────┤ (cancel input)       │
//  └──────────────────────────┘        └──────────────────────┘
// ```
//
// The platform never touches scenes. Closing the window sends
// `WindowClosed`; the core asking to exit closes the window.
//
//=========================================================================

//=== Module Declarations =================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{CoreSignal, PlatformError, PlatformEvent, WindowConfig};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window owner and input forwarder.
///
/// Not `Send`: it must stay on the thread that runs the event loop.
pub(crate) struct Platform {
    /// Created lazily in `resumed`.
    window: Option<Window>,
    config: WindowConfig,
    buffer: InputBuffer,
    processor: InputProcessor,
    events: Sender<PlatformEvent>,
    signals: Receiver<CoreSignal>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        events: Sender<PlatformEvent>,
        signals: Receiver<CoreSignal>,
        config: WindowConfig,
    ) -> Self {
        debug!(target: "platform", "Platform created for window {:?}", config);
        Self {
            window: None,
            config,
            buffer: InputBuffer::new(),
            processor: InputProcessor::new(),
            events,
            signals,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the event loop cannot be created or aborts.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        info!(target: "platform", "Entering event loop");
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends everything buffered since the last redraw. Nothing is sent
    /// for an empty buffer.
    fn flush_input(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };

        let count = discrete.len() + continuous.len();
        trace!(target: "platform", "Flushing {} input event(s)", count);

        if self
            .events
            .send(PlatformEvent::Inputs { discrete, continuous })
            .is_err()
        {
            warn!(target: "platform", "Core thread gone, dropped {} input event(s)", count);
        }
    }

    /// Whether the core thread asked the platform to stop.
    fn core_requested_exit(&self) -> bool {
        match self.signals.try_recv() {
            Ok(CoreSignal::Exit) => true,
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                debug!(target: "platform", "Core thread finished");
                true
            }
        }
    }

    /// Tells the core thread the window is gone. The core may already
    /// have stopped when it was the one asking to close.
    fn notify_closed(&self) {
        if self.events.send(PlatformEvent::WindowClosed).is_err() {
            debug!(target: "platform", "Core thread gone before close notification");
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.notify_closed();
        self.window = None;
        event_loop.exit();
    }
}

//=== winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.close(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.close(event_loop);
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.processor.set_modifiers(modifiers.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.processor.cursor(position.x, position.y);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.processor.key(&key_event) {
                    self.buffer.push_discrete(event);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.processor.mouse_button(button, state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                self.flush_input();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.core_requested_exit() {
            info!(target: "platform", "Core requested exit, closing window");
            self.close(event_loop);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
