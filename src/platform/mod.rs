//=========================================================================
// Platform Subsystem
//
// Owns the winit window and drives the navigation frame clock.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌──────────────────────────────────────────────┐
//  │  Winit Event Loop                            │
//  │   ↓                                          │
//  │  InputProcessor  (winit → InputEvent)        │
//  │   ↓                                          │
//  │  InputBuffer     (one ordered batch / frame) │
//  │   ↓                                          │
//  │  RedrawRequested                             │
//  │   ├─ flush → window channel                  │
//  │   └─ FrameHandler::frame(dt) ←─ UI channel   │
//  │        ↑                         ↑           │
//  │        └─ undelivered batch      InputSender │
//  │           requeued if full                   │
//  │        ↓                                     │
//  │      NavigationController::tick              │
//  └──────────────────────────────────────────────┘
//
//  Frame Boundary: RedrawRequested
//    → All buffered input sent as one batch
//    → Handler runs exactly once with the measured dt
//    → Empty buffers NOT sent
// ```
//
// Notes:
// The controller reads the physics body synchronously, so the frame runs
// on the event loop thread. UI overlays on other threads reach it through
// a separate channel, so they can never fill the one carrying key events.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::time::Instant;

use crossbeam_channel::{Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::input::InputEvent;
use crate::core::platform_bridge::{PlatformError, PlatformEvent, TickControl};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Constants ===========================================================

/// Longest frame step handed to the controller, in seconds.
///
/// A stalled window (drag, breakpoint, suspend) would otherwise produce
/// one huge step that teleports the avatar.
const MAX_FRAME_DT: f32 = 0.1;

//=== FrameHandler ========================================================

/// Per-frame callback invoked on every redraw, after input is flushed.
pub(crate) trait FrameHandler {
    fn frame(&mut self, dt: f32) -> TickControl;
}

//=== Platform ============================================================

/// Window manager and frame clock.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(sender, handler, title)`
/// 2. **Execution**: `platform.run()` blocks on the winit event loop
/// 3. **Frames**: every `RedrawRequested` flushes input then calls the handler
/// 4. **Shutdown**: window close or `TickControl::Exit` ends the loop
///
/// This type is NOT Send/Sync - it must remain on the main thread.
pub(crate) struct Platform<H: FrameHandler> {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,
    window_title: String,

    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    handler: H,

    /// Timestamp of the previous frame (None before the first one).
    last_frame: Option<Instant>,
}

impl<H: FrameHandler> Platform<H> {
    //--- Construction -----------------------------------------------------

    /// Creates a new platform. The window is created lazily in `resumed()`.
    pub(crate) fn new(
        event_sender: Sender<PlatformEvent>,
        handler: H,
        window_title: impl Into<String>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            window_title: window_title.into(),
            buffer: InputBuffer::new(),
            event_sender,
            handler,
            last_frame: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes or the handler
    /// asks to exit.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Flushes buffered input into the window channel as one batch.
    ///
    /// The channel is drained by the handler on this same thread, so the
    /// send must not block. A batch that does not fit goes back into the
    /// buffer and leads the next flush; key-ups are never lost.
    fn flush_input_buffer(&mut self) {
        let Some(events) = self.buffer.drain() else {
            return;
        };

        let count = events.len();
        trace!(target: "platform::input", "Flushing {} input events", count);

        match self.event_sender.try_send(PlatformEvent::Inputs(events)) {
            Ok(()) => {}
            Err(TrySendError::Full(PlatformEvent::Inputs(events))) => {
                warn!(
                    target: "platform::input",
                    "Channel full, {} input events held for the next frame",
                    count
                );
                self.buffer.requeue(events);
            }
            Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} input events",
                    count
                );
            }
        }
    }

    fn buffer_input(&mut self, event: Option<InputEvent>) {
        match event {
            Some(event) => self.buffer.push(event),
            None => trace!(target: "platform::input", "Unmapped input ignored"),
        }
    }

    /// Measures dt since the previous frame, clamped to `[0, MAX_FRAME_DT]`.
    fn frame_dt(&mut self, now: Instant) -> f32 {
        let dt = match self.last_frame {
            Some(previous) => now.saturating_duration_since(previous).as_secs_f32(),
            None => 0.0,
        };
        self.last_frame = Some(now);

        if dt > MAX_FRAME_DT {
            debug!(target: "platform", "Long frame ({:.3}s) clamped to {}s", dt, MAX_FRAME_DT);
        }
        dt.min(MAX_FRAME_DT)
    }

    /// One frame boundary: flush input, then advance the handler.
    fn advance_frame(&mut self, now: Instant) -> TickControl {
        self.flush_input_buffer();
        let dt = self.frame_dt(now);
        self.handler.frame(dt)
    }
}

//=== Winit Integration ===================================================

impl<H: FrameHandler> ApplicationHandler for Platform<H> {
    /// Creates the window on first activation.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.window_title.clone())
            .with_inner_size(LogicalSize::new(800, 600));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.try_send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.try_send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                self.buffer_input(InputProcessor::process_key_event(key_event));
            }

            WindowEvent::Focused(focused) => {
                debug!(target: "platform::input", "Window focus changed: {}", focused);
                self.buffer_input(InputProcessor::process_focus(*focused));
            }

            WindowEvent::RedrawRequested => {
                if self.advance_frame(Instant::now()) == TickControl::Exit {
                    info!(target: "platform", "Frame handler requested exit");
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::NavigationConfig;
    use crate::core::controller::NavigationController;
    use crate::core::input::{KeyCode, TouchPatch};
    use crate::core::physics::{PhysicsBody, SimpleBody};
    use crate::core::platform_bridge::{EventCollector, InputSender};
    use crossbeam_channel::{bounded, unbounded};
    use glam::Vec3;
    use std::time::Duration;

    /// Records every dt it receives.
    #[derive(Default)]
    struct RecordingHandler {
        dts: Vec<f32>,
        exit_after: Option<usize>,
    }

    impl FrameHandler for RecordingHandler {
        fn frame(&mut self, dt: f32) -> TickControl {
            self.dts.push(dt);
            match self.exit_after {
                Some(n) if self.dts.len() >= n => TickControl::Exit,
                _ => TickControl::Continue,
            }
        }
    }

    fn platform(sender: Sender<PlatformEvent>) -> Platform<RecordingHandler> {
        Platform::new(sender, RecordingHandler::default(), "test")
    }

    //=====================================================================
    // Flush Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let (tx, _rx) = unbounded();
        let platform = platform(tx);
        assert!(platform.window.is_none(), "Window should be created lazily");
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_events() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.buffer_input(Some(InputEvent::KeyDown(KeyCode::Space)));
        platform.buffer_input(InputProcessor::process_focus(false));
        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs(events)) => {
                assert_eq!(
                    events,
                    vec![InputEvent::KeyDown(KeyCode::Space), InputEvent::FocusLost]
                );
            }
            other => panic!("Expected Inputs event, got {:?}", other),
        }
    }

    #[test]
    fn key_up_survives_a_full_channel() {
        let (tx, rx) = bounded(1);
        let mut platform = platform(tx);

        platform.buffer_input(Some(InputEvent::KeyDown(KeyCode::KeyW)));
        platform.flush_input_buffer();
        platform.buffer_input(Some(InputEvent::KeyUp(KeyCode::KeyW)));
        platform.flush_input_buffer();
        assert_eq!(rx.len(), 1, "Second batch held back");

        platform.buffer_input(Some(InputEvent::KeyDown(KeyCode::KeyA)));
        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::Inputs(_))));
        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs(events)) => {
                assert_eq!(
                    events,
                    vec![InputEvent::KeyUp(KeyCode::KeyW), InputEvent::KeyDown(KeyCode::KeyA)]
                );
            }
            other => panic!("Expected the held batch, got {:?}", other),
        }
    }

    #[test]
    fn flush_survives_disconnected_channel() {
        let (tx, rx) = bounded(1);
        let mut platform = platform(tx);
        drop(rx);

        platform.buffer_input(Some(InputEvent::KeyUp(KeyCode::KeyB)));
        platform.flush_input_buffer();

        assert!(platform.buffer.drain().is_none(), "Nothing left to deliver");
    }

    #[test]
    fn multiple_flushes_clear_buffer() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.buffer_input(Some(InputEvent::KeyDown(KeyCode::KeyA)));
        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    //=====================================================================
    // Frame Clock Tests
    //=====================================================================

    #[test]
    fn first_frame_has_zero_dt() {
        let (tx, _rx) = unbounded();
        let mut platform = platform(tx);

        platform.advance_frame(Instant::now());

        assert_eq!(platform.handler.dts, vec![0.0]);
    }

    #[test]
    fn dt_is_measured_and_clamped() {
        let (tx, _rx) = unbounded();
        let mut platform = platform(tx);
        let start = Instant::now();

        platform.advance_frame(start);
        platform.advance_frame(start + Duration::from_millis(20));
        platform.advance_frame(start + Duration::from_secs(3));

        let dts = &platform.handler.dts;
        assert!((dts[1] - 0.02).abs() < 1e-4);
        assert_eq!(dts[2], MAX_FRAME_DT);
    }

    #[test]
    fn frame_flushes_before_handler_and_propagates_exit() {
        let (tx, rx) = unbounded();
        let mut platform = Platform::new(
            tx,
            RecordingHandler { dts: Vec::new(), exit_after: Some(2) },
            "test",
        );
        let now = Instant::now();

        platform.buffer_input(Some(InputEvent::KeyDown(KeyCode::KeyW)));
        assert_eq!(platform.advance_frame(now), TickControl::Continue);
        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::Inputs(_))));

        assert_eq!(platform.advance_frame(now), TickControl::Exit);
    }

    //=====================================================================
    // Navigation Round Trip
    //=====================================================================

    /// Controller, collector and body wired the way the engine wires them.
    struct Navigation {
        controller: NavigationController,
        collector: EventCollector,
        body: SimpleBody,
    }

    impl FrameHandler for Navigation {
        fn frame(&mut self, dt: f32) -> TickControl {
            if self.collector.collect_frame() == TickControl::Exit {
                return TickControl::Exit;
            }
            if let Some(patch) = self.collector.touch_patch() {
                self.controller.set_touch(patch);
            }
            self.controller.tick(dt, self.collector.batches(), &mut self.body);
            TickControl::Continue
        }
    }

    #[test]
    fn touch_flood_does_not_leave_a_key_stuck() {
        let (window_tx, window_rx) = bounded(128);
        let (ui_tx, ui_rx) = bounded(128);
        let ui = InputSender::new(ui_tx);
        let mut body = SimpleBody::new();
        body.spawn(Vec3::ZERO);
        let navigation = Navigation {
            controller: NavigationController::new(NavigationConfig::default()),
            collector: EventCollector::new(window_rx, ui_rx),
            body,
        };
        let mut platform = Platform::new(window_tx, navigation, "test");
        let start = Instant::now();

        platform.buffer_input(Some(InputEvent::KeyDown(KeyCode::KeyW)));
        platform.advance_frame(start);
        assert!(platform.handler.controller.intent().forward);

        for i in 0..128 {
            ui.set_touch(TouchPatch { left: Some(i % 2 == 0), ..TouchPatch::default() });
        }
        platform.buffer_input(Some(InputEvent::KeyUp(KeyCode::KeyW)));
        for frame in 1..=11 {
            platform.advance_frame(start + Duration::from_millis(16 * frame));
        }

        let navigation = &platform.handler;
        assert!(!navigation.controller.intent().forward, "KeyUp delivered");
        assert_eq!(navigation.body.velocity().z, 0.0);
    }
}
