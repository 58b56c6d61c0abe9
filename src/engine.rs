//=========================================================================
// Campus Tour Engine
//
// Main entry point: wires the window, the bridge channel and the
// navigation controller together.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(body, on_frame)──>  [Runtime]
//         │                          │
//         ├─ with_config()           ├─ init()          configure content
//         ├─ with_channel_capacity() ├─ input_sender()  UI overlays
//         └─ with_window_title()     └─ runs platform, blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use glam::Vec3;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::camera::CameraPose;
use crate::core::config::NavigationConfig;
use crate::core::controller::NavigationController;
use crate::core::events::NavigationEvent;
use crate::core::motion::NavigationMode;
use crate::core::physics::{PhysicsBody, PhysicsStep};
use crate::core::platform_bridge::{
    EventCollector, InputSender, PlatformError, PlatformEvent, TickControl,
};
use crate::platform::{FrameHandler, Platform};

//=== FrameOutput =========================================================

/// Everything a renderer needs after one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub camera: CameraPose,
    /// Avatar yaw in radians.
    pub facing: f32,
    pub mode: NavigationMode,
    /// `None` until the body is spawned.
    pub position: Option<Vec3>,
    pub events: Vec<NavigationEvent>,
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Config**: [`NavigationConfig::default`]
/// - **Channel capacity**: 128 events
/// - **Window title**: "Campus Tour"
///
/// # Examples
///
/// ```no_run
/// use campus_tour::EngineBuilder;
/// use campus_tour::core::config::NavigationConfig;
/// use campus_tour::core::physics::SimpleBody;
/// use glam::Vec3;
///
/// let mut body = SimpleBody::new().with_bounds(50.0);
/// body.spawn(Vec3::new(0.0, 5.0, 0.0));
///
/// EngineBuilder::new()
///     .with_config(NavigationConfig::default().with_walk_speed(4.0))
///     .with_channel_capacity(256)
///     .build()
///     .run(body, |frame| {
///         for event in &frame.events {
///             println!("{:?}", event);
///         }
///     })
///     .unwrap();
/// ```
pub struct EngineBuilder {
    config: NavigationConfig,
    channel_capacity: usize,
    window_title: String,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: NavigationConfig::default(),
            channel_capacity: 128,
            window_title: String::from("Campus Tour"),
        }
    }

    pub fn with_config(mut self, config: NavigationConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the capacity of each bridge channel (window input, UI input).
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (channel: {}, title: {:?})",
            self.channel_capacity, self.window_title
        );

        let (window_sender, window_receiver) = bounded(self.channel_capacity);
        let (ui_sender, ui_receiver) = bounded(self.channel_capacity);

        Engine {
            controller: NavigationController::new(self.config),
            window_sender,
            window_receiver,
            ui_sender,
            ui_receiver,
            channel_capacity: self.channel_capacity,
            window_title: self.window_title,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Campus tour runtime.
///
/// Create via [`EngineBuilder`]. The controller runs on the event loop
/// thread, once per redraw; other threads feed it through
/// [`Engine::input_sender`].
pub struct Engine {
    controller: NavigationController,
    window_sender: Sender<PlatformEvent>,
    window_receiver: Receiver<PlatformEvent>,
    ui_sender: Sender<PlatformEvent>,
    ui_receiver: Receiver<PlatformEvent>,
    channel_capacity: usize,
    window_title: String,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Configures the controller (zones, waypoints, cinematic, bindings)
    /// before execution.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use campus_tour::EngineBuilder;
    /// use campus_tour::core::input::{Control, KeyCode};
    /// use campus_tour::core::motion::NavigationMode;
    ///
    /// let engine = EngineBuilder::new().build().init(|controller| {
    ///     controller.bindings_mut().bind_key(KeyCode::KeyF, Control::Interact);
    ///     controller.set_mode(NavigationMode::GuidedTour);
    /// });
    /// ```
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut NavigationController),
    {
        info!("Initializing navigation controller");
        init_fn(&mut self.controller);
        self
    }

    /// Returns a handle for on-screen controls (touch buttons, tour
    /// buttons, mode toggle). May be cloned and moved to other threads.
    pub fn input_sender(&self) -> InputSender {
        InputSender::new(self.ui_sender.clone())
    }

    //--- Execution --------------------------------------------------------

    /// Opens the window and runs the navigation loop until it closes.
    ///
    /// `on_frame` is called once per frame, after the body has been
    /// stepped and every subsystem updated.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub fn run<B, F>(self, body: B, on_frame: F) -> Result<(), PlatformError>
    where
        B: PhysicsStep,
        F: FnMut(&FrameOutput),
    {
        info!("Starting engine runtime (channel capacity: {})", self.channel_capacity);

        let frame = NavigationFrame {
            controller: self.controller,
            collector: EventCollector::new(self.window_receiver, self.ui_receiver),
            body,
            on_frame,
        };

        let platform = Platform::new(self.window_sender, frame, self.window_title);
        info!("Platform initialized, entering event loop");

        let result = platform.run();

        info!("Engine shutdown complete");
        result
    }
}

//=== NavigationFrame =====================================================

/// Per-redraw driver: drain the channels, run the frame phases, report.
struct NavigationFrame<B, F> {
    controller: NavigationController,
    collector: EventCollector,
    body: B,
    on_frame: F,
}

impl<B: PhysicsStep, F: FnMut(&FrameOutput)> NavigationFrame<B, F> {
    fn output(&self) -> FrameOutput {
        FrameOutput {
            camera: self.controller.camera_pose(),
            facing: self.controller.facing(),
            mode: self.controller.mode(),
            position: self.body.position(),
            events: self.controller.events().to_vec(),
        }
    }
}

impl<B: PhysicsStep, F: FnMut(&FrameOutput)> FrameHandler for NavigationFrame<B, F> {
    fn frame(&mut self, dt: f32) -> TickControl {
        if self.collector.collect_frame() == TickControl::Exit {
            debug!("Bridge requested exit");
            return TickControl::Exit;
        }

        // UI updates land after begin_frame so their events reach this frame's output
        self.controller.begin_frame(self.collector.batches());
        if let Some(mode) = self.collector.mode() {
            self.controller.set_mode(mode);
        }
        if let Some(patch) = self.collector.touch_patch() {
            self.controller.set_touch(patch);
        }
        for command in self.collector.tour_commands() {
            self.controller.request_tour(*command);
        }

        self.controller.drive(dt, &mut self.body);
        self.body.step(dt);
        self.controller.observe(dt, &self.body);

        let output = self.output();
        (self.on_frame)(&output);

        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::TourCommand;
    use crate::core::input::{InputEvent, KeyCode, TouchPatch};
    use crate::core::physics::SimpleBody;
    use crate::core::tour::Waypoint;

    type TestFrame = NavigationFrame<SimpleBody, fn(&FrameOutput)>;

    fn ignore_output(_: &FrameOutput) {}

    /// Returns the window-side sender alongside the frame, standing in for
    /// the platform.
    fn frame_for(engine: Engine, body: SimpleBody) -> (Sender<PlatformEvent>, TestFrame) {
        let frame: TestFrame = NavigationFrame {
            controller: engine.controller,
            collector: EventCollector::new(engine.window_receiver, engine.ui_receiver),
            body,
            on_frame: ignore_output,
        };
        (engine.window_sender, frame)
    }

    fn spawned() -> SimpleBody {
        let mut body = SimpleBody::new();
        body.spawn(Vec3::ZERO);
        body
    }

    fn three_stops() -> Vec<Waypoint> {
        vec![
            Waypoint::new(Vec3::ZERO, "Gate", ""),
            Waypoint::new(Vec3::new(10.0, 0.0, 0.0), "Hall", ""),
            Waypoint::new(Vec3::new(20.0, 0.0, 0.0), "Library", ""),
        ]
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.window_title, "Campus Tour");
        assert_eq!(builder.config, NavigationConfig::default());
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_config(NavigationConfig::default().with_walk_speed(3.0))
            .with_channel_capacity(16)
            .with_window_title("Campus")
            .build();

        assert_eq!(engine.channel_capacity, 16);
        assert_eq!(engine.window_title, "Campus");
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn init_configures_controller() {
        let engine = EngineBuilder::new()
            .build()
            .init(|controller| controller.set_mode(NavigationMode::GuidedTour));

        assert_eq!(engine.controller.mode(), NavigationMode::GuidedTour);
    }

    #[test]
    fn input_sender_reaches_the_frame() {
        let engine = EngineBuilder::new().build();
        let sender = engine.input_sender();
        let (_window, mut frame) = frame_for(engine, spawned());

        assert!(sender.set_touch(TouchPatch { right: Some(true), ..TouchPatch::default() }));
        assert_eq!(frame.frame(0.016), TickControl::Continue);

        assert!(frame.controller.intent().right);
        assert!(frame.body.velocity().x > 0.0);
    }

    #[test]
    fn input_sender_switches_mode_and_drives_the_tour() {
        let engine = EngineBuilder::new()
            .build()
            .init(|controller| controller.set_waypoints(three_stops()));
        let sender = engine.input_sender();
        let (_window, mut frame) = frame_for(engine, spawned());

        assert!(sender.set_mode(NavigationMode::GuidedTour));
        assert!(sender.request_tour(TourCommand::GoTo(2)));
        frame.frame(0.016);

        let output = frame.output();
        assert_eq!(output.mode, NavigationMode::GuidedTour);
        let mode_changed = NavigationEvent::ModeChanged { mode: NavigationMode::GuidedTour };
        assert!(output.events.contains(&mode_changed));
        assert!(output.events.contains(&NavigationEvent::WaypointChanged { index: 2 }));
        assert_eq!(frame.controller.tour().current_index(), 2);
        assert!(frame.body.velocity().x > 0.0, "Steering toward the new stop");
    }

    #[test]
    fn tour_requests_are_ignored_in_free_roam() {
        let engine = EngineBuilder::new()
            .build()
            .init(|controller| controller.set_waypoints(three_stops()));
        let sender = engine.input_sender();
        let (_window, mut frame) = frame_for(engine, spawned());

        assert!(sender.request_tour(TourCommand::Next));
        frame.frame(0.016);

        assert_eq!(frame.controller.tour().current_index(), 0);
        assert!(frame.output().events.is_empty());
    }

    #[test]
    fn frame_applies_key_batches_and_reports_output() {
        let engine = EngineBuilder::new().build();
        let (window, mut frame) = frame_for(engine, spawned());

        window
            .try_send(PlatformEvent::Inputs(vec![InputEvent::KeyDown(KeyCode::KeyS)]))
            .unwrap();
        frame.frame(0.016);

        let output = frame.output();
        assert_eq!(output.mode, NavigationMode::FreeRoam);
        assert!(output.position.is_some_and(|p| p.z > 0.0));
        assert!(output.events.is_empty());
    }

    #[test]
    fn window_closed_stops_the_frame() {
        let engine = EngineBuilder::new().build();
        let (window, mut frame) = frame_for(engine, spawned());

        window.try_send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(frame.frame(0.016), TickControl::Exit);
    }

    #[test]
    fn dropped_input_senders_do_not_stop_the_frame() {
        let engine = EngineBuilder::new().build();
        drop(engine.input_sender());
        let (_window, mut frame) = frame_for(engine, spawned());

        assert_eq!(frame.frame(0.016), TickControl::Continue);
    }
}
