//=========================================================================
// Navigation Controller
//
// Per-frame orchestrator for the navigation & interaction core.
//
// Architecture:
// ```text
//   tick(dt, batches, body)
//     │
//     ├─ begin_frame   clear last frame's events, apply input batches
//     ├─ drive         skip → tour commands → manual navigation →
//     │                motion (+ jump) → velocity write → arrival
//     ├─ body.step(dt) external physics
//     └─ observe       proximity → interact → camera
// ```
//
// Every subsystem is owned here and mutated only inside these phases,
// in this fixed order, so all readers of a frame see the position that
// frame's physics step produced.
//
// Notes:
// Hosts that run their own physics call begin_frame / drive / observe
// around their step instead of tick().
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::camera::{CameraPose, CameraRig, OrbitLeg};
use crate::core::config::NavigationConfig;
use crate::core::events::{NavigationEvent, TourCommand};
use crate::core::input::{
    Control, InputAggregator, InputEvent, InputIntent, KeyBindings, TouchPatch,
};
use crate::core::message_bus::MessageBus;
use crate::core::motion::{MotionController, NavigationMode};
use crate::core::physics::{PhysicsBody, PhysicsStep};
use crate::core::proximity::{ProximityTracker, ZoneDefinition};
use crate::core::tour::{ManualNavigationGate, TourSequencer, Waypoint};

//=== NavigationController ================================================

/// Owns input, motion, proximity, tour and camera state and advances
/// them once per frame.
///
/// # Examples
///
/// ```
/// use campus_tour::core::controller::NavigationController;
/// use campus_tour::core::config::NavigationConfig;
/// use campus_tour::core::input::{InputEvent, KeyCode};
/// use campus_tour::core::physics::{PhysicsBody, SimpleBody};
/// use glam::Vec3;
///
/// let mut controller = NavigationController::new(NavigationConfig::default());
/// let mut body = SimpleBody::new();
/// body.spawn(Vec3::ZERO);
///
/// controller.tick(0.016, &[vec![InputEvent::KeyDown(KeyCode::KeyW)]], &mut body);
///
/// assert!(body.velocity().z < 0.0);
/// ```
#[derive(Debug)]
pub struct NavigationController {
    mode: NavigationMode,
    input: InputAggregator,
    motion: MotionController,
    proximity: ProximityTracker,
    tour: TourSequencer,
    camera: CameraRig,
    gate: ManualNavigationGate,
    bus: MessageBus,
    unspawned_reported: bool,
}

impl NavigationController {
    pub fn new(config: NavigationConfig) -> Self {
        info!(target: "nav::controller", "Navigation controller created: {:?}", config);

        Self {
            mode: NavigationMode::FreeRoam,
            input: InputAggregator::new(),
            motion: MotionController::new(&config),
            proximity: ProximityTracker::new(),
            tour: TourSequencer::default(),
            camera: CameraRig::new(&config),
            gate: ManualNavigationGate::new(config.manual_debounce()),
            bus: MessageBus::new(),
            unspawned_reported: false,
        }
    }

    //=====================================================================
    // Content & Mode
    //=====================================================================

    /// Loads a tour; guided steering is retargeted at its first stop.
    pub fn set_waypoints(&mut self, waypoints: Vec<Waypoint>) {
        self.tour.set_waypoints(waypoints);
        self.retarget();
    }

    /// Replaces the zone layer.
    pub fn set_zones(&mut self, zones: Vec<ZoneDefinition>) {
        self.proximity.set_zones(zones, &mut self.bus);
    }

    /// Starts a scripted camera cinematic, ending any running one.
    pub fn start_cinematic(&mut self, legs: Vec<OrbitLeg>) {
        self.camera.start_cinematic(legs, &mut self.bus);
    }

    /// Switches between free roam and guided tour.
    pub fn set_mode(&mut self, mode: NavigationMode) {
        if mode == self.mode {
            return;
        }

        info!(target: "nav::controller", "Mode changed to {:?}", mode);
        self.mode = mode;
        self.motion.set_mode(mode);
        self.retarget();
        self.bus.push(NavigationEvent::ModeChanged { mode });
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        self.input.bindings_mut()
    }

    //=====================================================================
    // Out-of-band Input
    //=====================================================================

    /// Writes on-screen button state (sampled next frame).
    pub fn set_touch(&mut self, patch: TouchPatch) {
        self.input.set_touch(patch);
    }

    /// Queues a tour command from UI buttons, applied next frame.
    pub fn request_tour(&mut self, command: TourCommand) {
        trace!(target: "nav::controller", "Tour command queued: {:?}", command);
        self.bus.push(command);
    }

    //=====================================================================
    // Frame Phases
    //=====================================================================

    /// Runs one complete frame, stepping the body between drive and observe.
    pub fn tick<B: PhysicsStep + ?Sized>(
        &mut self,
        dt: f32,
        batches: &[Vec<InputEvent>],
        body: &mut B,
    ) {
        self.begin_frame(batches);
        self.drive(dt, body);
        body.step(dt);
        self.observe(dt, &*body);
    }

    /// Clears last frame's notifications and applies this frame's input.
    pub fn begin_frame(&mut self, batches: &[Vec<InputEvent>]) {
        self.bus.clear::<NavigationEvent>();
        self.input.begin_frame();
        for batch in batches {
            self.input.process_events(batch);
        }
    }

    /// Resolves input into tour transitions and a velocity command.
    pub fn drive<B: PhysicsBody + ?Sized>(&mut self, dt: f32, body: &mut B) {
        let intent = self.input.sample();

        if self.input.control_pressed(Control::Skip) {
            self.camera.skip(&mut self.bus);
        }

        self.apply_tour_commands();
        self.gate.advance(dt);
        self.manual_navigation(&intent);

        let command = self.motion.drive(&intent, body);
        if command.arrived && self.mode == NavigationMode::GuidedTour {
            self.tour.arrive(&mut self.bus);
        }
    }

    /// Reads the stepped position into proximity and camera.
    pub fn observe<B: PhysicsBody + ?Sized>(&mut self, dt: f32, body: &B) {
        let position = body.position();

        match position {
            Some(position) => {
                self.unspawned_reported = false;
                self.proximity.update(position, &mut self.bus);
            }
            None if !self.unspawned_reported => {
                warn!(
                    target: "nav::controller",
                    "Body has no position yet, proximity and follow skipped"
                );
                self.unspawned_reported = true;
            }
            None => {}
        }

        self.proximity.interact(self.input.sample().interact, &mut self.bus);
        self.camera.update(dt, position, &mut self.bus);
    }

    //=====================================================================
    // Outputs
    //=====================================================================

    /// Notifications produced during the last frame.
    pub fn events(&self) -> &[NavigationEvent] {
        self.bus.read::<NavigationEvent>()
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose()
    }

    /// Avatar yaw for the renderer.
    pub fn facing(&self) -> f32 {
        self.motion.facing()
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn intent(&self) -> InputIntent {
        self.input.sample()
    }

    pub fn tour(&self) -> &TourSequencer {
        &self.tour
    }

    pub fn proximity(&self) -> &ProximityTracker {
        &self.proximity
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    //=====================================================================
    // Internal Helpers
    //=====================================================================

    fn apply_tour_commands(&mut self) {
        for command in self.bus.take::<TourCommand>() {
            if self.mode != NavigationMode::GuidedTour {
                debug!(target: "nav::controller", "{:?} ignored outside guided mode", command);
                continue;
            }

            let accepted = match command {
                TourCommand::Next => self.tour.go_to_next(&mut self.bus),
                TourCommand::Previous => self.tour.go_to_previous(&mut self.bus),
                TourCommand::GoTo(index) => self.tour.go_to_index(index, &mut self.bus),
            };
            if accepted {
                self.retarget();
            }
        }
    }

    fn manual_navigation(&mut self, intent: &InputIntent) {
        if self.mode != NavigationMode::GuidedTour || !(intent.forward || intent.backward) {
            return;
        }
        if !self.gate.try_accept() {
            return;
        }

        let accepted = if intent.forward {
            self.tour.go_to_next(&mut self.bus)
        } else {
            self.tour.go_to_previous(&mut self.bus)
        };
        if accepted {
            self.retarget();
        }
    }

    /// Points motion and camera at the current waypoint.
    fn retarget(&mut self) {
        let waypoint = self.tour.current_waypoint();
        let target: Option<Vec3> = waypoint.map(|w| w.position);
        let offset = match self.mode {
            NavigationMode::GuidedTour => waypoint.and_then(|w| w.camera_offset),
            NavigationMode::FreeRoam => None,
        };

        self.motion.set_target(target);
        self.camera.set_offset_override(offset);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
