//=========================================================================
// Camera Rig
//=========================================================================
//
// Smoothed camera pose with two mutually exclusive modes.
//
// Architecture:
// ```text
//   Cinematic:  legs[i] ── angle += dt·2π/duration ──> center + (r·cos, h, r·sin)
//                 │ elapsed >= duration → next leg; none left → Follow
//                 │ skip → Follow
//                 v
//   Follow:     player + offset, looking at player
//
//   both:       current = lerp(current, target, factor)   (per tick, not dt-scaled)
// ```
//
// Every cinematic run ends exactly once, by expiry, skip or restart, and
// emits a single CinematicEnded.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::TAU;

use glam::Vec3;
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::config::NavigationConfig;
use crate::core::events::NavigationEvent;
use crate::core::message_bus::MessageBus;

//=== Types ===============================================================

/// One segment of a cinematic: a timed orbit around a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLeg {
    pub center: Vec3,
    pub radius: f32,
    /// Camera height above `center.y`.
    pub height: f32,
    /// Seconds for one full revolution; the leg ends after this long.
    pub duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Cinematic,
    Follow,
}

/// Full rig state, exposed for inspection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub mode: CameraMode,
    pub position: Vec3,
    pub look_at: Vec3,
    /// Equal to the leg count once the cinematic is over.
    pub orbit_leg_index: usize,
    pub orbit_angle: f32,
    pub elapsed_in_leg: f32,
}

/// What the renderer applies to its camera each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

//=== CameraRig ===========================================================

#[derive(Debug, Clone)]
pub struct CameraRig {
    state: CameraState,
    legs: Vec<OrbitLeg>,
    follow_offset: Vec3,
    offset_override: Option<Vec3>,
    follow_smoothing: f32,
    cinematic_smoothing: f32,
}

impl CameraRig {
    /// Creates a rig in follow mode at the configured start position.
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            state: CameraState {
                mode: CameraMode::Follow,
                position: config.initial_camera_position(),
                look_at: Vec3::ZERO,
                orbit_leg_index: 0,
                orbit_angle: 0.0,
                elapsed_in_leg: 0.0,
            },
            legs: Vec::new(),
            follow_offset: config.follow_offset(),
            offset_override: None,
            follow_smoothing: config.follow_smoothing(),
            cinematic_smoothing: config.cinematic_smoothing(),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn mode(&self) -> CameraMode {
        self.state.mode
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.state.position,
            look_at: self.state.look_at,
        }
    }

    /// The offset follow mode currently uses.
    pub fn follow_offset(&self) -> Vec3 {
        self.offset_override.unwrap_or(self.follow_offset)
    }

    //--- Mode Control -----------------------------------------------------

    /// Starts a cinematic from its first leg.
    ///
    /// A cinematic already running is ended first, emitting its
    /// `CinematicEnded`. With no legs the new one ends on the next update.
    pub fn start_cinematic(&mut self, legs: Vec<OrbitLeg>, events: &mut MessageBus) {
        if self.state.mode == CameraMode::Cinematic {
            debug!(target: "nav::camera", "Cinematic restarted, ending the running one");
            self.end_cinematic(events);
        }
        info!(target: "nav::camera", "Cinematic started ({} legs)", legs.len());
        self.legs = legs;
        self.state.mode = CameraMode::Cinematic;
        self.state.orbit_leg_index = 0;
        self.state.orbit_angle = 0.0;
        self.state.elapsed_in_leg = 0.0;
    }

    /// Cancels a running cinematic. Returns `true` if one was running.
    pub fn skip(&mut self, events: &mut MessageBus) -> bool {
        if self.state.mode != CameraMode::Cinematic {
            debug!(target: "nav::camera", "Skip ignored, no cinematic running");
            return false;
        }
        info!(target: "nav::camera", "Cinematic skipped");
        self.end_cinematic(events);
        true
    }

    /// Overrides the follow offset (e.g. per tour stop); `None` restores the default.
    pub fn set_offset_override(&mut self, offset: Option<Vec3>) {
        self.offset_override = offset;
    }

    //--- Per-frame Update -------------------------------------------------

    /// Advances the rig by `dt` seconds.
    ///
    /// `player` is only needed in follow mode; without it the pose is held.
    pub fn update(&mut self, dt: f32, player: Option<Vec3>, events: &mut MessageBus) {
        match self.state.mode {
            CameraMode::Cinematic => self.update_cinematic(dt, events),
            CameraMode::Follow => match player {
                Some(player) => {
                    let target = player + self.follow_offset();
                    self.approach(target, player, self.follow_smoothing);
                }
                None => trace!(target: "nav::camera", "No player position, follow skipped"),
            },
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn update_cinematic(&mut self, dt: f32, events: &mut MessageBus) {
        // Legs without a positive duration complete immediately
        while self
            .legs
            .get(self.state.orbit_leg_index)
            .is_some_and(|leg| leg.duration <= 0.0)
        {
            self.next_leg();
        }

        let Some(leg) = self.legs.get(self.state.orbit_leg_index).copied() else {
            self.end_cinematic(events);
            return;
        };

        self.state.orbit_angle += dt * TAU / leg.duration;
        self.state.elapsed_in_leg += dt;

        let angle = self.state.orbit_angle;
        let offset = Vec3::new(leg.radius * angle.cos(), leg.height, leg.radius * angle.sin());
        let target = leg.center + offset;
        self.approach(target, leg.center, self.cinematic_smoothing);

        if self.state.elapsed_in_leg >= leg.duration {
            self.next_leg();
            if self.state.orbit_leg_index >= self.legs.len() {
                self.end_cinematic(events);
            }
        }
    }

    fn next_leg(&mut self) {
        self.state.orbit_leg_index += 1;
        self.state.orbit_angle = 0.0;
        self.state.elapsed_in_leg = 0.0;
        debug!(target: "nav::camera", "Cinematic leg {}", self.state.orbit_leg_index);
    }

    fn end_cinematic(&mut self, events: &mut MessageBus) {
        info!(target: "nav::camera", "Cinematic ended, following player");
        self.state.mode = CameraMode::Follow;
        self.state.orbit_leg_index = self.legs.len();
        events.push(NavigationEvent::CinematicEnded);
    }

    fn approach(&mut self, position: Vec3, look_at: Vec3, factor: f32) {
        self.state.position = self.state.position.lerp(position, factor);
        self.state.look_at = self.state.look_at.lerp(look_at, factor);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
